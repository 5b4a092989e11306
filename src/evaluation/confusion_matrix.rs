//! Actual-versus-predicted label counts.

use std::fmt;

use serde::Serialize;

use crate::error::{Result, TextfoldError};

const CELL_WIDTH: usize = 18;

/// Square count matrix over a fixed class list.
///
/// Rows are predicted classes, columns are actual classes, both in the order
/// of the class list given at construction.
///
/// # Examples
///
/// ```
/// use textfold::evaluation::ConfusionMatrix;
///
/// let mut matrix = ConfusionMatrix::new(vec!["+".to_string(), "-".to_string()]);
/// matrix.add("+", "+").unwrap();
/// matrix.add("-", "+").unwrap();
///
/// assert_eq!(matrix.get("+", "-"), Some(1));
/// assert_eq!(matrix.accuracy(), 0.5);
/// assert!(matrix.add("?", "+").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    classes: Vec<String>,
    matrix: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    /// An all-zero matrix over the given classes.
    pub fn new(classes: Vec<String>) -> Self {
        let size = classes.len();
        ConfusionMatrix {
            classes,
            matrix: vec![vec![0; size]; size],
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    fn index(&self, label: &str) -> Result<usize> {
        self.classes
            .iter()
            .position(|class| class == label)
            .ok_or_else(|| TextfoldError::UnknownLabel(label.to_string()))
    }

    /// Count one prediction.
    ///
    /// Fails with [`TextfoldError::UnknownLabel`] if either label is not one
    /// of the matrix's classes.
    pub fn add(&mut self, actual: &str, predicted: &str) -> Result<()> {
        let column = self.index(actual)?;
        let row = self.index(predicted)?;
        self.matrix[row][column] += 1;
        Ok(())
    }

    /// Count stored for a predicted/actual pair.
    pub fn get(&self, predicted: &str, actual: &str) -> Option<usize> {
        let row = self.index(predicted).ok()?;
        let column = self.index(actual).ok()?;
        Some(self.matrix[row][column])
    }

    /// Rows of counts, one per predicted class.
    pub fn rows(&self) -> &[Vec<usize>] {
        &self.matrix
    }

    /// Number of predictions counted.
    pub fn total(&self) -> usize {
        self.matrix.iter().flatten().sum()
    }

    /// Number of correct predictions (the trace).
    pub fn correct(&self) -> usize {
        self.matrix.iter().enumerate().map(|(i, row)| row[i]).sum()
    }

    /// Fraction of correct predictions; 0 when nothing was counted.
    pub fn accuracy(&self) -> f64 {
        let correct = self.correct();
        if correct == 0 {
            return 0.0;
        }
        correct as f64 / self.total() as f64
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<width$}", "|", width = CELL_WIDTH)?;
        for class in &self.classes {
            write!(f, "{:<width$}", format!("| {class}"), width = CELL_WIDTH)?;
        }
        writeln!(f)?;

        for (class, row) in self.classes.iter().zip(&self.matrix) {
            write!(f, "{:<width$}", format!("| {class}"), width = CELL_WIDTH)?;
            for count in row {
                write!(f, "{:<width$}", format!("| {count}"), width = CELL_WIDTH)?;
            }
            writeln!(f)?;
        }

        write!(f, "\nAccuracy is {:.2}%", 100.0 * self.accuracy())
    }
}
