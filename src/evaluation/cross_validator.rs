//! Balanced k-fold cross-validation.

use std::fmt;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;

use crate::classifier::ClassifierKind;
use crate::document::{ClassDocument, group_by_class};
use crate::error::{Result, TextfoldError};
use crate::evaluation::confusion_matrix::ConfusionMatrix;
use crate::evaluation::evaluate;

/// Outcome of one train/test cycle.
#[derive(Debug, Clone, Serialize)]
pub struct FoldResult {
    /// Zero-based fold index.
    pub fold: usize,
    pub training_documents: usize,
    pub testing_documents: usize,
    pub accuracy: f64,
    pub confusion_matrix: ConfusionMatrix,
}

/// Per-fold results and their mean accuracy.
#[derive(Debug, Clone, Serialize)]
pub struct CrossValidationReport {
    pub classifier: ClassifierKind,
    pub folds: Vec<FoldResult>,
    pub mean_accuracy: f64,
    pub elapsed: Duration,
    pub started_at: DateTime<Utc>,
}

impl fmt::Display for CrossValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.folds.len();
        for result in &self.folds {
            writeln!(f, "Cross-Validating ({} of {})", result.fold + 1, total)?;
            writeln!(f, "{}\n", result.confusion_matrix)?;
        }
        writeln!(
            f,
            "Average accuracy is {:.2}%.\n",
            100.0 * self.mean_accuracy
        )?;
        write!(f, "{}", format_elapsed(self.elapsed))
    }
}

/// `H:MM:SS.ffffff`
pub fn format_elapsed(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs();
    format!(
        "{}:{:02}:{:02}.{:06}",
        seconds / 3600,
        (seconds / 60) % 60,
        seconds % 60,
        elapsed.subsec_micros()
    )
}

/// Splits a corpus into K class-balanced folds.
///
/// Each fold takes `floor(n / K)` consecutive documents of every class with
/// `n` documents; the remainder of each class is left out.
///
/// # Examples
///
/// ```
/// use textfold::classifier::ClassifierKind;
/// use textfold::document::DocumentConfig;
/// use textfold::evaluation::CrossValidator;
///
/// let parser = DocumentConfig::default().parser().unwrap();
/// let mut documents = Vec::new();
/// for i in 0..4 {
///     documents.push(parser.parse_labeled(format!("good great {i}"), "+").unwrap());
///     documents.push(parser.parse_labeled(format!("bad awful {i}"), "-").unwrap());
/// }
///
/// let validator = CrossValidator::new(documents, 2).unwrap();
/// let report = validator.cross_validate(&ClassifierKind::Id3).unwrap();
///
/// assert_eq!(report.folds.len(), 2);
/// assert_eq!(report.mean_accuracy, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct CrossValidator {
    folds: Vec<Vec<ClassDocument>>,
}

impl CrossValidator {
    pub fn new(documents: Vec<ClassDocument>, folds: usize) -> Result<Self> {
        if folds < 2 {
            return Err(TextfoldError::invalid_config(format!(
                "cross-validation needs at least 2 folds, got {folds}"
            )));
        }

        let mut sets: Vec<Vec<ClassDocument>> = vec![Vec::new(); folds];
        let mut dropped = 0;
        for (class, documents) in group_by_class(documents) {
            let per_fold = documents.len() / folds;
            dropped += documents.len() - per_fold * folds;
            if per_fold == 0 {
                warn!(
                    "Class {class} has {} documents, fewer than {folds} folds; left out",
                    documents.len()
                );
                continue;
            }
            for (set, chunk) in sets.iter_mut().zip(documents.chunks_exact(per_fold)) {
                set.extend_from_slice(chunk);
            }
        }

        if sets.iter().all(Vec::is_empty) {
            return Err(TextfoldError::evaluation(format!(
                "no class has at least {folds} documents"
            )));
        }
        if dropped > 0 {
            warn!("{dropped} documents do not fit evenly into {folds} folds and are left out");
        }

        Ok(CrossValidator { folds: sets })
    }

    /// The balanced folds.
    pub fn folds(&self) -> &[Vec<ClassDocument>] {
        &self.folds
    }

    pub fn fold_count(&self) -> usize {
        self.folds.len()
    }

    /// Fold `index` as the testing set, every other fold merged as training.
    pub fn training_testing(&self, index: usize) -> Result<(Vec<ClassDocument>, Vec<ClassDocument>)> {
        if index >= self.folds.len() {
            return Err(TextfoldError::invalid_argument(format!(
                "fold {index} is out of range (0..{})",
                self.folds.len()
            )));
        }

        let mut training = Vec::new();
        let mut testing = Vec::new();
        for (i, fold) in self.folds.iter().enumerate() {
            if i == index {
                testing.extend_from_slice(fold);
            } else {
                training.extend_from_slice(fold);
            }
        }
        Ok((training, testing))
    }

    /// Train a fresh classifier per fold and test it on the held-out fold.
    pub fn cross_validate(&self, kind: &ClassifierKind) -> Result<CrossValidationReport> {
        kind.validate()?;

        let started_at = Utc::now();
        let start = Instant::now();
        let total = self.folds.len();

        let mut folds = Vec::with_capacity(total);
        for index in 0..total {
            info!("Cross-Validating ({} of {total}) with {kind}", index + 1);
            let (training, testing) = self.training_testing(index)?;
            let training_documents = training.len();

            let classifier = kind.train(training)?;
            let confusion_matrix = evaluate(classifier.as_ref(), &testing)?;
            let accuracy = confusion_matrix.accuracy();
            info!("Fold {} accuracy {:.2}%", index + 1, 100.0 * accuracy);

            folds.push(FoldResult {
                fold: index,
                training_documents,
                testing_documents: testing.len(),
                accuracy,
                confusion_matrix,
            });
        }

        let mean_accuracy = folds.iter().map(|fold| fold.accuracy).sum::<f64>() / total as f64;
        let elapsed = start.elapsed();
        info!("Average accuracy is {:.2}%", 100.0 * mean_accuracy);

        Ok(CrossValidationReport {
            classifier: *kind,
            folds,
            mean_accuracy,
            elapsed,
            started_at,
        })
    }
}
