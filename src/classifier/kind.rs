//! Classifier selection and training.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::classifier::id3::Id3;
use crate::classifier::knn::{Knn, KnnConfig};
use crate::classifier::naive_bayes::{NaiveBayes, NaiveBayesConfig};
use crate::classifier::Classifier;
use crate::document::ClassDocument;
use crate::error::{Result, TextfoldError};

/// A classifier together with its hyperparameters.
///
/// Validating a kind checks every hyperparameter, so configuration errors
/// surface before any document is read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassifierKind {
    NaiveBayes { smoothing: f64 },
    Knn(KnnConfig),
    Id3,
}

impl ClassifierKind {
    /// Check the hyperparameters without training anything.
    pub fn validate(&self) -> Result<()> {
        match self {
            ClassifierKind::NaiveBayes { smoothing } => NaiveBayesConfig {
                smoothing: *smoothing,
            }
            .validate(),
            ClassifierKind::Knn(config) => config.validate(),
            ClassifierKind::Id3 => Ok(()),
        }
    }

    /// Train a fresh classifier on the documents.
    pub fn train(&self, documents: Vec<ClassDocument>) -> Result<Box<dyn Classifier>> {
        Ok(match self {
            ClassifierKind::NaiveBayes { smoothing } => {
                Box::new(NaiveBayes::new(documents, *smoothing)?)
            }
            ClassifierKind::Knn(config) => Box::new(Knn::new(documents, *config)?),
            ClassifierKind::Id3 => Box::new(Id3::new(documents)?),
        })
    }

    pub fn name(&self) -> ClassifierName {
        match self {
            ClassifierKind::NaiveBayes { .. } => ClassifierName::NaiveBayes,
            ClassifierKind::Knn(_) => ClassifierName::Knn,
            ClassifierKind::Id3 => ClassifierName::Id3,
        }
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifierKind::NaiveBayes { smoothing } => {
                write!(f, "naive_bayes (smoothing = {smoothing})")
            }
            ClassifierKind::Knn(config) => write!(
                f,
                "knn (k = {}, weighted = {})",
                config.k, config.weight_neighbors
            ),
            ClassifierKind::Id3 => f.write_str("id3"),
        }
    }
}

/// Classifier names accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[value(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ClassifierName {
    /// Multinomial Naive Bayes
    NaiveBayes,
    /// k-nearest-neighbours (needs a neighbour count)
    Knn,
    /// ID3 decision tree
    Id3,
}

impl ClassifierName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifierName::NaiveBayes => "naive_bayes",
            ClassifierName::Knn => "knn",
            ClassifierName::Id3 => "id3",
        }
    }

    /// Attach hyperparameters; `knn` requires a neighbour configuration.
    pub fn kind(self, smoothing: f64, knn: Option<KnnConfig>) -> Result<ClassifierKind> {
        let kind = match self {
            ClassifierName::NaiveBayes => ClassifierKind::NaiveBayes { smoothing },
            ClassifierName::Knn => ClassifierKind::Knn(knn.ok_or_else(|| {
                TextfoldError::invalid_config("knn requires the number of neighbours")
            })?),
            ClassifierName::Id3 => ClassifierKind::Id3,
        };
        kind.validate()?;
        Ok(kind)
    }
}

impl fmt::Display for ClassifierName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
