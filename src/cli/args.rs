//! Command line argument parsing for the textfold CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::classifier::ClassifierName;
use crate::dataset::DatasetName;

/// textfold - bag-of-words text classification and cross-validation
#[derive(Parser, Debug, Clone)]
#[command(name = "textfold")]
#[command(about = "Train and cross-validate Naive Bayes, KNN and ID3 text classifiers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TextfoldArgs {
    /// Increase verbosity (-v for progress, -vv for debug output)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, env = "TEXTFOLD_CONFIG", value_name = "CONFIG_FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TextfoldArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Cross-validate a classifier over balanced folds of a dataset
    #[command(name = "cross-validate")]
    CrossValidate(CrossValidateArgs),

    /// Train on one part of a dataset and test on the rest
    Evaluate(EvaluateArgs),

    /// Train on a whole dataset and classify a piece of text
    Predict(PredictArgs),
}

/// How documents are tokenized; each flag overrides the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct DocumentArgs {
    /// Count repeated words instead of collapsing them
    #[arg(long)]
    pub preserve_duplicates: bool,

    /// Drop common English stop words
    #[arg(long)]
    pub remove_stopwords: bool,

    /// Word n-gram sizes to add (comma-separated)
    #[arg(long, value_delimiter = ',', value_name = "SIZES")]
    pub ngrams: Vec<usize>,
}

/// Classifier hyperparameters that have a default.
#[derive(Args, Debug, Clone, Default)]
pub struct ClassifierArgs {
    /// Additive smoothing of the Naive Bayes likelihoods
    #[arg(long, value_name = "ALPHA")]
    pub smoothing: Option<f64>,

    /// Count KNN neighbours as one vote each instead of by similarity
    #[arg(long)]
    pub no_weighting: bool,
}

/// Arguments for cross-validation
#[derive(Parser, Debug, Clone)]
pub struct CrossValidateArgs {
    /// Number of folds (at least 2)
    #[arg(value_name = "FOLDS")]
    pub folds: usize,

    /// Dataset to load
    #[arg(value_name = "DATASET")]
    pub dataset: DatasetName,

    /// Classifier to train
    #[arg(value_name = "CLASSIFIER")]
    pub classifier: ClassifierName,

    /// Number of neighbours (knn only)
    #[arg(value_name = "NEIGHBOURS")]
    pub neighbours: Option<usize>,

    #[command(flatten)]
    pub classifier_args: ClassifierArgs,

    #[command(flatten)]
    pub document: DocumentArgs,
}

/// Arguments for a hold-out evaluation
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    /// Dataset to load
    #[arg(value_name = "DATASET")]
    pub dataset: DatasetName,

    /// Classifier to train
    #[arg(value_name = "CLASSIFIER")]
    pub classifier: ClassifierName,

    /// Number of neighbours (knn only)
    #[arg(short = 'k', long, alias = "neighbours")]
    pub neighbors: Option<usize>,

    /// Fraction of every class used for training
    #[arg(short, long, default_value = "0.8")]
    pub split: f64,

    #[command(flatten)]
    pub classifier_args: ClassifierArgs,

    #[command(flatten)]
    pub document: DocumentArgs,
}

/// Arguments for classifying a text
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Dataset to train on
    #[arg(value_name = "DATASET")]
    pub dataset: DatasetName,

    /// Classifier to train
    #[arg(value_name = "CLASSIFIER")]
    pub classifier: ClassifierName,

    /// Text to classify
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Number of neighbours (knn only)
    #[arg(short = 'k', long, alias = "neighbours")]
    pub neighbors: Option<usize>,

    #[command(flatten)]
    pub classifier_args: ClassifierArgs,

    #[command(flatten)]
    pub document: DocumentArgs,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
