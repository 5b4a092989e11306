//! # textfold
//!
//! Bag-of-words text classification for Rust.
//!
//! ## Features
//!
//! - Configurable tokenization (stop words, word n-grams, term counts)
//! - Term-document matrix with tf-idf document and word vectors
//! - Multinomial Naive Bayes, k-nearest-neighbours and ID3 classifiers
//! - Confusion matrices and class-balanced k-fold cross-validation
//! - Loaders for the Amazon review and BBC news corpora

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod document;
pub mod error;
pub mod evaluation;
pub mod term_document_matrix;

pub mod prelude {
    pub use crate::classifier::{Classifier, ClassifierKind};
    pub use crate::dataset::Dataset;
    pub use crate::document::{ClassDocument, Document, DocumentConfig};
    pub use crate::error::{Result, TextfoldError};
    pub use crate::evaluation::{ConfusionMatrix, CrossValidator};
    pub use crate::term_document_matrix::TermDocumentMatrix;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
