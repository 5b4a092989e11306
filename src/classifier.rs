//! Supervised text classifiers.
//!
//! Every classifier is trained when it is constructed and is read-only
//! afterwards. Three implementations are provided:
//!
//! - [`NaiveBayes`]: log priors plus additively smoothed log likelihoods
//! - [`Knn`]: cosine similarity over tf-idf document vectors
//! - [`Id3`]: a binary decision tree over word presence
//!
//! [`ClassifierKind`] selects one of them with its hyperparameters and trains
//! fresh instances on demand, which is how cross-validation builds a new
//! model for every fold.
//!
//! # Example
//!
//! ```
//! use textfold::classifier::{Classifier, ClassifierKind};
//! use textfold::document::{Document, DocumentConfig};
//!
//! let parser = DocumentConfig::default().parser().unwrap();
//! let training = vec![
//!     parser.parse_labeled("I like this product very much.", "+").unwrap(),
//!     parser.parse_labeled("Easy to use, recommended.", "+").unwrap(),
//!     parser.parse_labeled("Don't like it, hard to use. Not recommended.", "-").unwrap(),
//! ];
//!
//! let classifier = ClassifierKind::NaiveBayes { smoothing: 1.0 }
//!     .train(training)
//!     .unwrap();
//! let document = parser.parse("use recommended").unwrap();
//!
//! assert_eq!(classifier.predict(&document), "+");
//! assert_eq!(classifier.classes(), ["+", "-"]);
//! ```

pub mod id3;
pub mod kind;
pub mod knn;
pub mod naive_bayes;

pub use id3::Id3;
pub use kind::{ClassifierKind, ClassifierName};
pub use knn::{Knn, KnnConfig};
pub use naive_bayes::{NaiveBayes, NaiveBayesConfig};

use crate::document::{ClassDocument, Document};
use crate::error::{Result, TextfoldError};

/// A trained classifier.
///
/// Implementations must be usable from several threads at once; prediction
/// never mutates the model.
pub trait Classifier: Send + Sync {
    /// The distinct training labels, in first-seen order.
    fn classes(&self) -> &[String];

    /// Predict the label of a document.
    ///
    /// Always returns one of [`classes`](Classifier::classes), even when
    /// none of the document's words were seen during training.
    fn predict(&self, document: &Document) -> &str;

    /// Get the name of this classifier for logging and reports.
    fn name(&self) -> &str;
}

/// Reject an empty training set.
pub(crate) fn ensure_training_set(documents: &[ClassDocument], classifier: &str) -> Result<()> {
    if documents.is_empty() {
        return Err(TextfoldError::classification(format!(
            "{classifier} needs at least one training document"
        )));
    }
    Ok(())
}
