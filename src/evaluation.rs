//! Measuring classifier accuracy.
//!
//! [`evaluate`] runs a trained classifier over labelled documents and counts
//! its answers in a [`ConfusionMatrix`]. [`CrossValidator`] repeats that over
//! K balanced folds, training a fresh classifier for every fold.

pub mod confusion_matrix;
pub mod cross_validator;

pub use confusion_matrix::ConfusionMatrix;
pub use cross_validator::{CrossValidationReport, CrossValidator, FoldResult};

use log::debug;

use crate::classifier::{Classifier, ClassifierKind};
use crate::document::ClassDocument;
use crate::error::Result;

/// Predict every testing document and count the outcomes.
///
/// The matrix is built over the classifier's classes; a testing label the
/// classifier never saw is an [`UnknownLabel`](crate::error::TextfoldError::UnknownLabel) error.
pub fn evaluate(classifier: &dyn Classifier, testing: &[ClassDocument]) -> Result<ConfusionMatrix> {
    let mut matrix = ConfusionMatrix::new(classifier.classes().to_vec());
    for document in testing {
        let predicted = classifier.predict(document.document());
        matrix.add(document.label(), predicted)?;
    }
    debug!(
        "Evaluated {} on {} documents",
        classifier.name(),
        testing.len()
    );
    Ok(matrix)
}

/// Train on one set and test on another.
pub fn hold_out(
    kind: &ClassifierKind,
    training: Vec<ClassDocument>,
    testing: &[ClassDocument],
) -> Result<FoldResult> {
    kind.validate()?;
    let training_documents = training.len();
    let classifier = kind.train(training)?;
    let confusion_matrix = evaluate(classifier.as_ref(), testing)?;

    Ok(FoldResult {
        fold: 0,
        training_documents,
        testing_documents: testing.len(),
        accuracy: confusion_matrix.accuracy(),
        confusion_matrix,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentConfig;
    use crate::error::TextfoldError;

    fn labeled(entries: &[(&str, &str)]) -> Vec<ClassDocument> {
        let parser = DocumentConfig::default().parser().unwrap();
        entries
            .iter()
            .map(|(text, label)| parser.parse_labeled(*text, *label).unwrap())
            .collect()
    }

    #[test]
    fn test_evaluate() {
        let classifier = ClassifierKind::Id3
            .train(labeled(&[("good", "+"), ("bad", "-")]))
            .unwrap();
        let testing = labeled(&[("good day", "+"), ("bad day", "-"), ("bad but good", "+")]);

        let matrix = evaluate(classifier.as_ref(), &testing).unwrap();
        assert_eq!(matrix.total(), 3);
        assert_eq!(matrix.correct(), 2);
    }

    #[test]
    fn test_unknown_testing_label_is_an_error() {
        let classifier = ClassifierKind::Id3
            .train(labeled(&[("good", "+"), ("bad", "-")]))
            .unwrap();
        let testing = labeled(&[("so so", "neutral")]);

        let error = evaluate(classifier.as_ref(), &testing).unwrap_err();
        assert!(matches!(error, TextfoldError::UnknownLabel(_)));
    }

    #[test]
    fn test_hold_out() {
        let training = labeled(&[("good", "+"), ("great", "+"), ("bad", "-"), ("awful", "-")]);
        let testing = labeled(&[("good", "+"), ("awful", "-")]);

        let result = hold_out(&ClassifierKind::NaiveBayes { smoothing: 1.0 }, training, &testing)
            .unwrap();
        assert_eq!(result.training_documents, 4);
        assert_eq!(result.testing_documents, 2);
        assert_eq!(result.accuracy, 1.0);
    }
}
