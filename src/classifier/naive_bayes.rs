//! Multinomial Naive Bayes with additive smoothing.

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::classifier::{Classifier, ensure_training_set};
use crate::document::{ClassDocument, Document, collect_classes};
use crate::error::{Result, TextfoldError};

/// Hyperparameters of [`NaiveBayes`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NaiveBayesConfig {
    /// Additive (Laplace) smoothing constant `k`.
    pub smoothing: f64,
}

impl Default for NaiveBayesConfig {
    fn default() -> Self {
        NaiveBayesConfig { smoothing: 1.0 }
    }
}

impl NaiveBayesConfig {
    pub fn validate(&self) -> Result<()> {
        validate_smoothing(self.smoothing)
    }
}

fn validate_smoothing(smoothing: f64) -> Result<()> {
    if !(smoothing.is_finite() && smoothing > 0.0) {
        return Err(TextfoldError::invalid_config(format!(
            "smoothing must be a positive number, got {smoothing}"
        )));
    }
    Ok(())
}

/// Naive Bayes classifier.
///
/// Scores every class with `ln P(c) + Σ ln P(w | c)` over the tokens of the
/// document, where
/// `P(w | c) = (count(w, c) + k) / (total(c) + |V| · k)`.
#[derive(Debug, Clone)]
pub struct NaiveBayes {
    classes: Vec<String>,
    vocabulary: IndexMap<String, usize>,
    class_vocabularies: IndexMap<String, IndexMap<String, usize>>,
    class_word_counts: IndexMap<String, usize>,
    log_priors: IndexMap<String, f64>,
    smoothing: f64,
}

impl NaiveBayes {
    /// Train on the given documents with smoothing constant `k`.
    pub fn new(documents: Vec<ClassDocument>, smoothing: f64) -> Result<Self> {
        validate_smoothing(smoothing)?;
        ensure_training_set(&documents, "naive_bayes")?;

        let classes = collect_classes(&documents);

        let mut vocabulary: IndexMap<String, usize> = IndexMap::new();
        let mut class_vocabularies: IndexMap<String, IndexMap<String, usize>> = classes
            .iter()
            .map(|class| (class.clone(), IndexMap::new()))
            .collect();
        let mut class_documents: IndexMap<&str, usize> = IndexMap::new();

        for document in &documents {
            *class_documents.entry(document.label()).or_insert(0) += 1;
            let Some(class_vocabulary) = class_vocabularies.get_mut(document.label()) else {
                continue;
            };
            for word in document.bag().iter() {
                increment(&mut vocabulary, word);
                increment(class_vocabulary, word);
            }
        }

        let class_word_counts: IndexMap<String, usize> = class_vocabularies
            .iter()
            .map(|(class, words)| (class.clone(), words.values().sum()))
            .collect();

        let total = documents.len() as f64;
        let log_priors: IndexMap<String, f64> = classes
            .iter()
            .map(|class| {
                let count = class_documents.get(class.as_str()).copied().unwrap_or(0);
                (class.clone(), (count as f64 / total).ln())
            })
            .collect();

        debug!(
            "Trained naive_bayes on {} documents, {} classes, {} words",
            documents.len(),
            classes.len(),
            vocabulary.len()
        );

        Ok(NaiveBayes {
            classes,
            vocabulary,
            class_vocabularies,
            class_word_counts,
            log_priors,
            smoothing,
        })
    }

    /// Train with a [`NaiveBayesConfig`].
    pub fn with_config(documents: Vec<ClassDocument>, config: NaiveBayesConfig) -> Result<Self> {
        Self::new(documents, config.smoothing)
    }

    /// Global word counts over all training documents.
    pub fn vocabulary(&self) -> &IndexMap<String, usize> {
        &self.vocabulary
    }

    /// Word counts restricted to the documents of one class.
    pub fn class_vocabulary(&self, label: &str) -> Option<&IndexMap<String, usize>> {
        self.class_vocabularies.get(label)
    }

    /// Total number of tokens in the documents of one class.
    pub fn class_word_count(&self, label: &str) -> Option<usize> {
        self.class_word_counts.get(label).copied()
    }

    /// `ln(|documents of class| / |documents|)`.
    pub fn log_prior(&self, label: &str) -> Option<f64> {
        self.log_priors.get(label).copied()
    }

    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    /// Smoothed log likelihood of a word given a class; `None` for an unknown class.
    pub fn likelihood(&self, word: &str, label: &str) -> Option<f64> {
        let class_vocabulary = self.class_vocabularies.get(label)?;
        let total = self.class_word_counts.get(label).copied()?;

        let count = class_vocabulary.get(word).copied().unwrap_or(0) as f64 + self.smoothing;
        let denominator = total as f64 + self.vocabulary.len() as f64 * self.smoothing;
        Some((count / denominator).ln())
    }

    /// Log posterior (up to a constant) of every class, in class order.
    pub fn log_posteriors(&self, document: &Document) -> Vec<(&str, f64)> {
        self.classes
            .iter()
            .map(|class| {
                let prior = self.log_priors.get(class).copied().unwrap_or(f64::NEG_INFINITY);
                let likelihood: f64 = document
                    .bag()
                    .iter()
                    .filter_map(|word| self.likelihood(word, class))
                    .sum();
                (class.as_str(), prior + likelihood)
            })
            .collect()
    }
}

fn increment(counts: &mut IndexMap<String, usize>, word: &str) {
    match counts.get_mut(word) {
        Some(count) => *count += 1,
        None => {
            counts.insert(word.to_string(), 1);
        }
    }
}

impl Classifier for NaiveBayes {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, document: &Document) -> &str {
        let mut best: Option<(&str, f64)> = None;
        for (class, posterior) in self.log_posteriors(document) {
            match best {
                Some((_, best_posterior)) if posterior <= best_posterior => {}
                _ => best = Some((class, posterior)),
            }
        }
        best.map(|(class, _)| class).unwrap_or_default()
    }

    fn name(&self) -> &str {
        "naive_bayes"
    }
}
