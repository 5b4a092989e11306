//! k-nearest-neighbours over tf-idf document vectors.

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::classifier::{Classifier, ensure_training_set};
use crate::document::{ClassDocument, Document, collect_classes};
use crate::error::{Result, TextfoldError};
use crate::term_document_matrix::{DocumentVector, MatrixOptions, TermDocumentMatrix};

/// Hyperparameters of [`Knn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnnConfig {
    /// Number of neighbours that vote.
    pub k: usize,
    /// Weight votes by normalised similarity instead of counting them.
    pub weight_neighbors: bool,
}

impl Default for KnnConfig {
    fn default() -> Self {
        KnnConfig {
            k: 5,
            weight_neighbors: true,
        }
    }
}

impl KnnConfig {
    pub fn new(k: usize) -> Self {
        KnnConfig {
            k,
            ..Default::default()
        }
    }

    pub fn weight_neighbors(mut self, weight: bool) -> Self {
        self.weight_neighbors = weight;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(TextfoldError::invalid_config(
                "the number of neighbours must be at least 1",
            ));
        }
        Ok(())
    }
}

/// A training document and its similarity to a query document.
#[derive(Debug, Clone, Copy)]
pub struct Neighbor<'a> {
    pub document: &'a ClassDocument,
    pub similarity: f64,
}

/// k-nearest-neighbours classifier.
#[derive(Debug)]
pub struct Knn {
    classes: Vec<String>,
    matrix: TermDocumentMatrix<ClassDocument>,
    config: KnnConfig,
}

impl Knn {
    /// Build the tf-idf document vectors of the training documents.
    pub fn new(documents: Vec<ClassDocument>, config: KnnConfig) -> Result<Self> {
        config.validate()?;
        ensure_training_set(&documents, "knn")?;

        let classes = collect_classes(&documents);
        let matrix = TermDocumentMatrix::new(documents, MatrixOptions::default().with_word_vectors(false));

        debug!(
            "Trained knn on {} documents (k = {}, weighted = {})",
            matrix.documents().len(),
            config.k,
            config.weight_neighbors
        );

        Ok(Knn {
            classes,
            matrix,
            config,
        })
    }

    pub fn config(&self) -> &KnnConfig {
        &self.config
    }

    pub fn matrix(&self) -> &TermDocumentMatrix<ClassDocument> {
        &self.matrix
    }

    /// The `k` training documents most similar to the given one.
    ///
    /// Sorted by decreasing similarity; equal similarities keep training order.
    pub fn nearest_neighbors(&self, document: &Document) -> Vec<Neighbor<'_>> {
        let target = self.matrix.document_vector(document);
        let documents = self.matrix.documents();

        let mut neighbors: Vec<Neighbor<'_>> = match self.matrix.document_vectors() {
            Some(vectors) => documents
                .iter()
                .zip(vectors)
                .map(|(document, vector)| Neighbor {
                    document,
                    similarity: cosine_similarity(&target, vector),
                })
                .collect(),
            None => documents
                .iter()
                .map(|document| Neighbor {
                    document,
                    similarity: cosine_similarity(
                        &target,
                        &self.matrix.document_vector(document.document()),
                    ),
                })
                .collect(),
        };

        neighbors.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        neighbors.truncate(self.config.k);
        neighbors
    }
}

impl Classifier for Knn {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, document: &Document) -> &str {
        let neighbors = self.nearest_neighbors(document);
        let predicted = if self.config.weight_neighbors {
            weighted_majority_class(&neighbors)
        } else {
            simple_majority_class(&neighbors)
        };
        predicted
            .or_else(|| self.classes.first().map(String::as_str))
            .unwrap_or_default()
    }

    fn name(&self) -> &str {
        "knn"
    }
}

/// Sum of the element-wise products over the words both vectors share.
pub fn dot_product(a: &DocumentVector, b: &DocumentVector) -> f64 {
    a.iter()
        .filter_map(|(word, weight)| b.get(word).map(|other| weight * other))
        .sum()
}

/// Euclidean norm of a vector.
pub fn magnitude(vector: &DocumentVector) -> f64 {
    vector.values().map(|weight| weight.powi(2)).sum::<f64>().sqrt()
}

/// Cosine similarity, or 0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &DocumentVector, b: &DocumentVector) -> f64 {
    let magnitude_a = magnitude(a);
    let magnitude_b = magnitude(b);
    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }
    dot_product(a, b) / (magnitude_a * magnitude_b)
}

/// Rescale a similarity from `[minimum, maximum]` into `[beta, alpha]`.
///
/// Returns `beta` when all similarities are equal.
pub fn normalised_similarity(
    minimum: f64,
    maximum: f64,
    beta: f64,
    alpha: f64,
    similarity: f64,
) -> f64 {
    if maximum == minimum {
        return beta;
    }
    beta + (alpha - beta) * (similarity - minimum) / (maximum - minimum)
}

/// Smallest and largest similarity, `(inf, -inf)` for no neighbours.
pub fn similarity_range(neighbors: &[Neighbor<'_>]) -> (f64, f64) {
    neighbors.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(minimum, maximum), neighbor| {
            (
                minimum.min(neighbor.similarity),
                maximum.max(neighbor.similarity),
            )
        },
    )
}

/// Class with the largest sum of similarities rescaled into `[1, 2]`.
///
/// Ties go to the class met first among the neighbours.
pub fn weighted_majority_class<'a>(neighbors: &[Neighbor<'a>]) -> Option<&'a str> {
    let (minimum, maximum) = similarity_range(neighbors);

    let mut scores: IndexMap<&'a str, f64> = IndexMap::new();
    for neighbor in neighbors {
        let weight = normalised_similarity(minimum, maximum, 1.0, 2.0, neighbor.similarity);
        *scores.entry(neighbor.document.label()).or_insert(0.0) += weight;
    }

    best_by(scores.into_iter())
}

/// Class most frequent among the neighbours; ties go to the class met first.
pub fn simple_majority_class<'a>(neighbors: &[Neighbor<'a>]) -> Option<&'a str> {
    let mut counts: IndexMap<&'a str, usize> = IndexMap::new();
    for neighbor in neighbors {
        *counts.entry(neighbor.document.label()).or_insert(0) += 1;
    }

    best_by(counts.into_iter())
}

fn best_by<'a, S, I>(scores: I) -> Option<&'a str>
where
    S: PartialOrd,
    I: Iterator<Item = (&'a str, S)>,
{
    let mut best: Option<(&'a str, S)> = None;
    for (class, score) in scores {
        let better = match &best {
            Some((_, best_score)) => score > *best_score,
            None => true,
        };
        if better {
            best = Some((class, score));
        }
    }
    best.map(|(class, _)| class)
}
