//! Vocabulary and tf-idf weighting over a fixed document collection.
//!
//! The matrix is built once from the documents it owns. Depending on its
//! [`MatrixOptions`] it precomputes one sparse tf-idf vector per document
//! (used by the nearest-neighbour classifier) and one dense tf-idf vector
//! per vocabulary word (the "row per word" view used for topic analysis).
//!
//! Inverse document frequencies are computed on first access and cached for
//! the lifetime of the matrix; the documents never change after
//! construction so a cached value is always current.
//!
//! # Examples
//!
//! ```
//! use textfold::document::{Document, DocumentConfig};
//! use textfold::term_document_matrix::{MatrixOptions, TermDocumentMatrix};
//!
//! let parser = DocumentConfig::default().parser().unwrap();
//! let documents = vec![
//!     parser.parse("Nice document").unwrap(),
//!     parser.parse("Bad document").unwrap(),
//! ];
//!
//! let matrix = TermDocumentMatrix::new(documents, MatrixOptions::default());
//! assert_eq!(matrix.vocabulary().len(), 3);
//! assert_eq!(matrix.inverse_document_frequency("document"), (2.0_f64 / 3.0).ln());
//! ```

use std::fmt;

use ahash::AHashMap;
use indexmap::{IndexMap, IndexSet};
use log::debug;
use parking_lot::RwLock;

use crate::document::Document;

/// Sparse tf-idf vector of a document: word to weight, in bag order.
pub type DocumentVector = IndexMap<String, f64>;

/// Which derived structures a [`TermDocumentMatrix`] builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixOptions {
    /// Build one tf-idf vector per vocabulary word.
    pub word_vectors: bool,
    /// Build one tf-idf vector per document.
    pub document_vectors: bool,
    /// Words must occur strictly more often than this to enter the vocabulary.
    pub minimum_word_count: usize,
}

impl Default for MatrixOptions {
    fn default() -> Self {
        MatrixOptions {
            word_vectors: true,
            document_vectors: true,
            minimum_word_count: 0,
        }
    }
}

impl MatrixOptions {
    /// Vocabulary and counts only, no precomputed vectors.
    pub fn vocabulary_only() -> Self {
        MatrixOptions {
            word_vectors: false,
            document_vectors: false,
            minimum_word_count: 0,
        }
    }

    pub fn with_word_vectors(mut self, enabled: bool) -> Self {
        self.word_vectors = enabled;
        self
    }

    pub fn with_document_vectors(mut self, enabled: bool) -> Self {
        self.document_vectors = enabled;
        self
    }

    pub fn with_minimum_word_count(mut self, count: usize) -> Self {
        self.minimum_word_count = count;
        self
    }
}

/// Vocabulary, document frequencies and tf-idf vectors of a document collection.
pub struct TermDocumentMatrix<D> {
    documents: Vec<D>,
    word_counts: IndexMap<String, usize>,
    vocabulary: IndexSet<String>,
    document_frequency: AHashMap<String, usize>,
    idf_cache: RwLock<AHashMap<String, f64>>,
    document_vectors: Option<Vec<DocumentVector>>,
    word_vectors: Option<IndexMap<String, Vec<f64>>>,
}

impl<D: AsRef<Document>> TermDocumentMatrix<D> {
    /// Build the matrix over the given documents.
    pub fn new(documents: Vec<D>, options: MatrixOptions) -> Self {
        let word_counts = Self::word_counts(&documents);
        let vocabulary: IndexSet<String> = word_counts
            .iter()
            .filter(|(_, count)| **count > options.minimum_word_count)
            .map(|(word, _)| word.clone())
            .collect();

        let mut document_frequency: AHashMap<String, usize> = AHashMap::new();
        for document in &documents {
            let distinct: IndexSet<&str> = document.as_ref().bag().iter().collect();
            for word in distinct {
                *document_frequency.entry(word.to_string()).or_insert(0) += 1;
            }
        }

        debug!(
            "Built vocabulary of {} words over {} documents",
            vocabulary.len(),
            documents.len()
        );

        let mut matrix = TermDocumentMatrix {
            documents,
            word_counts,
            vocabulary,
            document_frequency,
            idf_cache: RwLock::new(AHashMap::new()),
            document_vectors: None,
            word_vectors: None,
        };

        if options.document_vectors {
            let vectors = matrix
                .documents
                .iter()
                .map(|document| matrix.document_vector(document.as_ref()))
                .collect();
            matrix.document_vectors = Some(vectors);
            debug!("Built {} document vectors", matrix.documents.len());
        }

        if options.word_vectors {
            let vectors = matrix
                .vocabulary
                .iter()
                .map(|word| (word.clone(), matrix.compute_word_vector(word)))
                .collect();
            matrix.word_vectors = Some(vectors);
            debug!("Built {} word vectors", matrix.vocabulary.len());
        }

        matrix
    }

    /// Count every token of every bag, in first-seen order.
    ///
    /// A set-typed bag contributes each word once; a sequence contributes
    /// every occurrence.
    pub fn word_counts(documents: &[D]) -> IndexMap<String, usize> {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for document in documents {
            for word in document.as_ref().bag().iter() {
                match counts.get_mut(word) {
                    Some(count) => *count += 1,
                    None => {
                        counts.insert(word.to_string(), 1);
                    }
                }
            }
        }
        counts
    }

    /// Global token counts of the collection.
    pub fn counts(&self) -> &IndexMap<String, usize> {
        &self.word_counts
    }

    /// Words occurring more often than the minimum count, in first-seen order.
    pub fn vocabulary(&self) -> &IndexSet<String> {
        &self.vocabulary
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.vocabulary.contains(word)
    }

    /// The documents the matrix was built from, in their original order.
    pub fn documents(&self) -> &[D] {
        &self.documents
    }

    /// 0/1 for a set-typed bag, the occurrence count for a sequence.
    pub fn term_frequency(word: &str, document: &Document) -> usize {
        document.bag().term_frequency(word)
    }

    /// `ln(N / (df + 1))`, cached per word.
    pub fn inverse_document_frequency(&self, word: &str) -> f64 {
        if let Some(idf) = self.idf_cache.read().get(word) {
            return *idf;
        }

        let containing = self.document_frequency.get(word).copied().unwrap_or(0);
        let idf = (self.documents.len() as f64 / (containing as f64 + 1.0)).ln();
        self.idf_cache.write().insert(word.to_string(), idf);
        idf
    }

    /// tf-idf weights of the vocabulary words present in a document.
    pub fn document_vector(&self, document: &Document) -> DocumentVector {
        let mut vector = DocumentVector::new();
        for word in document.bag().iter() {
            if vector.contains_key(word) || !self.vocabulary.contains(word) {
                continue;
            }
            let weight = Self::term_frequency(word, document) as f64
                * self.inverse_document_frequency(word);
            vector.insert(word.to_string(), weight);
        }
        vector
    }

    /// Precomputed document vectors, aligned with [`documents`](Self::documents).
    pub fn document_vectors(&self) -> Option<&[DocumentVector]> {
        self.document_vectors.as_deref()
    }

    /// Precomputed word vectors, one entry per document, in vocabulary order.
    pub fn word_vectors(&self) -> Option<&IndexMap<String, Vec<f64>>> {
        self.word_vectors.as_ref()
    }

    pub fn word_vector(&self, word: &str) -> Option<&[f64]> {
        self.word_vectors
            .as_ref()
            .and_then(|vectors| vectors.get(word))
            .map(Vec::as_slice)
    }

    fn compute_word_vector(&self, word: &str) -> Vec<f64> {
        let idf = self.inverse_document_frequency(word);
        self.documents
            .iter()
            .map(|document| Self::term_frequency(word, document.as_ref()) as f64 * idf)
            .collect()
    }
}

impl<D> fmt::Debug for TermDocumentMatrix<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TermDocumentMatrix")
            .field("documents", &self.documents.len())
            .field("vocabulary_size", &self.vocabulary.len())
            .field("document_vectors", &self.document_vectors.is_some())
            .field("word_vectors", &self.word_vectors.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentConfig;

    fn parse_all(texts: &[&str]) -> Vec<Document> {
        let parser = DocumentConfig::default().parser().unwrap();
        texts.iter().map(|text| parser.parse(*text).unwrap()).collect()
    }

    fn three_documents() -> Vec<Document> {
        parse_all(&[
            "This document is a document with no duplicates.",
            "This document is a document with duplicates.",
            "This is just to check that a word is not present.",
        ])
    }

    fn five_documents() -> Vec<Document> {
        parse_all(&[
            "Nice document",
            "Bad document",
            "Alright document",
            "Nice day today",
            "No day is a bad day",
        ])
    }

    #[test]
    fn test_term_frequency() {
        let set = Document::new(
            "This document is a document with no duplicates.",
            &DocumentConfig::default(),
        )
        .unwrap();
        let sequence_config = DocumentConfig::new().preserve_duplicates(true);
        let sequence =
            Document::new("This document is a document with duplicates.", &sequence_config)
                .unwrap();
        let absent = Document::new(
            "This is just to check that a word is not present.",
            &sequence_config,
        )
        .unwrap();

        assert_eq!(TermDocumentMatrix::<Document>::term_frequency("document", &set), 1);
        assert_eq!(TermDocumentMatrix::<Document>::term_frequency("document", &sequence), 2);
        assert_eq!(TermDocumentMatrix::<Document>::term_frequency("document", &absent), 0);
    }

    #[test]
    fn test_inverse_document_frequency() {
        let matrix = TermDocumentMatrix::new(three_documents(), MatrixOptions::vocabulary_only());

        assert_eq!(matrix.inverse_document_frequency("document"), (3.0_f64 / 3.0).ln());
        assert_eq!(matrix.inverse_document_frequency("not_present"), (3.0_f64 / 1.0).ln());
        assert_eq!(matrix.inverse_document_frequency("just"), (3.0_f64 / 2.0).ln());
        assert_eq!(matrix.inverse_document_frequency("is"), (3.0_f64 / 4.0).ln());
    }

    #[test]
    fn test_inverse_document_frequency_is_memoised() {
        let matrix = TermDocumentMatrix::new(three_documents(), MatrixOptions::vocabulary_only());

        let first = matrix.inverse_document_frequency("with");
        let second = matrix.inverse_document_frequency("with");
        assert_eq!(first, second);
        assert!(matrix.idf_cache.read().contains_key("with"));
    }

    #[test]
    fn test_word_counts() {
        let counts = TermDocumentMatrix::word_counts(&three_documents());

        let expected = [
            ("this", 3),
            ("document", 2),
            ("is", 3),
            ("a", 3),
            ("with", 2),
            ("no", 1),
            ("duplicates", 2),
            ("just", 1),
            ("to", 1),
            ("check", 1),
            ("that", 1),
            ("word", 1),
            ("not", 1),
            ("present", 1),
        ];
        let actual: Vec<(&str, usize)> = counts.iter().map(|(w, c)| (w.as_str(), *c)).collect();
        assert_eq!(actual, expected.to_vec());
    }

    #[test]
    fn test_vocabulary_threshold() {
        let all = TermDocumentMatrix::new(three_documents(), MatrixOptions::vocabulary_only());
        assert_eq!(all.vocabulary().len(), 14);
        assert_eq!(all.vocabulary().get_index(0).map(String::as_str), Some("this"));

        let frequent = TermDocumentMatrix::new(
            three_documents(),
            MatrixOptions::vocabulary_only().with_minimum_word_count(1),
        );
        let words: Vec<&str> = frequent.vocabulary().iter().map(String::as_str).collect();
        assert_eq!(words, vec!["this", "document", "is", "a", "with", "duplicates"]);
        assert!(!frequent.contains_word("present"));
    }

    #[test]
    fn test_document_vector() {
        let matrix = TermDocumentMatrix::new(five_documents(), MatrixOptions::default());
        let document = Document::new(
            "Today is a bad, bad day",
            &DocumentConfig::new().preserve_duplicates(true),
        )
        .unwrap();

        let vector = matrix.document_vector(&document);
        let expected = [
            ("today", (5.0_f64 / 2.0).ln()),
            ("is", (5.0_f64 / 2.0).ln()),
            ("a", (5.0_f64 / 2.0).ln()),
            ("bad", 2.0 * (5.0_f64 / 3.0).ln()),
            ("day", (5.0_f64 / 3.0).ln()),
        ];
        let actual: Vec<(&str, f64)> = vector.iter().map(|(w, v)| (w.as_str(), *v)).collect();
        assert_eq!(actual, expected.to_vec());
    }

    #[test]
    fn test_document_vector_ignores_unknown_words() {
        let matrix = TermDocumentMatrix::new(five_documents(), MatrixOptions::default());
        let document = Document::new("Nice weather", &DocumentConfig::default()).unwrap();

        let vector = matrix.document_vector(&document);
        assert_eq!(vector.len(), 1);
        assert!(vector.contains_key("nice"));
    }

    #[test]
    fn test_word_vector() {
        let sequence = DocumentConfig::new().preserve_duplicates(true);
        let mut documents = vec![Document::new("Nice document, document", &sequence).unwrap()];
        documents.extend(parse_all(&[
            "Bad document",
            "Alright document",
            "Nice day today",
            "No day is a bad day",
        ]));
        let matrix = TermDocumentMatrix::new(documents, MatrixOptions::default());

        let idf = (5.0_f64 / 4.0).ln();
        assert_eq!(
            matrix.word_vector("document").unwrap(),
            &[2.0 * idf, idf, idf, 0.0, 0.0]
        );
        assert_eq!(matrix.word_vectors().unwrap().len(), matrix.vocabulary().len());
    }

    #[test]
    fn test_precomputed_document_vectors() {
        let matrix = TermDocumentMatrix::new(
            five_documents(),
            MatrixOptions::default().with_word_vectors(false),
        );

        let vectors = matrix.document_vectors().unwrap();
        assert_eq!(vectors.len(), 5);
        assert_eq!(vectors[1], matrix.document_vector(&matrix.documents()[1]));
        assert!(matrix.word_vectors().is_none());
        assert!(matrix.word_vector("document").is_none());
    }
}
