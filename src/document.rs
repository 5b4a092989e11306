//! Documents and their bag-of-words features.
//!
//! A [`Document`] keeps the raw text next to the [`BagOfWords`] extracted from
//! it; a [`ClassDocument`] additionally carries its class label. Text is turned
//! into features by a [`DocumentParser`], which is built once from a
//! [`DocumentConfig`] and reused for every text of a corpus.
//!
//! # Examples
//!
//! ```
//! use textfold::document::{Document, DocumentConfig};
//!
//! let config = DocumentConfig::new().with_ngrams(vec![2]);
//! let document = Document::new("Easy to use!", &config).unwrap();
//!
//! assert!(document.bag().contains("easy"));
//! assert!(document.bag().contains("to use"));
//! ```

pub mod bag;
pub mod config;

pub use bag::BagOfWords;
pub use config::DocumentConfig;

use std::fmt;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use crate::analysis::analyzer::Analyzer;
use crate::error::Result;

/// A piece of text and its features.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    text: String,
    bag: BagOfWords,
}

impl Document {
    /// Parse text with the given configuration.
    ///
    /// Builds a fresh [`DocumentParser`]; use [`DocumentConfig::parser`]
    /// directly when parsing many texts.
    pub fn new<S: Into<String>>(text: S, config: &DocumentConfig) -> Result<Self> {
        config.parser()?.parse(text)
    }

    /// Parse text with an analyzer, collapsing duplicates unless asked not to.
    pub fn parse<S: Into<String>>(
        text: S,
        analyzer: &dyn Analyzer,
        preserve_duplicates: bool,
    ) -> Result<Self> {
        let text = text.into();
        let tokens = analyzer.analyze(&text)?.map(|token| token.text);
        let bag = BagOfWords::from_tokens(tokens, preserve_duplicates);
        Ok(Document { text, bag })
    }

    /// Create a document from an already extracted bag of words.
    pub fn from_bag<S: Into<String>>(text: S, bag: BagOfWords) -> Self {
        Document {
            text: text.into(),
            bag,
        }
    }

    /// The original text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The extracted features.
    pub fn bag(&self) -> &BagOfWords {
        &self.bag
    }
}

impl AsRef<Document> for Document {
    fn as_ref(&self) -> &Document {
        self
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A document with a known class label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDocument {
    document: Document,
    label: String,
}

impl ClassDocument {
    /// Parse text with the given configuration and attach a label.
    pub fn new<S, L>(text: S, label: L, config: &DocumentConfig) -> Result<Self>
    where
        S: Into<String>,
        L: Into<String>,
    {
        Ok(ClassDocument::from_document(
            Document::new(text, config)?,
            label,
        ))
    }

    /// Attach a label to a parsed document.
    pub fn from_document<L: Into<String>>(document: Document, label: L) -> Self {
        ClassDocument {
            document,
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn text(&self) -> &str {
        self.document.text()
    }

    pub fn bag(&self) -> &BagOfWords {
        self.document.bag()
    }
}

impl AsRef<Document> for ClassDocument {
    fn as_ref(&self) -> &Document {
        &self.document
    }
}

impl fmt::Display for ClassDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label, self.document.text)
    }
}

/// Turns text into documents with a fixed analysis pipeline.
#[derive(Clone)]
pub struct DocumentParser {
    analyzer: Arc<dyn Analyzer>,
    preserve_duplicates: bool,
}

impl DocumentParser {
    /// Create a parser from an analyzer.
    pub fn new(analyzer: Arc<dyn Analyzer>, preserve_duplicates: bool) -> Self {
        DocumentParser {
            analyzer,
            preserve_duplicates,
        }
    }

    /// Parse an unlabelled document.
    pub fn parse<S: Into<String>>(&self, text: S) -> Result<Document> {
        Document::parse(text, self.analyzer.as_ref(), self.preserve_duplicates)
    }

    /// Parse a labelled document.
    pub fn parse_labeled<S, L>(&self, text: S, label: L) -> Result<ClassDocument>
    where
        S: Into<String>,
        L: Into<String>,
    {
        Ok(ClassDocument::from_document(self.parse(text)?, label))
    }

    pub fn preserves_duplicates(&self) -> bool {
        self.preserve_duplicates
    }
}

impl fmt::Debug for DocumentParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentParser")
            .field("analyzer", &self.analyzer.name())
            .field("preserve_duplicates", &self.preserve_duplicates)
            .finish()
    }
}

/// The distinct labels of a corpus, in first-seen order.
pub fn collect_classes<'a, I>(documents: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a ClassDocument>,
{
    documents
        .into_iter()
        .map(|document| document.label.clone())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// Group documents by label, classes in first-seen order, documents in input order.
pub fn group_by_class(documents: Vec<ClassDocument>) -> IndexMap<String, Vec<ClassDocument>> {
    let mut groups: IndexMap<String, Vec<ClassDocument>> = IndexMap::new();
    for document in documents {
        groups
            .entry(document.label.clone())
            .or_default()
            .push(document);
    }
    groups
}
