//! Tokenizer configuration for documents.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::ngram::NgramFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::document::DocumentParser;
use crate::error::{Result, TextfoldError};

/// How raw text is turned into a bag of words.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Keep duplicate tokens (term counts) instead of collapsing to a set.
    pub preserve_duplicates: bool,
    /// Drop the default English stop words.
    pub remove_stopwords: bool,
    /// Word n-gram sizes to append, if any.
    pub ngram_sizes: Option<Vec<usize>>,
}

impl DocumentConfig {
    /// Create the default configuration (set of words, no stop word removal, no n-grams).
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep or collapse duplicate tokens.
    pub fn preserve_duplicates(mut self, preserve: bool) -> Self {
        self.preserve_duplicates = preserve;
        self
    }

    /// Enable or disable stop word removal.
    pub fn remove_stopwords(mut self, remove: bool) -> Self {
        self.remove_stopwords = remove;
        self
    }

    /// Append word n-grams of the given sizes.
    pub fn with_ngrams(mut self, sizes: Vec<usize>) -> Self {
        self.ngram_sizes = Some(sizes);
        self
    }

    /// Reject n-gram sizes of 0.
    pub fn validate(&self) -> Result<()> {
        if let Some(sizes) = &self.ngram_sizes
            && sizes.contains(&0)
        {
            return Err(TextfoldError::invalid_config(
                "n-gram sizes must be at least 1",
            ));
        }
        Ok(())
    }

    /// Build the analysis pipeline: letters tokenizer, lowercase, then the
    /// optional stop word and n-gram filters.
    pub fn analyzer(&self) -> Result<PipelineAnalyzer> {
        let mut analyzer = PipelineAnalyzer::new(Arc::new(RegexTokenizer::letters()?))
            .add_filter(Arc::new(LowercaseFilter::new()));

        if self.remove_stopwords {
            analyzer = analyzer.add_filter(Arc::new(StopFilter::new()));
        }
        if let Some(sizes) = &self.ngram_sizes {
            analyzer = analyzer.add_filter(Arc::new(NgramFilter::new(sizes.clone())?));
        }

        Ok(analyzer.with_name("document"))
    }

    /// Build a parser that applies this configuration to many texts.
    pub fn parser(&self) -> Result<DocumentParser> {
        Ok(DocumentParser::new(
            Arc::new(self.analyzer()?),
            self.preserve_duplicates,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::Analyzer;

    #[test]
    fn test_default_config() {
        let config = DocumentConfig::default();
        assert!(!config.preserve_duplicates);
        assert!(!config.remove_stopwords);
        assert!(config.ngram_sizes.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_analyzer_filters() {
        let config = DocumentConfig::new()
            .remove_stopwords(true)
            .with_ngrams(vec![2]);
        let analyzer = config.analyzer().unwrap();

        let names = analyzer.filter_names();
        assert_eq!(names, vec!["lowercase", "stop", "ngram"]);
        assert_eq!(analyzer.name(), "document");
    }

    #[test]
    fn test_zero_ngram_is_rejected() {
        let config = DocumentConfig::new().with_ngrams(vec![0]);
        assert!(config.validate().is_err());
        assert!(config.analyzer().is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: DocumentConfig =
            serde_json::from_str(r#"{"remove_stopwords": true, "ngram_sizes": [2, 3]}"#).unwrap();
        assert!(config.remove_stopwords);
        assert!(!config.preserve_duplicates);
        assert_eq!(config.ngram_sizes, Some(vec![2, 3]));
    }

    #[test]
    fn test_non_list_ngrams_are_rejected() {
        let parsed = serde_json::from_str::<DocumentConfig>(r#"{"ngram_sizes": 2}"#);
        assert!(parsed.is_err());
    }
}
