//! Stop word removal.
//!
//! The default list is the short English list tuned for product reviews and
//! news articles and keeps negations such as "not".
//!
//! # Examples
//!
//! ```
//! use textfold::analysis::token::{Token, stream};
//! use textfold::analysis::token_filter::Filter;
//! use textfold::analysis::token_filter::stop::StopFilter;
//!
//! let tokens = vec![
//!     Token::new("the", 0),
//!     Token::new("strap", 1),
//!     Token::new("is", 2),
//!     Token::new("not", 3),
//!     Token::new("for", 4),
//!     Token::new("me", 5),
//! ];
//!
//! let kept: Vec<String> = StopFilter::new()
//!     .filter(stream(tokens))
//!     .unwrap()
//!     .map(|token| token.text)
//!     .collect();
//!
//! assert_eq!(kept, vec!["strap", "is", "not", "me"]);
//! ```

use std::sync::{Arc, LazyLock};

use ahash::AHashSet;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Default English stop words.
pub const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "the", "and", "to", "a", "an", "i", "it", "this", "of", "for", "my", "on", "with", "you",
    "that", "in", "have",
];

static DEFAULT_STOP_WORDS: LazyLock<Arc<AHashSet<String>>> = LazyLock::new(|| {
    Arc::new(
        DEFAULT_ENGLISH_STOP_WORDS
            .iter()
            .map(|word| word.to_string())
            .collect(),
    )
});

/// Drops stop words; every other token passes through in order.
#[derive(Clone, Debug)]
pub struct StopFilter {
    stop_words: Arc<AHashSet<String>>,
}

impl StopFilter {
    /// A filter over [`DEFAULT_ENGLISH_STOP_WORDS`].
    pub fn new() -> Self {
        StopFilter {
            stop_words: Arc::clone(&DEFAULT_STOP_WORDS),
        }
    }

    /// A filter over a custom word list.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StopFilter {
            stop_words: Arc::new(words.into_iter().map(Into::into).collect()),
        }
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let stop_words = Arc::clone(&self.stop_words);
        Ok(Box::new(
            tokens.filter(move |token| !stop_words.contains(&token.text)),
        ))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::{Token, stream};

    fn texts(filter: &StopFilter, words: &[&str]) -> Vec<String> {
        let tokens = words
            .iter()
            .enumerate()
            .map(|(i, word)| Token::new(*word, i))
            .collect();
        filter
            .filter(stream(tokens))
            .unwrap()
            .map(|token| token.text)
            .collect()
    }

    #[test]
    fn test_custom_words() {
        let filter = StopFilter::from_words(["very", "really"]);
        assert_eq!(filter.len(), 2);
        assert_eq!(
            texts(&filter, &["really", "loud", "and", "very", "clear"]),
            vec!["loud", "and", "clear"]
        );
    }

    #[test]
    fn test_default_stop_words_keep_other_tokens_in_order() {
        assert_eq!(
            texts(&StopFilter::new(), &["the", "is", "an", "article", "and", "so", "a"]),
            vec!["is", "article", "so"]
        );
    }

    #[test]
    fn test_default_list() {
        let filter = StopFilter::new();
        assert_eq!(filter.len(), 17);
        for word in DEFAULT_ENGLISH_STOP_WORDS {
            assert!(filter.is_stop_word(word));
        }
        assert!(!filter.is_stop_word("not"));
        assert!(!filter.is_stop_word("The"));
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(StopFilter::new().name(), "stop");
    }
}
