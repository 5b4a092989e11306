//! Word n-gram filter implementation.
//!
//! Appends, after the incoming tokens, every contiguous window of `n` tokens
//! joined by single spaces. Windows are emitted size by size in the order the
//! sizes were given, and in sliding-window order within a size.
//!
//! # Examples
//!
//! ```
//! use textfold::analysis::token::Token;
//! use textfold::analysis::token_filter::Filter;
//! use textfold::analysis::token_filter::ngram::NgramFilter;
//!
//! let filter = NgramFilter::new(vec![2]).unwrap();
//! let tokens = vec![Token::new("not", 0), Token::new("bad", 1), Token::new("at", 2)];
//! let words: Vec<String> = filter
//!     .filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(words, vec!["not", "bad", "at", "not bad", "bad at"]);
//! ```

use crate::analysis::token::{Token, TokenStream, stream};
use crate::analysis::token_filter::Filter;
use crate::error::{Result, TextfoldError};

/// A filter that appends word n-grams to the token stream.
#[derive(Clone, Debug)]
pub struct NgramFilter {
    /// Window sizes, in emission order
    sizes: Vec<usize>,
}

impl NgramFilter {
    /// Create a new n-gram filter.
    ///
    /// # Errors
    ///
    /// Returns an error if any size is 0.
    pub fn new(sizes: Vec<usize>) -> Result<Self> {
        if sizes.contains(&0) {
            return Err(TextfoldError::analysis(
                "n-gram sizes must be at least 1".to_string(),
            ));
        }
        Ok(Self { sizes })
    }

    /// Get the window sizes.
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Build every n-gram of the given tokens, without the tokens themselves.
    pub fn ngrams(&self, tokens: &[Token]) -> Vec<Token> {
        let mut ngrams = Vec::new();
        for &n in &self.sizes {
            if tokens.len() < n {
                continue;
            }
            for window in tokens.windows(n) {
                let text = window
                    .iter()
                    .map(|t| t.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                let first = &window[0];
                let last = &window[n - 1];
                ngrams.push(
                    Token::with_offsets(text, first.position, first.start_offset, last.end_offset)
                        .with_position_length(n),
                );
            }
        }
        ngrams
    }
}

impl Filter for NgramFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let mut tokens: Vec<Token> = tokens.collect();
        let ngrams = self.ngrams(&tokens);
        tokens.extend(ngrams);

        Ok(stream(tokens))
    }

    fn name(&self) -> &'static str {
        "ngram"
    }
}
