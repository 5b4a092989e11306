//! Lowercasing.
//!
//! # Examples
//!
//! ```
//! use textfold::analysis::token::{Token, stream};
//! use textfold::analysis::token_filter::Filter;
//! use textfold::analysis::token_filter::lowercase::LowercaseFilter;
//!
//! let lowered: Vec<String> = LowercaseFilter::new()
//!     .filter(stream(vec![Token::new("Great", 0), Token::new("STRAP", 1)]))
//!     .unwrap()
//!     .map(|token| token.text)
//!     .collect();
//!
//! assert_eq!(lowered, vec!["great", "strap"]);
//! ```

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Lowercases every token, keeping positions and offsets.
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    pub fn new() -> Self {
        LowercaseFilter
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(|token| {
            let lowered = if token.text.is_ascii() {
                token.text.to_ascii_lowercase()
            } else {
                token.text.to_lowercase()
            };
            token.with_text(lowered)
        })))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
