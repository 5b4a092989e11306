//! Token filter implementations for token transformation.
//!
//! Filters receive a token stream and produce a new one, modifying, removing
//! or adding tokens.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//! - [`stop::StopFilter`] - Removes stop words
//! - [`ngram::NgramFilter`] - Appends word n-grams after the original tokens
//!
//! # Filter Chaining
//!
//! ```text
//! Tokenizer → Lowercase → Stop Words → Word N-grams → Bag of Words
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod ngram;
pub mod stop;

pub use lowercase::LowercaseFilter;
pub use ngram::NgramFilter;
pub use stop::StopFilter;
