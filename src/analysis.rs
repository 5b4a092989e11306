//! Text analysis for textfold.
//!
//! This module turns raw text into the token sequence a bag of words is
//! built from: a regex tokenizer splits on non-letters, then filters
//! lowercase, drop stop words and append word n-grams.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
