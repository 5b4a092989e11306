//! Regex-based tokenizer.
//!
//! The pattern either describes the tokens themselves or the separators
//! between them. Documents use the separator form with
//! [`NON_LETTER_PATTERN`], so digits and punctuation never reach a bag of
//! words while contractions like "doesn't" stay whole.

use std::sync::Arc;

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream, stream};
use crate::error::{Result, TextfoldError};

/// Separators of document text: runs of anything but ASCII letters and apostrophes.
pub const NON_LETTER_PATTERN: &str = r"[^A-Za-z']+";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Matches are tokens.
    Matches,
    /// Matches separate tokens; empty pieces are skipped.
    Gaps,
}

/// Splits text with a regular expression.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    pattern: Arc<Regex>,
    mode: Mode,
}

impl RegexTokenizer {
    fn compile(pattern: &str, mode: Mode) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| TextfoldError::analysis(format!("Invalid regex pattern: {e}")))?;
        Ok(RegexTokenizer {
            pattern: Arc::new(regex),
            mode,
        })
    }

    /// Every match of `pattern` is a token.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        Self::compile(pattern, Mode::Matches)
    }

    /// The text between matches of `pattern` are the tokens.
    pub fn with_gaps(pattern: &str) -> Result<Self> {
        Self::compile(pattern, Mode::Gaps)
    }

    /// The document tokenizer.
    pub fn letters() -> Result<Self> {
        Self::with_gaps(NON_LETTER_PATTERN)
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn gaps(&self) -> bool {
        self.mode == Mode::Gaps
    }

    /// Byte ranges of the tokens in `text`.
    fn spans(&self, text: &str) -> Vec<(usize, usize)> {
        match self.mode {
            Mode::Matches => self
                .pattern
                .find_iter(text)
                .map(|m| (m.start(), m.end()))
                .collect(),
            Mode::Gaps => {
                let mut spans = Vec::new();
                let mut start = 0;
                for separator in self.pattern.find_iter(text) {
                    spans.push((start, separator.start()));
                    start = separator.end();
                }
                spans.push((start, text.len()));
                spans.retain(|(start, end)| start < end);
                spans
            }
        }
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens = self
            .spans(text)
            .into_iter()
            .enumerate()
            .map(|(position, (start, end))| Token::with_offsets(&text[start..end], position, start, end))
            .collect();
        Ok(stream(tokens))
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}
