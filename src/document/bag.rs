//! Bag-of-words representation of a parsed document.

use indexmap::IndexSet;

/// The features of a document.
///
/// A `Set` holds every token once (first-seen order is kept so iteration is
/// reproducible); a `Sequence` keeps the token order and every duplicate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BagOfWords {
    /// Unique tokens, presence only.
    Set(IndexSet<String>),
    /// Tokens in order, duplicates kept.
    Sequence(Vec<String>),
}

impl BagOfWords {
    /// Build a bag from a token list, collapsing duplicates unless asked not to.
    pub fn from_tokens<I>(tokens: I, preserve_duplicates: bool) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        if preserve_duplicates {
            BagOfWords::Sequence(tokens.into_iter().collect())
        } else {
            BagOfWords::Set(tokens.into_iter().collect())
        }
    }

    /// Whether duplicate tokens are kept.
    pub fn preserves_duplicates(&self) -> bool {
        matches!(self, BagOfWords::Sequence(_))
    }

    /// Whether the word appears at least once.
    pub fn contains(&self, word: &str) -> bool {
        match self {
            BagOfWords::Set(words) => words.contains(word),
            BagOfWords::Sequence(words) => words.iter().any(|w| w == word),
        }
    }

    /// Term frequency: 0 or 1 for a set, the occurrence count for a sequence.
    pub fn term_frequency(&self, word: &str) -> usize {
        match self {
            BagOfWords::Set(words) => usize::from(words.contains(word)),
            BagOfWords::Sequence(words) => words.iter().filter(|w| *w == word).count(),
        }
    }

    /// Iterate over the tokens (duplicates included for a sequence).
    pub fn iter(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            BagOfWords::Set(words) => Box::new(words.iter().map(String::as_str)),
            BagOfWords::Sequence(words) => Box::new(words.iter().map(String::as_str)),
        }
    }

    /// Number of tokens (duplicates included for a sequence).
    pub fn len(&self) -> usize {
        match self {
            BagOfWords::Set(words) => words.len(),
            BagOfWords::Sequence(words) => words.len(),
        }
    }

    /// Whether the bag holds no token at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
