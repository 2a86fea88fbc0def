//! Term representation.
//!
//! A Term is one segmented word: a slice of the original input together with
//! an optional part-of-speech tag ("nature") and an optional offset.

use serde::{Deserialize, Serialize};

/// A single word from the segmentation process
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// The word text, taken from the original (unnormalized) input
    pub word: String,

    /// Part-of-speech tag (if available)
    pub nature: Option<String>,

    /// Character offset in the original input (if offset tracking is enabled)
    pub offset: Option<usize>,
}

impl Term {
    /// Create a term with text and an optional nature
    pub fn new(word: impl Into<String>, nature: Option<String>) -> Self {
        Term {
            word: word.into(),
            nature,
            offset: None,
        }
    }

    /// Create a term from a slice of characters
    pub fn from_chars(chars: &[char]) -> Self {
        Term::new(chars.iter().collect::<String>(), None)
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    /// Check if the word is empty
    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.word)?;
        if let Some(ref nature) = self.nature {
            write!(f, "/{}", nature)?;
        }
        Ok(())
    }
}
