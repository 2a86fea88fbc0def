//! Word dictionary with part-of-speech attributes.
//!
//! The dictionary maps a word to its candidate natures (part-of-speech tags)
//! and how often each was seen. Segmentation only ever reads it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SegmentError};

/// Nature given to words the dictionary does not know
pub const NATURE_UNKNOWN: &str = "nz";

/// Nature given to whitespace-only words
pub const NATURE_STRING: &str = "x";

/// Nature of the synthetic start vertex
pub const NATURE_BEGIN: &str = "begin";

/// Candidate natures of a word with their frequencies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Candidate natures, most frequent first
    pub natures: Vec<String>,
    /// Frequency of each nature (same order as `natures`)
    pub frequencies: Vec<u32>,
    /// Sum of all frequencies
    pub total_frequency: u64,
}

impl Attribute {
    /// Create an attribute from (nature, frequency) pairs
    pub fn new(pairs: Vec<(String, u32)>) -> Self {
        let total_frequency = pairs.iter().map(|(_, f)| u64::from(*f)).sum();
        let (natures, frequencies) = pairs.into_iter().unzip();
        Attribute {
            natures,
            frequencies,
            total_frequency,
        }
    }

    /// Attribute with a single nature
    pub fn single(nature: &str, frequency: u32) -> Self {
        Attribute::new(vec![(nature.to_string(), frequency)])
    }

    /// The most likely nature
    pub fn first_nature(&self) -> Option<&str> {
        self.natures.first().map(String::as_str)
    }

    /// Iterate over (nature, frequency) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.natures
            .iter()
            .map(String::as_str)
            .zip(self.frequencies.iter().copied())
    }

    /// Default attribute for a word missing from the dictionary
    pub fn for_unknown(word: &str) -> Self {
        if word.trim().is_empty() {
            Attribute::single(NATURE_STRING, 1)
        } else {
            Attribute::single(NATURE_UNKNOWN, 1)
        }
    }
}

/// Read-only word lookup
pub trait Dictionary: Send + Sync {
    /// Get the attribute of a word, if known
    fn get(&self, word: &str) -> Option<Attribute>;

    /// Check if a word exists
    fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }
}

/// In-memory dictionary
#[derive(Debug, Clone, Default)]
pub struct CoreDictionary {
    words: HashMap<String, Attribute>,
    /// Length (in characters) of the longest entry
    max_word_len: usize,
}

impl CoreDictionary {
    /// Create an empty dictionary
    pub fn new() -> Self {
        CoreDictionary::default()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Length in characters of the longest word
    pub fn max_word_len(&self) -> usize {
        self.max_word_len
    }

    /// Add or replace a word
    pub fn insert(&mut self, word: &str, attribute: Attribute) {
        if word.is_empty() {
            return;
        }
        self.max_word_len = self.max_word_len.max(word.chars().count());
        self.words.insert(word.to_string(), attribute);
    }

    /// Parse a dictionary from text.
    ///
    /// One entry per line: `word nature freq [nature freq ...]`, separated by
    /// whitespace. A word alone on its line gets the unknown-word nature.
    /// Empty lines and lines starting with `#` are skipped.
    pub fn from_text(content: &str) -> Result<Self> {
        let mut dict = CoreDictionary::new();
        dict.load_text(content)?;
        Ok(dict)
    }

    /// Load entries from text into this dictionary (see [`CoreDictionary::from_text`])
    pub fn load_text(&mut self, content: &str) -> Result<()> {
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            let word = match parts.next() {
                Some(w) => w,
                None => continue,
            };
            let rest: Vec<&str> = parts.collect();
            if rest.len() % 2 != 0 {
                return Err(SegmentError::Dictionary {
                    line: idx + 1,
                    message: format!("'{}' has a nature without a frequency", word),
                });
            }

            let mut pairs = Vec::with_capacity(rest.len() / 2);
            for pair in rest.chunks(2) {
                let freq = pair[1].parse::<u32>().map_err(|e| SegmentError::Dictionary {
                    line: idx + 1,
                    message: format!("bad frequency '{}': {}", pair[1], e),
                })?;
                pairs.push((pair[0].to_string(), freq));
            }

            let attribute = if pairs.is_empty() {
                Attribute::single(NATURE_UNKNOWN, 1)
            } else {
                Attribute::new(pairs)
            };
            self.insert(word, attribute);
        }
        Ok(())
    }
}

impl Dictionary for CoreDictionary {
    fn get(&self, word: &str) -> Option<Attribute> {
        self.words.get(word).cloned()
    }

    fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }
}
