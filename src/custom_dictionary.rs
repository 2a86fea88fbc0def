//! User dictionary override.
//!
//! After segmentation, consecutive words whose concatenation is a user
//! dictionary entry are merged into one vertex carrying the entry's attribute.
//! Merging is greedy and prefers the longest entry starting at each position.

use tracing::debug;

use crate::dictionary::{Attribute, CoreDictionary, Dictionary};
use crate::vertex::Vertex;

/// Merges or replaces vertices using dictionary entries
pub trait CustomDictionary: Send + Sync {
    /// Return the combined vertex sequence; it covers the same text in order
    fn combine(&self, vertices: Vec<Vertex>) -> Vec<Vertex>;
}

/// [`CustomDictionary`] backed by a [`CoreDictionary`] of user words
#[derive(Debug, Clone, Default)]
pub struct UserDictionary {
    words: CoreDictionary,
}

impl UserDictionary {
    /// Wrap a dictionary of user words
    pub fn new(words: CoreDictionary) -> Self {
        UserDictionary { words }
    }

    /// Longest run `vertices[start..end]` that spells an entry, with its attribute
    fn longest_match(&self, vertices: &[Vertex], start: usize) -> Option<(usize, Attribute)> {
        let max_len = self.words.max_word_len();
        let mut candidate = String::new();
        let mut char_len = 0;
        let mut best = None;

        for (end, vertex) in vertices.iter().enumerate().skip(start) {
            char_len += vertex.len();
            if char_len > max_len {
                break;
            }
            candidate.push_str(&vertex.word);
            if let Some(attribute) = self.words.get(&candidate) {
                best = Some((end + 1, attribute));
            }
        }

        best
    }
}

impl CustomDictionary for UserDictionary {
    fn combine(&self, vertices: Vec<Vertex>) -> Vec<Vertex> {
        if self.words.is_empty() {
            return vertices;
        }

        let mut combined = Vec::with_capacity(vertices.len());
        let mut i = 0;
        while i < vertices.len() {
            match self.longest_match(&vertices, i) {
                Some((end, attribute)) if end - i > 1 => {
                    let word: String = vertices[i..end].iter().map(|v| v.word.as_str()).collect();
                    debug!(word = %word, merged = end - i, "user dictionary merge");
                    combined.push(Vertex::new(word, attribute));
                    i = end;
                }
                Some((end, attribute)) => {
                    // Single-word entry: the user's attribute replaces the core one
                    let mut vertex = Vertex::new(vertices[i].word.clone(), attribute);
                    vertex.confirmed = vertices[i].confirmed.clone();
                    combined.push(vertex);
                    i = end;
                }
                None => {
                    combined.push(vertices[i].clone());
                    i += 1;
                }
            }
        }
        combined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertices(words: &[&str]) -> Vec<Vertex> {
        words
            .iter()
            .map(|w| Vertex::new(*w, Attribute::for_unknown(w)))
            .collect()
    }

    fn words(vertices: &[Vertex]) -> Vec<&str> {
        vertices.iter().map(|v| v.word.as_str()).collect()
    }

    fn user_dict() -> UserDictionary {
        UserDictionary::new(CoreDictionary::from_text("G20峰会 nz 5\n杭州 ns 10\n杭州西湖 ns 3\n").unwrap())
    }

    #[test]
    fn test_merges_consecutive_words() {
        let combined = user_dict().combine(vertices(&["G", "20", "峰会", "在", "杭州"]));
        assert_eq!(words(&combined), vec!["G20峰会", "在", "杭州"]);
        assert_eq!(combined[0].guess_nature(), Some("nz"));
        assert_eq!(combined[2].guess_nature(), Some("ns"));
    }

    #[test]
    fn test_prefers_longest_entry() {
        let combined = user_dict().combine(vertices(&["杭州", "西湖", "美"]));
        assert_eq!(words(&combined), vec!["杭州西湖", "美"]);
    }

    #[test]
    fn test_entries_must_start_on_a_vertex() {
        // "杭州" straddles the boundary between the two words
        let combined = user_dict().combine(vertices(&["湖杭", "州"]));
        assert_eq!(words(&combined), vec!["湖杭", "州"]);
    }

    #[test]
    fn test_single_word_entry_keeps_confirmed_nature() {
        let mut input = vertices(&["杭州"]);
        input[0].confirm_nature("ns");
        let combined = user_dict().combine(input);
        assert_eq!(combined[0].confirmed.as_deref(), Some("ns"));
    }

    #[test]
    fn test_empty_dictionary_is_identity() {
        let input = vertices(&["你", "好"]);
        let combined = UserDictionary::default().combine(input.clone());
        assert_eq!(combined, input);
    }
}
