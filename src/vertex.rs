//! Vertices used by the refinement stages.

use crate::dictionary::{Attribute, Dictionary, NATURE_BEGIN};
use crate::term::Term;

/// A word with its dictionary attribute and, once resolved, its nature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    /// The word as it appears in the input
    pub word: String,
    /// Candidate natures
    pub attribute: Attribute,
    /// Nature picked by POS disambiguation or carried over from a term
    pub confirmed: Option<String>,
}

impl Vertex {
    /// Create a vertex with an unresolved nature
    pub fn new(word: impl Into<String>, attribute: Attribute) -> Self {
        Vertex {
            word: word.into(),
            attribute,
            confirmed: None,
        }
    }

    /// The synthetic vertex that anchors a POS path
    pub fn begin() -> Self {
        let mut vertex = Vertex::new("", Attribute::single(NATURE_BEGIN, 1));
        vertex.confirmed = Some(NATURE_BEGIN.to_string());
        vertex
    }

    /// Fix the nature of this vertex
    pub fn confirm_nature(&mut self, nature: &str) {
        self.confirmed = Some(nature.to_string());
    }

    /// The confirmed nature, or the most likely candidate
    pub fn guess_nature(&self) -> Option<&str> {
        self.confirmed
            .as_deref()
            .or_else(|| self.attribute.first_nature())
    }

    /// Length of the word in characters
    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    /// Check if the word is empty (only true for the start vertex)
    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }
}

/// Build a vertex per term, optionally preceded by [`Vertex::begin`].
///
/// Attributes come from `dictionary`; misses fall back to
/// [`Attribute::for_unknown`]. A term that already has a nature confirms it
/// on its vertex.
pub fn to_vertex_list(terms: &[Term], dictionary: &dyn Dictionary, with_begin: bool) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(terms.len() + 1);
    if with_begin {
        vertices.push(Vertex::begin());
    }
    for term in terms {
        let attribute = dictionary
            .get(&term.word)
            .unwrap_or_else(|| Attribute::for_unknown(&term.word));
        let mut vertex = Vertex::new(term.word.clone(), attribute);
        if let Some(ref nature) = term.nature {
            vertex.confirm_nature(nature);
        }
        vertices.push(vertex);
    }
    vertices
}

/// Flatten vertices back into terms, optionally assigning character offsets
pub fn to_term_list(vertices: Vec<Vertex>, offset_enabled: bool) -> Vec<Term> {
    let mut offset = 0;
    vertices
        .into_iter()
        .map(|vertex| {
            let mut term = Term::new(vertex.word.clone(), vertex.guess_nature().map(String::from));
            if offset_enabled {
                term.offset = Some(offset);
                offset += term.len();
            }
            term
        })
        .collect()
}
