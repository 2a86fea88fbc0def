//! Reconstruction of words from a tagged table.
//!
//! The tagger is a statistical model, so its output is not guaranteed to be a
//! clean sequence of `S` and `B M* E` runs. Decoding is lenient:
//!
//! - a `B` row opens a word that absorbs every following row up to and
//!   including the next `E`, whatever their tags are;
//! - if no `E` follows, the word runs to the end of the input;
//! - any other row starting a run (`S`, a stray `M` or `E`, or an untagged
//!   row) becomes a one-atom word.
//!
//! Word text is always sliced from the original characters, not from the
//! normalized copy the tagger saw. Spans are clamped to `original`, and any
//! characters the table does not reach become one final word, so a table that
//! disagrees with the input in length still decodes without panicking.

use crate::table::{BoundaryTag, Table};
use crate::term::Term;

/// Decode `table` into terms covering `original`
pub fn decode(original: &[char], table: &Table) -> Vec<Term> {
    let rows = table.rows();
    let mut terms = Vec::with_capacity(rows.len());
    let mut offset = 0;
    let mut i = 0;

    while i < rows.len() {
        let begin = offset;
        offset += rows[i].char_len();
        if rows[i].tag() == Some(BoundaryTag::Begin) {
            // Absorb up to and including the next End, or to the end of input
            while i + 1 < rows.len() {
                i += 1;
                offset += rows[i].char_len();
                if rows[i].tag() == Some(BoundaryTag::End) {
                    break;
                }
            }
        }
        push_span(&mut terms, original, begin, offset);
        i += 1;
    }

    push_span(&mut terms, original, offset, original.len());
    terms
}

/// Push `original[begin..end]`, clamped to `original`, unless it is empty
fn push_span(terms: &mut Vec<Term>, original: &[char], begin: usize, end: usize) {
    let end = end.min(original.len());
    if begin < end {
        terms.push(Term::from_chars(&original[begin..end]));
    }
}
