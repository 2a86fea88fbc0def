//! The tag-input table exchanged with the boundary tagger.
//!
//! Each row carries an atom's class label, its text and a boundary tag slot
//! that the tagger fills in. Rows line up 1:1 with atoms, and the decoder
//! relies on the row texts adding up to the normalized input length.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::atom::Atom;

/// Position of an atom within a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryTag {
    /// First atom of a multi-atom word
    Begin,
    /// Inner atom of a multi-atom word
    Middle,
    /// Last atom of a multi-atom word
    End,
    /// Single-atom word
    Single,
}

impl BoundaryTag {
    /// One-letter representation (`B`, `M`, `E`, `S`)
    pub fn as_char(&self) -> char {
        match self {
            BoundaryTag::Begin => 'B',
            BoundaryTag::Middle => 'M',
            BoundaryTag::End => 'E',
            BoundaryTag::Single => 'S',
        }
    }

    /// Tags for a word made of `atom_count` atoms
    pub fn for_word(atom_count: usize) -> Vec<BoundaryTag> {
        match atom_count {
            0 => Vec::new(),
            1 => vec![BoundaryTag::Single],
            n => {
                let mut tags = Vec::with_capacity(n);
                tags.push(BoundaryTag::Begin);
                tags.extend(std::iter::repeat(BoundaryTag::Middle).take(n - 2));
                tags.push(BoundaryTag::End);
                tags
            }
        }
    }
}

impl fmt::Display for BoundaryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One row of the tag-input table.
///
/// Label and text are fixed when the table is built; a tagger can only set
/// the tag, through [`Table::set_tag`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    label: String,
    text: String,
    tag: Option<BoundaryTag>,
}

impl Row {
    /// Class label (`M`, `W` or the character itself)
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Atom text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Boundary tag, if the tagger set one
    pub fn tag(&self) -> Option<BoundaryTag> {
        self.tag
    }

    /// Length of the row text in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Table handed to the tagger
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Build an untagged table from atoms, one row per atom
    pub fn from_atoms(atoms: Vec<Atom>) -> Self {
        let rows = atoms
            .into_iter()
            .map(|atom| Row {
                label: atom.class.label(),
                text: atom.text,
                tag: None,
            })
            .collect();
        Table { rows }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Set the tag of row `i`; out-of-range indices are ignored
    pub fn set_tag(&mut self, i: usize, tag: BoundaryTag) {
        if let Some(row) = self.rows.get_mut(i) {
            row.tag = Some(tag);
        }
    }

    /// The tag column
    pub fn tags(&self) -> Vec<Option<BoundaryTag>> {
        self.rows.iter().map(|r| r.tag).collect()
    }

    /// Total number of characters covered by the table
    pub fn char_len(&self) -> usize {
        self.rows.iter().map(Row::char_len).sum()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let tag = row.tag.map(|t| t.as_char()).unwrap_or('_');
            writeln!(f, "{}\t{}\t{}", row.label, row.text, tag)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::atomize_to_table;

    #[test]
    fn test_rows_follow_atoms() {
        let chars: Vec<char> = "G20峰会".chars().collect();
        let table = Table::from_atoms(atomize_to_table(&chars));

        let labels: Vec<&str> = table.rows().iter().map(Row::label).collect();
        assert_eq!(labels, vec!["W", "M", "峰", "会"]);
        assert!(table.tags().iter().all(Option::is_none));
        assert_eq!(table.char_len(), chars.len());
    }

    #[test]
    fn test_set_tag_and_display() {
        let chars: Vec<char> = "峰会".chars().collect();
        let mut table = Table::from_atoms(atomize_to_table(&chars));
        table.set_tag(0, BoundaryTag::Begin);
        table.set_tag(1, BoundaryTag::End);
        table.set_tag(7, BoundaryTag::Single);

        assert_eq!(format!("{}", table), "峰\t峰\tB\n会\t会\tE\n");
    }

    #[test]
    fn test_tags_for_word() {
        assert!(BoundaryTag::for_word(0).is_empty());
        assert_eq!(BoundaryTag::for_word(1), vec![BoundaryTag::Single]);
        assert_eq!(
            BoundaryTag::for_word(4),
            vec![
                BoundaryTag::Begin,
                BoundaryTag::Middle,
                BoundaryTag::Middle,
                BoundaryTag::End
            ]
        );
    }

    #[test]
    fn test_tagging_keeps_row_text() {
        let chars: Vec<char> = "3.5%的".chars().collect();
        let mut table = Table::from_atoms(atomize_to_table(&chars));
        table.set_tag(0, BoundaryTag::Begin);

        let row = &table.rows()[0];
        assert_eq!(row.label(), "M");
        assert_eq!(row.text(), "3.5%");
        assert_eq!(row.tag(), Some(BoundaryTag::Begin));
        assert_eq!(row.char_len(), 4);
        assert_eq!(table.rows()[1].tag(), None);
    }
}
