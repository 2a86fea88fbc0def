//! Boundary taggers.
//!
//! A [`Tagger`] fills the tag column of a [`Table`]. Statistical models live
//! outside this crate and plug in through the trait; [`LongestMatchTagger`] is
//! a dictionary baseline that tags atoms by forward longest match, so a
//! segmenter can run without a trained model.

use crate::dictionary::{CoreDictionary, Dictionary};
use crate::table::{BoundaryTag, Table};

/// Assigns a boundary tag to every row of a table
pub trait Tagger: Send + Sync {
    /// Fill in the tag column with [`Table::set_tag`]
    fn tag(&self, table: &mut Table);
}

/// Tags the longest dictionary word starting at each atom as one word
#[derive(Debug, Clone)]
pub struct LongestMatchTagger {
    dictionary: CoreDictionary,
}

impl LongestMatchTagger {
    /// Create a new tagger over the given dictionary
    pub fn new(dictionary: CoreDictionary) -> Self {
        LongestMatchTagger { dictionary }
    }

    /// Number of rows, starting at `start_i`, forming the longest dictionary word
    fn longest_match(&self, table: &Table, start_i: usize) -> usize {
        let rows = table.rows();
        let max_len = self.dictionary.max_word_len();
        let mut candidate = String::new();
        let mut char_len = 0;
        let mut matched = 1;

        for (walker, row) in rows.iter().enumerate().skip(start_i) {
            char_len += row.char_len();
            if char_len > max_len {
                break;
            }
            candidate.push_str(row.text());
            if self.dictionary.contains(&candidate) {
                matched = walker - start_i + 1;
            }
        }

        matched
    }
}

impl Tagger for LongestMatchTagger {
    fn tag(&self, table: &mut Table) {
        let mut i = 0;
        while i < table.len() {
            let n = self.longest_match(table, i);
            for (k, tag) in BoundaryTag::for_word(n).into_iter().enumerate() {
                table.set_tag(i + k, tag);
            }
            i += n;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::atomize_to_table;
    use crate::table::BoundaryTag::{Begin as B, End as E, Middle as M, Single as S};

    fn make_test_tagger() -> LongestMatchTagger {
        let dict = CoreDictionary::from_text("峰会 n 10\n杭州 ns 8\n中华人民共和国 ns 5\n中华 nz 3\n").unwrap();
        LongestMatchTagger::new(dict)
    }

    fn tag(input: &str) -> Vec<Option<BoundaryTag>> {
        let chars: Vec<char> = input.chars().collect();
        let mut table = Table::from_atoms(atomize_to_table(&chars));
        make_test_tagger().tag(&mut table);
        table.tags()
    }

    #[test]
    fn test_known_words_become_spans() {
        assert_eq!(
            tag("G20峰会在杭州"),
            vec![Some(S), Some(S), Some(B), Some(E), Some(S), Some(B), Some(E)]
        );
    }

    #[test]
    fn test_longest_entry_wins() {
        let tags = tag("中华人民共和国");
        assert_eq!(tags.first(), Some(&Some(B)));
        assert_eq!(tags.last(), Some(&Some(E)));
        assert_eq!(tags.iter().filter(|t| **t == Some(M)).count(), 5);
    }

    #[test]
    fn test_every_row_is_tagged() {
        assert!(tag("今天天气不错").iter().all(Option::is_some));
    }

    #[test]
    fn test_empty_dictionary_tags_singles() {
        let chars: Vec<char> = "你好".chars().collect();
        let mut table = Table::from_atoms(atomize_to_table(&chars));
        LongestMatchTagger::new(CoreDictionary::new()).tag(&mut table);
        assert_eq!(table.tags(), vec![Some(S), Some(S)]);
    }
}
