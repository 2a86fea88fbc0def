//! Atomization of a character sequence.
//!
//! Atoms are the units fed to the boundary tagger: runs of digits (which may
//! carry `.` and `%`), runs of Latin letters, or single characters. Atoms
//! partition their input with no gaps, so joining every atom text gives the
//! input back.

use serde::{Deserialize, Serialize};

use crate::char_class::{get_char_class, CharClass};

/// Class label of a digit-run atom as seen by the tagger
pub const DIGIT_LABEL: &str = "M";

/// Class label of a letter-run atom as seen by the tagger
pub const LETTER_LABEL: &str = "W";

/// The class of an atom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AtomClass {
    /// Digits, optionally with `.` or `%` after the first digit
    Digit,
    /// Latin letters (and spaces in table mode)
    Letter,
    /// Any other single character; its label is the character itself
    Single(char),
}

impl AtomClass {
    /// The label the tagger sees in the class column
    pub fn label(&self) -> String {
        match self {
            AtomClass::Digit => DIGIT_LABEL.to_string(),
            AtomClass::Letter => LETTER_LABEL.to_string(),
            AtomClass::Single(c) => c.to_string(),
        }
    }
}

/// An atomic unit of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Atom {
    /// The class of this atom
    pub class: AtomClass,
    /// The text covered by this atom
    pub text: String,
}

impl Atom {
    /// Create a new atom
    pub fn new(class: AtomClass, text: String) -> Self {
        Atom { class, text }
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the atom has no text
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Split `chars` into atoms. Letter runs contain letters only.
pub fn atomize(chars: &[char]) -> Vec<Atom> {
    Atomizer::new(chars, false).run()
}

/// Split `chars` into atoms for the tag-input table.
///
/// Identical to [`atomize`] except that a plain space can start or extend a
/// letter run, so `"New York"` is a single atom.
pub fn atomize_to_table(chars: &[char]) -> Vec<Atom> {
    Atomizer::new(chars, true).run()
}

/// Single left-to-right scan over the input
struct Atomizer<'a> {
    chars: &'a [char],
    /// Whether spaces belong to letter runs
    spaces_in_words: bool,
}

impl<'a> Atomizer<'a> {
    fn new(chars: &'a [char], spaces_in_words: bool) -> Self {
        Atomizer {
            chars,
            spaces_in_words,
        }
    }

    fn is_word_char(&self, class: CharClass) -> bool {
        class == CharClass::Letter || (self.spaces_in_words && class == CharClass::Space)
    }

    fn run(&self) -> Vec<Atom> {
        // Runs merge characters, so the capacity is an upper bound only
        let mut atoms = Vec::with_capacity(self.chars.len());
        let mut i = 0;

        while i < self.chars.len() {
            let class = get_char_class(self.chars[i]);
            let (atom, next_i) = if class == CharClass::Digit {
                self.read_run(i, AtomClass::Digit, |c| c.extends_number())
            } else if self.is_word_char(class) {
                self.read_run(i, AtomClass::Letter, |c| self.is_word_char(c))
            } else {
                let c = self.chars[i];
                (Atom::new(AtomClass::Single(c), c.to_string()), i + 1)
            };
            atoms.push(atom);
            i = next_i;
        }

        atoms
    }

    /// Read a run starting at `start_i` while `extends` accepts the next class
    fn read_run(
        &self,
        start_i: usize,
        class: AtomClass,
        extends: impl Fn(CharClass) -> bool,
    ) -> (Atom, usize) {
        let mut end = start_i + 1;
        while end < self.chars.len() && extends(get_char_class(self.chars[end])) {
            end += 1;
        }
        let text: String = self.chars[start_i..end].iter().collect();
        (Atom::new(class, text), end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn texts(atoms: &[Atom]) -> Vec<&str> {
        atoms.iter().map(|a| a.text.as_str()).collect()
    }

    #[test]
    fn test_letters_digits_and_ideographs() {
        let atoms = atomize_to_table(&chars("G20峰会"));
        assert_eq!(texts(&atoms), vec!["G", "20", "峰", "会"]);
        assert_eq!(atoms[0].class, AtomClass::Letter);
        assert_eq!(atoms[1].class, AtomClass::Digit);
        assert_eq!(atoms[2].class, AtomClass::Single('峰'));
    }

    #[test]
    fn test_percentage_is_one_atom() {
        let atoms = atomize(&chars("3.14%"));
        assert_eq!(atoms.len(), 1);
        assert_eq!(atoms[0].text, "3.14%");
        assert_eq!(atoms[0].class, AtomClass::Digit);
    }

    #[test]
    fn test_pure_runs_are_single_atoms() {
        let digits = atomize(&chars("20141210"));
        assert_eq!(digits.len(), 1);
        assert_eq!(digits[0].len(), 8);

        let letters = atomize(&chars("HanLP"));
        assert_eq!(letters.len(), 1);
        assert_eq!(letters[0].class, AtomClass::Letter);
    }

    #[test]
    fn test_dot_does_not_start_a_number() {
        let atoms = atomize(&chars(".5"));
        assert_eq!(texts(&atoms), vec![".", "5"]);
        assert_eq!(atoms[0].class, AtomClass::Single('.'));
    }

    #[test]
    fn test_space_handling_differs_by_variant() {
        let plain = atomize(&chars("New York"));
        assert_eq!(texts(&plain), vec!["New", " ", "York"]);

        let table = atomize_to_table(&chars("New York"));
        assert_eq!(texts(&table), vec!["New York"]);

        let leading = atomize_to_table(&chars(" ab"));
        assert_eq!(texts(&leading), vec![" ab"]);
    }

    #[test]
    fn test_run_truncated_by_end_of_input() {
        let atoms = atomize(&chars("共3"));
        assert_eq!(texts(&atoms), vec!["共", "3"]);

        let atoms = atomize_to_table(&chars("在abc"));
        assert_eq!(texts(&atoms), vec!["在", "abc"]);
    }

    #[test]
    fn test_concatenation_reproduces_input() {
        let input = "2014年12月10日, HanLP 1.2版发布了50%的功能！";
        let atoms = atomize_to_table(&chars(input));
        let joined: String = atoms.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(joined, input);
        assert!(atoms.len() < input.chars().count());
    }

    #[test]
    fn test_empty_input() {
        assert!(atomize(&[]).is_empty());
        assert!(atomize_to_table(&[]).is_empty());
    }

    #[test]
    fn test_labels() {
        assert_eq!(AtomClass::Digit.label(), "M");
        assert_eq!(AtomClass::Letter.label(), "W");
        assert_eq!(AtomClass::Single('，').label(), "，");
    }
}
