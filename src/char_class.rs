//! Character classification and tagging-time normalization.
//!
//! The atomizer only needs to know whether a character is an ASCII digit, a
//! Latin letter, a plain space or anything else. Normalization folds
//! full-width and compatibility forms onto those classes without ever
//! changing the number of characters, so offsets computed on the normalized
//! copy index the original text directly.

use unicode_normalization::UnicodeNormalization;

/// Coarse character classes used for atomization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// ASCII digit `0-9`
    Digit,
    /// Digit-run continuation that is not itself a digit (`.` or `%`)
    NumberMark,
    /// Latin letter `a-z` / `A-Z`
    Letter,
    /// The plain ASCII space
    Space,
    /// Everything else (ideographs, punctuation, symbols)
    Other,
}

impl CharClass {
    /// Can this character extend a digit run?
    pub fn extends_number(&self) -> bool {
        matches!(self, CharClass::Digit | CharClass::NumberMark)
    }
}

/// Get the class of a character
pub fn get_char_class(c: char) -> CharClass {
    match c {
        '0'..='9' => CharClass::Digit,
        '.' | '%' => CharClass::NumberMark,
        'a'..='z' | 'A'..='Z' => CharClass::Letter,
        ' ' => CharClass::Space,
        _ => CharClass::Other,
    }
}

/// Length-preserving character normalization applied before tagging
pub trait CharNormalizer: Send + Sync {
    /// Return a normalized copy with exactly `chars.len()` characters
    fn normalize(&self, chars: &[char]) -> Vec<char>;
}

/// Default normalizer: per-character compatibility folding.
///
/// Each character is replaced by its NFKC form only when that form is a single
/// character, so `Ａ` becomes `A`, `２` becomes `2` and the ideographic space
/// becomes `' '`, while expansions such as `㎏` are left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharTable;

impl CharTable {
    /// Fold a single character
    pub fn convert_char(c: char) -> char {
        if c.is_ascii() {
            return c;
        }
        let mut folded = std::iter::once(c).nfkc();
        match (folded.next(), folded.next()) {
            (Some(single), None) => single,
            _ => c,
        }
    }
}

impl CharNormalizer for CharTable {
    fn normalize(&self, chars: &[char]) -> Vec<char> {
        chars.iter().copied().map(CharTable::convert_char).collect()
    }
}
