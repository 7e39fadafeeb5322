//! Character classification.
//!
//! Every code point maps to exactly one [`CharClass`] through a fixed lookup
//! table. Letters are listed per case, so `'a'` and `'A'` resolve
//! independently to the same class. Anything missing from the table is
//! [`CharClass::Other`].

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Semantic class of a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CharClass {
    /// `a e i o u` in either case.
    Vowel,
    /// Every other ASCII letter, `y` included.
    Consonant,
    /// `0` through `9`.
    Digit,
    /// Space, tab, newline, carriage return.
    Whitespace,
    /// Separates words without ending a sentence (quotes, comma, closing parenthesis).
    WordStop,
    /// Ends a sentence (period, semicolon, exclamation mark, question mark).
    SentenceStop,
    /// Anything not in the table.
    Other,
}

impl CharClass {
    /// Whether this class can appear inside a word.
    pub const fn is_letter(self) -> bool {
        matches!(self, Self::Vowel | Self::Consonant)
    }
}

const VOWELS: &str = "aeiouAEIOU";
const CONSONANTS: &str = "bcdfghjklmnpqrstvwxyzBCDFGHJKLMNPQRSTVWXYZ";
const DIGITS: &str = "0123456789";
const WHITESPACE: &str = " \t\n\r";
const WORD_STOPS: &str = "\"',)\u{201C}\u{201D}\u{2018}\u{2019}";
const SENTENCE_STOPS: &str = ".;!?";

/// Code point → class table, built once per process.
static CLASS_TABLE: LazyLock<HashMap<char, CharClass>> = LazyLock::new(|| {
    let groups = [
        (VOWELS, CharClass::Vowel),
        (CONSONANTS, CharClass::Consonant),
        (DIGITS, CharClass::Digit),
        (WHITESPACE, CharClass::Whitespace),
        (WORD_STOPS, CharClass::WordStop),
        (SENTENCE_STOPS, CharClass::SentenceStop),
    ];

    let mut map = HashMap::new();
    for (chars, class) in groups {
        map.extend(chars.chars().map(|c| (c, class)));
    }
    map
});

/// Classify a single code point.
pub fn classify(c: char) -> CharClass {
    CLASS_TABLE.get(&c).copied().unwrap_or(CharClass::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vowels_in_both_cases() {
        for c in "aeiouAEIOU".chars() {
            assert_eq!(classify(c), CharClass::Vowel, "{c:?}");
        }
    }

    #[test]
    fn consonants_in_both_cases() {
        for c in "bBLfTQyYzZ".chars() {
            assert_eq!(classify(c), CharClass::Consonant, "{c:?}");
        }
    }

    #[test]
    fn every_ascii_letter_is_stable_across_case() {
        for c in 'a'..='z' {
            let lower = classify(c);
            let upper = classify(c.to_ascii_uppercase());
            assert!(lower.is_letter(), "{c:?} should be a letter");
            assert_eq!(lower, upper, "{c:?} differs across case");
        }
    }

    #[test]
    fn whitespace() {
        for c in [' ', '\t', '\n', '\r'] {
            assert_eq!(classify(c), CharClass::Whitespace);
        }
    }

    #[test]
    fn digits() {
        for c in '0'..='9' {
            assert_eq!(classify(c), CharClass::Digit);
        }
    }

    #[test]
    fn stops() {
        for c in ['.', ';', '!', '?'] {
            assert_eq!(classify(c), CharClass::SentenceStop);
        }
        for c in ['"', '\'', ',', ')', '\u{201D}'] {
            assert_eq!(classify(c), CharClass::WordStop);
        }
    }

    #[test]
    fn unmapped_is_other() {
        for c in ['é', '(', '-', ':', '\u{00A0}', '日', '🦀'] {
            assert_eq!(classify(c), CharClass::Other, "{c:?}");
        }
    }
}
