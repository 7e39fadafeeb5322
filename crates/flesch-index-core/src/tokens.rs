//! Tokenization into classified characters.
//!
//! Text is read as Unicode code points, not bytes, so a multi-byte glyph
//! becomes one [`ClassifiedChar`] instead of several misclassified ones.

use std::fmt;

use crate::classify::{CharClass, classify};

/// A code point paired with its class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassifiedChar {
    /// Class from the lookup table.
    pub class: CharClass,
    /// The source code point.
    pub value: char,
}

impl ClassifiedChar {
    /// Classify a single code point.
    pub fn new(value: char) -> Self {
        Self {
            class: classify(value),
            value,
        }
    }

    /// Whether the character can be part of a word.
    pub const fn is_letter(&self) -> bool {
        self.class.is_letter()
    }
}

impl fmt::Display for ClassifiedChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Classify every code point of `text`, preserving order.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn tokenize(text: &str) -> Vec<ClassifiedChar> {
    text.chars().map(ClassifiedChar::new).collect()
}

/// Rebuild the source text of a run of classified characters.
pub fn to_text(chars: &[ClassifiedChar]) -> String {
    chars.iter().map(|c| c.value).collect()
}
