//! Sentence and word segmentation.
//!
//! Segmentation is a single forward scan over the classified characters of a
//! document. Sentences and words are stored as inclusive index ranges into that
//! sequence; they never copy text.
//!
//! Boundary rules:
//! - A sentence starts at the first letter after the previous sentence.
//! - A sentence ends at the next sentence stop, inclusive.
//! - Text after the last sentence stop is not a sentence and is dropped.
//! - A word is a maximal run of letters inside a sentence. Everything else
//!   (whitespace, digits, stops, unmapped characters) separates words.

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::classify::CharClass;
use crate::tokens::ClassifiedChar;

/// Inclusive `[start, end]` range into a classified-character sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    const fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Index of the first character.
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Index of the last character (inclusive).
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Number of characters covered.
    pub const fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always `false`: an inclusive span covers at least its start.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The span as a standard range.
    pub const fn range(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }

    /// Borrow the covered characters out of their backing sequence.
    ///
    /// # Panics
    ///
    /// Panics if `chars` is not the sequence this span was produced from.
    pub fn slice<'a>(&self, chars: &'a [ClassifiedChar]) -> &'a [ClassifiedChar] {
        &chars[self.range()]
    }
}

/// A maximal run of letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Word {
    span: Span,
}

impl Word {
    /// Location of the word in the document.
    pub const fn span(&self) -> Span {
        self.span
    }
}

/// A letter-led run of characters closed by a sentence stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentence {
    span: Span,
    words: Vec<Word>,
}

impl Sentence {
    /// Location of the sentence in the document, terminator included.
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Words in left-to-right order.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Number of words in the sentence.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

/// Split a classified sequence into sentences, each carrying its words.
#[tracing::instrument(skip_all, fields(chars = chars.len()))]
pub fn segment(chars: &[ClassifiedChar]) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut cursor = 0;

    while let Some(span) = next_sentence(chars, cursor) {
        let words = extract_words(chars, span);
        sentences.push(Sentence { span, words });
        cursor = span.end + 1;
    }

    tracing::debug!(sentences = sentences.len(), "segmented");
    sentences
}

/// Find the next terminated sentence at or after `from`.
fn next_sentence(chars: &[ClassifiedChar], from: usize) -> Option<Span> {
    let mut start = None;

    for (i, c) in chars.iter().enumerate().skip(from) {
        match start {
            None if c.is_letter() => start = Some(i),
            None => {}
            Some(s) if c.class == CharClass::SentenceStop => {
                return Some(Span::new(s, i));
            }
            Some(_) => {}
        }
    }

    None
}

/// Collect the maximal letter runs inside `sentence`.
fn extract_words(chars: &[ClassifiedChar], sentence: Span) -> Vec<Word> {
    let mut words = Vec::new();
    let mut word_start = None;

    for i in sentence.range() {
        match (chars[i].is_letter(), word_start) {
            (true, None) => word_start = Some(i),
            (false, Some(s)) => {
                words.push(Word {
                    span: Span::new(s, i - 1),
                });
                word_start = None;
            }
            _ => {}
        }
    }

    // Sentences end on a stop, so no run is left open here.
    debug_assert!(word_start.is_none());
    words
}
