//! Parsed documents and their aggregate metrics.
//!
//! A [`Document`] owns the classified characters of its source text and the
//! sentences found in them. Sentences and words only hold index ranges; the
//! borrowed [`SentenceRef`] and [`WordRef`] views resolve them against the
//! document's backing sequence. Documents are never edited after parsing, so
//! every metric is recomputed from the same sentences on demand.

use std::collections::HashSet;
use std::fmt;

use camino::Utf8Path;

use crate::error::{DocumentError, DocumentResult, ScoreResult};
use crate::markdown;
use crate::readability::{self, ReadingLevel};
use crate::syllables;
use crate::text::{self, Sentence, Span, Word};
use crate::tokens::{self, ClassifiedChar};

/// Name given to documents parsed without one.
pub const UNNAMED: &str = "untitled";

/// A parsed text.
#[derive(Debug, Clone)]
pub struct Document {
    name: String,
    chars: Vec<ClassifiedChar>,
    sentences: Vec<Sentence>,
}

impl Document {
    /// Parse in-memory text.
    #[tracing::instrument(skip(text), fields(text_len = text.len()))]
    pub fn parse(text: &str, name: Option<&str>) -> Self {
        let chars = tokens::tokenize(text);
        let sentences = text::segment(&chars);
        let document = Self {
            name: name.unwrap_or(UNNAMED).to_string(),
            chars,
            sentences,
        };
        tracing::debug!(
            name = %document.name,
            sentences = document.sentences.len(),
            words = document.word_count(),
            "parsed document"
        );
        document
    }

    /// Parse raw bytes, replacing invalid UTF-8 sequences.
    pub fn parse_bytes(bytes: &[u8], name: Option<&str>) -> Self {
        Self::parse(&String::from_utf8_lossy(bytes), name)
    }

    /// Read and parse a plain-text file. The path becomes the document name.
    pub fn from_file(path: &Utf8Path, max_bytes: Option<usize>) -> DocumentResult<Self> {
        let bytes = read_source(path, max_bytes)?;
        Ok(Self::parse_bytes(&bytes, Some(path.as_str())))
    }

    /// Read a markdown file and parse only its prose.
    pub fn from_markdown_file(path: &Utf8Path, max_bytes: Option<usize>) -> DocumentResult<Self> {
        let bytes = read_source(path, max_bytes)?;
        let prose = markdown::strip_to_prose(&String::from_utf8_lossy(&bytes));
        Ok(Self::parse(&prose, Some(path.as_str())))
    }

    /// Document name, or [`UNNAMED`].
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The classified characters every span points into.
    pub fn chars(&self) -> &[ClassifiedChar] {
        &self.chars
    }

    /// Number of terminated sentences.
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Sentences in document order.
    pub fn sentences(&self) -> impl Iterator<Item = SentenceRef<'_>> {
        self.sentences.iter().map(|sentence| SentenceRef {
            chars: &self.chars,
            sentence,
        })
    }

    /// Every word, in sentence order and then word order.
    pub fn words(&self) -> impl Iterator<Item = WordRef<'_>> {
        self.sentences().flat_map(|s| s.words())
    }

    /// Total words across all sentences.
    pub fn word_count(&self) -> usize {
        self.sentences.iter().map(Sentence::word_count).sum()
    }

    /// First occurrence of each word, compared after upper-casing.
    pub fn unique_words(&self) -> Vec<WordRef<'_>> {
        let mut seen = HashSet::new();
        self.words().filter(|w| seen.insert(w.folded())).collect()
    }

    /// Total estimated syllables.
    pub fn syllable_count(&self) -> usize {
        self.words().map(|w| w.syllables()).sum()
    }

    /// Flesch Reading Ease.
    pub fn score(&self) -> ScoreResult<f64> {
        readability::reading_ease(
            self.sentence_count(),
            self.word_count(),
            self.syllable_count(),
        )
    }

    /// Flesch-Kincaid Grade Level.
    pub fn kincaid(&self) -> ScoreResult<f64> {
        readability::kincaid_grade(
            self.sentence_count(),
            self.word_count(),
            self.syllable_count(),
        )
    }

    /// Band for the Reading Ease score.
    pub fn reading_level(&self) -> ScoreResult<ReadingLevel> {
        self.score().map(ReadingLevel::from_score)
    }

    /// Indices of sentences that contain no words.
    pub fn empty_sentences(&self) -> Vec<usize> {
        self.sentences
            .iter()
            .enumerate()
            .filter(|(_, s)| s.words().is_empty())
            .map(|(i, _)| i)
            .collect()
    }
}

/// Read a source file after checking its size against `max_bytes`.
fn read_source(path: &Utf8Path, max_bytes: Option<usize>) -> DocumentResult<Vec<u8>> {
    let read_err = |source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    };

    // Preflight: check file size via metadata before reading into memory.
    let metadata = std::fs::metadata(path.as_std_path()).map_err(read_err)?;
    if let Some(limit) = max_bytes
        && metadata.len() > limit as u64
    {
        return Err(DocumentError::InputTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit,
        });
    }

    std::fs::read(path.as_std_path()).map_err(read_err)
}

/// A sentence resolved against its document.
#[derive(Debug, Clone, Copy)]
pub struct SentenceRef<'a> {
    chars: &'a [ClassifiedChar],
    sentence: &'a Sentence,
}

impl<'a> SentenceRef<'a> {
    /// Location in the document, terminator included.
    pub const fn span(&self) -> Span {
        self.sentence.span()
    }

    /// Source text of the sentence.
    pub fn text(&self) -> String {
        tokens::to_text(self.span().slice(self.chars))
    }

    /// Words in left-to-right order.
    pub fn words(&self) -> impl Iterator<Item = WordRef<'a>> + use<'a> {
        let chars = self.chars;
        self.sentence
            .words()
            .iter()
            .map(move |word| WordRef::new(chars, *word))
    }

    /// Number of words.
    pub fn word_count(&self) -> usize {
        self.sentence.word_count()
    }

    /// Estimated syllables across the sentence.
    pub fn syllables(&self) -> usize {
        self.words().map(|w| w.syllables()).sum()
    }
}

impl fmt::Display for SentenceRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.span()
            .slice(self.chars)
            .iter()
            .try_for_each(|c| write!(f, "{c}"))
    }
}

/// A word resolved against its document.
#[derive(Debug, Clone, Copy)]
pub struct WordRef<'a> {
    span: Span,
    letters: &'a [ClassifiedChar],
}

impl<'a> WordRef<'a> {
    fn new(chars: &'a [ClassifiedChar], word: Word) -> Self {
        let span = word.span();
        Self {
            span,
            letters: span.slice(chars),
        }
    }

    /// Location in the document.
    pub const fn span(&self) -> Span {
        self.span
    }

    /// The word's classified letters.
    pub const fn letters(&self) -> &'a [ClassifiedChar] {
        self.letters
    }

    /// Source text of the word.
    pub fn text(&self) -> String {
        tokens::to_text(self.letters)
    }

    /// Upper-cased text, used for case-insensitive comparison.
    pub fn folded(&self) -> String {
        self.text().to_uppercase()
    }

    /// Length in code points.
    pub const fn len(&self) -> usize {
        self.letters.len()
    }

    /// Always `false`; see [`Span::is_empty`].
    pub const fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// Estimated syllables.
    pub fn syllables(&self) -> usize {
        syllables::count_syllables(self.letters)
    }
}

impl fmt::Display for WordRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.letters.iter().try_for_each(|c| write!(f, "{c}"))
    }
}
