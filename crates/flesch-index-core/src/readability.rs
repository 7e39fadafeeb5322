//! Readability formulas.
//!
//! Flesch Reading Ease:
//! `206.835 - 84.6 * (syllables/words) - 1.015 * (words/sentences)`
//!
//! Flesch-Kincaid Grade Level:
//! `0.39 * (words/sentences) + 11.8 * (syllables/words) - 15.59`
//!
//! Higher ease = more readable; lower grade = more readable. Ease usually lands
//! in 0-100 but can fall outside it for unusual text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::{ScoreError, ScoreResult};

/// Per-word and per-sentence averages, checked for a non-degenerate document.
#[derive(Debug, Clone, Copy)]
struct Ratios {
    words_per_sentence: f64,
    syllables_per_word: f64,
}

impl Ratios {
    fn new(sentences: usize, words: usize, syllables: usize) -> ScoreResult<Self> {
        if sentences == 0 {
            return Err(ScoreError::NoSentences);
        }
        if words == 0 {
            return Err(ScoreError::NoWords);
        }
        Ok(Self {
            words_per_sentence: words as f64 / sentences as f64,
            syllables_per_word: syllables as f64 / words as f64,
        })
    }
}

/// Flesch Reading Ease for the given counts.
pub fn reading_ease(sentences: usize, words: usize, syllables: usize) -> ScoreResult<f64> {
    let r = Ratios::new(sentences, words, syllables)?;
    Ok(1.015f64.mul_add(
        -r.words_per_sentence,
        84.6f64.mul_add(-r.syllables_per_word, 206.835),
    ))
}

/// Flesch-Kincaid Grade Level for the given counts.
pub fn kincaid_grade(sentences: usize, words: usize, syllables: usize) -> ScoreResult<f64> {
    let r = Ratios::new(sentences, words, syllables)?;
    Ok(0.39f64.mul_add(r.words_per_sentence, 11.8 * r.syllables_per_word) - 15.59)
}

/// Plain-language band for a Reading Ease score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadingLevel {
    /// 90 and up: an average 11-year-old follows it easily.
    VeryEasy,
    /// 80 to 90: conversational English.
    Easy,
    /// 70 to 80.
    FairlyEasy,
    /// 60 to 70: plain English.
    Standard,
    /// 50 to 60.
    FairlyDifficult,
    /// 30 to 50: college level.
    Difficult,
    /// Below 30: best understood by university graduates.
    VeryConfusing,
}

impl ReadingLevel {
    /// Band containing `score`.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => Self::VeryEasy,
            s if s >= 80.0 => Self::Easy,
            s if s >= 70.0 => Self::FairlyEasy,
            s if s >= 60.0 => Self::Standard,
            s if s >= 50.0 => Self::FairlyDifficult,
            s if s >= 30.0 => Self::Difficult,
            _ => Self::VeryConfusing,
        }
    }

    /// Short label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::VeryEasy => "very easy",
            Self::Easy => "easy",
            Self::FairlyEasy => "fairly easy",
            Self::Standard => "standard",
            Self::FairlyDifficult => "fairly difficult",
            Self::Difficult => "difficult",
            Self::VeryConfusing => "very confusing",
        }
    }

    /// Who can comfortably read text in this band.
    pub const fn audience(&self) -> &'static str {
        match self {
            Self::VeryEasy => "5th grade",
            Self::Easy => "6th grade",
            Self::FairlyEasy => "7th grade",
            Self::Standard => "8th and 9th grade",
            Self::FairlyDifficult => "10th to 12th grade",
            Self::Difficult => "college",
            Self::VeryConfusing => "college graduate",
        }
    }
}

impl fmt::Display for ReadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.audience())
    }
}

/// Result of scoring a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadabilityReport {
    /// Document name.
    pub name: String,
    /// Flesch Reading Ease.
    pub score: f64,
    /// Band the score falls in.
    pub level: ReadingLevel,
    /// Flesch-Kincaid Grade Level.
    pub grade: f64,
    /// Number of sentences detected.
    pub sentences: usize,
    /// Number of words detected.
    pub words: usize,
    /// Number of distinct words, case-insensitive.
    pub unique_words: usize,
    /// Total syllable count.
    pub syllables: usize,
    /// Minimum acceptable Reading Ease (if provided).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f64>,
    /// Whether the score falls below the minimum.
    pub below_min: bool,
}

/// Score a parsed document.
///
/// # Arguments
///
/// * `document` - The parsed document.
/// * `min_score` - Optional minimum acceptable Reading Ease.
#[tracing::instrument(skip(document), fields(name = document.name()))]
pub fn check_readability(
    document: &Document,
    min_score: Option<f64>,
) -> ScoreResult<ReadabilityReport> {
    let sentences = document.sentence_count();
    let words = document.word_count();
    let syllables = document.syllable_count();

    let score = reading_ease(sentences, words, syllables)?;
    let grade = kincaid_grade(sentences, words, syllables)?;
    let below_min = min_score.is_some_and(|min| score < min);

    tracing::debug!(sentences, words, syllables, score, grade, "scored document");

    Ok(ReadabilityReport {
        name: document.name().to_string(),
        score,
        level: ReadingLevel::from_score(score),
        grade,
        sentences,
        words,
        unique_words: document.unique_words().len(),
        syllables,
        min_score,
        below_min,
    })
}
