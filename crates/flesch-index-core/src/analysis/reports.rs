//! Report structs for extended document analysis.
//!
//! All structs derive `Serialize` and `Deserialize` for CLI JSON output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Extended analysis of a parsed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Document name.
    pub name: String,
    /// How many words have each syllable count.
    pub syllables: SyllableDistributionReport,
    /// Characters per syllable for each unique word.
    pub ratios: SyllableRatioReport,
}

// -- Syllable Distribution --------------------------------------------------

/// Number of words per syllable count.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SyllableDistributionReport {
    /// Syllable count → number of words with that many syllables.
    ///
    /// `{4: 6}` means six words have four syllables.
    pub distribution: BTreeMap<usize, usize>,
    /// Total words counted.
    pub total_words: usize,
    /// Mean syllables per word.
    pub mean: f64,
}

// -- Syllable Ratios --------------------------------------------------------

/// Character-to-syllable ratio of one unique word.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WordRatio {
    /// The word as first seen.
    pub word: String,
    /// Length in code points.
    pub characters: usize,
    /// Estimated syllables.
    pub syllables: usize,
    /// `characters / syllables`.
    pub ratio: f64,
}

/// Character-to-syllable ratios across unique words.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SyllableRatioReport {
    /// One entry per unique word, in first-occurrence order.
    pub words: Vec<WordRatio>,
    /// Whole-number ratio bucket → number of unique words in it.
    ///
    /// Bucket `n` holds ratios in `[n, n + 1)`.
    pub histogram: BTreeMap<usize, usize>,
    /// Mean ratio over unique words.
    pub mean: f64,
}
