//! Character-to-syllable ratios of unique words.

use std::collections::BTreeMap;

use crate::document::Document;

use super::reports::{SyllableRatioReport, WordRatio};

/// Compute the character-to-syllable ratio of every unique word.
#[tracing::instrument(skip_all, fields(name = document.name()))]
pub fn analyze_syllable_ratios(document: &Document) -> SyllableRatioReport {
    let words: Vec<WordRatio> = document
        .unique_words()
        .iter()
        .map(|word| {
            let characters = word.len();
            let syllables = word.syllables();
            WordRatio {
                word: word.text(),
                characters,
                syllables,
                ratio: characters as f64 / syllables as f64,
            }
        })
        .collect();

    let mut histogram = BTreeMap::new();
    for w in &words {
        // Ratios are positive, so truncation is the floor.
        *histogram.entry(w.ratio as usize).or_insert(0) += 1;
    }

    let mean = if words.is_empty() {
        0.0
    } else {
        words.iter().map(|w| w.ratio).sum::<f64>() / words.len() as f64
    };

    SyllableRatioReport {
        words,
        histogram,
        mean,
    }
}
