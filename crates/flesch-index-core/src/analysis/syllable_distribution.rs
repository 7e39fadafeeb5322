//! Words-per-syllable-count distribution.

use std::collections::BTreeMap;

use crate::document::Document;

use super::reports::SyllableDistributionReport;

/// Count how many words have each syllable count.
#[tracing::instrument(skip_all, fields(name = document.name()))]
pub fn analyze_syllable_distribution(document: &Document) -> SyllableDistributionReport {
    let mut distribution = BTreeMap::new();
    let mut total_words = 0;
    let mut total_syllables = 0;

    for word in document.words() {
        let syllables = word.syllables();
        *distribution.entry(syllables).or_insert(0) += 1;
        total_words += 1;
        total_syllables += syllables;
    }

    let mean = if total_words == 0 {
        0.0
    } else {
        round2(total_syllables as f64 / total_words as f64)
    };

    SyllableDistributionReport {
        distribution,
        total_words,
        mean,
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
