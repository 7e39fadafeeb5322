//! Extended document analysis.
//!
//! Builds the distributions that back the chart artifacts, orchestrated by
//! [`run_analysis`]. Each feature is a pure function over a parsed
//! [`Document`] in its own module.

pub mod reports;
pub mod syllable_distribution;
pub mod syllable_ratios;

pub use reports::{AnalysisReport, SyllableDistributionReport, SyllableRatioReport, WordRatio};

use crate::document::Document;

/// Run every analysis over a parsed document.
#[tracing::instrument(skip_all, fields(name = document.name()))]
pub fn run_analysis(document: &Document) -> AnalysisReport {
    AnalysisReport {
        name: document.name().to_string(),
        syllables: syllable_distribution::analyze_syllable_distribution(document),
        ratios: syllable_ratios::analyze_syllable_ratios(document),
    }
}
