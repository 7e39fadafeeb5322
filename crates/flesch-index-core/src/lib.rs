//! Core library for flesch-index.
//!
//! This crate provides the readability pipeline used by the `flesch-index`
//! CLI and any downstream consumers: characters are classified, segmented
//! into sentences and words, counted for syllables, and scored with the
//! Flesch Reading Ease and Flesch-Kincaid Grade Level formulas.
//!
//! # Modules
//!
//! - [`classify`] - Character classes
//! - [`tokens`] - Classified character sequences
//! - [`text`] - Sentence and word segmentation
//! - [`syllables`] - Syllable estimation
//! - [`document`] - Parsed documents and aggregate counts
//! - [`readability`] - Reading Ease, Grade Level and reading bands
//! - [`analysis`] - Syllable distributions backing the charts
//! - [`chart`] - PNG chart rendering
//! - [`markdown`] - Markdown-to-prose stripping
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use flesch_index_core::Document;
//!
//! let doc = Document::parse("Carrots are healthy. My name is Bob!", None);
//! assert_eq!(doc.sentence_count(), 2);
//! assert_eq!(doc.word_count(), 7);
//! println!("Reading Ease: {:.2}", doc.score().unwrap());
//! ```
#![deny(unsafe_code)]

pub mod analysis;
pub mod chart;
pub mod classify;
pub mod config;
pub mod document;
pub mod error;
pub mod markdown;
pub mod readability;
pub mod syllables;
pub mod text;
pub mod tokens;

pub use classify::CharClass;
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel, MarkdownPolicy, SourceKind};
pub use document::{Document, SentenceRef, WordRef};
pub use error::{
    ChartError, ChartResult, ConfigError, ConfigResult, DocumentError, DocumentResult,
    ScoreError, ScoreResult,
};
pub use readability::{ReadabilityReport, ReadingLevel};
pub use tokens::ClassifiedChar;

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
