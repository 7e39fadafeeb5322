//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;
use flesch_index_core::Document;

pub mod info;
pub mod score;

/// Load and parse an input file, checking its size against the configured limit.
///
/// With `strip_markdown`, the file is reduced to prose before segmenting.
pub fn load_document(
    path: &Utf8Path,
    strip_markdown: bool,
    max_bytes: Option<usize>,
) -> anyhow::Result<Document> {
    let document = if strip_markdown {
        Document::from_markdown_file(path, max_bytes)
    } else {
        Document::from_file(path, max_bytes)
    };
    document.context("failed to load document")
}
