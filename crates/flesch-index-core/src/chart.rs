//! PNG bar charts of analysis distributions.
//!
//! Charts are written as `<dir>/<source stem>-<kind>.png`, where `<dir>` is the
//! configured chart directory or `charts/` under the user data directory.
//! Bars are drawn in key order, one per bin, scaled to the tallest bin.

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisReport;
use crate::config;
use crate::document::UNNAMED;
use crate::error::{ChartError, ChartResult};

const WIDTH: u32 = 600;
const HEIGHT: u32 = 360;
const MARGIN: u32 = 40;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([40, 40, 40]);
const BAR: Rgb<u8> = Rgb([31, 119, 180]);

/// Which distribution a chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ChartKind {
    /// Word count per syllable count.
    Syllables,
    /// Unique words per character-to-syllable ratio bucket.
    Ratios,
}

impl ChartKind {
    /// Every chart kind, in output order.
    pub const ALL: [Self; 2] = [Self::Syllables, Self::Ratios];

    /// File-name suffix for this kind.
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Syllables => "syllables",
            Self::Ratios => "ratios",
        }
    }

    fn bins(self, report: &AnalysisReport) -> &BTreeMap<usize, usize> {
        match self {
            Self::Syllables => &report.syllables.distribution,
            Self::Ratios => &report.ratios.histogram,
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.suffix())
    }
}

/// A chart written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenChart {
    /// What the chart shows.
    pub kind: ChartKind,
    /// Where it was written.
    pub path: Utf8PathBuf,
}

/// Resolve the chart output directory.
///
/// Uses `configured` when set, otherwise `charts/` under the user data directory.
pub fn chart_dir(configured: Option<&Utf8Path>) -> ChartResult<Utf8PathBuf> {
    if let Some(dir) = configured {
        return Ok(dir.to_path_buf());
    }
    config::user_data_dir()
        .map(|dir| dir.join("charts"))
        .ok_or(ChartError::NoDataDir)
}

/// Path of the `kind` chart for a source file.
///
/// Only the file stem of `source_name` is used, so charts for files in
/// different directories with the same name overwrite each other.
pub fn chart_path(dir: &Utf8Path, source_name: &str, kind: ChartKind) -> Utf8PathBuf {
    let stem = Utf8Path::new(source_name)
        .file_stem()
        .filter(|s| !s.is_empty())
        .unwrap_or(UNNAMED);
    dir.join(format!("{stem}-{}.png", kind.suffix()))
}

/// Create the output directory and any missing parents.
pub fn ensure_output_dir(dir: &Utf8Path) -> ChartResult<()> {
    std::fs::create_dir_all(dir.as_std_path()).map_err(|source| ChartError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Draw a bar chart of `bins` and save it as a PNG at `path`.
#[tracing::instrument(skip(bins), fields(bins = bins.len()))]
pub fn render_bar_chart(bins: &BTreeMap<usize, usize>, path: &Utf8Path) -> ChartResult<()> {
    let tallest = bins.values().copied().max().unwrap_or(0);
    if tallest == 0 {
        return Err(ChartError::EmptyDistribution);
    }

    let mut image = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);

    let plot_width = WIDTH - 2 * MARGIN;
    let plot_height = HEIGHT - 2 * MARGIN;
    let baseline = (HEIGHT - MARGIN) as f32;
    let slot = (plot_width / bins.len() as u32).max(1);
    let bar_width = (slot * 7 / 10).max(1);

    for (i, &count) in bins.values().enumerate() {
        let height = (count as u64 * u64::from(plot_height) / tallest as u64) as u32;
        if height == 0 {
            continue;
        }
        let x = MARGIN + i as u32 * slot + (slot - bar_width) / 2;
        let y = HEIGHT - MARGIN - height;
        draw_filled_rect_mut(
            &mut image,
            Rect::at(x as i32, y as i32).of_size(bar_width, height),
            BAR,
        );
    }

    let left = MARGIN as f32;
    let right = (WIDTH - MARGIN) as f32;
    let top = MARGIN as f32;
    draw_line_segment_mut(&mut image, (left, baseline), (right, baseline), AXIS);
    draw_line_segment_mut(&mut image, (left, top), (left, baseline), AXIS);

    image.save(path.as_std_path()).map_err(|source| ChartError::Save {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(%path, "chart written");
    Ok(())
}

/// Render every chart for `report` into `dir`.
///
/// Kinds with nothing to draw are skipped.
pub fn write_charts(report: &AnalysisReport, dir: &Utf8Path) -> ChartResult<Vec<WrittenChart>> {
    write_selected_charts(report, dir, &ChartKind::ALL)
}

/// Render the `kinds` charts for `report` into `dir`, in the order given.
#[tracing::instrument(skip(report), fields(name = %report.name))]
pub fn write_selected_charts(
    report: &AnalysisReport,
    dir: &Utf8Path,
    kinds: &[ChartKind],
) -> ChartResult<Vec<WrittenChart>> {
    ensure_output_dir(dir)?;

    let mut written = Vec::new();
    for &kind in kinds {
        let bins = kind.bins(report);
        if bins.is_empty() {
            tracing::warn!(%kind, "nothing to chart");
            continue;
        }
        let path = chart_path(dir, &report.name, kind);
        render_bar_chart(bins, &path)?;
        written.push(WrittenChart { kind, path });
    }

    Ok(written)
}
