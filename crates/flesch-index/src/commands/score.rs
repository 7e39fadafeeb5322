//! Score command: Flesch Reading Ease, Flesch-Kincaid Grade Level and charts.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use flesch_index_core::analysis::{self, AnalysisReport};
use flesch_index_core::chart::{self, ChartKind, WrittenChart};
use flesch_index_core::config::{Config, MarkdownPolicy};
use flesch_index_core::readability::{self, ReadabilityReport};

use super::load_document;

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// File to score.
    pub file: Utf8PathBuf,

    /// Also write syllable distribution charts.
    #[arg(long)]
    pub analysis: bool,

    /// Which charts `--analysis` writes (repeatable; default: all).
    #[arg(long = "chart", value_enum, value_name = "KIND", requires = "analysis")]
    pub charts: Vec<ChartKind>,

    /// Minimum acceptable Reading Ease; lower scores fail.
    #[arg(long)]
    pub min_score: Option<f64>,

    /// Strip markdown syntax before scoring (default for `.md` files).
    #[arg(long, conflicts_with = "no_strip_markdown")]
    pub strip_markdown: bool,

    /// Score the file as plain text, even if it is markdown.
    #[arg(long)]
    pub no_strip_markdown: bool,
}

impl ScoreArgs {
    /// Flags win over the configured policy.
    fn markdown_policy(&self, configured: MarkdownPolicy) -> MarkdownPolicy {
        if self.strip_markdown {
            MarkdownPolicy::Always
        } else if self.no_strip_markdown {
            MarkdownPolicy::Never
        } else {
            configured
        }
    }
}

#[derive(Serialize)]
struct ScoreOutput<'a> {
    #[serde(flatten)]
    report: &'a ReadabilityReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    analysis: Option<AnalysisReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    charts: Vec<WrittenChart>,
}

/// Score the readability of a file.
#[instrument(name = "cmd_score", skip_all, fields(file = %args.file))]
pub fn cmd_score(
    args: ScoreArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(
        file = %args.file,
        min_score = ?args.min_score,
        analysis = args.analysis,
        "executing score command"
    );

    let strip = args
        .markdown_policy(config.markdown_policy())
        .strips(&args.file);
    let document = load_document(&args.file, strip, max_input_bytes)?;

    let empty = document.empty_sentences();
    if !empty.is_empty() {
        warn!(sentences = ?empty, "sentences without words");
    }

    let min_score = args.min_score.or(config.min_score);
    let report = readability::check_readability(&document, min_score)
        .with_context(|| format!("cannot score {}", args.file))?;

    let (analysis, charts) = if args.analysis {
        let analysis = analysis::run_analysis(&document);
        let dir = chart::chart_dir(config.chart_dir.as_deref())?;
        let kinds = if args.charts.is_empty() {
            ChartKind::ALL.to_vec()
        } else {
            args.charts.clone()
        };
        let charts = chart::write_selected_charts(&analysis, &dir, &kinds)
            .with_context(|| format!("failed to write charts to {dir}"))?;
        (Some(analysis), charts)
    } else {
        (None, Vec::new())
    };

    if global_json {
        let output = ScoreOutput {
            report: &report,
            analysis,
            charts,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_report(&report);
        if !charts.is_empty() {
            println!();
            println!("{}", "Charts".bold().underline());
            for written in &charts {
                println!("{}: {}", written.kind.dimmed(), written.path.cyan());
            }
        }
    }

    if report.below_min {
        let min = report.min_score.unwrap_or(0.0);
        bail!(
            "{} scores {:.2} (min: {:.0}). Shorten sentences or prefer shorter words.",
            args.file,
            report.score,
            min,
        );
    }
    if !global_json && let Some(min) = report.min_score {
        println!(
            "{} {} scores {:.2} (min: {:.0})",
            "PASS:".green(),
            args.file,
            report.score,
            min,
        );
    }

    Ok(())
}

fn print_report(report: &ReadabilityReport) {
    println!("{}: {}", "Document".dimmed(), report.name.bold());
    let score = format!("{:.2}", report.score);
    let score = if report.score >= 60.0 {
        score.green().to_string()
    } else if report.score >= 30.0 {
        score.yellow().to_string()
    } else {
        score.red().to_string()
    };
    println!("{}: {}", "Flesch Reading Ease Score".dimmed(), score);
    println!("{}: {}", "Readability".dimmed(), report.level);
    println!(
        "{}: {:.2}",
        "Flesch–Kincaid Grade Level".dimmed(),
        report.grade
    );
    debug!(
        sentences = report.sentences,
        words = report.words,
        unique_words = report.unique_words,
        syllables = report.syllables,
        "document counts"
    );
}
