//! `info`: the settings `score` runs with, after every config layer is applied.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{instrument, warn};

use flesch_index_core::chart;
use flesch_index_core::config::{Config, ConfigSources, MarkdownPolicy, SourceKind};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {}

#[derive(Serialize)]
struct Source<'a> {
    kind: SourceKind,
    path: &'a Utf8Path,
}

/// Resolved scoring environment.
#[derive(Serialize)]
struct Settings<'a> {
    name: &'static str,
    version: &'static str,
    min_score: Option<f64>,
    markdown: MarkdownPolicy,
    /// `None` means unlimited.
    input_limit: Option<usize>,
    /// `None` when no data directory exists and none is configured.
    chart_dir: Option<Utf8PathBuf>,
    log_level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<&'a Utf8Path>,
    sources: Vec<Source<'a>>,
}

impl<'a> Settings<'a> {
    fn resolve(config: &'a Config, sources: &'a ConfigSources) -> Self {
        let chart_dir = chart::chart_dir(config.chart_dir.as_deref())
            .inspect_err(|err| warn!(error = %err, "no chart directory"))
            .ok();
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            min_score: config.min_score,
            markdown: config.markdown_policy(),
            input_limit: config.input_limit(),
            chart_dir,
            log_level: config.log_level.as_str(),
            log_dir: config.log_dir.as_deref(),
            sources: sources
                .iter()
                .map(|(kind, path)| Source { kind, path })
                .collect(),
        }
    }

    fn print(&self) {
        println!("{} {}", self.name.bold(), self.version.green());

        println!("\n{}", "Scoring".bold().underline());
        let min = self
            .min_score
            .map_or_else(|| "none".dimmed().to_string(), |min| format!("{min:.2}"));
        row("min score", min);
        row("strip markdown", self.markdown.describe());
        let limit = self.input_limit.map_or_else(
            || "unlimited".yellow().to_string(),
            |bytes| format!("{bytes} bytes"),
        );
        row("input limit", limit);
        let charts = self.chart_dir.as_ref().map_or_else(
            || "unavailable".red().to_string(),
            |dir| dir.cyan().to_string(),
        );
        row("chart dir", charts);

        println!("\n{}", "Logging".bold().underline());
        row("level", self.log_level);
        if let Some(dir) = self.log_dir {
            row("directory", dir);
        }

        println!("\n{}", "Config files".bold().underline());
        if self.sources.is_empty() {
            println!("  {}", "defaults only".dimmed());
        }
        for source in &self.sources {
            let kind = match source.kind {
                SourceKind::User => "user",
                SourceKind::Project => "project",
                SourceKind::Explicit => "explicit",
            };
            println!("  {:<9}{}", kind.dimmed(), source.path);
        }
    }
}

fn row(label: &str, value: impl std::fmt::Display) {
    println!("  {:<15}{value}", format!("{label}:").dimmed());
}

/// Show the version and effective settings.
#[instrument(name = "cmd_info", skip_all)]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    let settings = Settings::resolve(config, sources);
    if global_json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
    } else {
        settings.print();
    }
    Ok(())
}
