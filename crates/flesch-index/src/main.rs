//! flesch-index CLI
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, anyhow};
use camino::Utf8PathBuf;
use clap::Parser;
use flesch_index::{Cli, Commands, commands};
use flesch_index_core::config::{Config, ConfigLoader, ConfigSources};

mod observability;

fn main() -> anyhow::Result<()> {
    let mut cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    // arg_required_else_help guarantees a subcommand past this point
    let Some(command) = cli.command.take() else {
        return Ok(());
    };

    if let Some(dir) = &cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("cannot enter {}", dir.display()))?;
    }

    let (config, sources) = load_config(cli.config.clone())?;
    let _guard = init_logging(&cli, &config)?;
    tracing::debug!(
        files = sources.iter().count(),
        chdir = ?cli.chdir,
        json = cli.json,
        "ready"
    );

    let result = match command {
        Commands::Score(args) => {
            commands::score::cmd_score(args, cli.json, &config, config.input_limit())
        }
        Commands::Info(args) => commands::info::cmd_info(args, cli.json, &config, &sources),
    };
    if let Err(err) = &result {
        tracing::error!(error = %err, "fatal error");
    }
    result
}

fn utf8(path: PathBuf, what: &str) -> anyhow::Result<Utf8PathBuf> {
    Utf8PathBuf::try_from(path)
        .map_err(|e| anyhow!("{what} is not valid UTF-8: {}", e.into_path_buf().display()))
}

/// Project search starts at the working directory; `--config` layers on top.
fn load_config(explicit: Option<PathBuf>) -> anyhow::Result<(Config, ConfigSources)> {
    let cwd = std::env::current_dir().context("cannot read the working directory")?;
    let mut loader = ConfigLoader::new().with_project_search(utf8(cwd, "working directory")?);
    if let Some(path) = explicit {
        loader = loader.with_file(utf8(path, "config path")?);
    }
    loader.load().context("failed to load configuration")
}

fn init_logging(
    cli: &Cli,
    config: &Config,
) -> anyhow::Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let targets = observability::ObservabilityConfig::from_env_with_overrides(
        config.log_dir.as_ref().map(|dir| dir.as_std_path().to_path_buf()),
    );
    let filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    observability::init_observability(&targets, filter).context("failed to initialize logging")
}
