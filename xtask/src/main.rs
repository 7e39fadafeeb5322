//! Developer tasks: shell completions and man pages for `flesch-index`.
//!
//! Run with `cargo run -p xtask -- <task>`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "xtask", about = "flesch-index development tasks")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate shell completion scripts
    Completions {
        /// Output directory
        #[arg(long, default_value = "target/completions")]
        out: PathBuf,
        /// Only generate for this shell (default: all)
        #[arg(long, value_enum)]
        shell: Option<Shell>,
    },
    /// Generate man pages for the CLI and its subcommands
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out: PathBuf,
    },
}

const BIN_NAME: &str = "flesch-index";

fn main() -> anyhow::Result<()> {
    match Xtask::parse().task {
        Task::Completions { out, shell } => completions(&out, shell),
        Task::Man { out } => man(&out),
    }
}

fn completions(out: &Path, shell: Option<Shell>) -> anyhow::Result<()> {
    fs::create_dir_all(out).with_context(|| format!("failed to create {}", out.display()))?;

    let shells = match shell {
        Some(shell) => vec![shell],
        None => vec![
            Shell::Bash,
            Shell::Elvish,
            Shell::Fish,
            Shell::PowerShell,
            Shell::Zsh,
        ],
    };

    let mut cmd = flesch_index::command();
    for shell in shells {
        let path = clap_complete::generate_to(shell, &mut cmd, BIN_NAME, out)
            .with_context(|| format!("failed to generate {shell} completions"))?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn man(out: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(out).with_context(|| format!("failed to create {}", out.display()))?;

    let cmd = flesch_index::command();
    write_man_page(&cmd, BIN_NAME, out)?;
    for sub in cmd.get_subcommands().filter(|s| s.get_name() != "help") {
        let name = format!("{BIN_NAME}-{}", sub.get_name());
        write_man_page(sub, &name, out)?;
    }
    Ok(())
}

fn write_man_page(cmd: &clap::Command, name: &str, out: &Path) -> anyhow::Result<()> {
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd.clone())
        .title(name)
        .render(&mut buffer)
        .with_context(|| format!("failed to render man page for {name}"))?;

    let path = out.join(format!("{name}.1"));
    fs::write(&path, buffer).with_context(|| format!("failed to write {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}
