//! `quorum`: replay approval scenarios against an in-memory engine.

mod config;
mod scenario;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use quorum_engine::ApprovalEngine;
use quorum_store_memory::{MemoryInstanceRepo, MemoryTemplateRepo};
use tracing::info;

use crate::config::{AppConfig, LogPreset, Overrides};
use crate::scenario::{Scenario, VoteResult, replay};

#[derive(Debug, Parser)]
#[command(name = "quorum", version, about = "Quorum approval workflow engine")]
struct Cli {
    /// Configuration file (defaults to ./quorum.toml when present)
    #[arg(long, short, global = true, env = "QUORUM_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter, overriding the configuration (e.g. `debug`, `quorum_engine=trace`)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Start from a named logger setup instead of the built-in defaults
    #[arg(long, global = true, value_enum)]
    log_preset: Option<LogPreset>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay a scenario file and print the final instances as JSON
    Run {
        /// Scenario TOML file
        scenario: PathBuf,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&Overrides {
        config_file: cli.config.clone(),
        log_level: cli.log_level.clone(),
        log_preset: cli.log_preset,
    })?;

    match cli.command {
        Command::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        Command::Run { scenario } => {
            let _log = quorum_log::init_with(config.log.clone())?;
            run(&config, &scenario).await
        }
    }
}

async fn run(config: &AppConfig, path: &Path) -> anyhow::Result<()> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading scenario {}", path.display()))?;
    let scenario = Scenario::parse(&text)?;

    let engine = ApprovalEngine::new(
        Arc::new(MemoryTemplateRepo::new()),
        Arc::new(MemoryInstanceRepo::new()),
    )
    .with_config(config.engine.clone());

    info!(
        templates = scenario.templates.len(),
        instances = scenario.instances.len(),
        votes = scenario.votes.len(),
        "replaying scenario"
    );
    let report = replay(&engine, &scenario).await?;

    for line in &report.votes {
        if let VoteResult::Refused { kind, error } = &line.result {
            eprintln!(
                "vote by {} on {} refused ({kind}): {error}",
                line.approver, line.instance
            );
        }
    }
    info!(refused = report.refused(), "scenario finished");
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
