//! Glint CLI
//!
//! - `glint run <scenario.json>`: drive the site headlessly and report
//! - `glint theme get|toggle|set <mode>`: inspect or change the persisted theme

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "glint")]
#[command(about = "Theme and motion tooling for the Glint site")]
#[command(version)]
struct Cli {
    /// Path to glint.toml (defaults to ./glint.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a headless JSON scenario
    Run {
        /// Scenario file
        scenario: PathBuf,

        /// Write the JSON report to this file instead of stdout
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Use the configured storage file instead of in-memory storage
        #[arg(long)]
        persist: bool,

        /// Viewport width
        #[arg(long, default_value = "1280")]
        width: f32,

        /// Viewport height
        #[arg(long, default_value = "720")]
        height: f32,

        /// Milliseconds per frame
        #[arg(long, default_value = "16")]
        tick_ms: u64,
    },

    /// Inspect or change the persisted theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
}

#[derive(Subcommand, Debug)]
enum ThemeAction {
    /// Print the mode a fresh page load would use
    Get,
    /// Flip to the other mode and persist it
    Toggle,
    /// Set the mode ("portfolio" or "kawaii")
    Set { mode: String },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Run {
            scenario,
            report,
            persist,
            width,
            height,
            tick_ms,
        } => commands::run(
            &config,
            &scenario,
            report.as_deref(),
            persist,
            glint_site::HeadlessRunConfig {
                width,
                height,
                tick_ms,
            },
        ),
        Command::Theme { action } => {
            let mode = match action {
                ThemeAction::Get => commands::theme_get(&config),
                ThemeAction::Toggle => commands::theme_toggle(&config)?,
                ThemeAction::Set { mode } => commands::theme_set(&config, &mode)?,
            };
            println!("{mode}");
            Ok(ExitCode::SUCCESS)
        }
    }
}
