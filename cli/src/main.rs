// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Zeebe Activity CLI
//!
//! The `zeebe-activity` binary is a minimal host for the activity gateway:
//! it loads gateway settings, connects to the Zeebe gateway, evaluates one
//! invocation and prints the `{status, result}` envelope on stdout.
//!
//! ## Commands
//!
//! - `zeebe-activity invoke --input <JSON|@FILE>` - Run the configured command once
//! - `zeebe-activity config show|validate|generate` - Configuration management
//! - `zeebe-activity commands` - List supported commands
//!
//! Logs go to stderr so stdout carries only the envelope.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use zeebe_activity::commands::{self, ConfigCommand, InvokeArgs};

/// Zeebe Activity - drive a Zeebe process engine from the command line
#[derive(Parser)]
#[command(name = "zeebe-activity")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        long,
        global = true,
        env = "ZEEBE_ACTIVITY_LOG_LEVEL",
        default_value = "info"
    )]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the configured command once
    #[command(name = "invoke")]
    Invoke(InvokeArgs),

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// List supported commands and their required inputs
    #[command(name = "commands")]
    Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Invoke(args) => commands::invoke::execute(args, cli.config).await,
        Commands::Config { command } => {
            commands::config::handle_command(command, cli.config).await
        }
        Commands::Commands => {
            commands::catalog::list();
            Ok(())
        }
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    Ok(())
}
