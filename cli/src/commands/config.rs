// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate, generate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use zeebe_activity_core::domain::settings::{GatewaySettings, CONFIG_PATH_ENV};

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show resolved gateway settings
    Show {
        /// Show config file paths checked
        #[arg(long)]
        paths: bool,
    },

    /// Validate a settings file without connecting
    Validate {
        /// Path to config file (default: discover)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Generate a sample settings file
    Generate {
        /// Output path
        #[arg(short, long, default_value = "./zeebe-activity.yaml")]
        output: PathBuf,
    },
}

pub async fn handle_command(
    command: ConfigCommand,
    config_override: Option<PathBuf>,
) -> Result<()> {
    match command {
        ConfigCommand::Show { paths } => show(config_override, paths),
        ConfigCommand::Validate { file } => validate(file.or(config_override)),
        ConfigCommand::Generate { output } => generate(output),
    }
}

fn show(config_override: Option<PathBuf>, show_paths: bool) -> Result<()> {
    if show_paths {
        println!("{}", "Configuration discovery paths:".bold());
        if let Some(path) = &config_override {
            println!("  1. --config flag: {}", path.display());
        } else {
            println!("  1. --config flag: {}", "(not set)".dimmed());
        }
        println!(
            "  2. {}: {}",
            CONFIG_PATH_ENV,
            std::env::var(CONFIG_PATH_ENV)
                .unwrap_or_else(|_| "(not set)".to_string())
                .dimmed()
        );
        println!("  3. ./zeebe-activity.yaml");
        println!("  4. ~/.zeebe-activity/config.yaml");
        println!("  5. /etc/zeebe-activity/config.yaml");
        println!();
    }

    let settings =
        GatewaySettings::load(config_override).context("Failed to load gateway settings")?;

    println!("{}", "Current configuration:".bold());
    println!();
    let rendered = serde_yaml::to_string(&settings.to_map())
        .context("Failed to render gateway settings")?;
    print!("{}", rendered);

    Ok(())
}

fn validate(config_path: Option<PathBuf>) -> Result<()> {
    println!("Validating configuration...");

    let settings =
        GatewaySettings::load(config_path).context("Configuration validation failed")?;

    println!(
        "{}",
        format!(
            "✓ Configuration is valid ({} against {})",
            settings.command,
            settings.connection.address()
        )
        .green()
    );

    Ok(())
}

fn generate(output: PathBuf) -> Result<()> {
    let sample = include_str!("../../templates/config-minimal.yaml");

    std::fs::write(&output, sample)
        .with_context(|| format!("Failed to write config to {:?}", output))?;

    println!(
        "{}",
        format!("✓ Configuration generated: {}", output.display()).green()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_template_is_valid() {
        let settings =
            GatewaySettings::from_yaml_str(include_str!("../../templates/config-minimal.yaml"))
                .unwrap();
        assert_eq!(settings.connection.broker_port, 26500);
        assert_eq!(settings.defaults.fail_job_retries, Some(3));
    }

    #[test]
    fn test_generate_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("zeebe-activity.yaml");

        generate(output.clone()).unwrap();

        assert!(GatewaySettings::from_yaml_file(&output).is_ok());
    }
}
