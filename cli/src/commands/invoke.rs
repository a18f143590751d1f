// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Single invocation against the configured Zeebe gateway

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::warn;

use zeebe_activity_core::application::ActivityGateway;
use zeebe_activity_core::domain::coercion::FieldMap;
use zeebe_activity_core::domain::envelope::InvocationOutput;
use zeebe_activity_core::domain::settings::GatewaySettings;
use zeebe_activity_core::infrastructure::ZeebeConnector;

#[derive(Args)]
pub struct InvokeArgs {
    /// Invocation input: a JSON object, or @FILE to read one from a file
    #[arg(short, long, value_name = "JSON|@FILE", default_value = "{}")]
    pub input: String,

    /// Print the envelope on a single line
    #[arg(long)]
    pub compact: bool,
}

pub async fn execute(args: InvokeArgs, config_override: Option<PathBuf>) -> Result<()> {
    let input = parse_input(&args.input)?;
    let settings =
        GatewaySettings::load(config_override).context("Failed to load gateway settings")?;

    let gateway = ActivityGateway::connect(settings, &ZeebeConnector::new())
        .await
        .context("Failed to connect to Zeebe gateway")?;

    let outcome = gateway.invoke(&input).await;

    if let Err(e) = gateway.close().await {
        warn!("{}", e);
    }

    match outcome {
        Ok(output) => print_envelope(&output, args.compact),
        Err(failure) => {
            print_envelope(&failure.output, args.compact)?;
            Err(anyhow!(failure.error).context("Invocation failed"))
        }
    }
}

/// Read the `--input` argument as a JSON object
pub fn parse_input(raw: &str) -> Result<FieldMap> {
    let text = match raw.strip_prefix('@') {
        Some(path) => read_input_file(Path::new(path))?,
        None => raw.to_string(),
    };

    let value: serde_json::Value =
        serde_json::from_str(&text).context("Invocation input is not valid JSON")?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        serde_json::Value::Null => Ok(FieldMap::new()),
        other => bail!("Invocation input must be a JSON object, got {}", other),
    }
}

fn read_input_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file {:?}", path))
}

fn print_envelope(output: &InvocationOutput, compact: bool) -> Result<()> {
    let rendered = if compact {
        serde_json::to_string(output)
    } else {
        serde_json::to_string_pretty(output)
    }
    .context("Failed to render envelope")?;
    println!("{}", rendered);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_inline_json_input() {
        let input = parse_input(r#"{"jobKey": 7, "retries": 2}"#).unwrap();
        assert_eq!(input.get("jobKey"), Some(&json!(7)));
        assert_eq!(input.len(), 2);
    }

    #[test]
    fn test_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"incidentKey": 42}}"#).unwrap();

        let input = parse_input(&format!("@{}", file.path().display())).unwrap();

        assert_eq!(input.get("incidentKey"), Some(&json!(42)));
    }

    #[test]
    fn test_non_object_input_is_rejected() {
        assert!(parse_input("[1, 2]").is_err());
        assert!(parse_input("not json").is_err());
        assert!(parse_input("@/nonexistent/input.json").is_err());
    }

    #[test]
    fn test_null_input_is_empty() {
        assert!(parse_input("null").unwrap().is_empty());
    }
}
