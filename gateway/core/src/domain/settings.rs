// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Gateway Settings
//!
//! Immutable, per-gateway-instance configuration:
//! - Broker connection target (host, port, plaintext vs TLS, CA certificate)
//! - The single command this gateway instance performs
//! - Defaults merged into invocations (BPMN process id, FailJob retries)
//! - Optional bearer token for the credential hook
//!
//! Settings arrive from the host as an untyped record and go through the same
//! field coercion as invocation inputs. A YAML file with discovery and
//! environment overrides is supported for hosts that run from the CLI.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Gateway configuration and its sources

use crate::domain::coercion::{Field, FieldMap, FieldReader};
use crate::domain::command::Command;
use crate::domain::defaults::CommandDefaults;
use crate::domain::error::{ConfigurationError, ValidationError};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};

/// Setting keys as they appear in the host's settings record
pub mod keys {
    use crate::domain::coercion::Field;

    pub const BROKER_HOST: Field = Field::new("zeebeBrokerHost");
    pub const BROKER_PORT: Field = Field::new("zeebeBrokerPort");
    pub const COMMAND: Field = Field::new("command");
    pub const USE_PLAIN_TEXT_CONNECTION: Field = Field::new("usePlainTextConnection");
    pub const CA_CERTIFICATE_PATH: Field = Field::new("caCertificatePath");
    pub const FAIL_JOB_RETRIES: Field = Field::new("failJobRetries");
    pub const BPMN_PROCESS_ID: Field = Field::with_aliases("bpmnProcessId", &["bpmnProcessID"]);
    pub const AUTHORIZATION_TOKEN: Field = Field::new("authorizationToken");
}

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "ZEEBE_ACTIVITY_CONFIG";

/// Environment variables that override individual settings
const ENV_OVERRIDES: &[(&str, Field)] = &[
    ("ZEEBE_BROKER_HOST", keys::BROKER_HOST),
    ("ZEEBE_BROKER_PORT", keys::BROKER_PORT),
    ("ZEEBE_AUTH_TOKEN", keys::AUTHORIZATION_TOKEN),
];

/// Everything needed to open the Remote Operation Client connection
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub broker_host: String,
    pub broker_port: u16,
    pub use_plain_text_connection: bool,
    pub ca_certificate_path: Option<PathBuf>,
    pub authorization_token: Option<String>,
}

impl ConnectionSettings {
    /// `host:port` of the broker gateway
    pub fn address(&self) -> String {
        format!("{}:{}", self.broker_host, self.broker_port)
    }

    /// Endpoint URI with a scheme matching the transport security
    pub fn endpoint_uri(&self) -> String {
        let scheme = if self.use_plain_text_connection { "http" } else { "https" };
        format!("{}://{}", scheme, self.address())
    }
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("broker_host", &self.broker_host)
            .field("broker_port", &self.broker_port)
            .field("use_plain_text_connection", &self.use_plain_text_connection)
            .field("ca_certificate_path", &self.ca_certificate_path)
            .field(
                "authorization_token",
                &self.authorization_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Validated gateway configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewaySettings {
    pub connection: ConnectionSettings,
    pub command: Command,
    pub defaults: CommandDefaults,
}

impl GatewaySettings {
    /// Coerce settings from the host's untyped settings record
    ///
    /// Host, port and command are mandatory. An unrecognized command is
    /// rejected here so a misconfigured gateway never reaches `Ready`.
    pub fn from_map(values: &FieldMap) -> Result<Self, ConfigurationError> {
        let reader = FieldReader::new(values);

        let broker_host = reader.required_string(keys::BROKER_HOST)?;
        let port = reader.required_int64(keys::BROKER_PORT)?;
        let broker_port = u16::try_from(port)
            .ok()
            .filter(|p| *p > 0)
            .ok_or_else(|| ConfigurationError::InvalidSetting {
                field: keys::BROKER_PORT.name,
                reason: format!("{} is not a valid TCP port", port),
            })?;
        let command = reader.required_string(keys::COMMAND)?.parse::<Command>()?;

        let connection = ConnectionSettings {
            broker_host,
            broker_port,
            use_plain_text_connection: reader.bool(keys::USE_PLAIN_TEXT_CONNECTION)?.unwrap_or(false),
            ca_certificate_path: reader
                .string(keys::CA_CERTIFICATE_PATH)?
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            authorization_token: reader
                .string(keys::AUTHORIZATION_TOKEN)?
                .filter(|t| !t.is_empty()),
        };

        let defaults = CommandDefaults {
            bpmn_process_id: reader.string(keys::BPMN_PROCESS_ID)?.filter(|id| !id.is_empty()),
            fail_job_retries: reader.int32(keys::FAIL_JOB_RETRIES)?,
        };

        Ok(Self {
            connection,
            command,
            defaults,
        })
    }

    /// Render back into a settings record; the token is never echoed
    pub fn to_map(&self) -> FieldMap {
        let mut values = FieldMap::new();
        values.insert(keys::BROKER_HOST.name.into(), Value::from(self.connection.broker_host.clone()));
        values.insert(keys::BROKER_PORT.name.into(), Value::from(self.connection.broker_port));
        values.insert(keys::COMMAND.name.into(), Value::from(self.command.as_str()));
        values.insert(
            keys::USE_PLAIN_TEXT_CONNECTION.name.into(),
            Value::from(self.connection.use_plain_text_connection),
        );
        if let Some(path) = &self.connection.ca_certificate_path {
            values.insert(
                keys::CA_CERTIFICATE_PATH.name.into(),
                Value::from(path.display().to_string()),
            );
        }
        if self.connection.authorization_token.is_some() {
            values.insert(keys::AUTHORIZATION_TOKEN.name.into(), Value::from("<redacted>"));
        }
        if let Some(id) = &self.defaults.bpmn_process_id {
            values.insert(keys::BPMN_PROCESS_ID.name.into(), Value::from(id.clone()));
        }
        if let Some(retries) = self.defaults.fail_job_retries {
            values.insert(keys::FAIL_JOB_RETRIES.name.into(), Value::from(retries));
        }
        values
    }

    /// Parse a YAML settings document (no environment overrides)
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigurationError> {
        Self::from_map(&parse_yaml_record(yaml)?)
    }

    /// Load settings from a YAML file, applying environment overrides
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigurationError::Load(format!("cannot read {}: {}", path.display(), e))
        })?;
        let mut values = parse_yaml_record(&content)?;
        apply_overrides(&mut values, |name| std::env::var(name).ok());
        Self::from_map(&values)
    }

    /// First existing settings file, if any
    ///
    /// Checked in turn: the file named by `ZEEBE_ACTIVITY_CONFIG`,
    /// `zeebe-activity.yaml` in the working directory, the user's
    /// `~/.zeebe-activity/config.yaml`, then the system-wide file
    /// (`/etc/zeebe-activity/config.yaml`, or under `C:\ProgramData` on Windows).
    pub fn discover_config() -> Option<PathBuf> {
        config_candidates(
            std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from),
            dirs::home_dir(),
        )
        .into_iter()
        .find(|candidate| candidate.is_file())
    }

    /// Load from an explicit path, else from the discovered file
    ///
    /// There is no fallback to defaults: host, port and command must come
    /// from somewhere.
    pub fn load(cli_path: Option<PathBuf>) -> Result<Self, ConfigurationError> {
        if let Some(path) = cli_path {
            tracing::info!("Loading gateway settings from explicit path: {:?}", path);
            return Self::from_yaml_file(&path);
        }

        match Self::discover_config() {
            Some(path) => {
                tracing::info!("Loading gateway settings from discovered path: {:?}", path);
                Self::from_yaml_file(&path)
            }
            None => Err(ConfigurationError::Load(
                "no configuration file found in standard locations".to_string(),
            )),
        }
    }
}

/// Settings file locations in lookup order
fn config_candidates(env_path: Option<PathBuf>, home: Option<PathBuf>) -> Vec<PathBuf> {
    let system = if cfg!(windows) {
        PathBuf::from(r"C:\ProgramData\ZeebeActivity\config.yaml")
    } else {
        PathBuf::from("/etc/zeebe-activity/config.yaml")
    };

    env_path
        .into_iter()
        .chain(Some(PathBuf::from("zeebe-activity.yaml")))
        .chain(home.map(|h| h.join(".zeebe-activity").join("config.yaml")))
        .chain(Some(system))
        .collect()
}

fn parse_yaml_record(yaml: &str) -> Result<FieldMap, ConfigurationError> {
    let value: Value = serde_yaml::from_str(yaml)
        .map_err(|e| ConfigurationError::Load(format!("invalid YAML: {}", e)))?;
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(FieldMap::new()),
        _ => Err(ConfigurationError::Load(
            "settings document must be a mapping".to_string(),
        )),
    }
}

/// Overlay environment-provided values onto a settings record
fn apply_overrides(values: &mut FieldMap, lookup: impl Fn(&str) -> Option<String>) {
    for (variable, field) in ENV_OVERRIDES {
        if let Some(value) = lookup(variable).filter(|v| !v.is_empty()) {
            tracing::info!("Environment override: {} -> {}", variable, field.name);
            values.insert(field.name.to_string(), Value::String(value));
        }
    }
}

impl From<ValidationError> for ConfigurationError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingField { field } => ConfigurationError::MissingSetting { field },
            ValidationError::TypeMismatch { field, expected, found } => {
                ConfigurationError::InvalidSetting {
                    field,
                    reason: format!("expected {}, got {}", expected, found),
                }
            }
            ValidationError::InvalidValue { field, reason } => {
                ConfigurationError::InvalidSetting { field, reason }
            }
        }
    }
}
