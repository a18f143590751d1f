// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Gateway Error Taxonomy
//!
//! | Error | Raised by | Fatal for |
//! |-------|-----------|-----------|
//! | `ConfigurationError` | settings coercion, config file loading | construction |
//! | `ValidationError` | input coercion, request validation | one invocation (no remote call issued) |
//! | `GatewayError::UnknownCommand` | router | one invocation, never retried |
//! | `GatewayError::CommandMismatch` | typed execution of another command | one invocation, never retried |
//! | `GatewayError::Connection` | engine connector | construction |
//! | `GatewayError::RemoteCall` | engine client during an invocation | one invocation |
//! | `GatewayError::Teardown` | gateway close | nothing (teardown still completes) |
//!
//! Remote failures keep the engine's message verbatim; the gateway adds no
//! interpretation and performs no retries of its own.

use crate::domain::command::{Command, UnknownCommand};
use crate::domain::engine::EngineError;
use crate::domain::gateway_state::GatewayState;

/// A required input field is absent, mistyped, or semantically invalid
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("field '{field}' has wrong type: expected {expected}, got {found}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("field '{field}' is invalid: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl ValidationError {
    /// Name of the offending input field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField { field }
            | ValidationError::TypeMismatch { field, .. }
            | ValidationError::InvalidValue { field, .. } => field,
        }
    }
}

/// Gateway settings are missing, malformed, or name an unknown command
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("missing required setting '{field}'")]
    MissingSetting { field: &'static str },

    #[error("setting '{field}' is invalid: {reason}")]
    InvalidSetting { field: &'static str, reason: String },

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("failed to load configuration: {0}")]
    Load(String),
}

impl From<UnknownCommand> for ConfigurationError {
    fn from(err: UnknownCommand) -> Self {
        ConfigurationError::UnknownCommand(err.0)
    }
}

/// Umbrella error returned by gateway construction, invocation and teardown
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("gateway is configured for {configured}, cannot run {requested}")]
    CommandMismatch {
        configured: Command,
        requested: Command,
    },

    #[error("connection error: {0}")]
    Connection(#[source] EngineError),

    #[error(transparent)]
    RemoteCall(EngineError),

    #[error("teardown error: {0}")]
    Teardown(#[source] EngineError),

    #[error("gateway is not ready (state: {0})")]
    NotReady(GatewayState),

    #[error("failed to encode {command} result: {reason}")]
    ResultEncoding { command: Command, reason: String },
}

impl GatewayError {
    /// Whether a host may reasonably re-issue the same invocation
    ///
    /// Only transient transport failures of an already-sent remote call
    /// qualify. Misconfiguration and invalid input never do.
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::RemoteCall(err) => err.is_transient(),
            _ => false,
        }
    }

    /// Stable, machine-readable name of the error class
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Configuration(_) => "ConfigurationError",
            GatewayError::Validation(_) => "ValidationError",
            GatewayError::UnknownCommand(_) => "UnknownCommandError",
            GatewayError::CommandMismatch { .. } => "CommandMismatchError",
            GatewayError::Connection(_) => "ConnectionError",
            GatewayError::RemoteCall(_) => "RemoteCallError",
            GatewayError::Teardown(_) => "TeardownError",
            GatewayError::NotReady(_) => "NotReadyError",
            GatewayError::ResultEncoding { .. } => "ResultEncodingError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::engine::RemoteStatus;

    #[test]
    fn test_unknown_command_is_never_retryable() {
        let err = GatewayError::UnknownCommand("Deploy".to_string());
        assert!(!err.is_retryable());
        assert_eq!(err.kind(), "UnknownCommandError");
    }

    #[test]
    fn test_remote_call_keeps_engine_message() {
        let err = GatewayError::RemoteCall(EngineError::Rejected {
            status: RemoteStatus::NotFound,
            message: "Expected to find process definition with process ID 'P9', but none found"
                .to_string(),
        });
        assert_eq!(
            err.to_string(),
            "NOT_FOUND: Expected to find process definition with process ID 'P9', but none found"
        );
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_transient_remote_failure_is_retryable() {
        let err = GatewayError::RemoteCall(EngineError::Rejected {
            status: RemoteStatus::Unavailable,
            message: "broker is not ready".to_string(),
        });
        assert!(err.is_retryable());
    }

    #[test]
    fn test_validation_error_names_field() {
        let err = ValidationError::MissingField { field: "jobKey" };
        assert_eq!(err.field(), "jobKey");
        assert!(GatewayError::from(err).to_string().contains("jobKey"));
    }
}
