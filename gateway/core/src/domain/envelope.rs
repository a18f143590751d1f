// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Invocation Envelope
//!
//! Every invocation yields `{status, result}`:
//!
//! ```json
//! { "status": "SUCCESS", "result": { "failJobResponse": { "jobKey": 7, ... } } }
//! { "status": "ERROR",   "result": "validation error: missing required field 'jobKey'" }
//! ```
//!
//! A failed invocation is reported twice: as an ERROR envelope and as a
//! [`GatewayError`]. [`InvocationFailure`] carries both so a caller can
//! inspect whichever it understands.

use crate::domain::error::GatewayError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InvocationStatus {
    Success,
    Error,
}

impl fmt::Display for InvocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvocationStatus::Success => f.write_str("SUCCESS"),
            InvocationStatus::Error => f.write_str("ERROR"),
        }
    }
}

/// The uniform output record handed back to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationOutput {
    pub status: InvocationStatus,
    pub result: serde_json::Value,
}

impl InvocationOutput {
    pub fn success(result: serde_json::Value) -> Self {
        Self {
            status: InvocationStatus::Success,
            result,
        }
    }

    /// ERROR envelope whose result is the error's display message
    pub fn error(err: &impl fmt::Display) -> Self {
        Self {
            status: InvocationStatus::Error,
            result: serde_json::Value::String(err.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == InvocationStatus::Success
    }
}

/// A failed invocation: the ERROR envelope plus the error that caused it
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct InvocationFailure {
    pub output: InvocationOutput,
    #[source]
    pub error: GatewayError,
}

impl InvocationFailure {
    pub fn new(error: GatewayError) -> Self {
        Self {
            output: InvocationOutput::error(&error),
            error,
        }
    }
}

impl From<GatewayError> for InvocationFailure {
    fn from(error: GatewayError) -> Self {
        Self::new(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ValidationError;
    use serde_json::json;

    #[test]
    fn test_status_serializes_uppercase() {
        let output = InvocationOutput::success(json!({ "k": 1 }));
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({ "status": "SUCCESS", "result": { "k": 1 } })
        );
    }

    #[test]
    fn test_failure_envelope_mirrors_error_message() {
        let failure = InvocationFailure::new(GatewayError::Validation(
            ValidationError::MissingField { field: "jobKey" },
        ));
        assert_eq!(failure.output.status, InvocationStatus::Error);
        assert_eq!(failure.output.result, json!(failure.error.to_string()));
        assert_eq!(failure.to_string(), failure.error.to_string());
    }
}
