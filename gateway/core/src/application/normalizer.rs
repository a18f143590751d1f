// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Output Normalizer
//!
//! Wraps a handler outcome in the `{status, result}` envelope. Success puts
//! the command's result mapping under its response key; failure puts the
//! error message in `result` and returns the error alongside.

use crate::domain::envelope::{InvocationFailure, InvocationOutput};
use crate::domain::error::GatewayError;
use crate::domain::result::CommandResult;
use serde_json::{Map, Value};
use tracing::warn;

pub struct OutputNormalizer;

impl OutputNormalizer {
    pub fn normalize(
        outcome: Result<CommandResult, GatewayError>,
    ) -> Result<InvocationOutput, InvocationFailure> {
        match outcome.and_then(Self::wrap) {
            Ok(result) => Ok(InvocationOutput::success(result)),
            Err(err) => {
                warn!(
                    error_kind = err.kind(),
                    retryable = err.is_retryable(),
                    "Invocation failed: {}",
                    err
                );
                Err(InvocationFailure::new(err))
            }
        }
    }

    fn wrap(result: CommandResult) -> Result<Value, GatewayError> {
        let command = result.command();
        let value = result
            .to_value()
            .map_err(|e| GatewayError::ResultEncoding {
                command,
                reason: e.to_string(),
            })?;
        let mut wrapped = Map::new();
        wrapped.insert(command.response_key().to_string(), value);
        Ok(Value::Object(wrapped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::envelope::InvocationStatus;
    use crate::domain::error::ValidationError;
    use crate::domain::result::ResolveIncidentResult;
    use serde_json::json;

    #[test]
    fn test_success_is_keyed_by_response_name() {
        let output = OutputNormalizer::normalize(Ok(CommandResult::ResolveIncident(
            ResolveIncidentResult {
                incident_key: 42,
                resolve_incident_response_text: "ResolveIncidentResponse".to_string(),
            },
        )))
        .unwrap();
        assert_eq!(output.status, InvocationStatus::Success);
        assert_eq!(
            output.result,
            json!({
                "resolveIncidentResponse": {
                    "incidentKey": 42,
                    "resolveIncidentResponseText": "ResolveIncidentResponse",
                }
            })
        );
    }

    #[test]
    fn test_failure_carries_message_and_error() {
        let failure = OutputNormalizer::normalize(Err(GatewayError::Validation(
            ValidationError::MissingField {
                field: "messageName",
            },
        )))
        .unwrap_err();
        assert_eq!(failure.output.status, InvocationStatus::Error);
        assert_eq!(
            failure.output.result,
            json!("validation error: missing required field 'messageName'")
        );
        assert!(matches!(failure.error, GatewayError::Validation(_)));
    }
}
