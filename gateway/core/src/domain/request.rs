// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Command Requests
//!
//! One strongly typed request per command, gathered in the tagged
//! [`CommandRequest`] union. Hosts with typed data can build or deserialize a
//! `CommandRequest` directly (`{"command": "FailJob", "input": {...}}`);
//! hosts that hand over an untyped record go through
//! [`CommandRequest::decode`], which applies field coercion.
//!
//! Requiredness is enforced in one place, the `resolve` step of each request,
//! which also merges configured defaults and produces the value sent to the
//! engine. Numeric keys `<= 0` and empty strings count as "not supplied".
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Typed invocation input and its validation rules

use crate::domain::coercion::{FieldMap, FieldReader};
use crate::domain::command::Command;
use crate::domain::defaults::{merge, CommandDefaults};
use crate::domain::engine::{JobFailure, MessagePublication, NewProcessInstance, VariableMap};
use crate::domain::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Input keys as they appear in the host's invocation record
pub mod fields {
    use crate::domain::coercion::Field;

    pub const BPMN_PROCESS_ID: Field = Field::with_aliases("bpmnProcessId", &["bpmnProcessID"]);
    pub const PROCESS_INSTANCE_KEY: Field =
        Field::with_aliases("processInstanceKey", &["workflowInstanceKey"]);
    pub const MESSAGE_NAME: Field = Field::new("messageName");
    pub const MESSAGE_CORRELATION_KEY: Field = Field::new("messageCorrelationKey");
    pub const MESSAGE_TTL: Field = Field::with_aliases("messageTtlToLive", &["messageTtlToLiveString"]);
    pub const MESSAGE_ID: Field = Field::new("messageId");
    pub const INCIDENT_KEY: Field = Field::new("incidentKey");
    pub const JOB_KEY: Field = Field::new("jobKey");
    pub const RETRIES: Field = Field::new("retries");
    pub const ERROR_MESSAGE: Field = Field::new("errorMessage");
    pub const DATA: Field = Field::new("data");
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProcessInstanceRequest {
    /// Overrides the configured process id when non-empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpmn_process_id: Option<String>,
    #[serde(default, rename = "data", skip_serializing_if = "Option::is_none")]
    pub variables: Option<VariableMap>,
}

impl CreateProcessInstanceRequest {
    pub fn resolve(self, defaults: &CommandDefaults) -> Result<NewProcessInstance, ValidationError> {
        let bpmn_process_id = merge(defaults.bpmn_process_id.clone(), self.bpmn_process_id)
            .ok_or(ValidationError::MissingField {
                field: fields::BPMN_PROCESS_ID.name,
            })?;
        Ok(NewProcessInstance {
            bpmn_process_id,
            variables: self.variables,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelProcessInstanceRequest {
    #[serde(default)]
    pub process_instance_key: i64,
}

impl CancelProcessInstanceRequest {
    pub fn resolve(self) -> Result<i64, ValidationError> {
        require_key(self.process_instance_key, fields::PROCESS_INSTANCE_KEY.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishMessageRequest {
    #[serde(default)]
    pub message_name: String,
    #[serde(default)]
    pub message_correlation_key: String,
    #[serde(default, rename = "messageTtlToLive", with = "humantime_serde")]
    pub time_to_live: Duration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, rename = "data", skip_serializing_if = "Option::is_none")]
    pub variables: Option<VariableMap>,
}

impl PublishMessageRequest {
    pub fn resolve(self) -> Result<MessagePublication, ValidationError> {
        let name = require_text(self.message_name, fields::MESSAGE_NAME.name)?;
        let correlation_key =
            require_text(self.message_correlation_key, fields::MESSAGE_CORRELATION_KEY.name)?;
        Ok(MessagePublication {
            name,
            correlation_key,
            time_to_live: self.time_to_live,
            message_id: self.message_id.filter(|id| !id.is_empty()),
            variables: self.variables,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteJobRequest {
    #[serde(default)]
    pub job_key: i64,
    #[serde(default, rename = "data", skip_serializing_if = "Option::is_none")]
    pub variables: Option<VariableMap>,
}

impl CompleteJobRequest {
    pub fn resolve(self) -> Result<(i64, Option<VariableMap>), ValidationError> {
        let job_key = require_key(self.job_key, fields::JOB_KEY.name)?;
        Ok((job_key, self.variables))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailJobRequest {
    #[serde(default)]
    pub job_key: i64,
    /// Falls back to the configured retries when absent or `<= 0`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retries: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl FailJobRequest {
    /// With neither a per-call nor a configured count, zero retries are sent
    pub fn resolve(self, defaults: &CommandDefaults) -> Result<JobFailure, ValidationError> {
        let job_key = require_key(self.job_key, fields::JOB_KEY.name)?;
        Ok(JobFailure {
            job_key,
            retries: merge(defaults.fail_job_retries, self.retries).unwrap_or(0),
            error_message: self.error_message.filter(|m| !m.is_empty()),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveIncidentRequest {
    #[serde(default)]
    pub incident_key: i64,
}

impl ResolveIncidentRequest {
    pub fn resolve(self) -> Result<i64, ValidationError> {
        require_key(self.incident_key, fields::INCIDENT_KEY.name)
    }
}

/// Typed invocation input, tagged by command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "input")]
pub enum CommandRequest {
    CreateProcessInstance(CreateProcessInstanceRequest),
    CancelProcessInstance(CancelProcessInstanceRequest),
    PublishMessage(PublishMessageRequest),
    CompleteJob(CompleteJobRequest),
    FailJob(FailJobRequest),
    ResolveIncident(ResolveIncidentRequest),
}

impl CommandRequest {
    pub fn command(&self) -> Command {
        match self {
            CommandRequest::CreateProcessInstance(_) => Command::CreateProcessInstance,
            CommandRequest::CancelProcessInstance(_) => Command::CancelProcessInstance,
            CommandRequest::PublishMessage(_) => Command::PublishMessage,
            CommandRequest::CompleteJob(_) => Command::CompleteJob,
            CommandRequest::FailJob(_) => Command::FailJob,
            CommandRequest::ResolveIncident(_) => Command::ResolveIncident,
        }
    }

    /// Coerce an untyped invocation record into the request for `command`
    ///
    /// Only the keys the command uses are read; a supplied value of the
    /// wrong type fails even when the field is optional.
    pub fn decode(command: Command, input: &FieldMap) -> Result<Self, ValidationError> {
        let reader = FieldReader::new(input);
        let request = match command {
            Command::CreateProcessInstance => {
                CommandRequest::CreateProcessInstance(CreateProcessInstanceRequest {
                    bpmn_process_id: reader.string(fields::BPMN_PROCESS_ID)?,
                    variables: reader.object(fields::DATA)?,
                })
            }
            Command::CancelProcessInstance => {
                CommandRequest::CancelProcessInstance(CancelProcessInstanceRequest {
                    process_instance_key: reader.int64(fields::PROCESS_INSTANCE_KEY)?.unwrap_or(0),
                })
            }
            Command::PublishMessage => CommandRequest::PublishMessage(PublishMessageRequest {
                message_name: reader.string(fields::MESSAGE_NAME)?.unwrap_or_default(),
                message_correlation_key: reader
                    .string(fields::MESSAGE_CORRELATION_KEY)?
                    .unwrap_or_default(),
                time_to_live: reader.duration(fields::MESSAGE_TTL)?,
                message_id: reader.string(fields::MESSAGE_ID)?,
                variables: reader.object(fields::DATA)?,
            }),
            Command::CompleteJob => CommandRequest::CompleteJob(CompleteJobRequest {
                job_key: reader.int64(fields::JOB_KEY)?.unwrap_or(0),
                variables: reader.object(fields::DATA)?,
            }),
            Command::FailJob => CommandRequest::FailJob(FailJobRequest {
                job_key: reader.int64(fields::JOB_KEY)?.unwrap_or(0),
                retries: reader.int32(fields::RETRIES)?,
                error_message: reader.string(fields::ERROR_MESSAGE)?,
            }),
            Command::ResolveIncident => CommandRequest::ResolveIncident(ResolveIncidentRequest {
                incident_key: reader.int64(fields::INCIDENT_KEY)?.unwrap_or(0),
            }),
        };
        Ok(request)
    }
}

fn require_key(key: i64, field: &'static str) -> Result<i64, ValidationError> {
    if key > 0 {
        Ok(key)
    } else {
        Err(ValidationError::MissingField { field })
    }
}

fn require_text(value: String, field: &'static str) -> Result<String, ValidationError> {
    if value.is_empty() {
        Err(ValidationError::MissingField { field })
    } else {
        Ok(value)
    }
}
