// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Command Results
//!
//! The structured result each handler produces on success. Field names are
//! the camelCase keys hosts read from the SUCCESS envelope. The first three
//! commands carry an explicit `...Status: true` flag that older host flows
//! still test for; the job and incident commands carry a descriptor of the
//! engine's reply instead.

use crate::domain::command::Command;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProcessInstanceResult {
    pub bpmn_process_id: String,
    pub version: i32,
    pub process_definition_key: i64,
    pub process_instance_key: i64,
    pub create_process_instance_status: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelProcessInstanceResult {
    pub process_instance_key: i64,
    pub cancel_process_instance_status: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishMessageResult {
    pub message_name: String,
    pub message_correlation_key: String,
    /// Rendered as a duration string such as `"15s"`; `"0s"` when unset
    #[serde(rename = "messageTtlToLive", with = "humantime_serde")]
    pub time_to_live: Duration,
    pub publish_message_status: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteJobResult {
    pub job_key: i64,
    pub complete_job_response_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailJobResult {
    pub job_key: i64,
    /// The retry count actually transmitted to the engine
    pub retries: i32,
    pub fail_job_response_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveIncidentResult {
    pub incident_key: i64,
    pub resolve_incident_response_text: String,
}

/// A handler's successful outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    CreateProcessInstance(CreateProcessInstanceResult),
    CancelProcessInstance(CancelProcessInstanceResult),
    PublishMessage(PublishMessageResult),
    CompleteJob(CompleteJobResult),
    FailJob(FailJobResult),
    ResolveIncident(ResolveIncidentResult),
}

impl CommandResult {
    pub fn command(&self) -> Command {
        match self {
            CommandResult::CreateProcessInstance(_) => Command::CreateProcessInstance,
            CommandResult::CancelProcessInstance(_) => Command::CancelProcessInstance,
            CommandResult::PublishMessage(_) => Command::PublishMessage,
            CommandResult::CompleteJob(_) => Command::CompleteJob,
            CommandResult::FailJob(_) => Command::FailJob,
            CommandResult::ResolveIncident(_) => Command::ResolveIncident,
        }
    }

    /// The command-specific result mapping
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            CommandResult::CreateProcessInstance(r) => serde_json::to_value(r),
            CommandResult::CancelProcessInstance(r) => serde_json::to_value(r),
            CommandResult::PublishMessage(r) => serde_json::to_value(r),
            CommandResult::CompleteJob(r) => serde_json::to_value(r),
            CommandResult::FailJob(r) => serde_json::to_value(r),
            CommandResult::ResolveIncident(r) => serde_json::to_value(r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_publish_result_renders_ttl_as_duration_string() {
        let result = CommandResult::PublishMessage(PublishMessageResult {
            message_name: "payment-received".to_string(),
            message_correlation_key: "order-31243".to_string(),
            time_to_live: Duration::from_secs(15),
            publish_message_status: true,
        });
        assert_eq!(
            result.to_value().unwrap(),
            json!({
                "messageName": "payment-received",
                "messageCorrelationKey": "order-31243",
                "messageTtlToLive": "15s",
                "publishMessageStatus": true,
            })
        );
    }

    #[test]
    fn test_create_result_field_names() {
        let value = CommandResult::CreateProcessInstance(CreateProcessInstanceResult {
            bpmn_process_id: "order-process".to_string(),
            version: 2,
            process_definition_key: 2251799813685249,
            process_instance_key: 2251799813685251,
            create_process_instance_status: true,
        })
        .to_value()
        .unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 5);
        for key in [
            "bpmnProcessId",
            "version",
            "processDefinitionKey",
            "processInstanceKey",
            "createProcessInstanceStatus",
        ] {
            assert!(keys.contains(&key), "missing {}", key);
        }
    }
}
