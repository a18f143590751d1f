// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Command
//!
//! The fixed set of engine operations a gateway instance can be configured
//! to perform. A gateway performs exactly one command for its whole lifetime.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Names the six commands and parses them from settings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Engine operation selected by the `command` setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    CreateProcessInstance,
    CancelProcessInstance,
    PublishMessage,
    CompleteJob,
    FailJob,
    ResolveIncident,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::CreateProcessInstance,
        Command::CancelProcessInstance,
        Command::PublishMessage,
        Command::CompleteJob,
        Command::FailJob,
        Command::ResolveIncident,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::CreateProcessInstance => "CreateProcessInstance",
            Command::CancelProcessInstance => "CancelProcessInstance",
            Command::PublishMessage => "PublishMessage",
            Command::CompleteJob => "CompleteJob",
            Command::FailJob => "FailJob",
            Command::ResolveIncident => "ResolveIncident",
        }
    }

    /// Key under which the command's result map is placed in a SUCCESS envelope
    pub fn response_key(&self) -> &'static str {
        match self {
            Command::CreateProcessInstance => "createProcessInstanceResponse",
            Command::CancelProcessInstance => "cancelProcessInstanceResponse",
            Command::PublishMessage => "publishMessageResponse",
            Command::CompleteJob => "completeJobResponse",
            Command::FailJob => "failJobResponse",
            Command::ResolveIncident => "resolveIncidentResponse",
        }
    }

    /// Input fields that must be present (after default merging) for the command
    pub fn required_inputs(&self) -> &'static [&'static str] {
        match self {
            Command::CreateProcessInstance => &["bpmnProcessId"],
            Command::CancelProcessInstance => &["processInstanceKey"],
            Command::PublishMessage => &["messageName", "messageCorrelationKey"],
            Command::CompleteJob => &["jobKey"],
            Command::FailJob => &["jobKey"],
            Command::ResolveIncident => &["incidentKey"],
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a command name matches none of the supported commands
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown command '{0}'")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "CreateProcessInstance" | "CreateWorkflowInstance" => Ok(Command::CreateProcessInstance),
            "CancelProcessInstance" | "CancelWorkflowInstance" => Ok(Command::CancelProcessInstance),
            "PublishMessage" => Ok(Command::PublishMessage),
            "CompleteJob" => Ok(Command::CompleteJob),
            "FailJob" => Ok(Command::FailJob),
            "ResolveIncident" => Ok(Command::ResolveIncident),
            other => Err(UnknownCommand(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_command_name() {
        for command in Command::ALL {
            assert_eq!(command.as_str().parse::<Command>().unwrap(), command);
        }
    }

    #[test]
    fn test_parse_legacy_workflow_names() {
        assert_eq!(
            "CreateWorkflowInstance".parse::<Command>().unwrap(),
            Command::CreateProcessInstance
        );
        assert_eq!(
            "CancelWorkflowInstance".parse::<Command>().unwrap(),
            Command::CancelProcessInstance
        );
    }

    #[test]
    fn test_unknown_command() {
        let err = "Create".parse::<Command>().unwrap_err();
        assert_eq!(err, UnknownCommand("Create".to_string()));
        assert_eq!(err.to_string(), "unknown command 'Create'");
    }
}
