// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Process Engine Client (Anti-Corruption Layer)
//!
//! Domain interface for the remote process-orchestration engine. The gateway
//! only ever talks to the engine through [`ProcessEngineClient`]; the gRPC
//! implementation lives in `infrastructure::zeebe_client`.
//!
//! One method per command, plus `close`. Implementations must be safe for
//! concurrent use by many in-flight invocations sharing one handle.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Remote Operation Client contract and its value types

use crate::domain::settings::ConnectionSettings;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Process variables: a JSON object keyed by variable name
pub type VariableMap = serde_json::Map<String, serde_json::Value>;

/// Start a new instance of the latest deployed version of a process
#[derive(Debug, Clone, PartialEq)]
pub struct NewProcessInstance {
    pub bpmn_process_id: String,
    pub variables: Option<VariableMap>,
}

/// Engine acknowledgement for a created process instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedProcessInstance {
    pub bpmn_process_id: String,
    pub version: i32,
    pub process_definition_key: i64,
    pub process_instance_key: i64,
}

/// Message to correlate with waiting process instances
#[derive(Debug, Clone, PartialEq)]
pub struct MessagePublication {
    pub name: String,
    pub correlation_key: String,
    /// Zero means the message is only correlated at publish time
    pub time_to_live: Duration,
    pub message_id: Option<String>,
    pub variables: Option<VariableMap>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub key: i64,
}

/// Mark an activated job as failed with the given remaining retries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFailure {
    pub job_key: i64,
    pub retries: i32,
    pub error_message: Option<String>,
}

/// Engine response for commands whose reply carries no fields
///
/// `descriptor` is a human-readable rendering of the raw engine reply.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EngineAck {
    pub descriptor: String,
}

/// Remote Operation Client: a connected handle to the engine
#[async_trait]
pub trait ProcessEngineClient: Send + Sync {
    async fn create_process_instance(
        &self,
        instance: NewProcessInstance,
    ) -> Result<CreatedProcessInstance, EngineError>;

    async fn cancel_process_instance(&self, process_instance_key: i64) -> Result<EngineAck, EngineError>;

    async fn publish_message(&self, message: MessagePublication) -> Result<PublishedMessage, EngineError>;

    async fn complete_job(
        &self,
        job_key: i64,
        variables: Option<VariableMap>,
    ) -> Result<EngineAck, EngineError>;

    async fn fail_job(&self, failure: JobFailure) -> Result<EngineAck, EngineError>;

    async fn resolve_incident(&self, incident_key: i64) -> Result<EngineAck, EngineError>;

    /// Release the connection. Calls issued afterwards fail with [`EngineError::Closed`].
    async fn close(&self) -> Result<(), EngineError>;
}

/// Opens Remote Operation Client connections
///
/// Connecting is a single attempt; the caller decides what a failure means.
#[async_trait]
pub trait EngineConnector: Send + Sync {
    async fn connect(
        &self,
        settings: &ConnectionSettings,
    ) -> Result<Arc<dyn ProcessEngineClient>, EngineError>;
}

/// Status class reported by the engine for a rejected or failed call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteStatus {
    Cancelled,
    Unknown,
    InvalidArgument,
    DeadlineExceeded,
    NotFound,
    AlreadyExists,
    PermissionDenied,
    ResourceExhausted,
    FailedPrecondition,
    Aborted,
    OutOfRange,
    Unimplemented,
    Internal,
    Unavailable,
    DataLoss,
    Unauthenticated,
}

impl RemoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteStatus::Cancelled => "CANCELLED",
            RemoteStatus::Unknown => "UNKNOWN",
            RemoteStatus::InvalidArgument => "INVALID_ARGUMENT",
            RemoteStatus::DeadlineExceeded => "DEADLINE_EXCEEDED",
            RemoteStatus::NotFound => "NOT_FOUND",
            RemoteStatus::AlreadyExists => "ALREADY_EXISTS",
            RemoteStatus::PermissionDenied => "PERMISSION_DENIED",
            RemoteStatus::ResourceExhausted => "RESOURCE_EXHAUSTED",
            RemoteStatus::FailedPrecondition => "FAILED_PRECONDITION",
            RemoteStatus::Aborted => "ABORTED",
            RemoteStatus::OutOfRange => "OUT_OF_RANGE",
            RemoteStatus::Unimplemented => "UNIMPLEMENTED",
            RemoteStatus::Internal => "INTERNAL",
            RemoteStatus::Unavailable => "UNAVAILABLE",
            RemoteStatus::DataLoss => "DATA_LOSS",
            RemoteStatus::Unauthenticated => "UNAUTHENTICATED",
        }
    }
}

impl fmt::Display for RemoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures of the Remote Operation Client
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The engine rejected or failed to process a request that was sent
    ///
    /// Renders as `STATUS: message`, e.g. `NOT_FOUND: ...`; the message is
    /// the engine's text unchanged.
    #[error("{status}: {message}")]
    Rejected { status: RemoteStatus, message: String },

    #[error("failed to connect to {address}: {reason}")]
    Connect { address: String, reason: String },

    #[error("engine connection is closed")]
    Closed,

    #[error("failed to encode variables: {0}")]
    Encoding(String),
}

impl EngineError {
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            EngineError::Rejected {
                status: RemoteStatus::Unavailable
                    | RemoteStatus::DeadlineExceeded
                    | RemoteStatus::ResourceExhausted,
                ..
            }
        )
    }
}
