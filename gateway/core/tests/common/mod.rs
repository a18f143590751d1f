// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use zeebe_activity_core::domain::coercion::FieldMap;
use zeebe_activity_core::domain::engine::{
    CreatedProcessInstance, EngineAck, EngineConnector, EngineError, JobFailure,
    MessagePublication, NewProcessInstance, ProcessEngineClient, PublishedMessage, VariableMap,
};
use zeebe_activity_core::domain::settings::ConnectionSettings;

/// One call received by the recording client
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    CreateProcessInstance(NewProcessInstance),
    CancelProcessInstance(i64),
    PublishMessage(MessagePublication),
    CompleteJob(i64, Option<VariableMap>),
    FailJob(JobFailure),
    ResolveIncident(i64),
}

#[derive(Default)]
pub struct RecordingEngineClient {
    calls: Mutex<Vec<EngineCall>>,
    failure: Mutex<Option<EngineError>>,
    close_failure: Mutex<Option<EngineError>>,
    closes: AtomicUsize,
}

impl RecordingEngineClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every subsequent call fails with `err`
    pub fn fail_with(&self, err: EngineError) {
        *self.failure.lock() = Some(err);
    }

    pub fn fail_close_with(&self, err: EngineError) {
        *self.close_failure.lock() = Some(err);
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().clone()
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    fn record(&self, call: EngineCall) -> Result<(), EngineError> {
        self.calls.lock().push(call);
        match self.failure.lock().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProcessEngineClient for RecordingEngineClient {
    async fn create_process_instance(
        &self,
        instance: NewProcessInstance,
    ) -> Result<CreatedProcessInstance, EngineError> {
        let bpmn_process_id = instance.bpmn_process_id.clone();
        self.record(EngineCall::CreateProcessInstance(instance))?;
        Ok(CreatedProcessInstance {
            bpmn_process_id,
            version: 3,
            process_definition_key: 2251799813685249,
            process_instance_key: 2251799813685251,
        })
    }

    async fn cancel_process_instance(&self, process_instance_key: i64) -> Result<EngineAck, EngineError> {
        self.record(EngineCall::CancelProcessInstance(process_instance_key))?;
        Ok(EngineAck {
            descriptor: "CancelProcessInstanceResponse".to_string(),
        })
    }

    async fn publish_message(&self, message: MessagePublication) -> Result<PublishedMessage, EngineError> {
        self.record(EngineCall::PublishMessage(message))?;
        Ok(PublishedMessage { key: 2251799813685300 })
    }

    async fn complete_job(
        &self,
        job_key: i64,
        variables: Option<VariableMap>,
    ) -> Result<EngineAck, EngineError> {
        self.record(EngineCall::CompleteJob(job_key, variables))?;
        Ok(EngineAck {
            descriptor: "CompleteJobResponse".to_string(),
        })
    }

    async fn fail_job(&self, failure: JobFailure) -> Result<EngineAck, EngineError> {
        self.record(EngineCall::FailJob(failure))?;
        Ok(EngineAck {
            descriptor: "FailJobResponse".to_string(),
        })
    }

    async fn resolve_incident(&self, incident_key: i64) -> Result<EngineAck, EngineError> {
        self.record(EngineCall::ResolveIncident(incident_key))?;
        Ok(EngineAck {
            descriptor: "ResolveIncidentResponse".to_string(),
        })
    }

    async fn close(&self) -> Result<(), EngineError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        match self.close_failure.lock().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Hands out one shared recording client, or refuses to connect
pub struct MockConnector {
    pub client: Arc<RecordingEngineClient>,
    refuse: bool,
    connects: AtomicUsize,
}

impl MockConnector {
    pub fn new() -> Self {
        Self {
            client: RecordingEngineClient::new(),
            refuse: false,
            connects: AtomicUsize::new(0),
        }
    }

    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::new()
        }
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EngineConnector for MockConnector {
    async fn connect(
        &self,
        settings: &ConnectionSettings,
    ) -> Result<Arc<dyn ProcessEngineClient>, EngineError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if self.refuse {
            return Err(EngineError::Connect {
                address: settings.address(),
                reason: "connection refused".to_string(),
            });
        }
        Ok(self.client.clone() as Arc<dyn ProcessEngineClient>)
    }
}

pub fn record(value: Value) -> FieldMap {
    value.as_object().cloned().unwrap_or_default()
}

/// Minimal settings record for `command`
pub fn settings_for(command: &str) -> FieldMap {
    record(serde_json::json!({
        "zeebeBrokerHost": "127.0.0.1",
        "zeebeBrokerPort": 26500,
        "command": command,
        "usePlainTextConnection": true,
    }))
}
