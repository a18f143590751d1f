// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

mod common;

use common::{record, settings_for, EngineCall, MockConnector};
use serde_json::{json, Value};
use zeebe_activity_core::domain::coercion::FieldMap;
use zeebe_activity_core::domain::envelope::{InvocationOutput, InvocationStatus};
use zeebe_activity_core::domain::error::GatewayError;
use zeebe_activity_core::presentation::{Activity, ActivityContext, ActivityError};

#[derive(Debug, thiserror::Error)]
#[error("host rejected output")]
struct HostError;

struct TestContext {
    input: Value,
    output: Option<InvocationOutput>,
    reject_output: bool,
}

impl TestContext {
    fn new(input: Value) -> Self {
        Self {
            input,
            output: None,
            reject_output: false,
        }
    }
}

impl ActivityContext for TestContext {
    type Error = HostError;

    fn input_object(&self) -> Result<FieldMap, HostError> {
        self.input.as_object().cloned().ok_or(HostError)
    }

    fn set_output_object(&mut self, output: &InvocationOutput) -> Result<(), HostError> {
        if self.reject_output {
            return Err(HostError);
        }
        self.output = Some(output.clone());
        Ok(())
    }
}

#[tokio::test]
async fn test_eval_sets_success_envelope() {
    let connector = MockConnector::new();
    let activity = Activity::create(&settings_for("CompleteJob"), &connector)
        .await
        .unwrap();
    let mut context = TestContext::new(json!({ "jobKey": 11, "data": { "approved": true } }));

    assert!(activity.eval(&mut context).await.unwrap());

    let output = context.output.unwrap();
    assert_eq!(output.status, InvocationStatus::Success);
    assert_eq!(output.result["completeJobResponse"]["jobKey"], json!(11));
    assert_eq!(
        connector.client.calls(),
        vec![EngineCall::CompleteJob(
            11,
            Some(record(json!({ "approved": true })))
        )]
    );
}

#[tokio::test]
async fn test_eval_failure_sets_error_envelope_and_returns_error() {
    let connector = MockConnector::new();
    let activity = Activity::create(&settings_for("CompleteJob"), &connector)
        .await
        .unwrap();
    let mut context = TestContext::new(json!({}));

    let err = activity.eval(&mut context).await.unwrap_err();

    assert!(matches!(err, ActivityError::Gateway(GatewayError::Validation(_))));
    let output = context.output.unwrap();
    assert_eq!(output.status, InvocationStatus::Error);
    assert_eq!(output.result, json!(err.to_string()));
}

#[tokio::test]
async fn test_output_rejection_on_failure_keeps_invocation_error() {
    let connector = MockConnector::new();
    let activity = Activity::create(&settings_for("CompleteJob"), &connector)
        .await
        .unwrap();
    let mut context = TestContext::new(json!({}));
    context.reject_output = true;

    let err = activity.eval(&mut context).await.unwrap_err();

    assert!(matches!(err, ActivityError::Gateway(_)));
}

#[tokio::test]
async fn test_output_rejection_on_success_is_reported() {
    let connector = MockConnector::new();
    let activity = Activity::create(&settings_for("CompleteJob"), &connector)
        .await
        .unwrap();
    let mut context = TestContext::new(json!({ "jobKey": 11 }));
    context.reject_output = true;

    let err = activity.eval(&mut context).await.unwrap_err();

    assert!(matches!(err, ActivityError::Output(HostError)));
    assert_eq!(connector.client.calls().len(), 1);
}

#[tokio::test]
async fn test_close_releases_connection() {
    let connector = MockConnector::new();
    let activity = Activity::create(&settings_for("CompleteJob"), &connector)
        .await
        .unwrap();

    activity.close().await.unwrap();

    assert_eq!(connector.client.close_count(), 1);
}
