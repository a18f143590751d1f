// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Zeebe gRPC Client
//!
//! [`ProcessEngineClient`] over the Zeebe gateway protocol.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** gRPC communication with a Zeebe gateway
//! - **Integration:** Activity Gateway → Zeebe `gateway_protocol.Gateway`
//!
//! # Wire conventions
//!
//! - Variables travel as a JSON document string; no variables is `""`
//! - Process instances are always created from the latest version (`-1`)
//! - Message time-to-live is sent in milliseconds
//!
//! # Transport
//!
//! `http://host:port` for plaintext connections, otherwise
//! `https://host:port` trusting either the configured CA certificate or the
//! webpki root set. Connecting gives up after 10 seconds. Requests carry no
//! deadline of their own.
//!
//! A call is re-sent at most twice, and only when the credentials provider
//! classifies the failure as retry-eligible.

use crate::domain::engine::{
    CreatedProcessInstance, EngineAck, EngineConnector, EngineError, JobFailure,
    MessagePublication, NewProcessInstance, ProcessEngineClient, PublishedMessage, RemoteStatus,
    VariableMap,
};
use crate::domain::settings::ConnectionSettings;
use crate::infrastructure::credentials::{
    CredentialsInterceptor, CredentialsProvider, StaticTokenProvider,
};
use crate::infrastructure::zeebe_proto::gateway_protocol::{
    self as proto, gateway_client::GatewayClient,
};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tonic::service::interceptor::InterceptedService;
use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint};
use tonic::{Code, Status};
use tracing::{debug, info, warn};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_RETRIES: u32 = 2;
const RETRY_BACKOFF: Duration = Duration::from_millis(200);
const LATEST_VERSION: i32 = -1;

type GatewayChannel = InterceptedService<Channel, CredentialsInterceptor>;

pub struct ZeebeClient {
    client: RwLock<Option<GatewayClient<GatewayChannel>>>,
    interceptor: CredentialsInterceptor,
    address: String,
}

impl ZeebeClient {
    /// Wrap an already connected channel
    pub fn new(
        channel: Channel,
        provider: Option<Arc<dyn CredentialsProvider>>,
        address: impl Into<String>,
    ) -> Self {
        let interceptor = CredentialsInterceptor::new(provider);
        Self {
            client: RwLock::new(Some(GatewayClient::with_interceptor(
                channel,
                interceptor.clone(),
            ))),
            interceptor,
            address: address.into(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    fn handle(&self) -> Result<GatewayClient<GatewayChannel>, EngineError> {
        self.client.read().clone().ok_or(EngineError::Closed)
    }

    /// Send one request, re-sending it while the credentials provider allows
    async fn call<Req, Resp, F, Fut>(
        &self,
        operation: &'static str,
        request: Req,
        send: F,
    ) -> Result<Resp, EngineError>
    where
        Req: Clone,
        F: Fn(GatewayClient<GatewayChannel>, Req) -> Fut,
        Fut: Future<Output = Result<tonic::Response<Resp>, Status>>,
    {
        let mut attempt = 0;
        loop {
            let client = self.handle()?;
            match send(client, request.clone()).await {
                Ok(response) => return Ok(response.into_inner()),
                Err(status) if attempt < MAX_RETRIES && self.interceptor.should_retry(&status) => {
                    attempt += 1;
                    warn!(
                        operation,
                        attempt,
                        code = ?status.code(),
                        "Retrying Zeebe request: {}",
                        status.message()
                    );
                    tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                }
                Err(status) => return Err(rejected(status)),
            }
        }
    }
}

#[async_trait]
impl ProcessEngineClient for ZeebeClient {
    async fn create_process_instance(
        &self,
        instance: NewProcessInstance,
    ) -> Result<CreatedProcessInstance, EngineError> {
        let request = proto::CreateProcessInstanceRequest {
            process_definition_key: 0,
            bpmn_process_id: instance.bpmn_process_id,
            version: LATEST_VERSION,
            variables: encode_variables(instance.variables.as_ref())?,
        };
        let response = self
            .call("CreateProcessInstance", request, |mut c, r| async move {
                c.create_process_instance(r).await
            })
            .await?;

        Ok(CreatedProcessInstance {
            bpmn_process_id: response.bpmn_process_id,
            version: response.version,
            process_definition_key: response.process_definition_key,
            process_instance_key: response.process_instance_key,
        })
    }

    async fn cancel_process_instance(&self, process_instance_key: i64) -> Result<EngineAck, EngineError> {
        let request = proto::CancelProcessInstanceRequest {
            process_instance_key,
        };
        let response = self
            .call("CancelProcessInstance", request, |mut c, r| async move {
                c.cancel_process_instance(r).await
            })
            .await?;
        Ok(describe(&response))
    }

    async fn publish_message(&self, message: MessagePublication) -> Result<PublishedMessage, EngineError> {
        let time_to_live = i64::try_from(message.time_to_live.as_millis()).map_err(|_| {
            EngineError::Encoding(format!(
                "time to live {:?} does not fit in milliseconds",
                message.time_to_live
            ))
        })?;
        let request = proto::PublishMessageRequest {
            name: message.name,
            correlation_key: message.correlation_key,
            time_to_live,
            message_id: message.message_id.unwrap_or_default(),
            variables: encode_variables(message.variables.as_ref())?,
        };
        let response = self
            .call("PublishMessage", request, |mut c, r| async move {
                c.publish_message(r).await
            })
            .await?;
        Ok(PublishedMessage { key: response.key })
    }

    async fn complete_job(
        &self,
        job_key: i64,
        variables: Option<VariableMap>,
    ) -> Result<EngineAck, EngineError> {
        let request = proto::CompleteJobRequest {
            job_key,
            variables: encode_variables(variables.as_ref())?,
        };
        let response = self
            .call("CompleteJob", request, |mut c, r| async move {
                c.complete_job(r).await
            })
            .await?;
        Ok(describe(&response))
    }

    async fn fail_job(&self, failure: JobFailure) -> Result<EngineAck, EngineError> {
        let request = proto::FailJobRequest {
            job_key: failure.job_key,
            retries: failure.retries,
            error_message: failure.error_message.unwrap_or_default(),
            retry_back_off: 0,
        };
        let response = self
            .call("FailJob", request, |mut c, r| async move { c.fail_job(r).await })
            .await?;
        Ok(describe(&response))
    }

    async fn resolve_incident(&self, incident_key: i64) -> Result<EngineAck, EngineError> {
        let request = proto::ResolveIncidentRequest { incident_key };
        let response = self
            .call("ResolveIncident", request, |mut c, r| async move {
                c.resolve_incident(r).await
            })
            .await?;
        Ok(describe(&response))
    }

    async fn close(&self) -> Result<(), EngineError> {
        if self.client.write().take().is_some() {
            debug!(address = %self.address, "Zeebe channel released");
        }
        Ok(())
    }
}

/// Opens [`ZeebeClient`] connections
///
/// An explicit credentials provider takes precedence; otherwise a
/// configured authorization token is sent as a bearer token.
#[derive(Clone, Default)]
pub struct ZeebeConnector {
    provider: Option<Arc<dyn CredentialsProvider>>,
}

impl ZeebeConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(provider: Arc<dyn CredentialsProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    fn provider_for(&self, settings: &ConnectionSettings) -> Option<Arc<dyn CredentialsProvider>> {
        self.provider.clone().or_else(|| {
            settings
                .authorization_token
                .as_ref()
                .map(|token| Arc::new(StaticTokenProvider::new(token.clone())) as Arc<dyn CredentialsProvider>)
        })
    }

    async fn endpoint(&self, settings: &ConnectionSettings) -> Result<Endpoint, EngineError> {
        let address = settings.address();
        let failed = |reason: String| EngineError::Connect {
            address: address.clone(),
            reason,
        };

        let endpoint = Endpoint::from_shared(settings.endpoint_uri())
            .map_err(|e| failed(format!("invalid endpoint: {}", e)))?
            .connect_timeout(CONNECT_TIMEOUT);

        if settings.use_plain_text_connection {
            return Ok(endpoint);
        }

        let mut tls = ClientTlsConfig::new().domain_name(settings.broker_host.clone());
        tls = match &settings.ca_certificate_path {
            Some(path) => {
                let pem = tokio::fs::read(path).await.map_err(|e| {
                    failed(format!(
                        "failed to read CA certificate {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                tls.ca_certificate(Certificate::from_pem(pem))
            }
            None => tls.with_webpki_roots(),
        };
        endpoint
            .tls_config(tls)
            .map_err(|e| failed(format!("invalid TLS configuration: {}", e)))
    }
}

#[async_trait]
impl EngineConnector for ZeebeConnector {
    async fn connect(
        &self,
        settings: &ConnectionSettings,
    ) -> Result<Arc<dyn ProcessEngineClient>, EngineError> {
        let address = settings.address();
        debug!(endpoint = %settings.endpoint_uri(), "Connecting to Zeebe gateway");

        let channel = self
            .endpoint(settings)
            .await?
            .connect()
            .await
            .map_err(|e| EngineError::Connect {
                address: address.clone(),
                reason: e.to_string(),
            })?;

        info!(address = %address, "Connected to Zeebe gateway");
        let client = ZeebeClient::new(channel, self.provider_for(settings), address);
        Ok(Arc::new(client) as Arc<dyn ProcessEngineClient>)
    }
}

fn encode_variables(variables: Option<&VariableMap>) -> Result<String, EngineError> {
    match variables {
        Some(map) => serde_json::to_string(map).map_err(|e| EngineError::Encoding(e.to_string())),
        None => Ok(String::new()),
    }
}

fn describe<T: std::fmt::Debug>(response: &T) -> EngineAck {
    EngineAck {
        descriptor: format!("{:?}", response),
    }
}

fn rejected(status: Status) -> EngineError {
    EngineError::Rejected {
        status: remote_status(status.code()),
        message: status.message().to_string(),
    }
}

fn remote_status(code: Code) -> RemoteStatus {
    match code {
        Code::Cancelled => RemoteStatus::Cancelled,
        Code::InvalidArgument => RemoteStatus::InvalidArgument,
        Code::DeadlineExceeded => RemoteStatus::DeadlineExceeded,
        Code::NotFound => RemoteStatus::NotFound,
        Code::AlreadyExists => RemoteStatus::AlreadyExists,
        Code::PermissionDenied => RemoteStatus::PermissionDenied,
        Code::ResourceExhausted => RemoteStatus::ResourceExhausted,
        Code::FailedPrecondition => RemoteStatus::FailedPrecondition,
        Code::Aborted => RemoteStatus::Aborted,
        Code::OutOfRange => RemoteStatus::OutOfRange,
        Code::Unimplemented => RemoteStatus::Unimplemented,
        Code::Internal => RemoteStatus::Internal,
        Code::Unavailable => RemoteStatus::Unavailable,
        Code::DataLoss => RemoteStatus::DataLoss,
        Code::Unauthenticated => RemoteStatus::Unauthenticated,
        Code::Ok | Code::Unknown => RemoteStatus::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_variables_encode_as_empty_document() {
        assert_eq!(encode_variables(None).unwrap(), "");
    }

    #[test]
    fn test_variables_encode_as_json_string() {
        let vars = json!({ "orderId": 31243 }).as_object().cloned().unwrap();
        assert_eq!(encode_variables(Some(&vars)).unwrap(), r#"{"orderId":31243}"#);
    }

    #[test]
    fn test_status_keeps_code_and_message() {
        let err = rejected(Status::not_found("no such job"));
        assert_eq!(err.to_string(), "NOT_FOUND: no such job");
        assert!(!err.is_transient());
        assert!(rejected(Status::unavailable("down")).is_transient());
    }

    #[test]
    fn test_empty_response_descriptor() {
        assert_eq!(
            describe(&proto::CompleteJobResponse {}).descriptor,
            "CompleteJobResponse"
        );
    }
}
