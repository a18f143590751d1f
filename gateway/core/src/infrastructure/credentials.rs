// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Credential Hook
//!
//! A [`CredentialsProvider`] decorates every outgoing engine call with
//! credentials and decides which failed calls the transport may re-send.
//! [`CredentialsInterceptor`] plugs a provider into tonic's interceptor
//! chain.

use std::fmt;
use std::sync::Arc;
use tonic::metadata::{MetadataMap, MetadataValue};
use tonic::service::Interceptor;
use tonic::{Code, Request, Status};

pub trait CredentialsProvider: Send + Sync {
    /// Attach credentials to the metadata of an outgoing call
    fn apply_credentials(&self, metadata: &mut MetadataMap) -> Result<(), Status>;

    /// Whether a call that failed with `status` may be sent again
    fn should_retry_request(&self, status: &Status) -> bool;
}

/// Sends a fixed bearer token with every call
///
/// Calls that hit their deadline are eligible for a retry; every other
/// failure is final.
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTokenProvider")
            .field("token", &"<redacted>")
            .finish()
    }
}

impl CredentialsProvider for StaticTokenProvider {
    fn apply_credentials(&self, metadata: &mut MetadataMap) -> Result<(), Status> {
        let value = format!("Bearer {}", self.token)
            .parse::<MetadataValue<_>>()
            .map_err(|e| Status::internal(format!("Invalid bearer token: {}", e)))?;
        metadata.insert("authorization", value);
        Ok(())
    }

    fn should_retry_request(&self, status: &Status) -> bool {
        status.code() == Code::DeadlineExceeded
    }
}

/// tonic interceptor applying an optional provider to each request
#[derive(Clone, Default)]
pub struct CredentialsInterceptor {
    provider: Option<Arc<dyn CredentialsProvider>>,
}

impl CredentialsInterceptor {
    pub fn new(provider: Option<Arc<dyn CredentialsProvider>>) -> Self {
        Self { provider }
    }

    /// No provider means no credentials and no retries
    pub fn should_retry(&self, status: &Status) -> bool {
        self.provider
            .as_ref()
            .is_some_and(|p| p.should_retry_request(status))
    }
}

impl Interceptor for CredentialsInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        if let Some(provider) = &self.provider {
            provider.apply_credentials(request.metadata_mut())?;
        }
        Ok(request)
    }
}
