// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Host Activity Adapter
//!
//! Binds an [`ActivityGateway`] to a host runtime that exposes inputs and
//! outputs through an [`ActivityContext`].

use crate::application::gateway::ActivityGateway;
use crate::domain::coercion::FieldMap;
use crate::domain::engine::EngineConnector;
use crate::domain::envelope::InvocationOutput;
use crate::domain::error::GatewayError;
use crate::domain::settings::GatewaySettings;
use thiserror::Error;
use tracing::error;

/// The host side of one activity evaluation
pub trait ActivityContext {
    type Error: std::error::Error + Send + Sync + 'static;

    /// The invocation input record
    fn input_object(&self) -> Result<FieldMap, Self::Error>;

    /// Hand the envelope back to the host
    fn set_output_object(&mut self, output: &InvocationOutput) -> Result<(), Self::Error>;
}

#[derive(Debug, Error)]
pub enum ActivityError<E: std::error::Error + Send + Sync + 'static> {
    #[error("failed to read activity input: {0}")]
    Input(#[source] E),

    #[error("failed to set activity output: {0}")]
    Output(#[source] E),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

pub struct Activity {
    gateway: ActivityGateway,
}

impl Activity {
    pub fn new(gateway: ActivityGateway) -> Self {
        Self { gateway }
    }

    /// Build and connect from the host's settings record
    pub async fn create(
        settings: &FieldMap,
        connector: &dyn EngineConnector,
    ) -> Result<Self, GatewayError> {
        let settings = GatewaySettings::from_map(settings)?;
        Ok(Self::new(ActivityGateway::connect(settings, connector).await?))
    }

    pub fn gateway(&self) -> &ActivityGateway {
        &self.gateway
    }

    /// Evaluate one invocation
    ///
    /// The envelope is always handed to the host. When the invocation
    /// fails, a failure to set the output is only logged and the
    /// invocation error is returned.
    pub async fn eval<C: ActivityContext>(
        &self,
        context: &mut C,
    ) -> Result<bool, ActivityError<C::Error>> {
        let input = context.input_object().map_err(ActivityError::Input)?;

        match self.gateway.invoke(&input).await {
            Ok(output) => {
                context
                    .set_output_object(&output)
                    .map_err(ActivityError::Output)?;
                Ok(true)
            }
            Err(failure) => {
                if let Err(e) = context.set_output_object(&failure.output) {
                    error!("Failed to set error output: {}", e);
                }
                Err(ActivityError::Gateway(failure.error))
            }
        }
    }

    pub async fn close(&self) -> Result<(), GatewayError> {
        self.gateway.close().await
    }
}
