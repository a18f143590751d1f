// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Activity Gateway
//!
//! Owns the engine connection for the lifetime of one gateway instance and
//! runs invocations against it.
//!
//! ```text
//! Uninitialized --open--> Ready --close--> Closed
//!       |                                    ^
//!       +---------------close----------------+
//! ```
//!
//! Invocations take a read lock on the connection and share the client
//! handle, so any number may be in flight at once. `close` takes the write
//! lock, waits for in-flight invocations to finish, and releases the handle
//! exactly once.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Gateway Lifecycle and invocation entry point

use crate::application::normalizer::OutputNormalizer;
use crate::application::router::CommandRouter;
use crate::domain::coercion::FieldMap;
use crate::domain::engine::{EngineConnector, ProcessEngineClient};
use crate::domain::envelope::{InvocationFailure, InvocationOutput};
use crate::domain::error::GatewayError;
use crate::domain::gateway_state::GatewayState;
use crate::domain::request::CommandRequest;
use crate::domain::result::CommandResult;
use crate::domain::settings::GatewaySettings;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

enum Connection {
    Uninitialized,
    Ready(Arc<dyn ProcessEngineClient>),
    Closed,
}

impl Connection {
    fn state(&self) -> GatewayState {
        match self {
            Connection::Uninitialized => GatewayState::Uninitialized,
            Connection::Ready(_) => GatewayState::Ready,
            Connection::Closed => GatewayState::Closed,
        }
    }
}

pub struct ActivityGateway {
    settings: GatewaySettings,
    router: CommandRouter,
    connection: RwLock<Connection>,
}

impl ActivityGateway {
    /// An unconnected gateway; call [`open`](Self::open) before invoking
    pub fn new(settings: GatewaySettings) -> Self {
        Self::with_router(settings, CommandRouter::standard())
    }

    pub fn with_router(settings: GatewaySettings, router: CommandRouter) -> Self {
        Self {
            settings,
            router,
            connection: RwLock::new(Connection::Uninitialized),
        }
    }

    /// Coerce settings and connect, yielding a `Ready` gateway
    ///
    /// Connection is a single attempt. A failure here is fatal and the
    /// gateway is never returned.
    pub async fn connect(
        settings: GatewaySettings,
        connector: &dyn EngineConnector,
    ) -> Result<Self, GatewayError> {
        let gateway = Self::new(settings);
        gateway.open(connector).await?;
        Ok(gateway)
    }

    /// Construct from the host's untyped settings record
    pub async fn from_settings(
        values: &FieldMap,
        connector: &dyn EngineConnector,
    ) -> Result<Self, GatewayError> {
        let settings = GatewaySettings::from_map(values)?;
        Self::connect(settings, connector).await
    }

    /// Establish the engine connection
    ///
    /// Opening a `Ready` gateway is a no-op; a `Closed` gateway cannot be
    /// reopened.
    pub async fn open(&self, connector: &dyn EngineConnector) -> Result<(), GatewayError> {
        let mut connection = self.connection.write().await;
        match *connection {
            Connection::Ready(_) => return Ok(()),
            Connection::Closed => return Err(GatewayError::NotReady(GatewayState::Closed)),
            Connection::Uninitialized => {}
        }

        let address = self.settings.connection.address();
        let client = connector
            .connect(&self.settings.connection)
            .await
            .map_err(GatewayError::Connection)?;
        *connection = Connection::Ready(client);

        info!(
            address = %address,
            command = %self.settings.command,
            plaintext = self.settings.connection.use_plain_text_connection,
            "Activity gateway ready"
        );
        Ok(())
    }

    pub async fn state(&self) -> GatewayState {
        self.connection.read().await.state()
    }

    pub fn settings(&self) -> &GatewaySettings {
        &self.settings
    }

    /// Run the configured command against one untyped input record
    ///
    /// Always yields an envelope: SUCCESS with the command result, or an
    /// [`InvocationFailure`] carrying both the ERROR envelope and the error.
    pub async fn invoke(&self, input: &FieldMap) -> Result<InvocationOutput, InvocationFailure> {
        let command = self.settings.command;
        let span = info_span!(
            "invocation",
            command = %command,
            invocation_id = %Uuid::new_v4()
        );
        async move {
            let outcome = match CommandRequest::decode(command, input) {
                Ok(request) => self.dispatch(request).await,
                Err(err) => Err(GatewayError::Validation(err)),
            };
            OutputNormalizer::normalize(outcome)
        }
        .instrument(span)
        .await
    }

    /// Run an already typed request
    ///
    /// The request must match the configured command; a gateway never runs
    /// a command other than the one it was built for.
    pub async fn execute(
        &self,
        request: CommandRequest,
    ) -> Result<InvocationOutput, InvocationFailure> {
        let configured = self.settings.command;
        let requested = request.command();
        let span = info_span!(
            "invocation",
            command = %configured,
            invocation_id = %Uuid::new_v4()
        );
        async move {
            let outcome = if requested == configured {
                self.dispatch(request).await
            } else {
                Err(GatewayError::CommandMismatch {
                    configured,
                    requested,
                })
            };
            OutputNormalizer::normalize(outcome)
        }
        .instrument(span)
        .await
    }

    async fn dispatch(
        &self,
        request: CommandRequest,
    ) -> Result<CommandResult, GatewayError> {
        // The read guard is held until the remote call returns so that
        // `close` cannot release the handle underneath it.
        let connection = self.connection.read().await;
        let client = match &*connection {
            Connection::Ready(client) => client.as_ref(),
            other => return Err(GatewayError::NotReady(other.state())),
        };
        self.router
            .dispatch(client, &self.settings.defaults, request)
            .await
    }

    /// Release the engine connection
    ///
    /// The gateway is `Closed` afterwards even when the release fails; the
    /// failure is returned as [`GatewayError::Teardown`]. Closing twice is a
    /// no-op.
    pub async fn close(&self) -> Result<(), GatewayError> {
        let previous = {
            let mut connection = self.connection.write().await;
            std::mem::replace(&mut *connection, Connection::Closed)
        };

        match previous {
            Connection::Ready(client) => match client.close().await {
                Ok(()) => {
                    info!(command = %self.settings.command, "Activity gateway closed");
                    Ok(())
                }
                Err(e) => {
                    warn!("Engine connection did not close cleanly: {}", e);
                    Err(GatewayError::Teardown(e))
                }
            },
            Connection::Uninitialized | Connection::Closed => Ok(()),
        }
    }
}

impl std::fmt::Debug for ActivityGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityGateway")
            .field("settings", &self.settings)
            .field("router", &self.router)
            .finish_non_exhaustive()
    }
}
