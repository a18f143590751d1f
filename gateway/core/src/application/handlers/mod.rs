// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Command Handlers
//!
//! One handler per command. Each is a single linear pipeline:
//!
//! 1. validate the typed request and merge configured defaults
//! 2. build the engine request
//! 3. send it through the [`ProcessEngineClient`] and wait for the reply
//! 4. shape the reply into a [`CommandResult`]
//!
//! Remote errors are propagated unchanged. Handlers hold no state, so any
//! number of invocations may run through them concurrently.

use crate::domain::command::Command;
use crate::domain::defaults::CommandDefaults;
use crate::domain::engine::ProcessEngineClient;
use crate::domain::error::GatewayError;
use crate::domain::request::CommandRequest;
use crate::domain::result::CommandResult;
use async_trait::async_trait;

pub mod cancel_process_instance;
pub mod complete_job;
pub mod create_process_instance;
pub mod fail_job;
pub mod publish_message;
pub mod resolve_incident;

pub use cancel_process_instance::CancelProcessInstanceHandler;
pub use complete_job::CompleteJobHandler;
pub use create_process_instance::CreateProcessInstanceHandler;
pub use fail_job::FailJobHandler;
pub use publish_message::PublishMessageHandler;
pub use resolve_incident::ResolveIncidentHandler;

#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// The command this handler is registered under
    fn command(&self) -> Command;

    async fn handle(
        &self,
        client: &dyn ProcessEngineClient,
        defaults: &CommandDefaults,
        request: CommandRequest,
    ) -> Result<CommandResult, GatewayError>;
}

/// A request reached a handler registered for a different command
pub(crate) fn misrouted(handler: Command, requested: Command) -> GatewayError {
    GatewayError::UnknownCommand(format!(
        "{} was routed to the {} handler",
        requested, handler
    ))
}
