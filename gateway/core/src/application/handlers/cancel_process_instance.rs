// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use super::{misrouted, CommandHandler};
use crate::domain::command::Command;
use crate::domain::defaults::CommandDefaults;
use crate::domain::engine::ProcessEngineClient;
use crate::domain::error::GatewayError;
use crate::domain::request::CommandRequest;
use crate::domain::result::{CancelProcessInstanceResult, CommandResult};
use async_trait::async_trait;
use tracing::{debug, error};

/// Cancels a running process instance
///
/// No deduplication: cancelling the same key twice issues two remote calls.
pub struct CancelProcessInstanceHandler;

#[async_trait]
impl CommandHandler for CancelProcessInstanceHandler {
    fn command(&self) -> Command {
        Command::CancelProcessInstance
    }

    async fn handle(
        &self,
        client: &dyn ProcessEngineClient,
        _defaults: &CommandDefaults,
        request: CommandRequest,
    ) -> Result<CommandResult, GatewayError> {
        let requested = request.command();
        let CommandRequest::CancelProcessInstance(request) = request else {
            return Err(misrouted(self.command(), requested));
        };

        let process_instance_key = request.resolve()?;
        debug!(process_instance_key, "Sending cancel process instance request");

        client
            .cancel_process_instance(process_instance_key)
            .await
            .map_err(|e| {
                error!("Failed to send cancel process instance request: {}", e);
                GatewayError::RemoteCall(e)
            })?;

        Ok(CommandResult::CancelProcessInstance(CancelProcessInstanceResult {
            process_instance_key,
            cancel_process_instance_status: true,
        }))
    }
}
