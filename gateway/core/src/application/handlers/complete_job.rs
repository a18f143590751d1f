// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use super::{misrouted, CommandHandler};
use crate::domain::command::Command;
use crate::domain::defaults::CommandDefaults;
use crate::domain::engine::ProcessEngineClient;
use crate::domain::error::GatewayError;
use crate::domain::request::CommandRequest;
use crate::domain::result::{CommandResult, CompleteJobResult};
use async_trait::async_trait;
use tracing::{debug, error};

pub struct CompleteJobHandler;

#[async_trait]
impl CommandHandler for CompleteJobHandler {
    fn command(&self) -> Command {
        Command::CompleteJob
    }

    async fn handle(
        &self,
        client: &dyn ProcessEngineClient,
        _defaults: &CommandDefaults,
        request: CommandRequest,
    ) -> Result<CommandResult, GatewayError> {
        let requested = request.command();
        let CommandRequest::CompleteJob(request) = request else {
            return Err(misrouted(self.command(), requested));
        };

        let (job_key, variables) = request.resolve()?;
        debug!(job_key, with_variables = variables.is_some(), "Sending complete job request");

        let ack = client.complete_job(job_key, variables).await.map_err(|e| {
            error!("Failed to send complete job request: {}", e);
            GatewayError::RemoteCall(e)
        })?;

        Ok(CommandResult::CompleteJob(CompleteJobResult {
            job_key,
            complete_job_response_text: ack.descriptor,
        }))
    }
}
