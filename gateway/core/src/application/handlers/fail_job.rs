// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use super::{misrouted, CommandHandler};
use crate::domain::command::Command;
use crate::domain::defaults::CommandDefaults;
use crate::domain::engine::ProcessEngineClient;
use crate::domain::error::GatewayError;
use crate::domain::request::CommandRequest;
use crate::domain::result::{CommandResult, FailJobResult};
use async_trait::async_trait;
use tracing::{debug, error};

/// Fails a job, leaving it the given number of retries
///
/// Retries come from the invocation when supplied (`> 0`), else from the
/// `failJobRetries` setting. The result reports the count actually sent.
pub struct FailJobHandler;

#[async_trait]
impl CommandHandler for FailJobHandler {
    fn command(&self) -> Command {
        Command::FailJob
    }

    async fn handle(
        &self,
        client: &dyn ProcessEngineClient,
        defaults: &CommandDefaults,
        request: CommandRequest,
    ) -> Result<CommandResult, GatewayError> {
        let requested = request.command();
        let CommandRequest::FailJob(request) = request else {
            return Err(misrouted(self.command(), requested));
        };

        let failure = request.resolve(defaults)?;
        let job_key = failure.job_key;
        let retries = failure.retries;
        debug!(job_key, retries, "Sending fail job request");

        let ack = client.fail_job(failure).await.map_err(|e| {
            error!("Failed to send fail job request: {}", e);
            GatewayError::RemoteCall(e)
        })?;

        Ok(CommandResult::FailJob(FailJobResult {
            job_key,
            retries,
            fail_job_response_text: ack.descriptor,
        }))
    }
}
