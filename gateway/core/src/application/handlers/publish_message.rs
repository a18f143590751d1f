// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use super::{misrouted, CommandHandler};
use crate::domain::command::Command;
use crate::domain::defaults::CommandDefaults;
use crate::domain::engine::ProcessEngineClient;
use crate::domain::error::GatewayError;
use crate::domain::request::CommandRequest;
use crate::domain::result::{CommandResult, PublishMessageResult};
use async_trait::async_trait;
use tracing::{debug, error};

/// Publishes a message for correlation with waiting process instances
pub struct PublishMessageHandler;

#[async_trait]
impl CommandHandler for PublishMessageHandler {
    fn command(&self) -> Command {
        Command::PublishMessage
    }

    async fn handle(
        &self,
        client: &dyn ProcessEngineClient,
        _defaults: &CommandDefaults,
        request: CommandRequest,
    ) -> Result<CommandResult, GatewayError> {
        let requested = request.command();
        let CommandRequest::PublishMessage(request) = request else {
            return Err(misrouted(self.command(), requested));
        };

        let message = request.resolve()?;
        let message_name = message.name.clone();
        let message_correlation_key = message.correlation_key.clone();
        let time_to_live = message.time_to_live;
        debug!(
            message_name = %message_name,
            correlation_key = %message_correlation_key,
            ttl_ms = time_to_live.as_millis() as u64,
            "Sending publish message request"
        );

        let published = client.publish_message(message).await.map_err(|e| {
            error!("Failed to send publish message request: {}", e);
            GatewayError::RemoteCall(e)
        })?;
        debug!(message_key = published.key, "Message published");

        Ok(CommandResult::PublishMessage(PublishMessageResult {
            message_name,
            message_correlation_key,
            time_to_live,
            publish_message_status: true,
        }))
    }
}
