// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use super::{misrouted, CommandHandler};
use crate::domain::command::Command;
use crate::domain::defaults::CommandDefaults;
use crate::domain::engine::ProcessEngineClient;
use crate::domain::error::GatewayError;
use crate::domain::request::CommandRequest;
use crate::domain::result::{CommandResult, ResolveIncidentResult};
use async_trait::async_trait;
use tracing::{debug, error};

pub struct ResolveIncidentHandler;

#[async_trait]
impl CommandHandler for ResolveIncidentHandler {
    fn command(&self) -> Command {
        Command::ResolveIncident
    }

    async fn handle(
        &self,
        client: &dyn ProcessEngineClient,
        _defaults: &CommandDefaults,
        request: CommandRequest,
    ) -> Result<CommandResult, GatewayError> {
        let requested = request.command();
        let CommandRequest::ResolveIncident(request) = request else {
            return Err(misrouted(self.command(), requested));
        };

        let incident_key = request.resolve()?;
        debug!(incident_key, "Sending resolve incident request");

        let ack = client.resolve_incident(incident_key).await.map_err(|e| {
            error!("Failed to send resolve incident request: {}", e);
            GatewayError::RemoteCall(e)
        })?;

        Ok(CommandResult::ResolveIncident(ResolveIncidentResult {
            incident_key,
            resolve_incident_response_text: ack.descriptor,
        }))
    }
}
