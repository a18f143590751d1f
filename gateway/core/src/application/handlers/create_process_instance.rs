// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use super::{misrouted, CommandHandler};
use crate::domain::command::Command;
use crate::domain::defaults::CommandDefaults;
use crate::domain::engine::ProcessEngineClient;
use crate::domain::error::GatewayError;
use crate::domain::request::CommandRequest;
use crate::domain::result::{CommandResult, CreateProcessInstanceResult};
use async_trait::async_trait;
use tracing::{debug, error};

/// Starts an instance of the latest version of a deployed process
///
/// The process id comes from the invocation when supplied, else from the
/// gateway settings.
pub struct CreateProcessInstanceHandler;

#[async_trait]
impl CommandHandler for CreateProcessInstanceHandler {
    fn command(&self) -> Command {
        Command::CreateProcessInstance
    }

    async fn handle(
        &self,
        client: &dyn ProcessEngineClient,
        defaults: &CommandDefaults,
        request: CommandRequest,
    ) -> Result<CommandResult, GatewayError> {
        let requested = request.command();
        let CommandRequest::CreateProcessInstance(request) = request else {
            return Err(misrouted(self.command(), requested));
        };

        let instance = request.resolve(defaults)?;
        debug!(
            bpmn_process_id = %instance.bpmn_process_id,
            with_variables = instance.variables.is_some(),
            "Sending create process instance request"
        );

        let created = client
            .create_process_instance(instance)
            .await
            .map_err(|e| {
                error!("Failed to send create process instance request: {}", e);
                GatewayError::RemoteCall(e)
            })?;

        debug!(
            process_instance_key = created.process_instance_key,
            "Process instance created"
        );
        Ok(CommandResult::CreateProcessInstance(CreateProcessInstanceResult {
            bpmn_process_id: created.bpmn_process_id,
            version: created.version,
            process_definition_key: created.process_definition_key,
            process_instance_key: created.process_instance_key,
            create_process_instance_status: true,
        }))
    }
}
