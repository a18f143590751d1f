// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Command Router
//!
//! Maps each [`Command`] to exactly one [`CommandHandler`]. The standard
//! router registers all six; a command with no registered handler fails
//! with `UnknownCommand` and never reaches the engine.

use crate::application::handlers::{
    CancelProcessInstanceHandler, CommandHandler, CompleteJobHandler,
    CreateProcessInstanceHandler, FailJobHandler, PublishMessageHandler, ResolveIncidentHandler,
};
use crate::domain::command::Command;
use crate::domain::defaults::CommandDefaults;
use crate::domain::engine::ProcessEngineClient;
use crate::domain::error::GatewayError;
use crate::domain::request::CommandRequest;
use crate::domain::result::CommandResult;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct CommandRouter {
    handlers: HashMap<Command, Arc<dyn CommandHandler>>,
}

impl CommandRouter {
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Router with a handler for every supported command
    pub fn standard() -> Self {
        let mut router = Self::empty();
        router.register(Arc::new(CreateProcessInstanceHandler));
        router.register(Arc::new(CancelProcessInstanceHandler));
        router.register(Arc::new(PublishMessageHandler));
        router.register(Arc::new(CompleteJobHandler));
        router.register(Arc::new(FailJobHandler));
        router.register(Arc::new(ResolveIncidentHandler));
        router
    }

    /// Register a handler, replacing any previous one for the same command
    pub fn register(&mut self, handler: Arc<dyn CommandHandler>) {
        self.handlers.insert(handler.command(), handler);
    }

    pub fn supports(&self, command: Command) -> bool {
        self.handlers.contains_key(&command)
    }

    pub async fn dispatch(
        &self,
        client: &dyn ProcessEngineClient,
        defaults: &CommandDefaults,
        request: CommandRequest,
    ) -> Result<CommandResult, GatewayError> {
        let command = request.command();
        let handler = self
            .handlers
            .get(&command)
            .ok_or_else(|| GatewayError::UnknownCommand(command.to_string()))?;
        handler.handle(client, defaults, request).await
    }
}

impl Default for CommandRouter {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for CommandRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut commands: Vec<&str> = self.handlers.keys().map(Command::as_str).collect();
        commands.sort_unstable();
        f.debug_struct("CommandRouter")
            .field("commands", &commands)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_router_covers_every_command() {
        let router = CommandRouter::standard();
        for command in Command::ALL {
            assert!(router.supports(command), "no handler for {}", command);
        }
    }

    #[test]
    fn test_empty_router_supports_nothing() {
        let router = CommandRouter::empty();
        assert!(!router.supports(Command::FailJob));
    }
}
