// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Zeebe Activity Core
//!
//! Command-dispatch gateway that lets a workflow host drive a Zeebe process
//! engine through one uniform activity contract.
//!
//! A gateway is configured with exactly one command. Each invocation takes an
//! untyped input record, coerces it into the typed request for that command,
//! issues one remote call and returns a `{status, result}` envelope.
//!
//! | Command | Remote call |
//! |---------|-------------|
//! | `CreateProcessInstance` | start the latest version of a process |
//! | `CancelProcessInstance` | cancel a running instance |
//! | `PublishMessage` | publish a correlation message |
//! | `CompleteJob` | complete an activated job |
//! | `FailJob` | fail a job with remaining retries |
//! | `ResolveIncident` | resolve an incident |
//!
//! # Layers
//!
//! - [`domain`]: commands, settings, coercion, requests, results, errors
//! - [`application`]: handlers, router, normalizer, gateway lifecycle
//! - [`infrastructure`]: Zeebe gRPC client and credential hook
//! - [`presentation`]: host activity adapter
//!
//! # Example
//!
//! ```no_run
//! use zeebe_activity_core::application::ActivityGateway;
//! use zeebe_activity_core::domain::settings::GatewaySettings;
//! use zeebe_activity_core::infrastructure::ZeebeConnector;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = GatewaySettings::load(None)?;
//! let gateway = ActivityGateway::connect(settings, &ZeebeConnector::new()).await?;
//!
//! let input = serde_json::json!({ "jobKey": 2251799813685262_i64 });
//! let output = gateway.invoke(input.as_object().unwrap()).await?;
//! println!("{}", serde_json::to_string(&output)?);
//!
//! gateway.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
