// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Application Layer
//!
//! Command handlers, the router that selects them, the output normalizer
//! and the gateway lifecycle that ties them to one engine connection.

pub mod gateway;
pub mod handlers;
pub mod normalizer;
pub mod router;

pub use gateway::ActivityGateway;
pub use router::CommandRouter;
