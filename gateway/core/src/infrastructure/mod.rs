// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Infrastructure Layer
//!
//! The Zeebe gRPC adapter behind the engine client contract, and the
//! credential hook it applies to outgoing calls.

pub mod credentials;
pub mod zeebe_client;
pub mod zeebe_proto;

pub use credentials::{CredentialsProvider, StaticTokenProvider};
pub use zeebe_client::{ZeebeClient, ZeebeConnector};
