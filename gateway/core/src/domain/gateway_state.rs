// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Gateway State
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Lifecycle states of an activity gateway

use serde::Serialize;
use std::fmt;

/// Gateway lifecycle: `Uninitialized -> Ready -> Closed`
///
/// Only a `Ready` gateway accepts invocations. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GatewayState {
    Uninitialized,
    Ready,
    Closed,
}

impl fmt::Display for GatewayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GatewayState::Uninitialized => "uninitialized",
            GatewayState::Ready => "ready",
            GatewayState::Closed => "closed",
        };
        f.write_str(name)
    }
}
