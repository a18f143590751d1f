// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Presentation Layer
//!
//! Adapters that expose the gateway to host runtimes.

pub mod activity;

pub use activity::{Activity, ActivityContext, ActivityError};
