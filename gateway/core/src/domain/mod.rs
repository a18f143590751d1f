// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain
//!
//! Pure types and rules of the activity gateway: the command set, settings,
//! field coercion, default merging, typed requests and results, the output
//! envelope, the error taxonomy, and the engine client contract.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** No I/O; everything here is deterministic and unit-tested

pub mod command;
pub mod coercion;
pub mod defaults;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod gateway_state;
pub mod request;
pub mod result;
pub mod settings;
