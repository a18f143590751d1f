// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the zeebe-activity CLI

pub mod catalog;
pub mod config;
pub mod invoke;

pub use self::config::ConfigCommand;
pub use self::invoke::InvokeArgs;
