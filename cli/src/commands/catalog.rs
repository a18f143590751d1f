// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Supported command listing

use colored::Colorize;
use zeebe_activity_core::domain::command::Command;

pub fn list() {
    println!("{}", "Supported commands:".bold());
    for command in Command::ALL {
        println!(
            "  {} requires: {}",
            format!("{:<24}", command.as_str()).bold(),
            command.required_inputs().join(", ")
        );
    }
}
