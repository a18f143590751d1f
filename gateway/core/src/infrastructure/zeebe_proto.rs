// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Generated protobuf code for the Zeebe gateway protocol

pub mod gateway_protocol {
    tonic::include_proto!("gateway_protocol");
}
