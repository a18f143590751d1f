// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Build Script for zeebe-activity-core
//!
//! Compiles the Zeebe gateway protocol subset in `../../proto/zeebe/gateway.proto`
//! into tonic client and server stubs. The generated code lands in `OUT_DIR`
//! and is included via `tonic::include_proto!` in
//! `src/infrastructure/zeebe_proto.rs`.
//!
//! The server half is only used by the in-process fake gateway in the
//! integration tests.
//!
//! # Dependencies
//!
//! - **protoc**: Protocol buffer compiler (vendored via `protoc-bin-vendored`)
//! - **tonic-prost-build**: Code generator for Rust gRPC stubs

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Point prost at the vendored protoc so no system install is required
    std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);

    let proto = "../../proto/zeebe/gateway.proto";

    tonic_prost_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&[proto], &["../../proto/zeebe"])?;

    println!("cargo:rerun-if-changed={}", proto);

    Ok(())
}
