// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use std::io::Write;
use tempfile::NamedTempFile;
use zeebe_activity_core::domain::command::Command;
use zeebe_activity_core::domain::error::ConfigurationError;
use zeebe_activity_core::domain::settings::GatewaySettings;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_explicit_path() {
    let file = write_config(
        r#"
zeebeBrokerHost: zeebe.internal
zeebeBrokerPort: 26500
command: PublishMessage
usePlainTextConnection: true
"#,
    );

    let settings = GatewaySettings::load(Some(file.path().to_path_buf())).unwrap();

    assert_eq!(settings.command, Command::PublishMessage);
    assert_eq!(settings.connection.broker_port, 26500);
    assert!(settings.connection.use_plain_text_connection);
}

#[test]
fn test_unreadable_path_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.yaml");

    let err = GatewaySettings::from_yaml_file(&missing).unwrap_err();

    assert!(matches!(err, ConfigurationError::Load(_)));
}

#[test]
fn test_non_mapping_document_is_rejected() {
    let file = write_config("- zeebeBrokerHost\n- zeebeBrokerPort\n");

    let err = GatewaySettings::from_yaml_file(file.path()).unwrap_err();

    assert!(err.to_string().contains("mapping"));
}

#[test]
fn test_file_without_command_names_the_setting() {
    let file = write_config("zeebeBrokerHost: zeebe\nzeebeBrokerPort: 26500\n");

    let err = GatewaySettings::from_yaml_file(file.path()).unwrap_err();

    assert_eq!(err, ConfigurationError::MissingSetting { field: "command" });
}
