//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use gdbkit_core::config::{
    parse_tail_policy, parse_unknown_mode, CliConfigOverrides, ConfigSource, LayeredConfig,
};
use gdbkit_core::models::{TimeZoneSpec, UnknownModePolicy};
use gdbkit_core::naming::TailPolicy;
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const ENV_VARS: [&str; 7] = [
    "GDBKIT_EXTENSION",
    "GDBKIT_UNKNOWN_MODE",
    "GDBKIT_TAIL_POLICY",
    "GDBKIT_SOURCE_ZONE",
    "GDBKIT_REPORT_ZONE",
    "GDBKIT_TABLE_NAME",
    "GDBKIT_TABLE_STYLE",
];

fn clear_env() {
    for var in ENV_VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_partial_file_configuration() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[inventory]
# Only override the table name, leave others as defaults
table_name = "Items2024"
"#
    )
    .unwrap();

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

    assert_eq!(config.table_name.value, "Items2024");
    assert_eq!(config.table_name.source, ConfigSource::File);
    assert_eq!(config.extension.value, "mxd");
    assert_eq!(config.extension.source, ConfigSource::Default);
    assert_eq!(config.unknown_mode.source, ConfigSource::Default);
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();
    env::set_var("GDBKIT_UNKNOWN_MODE", "ignore");
    env::set_var("GDBKIT_SOURCE_ZONE", "utc");
    env::set_var("GDBKIT_TABLE_NAME", "EnvItems");

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[convert]
unknown_mode = "Reject"

[inventory]
source_zone = "+02:00"
table_name = "FileItems"
"#
    )
    .unwrap();

    let config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    assert_eq!(config.unknown_mode.value, UnknownModePolicy::Ignore);
    assert_eq!(config.unknown_mode.source, ConfigSource::Environment);
    assert_eq!(config.source_zone.value, TimeZoneSpec::Utc);
    assert_eq!(config.source_zone.source, ConfigSource::Environment);
    assert_eq!(config.table_name.value, "EnvItems");

    clear_env();
}

#[test]
#[serial]
fn test_invalid_environment_value_is_ignored() {
    clear_env();
    env::set_var("GDBKIT_TABLE_STYLE", "Sparkly");
    env::set_var("GDBKIT_REPORT_ZONE", "somewhere");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.table_style.value.to_string(), "TableStyleMedium2");
    assert_eq!(config.table_style.source, ConfigSource::Default);
    assert_eq!(config.report_zone.source, ConfigSource::Default);

    clear_env();
}

#[test]
#[serial]
fn test_full_configuration_workflow() {
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("gdbkit.toml");
    fs::write(
        &config_path,
        r#"
[convert]
extension = "mxd"
tail_policy = "Grammar"

[inventory]
report_zone = "-05:00"
"#,
    )
    .unwrap();

    env::set_var("GDBKIT_TAIL_POLICY", "legacy");
    env::set_var("GDBKIT_EXTENSION", ".pmf");

    let mut config = LayeredConfig::with_defaults()
        .load_from_file(&config_path)
        .unwrap()
        .load_from_env();

    assert_eq!(config.tail_policy.value, TailPolicy::Legacy);
    assert_eq!(config.tail_policy.source, ConfigSource::Environment);
    assert_eq!(config.extension.value, "pmf");
    assert_eq!(config.report_zone.source, ConfigSource::File);

    config.update_from_cli(CliConfigOverrides {
        tail_policy: Some(TailPolicy::Grammar),
        report_zone: Some(TimeZoneSpec::Utc),
        ..Default::default()
    });

    assert_eq!(config.tail_policy.value, TailPolicy::Grammar);
    assert_eq!(config.tail_policy.source, ConfigSource::Cli);
    assert_eq!(config.report_zone.value, TimeZoneSpec::Utc);
    assert_eq!(config.suffix_deriver().policy(), TailPolicy::Grammar);

    // Verify precedence levels
    assert!(ConfigSource::Cli.precedence() > ConfigSource::Environment.precedence());
    assert!(ConfigSource::Environment.precedence() > ConfigSource::File.precedence());
    assert!(ConfigSource::File.precedence() > ConfigSource::Default.precedence());

    clear_env();
}

#[test]
fn test_parse_policy_variations() {
    assert_eq!(parse_unknown_mode("Reject").unwrap(), UnknownModePolicy::Reject);
    assert_eq!(parse_unknown_mode("error").unwrap(), UnknownModePolicy::Reject);
    assert_eq!(parse_unknown_mode("LEGACY").unwrap(), UnknownModePolicy::Ignore);
    assert!(parse_unknown_mode("sometimes").is_err());

    assert_eq!(parse_tail_policy("LEGACY").unwrap(), TailPolicy::Legacy);
    assert_eq!(parse_tail_policy("grammar").unwrap(), TailPolicy::Grammar);
    assert!(parse_tail_policy("").is_err());
}

#[test]
fn test_invalid_toml_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "invalid toml content [[[").unwrap();

    let result = LayeredConfig::with_defaults().load_from_file(file.path());

    assert!(result.is_err());
}

#[test]
fn test_missing_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let non_existent = temp_dir.path().join("does_not_exist.toml");

    let result = LayeredConfig::with_defaults().load_from_file(&non_existent);

    assert!(result.is_err());
}
