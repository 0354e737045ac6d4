use crate::error::{GdbkitError, Result};
use crate::models::{TimeZoneSpec, TimestampZones, UnknownModePolicy, LEGACY_EXTENSION};
use crate::naming::{SuffixDeriver, TailPolicy};
use crate::report::{ReportLayout, TableStyleName, DEFAULT_TABLE_NAME};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for gdbkit
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// Legacy document extension, without the dot
    pub extension: ConfigValue<String>,
    pub unknown_mode: ConfigValue<UnknownModePolicy>,
    pub tail_policy: ConfigValue<TailPolicy>,
    pub source_zone: ConfigValue<TimeZoneSpec>,
    pub report_zone: ConfigValue<TimeZoneSpec>,
    pub table_name: ConfigValue<String>,
    pub table_style: ConfigValue<TableStyleName>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            extension: ConfigValue::new(LEGACY_EXTENSION.to_string(), ConfigSource::Default),
            unknown_mode: ConfigValue::new(UnknownModePolicy::Reject, ConfigSource::Default),
            tail_policy: ConfigValue::new(TailPolicy::Legacy, ConfigSource::Default),
            source_zone: ConfigValue::new(TimeZoneSpec::Local, ConfigSource::Default),
            report_zone: ConfigValue::new(TimeZoneSpec::Local, ConfigSource::Default),
            table_name: ConfigValue::new(DEFAULT_TABLE_NAME.to_string(), ConfigSource::Default),
            table_style: ConfigValue::new(TableStyleName::default(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| GdbkitError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| GdbkitError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(convert) = file_config.convert {
            if let Some(extension) = convert.extension {
                self.extension.update(normalize_extension(&extension), ConfigSource::File);
            }
            if let Some(unknown_mode) = convert.unknown_mode {
                self.unknown_mode.update(unknown_mode, ConfigSource::File);
            }
            if let Some(tail_policy) = convert.tail_policy {
                self.tail_policy.update(tail_policy, ConfigSource::File);
            }
        }

        if let Some(inventory) = file_config.inventory {
            if let Some(zone) = inventory.source_zone {
                self.source_zone.update(zone, ConfigSource::File);
            }
            if let Some(zone) = inventory.report_zone {
                self.report_zone.update(zone, ConfigSource::File);
            }
            if let Some(table_name) = inventory.table_name {
                self.table_name.update(table_name, ConfigSource::File);
            }
            if let Some(table_style) = inventory.table_style {
                self.table_style.update(table_style, ConfigSource::File);
            }
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // GDBKIT_EXTENSION
        if let Ok(extension) = env::var("GDBKIT_EXTENSION") {
            self.extension.update(normalize_extension(&extension), ConfigSource::Environment);
        }

        // GDBKIT_UNKNOWN_MODE
        if let Ok(mode_str) = env::var("GDBKIT_UNKNOWN_MODE") {
            match parse_unknown_mode(&mode_str) {
                Ok(mode) => self.unknown_mode.update(mode, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GDBKIT_UNKNOWN_MODE value '{}': expected reject or ignore",
                    mode_str
                ),
            }
        }

        // GDBKIT_TAIL_POLICY
        if let Ok(policy_str) = env::var("GDBKIT_TAIL_POLICY") {
            match parse_tail_policy(&policy_str) {
                Ok(policy) => self.tail_policy.update(policy, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GDBKIT_TAIL_POLICY value '{}': expected legacy or grammar",
                    policy_str
                ),
            }
        }

        // GDBKIT_SOURCE_ZONE / GDBKIT_REPORT_ZONE
        for (var, target) in [
            ("GDBKIT_SOURCE_ZONE", &mut self.source_zone),
            ("GDBKIT_REPORT_ZONE", &mut self.report_zone),
        ] {
            if let Ok(zone_str) = env::var(var) {
                match parse_zone(var, &zone_str) {
                    Ok(zone) => target.update(zone, ConfigSource::Environment),
                    Err(_) => tracing::warn!(
                        "Invalid {} value '{}': expected local, utc, or +HH:MM",
                        var,
                        zone_str
                    ),
                }
            }
        }

        // GDBKIT_TABLE_NAME
        if let Ok(table_name) = env::var("GDBKIT_TABLE_NAME") {
            self.table_name.update(table_name, ConfigSource::Environment);
        }

        // GDBKIT_TABLE_STYLE
        if let Ok(style_str) = env::var("GDBKIT_TABLE_STYLE") {
            match parse_table_style(&style_str) {
                Ok(style) => self.table_style.update(style, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GDBKIT_TABLE_STYLE value '{}': expected e.g. TableStyleMedium2",
                    style_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(extension) = overrides.extension {
            self.extension.update(normalize_extension(&extension), ConfigSource::Cli);
        }

        if let Some(unknown_mode) = overrides.unknown_mode {
            self.unknown_mode.update(unknown_mode, ConfigSource::Cli);
        }

        if let Some(tail_policy) = overrides.tail_policy {
            self.tail_policy.update(tail_policy, ConfigSource::Cli);
        }

        if let Some(zone) = overrides.source_zone {
            self.source_zone.update(zone, ConfigSource::Cli);
        }

        if let Some(zone) = overrides.report_zone {
            self.report_zone.update(zone, ConfigSource::Cli);
        }

        if let Some(table_name) = overrides.table_name {
            self.table_name.update(table_name, ConfigSource::Cli);
        }

        if let Some(table_style) = overrides.table_style {
            self.table_style.update(table_style, ConfigSource::Cli);
        }
    }

    /// Name deriver for the configured extension and tail policy
    pub fn suffix_deriver(&self) -> SuffixDeriver {
        SuffixDeriver::new(self.extension.value.clone(), self.tail_policy.value)
    }

    pub fn timestamp_zones(&self) -> TimestampZones {
        TimestampZones {
            source: self.source_zone.value,
            report: self.report_zone.value,
        }
    }

    pub fn report_layout(&self) -> ReportLayout {
        ReportLayout {
            table_name: self.table_name.value.clone(),
            table_style: self.table_style.value,
            ..ReportLayout::default()
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "extension".to_string(),
            (format!(".{}", self.extension.value), self.extension.source),
        );

        map.insert(
            "unknown_mode".to_string(),
            (format!("{:?}", self.unknown_mode.value), self.unknown_mode.source),
        );

        map.insert(
            "tail_policy".to_string(),
            (format!("{:?}", self.tail_policy.value), self.tail_policy.source),
        );

        map.insert(
            "source_zone".to_string(),
            (self.source_zone.value.to_string(), self.source_zone.source),
        );

        map.insert(
            "report_zone".to_string(),
            (self.report_zone.value.to_string(), self.report_zone.source),
        );

        map.insert("table_name".to_string(), (self.table_name.value.clone(), self.table_name.source));

        map.insert(
            "table_style".to_string(),
            (self.table_style.value.to_string(), self.table_style.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    convert: Option<ConvertFileConfig>,
    inventory: Option<InventoryFileConfig>,
}

#[derive(Debug, Deserialize, Serialize)]
struct ConvertFileConfig {
    extension: Option<String>,
    unknown_mode: Option<UnknownModePolicy>,
    tail_policy: Option<TailPolicy>,
}

#[derive(Debug, Deserialize, Serialize)]
struct InventoryFileConfig {
    source_zone: Option<TimeZoneSpec>,
    report_zone: Option<TimeZoneSpec>,
    table_name: Option<String>,
    table_style: Option<TableStyleName>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub extension: Option<String>,
    pub unknown_mode: Option<UnknownModePolicy>,
    pub tail_policy: Option<TailPolicy>,
    pub source_zone: Option<TimeZoneSpec>,
    pub report_zone: Option<TimeZoneSpec>,
    pub table_name: Option<String>,
    pub table_style: Option<TableStyleName>,
}

fn normalize_extension(s: &str) -> String {
    s.trim().trim_start_matches('.').to_string()
}

/// Parse unknown-mode policy from string
pub fn parse_unknown_mode(s: &str) -> Result<UnknownModePolicy> {
    match s.to_lowercase().as_str() {
        "reject" | "error" => Ok(UnknownModePolicy::Reject),
        "ignore" | "legacy" => Ok(UnknownModePolicy::Ignore),
        _ => Err(GdbkitError::ConfigInvalid {
            key: "unknown_mode".to_string(),
            reason: format!("Invalid unknown mode policy: {}. Use reject or ignore", s),
        }),
    }
}

/// Parse tail policy from string
pub fn parse_tail_policy(s: &str) -> Result<TailPolicy> {
    match s.to_lowercase().as_str() {
        "legacy" => Ok(TailPolicy::Legacy),
        "grammar" => Ok(TailPolicy::Grammar),
        _ => Err(GdbkitError::ConfigInvalid {
            key: "tail_policy".to_string(),
            reason: format!("Invalid tail policy: {}. Use legacy or grammar", s),
        }),
    }
}

/// Parse a time zone for the given configuration key
pub fn parse_zone(key: &str, s: &str) -> Result<TimeZoneSpec> {
    s.parse().map_err(|reason| GdbkitError::ConfigInvalid {
        key: key.to_string(),
        reason,
    })
}

/// Parse a built-in table style name
pub fn parse_table_style(s: &str) -> Result<TableStyleName> {
    s.parse().map_err(|reason| GdbkitError::ConfigInvalid {
        key: "table_style".to_string(),
        reason,
    })
}
