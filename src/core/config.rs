//! Logger configuration and config-driven builder construction
//!
//! The JSON document looks like:
//!
//! ```json
//! {
//!   "level": "DEBUG",
//!   "AddSource": true,
//!   "IsDefault": false,
//!   "TimeFormat": "RFC3339",
//!   "UTC": true,
//!   "Values": { "company": "cid", "version": 1.0 }
//! }
//! ```

use super::{
    attribute::Value,
    builder::LoggerBuilder,
    error::{LoggerError, Result},
    formatter::Formatter,
    log_level::LogLevel,
    provider::static_value,
    timestamp::TimeLayout,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Parsed logger configuration
///
/// Every field is optional in the input except `level`, whose absence is
/// reported as an invalid (empty) level when the builder is created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    #[serde(rename = "level", alias = "Level", alias = "LogLevel")]
    pub log_level: String,

    #[serde(rename = "AddSource", alias = "addSource", alias = "add_source")]
    pub add_source: bool,

    #[serde(rename = "IsDefault", alias = "isDefault", alias = "is_default")]
    pub is_default: bool,

    /// Layout for the record timestamp; empty disables time formatting
    #[serde(rename = "TimeFormat", alias = "timeFormat", alias = "time_format")]
    pub time_format: String,

    #[serde(rename = "UTC", alias = "utc")]
    pub utc: bool,

    /// Constant attributes added to every record, in key order
    #[serde(rename = "Values", alias = "values")]
    pub values: BTreeMap<String, serde_json::Value>,
}

impl LoggerConfig {
    /// Parse a configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading logger config",
                format!("cannot read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json(&data)
    }

    /// The configured level
    ///
    /// # Panics
    ///
    /// Panics if the level name is not recognized. Use
    /// [`LoggerBuilder::from_config`] to get the recoverable error instead.
    #[track_caller]
    pub fn level(&self) -> LogLevel {
        LogLevel::must_parse(&self.log_level)
    }

    /// The configured timestamp layout, if any
    ///
    /// Fails with [`LoggerError::InvalidConfiguration`] when the layout
    /// cannot render a timestamp.
    pub fn time_layout(&self) -> Result<Option<TimeLayout>> {
        TimeLayout::parse_optional(&self.time_format)
    }
}

impl LoggerBuilder {
    /// Seed a builder from a parsed configuration
    ///
    /// Registers a `time` formatter when a time format is set and one static
    /// provider per entry of `Values`.
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        let level: LogLevel = config.log_level.parse()?;

        let mut builder = LoggerBuilder::new();
        builder
            .set_level(level)
            .set_default(config.is_default)
            .set_add_source(config.add_source);

        if let Some(layout) = config.time_layout()? {
            builder.add_formatter(Formatter::time_format(Some(layout), config.utc));
        }

        for (key, value) in &config.values {
            builder.add_provider(static_value(key.clone(), Value::from_json(value.clone())));
        }

        Ok(builder)
    }

    /// Seed a builder from a JSON configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_config(&LoggerConfig::from_json(json)?)
    }

    /// Seed a builder from a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_config(&LoggerConfig::from_file(path)?)
    }
}
