//! Printer configuration loaded from files or built in code.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::PrinterError;
use crate::printer::DateFormat;

/// Settings for one printer.
///
/// ```yaml
/// path: logs/app.log
/// level: 2
/// timestamp: true
/// date_format: "yyyy-MM-dd HH:mm:ss"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PrinterConfig {
    /// Output file (required for file printers, ignored by terminal printers)
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Maximum debug level; `0` disables debug output
    #[serde(default)]
    pub level: i32,
    /// Prefix messages with a timestamp
    #[serde(default)]
    pub timestamp: bool,
    /// Timestamp pattern: `SimpleDateFormat` letters or strftime
    #[serde(default)]
    pub date_format: Option<String>,
}

impl PrinterConfig {
    /// Create a new empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output file.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the maximum debug level.
    pub fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    /// Enable or disable timestamps.
    pub fn with_timestamp(mut self, timestamp: bool) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Set the timestamp pattern.
    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = Some(date_format.into());
        self
    }

    /// Parse the configured timestamp pattern, if any.
    pub fn parsed_date_format(&self) -> Result<Option<DateFormat>, PrinterError> {
        self.date_format.as_deref().map(str::parse::<DateFormat>).transpose()
    }

    /// Parse a configuration from a JSON string.
    #[cfg(feature = "json")]
    pub fn from_json_str(s: &str) -> Result<Self, PrinterError> {
        serde_json::from_str(s).map_err(|e| PrinterError::Config(e.to_string()))
    }

    /// Parse a configuration from a YAML string.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(s: &str) -> Result<Self, PrinterError> {
        serde_yaml::from_str(s).map_err(|e| PrinterError::Config(e.to_string()))
    }

    /// Load a configuration file, picking the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PrinterError> {
        let path = path.as_ref();
        #[cfg_attr(not(any(feature = "json", feature = "yaml")), allow(unused_variables))]
        let text = fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            #[cfg(feature = "json")]
            "json" => Self::from_json_str(&text),
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => Self::from_yaml_str(&text),
            _ => Err(PrinterError::Config(format!(
                "unsupported config file '{}' (enable the matching format feature)",
                path.display()
            ))),
        }
    }
}
