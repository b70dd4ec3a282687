//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.priceavg.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Entry input settings.
    #[serde(default)]
    pub input: InputConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { verbose: false }
    }
}

/// Entry input settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Field delimiter, a single character (use "\t" for TSV).
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Whether the first row of entry files is a header to skip.
    #[serde(default = "default_has_headers")]
    pub has_headers: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            has_headers: default_has_headers(),
        }
    }
}

fn default_delimiter() -> String {
    ",".to_string()
}

fn default_has_headers() -> bool {
    true
}

impl InputConfig {
    /// The delimiter as a byte, validated to be a single ASCII character.
    pub fn delimiter_byte(&self) -> Result<u8> {
        let bytes = self.delimiter.as_bytes();
        if bytes.len() == 1 && bytes[0].is_ascii() {
            Ok(bytes[0])
        } else {
            anyhow::bail!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )
        }
    }
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Decimal places for quantities.
    #[serde(default = "default_quantity_precision")]
    pub quantity_precision: usize,

    /// Decimal places for prices.
    #[serde(default = "default_price_precision")]
    pub price_precision: usize,

    /// Include the entry rows in reports, not just the summary.
    #[serde(default)]
    pub include_entries: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            quantity_precision: default_quantity_precision(),
            price_precision: default_price_precision(),
            include_entries: false,
        }
    }
}

fn default_quantity_precision() -> usize {
    3
}

fn default_price_precision() -> usize {
    2
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".priceavg.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        // Optional settings - only override if provided
        if let Some(delimiter) = args.delimiter {
            self.input.delimiter = delimiter.to_string();
        }
        if let Some(precision) = args.quantity_precision {
            self.report.quantity_precision = precision;
        }
        if let Some(precision) = args.price_precision {
            self.report.price_precision = precision;
        }

        // Flags always override
        if args.no_headers {
            self.input.has_headers = false;
        }
        if args.entries {
            self.report.include_entries = true;
        }
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input.delimiter, ",");
        assert!(config.input.has_headers);
        assert_eq!(config.report.quantity_precision, 3);
        assert_eq!(config.report.price_precision, 2);
        assert!(!config.report.include_entries);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
verbose = true

[input]
delimiter = ";"
has_headers = false

[report]
price_precision = 4
include_entries = true
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert!(config.general.verbose);
        assert_eq!(config.input.delimiter, ";");
        assert!(!config.input.has_headers);
        assert_eq!(config.report.price_precision, 4);
        // Unspecified fields keep their defaults.
        assert_eq!(config.report.quantity_precision, 3);
        assert!(config.report.include_entries);
    }

    #[test]
    fn test_delimiter_byte() {
        let mut input = InputConfig::default();
        assert_eq!(input.delimiter_byte().unwrap(), b',');

        input.delimiter = "\t".to_string();
        assert_eq!(input.delimiter_byte().unwrap(), b'\t');

        input.delimiter = "abc".to_string();
        assert!(input.delimiter_byte().is_err());

        input.delimiter = "€".to_string();
        assert!(input.delimiter_byte().is_err());
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[input]"));
        assert!(toml_str.contains("[report]"));
    }
}
