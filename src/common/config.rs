//! # Configuration Utilities
//!
//! TOML configuration shared by the CLI and the web server. Every field has
//! a default, so an empty file (or no file at all) is a valid configuration.
//!
//! ```toml
//! [stego]
//! delimiter = "END"
//! seed = 42
//! output_format = "bmp"
//!
//! [web]
//! address = "127.0.0.1:3000"
//! static_dir = "frontend/build"
//! max_upload_bytes = 33554432
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

use crate::processing::encoder::DEFAULT_DELIMITER;
use crate::processing::store::CarrierFormat;

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Arguments
/// - `path`: Path to the TOML configuration file
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
/// - `Err`: File I/O or parsing error
///
/// # Example
/// ```ignore
/// let config: AppConfig = load_config("config/lsb.toml")?;
/// ```
pub fn load_config<T>(path: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read config file {path}"))?;
    let config: T =
        toml::from_str(&content).with_context(|| format!("Failed to parse config file {path}"))?;
    Ok(config)
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub stego: StegoConfig,
    pub web: WebConfig,
}

impl AppConfig {
    /// Load from `path` when given, defaults otherwise.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => load_config(path),
            None => Ok(Self::default()),
        }
    }
}

/// Codec settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StegoConfig {
    /// End-of-message marker appended on embed and searched on extract.
    pub delimiter: String,
    /// Seed for the padding bits. Unset means fresh entropy per embed.
    pub seed: Option<u64>,
    /// Format of carriers produced in memory (web API).
    pub output_format: CarrierFormat,
}

impl Default for StegoConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            seed: None,
            output_format: CarrierFormat::default(),
        }
    }
}

/// Web server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub address: String,
    /// Directory of a static front end served at `/`.
    pub static_dir: Option<String>,
    pub max_upload_bytes: usize,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3000".to_string(),
            static_dir: None,
            max_upload_bytes: 32 * 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.stego.delimiter, "END");
        assert_eq!(config.stego.output_format, CarrierFormat::Bmp);
    }

    #[test]
    fn test_partial_config() {
        let config: AppConfig = toml::from_str(
            r#"
            [stego]
            delimiter = "<<EOF>>"
            seed = 9
            output_format = "png"
            "#,
        )
        .unwrap();

        assert_eq!(config.stego.delimiter, "<<EOF>>");
        assert_eq!(config.stego.seed, Some(9));
        assert_eq!(config.stego.output_format, CarrierFormat::Png);
        assert_eq!(config.web, WebConfig::default());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[web]\naddress = \"0.0.0.0:8080\"").unwrap();

        let config = AppConfig::load(file.path().to_str()).unwrap();
        assert_eq!(config.web.address, "0.0.0.0:8080");
        assert_eq!(config.stego, StegoConfig::default());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        assert!(AppConfig::load(Some("/nonexistent/lsb.toml")).is_err());
        assert!(AppConfig::load(None).is_ok());
    }
}
