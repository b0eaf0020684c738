//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - An explicit file (`--config` / `TCPOSTMAN_CONFIG`)
//! - The first existing file among the default locations
//!
//! `TCApi2Postman.config` and `.json` files are read with the same lenient
//! parser as structure.js (comments allowed). Command-line flags are applied
//! on top by the handlers.

use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tcpostman_core::{GenerationOptions, Variables};
use tcpostman_schemas::StructureParser;

/// Configuration file name used by existing installations
pub const LEGACY_CONFIG_FILE: &str = "TCApi2Postman.config";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Request header sent in every body; built-in default when absent
    pub header: Option<Value>,

    /// Values of the collection variables
    pub variables: Variables,

    /// Generate Soa.Internal libraries without `--include-internal`
    pub include_internal: bool,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingSettings,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print the collection file
    pub pretty: bool,

    /// Use colored output by default
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            color: true,
        }
    }
}

/// Logging configuration, applied before environment overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,

    /// Log file path
    pub file: Option<PathBuf>,
}

/// Format of a configuration file, by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_str_with_format(&content, path)
    }

    fn from_str_with_format(content: &str, path: &Path) -> Result<Self> {
        let config = match ConfigFormat::from_path(path) {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Json => {
                let value = StructureParser::new()
                    .parse_lenient_json(content, path)
                    .map_err(|e| Error::config(e.to_string()))?;
                serde_json::from_value(value)?
            }
        };

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration from the default locations relative to `cwd`
    pub fn load_from(cwd: &Path) -> Result<Self> {
        match Self::default_config_paths(cwd).into_iter().find(|p| p.exists()) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        match file {
            Some(path) => Self::from_file(path),
            None => Self::load_from(&std::env::current_dir()?),
        }
    }

    /// Default configuration file paths, in lookup order
    fn default_config_paths(cwd: &Path) -> Vec<PathBuf> {
        let mut paths = vec![
            cwd.join(LEGACY_CONFIG_FILE),
            cwd.join("tcpostman.json"),
            cwd.join("tcpostman.yaml"),
            cwd.join("tcpostman.yml"),
            cwd.join("tcpostman.toml"),
        ];

        // User config directory
        if let Some(config_dir) = dirs::config_dir() {
            let app_dir = config_dir.join("tcpostman");
            paths.push(app_dir.join("config.json"));
            paths.push(app_dir.join("config.yaml"));
            paths.push(app_dir.join("config.toml"));
        }

        paths
    }

    /// Options for one generator run
    pub fn generation_options(&self, generated_at: NaiveDateTime, include_internal: bool) -> Result<GenerationOptions> {
        let options = GenerationOptions::new(generated_at)
            .with_include_internal(include_internal)
            .with_variables(self.variables.clone());

        match &self.header {
            Some(header) => Ok(options.with_header(header.clone())?),
            None => Ok(options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_legacy_config_with_comments() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(LEGACY_CONFIG_FILE),
            r#"{
                // sent with every request
                "header": {"state": {"stateless": true}},
                "variables": {"TCURL": "http://plm", "TCURL_WEBTIER_PORT": 8080}
            }"#,
        )
        .unwrap();

        let config = Config::load_from(dir.path()).unwrap();
        assert_eq!(config.header, Some(json!({"state": {"stateless": true}})));
        assert_eq!(config.variables.tcurl, "http://plm");
        assert_eq!(config.variables.webtier_port, "8080");
        assert_eq!(config.variables.app_name, "tc");
        assert!(config.output.pretty);
    }

    #[test]
    fn test_yaml_and_toml() {
        let dir = tempfile::tempdir().unwrap();

        let yaml = dir.path().join("c.yaml");
        std::fs::write(&yaml, "include_internal: true\noutput:\n  pretty: false\n").unwrap();
        let config = Config::from_file(&yaml).unwrap();
        assert!(config.include_internal);
        assert!(!config.output.pretty);
        assert!(config.output.color);

        let toml_path = dir.path().join("c.toml");
        std::fs::write(&toml_path, "[variables]\nWEBTIER_APP_NAME = \"tc13\"\n\n[logging]\nlevel = \"debug\"\n").unwrap();
        let config = Config::from_file(&toml_path).unwrap();
        assert_eq!(config.variables.app_name, "tc13");
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = Config::from_file(Path::new("/nonexistent/tcpostman.json")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tcpostman.json");
        std::fs::write(&path, "{ \"header\": [1, 2").unwrap();
        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn test_generation_options() {
        let config = Config {
            header: Some(json!({"state": {}})),
            ..Config::default()
        };
        let options = config.generation_options(at(), true).unwrap();
        assert!(options.include_internal);
        assert_eq!(options.request_header(), json!({"state": {}}));

        let bad = Config {
            header: Some(json!("text")),
            ..Config::default()
        };
        let err = bad.generation_options(at(), false).unwrap_err();
        assert!(matches!(err, Error::Core(_)));
    }
}
