//! # Configuration Management for Rowcast
//!
//! This crate provides centralized configuration structures for the rowcast
//! mapping engine, covering handler discovery and row-matching behavior.
//!
//! ## Quick Start
//!
//! ### Programmatic Configuration
//! ```rust
//! use config::MappingConfig;
//!
//! let mapping_config = MappingConfig::new(
//!     vec!["builtin".to_string(), "app.models".to_string()],
//!     false,
//! );
//! ```
//!
//! ### TOML File Configuration
//! ```toml
//! [mapping]
//! handler_namespaces = ["builtin", "app.models"]
//! lenient_column_names = false
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from rowcast.toml
//! let config = AppConfig::load().unwrap();
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml").unwrap();
//! ```

use serde::{Deserialize, Serialize};
use std::{env, path::Path};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./rowcast.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Environment variable error: {0}")]
    Env(#[from] env::VarError),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub mapping: MappingConfig,
}

/// Mapping engine configuration
///
/// `handler_namespaces` is the ordered list of handler packs the registry
/// installs during its one-time discovery pass. `lenient_column_names`
/// enables the case/underscore-insensitive fallback when a column lookup
/// has no exact match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingConfig {
    pub handler_namespaces: Vec<String>,
    #[serde(default)]
    pub lenient_column_names: bool,
}

impl AppConfig {
    /// Load configuration from TOML file specified in .env or defaults
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is fine; env vars may be set directly
        let _ = dotenvy::dotenv();

        let config = if let Ok(config_path) = env::var("ROWCAST_CONFIG") {
            Self::from_file(&config_path)
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)
        } else {
            Err(ConfigError::Invalid(format!(
                "Config path must be specified in .env file as ROWCAST_CONFIG or in {} file",
                DEFAULT_CONFIG_PATH
            )))
        }?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        self.mapping.validate()
    }
}

impl MappingConfig {
    /// Create a new mapping configuration
    pub fn new(handler_namespaces: Vec<String>, lenient_column_names: bool) -> Self {
        Self {
            handler_namespaces,
            lenient_column_names,
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.handler_namespaces.is_empty() {
            return Err(ConfigError::Invalid(
                "At least one handler namespace must be configured".to_string(),
            ));
        }
        for namespace in &self.handler_namespaces {
            if namespace.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "Handler namespace cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for MappingConfig {
    /// Built-in handlers only, exact column-name matching
    fn default() -> Self {
        Self {
            handler_namespaces: vec!["builtin".to_string()],
            lenient_column_names: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MappingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.handler_namespaces, vec!["builtin".to_string()]);
        assert!(!config.lenient_column_names);
    }

    #[test]
    fn test_empty_namespace_list_rejected() {
        let config = MappingConfig::new(vec![], false);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_blank_namespace_rejected() {
        let config = MappingConfig::new(vec!["builtin".to_string(), "  ".to_string()], false);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_from_toml() {
        let parsed: AppConfig = toml::from_str(
            r#"
            [mapping]
            handler_namespaces = ["builtin", "app.models"]
            lenient_column_names = true
            "#,
        )
        .expect("valid TOML");
        assert_eq!(parsed.mapping.handler_namespaces.len(), 2);
        assert!(parsed.mapping.lenient_column_names);
    }

    #[test]
    fn test_lenient_flag_defaults_off() {
        let parsed: AppConfig = toml::from_str(
            r#"
            [mapping]
            handler_namespaces = ["builtin"]
            "#,
        )
        .expect("valid TOML");
        assert!(!parsed.mapping.lenient_column_names);
    }
}
