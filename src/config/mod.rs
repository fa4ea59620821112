//! Configuration module for strokewatch
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`STROKEWATCH_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use strokewatch::config::StrokewatchConfig;
//!
//! let config = StrokewatchConfig::default();
//! assert_eq!(config.backend.base_url, "http://127.0.0.1:5000");
//!
//! let toml = r#"
//! [backend]
//! base_url = "http://10.0.0.5:5000"
//! "#;
//! let config: StrokewatchConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.backend.base_url, "http://10.0.0.5:5000");
//! assert_eq!(config.backend.timeout_seconds, 30);
//! ```

pub mod alerts;
pub mod backend;
pub mod dispatch;
pub mod error;
pub mod logging;

pub use alerts::AlertConfig;
pub use backend::BackendConfig;
pub use dispatch::{DispatchConfig, OrderingPolicy};
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the strokewatch client.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StrokewatchConfig {
    /// Backend address and timeout
    pub backend: BackendConfig,
    /// Caregiver alert behavior
    pub alerts: AlertConfig,
    /// Overlapping-request policy
    pub dispatch: DispatchConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl StrokewatchConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply `STROKEWATCH_*` environment variable overrides.
    ///
    /// Unparseable values are ignored and the previous value is kept.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("STROKEWATCH_BACKEND_URL") {
            self.backend.base_url = url;
        }
        if let Ok(timeout) = std::env::var("STROKEWATCH_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.backend.timeout_seconds = t;
            }
        }

        if let Ok(level) = std::env::var("STROKEWATCH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("STROKEWATCH_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(alerts) = std::env::var("STROKEWATCH_ALERTS") {
            self.alerts.enabled = alerts.to_lowercase() == "true";
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.backend.normalized_base_url();
        if url.is_empty() {
            return Err(ConfigError::invalid(
                "backend.base_url",
                "URL cannot be empty",
            ));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "backend.base_url",
                format!("'{}' must start with http:// or https://", url),
            ));
        }
        if self.backend.timeout_seconds == 0 {
            return Err(ConfigError::invalid(
                "backend.timeout_seconds",
                "timeout must be non-zero",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_config_defaults() {
        let config = StrokewatchConfig::default();
        assert_eq!(config.backend.base_url, "http://127.0.0.1:5000");
        assert!(config.alerts.enabled);
        assert_eq!(config.alerts.patient_info, "User Input");
        assert_eq!(config.dispatch.ordering, OrderingPolicy::LatestSubmission);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_parse_full_example() {
        let toml = include_str!("../../strokewatch.example.toml");
        let config: StrokewatchConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_config_parse_partial_sections() {
        let toml = r#"
        [alerts]
        enabled = false

        [dispatch]
        ordering = "last_response"
        "#;

        let config: StrokewatchConfig = toml::from_str(toml).unwrap();
        assert!(!config.alerts.enabled);
        assert_eq!(config.alerts.patient_info, "User Input");
        assert_eq!(config.dispatch.ordering, OrderingPolicy::LastResponse);
        assert_eq!(config.backend.timeout_seconds, 30);
    }

    #[test]
    fn test_config_load_from_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[backend]\ntimeout_seconds = 5").unwrap();

        let config = StrokewatchConfig::load(Some(temp.path())).unwrap();
        assert_eq!(config.backend.timeout_seconds, 5);
    }

    #[test]
    fn test_config_missing_file_error() {
        let result = StrokewatchConfig::load(Some(Path::new("/nonexistent/strokewatch.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_config_invalid_toml_error() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[backend\nbase_url = ").unwrap();

        let result = StrokewatchConfig::load(Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_env_override_backend_url() {
        std::env::set_var("STROKEWATCH_BACKEND_URL", "http://192.168.1.20:5000");
        let config = StrokewatchConfig::default().with_env_overrides();
        std::env::remove_var("STROKEWATCH_BACKEND_URL");

        assert_eq!(config.backend.base_url, "http://192.168.1.20:5000");
    }

    #[test]
    fn test_config_env_override_invalid_timeout_ignored() {
        std::env::set_var("STROKEWATCH_TIMEOUT", "soon");
        let config = StrokewatchConfig::default().with_env_overrides();
        std::env::remove_var("STROKEWATCH_TIMEOUT");

        assert_eq!(config.backend.timeout_seconds, 30);
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut config = StrokewatchConfig::default();
        config.backend.base_url = "127.0.0.1:5000".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "backend.base_url"));

        config.backend.base_url = "   ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_padded_url_as_used() {
        let mut config = StrokewatchConfig::default();
        config.backend.base_url = " http://host:5000/ ".to_string();
        assert!(config.validate().is_ok());
        assert_eq!(config.backend.normalized_base_url(), "http://host:5000");

        config.backend.base_url = " /".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = StrokewatchConfig::default();
        config.backend.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }
}
