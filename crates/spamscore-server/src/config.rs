//! Server configuration

use serde::{Deserialize, Serialize};
use spamscore_classifiers::ModelPaths;
use spamscore_core::{Error, Result, DEFAULT_THRESHOLD};
use std::path::{Path, PathBuf};
use tracing::info;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Artifact locations, relative to the working directory
    #[serde(default)]
    pub model: ModelPaths,

    /// Threshold used when a request omits one
    #[serde(default = "default_threshold")]
    pub default_threshold: f64,

    /// Largest accepted request body
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl ServerConfig {
    /// Load configuration from a YAML file, or defaults when it does not exist
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            info!("No config file at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::config(format!("{}: {e}", config_path.display())))?;
        info!("Configuration loaded from {}", config_path.display());
        Ok(config)
    }

    /// Apply command-line overrides on top of file values
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(listen) = overrides.listen {
            self.listen = listen;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(path) = overrides.classifier_path {
            self.model.classifier_path = path;
        }
        if let Some(path) = overrides.vectorizer_path {
            self.model.vectorizer_path = path;
        }
        if let Some(threshold) = overrides.default_threshold {
            self.default_threshold = threshold;
        }
        if let Some(enabled) = overrides.metrics_enabled {
            self.metrics.enabled = enabled;
        }
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if !self.default_threshold.is_finite() {
            return Err(Error::config("default_threshold must be a finite number"));
        }
        if self.max_body_bytes == 0 {
            return Err(Error::config("max_body_bytes must be greater than zero"));
        }
        Ok(())
    }

    /// `listen:port` string for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listen, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
            model: ModelPaths::default(),
            default_threshold: default_threshold(),
            max_body_bytes: default_max_body_bytes(),
            metrics: MetricsConfig::default(),
        }
    }
}

/// Metrics configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Install the Prometheus recorder and serve `/metrics`
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub listen: Option<String>,
    pub port: Option<u16>,
    pub classifier_path: Option<PathBuf>,
    pub vectorizer_path: Option<PathBuf>,
    pub default_threshold: Option<f64>,
    pub metrics_enabled: Option<bool>,
}

fn default_listen() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = ServerConfig::load("/nonexistent/spamscore.yaml").unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_address(), "127.0.0.1:5000");
        assert_eq!(config.model.classifier_path, PathBuf::from("models/best_model.json"));
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "port: 8080\nmodel:\n  classifier_path: /srv/model.json\nmetrics:\n  enabled: false"
        )
        .unwrap();

        let config = ServerConfig::load(file.path()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.model.classifier_path, PathBuf::from("/srv/model.json"));
        assert_eq!(config.model.vectorizer_path, PathBuf::from("models/vectorizer.json"));
        assert!(!config.metrics.enabled);
        assert_eq!(config.default_threshold, 0.5);
    }

    #[test]
    fn test_invalid_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "port: not-a-port").unwrap();

        let err = ServerConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_overrides_win() {
        let mut config = ServerConfig::default();
        config.apply_overrides(ConfigOverrides {
            port: Some(9000),
            vectorizer_path: Some(PathBuf::from("v.yaml")),
            default_threshold: Some(0.8),
            ..Default::default()
        });

        assert_eq!(config.port, 9000);
        assert_eq!(config.listen, "127.0.0.1");
        assert_eq!(config.model.vectorizer_path, PathBuf::from("v.yaml"));
        assert_eq!(config.default_threshold, 0.8);
    }

    #[test]
    fn test_validate() {
        let mut config = ServerConfig::default();
        assert!(config.validate().is_ok());

        config.default_threshold = f64::NAN;
        assert!(config.validate().is_err());

        config.default_threshold = 0.5;
        config.max_body_bytes = 0;
        assert!(config.validate().is_err());
    }
}
