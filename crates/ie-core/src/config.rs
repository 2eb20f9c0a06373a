//! Configuration types and loading
//!
//! Configuration comes from defaults, an optional file, and environment
//! variables, in that order of precedence (later wins).

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Hosted text-generation service configuration
    pub advisory: AdvisoryConfig,

    /// Record store configuration
    pub store: StoreConfig,

    /// Log output configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_seconds: u64,
    pub max_body_size_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_seconds: 60,
            max_body_size_bytes: 2 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdvisoryConfig {
    /// API key for the hosted model. Absent keys are reported per call, not at startup.
    pub api_key: Option<String>,
    /// Model name (e.g., "gemini-2.5-flash")
    pub model: String,
    /// Service base URL
    pub base_url: String,
    /// Upper bound for a single call; expiry yields the fallback text
    pub timeout_seconds: u64,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON snapshot file. `None` keeps records in memory only.
    pub path: Option<String>,
    /// JSON file of projects loaded into an empty store at startup
    pub seed_path: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Overrides `RUST_LOG` when set
    pub filter: Option<String>,
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
    #[error("Config file error: {0}")]
    FileError(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::FileError(err.to_string())
    }
}

impl AppConfig {
    /// Load configuration from environment variables (and a `.env` file if present)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let mut config = Self::default();

        // Server
        if let Ok(host) = std::env::var("HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT".into(),
                message: format!("'{}' is not a port number", port),
            })?;
        }

        // Advisory - GEMINI_API_KEY first, then the generic API_KEY
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            config.advisory.api_key = Some(key);
        } else if let Ok(key) = std::env::var("API_KEY") {
            config.advisory.api_key = Some(key);
        }
        if let Ok(model) = std::env::var("ADVISORY_MODEL") {
            config.advisory.model = model;
        }
        if let Ok(url) = std::env::var("ADVISORY_BASE_URL") {
            config.advisory.base_url = url;
        }
        if let Ok(secs) = std::env::var("ADVISORY_TIMEOUT_SECONDS") {
            config.advisory.timeout_seconds = secs.parse().unwrap_or(30);
        }

        // Store
        if let Ok(path) = std::env::var("STORE_PATH") {
            config.store.path = Some(path);
        }
        if let Ok(path) = std::env::var("SEED_PATH") {
            config.store.seed_path = Some(path);
        }

        // Logging
        if let Ok(format) = std::env::var("LOG_FORMAT") {
            config.logging.format = match format.as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            };
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, with `INSIGHTED__SECTION__KEY` environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let defaults = config::Config::try_from(&Self::default())?;
        let loaded: AppConfig = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("INSIGHTED").separator("__"))
            .build()?
            .try_deserialize()?;

        loaded.validate()?;
        Ok(loaded)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.advisory.base_url).map_err(|e| ConfigError::InvalidValue {
            key: "advisory.base_url".into(),
            message: e.to_string(),
        })?;
        if self.advisory.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "advisory.timeout_seconds".into(),
                message: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Get the server address
    pub fn server_addr(&self) -> std::net::SocketAddr {
        use std::net::SocketAddr;
        let ip: std::net::IpAddr = self.server.host.parse().unwrap_or([0, 0, 0, 0].into());
        SocketAddr::new(ip, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.advisory.timeout_seconds, 30);
        assert!(config.advisory.api_key.is_none());
        assert!(config.store.path.is_none());
    }

    #[test]
    fn test_server_addr() {
        let config = AppConfig::default();
        let addr = config.server_addr();
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 9090\n\n[advisory]\nmodel = \"gemini-test\"\ntimeout_seconds = 5"
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.advisory.model, "gemini-test");
        assert_eq!(config.advisory.timeout_seconds, 5);
        // Untouched sections keep their defaults
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut config = AppConfig::default();
        config.advisory.base_url = "not a url".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = AppConfig::default();
        config.advisory.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }
}
