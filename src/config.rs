//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub admin: AdminConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Insert the default gallery on startup when the gallery is empty
    #[serde(default = "default_seed_gallery")]
    pub seed_gallery: bool,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("clinicbook").to_string_lossy().to_string())
        .unwrap_or_else(|| "./clinicbook_data".to_string())
}

fn default_seed_gallery() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            seed_gallery: default_seed_gallery(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8001
}

fn default_max_body_size() -> usize {
    64 * 1024 // 64 KB
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            max_body_size: default_max_body_size(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Operator account configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Account created when the store has no operators
    #[serde(default = "default_admin_username")]
    pub username: String,

    /// Password for that account; a random one is generated and logged if unset
    #[serde(default)]
    pub initial_password: Option<String>,

    #[serde(default = "default_session_ttl")]
    pub session_ttl_minutes: i64,
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_session_ttl() -> i64 {
    8 * 60
}

/// Longest session lifetime accepted from config: one year
pub const MAX_SESSION_TTL_MINUTES: i64 = 60 * 24 * 365;

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            initial_password: None,
            session_ttl_minutes: default_session_ttl(),
        }
    }
}

impl AdminConfig {
    /// Session lifetime, kept between one minute and one year
    pub fn session_ttl(&self) -> chrono::Duration {
        let minutes = self.session_ttl_minutes.clamp(1, MAX_SESSION_TTL_MINUTES);
        chrono::Duration::minutes(minutes)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("clinicbook").join("config.toml")),
            Some(PathBuf::from("/etc/clinicbook/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(data_dir) = var("CLINICBOOK_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        if let Some(host) = var("CLINICBOOK_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("CLINICBOOK_API_PORT") {
            match port.parse() {
                Ok(p) => self.api.port = p,
                Err(_) => tracing::warn!("Ignoring invalid CLINICBOOK_API_PORT: {}", port),
            }
        }

        if let Some(username) = var("CLINICBOOK_ADMIN_USERNAME") {
            self.admin.username = username;
        }
        if let Some(password) = var("CLINICBOOK_ADMIN_PASSWORD") {
            self.admin.initial_password = Some(password);
        }

        if let Some(level) = var("CLINICBOOK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("CLINICBOOK_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Clinicbook Configuration
#
# Environment variables override these settings:
# - CLINICBOOK_DATA_DIR
# - CLINICBOOK_API_HOST
# - CLINICBOOK_API_PORT
# - CLINICBOOK_ADMIN_USERNAME
# - CLINICBOOK_ADMIN_PASSWORD
# - CLINICBOOK_LOG_LEVEL
# - CLINICBOOK_LOG_FORMAT

[storage]
# Directory holding clinicbook.db
data_dir = "~/.local/share/clinicbook"

# Insert the default gallery images when the gallery is empty
seed_gallery = true

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8001

# Allowed CORS origins (empty = any origin)
cors_origins = []

# Maximum request body size (bytes)
max_body_size = 65536

[admin]
# Operator account created on first start
username = "admin"

# Its password; when unset a random one is generated and logged once
# initial_password = ""

# How long a login stays valid (minutes)
session_ttl_minutes = 480

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
