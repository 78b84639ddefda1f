//! Configuration management for the Tessera site builder.
//!
//! Parses `tessera.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `domain.base`
//! - `auth.secret`
//! - `storage.path` (plus `~` expansion)

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "tessera.toml";

/// Minimum accepted auth secret length when enforcement is on.
const MIN_SECRET_LEN: usize = 32;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override the public base domain.
    pub base_domain: Option<String>,
    /// Override the store file path.
    pub data_path: Option<PathBuf>,
    /// Override auth enforcement.
    pub enforce_auth: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server bind configuration.
    pub server: ServerConfig,
    /// Public domain configuration.
    pub domain: DomainConfig,
    /// Authentication configuration.
    pub auth: AuthConfig,
    /// Storage backend configuration.
    pub storage: StorageConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7700,
        }
    }
}

/// Public domain configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DomainConfig {
    /// Base domain tenant subdomains hang off (e.g. "example.com").
    pub base: String,
    /// Public URL scheme, `http` or `https`.
    pub scheme: String,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            base: "localhost".to_owned(),
            scheme: "http".to_owned(),
        }
    }
}

/// Authentication configuration.
///
/// Enforcement is an explicit, always-evaluated flag rather than an implicit
/// environment check; development setups opt out with `enforce = false`.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared secret for token signing and verification.
    pub secret: String,
    /// Require a valid token on tenant subdomains.
    pub enforce: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            enforce: true,
        }
    }
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// In-memory store; contents are lost on restart.
    Memory,
    /// Single-file JSON store.
    #[default]
    File,
}

/// Storage configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Which backend to use.
    pub backend: StorageBackend,
    /// Store file path (file backend only). Supports `~`.
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            path: ".tessera/data.json".to_owned(),
        }
    }
}

impl StorageConfig {
    /// The store path with `~` expanded.
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.path).into_owned())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g. "`auth.secret`").
        field: String,
        /// Error message (e.g. "${`TESSERA_SECRET`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `tessera.toml` in the current directory and
    /// parents, falling back to defaults when none exists.
    ///
    /// CLI settings are applied after loading, so CLI arguments take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist, parsing
    /// fails, or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(base) = &settings.base_domain {
            self.domain.base.clone_from(base);
        }
        if let Some(path) = &settings.data_path {
            self.storage.path = path.display().to_string();
        }
        if let Some(enforce) = settings.enforce_auth {
            self.auth.enforce = enforce;
        }
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        self.domain.base = expand::expand_env(&self.domain.base, "domain.base")?;
        self.auth.secret = expand::expand_env(&self.auth.secret, "auth.secret")?;
        self.storage.path = expand::expand_env(&self.storage.path, "storage.path")?;
        Ok(())
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        require_non_empty(&self.domain.base, "domain.base")?;
        if self.domain.base.contains("://") || self.domain.base.contains('/') {
            return Err(ConfigError::Validation(
                "domain.base must be a bare hostname, not a URL".to_owned(),
            ));
        }
        if self.domain.scheme != "http" && self.domain.scheme != "https" {
            return Err(ConfigError::Validation(
                "domain.scheme must be http or https".to_owned(),
            ));
        }

        if self.auth.enforce && self.auth.secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Validation(format!(
                "auth.secret must be at least {MIN_SECRET_LEN} characters when auth.enforce is on"
            )));
        }

        if self.storage.backend == StorageBackend::File {
            require_non_empty(&self.storage.path, "storage.path")?;
        }

        Ok(())
    }
}
