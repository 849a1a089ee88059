//! Service configuration.
//!
//! Loads configuration with a precedence system (later sources override earlier):
//! - Bundled defaults (include_str! from wayfarer.toml)
//! - User config in home directory (~/.config/wayfarer/wayfarer.toml)
//! - User config in current directory (./wayfarer.toml)
//! - An explicit file passed on the command line
//! - `WAYFARER_*` environment variables, `__` between sections
//! - `XAI_API_KEY`

use config::{Config, Environment as EnvironmentSource, File, FileFormat};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};
use wayfarer_cache::CacheStoreConfig;
use wayfarer_error::ConfigError;
use wayfarer_models::LlmConfig;
use wayfarer_workflow::RetryPolicy;

const DEFAULT_CONFIG: &str = include_str!("../../../wayfarer.toml");

/// Deployment mode, deciding which planner backs the API.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    /// Live completions from the configured provider
    Production,
    /// Canned results, no provider or cache
    #[default]
    Development,
    /// Full pipeline against the deterministic mock provider
    Test,
}

/// Cache section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct CacheSettings {
    /// Cache host, reserved for a networked store
    #[serde(default = "default_cache_host")]
    host: String,

    /// Cache port
    #[serde(default = "default_cache_port")]
    port: u16,

    /// Entry lifetime (seconds)
    #[serde(default = "default_ttl_secs")]
    ttl_secs: u64,

    /// Maximum stored entries
    #[serde(default = "default_max_entries")]
    max_entries: usize,

    /// Whether results are cached at all
    #[serde(default = "default_enabled")]
    enabled: bool,
}

fn default_cache_host() -> String {
    "redis".to_string()
}

fn default_cache_port() -> u16 {
    6379
}

fn default_ttl_secs() -> u64 {
    3600
}

fn default_max_entries() -> usize {
    1000
}

fn default_enabled() -> bool {
    true
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            host: default_cache_host(),
            port: default_cache_port(),
            ttl_secs: default_ttl_secs(),
            max_entries: default_max_entries(),
            enabled: default_enabled(),
        }
    }
}

impl CacheSettings {
    /// Entry lifetime as a duration.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Settings for the in-process store.
    pub fn store_config(&self) -> CacheStoreConfig {
        CacheStoreConfig::default()
            .with_ttl_secs(self.ttl_secs)
            .with_max_entries(self.max_entries)
            .with_enabled(self.enabled)
    }
}

/// HTTP server section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct ServerSettings {
    /// Bind address
    #[serde(default = "default_server_host")]
    host: String,

    /// Bind port
    #[serde(default = "default_server_port")]
    port: u16,

    /// Upper bound on one generation, retries included (seconds)
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8000
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ServerSettings {
    /// `host:port` to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Request-level generation timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Top-level Wayfarer configuration.
///
/// Built once at startup and shared by reference.
///
/// # Example
///
/// ```no_run
/// use wayfarer_server::WayfarerConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = WayfarerConfig::load(None, None)?;
/// println!("Listening on {}", config.server().bind_address());
/// # Ok(())
/// # }
/// ```
#[derive(
    Debug, Clone, PartialEq, Default, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct WayfarerConfig {
    /// Deployment mode
    #[serde(default)]
    environment: Environment,

    /// Completion provider
    #[serde(default)]
    llm: LlmConfig,

    /// Result cache
    #[serde(default)]
    cache: CacheSettings,

    /// Generation retry budget
    #[serde(default)]
    retry: RetryPolicy,

    /// HTTP server
    #[serde(default)]
    server: ServerSettings,
}

impl WayfarerConfig {
    /// Load configuration from every source, reading the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be parsed, an explicit `path` is
    /// missing, or production mode has no API key.
    #[instrument(skip(path))]
    pub fn load(
        path: Option<&Path>,
        environment: Option<Environment>,
    ) -> Result<Self, ConfigError> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::load_with_env(path, environment, &vars)
    }

    /// Load configuration using `vars` in place of the process environment.
    ///
    /// An `environment` given here overrides every other source.
    ///
    /// # Errors
    ///
    /// As for [`Self::load`].
    pub fn load_with_env(
        path: Option<&Path>,
        environment: Option<Environment>,
        vars: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        debug!("Loading configuration with precedence: env > explicit file > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/wayfarer/wayfarer.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("wayfarer").required(false));

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            EnvironmentSource::with_prefix("WAYFARER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(Some(vars.clone())),
        );

        let api_key = vars.get("XAI_API_KEY").filter(|key| !key.trim().is_empty());
        builder = builder
            .set_override_option("llm.api_key", api_key.cloned())
            .and_then(|b| b.set_override_option("environment", environment.map(|e| e.to_string())))
            .map_err(|e| ConfigError::new(format!("Failed to apply overrides: {}", e)))?;

        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        debug!(environment = %config.environment, "Configuration loaded");
        Ok(config)
    }

    /// Parse a TOML document on top of the defaults, without other sources.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is invalid.
    pub fn from_toml(document: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(document, FileFormat::Toml))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))
    }

    /// Check cross-section requirements.
    ///
    /// # Errors
    ///
    /// Production mode requires an API key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.environment == Environment::Production && !self.llm.has_api_key() {
            return Err(ConfigError::new(
                "XAI_API_KEY is not set; it is required in production",
            ));
        }
        if *self.retry.max_attempts() == 0 {
            return Err(ConfigError::new("retry.max_attempts must be at least 1"));
        }
        Ok(())
    }
}
