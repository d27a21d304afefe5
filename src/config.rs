//! Engine configuration.
//!
//! Supports YAML file and environment variable overrides.

use serde::Deserialize;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "glance.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "GLANCE_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "GLANCE";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "GLANCE_LOG";

/// Default capacity of the command queue feeding the dispatch loop.
pub const DEFAULT_COMMAND_QUEUE_CAPACITY: usize = 64;
/// Default capacity of the event channel toward subscribers.
pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 64;
/// Default bound for parametrized selector caches.
pub const DEFAULT_SELECTOR_CACHE_CAPACITY: usize = 256;
/// Default minimum delay between insight load retries.
pub const DEFAULT_RETRY_MIN_DELAY_MS: u64 = 50;
/// Default maximum delay between insight load retries.
pub const DEFAULT_RETRY_MAX_DELAY_MS: u64 = 2_000;
/// Default maximum number of insight load retries.
pub const DEFAULT_RETRY_MAX_ATTEMPTS: usize = 5;

/// Insight loader configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Minimum delay between retries, in milliseconds.
    pub retry_min_delay_ms: u64,
    /// Maximum delay between retries, in milliseconds.
    pub retry_max_delay_ms: u64,
    /// Maximum number of retries after the initial attempt.
    pub retry_max_attempts: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            retry_min_delay_ms: DEFAULT_RETRY_MIN_DELAY_MS,
            retry_max_delay_ms: DEFAULT_RETRY_MAX_DELAY_MS,
            retry_max_attempts: DEFAULT_RETRY_MAX_ATTEMPTS,
        }
    }
}

/// Main engine configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Capacity of the command queue feeding the dispatch loop.
    pub command_queue_capacity: usize,
    /// Capacity of the event channel toward subscribers.
    pub event_channel_capacity: usize,
    /// Bound for parametrized selector caches.
    pub selector_cache_capacity: usize,
    /// Insight loader configuration.
    pub loader: LoaderConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            command_queue_capacity: DEFAULT_COMMAND_QUEUE_CAPACITY,
            event_channel_capacity: DEFAULT_EVENT_CHANNEL_CAPACITY,
            selector_cache_capacity: DEFAULT_SELECTOR_CACHE_CAPACITY,
            loader: LoaderConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `glance.yaml` in current directory (if exists)
    /// 2. File specified by `path` argument (if provided)
    /// 3. File specified by `CONFIG_ENV_VAR` environment variable (if set)
    /// 4. Environment variables with `CONFIG_ENV_PREFIX` prefix
    ///    (e.g. `GLANCE__LOADER__RETRY_MAX_ATTEMPTS=3`)
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&env_path, FileFormat::Yaml).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(CONFIG_ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?.try_deserialize()?;
        Ok(config)
    }
}
