//! # Hirefly Config - Configuration Management
//!
//! Handles configuration loading from files and environment variables.
//! Layering: built-in defaults, then an optional TOML file, then
//! `HIREFLY_`-prefixed environment variables.

use std::path::Path;

use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use hirefly_const::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL_SECONDS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub guard: GuardConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Soft capacity of the role-permission cache.
    #[serde(default = "default_cache_capacity")]
    pub capacity: u64,

    /// TTL for cached role-permission snapshots, in seconds.
    #[serde(default = "default_cache_ttl_seconds")]
    pub ttl_seconds: u64,
}

fn default_cache_capacity() -> u64 {
    DEFAULT_CACHE_CAPACITY
}

fn default_cache_ttl_seconds() -> u64 {
    DEFAULT_CACHE_TTL_SECONDS
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
            ttl_seconds: default_cache_ttl_seconds(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Whether endpoints without declared requirements fall back to the
    /// legacy exact (method, apiPath) check. Disabled, such endpoints deny
    /// authenticated actors outright.
    #[serde(default = "default_legacy_fallback")]
    pub legacy_fallback: bool,
}

fn default_legacy_fallback() -> bool {
    true
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            legacy_fallback: default_legacy_fallback(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_tracing_enabled")]
    pub tracing_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_tracing_enabled() -> bool {
    true
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            tracing_enabled: default_tracing_enabled(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            guard: GuardConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration: defaults, then the file (if given), then
    /// `HIREFLY_*` environment variables (e.g. `HIREFLY_CACHE__TTL_SECONDS`).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        // Double-underscore nesting separator so snake_case leaf keys
        // (ttl_seconds) survive the split.
        builder = builder.add_source(
            Environment::with_prefix("HIREFLY")
                .separator("__")
                .try_parsing(true),
        );

        let config: Config = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Reject configurations the cache cannot honor.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.cache.capacity == 0 {
            return Err(ValidationError::ZeroCacheCapacity);
        }
        if self.cache.ttl_seconds == 0 {
            return Err(ValidationError::ZeroCacheTtl);
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("cache.capacity must be greater than zero")]
    ZeroCacheCapacity,

    #[error("cache.ttl_seconds must be greater than zero")]
    ZeroCacheTtl,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.cache.capacity, 100);
        assert_eq!(config.cache.ttl_seconds, 300);
        assert!(config.guard.legacy_fallback);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_validate_rejects_zero_bounds() {
        let mut config = Config::default();
        config.cache.capacity = 0;
        assert_eq!(
            config.validate().unwrap_err(),
            ValidationError::ZeroCacheCapacity
        );

        let mut config = Config::default();
        config.cache.ttl_seconds = 0;
        assert_eq!(config.validate().unwrap_err(), ValidationError::ZeroCacheTtl);
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.cache.capacity, 100);
        config.validate().unwrap();
    }
}
