// src/config/qsieve_config.rs
//
// Layered configuration per the AMBIENT STACK note: defaults -> qsieve.toml
// / qsieve.yaml -> QSIEVE_-prefixed environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QsieveConfig {
    /// Shard length L; InputBuilder falls back to a cache-derived size when
    /// this is left at its sentinel 0.
    pub shard_length: usize,

    /// Upper bound on the combiner's mask-enumeration loop.
    pub mask_cap: u64,

    /// Sieve worker thread count. None defers to Rayon's own default.
    pub threads: Option<usize>,

    /// Logging level (error, warn, info, debug, trace).
    pub log_level: String,
}

impl Default for QsieveConfig {
    fn default() -> Self {
        QsieveConfig { shard_length: 0, mask_cap: 1 << 20, threads: None, log_level: "info".to_string() }
    }
}

impl QsieveConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Self::defaults_builder()?;

        if Path::new("qsieve.toml").exists() {
            builder = builder.add_source(File::with_name("qsieve.toml"));
        } else if Path::new("qsieve.yaml").exists() {
            builder = builder.add_source(File::with_name("qsieve.yaml"));
        }

        builder = builder.add_source(Environment::with_prefix("QSIEVE").separator("_").try_parsing(true));

        builder.build()?.try_deserialize()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut builder = Self::defaults_builder()?;

        if path.as_ref().exists() {
            builder = builder.add_source(File::from(path.as_ref()));
        }

        builder = builder.add_source(Environment::with_prefix("QSIEVE").separator("_").try_parsing(true));

        builder.build()?.try_deserialize()
    }

    fn defaults_builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Ok(Config::builder()
            .set_default("shard_length", 0)?
            .set_default("mask_cap", 1i64 << 20)?
            .set_default("log_level", "info")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sane_values() {
        let config = QsieveConfig::default();
        assert_eq!(config.shard_length, 0);
        assert_eq!(config.mask_cap, 1 << 20);
        assert_eq!(config.log_level, "info");
        assert!(config.threads.is_none());
    }

    #[test]
    fn load_without_file_falls_back_to_defaults() {
        let config = QsieveConfig::load().unwrap_or_else(|_| QsieveConfig::default());
        assert_eq!(config.log_level, "info");
    }
}
