//! Configuration Module
//!
//! Handles loading and managing store configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{Result, StoreError};
use crate::store::{EvictionPolicy, StoreOptions};

pub const MAX_SIZE_VAR: &str = "STORE_MAX_SIZE";
pub const POLICY_VAR: &str = "STORE_EVICTION_POLICY";
pub const DEFAULT_TTL_VAR: &str = "STORE_DEFAULT_TTL";

const DEFAULT_MAX_SIZE: usize = 1000;
const DEFAULT_TTL_SECS: u64 = 300;

/// Store configuration parameters.
///
/// Fixed once at startup; the store never changes policy or capacity later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of records, `None` for unbounded
    pub max_size: Option<usize>,
    /// Eviction policy applied when the store overflows
    pub eviction_policy: EvictionPolicy,
    /// Default TTL in seconds for records without an explicit one
    pub default_ttl: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `STORE_MAX_SIZE` - Maximum records, or `none`/`unbounded` (default: 1000)
    /// - `STORE_EVICTION_POLICY` - `FIFO`, `LRU` or `TTL` (default: FIFO)
    /// - `STORE_DEFAULT_TTL` - Default TTL in seconds (default: 300)
    ///
    /// # Errors
    /// Any value that is set but cannot be parsed is a configuration error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_size = match lookup(MAX_SIZE_VAR) {
            Some(raw) => parse_max_size(&raw)?,
            None => defaults.max_size,
        };
        let eviction_policy = match lookup(POLICY_VAR) {
            Some(raw) => raw.parse()?,
            None => defaults.eviction_policy,
        };
        let default_ttl = match lookup(DEFAULT_TTL_VAR) {
            Some(raw) => raw.trim().parse().map_err(|_| StoreError::InvalidConfig {
                key: DEFAULT_TTL_VAR.to_string(),
                message: format!("expected a number of seconds, got '{}'", raw),
            })?,
            None => defaults.default_ttl,
        };

        Ok(Self {
            max_size,
            eviction_policy,
            default_ttl,
        })
    }

    /// Options for building the store.
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            max_size: self.max_size,
            policy: self.eviction_policy,
            default_ttl: Duration::from_secs(self.default_ttl),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_size: Some(DEFAULT_MAX_SIZE),
            eviction_policy: EvictionPolicy::Fifo,
            default_ttl: DEFAULT_TTL_SECS,
        }
    }
}

fn parse_max_size(raw: &str) -> Result<Option<usize>> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("none") || raw.eq_ignore_ascii_case("unbounded") {
        return Ok(None);
    }
    match raw.parse::<usize>() {
        Ok(0) => Err(StoreError::InvalidCapacity(0)),
        Ok(n) => Ok(Some(n)),
        Err(_) => Err(StoreError::InvalidConfig {
            key: MAX_SIZE_VAR.to_string(),
            message: format!("expected a positive integer, got '{}'", raw),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_size, Some(1000));
        assert_eq!(config.eviction_policy, EvictionPolicy::Fifo);
        assert_eq!(config.default_ttl, 300);
    }

    #[test]
    fn test_config_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_reads_values() {
        let config = Config::from_lookup(lookup(&[
            (MAX_SIZE_VAR, "25"),
            (POLICY_VAR, "lru"),
            (DEFAULT_TTL_VAR, "60"),
        ]))
        .unwrap();

        assert_eq!(config.max_size, Some(25));
        assert_eq!(config.eviction_policy, EvictionPolicy::Lru);
        assert_eq!(config.default_ttl, 60);

        let options = config.store_options();
        assert_eq!(options.max_size, Some(25));
        assert_eq!(options.default_ttl, Duration::from_secs(60));
    }

    #[test]
    fn test_config_unbounded() {
        let config = Config::from_lookup(lookup(&[(MAX_SIZE_VAR, "Unbounded")])).unwrap();
        assert_eq!(config.max_size, None);
    }

    #[test]
    fn test_config_rejects_zero_capacity() {
        let result = Config::from_lookup(lookup(&[(MAX_SIZE_VAR, "0")]));
        assert_eq!(result, Err(StoreError::InvalidCapacity(0)));
    }

    #[test]
    fn test_config_rejects_bad_values() {
        assert!(matches!(
            Config::from_lookup(lookup(&[(MAX_SIZE_VAR, "-3")])),
            Err(StoreError::InvalidConfig { .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[(POLICY_VAR, "CUSTOM")])),
            Err(StoreError::UnknownPolicy(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[(DEFAULT_TTL_VAR, "soon")])),
            Err(StoreError::InvalidConfig { .. })
        ));
    }
}
