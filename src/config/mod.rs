//! Configuration collaborator.
//!
//! A string key/value store with typed getters, plus the typed snapshot of the
//! keys that drive host resolution.
//!
//! # Example
//!
//! ```rust,ignore
//! use clusternet::config::{Configuration, InMemoryConfiguration, ResolverSettings, keys};
//!
//! let conf = InMemoryConfiguration::new();
//! conf.set(keys::TOKEN_SERVICE_USE_IP, "true");
//! let settings = ResolverSettings::from_config(&conf)?;
//! assert!(settings.use_ip_for_token_service);
//! ```

mod ranges;
mod settings;

pub use ranges::IntegerRanges;
pub use settings::ResolverSettings;

use crate::base::neterror::NetError;
use dashmap::DashMap;
use serde::Deserialize;
use std::collections::HashMap;

/// Well-known configuration keys.
pub mod keys {
    /// Enables slow name lookup warnings.
    pub const LOG_SLOW_LOOKUPS_ENABLED: &str = "hadoop.security.dns.log-slow-lookups.enabled";
    /// Threshold in milliseconds at or above which a lookup is slow.
    pub const LOG_SLOW_LOOKUPS_THRESHOLD_MS: &str =
        "hadoop.security.dns.log-slow-lookups.threshold.ms";
    /// Selects the standard resolver (token services use IPs) when true.
    pub const TOKEN_SERVICE_USE_IP: &str = "hadoop.security.token.service.use_ip";
}

/// Read/write access to string-valued configuration properties.
///
/// Only `get`, `set` and `keys` are required; typed accessors are derived.
pub trait Configuration: Send + Sync {
    /// Raw value for `key`, if set.
    fn get(&self, key: &str) -> Option<String>;

    /// Set `key` to `value`, replacing any previous value.
    fn set(&self, key: &str, value: &str);

    /// All keys currently set.
    fn keys(&self) -> Vec<String>;

    /// Boolean value for `key`.
    ///
    /// Accepts `true`/`false` in any case; anything else yields `default`.
    fn get_bool(&self, key: &str, default: bool) -> bool {
        let Some(raw) = self.get(key) else {
            return default;
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" => true,
            "false" => false,
            _ => {
                tracing::warn!(key = %key, value = %raw, default, "ignoring non-boolean value");
                default
            }
        }
    }

    /// Integer value for `key`, `default` when unset or blank.
    fn get_int(&self, key: &str, default: i32) -> Result<i32, NetError> {
        match self.get(key) {
            Some(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse()
                .map_err(|_| NetError::invalid_config_value(key, raw)),
            _ => Ok(default),
        }
    }

    /// Comma separated values for `key`, trimmed, blanks dropped.
    fn get_strings(&self, key: &str) -> Vec<String> {
        self.get(key)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Integer ranges for `key`, parsed from `default` when unset.
    fn get_range(&self, key: &str, default: &str) -> Result<IntegerRanges, NetError> {
        let raw = self.get(key).unwrap_or_else(|| default.to_string());
        raw.parse()
    }
}

/// Values accepted when loading a configuration from JSON.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

impl JsonValue {
    fn into_property(self) -> String {
        match self {
            JsonValue::Bool(b) => b.to_string(),
            JsonValue::Int(n) => n.to_string(),
            JsonValue::Float(f) => f.to_string(),
            JsonValue::Text(s) => s,
            JsonValue::List(items) => items.join(","),
        }
    }
}

/// Thread-safe in-memory configuration store.
#[derive(Debug, Default)]
pub struct InMemoryConfiguration {
    properties: DashMap<String, String>,
}

impl InMemoryConfiguration {
    /// Create an empty configuration; every typed getter returns its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load properties from a flat JSON object.
    ///
    /// Values may be strings, numbers, booleans or arrays of strings (stored
    /// comma separated). Nested objects are rejected.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let parsed: HashMap<String, JsonValue> = serde_json::from_str(json)?;
        let conf = Self::new();
        for (key, value) in parsed {
            conf.properties.insert(key, value.into_property());
        }
        Ok(conf)
    }

    /// Number of properties set.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if no property is set.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl Configuration for InMemoryConfiguration {
    fn get(&self, key: &str) -> Option<String> {
        self.properties.get(key).map(|v| v.value().clone())
    }

    fn set(&self, key: &str, value: &str) {
        self.properties.insert(key.to_string(), value.to_string());
    }

    fn keys(&self) -> Vec<String> {
        self.properties.iter().map(|e| e.key().clone()).collect()
    }
}
