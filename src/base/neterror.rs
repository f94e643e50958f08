use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum NetError {
    // Endpoint Errors
    #[error(
        "Does not contain a valid host:port authority: {target}{}",
        config_hint(.source_label.as_deref())
    )]
    InvalidEndpoint {
        target: String,
        source_label: Option<String>,
    },

    // Resolution Errors
    #[error("Name not resolved: {host}")]
    NameNotResolved { host: String },
    #[error("Name resolution for {host} timed out after {}ms", .timeout.as_millis())]
    ResolutionTimedOut { host: String, timeout: Duration },

    // Configuration Errors
    #[error("Invalid value '{value}' for configuration property '{key}'")]
    InvalidConfigValue { key: String, value: String },
    #[error("Invalid integer range: {0}")]
    InvalidRange(String),
}

fn config_hint(source_label: Option<&str>) -> String {
    match source_label {
        Some(label) => format!(" (configuration property '{label}')"),
        None => String::new(),
    }
}

impl NetError {
    pub fn invalid_endpoint(target: impl Into<String>, source_label: Option<&str>) -> Self {
        NetError::InvalidEndpoint {
            target: target.into(),
            source_label: source_label.map(str::to_string),
        }
    }

    pub fn name_not_resolved(host: impl Into<String>) -> Self {
        NetError::NameNotResolved { host: host.into() }
    }

    pub fn invalid_config_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        NetError::InvalidConfigValue {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Resolution failures the address builder degrades into an unresolved
    /// address instead of propagating.
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            NetError::NameNotResolved { .. } | NetError::ResolutionTimedOut { .. }
        )
    }
}
