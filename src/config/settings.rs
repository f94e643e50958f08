use super::{keys, Configuration};
use crate::base::neterror::NetError;
use std::time::Duration;

const DEFAULT_SLOW_LOOKUP_THRESHOLD_MS: i32 = 1000;

/// Typed snapshot of the resolution policy keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Warn about lookups slower than `slow_lookup_threshold`.
    pub log_slow_lookups: bool,
    /// Lookups taking at least this long are reported as slow.
    pub slow_lookup_threshold: Duration,
    /// Token services use literal IPs; selects the standard resolver.
    pub use_ip_for_token_service: bool,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            log_slow_lookups: false,
            slow_lookup_threshold: Duration::from_millis(DEFAULT_SLOW_LOOKUP_THRESHOLD_MS as u64),
            use_ip_for_token_service: false,
        }
    }
}

impl ResolverSettings {
    /// Read the settings from `conf`, applying defaults for unset keys.
    pub fn from_config(conf: &dyn Configuration) -> Result<Self, NetError> {
        let threshold_ms = conf.get_int(
            keys::LOG_SLOW_LOOKUPS_THRESHOLD_MS,
            DEFAULT_SLOW_LOOKUP_THRESHOLD_MS,
        )?;
        let threshold_ms = u64::try_from(threshold_ms).map_err(|_| {
            NetError::invalid_config_value(
                keys::LOG_SLOW_LOOKUPS_THRESHOLD_MS,
                threshold_ms.to_string(),
            )
        })?;

        Ok(Self {
            log_slow_lookups: conf.get_bool(keys::LOG_SLOW_LOOKUPS_ENABLED, false),
            slow_lookup_threshold: Duration::from_millis(threshold_ms),
            use_ip_for_token_service: conf.get_bool(keys::TOKEN_SERVICE_USE_IP, false),
        })
    }
}
