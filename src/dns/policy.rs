//! Process-wide resolution policy.
//!
//! The active resolver variant and the slow-lookup thresholds live in one
//! immutable [`PolicySnapshot`] behind an `ArcSwap`. Reconfiguration builds a
//! new snapshot and swaps the pointer, so a reader either sees the old
//! resolver with the old thresholds or the new resolver with the new ones.
//! A resolution holds the snapshot it loaded until it finishes; in-flight
//! lookups are never cancelled by a reconfiguration.

use super::{AddressRecord, HostResolver, QualifiedResolver, StandardResolver};
use crate::base::neterror::NetError;
use crate::config::{Configuration, ResolverSettings};
use arc_swap::ArcSwap;
use std::{
    sync::{Arc, LazyLock},
    time::{Duration, Instant},
};
use tracing::Level;

static GLOBAL_POLICY: LazyLock<ResolutionPolicy> =
    LazyLock::new(|| ResolutionPolicy::new(ResolverSettings::default()));

/// The two resolver variants a policy can select.
#[derive(Debug, Clone)]
pub enum HostResolverKind {
    /// Platform resolution, used when token services identify hosts by IP.
    Standard(StandardResolver),
    /// Fully-qualified resolution over the system search path.
    Qualified(QualifiedResolver),
}

impl HostResolverKind {
    /// Builds the variant `settings` selects.
    pub fn for_settings(settings: &ResolverSettings) -> Self {
        if settings.use_ip_for_token_service {
            HostResolverKind::Standard(StandardResolver::new())
        } else {
            HostResolverKind::Qualified(QualifiedResolver::new())
        }
    }

    pub fn is_standard(&self) -> bool {
        matches!(self, HostResolverKind::Standard(_))
    }

    pub fn is_qualified(&self) -> bool {
        matches!(self, HostResolverKind::Qualified(_))
    }
}

impl HostResolver for HostResolverKind {
    fn resolve(&self, host: &str) -> Result<AddressRecord, NetError> {
        match self {
            HostResolverKind::Standard(r) => r.resolve(host),
            HostResolverKind::Qualified(r) => r.resolve(host),
        }
    }
}

/// An immutable policy: settings plus the resolver they select.
#[derive(Debug)]
pub struct PolicySnapshot {
    settings: ResolverSettings,
    resolver: HostResolverKind,
}

impl PolicySnapshot {
    pub fn new(settings: ResolverSettings, resolver: HostResolverKind) -> Self {
        Self { settings, resolver }
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    pub fn resolver(&self) -> &HostResolverKind {
        &self.resolver
    }

    /// Resolves `host`, timing the lookup when slow-lookup logging or trace
    /// output is enabled. Timing never changes the outcome.
    pub fn resolve(&self, host: &str) -> Result<AddressRecord, NetError> {
        let trace = tracing::enabled!(Level::TRACE);
        if !self.settings.log_slow_lookups && !trace {
            return self.resolver.resolve(host);
        }

        let start = Instant::now();
        let result = self.resolver.resolve(host);
        let elapsed = start.elapsed();

        if self.settings.log_slow_lookups && elapsed >= self.settings.slow_lookup_threshold {
            tracing::warn!(
                host = %host,
                elapsed_ms = elapsed.as_millis() as u64,
                threshold_ms = self.settings.slow_lookup_threshold.as_millis() as u64,
                "Slow name lookup"
            );
        } else if trace {
            tracing::trace!(host = %host, elapsed_ms = elapsed.as_millis() as u64, "Name lookup");
        }
        result
    }
}

/// Swappable resolution policy.
///
/// Reads are lock-free; writes replace the whole snapshot.
#[derive(Debug)]
pub struct ResolutionPolicy {
    current: ArcSwap<PolicySnapshot>,
}

impl ResolutionPolicy {
    /// Create a policy with the resolver `settings` select.
    pub fn new(settings: ResolverSettings) -> Self {
        let resolver = HostResolverKind::for_settings(&settings);
        Self::with_resolver(settings, resolver)
    }

    /// Create a policy with an explicit resolver.
    pub fn with_resolver(settings: ResolverSettings, resolver: HostResolverKind) -> Self {
        Self {
            current: ArcSwap::from_pointee(PolicySnapshot::new(settings, resolver)),
        }
    }

    /// Create a policy from configuration.
    pub fn from_config(conf: &dyn Configuration) -> Result<Self, NetError> {
        Ok(Self::new(ResolverSettings::from_config(conf)?))
    }

    /// The process-wide policy, initialized from default settings.
    pub fn global() -> &'static ResolutionPolicy {
        &GLOBAL_POLICY
    }

    /// Re-reads the policy keys from `conf` and installs the resulting
    /// snapshot. On error the current policy stays in place.
    pub fn reconfigure(&self, conf: &dyn Configuration) -> Result<(), NetError> {
        let settings = ResolverSettings::from_config(conf)?;
        tracing::info!(
            use_ip_for_token_service = settings.use_ip_for_token_service,
            log_slow_lookups = settings.log_slow_lookups,
            slow_lookup_threshold_ms = settings.slow_lookup_threshold.as_millis() as u64,
            "Updating resolution configuration"
        );
        let resolver = HostResolverKind::for_settings(&settings);
        self.install(settings, resolver);
        Ok(())
    }

    /// Atomically replaces the settings and resolver.
    pub fn install(&self, settings: ResolverSettings, resolver: HostResolverKind) {
        self.current
            .store(Arc::new(PolicySnapshot::new(settings, resolver)));
    }

    /// Switches the resolver variant, keeping the slow-lookup settings.
    pub fn set_token_service_use_ip(&self, flag: bool) {
        tracing::debug!(use_ip_for_token_service = flag, "Setting token service resolution");
        let resolver = if flag {
            HostResolverKind::Standard(StandardResolver::new())
        } else {
            HostResolverKind::Qualified(QualifiedResolver::new())
        };
        self.current.rcu(|current| {
            let settings = ResolverSettings {
                use_ip_for_token_service: flag,
                ..current.settings.clone()
            };
            Arc::new(PolicySnapshot::new(settings, resolver.clone()))
        });
    }

    /// Whether token services currently use literal IPs.
    pub fn use_ip_for_token_service(&self) -> bool {
        self.current.load().settings.use_ip_for_token_service
    }

    /// The currently installed snapshot.
    pub fn snapshot(&self) -> Arc<PolicySnapshot> {
        self.current.load_full()
    }

    /// Resolves `host` under the current snapshot.
    pub fn resolve(&self, host: &str) -> Result<AddressRecord, NetError> {
        self.snapshot().resolve(host)
    }

    /// Resolves `host`, giving up after `timeout`.
    ///
    /// The blocking lookup runs on tokio's blocking pool. When the deadline
    /// passes the lookup is abandoned, not interrupted, and the call fails with
    /// [`NetError::ResolutionTimedOut`].
    pub async fn resolve_within(
        &self,
        host: &str,
        timeout: Duration,
    ) -> Result<AddressRecord, NetError> {
        let snapshot = self.snapshot();
        let name = host.to_string();
        let task = tokio::task::spawn_blocking(move || snapshot.resolve(&name));

        match tokio::time::timeout(timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                tracing::error!(error = %e, "DNS resolution task failed");
                Err(NetError::name_not_resolved(host))
            }
            Err(_) => {
                tracing::debug!(host = %host, timeout_ms = timeout.as_millis() as u64, "Name lookup timed out");
                Err(NetError::ResolutionTimedOut {
                    host: host.to_string(),
                    timeout,
                })
            }
        }
    }
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        Self::new(ResolverSettings::default())
    }
}
