//! Host Resolution Module
//!
//! Provides policy-driven host resolution:
//! - Standard resolver (platform `getaddrinfo`, host passed through)
//! - Qualified resolver (search-domain qualification, rooted lookups,
//!   no reverse lookups for IP literals)
//! - Static host overrides consulted before any resolution
//! - A process-wide, atomically swappable resolution policy
//!
//! # Architecture
//!
//! [`HostResolver`] is the capability both variants implement; [`Lookup`] is
//! the single-query seam to the platform resolver underneath them.
//! [`ResolutionPolicy`] owns the active variant plus slow-lookup settings as
//! one immutable snapshot, selected by `hadoop.security.token.service.use_ip`.
//!
//! # Example
//!
//! ```rust,ignore
//! use clusternet::dns;
//!
//! let record = dns::resolve("nn1")?;
//! println!("Resolved: {record}");
//! ```

mod overrides;
mod policy;
mod qualified;
mod resolve;
mod searchpath;
mod standard;

pub use overrides::StaticOverrideTable;
pub use policy::{HostResolverKind, PolicySnapshot, ResolutionPolicy};
pub use qualified::{qualify, QualifiedResolver};
pub use resolve::{AddressRecord, HostResolver, Lookup, SystemLookup};
pub use searchpath::system_search_domains;
pub use standard::StandardResolver;

use crate::base::neterror::NetError;
use crate::config::Configuration;

/// Resolves `host` with the process-wide policy.
pub fn resolve(host: &str) -> Result<AddressRecord, NetError> {
    ResolutionPolicy::global().resolve(host)
}

/// Re-reads the process-wide policy from `conf`.
pub fn reconfigure(conf: &dyn Configuration) -> Result<(), NetError> {
    ResolutionPolicy::global().reconfigure(conf)
}

/// Registers `resolved_name` as the process-wide substitute for `host`.
pub fn register_static_override(host: impl Into<String>, resolved_name: impl Into<String>) {
    StaticOverrideTable::global().put(host, resolved_name);
}

/// The process-wide substitute registered for `host`, if any.
pub fn static_resolution(host: &str) -> Option<String> {
    StaticOverrideTable::global().get(host)
}
