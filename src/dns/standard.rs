//! Standard resolver: platform resolution with no additional policy.

use super::{AddressRecord, HostResolver, Lookup, SystemLookup};
use crate::base::{context::IoResultExt, neterror::NetError};
use std::{fmt, sync::Arc};

/// Resolver that hands the host straight to the platform lookup.
///
/// The platform applies its own search path and the returned record carries
/// the host exactly as requested. Selected when token services identify
/// endpoints by IP.
#[derive(Clone)]
pub struct StandardResolver {
    lookup: Arc<dyn Lookup>,
}

impl StandardResolver {
    /// Creates a `StandardResolver` backed by `getaddrinfo`.
    pub fn new() -> Self {
        Self {
            lookup: Arc::new(SystemLookup),
        }
    }

    /// Replaces the platform lookup.
    pub fn with_lookup(mut self, lookup: Arc<dyn Lookup>) -> Self {
        self.lookup = lookup;
        self
    }
}

impl Default for StandardResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl HostResolver for StandardResolver {
    fn resolve(&self, host: &str) -> Result<AddressRecord, NetError> {
        let ip = self.lookup.lookup(host).dns_context(host)?;
        Ok(AddressRecord::new(ip, host))
    }
}

impl fmt::Debug for StandardResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardResolver").finish_non_exhaustive()
    }
}
