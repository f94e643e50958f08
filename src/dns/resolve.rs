//! Core resolution types and traits.
//!
//! This module defines the `HostResolver` capability, the `Lookup` seam to the
//! platform resolver, and the `AddressRecord` they produce.

use crate::base::neterror::NetError;
use std::{
    fmt, io,
    net::{IpAddr, ToSocketAddrs},
    sync::Arc,
};

/// A resolved address paired with the host name callers should see.
///
/// The presentation host is not necessarily what DNS returned: resolvers
/// rewrite it to the name that was asked for, so identity comparisons (token
/// services, principals) see the requested string rather than a rooted or
/// substituted one.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct AddressRecord {
    ip: IpAddr,
    host: Box<str>,
}

impl AddressRecord {
    /// Creates a new [`AddressRecord`].
    #[inline]
    pub fn new(ip: IpAddr, host: impl Into<Box<str>>) -> Self {
        Self {
            ip,
            host: host.into(),
        }
    }

    /// The resolved IP address.
    #[inline]
    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    /// The presentation host.
    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Raw address bytes, 4 for IPv4 and 16 for IPv6.
    pub fn octets(&self) -> Vec<u8> {
        match self.ip {
            IpAddr::V4(v4) => v4.octets().to_vec(),
            IpAddr::V6(v6) => v6.octets().to_vec(),
        }
    }

    /// Same address presented under a different host name.
    pub fn with_host(self, host: impl Into<Box<str>>) -> Self {
        Self {
            ip: self.ip,
            host: host.into(),
        }
    }
}

impl fmt::Debug for AddressRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.host, self.ip)
    }
}

impl fmt::Display for AddressRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.host, self.ip)
    }
}

/// Trait for host name resolution.
///
/// Resolution is synchronous and may block the calling thread on the
/// platform resolver. Implementations must be thread-safe.
pub trait HostResolver: Send + Sync {
    /// Resolves `host` (a name or IP literal) to a single address.
    ///
    /// Fails with [`NetError::NameNotResolved`] when the host is unknown.
    fn resolve(&self, host: &str) -> Result<AddressRecord, NetError>;
}

/// Blanket implementation for Arc-wrapped resolvers.
impl<R: HostResolver + ?Sized> HostResolver for Arc<R> {
    fn resolve(&self, host: &str) -> Result<AddressRecord, NetError> {
        (**self).resolve(host)
    }
}

/// A single forward lookup against the platform resolver.
///
/// This is the seam between the resolution policy and the network: resolvers
/// decide *which* names to query, a `Lookup` performs one query.
pub trait Lookup: Send + Sync {
    /// Looks up exactly `name`, returning the first address.
    fn lookup(&self, name: &str) -> io::Result<IpAddr>;
}

/// Platform lookup using `getaddrinfo` (via `ToSocketAddrs`).
///
/// Blocks the calling thread for the duration of the query.
#[derive(Clone, Debug, Default)]
pub struct SystemLookup;

impl Lookup for SystemLookup {
    fn lookup(&self, name: &str) -> io::Result<IpAddr> {
        tracing::trace!(name = %name, "resolving via getaddrinfo");
        (name, 0u16)
            .to_socket_addrs()?
            .next()
            .map(|addr| addr.ip())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    "No addresses returned by getaddrinfo",
                )
            })
    }
}
