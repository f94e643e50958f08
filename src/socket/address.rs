//! Socket address construction.
//!
//! Combines endpoint parsing, static overrides and the resolution policy into
//! a [`SocketAddress`]. Malformed endpoints are errors; unresolvable hosts are
//! not: they yield [`SocketAddress::Unresolved`] so connection setup can still
//! proceed by name and fail (or succeed) later, once DNS is available.

use super::endpoint;
use crate::base::neterror::NetError;
use crate::dns::{AddressRecord, ResolutionPolicy, StaticOverrideTable};
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

/// A host and port, either resolved to an address or explicitly unresolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SocketAddress {
    /// Resolved address; the record's host is the caller-visible identity.
    Resolved { record: AddressRecord, port: u16 },
    /// Resolution failed; carries the requested host for a later attempt.
    Unresolved { host: String, port: u16 },
}

impl SocketAddress {
    /// The caller-visible host name.
    pub fn host(&self) -> &str {
        match self {
            SocketAddress::Resolved { record, .. } => record.host(),
            SocketAddress::Unresolved { host, .. } => host,
        }
    }

    pub fn port(&self) -> u16 {
        match self {
            SocketAddress::Resolved { port, .. } | SocketAddress::Unresolved { port, .. } => *port,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, SocketAddress::Unresolved { .. })
    }

    /// The address record, if resolved.
    pub fn record(&self) -> Option<&AddressRecord> {
        match self {
            SocketAddress::Resolved { record, .. } => Some(record),
            SocketAddress::Unresolved { .. } => None,
        }
    }

    /// A connectable socket address, if resolved.
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        self.record()
            .map(|record| SocketAddr::new(record.ip(), self.port()))
    }
}

impl fmt::Display for SocketAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SocketAddress::Resolved { record, port } => {
                write!(f, "{}/{}", record.host(), SocketAddr::new(record.ip(), *port))
            }
            SocketAddress::Unresolved { host, port } => {
                write!(f, "{host}/<unresolved>:{port}")
            }
        }
    }
}

/// Builds socket addresses against a policy and an override table.
#[derive(Debug, Clone, Copy)]
pub struct SocketAddressBuilder<'a> {
    policy: &'a ResolutionPolicy,
    overrides: &'a StaticOverrideTable,
}

impl<'a> SocketAddressBuilder<'a> {
    pub fn new(policy: &'a ResolutionPolicy, overrides: &'a StaticOverrideTable) -> Self {
        Self { policy, overrides }
    }

    /// Builder over the process-wide policy and override table.
    pub fn global() -> SocketAddressBuilder<'static> {
        SocketAddressBuilder::new(ResolutionPolicy::global(), StaticOverrideTable::global())
    }

    /// Parses `target` and resolves its host.
    ///
    /// # Errors
    ///
    /// [`NetError::InvalidEndpoint`] for a malformed target. Resolution
    /// failures produce [`SocketAddress::Unresolved`].
    pub fn create_socket_addr(
        &self,
        target: &str,
        default_port: Option<u16>,
        source_label: Option<&str>,
    ) -> Result<SocketAddress, NetError> {
        let endpoint = endpoint::parse(target, default_port, source_label)?;
        self.create_socket_addr_for_host(&endpoint.host, endpoint.port)
    }

    /// Resolves `host` (honoring static overrides) without parsing.
    ///
    /// # Errors
    ///
    /// Any resolver error other than a resolution failure.
    pub fn create_socket_addr_for_host(
        &self,
        host: &str,
        port: u16,
    ) -> Result<SocketAddress, NetError> {
        let static_host = self.overrides.get(host);
        let resolve_host = static_host.as_deref().unwrap_or(host);
        let result = self.policy.resolve(resolve_host);
        finish(host, port, static_host.is_some(), result)
    }

    /// Like [`create_socket_addr`](Self::create_socket_addr), bounding the
    /// lookup by `timeout`. A timed out lookup also yields an unresolved
    /// address.
    pub async fn create_socket_addr_within(
        &self,
        target: &str,
        default_port: Option<u16>,
        source_label: Option<&str>,
        timeout: Duration,
    ) -> Result<SocketAddress, NetError> {
        let endpoint = endpoint::parse(target, default_port, source_label)?;
        let static_host = self.overrides.get(&endpoint.host);
        let resolve_host = static_host.as_deref().unwrap_or(&endpoint.host);
        let result = self.policy.resolve_within(resolve_host, timeout).await;
        finish(&endpoint.host, endpoint.port, static_host.is_some(), result)
    }
}

fn finish(
    host: &str,
    port: u16,
    overridden: bool,
    result: Result<AddressRecord, NetError>,
) -> Result<SocketAddress, NetError> {
    match result {
        // A static entry resolves under the substitute name; present the
        // original host.
        Ok(record) if overridden => Ok(SocketAddress::Resolved {
            record: record.with_host(host),
            port,
        }),
        Ok(record) => Ok(SocketAddress::Resolved { record, port }),
        Err(e) if e.is_resolution_failure() => {
            tracing::debug!(host = %host, port, error = %e, "Using unresolved address");
            Ok(SocketAddress::Unresolved {
                host: host.to_string(),
                port,
            })
        }
        Err(e) => Err(e),
    }
}
