//! Endpoint parsing and socket address construction.
//!
//! - [`endpoint`]: `host`, `host:port` and `scheme://host:port/path` parsing
//! - [`address`]: override-aware resolution into a [`SocketAddress`]

pub mod address;
pub mod endpoint;

pub use address::{SocketAddress, SocketAddressBuilder};
pub use endpoint::ParsedEndpoint;

use crate::base::neterror::NetError;

/// Builds a socket address from `target` with the process-wide policy and
/// static overrides.
///
/// `default_port` applies when `target` names no port; `source_label` names
/// the configuration property `target` came from, for error messages.
pub fn create_socket_addr(
    target: &str,
    default_port: Option<u16>,
    source_label: Option<&str>,
) -> Result<SocketAddress, NetError> {
    SocketAddressBuilder::global().create_socket_addr(target, default_port, source_label)
}

/// Resolves `host` into a socket address with the process-wide policy and
/// static overrides.
pub fn create_socket_addr_for_host(host: &str, port: u16) -> Result<SocketAddress, NetError> {
    SocketAddressBuilder::global().create_socket_addr_for_host(host, port)
}
