//! # clusternet
//!
//! Security-aware hostname resolution and socket address construction for
//! cluster connection setup.
//!
//! How a hostname is resolved decides which identity ends up in security
//! tokens and service principals, so every process in a cluster must resolve
//! the same way. `clusternet` makes that choice an explicit, process-wide
//! policy.
//!
//! ## Features
//!
//! - **Endpoint parsing**: `host`, `host:port`, `scheme://host:port/path`,
//!   with errors naming the configuration property that held the bad value
//! - **Qualified resolution**: search-domain qualification, rooted lookups,
//!   no reverse lookups for IP literals
//! - **Standard resolution**: plain platform lookups when token services use IPs
//! - **Static overrides**: resolve one name through another, presenting the
//!   original name
//! - **Atomic reconfiguration**: policy snapshots swapped as a unit
//! - **Slow lookup reporting** through `tracing`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use clusternet::{create_socket_addr, register_static_override};
//!
//! register_static_override("dn1.test", "localhost");
//! let addr = create_socket_addr("dn1.test:50010", None, Some("dfs.datanode.address"))?;
//! assert_eq!(addr.host(), "dn1.test");
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error definitions
//! - [`config`] - Configuration store and resolution settings
//! - [`dns`] - Resolvers, overrides and the resolution policy
//! - [`socket`] - Endpoint parsing and socket address construction

pub mod base;
pub mod config;
pub mod dns;
pub mod socket;

pub use base::neterror::NetError;
pub use dns::{reconfigure, register_static_override, resolve, static_resolution, AddressRecord};
pub use socket::{create_socket_addr, create_socket_addr_for_host, SocketAddress};
