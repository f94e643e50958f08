//! Ergonomic error context helpers.
//!
//! Provides extension traits for adding context to `Result` types,
//! converting IO errors from platform lookups into `NetError` variants.

use crate::base::neterror::NetError;
use std::io;

/// Extension trait for adding context to IO Results.
pub trait IoResultExt<T> {
    /// Add DNS resolution context to an IO error.
    ///
    /// # Example
    /// ```ignore
    /// use clusternet::base::context::IoResultExt;
    ///
    /// let addrs = ("nn1.example.com", 0).to_socket_addrs().dns_context("nn1")?;
    /// // Error: "Name not resolved: nn1"
    /// ```
    fn dns_context(self, host: &str) -> Result<T, NetError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn dns_context(self, host: &str) -> Result<T, NetError> {
        self.map_err(|e| {
            tracing::debug!(host = %host, error = %e, "platform lookup failed");
            NetError::name_not_resolved(host)
        })
    }
}
