//! Endpoint string parsing.
//!
//! Accepts `host`, `host:port` and `scheme://host:port/path`. The authority
//! is parsed under a placeholder scheme whatever scheme the target names, so
//! host text and ports come through as written. A scheme-less string must not
//! carry a path.

use crate::base::neterror::NetError;
use url::{Host, Url};

const PLACEHOLDER_SCHEME: &str = "dummyscheme";

/// Host and port extracted from an endpoint string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedEndpoint {
    pub host: String,
    pub port: u16,
}

/// Parses `target` into a host and port.
///
/// `default_port` applies when the target names no port. `source_label`
/// (typically the configuration key the target came from) is included in
/// the error so a bad value can be traced back to its origin.
///
/// # Errors
///
/// [`NetError::InvalidEndpoint`] if the target is blank, has no host, has no
/// port and no default applies, or lacks a scheme yet carries a path.
pub fn parse(
    target: &str,
    default_port: Option<u16>,
    source_label: Option<&str>,
) -> Result<ParsedEndpoint, NetError> {
    let target = target.trim();
    let invalid = || NetError::invalid_endpoint(target, source_label);
    if target.is_empty() {
        return Err(invalid());
    }

    // Every target parses under the placeholder scheme. Special schemes
    // (`http`, `https`, ...) would fold host case and drop explicit ports equal
    // to their well-known port.
    let (has_scheme, authority) = match target.split_once("://") {
        Some((scheme, rest)) if is_scheme(scheme) => (true, rest),
        Some(_) => return Err(invalid()),
        None => (false, target),
    };
    let url = Url::parse(&format!("{PLACEHOLDER_SCHEME}://{authority}")).map_err(|e| {
        tracing::debug!(target = %target, error = %e, "endpoint is not a valid authority");
        invalid()
    })?;

    // Opaque hosts come back percent-encoded when they held characters a
    // host name cannot carry.
    let host = match url.host() {
        Some(Host::Domain(domain)) if !domain.is_empty() && !domain.contains('%') => {
            domain.to_string()
        }
        Some(Host::Ipv4(addr)) => addr.to_string(),
        Some(Host::Ipv6(addr)) => addr.to_string(),
        _ => return Err(invalid()),
    };

    let port = url.port().or(default_port).ok_or_else(invalid)?;

    if !has_scheme && !url.path().is_empty() {
        return Err(invalid());
    }

    Ok(ParsedEndpoint { host, port })
}

fn is_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
