//! Search domain discovery from the system resolver configuration.
//!
//! Reads `/etc/resolv.conf` on Unix (and the adapter settings on Windows)
//! through hickory-dns. When the configuration has no `search` list but does
//! name a local `domain`, that domain is the single search entry.

use hickory_resolver::system_conf::read_system_conf;

/// Returns the system search domains in priority order.
///
/// Trailing root dots are stripped; an unreadable configuration yields an
/// empty list, which limits qualification to exact lookups.
pub fn system_search_domains() -> Vec<String> {
    let config = match read_system_conf() {
        Ok((config, _opts)) => config,
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Failed to read system resolver config, search domains disabled"
            );
            return Vec::new();
        }
    };

    let mut domains = normalize(config.search().iter().map(|name| name.to_string()));
    if domains.is_empty() {
        domains = normalize(config.domain().map(|name| name.to_string()));
    }

    tracing::debug!(search_domains = ?domains, "Using system search path");
    domains
}

fn normalize<I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    names
        .into_iter()
        .map(|name| name.trim_end_matches('.').to_string())
        .filter(|name| !name.is_empty())
        .collect()
}
