//! Qualified resolver: fully-qualified-name resolution policy.
//!
//! Unlike the standard resolver, this one owns search path application:
//!
//! - IP literals are returned as-is, so no reverse lookup ever renames them.
//! - Rooted names (`"host."`) never consult the search domains.
//! - Dotted names try an exact lookup first, then the search domains.
//! - Bare labels try the search domains first, then an exact lookup, except
//!   `localhost`, which maps to the loopback address without any lookup.
//!
//! Every query is rooted with a trailing dot so the platform resolver cannot
//! apply its own search path on top (RFC 1535). The record handed back carries
//! the requested host rather than the rooted name, because rooted and
//! non-rooted names are not equivalent for principal matching.

use super::{searchpath, AddressRecord, HostResolver, Lookup, SystemLookup};
use crate::base::neterror::NetError;
use std::{
    borrow::Cow,
    fmt,
    net::{IpAddr, Ipv4Addr},
    sync::Arc,
};

/// Name of the loopback host that never needs a lookup.
const LOCALHOST: &str = "localhost";

/// Resolver applying a fully-qualified-name policy over a fixed search list.
///
/// Search domains are tried in order and the first one that resolves wins,
/// so priority is whatever order the resolver configuration lists them in.
#[derive(Clone)]
pub struct QualifiedResolver {
    search_domains: Arc<[String]>,
    lookup: Arc<dyn Lookup>,
}

impl QualifiedResolver {
    /// Creates a resolver using the system search domains and `getaddrinfo`.
    ///
    /// The search path is read once here and never refreshed.
    pub fn new() -> Self {
        Self::with_search_domains(searchpath::system_search_domains())
    }

    /// Creates a resolver with an explicit search domain list.
    pub fn with_search_domains<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            search_domains: domains.into_iter().map(Into::into).collect(),
            lookup: Arc::new(SystemLookup),
        }
    }

    /// Replaces the platform lookup.
    pub fn with_lookup(mut self, lookup: Arc<dyn Lookup>) -> Self {
        self.lookup = lookup;
        self
    }

    /// The search domains, in priority order.
    pub fn search_domains(&self) -> &[String] {
        &self.search_domains
    }

    /// Exact lookup of `host`, rooted before querying.
    ///
    /// The record carries `host` as given, not the rooted form.
    fn by_exact_name(&self, host: &str) -> Option<AddressRecord> {
        let rooted: Cow<'_, str> = if host.ends_with('.') {
            Cow::Borrowed(host)
        } else {
            Cow::Owned(format!("{host}."))
        };

        match self.lookup.lookup(&rooted) {
            Ok(ip) => Some(AddressRecord::new(ip, host)),
            Err(e) => {
                tracing::debug!(name = %rooted, error = %e, "exact lookup failed");
                None
            }
        }
    }

    /// Tries `host` under each search domain in order; first hit wins.
    fn by_name_with_search(&self, host: &str) -> Option<AddressRecord> {
        if host.ends_with('.') {
            return self.by_exact_name(host);
        }
        self.search_domains.iter().find_map(|domain| {
            let candidate = qualify(host, domain);
            self.by_exact_name(&candidate).map(|record| {
                tracing::debug!(host = %host, qualified = %candidate, "resolved via search domain");
                record
            })
        })
    }
}

/// Appends `domain` to `host`, adding a separating dot unless `domain`
/// already starts with one.
pub fn qualify(host: &str, domain: &str) -> String {
    if domain.starts_with('.') {
        format!("{host}{domain}")
    } else {
        format!("{host}.{domain}")
    }
}

impl Default for QualifiedResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl HostResolver for QualifiedResolver {
    fn resolve(&self, host: &str) -> Result<AddressRecord, NetError> {
        let record = if let Ok(ip) = host.parse::<IpAddr>() {
            Some(AddressRecord::new(ip, host))
        } else if host.ends_with('.') {
            self.by_exact_name(host)
        } else if host.contains('.') {
            self.by_exact_name(host)
                .or_else(|| self.by_name_with_search(host))
        } else if host.eq_ignore_ascii_case(LOCALHOST) {
            Some(AddressRecord::new(IpAddr::V4(Ipv4Addr::LOCALHOST), host))
        } else {
            self.by_name_with_search(host)
                .or_else(|| self.by_exact_name(host))
        };

        // Search hits are recorded under the qualified candidate; present the
        // name that was asked for.
        record
            .map(|r| {
                if r.host() == host {
                    r
                } else {
                    r.with_host(host)
                }
            })
            .ok_or_else(|| NetError::name_not_resolved(host))
    }
}

impl fmt::Debug for QualifiedResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QualifiedResolver")
            .field("search_domains", &self.search_domains)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io;
    use std::net::Ipv6Addr;
    use std::sync::Mutex;

    /// Answers only the exact names it was given, recording every query.
    #[derive(Default)]
    struct StubLookup {
        answers: HashMap<String, IpAddr>,
        queries: Mutex<Vec<String>>,
    }

    impl StubLookup {
        fn with(entries: &[(&str, [u8; 4])]) -> Arc<Self> {
            Arc::new(Self {
                answers: entries
                    .iter()
                    .map(|(name, ip)| (name.to_string(), IpAddr::from(*ip)))
                    .collect(),
                queries: Mutex::new(Vec::new()),
            })
        }

        fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    impl Lookup for StubLookup {
        fn lookup(&self, name: &str) -> io::Result<IpAddr> {
            self.queries.lock().unwrap().push(name.to_string());
            self.answers
                .get(name)
                .copied()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_string()))
        }
    }

    fn resolver(domains: &[&str], stub: &Arc<StubLookup>) -> QualifiedResolver {
        QualifiedResolver::with_search_domains(domains.iter().copied())
            .with_lookup(stub.clone() as Arc<dyn Lookup>)
    }

    #[test]
    fn test_ip_literal_is_never_looked_up() {
        let stub = StubLookup::with(&[]);
        let resolver = resolver(&["example.com"], &stub);

        for literal in ["10.0.0.7", "::1", "fe80::1", "255.255.255.255"] {
            let record = resolver.resolve(literal).unwrap();
            assert_eq!(record.host(), literal);
            assert_eq!(record.ip(), literal.parse::<IpAddr>().unwrap());
        }
        assert!(stub.queries().is_empty());
    }

    #[test]
    fn test_rooted_name_skips_search_domains() {
        let stub = StubLookup::with(&[("nn1.example.com.", [10, 0, 0, 1])]);

        let with_domains = resolver(&["example.com", "corp"], &stub);
        let without_domains = resolver(&[], &stub);

        assert_eq!(
            with_domains.resolve("nn1.example.com.").unwrap(),
            without_domains.resolve("nn1.example.com.").unwrap()
        );
        assert_eq!(
            with_domains.resolve("nn1.").unwrap_err(),
            without_domains.resolve("nn1.").unwrap_err()
        );
        assert!(stub.queries().iter().all(|q| q == "nn1.example.com." || q == "nn1."));
    }

    #[test]
    fn test_rooted_name_keeps_requested_host() {
        let stub = StubLookup::with(&[("nn1.example.com.", [10, 0, 0, 1])]);
        let record = resolver(&[], &stub).resolve("nn1.example.com.").unwrap();
        assert_eq!(record.host(), "nn1.example.com.");
    }

    #[test]
    fn test_bare_label_uses_search_domain() {
        let stub = StubLookup::with(&[("node1.example.com.", [10, 0, 0, 2])]);
        let record = resolver(&["example.com"], &stub).resolve("node1").unwrap();

        assert_eq!(record.host(), "node1");
        assert_eq!(record.ip(), IpAddr::from([10, 0, 0, 2]));
        assert_eq!(stub.queries(), vec!["node1.example.com."]);
    }

    #[test]
    fn test_bare_label_prefers_search_over_exact() {
        let stub = StubLookup::with(&[
            ("node1.", [192, 168, 0, 1]),
            ("node1.example.com.", [10, 0, 0, 2]),
        ]);
        let record = resolver(&["example.com"], &stub).resolve("node1").unwrap();
        assert_eq!(record.ip(), IpAddr::from([10, 0, 0, 2]));
    }

    #[test]
    fn test_bare_label_falls_back_to_exact() {
        let stub = StubLookup::with(&[("node1.", [192, 168, 0, 1])]);
        let record = resolver(&["example.com", "corp"], &stub)
            .resolve("node1")
            .unwrap();

        assert_eq!(record.ip(), IpAddr::from([192, 168, 0, 1]));
        assert_eq!(
            stub.queries(),
            vec!["node1.example.com.", "node1.corp.", "node1."]
        );
    }

    #[test]
    fn test_dotted_name_tries_exact_first() {
        let stub = StubLookup::with(&[
            ("nn1.rack1.", [10, 1, 0, 1]),
            ("nn1.rack1.example.com.", [10, 2, 0, 1]),
        ]);
        let record = resolver(&["example.com"], &stub).resolve("nn1.rack1").unwrap();

        assert_eq!(record.ip(), IpAddr::from([10, 1, 0, 1]));
        assert_eq!(stub.queries(), vec!["nn1.rack1."]);
    }

    #[test]
    fn test_dotted_name_falls_back_to_search() {
        let stub = StubLookup::with(&[("nn1.rack1.example.com.", [10, 2, 0, 1])]);
        let record = resolver(&["example.com"], &stub).resolve("nn1.rack1").unwrap();

        assert_eq!(record.host(), "nn1.rack1");
        assert_eq!(
            stub.queries(),
            vec!["nn1.rack1.", "nn1.rack1.example.com."]
        );
    }

    #[test]
    fn test_first_matching_domain_wins() {
        let stub = StubLookup::with(&[
            ("dn1.b.example.", [10, 0, 0, 2]),
            ("dn1.c.example.", [10, 0, 0, 3]),
        ]);
        let record = resolver(&["a.example", "b.example", "c.example"], &stub)
            .resolve("dn1")
            .unwrap();
        assert_eq!(record.ip(), IpAddr::from([10, 0, 0, 2]));
    }

    #[test]
    fn test_domain_with_leading_dot() {
        let stub = StubLookup::with(&[("dn1.example.com.", [10, 0, 0, 9])]);
        let record = resolver(&[".example.com"], &stub).resolve("dn1").unwrap();
        assert_eq!(record.ip(), IpAddr::from([10, 0, 0, 9]));
        assert_eq!(stub.queries(), vec!["dn1.example.com."]);
    }

    #[test]
    fn test_localhost_needs_no_lookup() {
        let stub = StubLookup::with(&[]);
        let resolver = resolver(&["example.com"], &stub);

        let record = resolver.resolve("LocalHost").unwrap();
        assert_eq!(record.host(), "LocalHost");
        assert!(record.ip().is_loopback());
        assert!(stub.queries().is_empty());
    }

    #[test]
    fn test_unresolvable() {
        let stub = StubLookup::with(&[]);
        let resolver = resolver(&["example.com"], &stub);
        assert_eq!(
            resolver.resolve("nohost"),
            Err(NetError::name_not_resolved("nohost"))
        );
        assert_eq!(
            resolver.resolve("nohost.example.org"),
            Err(NetError::name_not_resolved("nohost.example.org"))
        );
    }

    #[test]
    fn test_empty_search_list_is_exact_only() {
        let stub = StubLookup::with(&[]);
        let _ = resolver(&[], &stub).resolve("node1");
        assert_eq!(stub.queries(), vec!["node1."]);
    }

    #[test]
    fn test_qualify() {
        assert_eq!(qualify("h", "example.com"), "h.example.com");
        assert_eq!(qualify("h", ".example.com"), "h.example.com");
    }

    #[test]
    fn test_ipv6_literal_record() {
        let stub = StubLookup::with(&[]);
        let record = resolver(&[], &stub).resolve("::1").unwrap();
        assert_eq!(record.ip(), IpAddr::V6(Ipv6Addr::LOCALHOST));
    }
}
