//! DNS Module Tests
//!
//! Covers:
//! - `QualifiedResolver` qualification rules through a stub `Lookup`
//! - `ResolutionPolicy` reconfiguration
//! - `StandardResolver` / `QualifiedResolver` against the system resolver

use clusternet::config::{keys, Configuration, InMemoryConfiguration};
use clusternet::dns::{
    HostResolver, Lookup, QualifiedResolver, ResolutionPolicy, StandardResolver,
};
use clusternet::NetError;

use std::collections::HashSet;
use std::io;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Arc, Mutex};

/// Fails every query except the names it knows, remembering what was asked.
struct StubLookup {
    known: HashSet<&'static str>,
    asked: Mutex<Vec<String>>,
}

impl StubLookup {
    fn new(known: &[&'static str]) -> Arc<Self> {
        Arc::new(Self {
            known: known.iter().copied().collect(),
            asked: Mutex::new(Vec::new()),
        })
    }
}

impl Lookup for StubLookup {
    fn lookup(&self, name: &str) -> io::Result<IpAddr> {
        self.asked.lock().unwrap().push(name.to_string());
        if self.known.contains(name) {
            Ok(IpAddr::V4(Ipv4Addr::new(10, 20, 30, 40)))
        } else {
            Err(io::Error::new(io::ErrorKind::NotFound, name.to_string()))
        }
    }
}

#[test]
fn test_search_domain_fallback() {
    let stub = StubLookup::new(&["node1.example.com."]);
    let resolver =
        QualifiedResolver::with_search_domains(["example.com"]).with_lookup(stub.clone());

    let record = resolver.resolve("node1").unwrap();
    assert_eq!(record.host(), "node1");
    assert_eq!(record.ip(), IpAddr::V4(Ipv4Addr::new(10, 20, 30, 40)));
}

#[test]
fn test_rooted_names_never_search() {
    for known in [&[][..], &["nn1.example.com."][..]] {
        let with = StubLookup::new(known);
        let without = StubLookup::new(known);
        let with_domains = QualifiedResolver::with_search_domains(["example.com", "corp"])
            .with_lookup(with.clone());
        let no_domains =
            QualifiedResolver::with_search_domains(Vec::<String>::new()).with_lookup(without.clone());

        assert_eq!(with_domains.resolve("nn1."), no_domains.resolve("nn1."));
        assert_eq!(*with.asked.lock().unwrap(), vec!["nn1.".to_string()]);
    }
}

#[test]
fn test_ip_literals_keep_their_text() {
    let stub = StubLookup::new(&[]);
    let resolver =
        QualifiedResolver::with_search_domains(["example.com"]).with_lookup(stub.clone());

    for literal in ["192.168.1.10", "2001:db8::7"] {
        assert_eq!(resolver.resolve(literal).unwrap().host(), literal);
    }
    assert!(stub.asked.lock().unwrap().is_empty());
}

#[test]
fn test_standard_resolver_against_system() {
    let record = StandardResolver::new().resolve("127.0.0.1").unwrap();
    assert_eq!(record.ip(), IpAddr::V4(Ipv4Addr::LOCALHOST));
}

#[test]
fn test_qualified_localhost_against_system() {
    let record = QualifiedResolver::new().resolve("localhost").unwrap();
    assert_eq!(record.host(), "localhost");
    assert!(record.ip().is_loopback());
}

#[test]
fn test_unknown_host_against_system() {
    let result = ResolutionPolicy::default().resolve("definitely-not-a-host.invalid");
    assert_eq!(
        result,
        Err(NetError::name_not_resolved("definitely-not-a-host.invalid"))
    );
}

#[test]
fn test_reconfigure_is_idempotent() {
    let conf = InMemoryConfiguration::new();
    conf.set(keys::LOG_SLOW_LOOKUPS_ENABLED, "true");
    conf.set(keys::LOG_SLOW_LOOKUPS_THRESHOLD_MS, "100");

    let probes = ["127.0.0.1", "::1", "localhost", "LOCALHOST", "10.1.2.3"];
    let policy = ResolutionPolicy::default();

    policy.reconfigure(&conf).unwrap();
    let first: Vec<_> = probes.iter().map(|p| policy.resolve(p)).collect();
    let first_settings = policy.snapshot().settings().clone();

    policy.reconfigure(&conf).unwrap();
    let second: Vec<_> = probes.iter().map(|p| policy.resolve(p)).collect();

    assert_eq!(first, second);
    assert_eq!(&first_settings, policy.snapshot().settings());
}
