//! Static host overrides.
//!
//! An administrator-registered mapping from a requested host to a substitute
//! host used for resolution only. Lets several logical hostnames resolve
//! through one physical address, e.g. daemons with distinct names running on
//! the same machine in tests.

use dashmap::DashMap;
use std::sync::LazyLock;

static GLOBAL_OVERRIDES: LazyLock<StaticOverrideTable> = LazyLock::new(StaticOverrideTable::new);

/// Thread-safe host-to-substitute table.
///
/// Entries live until the table is dropped; registering an existing host
/// replaces its substitute.
#[derive(Debug, Default)]
pub struct StaticOverrideTable {
    entries: DashMap<String, String>,
}

impl StaticOverrideTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide table consulted by the socket address builder.
    pub fn global() -> &'static StaticOverrideTable {
        &GLOBAL_OVERRIDES
    }

    /// Substitute registered for `host`, if any.
    pub fn get(&self, host: &str) -> Option<String> {
        self.entries.get(host).map(|entry| entry.value().clone())
    }

    /// Register `resolved_name` as the substitute for `host`.
    pub fn put(&self, host: impl Into<String>, resolved_name: impl Into<String>) {
        let host = host.into();
        let resolved_name = resolved_name.into();
        tracing::debug!(host = %host, resolved = %resolved_name, "Adding static resolution");
        self.entries.insert(host, resolved_name);
    }

    /// Returns the number of registered overrides.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no override is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_put_get() {
        let table = StaticOverrideTable::new();
        assert!(table.is_empty());
        assert_eq!(table.get("dn1"), None);

        table.put("dn1", "localhost");
        assert_eq!(table.get("dn1").as_deref(), Some("localhost"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_last_writer_wins() {
        let table = StaticOverrideTable::new();
        table.put("dn1", "localhost");
        table.put("dn1", "127.0.0.1");
        assert_eq!(table.get("dn1").as_deref(), Some("127.0.0.1"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let table = StaticOverrideTable::new();
        table.put("DN1", "localhost");
        assert_eq!(table.get("dn1"), None);
    }

    #[test]
    fn test_concurrent_writers_and_readers() {
        let table = Arc::new(StaticOverrideTable::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let table = Arc::clone(&table);
                thread::spawn(move || {
                    for i in 0..100 {
                        table.put(format!("dn{i}"), format!("host{t}"));
                        assert!(table.get(&format!("dn{i}")).is_some());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(table.len(), 100);
    }
}
