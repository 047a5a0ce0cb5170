//! Location registry implementation
//!
//! The central keyed store of live location records, shared by every
//! connection's tap. Keys partition by connection, so the only contended
//! operation is first access from a connection's read and write sides at
//! once; the map guarantees exactly one record per key regardless.

use dashmap::DashMap;

use crate::location::LocationHandle;

/// Identity of one relayed connection
///
/// Stable for the lifetime of the connection; the host assigns it at accept
/// time and reuses it for every lifecycle event of that connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionKey(pub u64);

impl std::fmt::Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Concurrent store of live location records
///
/// Lock-free reads for lookups; `get_or_create` takes a single shard lock
/// just long enough to insert. Nothing here blocks or yields, so it is safe
/// to call from the synchronous frame-observation path.
pub struct LocationRegistry {
    entries: DashMap<SessionKey, LocationHandle>,
}

impl LocationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Get the live record for a session, if one exists
    ///
    /// Pure read; never creates an entry.
    pub fn lookup(&self, key: SessionKey) -> Option<LocationHandle> {
        self.entries.get(&key).map(|entry| entry.value().clone())
    }

    /// Get the live record for a session, creating it on first access
    ///
    /// Exactly one record is ever associated with a key, even when the read
    /// and write sides of a connection race on first contact. Repeated calls
    /// return handles to the same record.
    pub fn get_or_create(&self, key: SessionKey) -> LocationHandle {
        self.entries
            .entry(key)
            .or_insert_with(|| {
                tracing::debug!(session = %key, "Location record created");
                LocationHandle::new()
            })
            .value()
            .clone()
    }

    /// Discard a session's record
    ///
    /// Removing an absent key is a no-op. Holders of outstanding handles keep
    /// a usable record; it is just no longer reachable through the registry.
    pub fn remove(&self, key: SessionKey) {
        if self.entries.remove(&key).is_some() {
            tracing::debug!(session = %key, "Location record removed");
        }
    }

    /// Number of tracked sessions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no session is tracked
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LocationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_no_entry_before_first_contact() {
        let registry = LocationRegistry::new();
        assert!(registry.lookup(SessionKey(1)).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_get_or_create_idempotent() {
        let registry = LocationRegistry::new();
        let key = SessionKey(7);

        let first = registry.get_or_create(key);
        let second = registry.get_or_create(key);
        assert!(first.same_record(&second));

        let found = registry.lookup(key).unwrap();
        assert!(found.same_record(&first));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_updates_visible_through_registry() {
        let registry = LocationRegistry::new();
        let key = SessionKey(3);

        let handle = registry.get_or_create(key);
        handle.update_position(10.0, 64.0, -5.0, true);

        let seen = registry.lookup(key).unwrap().snapshot();
        assert_eq!(seen.x(), 10.0);
        assert!(seen.on_ground());
    }

    #[test]
    fn test_remove() {
        let registry = LocationRegistry::new();
        let key = SessionKey(4);

        registry.get_or_create(key);
        registry.remove(key);
        assert!(registry.lookup(key).is_none());

        // Removing an absent key is a no-op.
        registry.remove(key);
        registry.remove(SessionKey(999));
    }

    #[test]
    fn test_keys_are_independent() {
        let registry = LocationRegistry::new();
        let a = registry.get_or_create(SessionKey(1));
        let b = registry.get_or_create(SessionKey(2));
        assert!(!a.same_record(&b));

        a.update_position(1.0, 2.0, 3.0, false);
        assert!(b.snapshot().x().is_nan());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_access_yields_one_record() {
        let registry = Arc::new(LocationRegistry::new());
        let key = SessionKey(42);

        let mut tasks = Vec::new();
        for _ in 0..32 {
            let registry = Arc::clone(&registry);
            tasks.push(tokio::spawn(async move { registry.get_or_create(key) }));
        }

        let mut handles = Vec::new();
        for task in tasks {
            handles.push(task.await.unwrap());
        }

        let first = &handles[0];
        for handle in &handles {
            assert!(handle.same_record(first));
        }
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_remove_during_updates_is_safe() {
        // Last-write-wins is fine; this must just not wedge or panic.
        let registry = Arc::new(LocationRegistry::new());
        let key = SessionKey(5);
        let handle = registry.get_or_create(key);

        let writer = {
            let handle = handle.clone();
            tokio::spawn(async move {
                for i in 0..1000 {
                    handle.update_position(i as f64, 0.0, 0.0, false);
                }
            })
        };
        let remover = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move { registry.remove(key) })
        };

        writer.await.unwrap();
        remover.await.unwrap();
        assert!(registry.lookup(key).is_none());
    }
}
