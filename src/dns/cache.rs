//! In-memory host cache.
//!
//! Maps each hostname to the address list of its most recent successful
//! resolution. The whole map sits behind one reader/writer lock; critical
//! sections are single map operations and never span a lookup.

use super::Name;
use parking_lot::RwLock;
use std::{collections::HashMap, net::IpAddr};

/// Initial capacity of the host map.
const INITIAL_CAPACITY: usize = 64;

/// Thread-safe hostname to address-list store.
///
/// Entries are replaced as a whole: a reader sees either the previous list
/// or the new one, never a mix.
#[derive(Debug)]
pub struct HostCache {
    entries: RwLock<HashMap<Name, Vec<IpAddr>>>,
}

impl Default for HostCache {
    fn default() -> Self {
        Self::new()
    }
}

impl HostCache {
    /// Create a new empty host cache.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::with_capacity(INITIAL_CAPACITY)),
        }
    }

    /// Returns a copy of the cached addresses for `name`.
    pub fn get(&self, name: &Name) -> Option<Vec<IpAddr>> {
        self.entries.read().get(name).cloned()
    }

    /// Replaces the cached addresses for `name`.
    pub fn set(&self, name: Name, addrs: Vec<IpAddr>) {
        self.entries.write().insert(name, addrs);
    }

    /// Point-in-time copy of every cached hostname.
    pub fn snapshot_keys(&self) -> Vec<Name> {
        self.entries.read().keys().cloned().collect()
    }

    pub fn contains(&self, name: &Name) -> bool {
        self.entries.read().contains_key(name)
    }

    /// Get number of cached hostnames.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};
    use std::sync::Arc;

    fn v4(a: u8, b: u8, c: u8, d: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(a, b, c, d))
    }

    #[test]
    fn test_set_and_get() {
        let cache = HostCache::new();
        let addrs = vec![v4(10, 0, 0, 1), IpAddr::V6(Ipv6Addr::LOCALHOST)];

        cache.set(Name::new("example.com"), addrs.clone());

        assert_eq!(cache.get(&Name::new("example.com")), Some(addrs));
        assert!(cache.contains(&Name::new("example.com")));
    }

    #[test]
    fn test_get_not_found() {
        let cache = HostCache::new();
        assert!(cache.get(&Name::new("unknown.com")).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_set_replaces_whole_list() {
        let cache = HostCache::new();
        let name = Name::new("example.com");

        cache.set(name.clone(), vec![v4(1, 1, 1, 1), v4(2, 2, 2, 2)]);
        cache.set(name.clone(), vec![v4(3, 3, 3, 3)]);

        assert_eq!(cache.get(&name), Some(vec![v4(3, 3, 3, 3)]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_keeps_order_and_duplicates() {
        let cache = HostCache::new();
        let name = Name::new("dup.example");
        let addrs = vec![v4(2, 2, 2, 2), v4(1, 1, 1, 1), v4(2, 2, 2, 2)];

        cache.set(name.clone(), addrs.clone());

        assert_eq!(cache.get(&name), Some(addrs));
    }

    #[test]
    fn test_snapshot_keys_is_detached() {
        let cache = HostCache::new();
        cache.set(Name::new("a.com"), vec![v4(1, 1, 1, 1)]);
        cache.set(Name::new("b.com"), vec![v4(2, 2, 2, 2)]);

        let mut keys = cache.snapshot_keys();
        keys.sort();
        assert_eq!(keys, vec![Name::new("a.com"), Name::new("b.com")]);

        // Writing while holding the snapshot must not deadlock or alter it.
        cache.set(Name::new("c.com"), vec![v4(3, 3, 3, 3)]);
        assert_eq!(keys.len(), 2);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_concurrent_writers_never_tear_entries() {
        let cache = Arc::new(HostCache::new());
        let name = Name::new("race.example");
        let list_a = vec![v4(1, 1, 1, 1); 8];
        let list_b = vec![v4(2, 2, 2, 2); 8];

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let cache = Arc::clone(&cache);
                let name = name.clone();
                let list = if i % 2 == 0 { list_a.clone() } else { list_b.clone() };
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        cache.set(name.clone(), list.clone());
                        let seen = cache.get(&name).unwrap();
                        assert!(seen.iter().all(|ip| *ip == seen[0]));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let last = cache.get(&name).unwrap();
        assert!(last == list_a || last == list_b);
    }
}
