//! Size and age bounds for in-memory snapshot storage.

use dashmap::DashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

pub trait CacheEntry {
    fn stored_at(&self) -> Instant;
}

/// Drop entries older than `max_age`, then the oldest entries until at most
/// `max_entries` remain. Returns how many entries were removed.
pub fn prune_cache<K, V>(cache: &DashMap<K, V>, max_entries: usize, max_age: Duration) -> usize
where
    K: Clone + Eq + Hash,
    V: CacheEntry,
{
    let now = Instant::now();
    let mut entries: Vec<(K, Instant)> = cache
        .iter()
        .map(|entry| (entry.key().clone(), entry.value().stored_at()))
        .collect();

    let mut removed = 0;
    entries.retain(|(key, stored_at)| {
        if now.duration_since(*stored_at) > max_age {
            if cache.remove(key).is_some() {
                removed += 1;
            }
            false
        } else {
            true
        }
    });

    if cache.len() <= max_entries {
        return removed;
    }

    entries.sort_by_key(|(_, stored_at)| *stored_at);
    for (key, _) in entries {
        if cache.len() <= max_entries {
            break;
        }
        if cache.remove(&key).is_some() {
            removed += 1;
        }
    }
    removed
}
