use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use dashmap::DashMap;

use super::InfoCache;
use crate::api::VideoInfoResponse;

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub data: Arc<VideoInfoResponse>,
    pub created_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() < ttl
    }
}

/// In-memory TTL cache over a concurrent map.
#[derive(Debug)]
pub struct MemoryCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl MemoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }
}

impl InfoCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Arc<VideoInfoResponse>> {
        // the read guard must be released before removing from the same shard
        let entry = self.entries.get(key).map(|e| e.clone())?;
        if entry.is_fresh(self.ttl) {
            return Some(entry.data);
        }

        self.entries
            .remove_if(key, |_, e| e.created_at == entry.created_at);
        None
    }

    fn insert(&self, key: String, data: Arc<VideoInfoResponse>) {
        self.entries.insert(
            key,
            CacheEntry {
                data,
                created_at: Instant::now(),
            },
        );
    }

    fn evict_expired(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, e| e.is_fresh(self.ttl));
        before.saturating_sub(self.entries.len())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
