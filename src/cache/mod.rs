use std::sync::Arc;

use crate::api::VideoInfoResponse;

pub mod memory;

pub use memory::{CacheEntry, MemoryCache};

/// Process-lifetime store for extraction results, keyed by request URL.
///
/// Implementations are best effort: concurrent misses for the same key may
/// both reach the extractor, and the last insert wins.
pub trait InfoCache: Send + Sync {
    /// Returns a fresh entry. Stale entries are removed and reported as a miss.
    fn get(&self, key: &str) -> Option<Arc<VideoInfoResponse>>;

    fn insert(&self, key: String, data: Arc<VideoInfoResponse>);

    /// Drops every stale entry, returning how many were removed.
    fn evict_expired(&self) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cache used when caching is disabled in the config.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

impl InfoCache for NoopCache {
    fn get(&self, _key: &str) -> Option<Arc<VideoInfoResponse>> {
        None
    }

    fn insert(&self, _key: String, _data: Arc<VideoInfoResponse>) {}

    fn evict_expired(&self) -> usize {
        0
    }

    fn len(&self) -> usize {
        0
    }
}

/// Periodically evicts stale entries until the runtime shuts down.
pub fn spawn_sweeper(
    cache: Arc<dyn InfoCache>,
    interval: std::time::Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // the first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let evicted = cache.evict_expired();
            if evicted > 0 {
                tracing::debug!("Cache sweep evicted {} entries, {} left", evicted, cache.len());
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Arc<VideoInfoResponse> {
        Arc::new(VideoInfoResponse {
            title: "t".into(),
            author: None,
            thumbnail: None,
            streams: vec![],
        })
    }

    #[test]
    fn test_noop_cache_never_stores() {
        let cache = NoopCache;
        cache.insert("https://youtu.be/dQw4w9WgXcQ".into(), sample());
        assert!(cache.get("https://youtu.be/dQw4w9WgXcQ").is_none());
        assert!(cache.is_empty());
        assert_eq!(cache.evict_expired(), 0);
    }

    #[tokio::test]
    async fn test_sweeper_evicts_stale_entries() {
        let cache = Arc::new(MemoryCache::new(std::time::Duration::from_millis(10)));
        cache.insert("a".into(), sample());
        cache.insert("b".into(), sample());
        assert_eq!(cache.len(), 2);

        let handle = spawn_sweeper(cache.clone(), std::time::Duration::from_millis(20));
        tokio::time::sleep(std::time::Duration::from_millis(120)).await;
        handle.abort();

        assert_eq!(cache.len(), 0);
    }
}
