use std::sync::Arc;

use crate::{
    cache::{InfoCache, MemoryCache, NoopCache},
    common::{AnyResult, HttpClient},
    configs::Config,
    extractor::{ClientProfile, InnertubeExtractor, VideoExtractor},
    server::InfoService,
};

/// Top-level application state.
pub struct AppState {
    pub config: Config,
    pub service: InfoService,
}

impl AppState {
    pub fn new(config: Config, extractor: Arc<dyn VideoExtractor>) -> Self {
        let cache: Arc<dyn InfoCache> = if config.cache.enabled {
            Arc::new(MemoryCache::new(config.cache.ttl()))
        } else {
            Arc::new(NoopCache)
        };
        let service = InfoService::new(extractor, cache, config.extractor.timeout());

        Self { config, service }
    }

    /// Wires the InnerTube extractor from `[extractor]`.
    pub fn from_config(config: Config) -> AnyResult<Self> {
        let http = HttpClient::new(config.extractor.request_timeout())?;
        let extractor =
            InnertubeExtractor::new(http, ClientProfile::from_names(&config.extractor.clients));

        tracing::info!(
            "YouTube clients: {}",
            extractor
                .clients()
                .iter()
                .map(|c| c.name)
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self::new(config, Arc::new(extractor)))
    }
}
