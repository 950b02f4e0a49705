use std::{
    sync::{Arc, LazyLock},
    time::Duration,
};

use regex::Regex;

use crate::{
    api::VideoInfoResponse, cache::InfoCache, common::ApiError, extractor::VideoExtractor,
};

static YOUTUBE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(www\.)?(youtube\.com|youtu\.be)/").expect("static regex is valid")
});

/// Checks the `url` parameter: present, non-empty and on a YouTube host.
pub fn validate_url(url: Option<&str>) -> Result<&str, ApiError> {
    let url = url.filter(|u| !u.is_empty()).ok_or(ApiError::MissingParameter)?;
    if !YOUTUBE_URL.is_match(url) {
        return Err(ApiError::InvalidUrl);
    }
    Ok(url)
}

/// Validates, serves from cache, or extracts with a deadline and caches.
pub struct InfoService {
    extractor: Arc<dyn VideoExtractor>,
    cache: Arc<dyn InfoCache>,
    timeout: Duration,
}

impl InfoService {
    pub fn new(
        extractor: Arc<dyn VideoExtractor>,
        cache: Arc<dyn InfoCache>,
        timeout: Duration,
    ) -> Self {
        Self {
            extractor,
            cache,
            timeout,
        }
    }

    pub fn cache(&self) -> &Arc<dyn InfoCache> {
        &self.cache
    }

    pub async fn lookup(&self, url: Option<&str>) -> Result<Arc<VideoInfoResponse>, ApiError> {
        let url = validate_url(url)?;

        if let Some(cached) = self.cache.get(url) {
            tracing::debug!("Cache hit: {}", url);
            return Ok(cached);
        }

        tracing::debug!("Cache miss, extracting via {}: {}", self.extractor.name(), url);

        // dropping the future on timeout cancels the in-flight upstream request
        let raw = match tokio::time::timeout(self.timeout, self.extractor.get_info(url)).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => return Err(ApiError::ExtractionFailure(e.to_string())),
            Err(_) => return Err(ApiError::ExtractionTimeout),
        };

        let response = VideoInfoResponse::try_from(raw)
            .map_err(|e| ApiError::ExtractionFailure(e.to_string()))?;
        let response = Arc::new(response);

        tracing::info!(
            "Extracted '{}' with {} streams: {}",
            response.title,
            response.streams.len(),
            url
        );

        self.cache.insert(url.to_string(), response.clone());
        Ok(response)
    }
}
