use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

pub mod clients;
pub mod innertube;
pub mod utils;

pub use clients::ClientProfile;
pub use innertube::InnertubeExtractor;

#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("No video id found: {0}")]
    InvalidVideoId(String),

    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{client} player request returned HTTP {status}")]
    HttpStatus { client: String, status: u16 },

    #[error("{0}")]
    Unplayable(String),

    #[error("No playable streams found")]
    NoStreams,

    #[error("Failed to parse player response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No extraction clients configured")]
    NoClients,
}

/// Video details as reported by the extraction backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawVideoDetails {
    pub video_id: String,
    pub title: String,
    pub author: Option<String>,
    /// Thumbnail URLs, smallest first.
    pub thumbnails: Vec<String>,
}

/// A single format entry from the player response's `streamingData`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawFormat {
    #[serde(default)]
    pub itag: u32,
    pub url: Option<String>,
    #[serde(default)]
    pub mime_type: String,
    pub quality_label: Option<String>,
    pub bitrate: Option<u64>,
    /// Delivered upstream as a decimal string.
    pub content_length: Option<String>,
    pub audio_quality: Option<String>,
    pub signature_cipher: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawVideoInfo {
    pub details: RawVideoDetails,
    /// Muxed formats first, then adaptive ones.
    pub formats: Vec<RawFormat>,
}

/// The "get info for URL" seam. The handler only ever talks to this trait.
#[async_trait]
pub trait VideoExtractor: Send + Sync {
    fn name(&self) -> &str;

    async fn get_info(&self, url: &str) -> Result<RawVideoInfo, ExtractorError>;
}
