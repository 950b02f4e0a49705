use serde::{Deserialize, Serialize};

use crate::extractor::{ExtractorError, RawFormat, RawVideoInfo};

/// One downloadable variant of a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamFormat {
    pub quality: Option<String>,
    pub url: String,
    pub has_audio: bool,
    pub has_video: bool,
    pub container: String,
    pub codecs: String,
    pub bitrate: Option<u64>,
    pub content_length: Option<u64>,
}

/// Body of a successful `GET /api/youtube`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfoResponse {
    pub title: String,
    pub author: Option<String>,
    pub thumbnail: Option<String>,
    pub streams: Vec<StreamFormat>,
}

impl StreamFormat {
    /// Returns `None` for formats without a directly usable URL.
    pub fn from_raw(raw: &RawFormat) -> Option<Self> {
        let url = raw.url.as_deref().filter(|u| !u.is_empty())?;
        let (media_type, container, codecs) = parse_mime_type(&raw.mime_type);

        let has_video = media_type == "video";
        let has_audio = media_type == "audio" || raw.audio_quality.is_some();

        Some(Self {
            quality: if has_video {
                raw.quality_label.clone()
            } else {
                None
            },
            url: url.to_string(),
            has_audio,
            has_video,
            container,
            codecs,
            bitrate: raw.bitrate,
            content_length: raw
                .content_length
                .as_deref()
                .and_then(|s| s.trim().parse().ok()),
        })
    }
}

impl TryFrom<RawVideoInfo> for VideoInfoResponse {
    type Error = ExtractorError;

    fn try_from(info: RawVideoInfo) -> Result<Self, Self::Error> {
        let streams: Vec<StreamFormat> =
            info.formats.iter().filter_map(StreamFormat::from_raw).collect();

        if streams.is_empty() {
            return Err(ExtractorError::NoStreams);
        }

        Ok(Self {
            title: info.details.title,
            author: info.details.author,
            thumbnail: info.details.thumbnails.last().cloned(),
            streams,
        })
    }
}

/// Splits `video/mp4; codecs="avc1.42001E, mp4a.40.2"` into
/// (`video`, `mp4`, `avc1.42001E, mp4a.40.2`).
fn parse_mime_type(mime_type: &str) -> (String, String, String) {
    let (essence, params) = mime_type.split_once(';').unwrap_or((mime_type, ""));
    let (media_type, container) = essence.trim().split_once('/').unwrap_or((essence.trim(), ""));

    let codecs = params
        .split_once("codecs=")
        .map(|(_, value)| value.trim().trim_matches('"').trim().to_string())
        .unwrap_or_default();

    (
        media_type.to_lowercase(),
        container.to_lowercase(),
        codecs,
    )
}
