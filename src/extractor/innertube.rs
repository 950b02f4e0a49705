use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{
    ClientProfile, ExtractorError, RawFormat, RawVideoDetails, RawVideoInfo, VideoExtractor,
    utils::extract_video_id,
};

/// YouTube InnerTube API base endpoint.
pub const INNERTUBE_API: &str = "https://youtubei.googleapis.com";

/// Extraction backend talking to YouTube's InnerTube player endpoint,
/// trying each configured client profile until one returns playable data.
pub struct InnertubeExtractor {
    http: reqwest::Client,
    clients: Vec<ClientProfile>,
    api_base: String,
}

impl InnertubeExtractor {
    pub fn new(http: reqwest::Client, clients: Vec<ClientProfile>) -> Self {
        Self {
            http,
            clients,
            api_base: INNERTUBE_API.to_string(),
        }
    }

    /// Points the extractor at another InnerTube-compatible host.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn clients(&self) -> &[ClientProfile] {
        &self.clients
    }

    async fn player_request(
        &self,
        client: &ClientProfile,
        video_id: &str,
    ) -> Result<Value, ExtractorError> {
        let body = json!({
            "context": client.context(),
            "videoId": video_id,
            "contentCheckOk": true,
            "racyCheckOk": true
        });

        let url = format!("{}/youtubei/v1/player?prettyPrint=false", self.api_base);

        tracing::debug!("{} player request for {}", client.name, video_id);

        let res = self
            .http
            .post(&url)
            .header(reqwest::header::USER_AGENT, client.user_agent)
            .header("X-YouTube-Client-Name", client.client_id)
            .header("X-YouTube-Client-Version", client.version)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        let body_text = res.text().await?;

        tracing::debug!("{} player response status: {}", client.name, status);

        if !status.is_success() {
            return Err(ExtractorError::HttpStatus {
                client: client.name.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(serde_json::from_str(&body_text)?)
    }
}

#[async_trait]
impl VideoExtractor for InnertubeExtractor {
    fn name(&self) -> &str {
        "innertube"
    }

    async fn get_info(&self, url: &str) -> Result<RawVideoInfo, ExtractorError> {
        let video_id =
            extract_video_id(url).ok_or_else(|| ExtractorError::InvalidVideoId(url.to_string()))?;

        let mut last_error = None;

        for client in &self.clients {
            let result = match self.player_request(client, &video_id).await {
                Ok(body) => parse_player_response(&body),
                Err(e) => Err(e),
            };

            match result {
                Ok(info) => {
                    tracing::debug!(
                        "{}: {} formats via client '{}'",
                        video_id,
                        info.formats.len(),
                        client.name
                    );
                    return Ok(info);
                }
                Err(e) => {
                    tracing::warn!("{}: client '{}' failed: {}", video_id, client.name, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(ExtractorError::NoClients))
    }
}

/// Turns a `/player` response body into [`RawVideoInfo`], failing when the
/// video is not playable or carries no streaming data.
pub fn parse_player_response(body: &Value) -> Result<RawVideoInfo, ExtractorError> {
    let playability = body
        .get("playabilityStatus")
        .and_then(|p| p.get("status"))
        .and_then(|s| s.as_str())
        .unwrap_or("UNKNOWN");

    if playability != "OK" {
        let reason = body
            .get("playabilityStatus")
            .and_then(|p| p.get("reason"))
            .and_then(|r| r.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Video is not playable (status={})", playability));
        return Err(ExtractorError::Unplayable(reason));
    }

    let streaming_data = body.get("streamingData").ok_or(ExtractorError::NoStreams)?;

    let mut formats = Vec::new();
    for key in ["formats", "adaptiveFormats"] {
        if let Some(list) = streaming_data.get(key).and_then(|v| v.as_array()) {
            for entry in list {
                match RawFormat::deserialize(entry) {
                    Ok(format) => formats.push(format),
                    Err(e) => tracing::debug!("Skipping malformed {} entry: {}", key, e),
                }
            }
        }
    }

    Ok(RawVideoInfo {
        details: parse_video_details(body.get("videoDetails")),
        formats,
    })
}

fn parse_video_details(details: Option<&Value>) -> RawVideoDetails {
    let Some(details) = details else {
        return RawVideoDetails::default();
    };

    let text = |key: &str| details.get(key).and_then(|v| v.as_str()).map(str::to_string);

    let thumbnails = details
        .get("thumbnail")
        .and_then(|t| t.get("thumbnails"))
        .and_then(|arr| arr.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|thumb| thumb.get("url").and_then(|u| u.as_str()))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    RawVideoDetails {
        video_id: text("videoId").unwrap_or_default(),
        title: text("title").unwrap_or_default(),
        author: text("author"),
        thumbnails,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_body() -> Value {
        json!({
            "playabilityStatus": { "status": "OK" },
            "videoDetails": {
                "videoId": "dQw4w9WgXcQ",
                "title": "Never Gonna Give You Up",
                "author": "Rick Astley",
                "thumbnail": { "thumbnails": [
                    { "url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/default.jpg", "width": 120 },
                    { "url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg", "width": 480 }
                ]}
            },
            "streamingData": {
                "formats": [{
                    "itag": 18,
                    "url": "https://rr1.googlevideo.com/videoplayback?itag=18",
                    "mimeType": "video/mp4; codecs=\"avc1.42001E, mp4a.40.2\"",
                    "qualityLabel": "360p",
                    "bitrate": 503000,
                    "audioQuality": "AUDIO_QUALITY_LOW"
                }],
                "adaptiveFormats": [
                    {
                        "itag": 251,
                        "url": "https://rr1.googlevideo.com/videoplayback?itag=251",
                        "mimeType": "audio/webm; codecs=\"opus\"",
                        "bitrate": 135000,
                        "contentLength": "3437753",
                        "audioQuality": "AUDIO_QUALITY_MEDIUM"
                    },
                    {
                        "itag": 137,
                        "signatureCipher": "s=abc&sp=sig&url=https%3A%2F%2Frr1.googlevideo.com",
                        "mimeType": "video/mp4; codecs=\"avc1.640028\"",
                        "qualityLabel": "1080p"
                    }
                ]
            }
        })
    }

    #[test]
    fn test_parse_player_response() {
        let info = parse_player_response(&player_body()).expect("playable body");

        assert_eq!(info.details.video_id, "dQw4w9WgXcQ");
        assert_eq!(info.details.title, "Never Gonna Give You Up");
        assert_eq!(info.details.author.as_deref(), Some("Rick Astley"));
        assert_eq!(info.details.thumbnails.len(), 2);

        let itags: Vec<u32> = info.formats.iter().map(|f| f.itag).collect();
        assert_eq!(itags, vec![18, 251, 137]);
        assert_eq!(info.formats[1].content_length.as_deref(), Some("3437753"));
        assert!(info.formats[2].url.is_none());
        assert!(info.formats[2].signature_cipher.is_some());
    }

    #[test]
    fn test_unplayable_video_reports_reason() {
        let body = json!({
            "playabilityStatus": { "status": "LOGIN_REQUIRED", "reason": "This video is private" }
        });
        match parse_player_response(&body) {
            Err(ExtractorError::Unplayable(reason)) => assert_eq!(reason, "This video is private"),
            other => panic!("expected Unplayable, got {:?}", other),
        }

        let body = json!({ "playabilityStatus": { "status": "ERROR" } });
        let err = parse_player_response(&body).unwrap_err();
        assert_eq!(err.to_string(), "Video is not playable (status=ERROR)");
    }

    #[test]
    fn test_missing_streaming_data() {
        let body = json!({ "playabilityStatus": { "status": "OK" }, "videoDetails": {} });
        assert!(matches!(
            parse_player_response(&body),
            Err(ExtractorError::NoStreams)
        ));
    }

    /// Fake InnerTube host: ANDROID ("3") gets a 503, IOS ("5") a playable
    /// body, anything else an unplayable one.
    async fn spawn_fake_innertube() -> String {
        use axum::{Json, Router, http::HeaderMap, http::StatusCode, routing::post};

        let app = Router::new().route(
            "/youtubei/v1/player",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                if body["videoId"] != "dQw4w9WgXcQ" {
                    return (StatusCode::BAD_REQUEST, Json(json!({})));
                }
                let client_id = headers
                    .get("X-YouTube-Client-Name")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default();
                match client_id {
                    "3" => (StatusCode::SERVICE_UNAVAILABLE, Json(json!({}))),
                    "5" => (StatusCode::OK, Json(player_body())),
                    _ => (
                        StatusCode::OK,
                        Json(json!({
                            "playabilityStatus": {
                                "status": "LOGIN_REQUIRED",
                                "reason": "Sign in to confirm your age"
                            }
                        })),
                    ),
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", address)
    }

    #[tokio::test]
    async fn test_get_info_falls_back_to_next_client() {
        use crate::extractor::clients::{ANDROID, IOS};

        let base = spawn_fake_innertube().await;
        let extractor =
            InnertubeExtractor::new(reqwest::Client::new(), vec![ANDROID, IOS]).with_api_base(base);

        let info = extractor
            .get_info("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .await
            .expect("IOS client should succeed");
        assert_eq!(info.details.title, "Never Gonna Give You Up");
        assert_eq!(info.formats.len(), 3);
    }

    #[tokio::test]
    async fn test_get_info_reports_last_client_error() {
        use crate::extractor::clients::{ANDROID, ANDROID_VR};

        let base = spawn_fake_innertube().await;
        let extractor = InnertubeExtractor::new(reqwest::Client::new(), vec![ANDROID, ANDROID_VR])
            .with_api_base(base);

        let err = extractor
            .get_info("https://youtu.be/dQw4w9WgXcQ")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Sign in to confirm your age");

        let extractor =
            InnertubeExtractor::new(reqwest::Client::new(), vec![ANDROID]).with_api_base(
                spawn_fake_innertube().await,
            );
        let err = extractor
            .get_info("https://youtu.be/dQw4w9WgXcQ")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "ANDROID player request returned HTTP 503");
    }

    #[tokio::test]
    async fn test_get_info_rejects_url_without_video_id() {
        let extractor = InnertubeExtractor::new(reqwest::Client::new(), vec![]);
        let err = extractor
            .get_info("https://www.youtube.com/feed/trending")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "No video id found: https://www.youtube.com/feed/trending"
        );
    }

    #[tokio::test]
    async fn test_get_info_without_clients() {
        let extractor = InnertubeExtractor::new(reqwest::Client::new(), vec![]);
        let err = extractor
            .get_info("https://youtu.be/dQw4w9WgXcQ")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractorError::NoClients));
    }
}
