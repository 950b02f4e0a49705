use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{common::ApiError, server::AppState};

/// Value of the first `url` pair; later duplicates are ignored.
fn first_url(params: Vec<(String, String)>) -> Option<String> {
    params
        .into_iter()
        .find_map(|(key, value)| (key == "url").then_some(value))
}

/// GET /api/youtube?url=<encoded YouTube URL>
pub async fn get_video_info(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let url = match query {
        Ok(Query(params)) => first_url(params),
        Err(e) => {
            tracing::warn!("GET /api/youtube: unreadable query string: {}", e);
            return ApiError::InvalidUrl.into_response();
        }
    };

    tracing::info!("GET /api/youtube url={:?}", url);

    match state.service.lookup(url.as_deref()).await {
        Ok(info) => (StatusCode::OK, Json(&*info)).into_response(),
        Err(e) => {
            match &e {
                ApiError::MissingParameter | ApiError::InvalidUrl => {
                    tracing::warn!("GET /api/youtube: {}", e)
                }
                _ => tracing::error!("[YouTube API Error] {:?}: {}", url, e),
            }
            e.into_response()
        }
    }
}

/// OPTIONS /api/youtube
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
