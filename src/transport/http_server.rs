use std::sync::Arc;

use axum::{Router, middleware, routing::get};
use tower_http::trace::TraceLayer;

use crate::{
    server::AppState,
    transport::{
        middleware::add_cors_headers,
        routes::{health, youtube},
    },
};

pub const YOUTUBE_INFO_PATH: &str = "/api/youtube";

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            YOUTUBE_INFO_PATH,
            get(youtube::get_video_info)
                .head(youtube::method_not_allowed)
                .options(youtube::preflight)
                .fallback(youtube::method_not_allowed),
        )
        .route("/health", get(health))
        .layer(middleware::from_fn(add_cors_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
