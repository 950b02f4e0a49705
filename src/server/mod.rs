pub mod app_state;
pub mod service;

pub use app_state::AppState;
pub use service::{InfoService, validate_url};
