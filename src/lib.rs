pub mod api;
pub mod cache;
pub mod common;
pub mod configs;
pub mod extractor;
pub mod server;
pub mod transport;
