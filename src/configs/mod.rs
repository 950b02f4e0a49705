pub mod base;
pub mod cache;
pub mod extractor;
pub mod logging;
pub mod server;

pub use base::*;
pub use cache::*;
pub use extractor::*;
pub use logging::*;
pub use server::*;
