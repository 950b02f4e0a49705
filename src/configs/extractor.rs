use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Upper bound for a whole extraction, across every client attempt.
    pub timeout_secs: u64,
    /// Timeout applied to each individual InnerTube request.
    pub request_timeout_secs: u64,
    /// Client profiles tried in order.
    pub clients: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            request_timeout_secs: 8,
            clients: vec![
                "ANDROID".to_string(),
                "IOS".to_string(),
                "ANDROID_VR".to_string(),
            ],
        }
    }
}

impl ExtractorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
