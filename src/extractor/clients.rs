use serde_json::{Value, json};

/// InnerTube client identity sent with each player request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientProfile {
    pub name: &'static str,
    /// Numeric id for the `X-YouTube-Client-Name` header.
    pub client_id: &'static str,
    pub version: &'static str,
    pub user_agent: &'static str,
    device_make: &'static str,
    device_model: &'static str,
    os_name: &'static str,
    os_version: &'static str,
    android_sdk_version: Option<u32>,
}

pub const ANDROID: ClientProfile = ClientProfile {
    name: "ANDROID",
    client_id: "3",
    version: "20.01.35",
    user_agent: "com.google.android.youtube/20.01.35 (Linux; U; Android 14) identity",
    device_make: "Google",
    device_model: "Pixel 6",
    os_name: "Android",
    os_version: "14",
    android_sdk_version: Some(34),
};

pub const IOS: ClientProfile = ClientProfile {
    name: "IOS",
    client_id: "5",
    version: "21.02.1",
    user_agent: "com.google.ios.youtube/21.02.1 (iPhone16,2; U; CPU iOS 18_2 like Mac OS X;)",
    device_make: "Apple",
    device_model: "iPhone16,2",
    os_name: "iPhone",
    os_version: "18.2.22C152",
    android_sdk_version: None,
};

pub const ANDROID_VR: ClientProfile = ClientProfile {
    name: "ANDROID_VR",
    client_id: "28",
    version: "1.61.48",
    user_agent: "Mozilla/5.0 (Linux; Android 14; Pixel 8 Pro Build/UQ1A.240205.002; wv) \
         AppleWebKit/537.36 (KHTML, like Gecko) Version/4.0 \
         Chrome/121.0.6167.164 Mobile Safari/537.36 YouTubeVR/1.61.48 (gzip)",
    device_make: "Google",
    device_model: "Pixel 8 Pro",
    os_name: "Android",
    os_version: "14",
    android_sdk_version: Some(34),
};

impl ClientProfile {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_uppercase().as_str() {
            "ANDROID" => Some(ANDROID),
            "IOS" => Some(IOS),
            "ANDROID_VR" | "ANDROIDVR" => Some(ANDROID_VR),
            _ => None,
        }
    }

    /// Resolves configured names, skipping unknown ones. Falls back to
    /// ANDROID when nothing valid is left.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Vec<Self> {
        let mut profiles = Vec::new();
        for name in names {
            match Self::from_name(name.as_ref()) {
                Some(profile) if !profiles.contains(&profile) => profiles.push(profile),
                Some(_) => {}
                None => tracing::warn!("Unknown YouTube client: {}", name.as_ref()),
            }
        }
        if profiles.is_empty() {
            tracing::warn!("No valid YouTube clients configured! Fallback to Android.");
            profiles.push(ANDROID);
        }
        profiles
    }

    pub fn context(&self) -> Value {
        let mut client = json!({
            "clientName": self.name,
            "clientVersion": self.version,
            "userAgent": self.user_agent,
            "deviceMake": self.device_make,
            "deviceModel": self.device_model,
            "osName": self.os_name,
            "osVersion": self.os_version,
            "hl": "en",
            "gl": "US"
        });

        if let (Some(sdk), Some(obj)) = (self.android_sdk_version, client.as_object_mut()) {
            obj.insert("androidSdkVersion".to_string(), sdk.into());
        }

        json!({
            "client": client,
            "user": { "lockedSafetyMode": false },
            "request": { "useSsl": true }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(ClientProfile::from_name("android"), Some(ANDROID));
        assert_eq!(ClientProfile::from_name("Ios"), Some(IOS));
        assert_eq!(ClientProfile::from_name("androidvr"), Some(ANDROID_VR));
        assert_eq!(ClientProfile::from_name("WEB"), None);
    }

    #[test]
    fn test_from_names_skips_unknown_and_duplicates() {
        let profiles = ClientProfile::from_names(&["IOS", "TV", "ios", "ANDROID"]);
        assert_eq!(profiles, vec![IOS, ANDROID]);
    }

    #[test]
    fn test_from_names_falls_back_to_android() {
        let empty: [&str; 0] = [];
        assert_eq!(ClientProfile::from_names(&empty), vec![ANDROID]);
        assert_eq!(ClientProfile::from_names(&["WEB_REMIX"]), vec![ANDROID]);
    }

    #[test]
    fn test_context_only_android_has_sdk_version() {
        let android = ANDROID.context();
        assert_eq!(android["client"]["clientName"], "ANDROID");
        assert_eq!(android["client"]["androidSdkVersion"], 34);

        let ios = IOS.context();
        assert_eq!(ios["client"]["clientVersion"], "21.02.1");
        assert!(ios["client"].get("androidSdkVersion").is_none());
    }
}
