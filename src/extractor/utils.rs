/// Pulls the 11-character video id out of the URL shapes YouTube hands out:
/// `watch?v=`, `youtu.be/`, `/shorts/`, `/live/` and `/embed/`.
pub fn extract_video_id(url: &str) -> Option<String> {
    let candidate = ["?v=", "&v=", "youtu.be/", "/shorts/", "/live/", "/embed/"]
        .iter()
        .find_map(|marker| url.split_once(marker).map(|(_, rest)| rest))?;

    let id: String = candidate
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();

    is_valid_video_id(&id).then_some(id)
}

pub fn is_valid_video_id(id: &str) -> bool {
    id.len() == 11
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
