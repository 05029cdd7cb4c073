//! Photo model and related payloads

use serde::{Deserialize, Serialize};

/// Photo entity; `url` points into object storage
#[derive(Debug, Clone, Serialize)]
pub struct Photo {
    pub id: i32,
    pub trip_id: i32,
    pub url: String,
    pub caption: String,
}

/// New photo creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewPhoto {
    pub trip_id: i32,
    pub url: String,
    #[serde(default)]
    pub caption: String,
}

/// Photo update payload; only supplied fields change
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePhoto {
    pub url: Option<String>,
    pub caption: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_caption_defaults_to_empty() {
        let payload = json!({ "trip_id": 1, "url": "https://cdn.example/p.jpg" });
        let photo: NewPhoto = serde_json::from_value(payload).unwrap();
        assert_eq!(photo.caption, "");
    }
}
