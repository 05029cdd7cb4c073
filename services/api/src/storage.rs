//! Photo object storage backed by S3
//!
//! Uploaded bytes go to the configured bucket; the public URL persisted on
//! the photo row is `<public base>/<object key>`.

use anyhow::Result;
use aws_config::BehaviorVersion;
use aws_sdk_s3::{Client, primitives::ByteStream};
use tracing::{error, info};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// File extensions accepted for photo uploads
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Maximum accepted upload size in bytes
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// S3-backed photo storage
#[derive(Clone)]
pub struct PhotoStorage {
    client: Client,
    bucket: String,
    public_base: String,
}

impl PhotoStorage {
    /// Initialize the storage client from the environment
    ///
    /// # Environment Variables
    /// - `PHOTO_BUCKET_NAME`: Target bucket (required; startup fails without it)
    /// - `PHOTO_PUBLIC_URL_BASE`: Base of the public URLs (default: the
    ///   bucket's virtual-hosted S3 URL)
    ///
    /// AWS credentials and region come from the standard SDK environment chain.
    pub async fn from_env() -> Result<Self> {
        let bucket = std::env::var("PHOTO_BUCKET_NAME")
            .map_err(|_| anyhow::anyhow!("PHOTO_BUCKET_NAME environment variable not set"))?;

        let public_base = std::env::var("PHOTO_PUBLIC_URL_BASE")
            .unwrap_or_else(|_| format!("https://{}.s3.amazonaws.com", bucket));

        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let client = Client::new(&config);

        info!("Photo storage initialized for bucket {}", bucket);
        Ok(Self {
            client,
            bucket,
            public_base,
        })
    }

    /// Upload photo bytes and return the public URL to persist
    pub async fn upload(&self, key: &str, content_type: &str, bytes: Vec<u8>) -> ApiResult<String> {
        info!("Uploading photo to object storage: {}", key);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to upload photo {}: {}", key, e);
                ApiError::Storage(e.to_string())
            })?;

        Ok(self.public_url(key))
    }

    /// Public URL for a stored object
    pub fn public_url(&self, key: &str) -> String {
        join_url(&self.public_base, key)
    }
}

fn join_url(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key)
}

/// Lower-cased extension of `filename`, if it is on the allow-list
pub fn allowed_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    ALLOWED_EXTENSIONS
        .contains(&ext.as_str())
        .then_some(ext)
}

/// Unique storage key for a photo belonging to `trip_id`
pub fn object_key(trip_id: i32, ext: &str) -> String {
    format!("trips/{}/{}.{}", trip_id, Uuid::new_v4(), ext)
}

/// MIME type for an allow-listed extension
pub fn content_type_for(ext: &str) -> &'static str {
    match ext {
        "png" => "image/png",
        "gif" => "image/gif",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extension_accepts_images() {
        assert_eq!(allowed_extension("beach.png").as_deref(), Some("png"));
        assert_eq!(allowed_extension("sunset.JPG").as_deref(), Some("jpg"));
        assert_eq!(allowed_extension("pano.tar.jpeg").as_deref(), Some("jpeg"));
    }

    #[test]
    fn test_allowed_extension_rejects_everything_else() {
        assert!(allowed_extension("malware.exe").is_none());
        assert!(allowed_extension("notes.txt").is_none());
        assert!(allowed_extension("no_extension").is_none());
        assert!(allowed_extension("double.png.exe").is_none());
    }

    #[test]
    fn test_object_keys_are_unique_and_keep_the_extension() {
        let first = object_key(12, "png");
        let second = object_key(12, "png");

        assert_ne!(first, second);
        assert!(first.starts_with("trips/12/"));
        assert!(first.ends_with(".png"));
    }

    #[test]
    fn test_join_url_normalizes_trailing_slash() {
        assert_eq!(
            join_url("https://cdn.example/", "trips/1/a.png"),
            "https://cdn.example/trips/1/a.png"
        );
        assert_eq!(
            join_url("https://cdn.example", "trips/1/a.png"),
            "https://cdn.example/trips/1/a.png"
        );
    }

    #[test]
    fn test_content_types() {
        assert_eq!(content_type_for("png"), "image/png");
        assert_eq!(content_type_for("gif"), "image/gif");
        assert_eq!(content_type_for("jpg"), "image/jpeg");
        assert_eq!(content_type_for("jpeg"), "image/jpeg");
    }
}
