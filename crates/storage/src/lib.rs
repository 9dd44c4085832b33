//! Object storage for uploaded media.
//!
//! [`StorageProvider`] abstracts over the backing store so handlers and
//! tests never talk to a concrete client directly. Production uses
//! [`S3Provider`]; tests use [`MemoryProvider`], which can also inject
//! per-path failures to exercise partial-failure paths.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

/// Bucket for uploaded source videos.
pub const VIDEOS_BUCKET: &str = "videos";
/// Bucket for persona training photos.
pub const PERSONA_PHOTOS_BUCKET: &str = "persona-photos";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Upload to {bucket}/{path} failed: {message}")]
    Upload {
        bucket: String,
        path: String,
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

/// A stored object and where to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bucket: String,
    pub path: String,
    pub public_url: String,
}

/// Backend-agnostic object store.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Store an object, overwriting any existing one at the same path.
    async fn put(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, StorageError>;

    /// The public URL for an object path. Purely computed; does not check
    /// existence.
    fn public_url(&self, bucket: &str, path: &str) -> String;
}

// ---------------------------------------------------------------------------
// S3
// ---------------------------------------------------------------------------

/// S3-backed provider. Buckets are S3 buckets; public URLs are served
/// from a configured CDN/base URL.
pub struct S3Provider {
    client: aws_sdk_s3::Client,
    public_base_url: String,
}

impl S3Provider {
    /// Build from the ambient AWS environment (credentials, region) and a
    /// public base URL under which objects are exposed.
    pub async fn from_env(public_base_url: impl Into<String>) -> Self {
        let config = aws_config::load_from_env().await;
        Self {
            client: aws_sdk_s3::Client::new(&config),
            public_base_url: public_base_url.into(),
        }
    }

    pub fn new(client: aws_sdk_s3::Client, public_base_url: impl Into<String>) -> Self {
        Self {
            client,
            public_base_url: public_base_url.into(),
        }
    }
}

#[async_trait]
impl StorageProvider for S3Provider {
    async fn put(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        let size = bytes.len();
        self.client
            .put_object()
            .bucket(bucket)
            .key(path)
            .body(aws_sdk_s3::primitives::ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::Upload {
                bucket: bucket.to_string(),
                path: path.to_string(),
                message: e.to_string(),
            })?;

        tracing::info!(bucket, path, size, "Object stored");

        Ok(StoredObject {
            bucket: bucket.to_string(),
            path: path.to_string(),
            public_url: self.public_url(bucket, path),
        })
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/{bucket}/{path}", self.public_base_url)
    }
}

// ---------------------------------------------------------------------------
// In-memory (tests)
// ---------------------------------------------------------------------------

/// In-memory provider for tests.
///
/// `fail_path` marks object paths whose uploads should fail, so callers
/// can exercise partial-failure handling deterministically.
#[derive(Default)]
pub struct MemoryProvider {
    objects: Mutex<HashMap<(String, String), (Vec<u8>, String)>>,
    failing: Mutex<Vec<String>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every future `put` whose path ends with `suffix` fail.
    ///
    /// Suffix matching lets callers target paths that embed timestamps.
    pub fn fail_path(&self, suffix: &str) {
        self.failing.lock().unwrap().push(suffix.to_string());
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch stored bytes and content type, if present.
    pub fn get(&self, bucket: &str, path: &str) -> Option<(Vec<u8>, String)> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), path.to_string()))
            .cloned()
    }
}

#[async_trait]
impl StorageProvider for MemoryProvider {
    async fn put(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        if self.failing.lock().unwrap().iter().any(|s| path.ends_with(s.as_str())) {
            return Err(StorageError::Upload {
                bucket: bucket.to_string(),
                path: path.to_string(),
                message: "injected failure".to_string(),
            });
        }
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), path.to_string()),
            (bytes, content_type.to_string()),
        );
        Ok(StoredObject {
            bucket: bucket.to_string(),
            path: path.to_string(),
            public_url: self.public_url(bucket, path),
        })
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("memory://{bucket}/{path}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_put_and_get_round_trip() {
        let store = MemoryProvider::new();
        let object = store
            .put(VIDEOS_BUCKET, "1-video.mp4", b"bytes".to_vec(), "video/mp4")
            .await
            .unwrap();

        assert_eq!(object.public_url, "memory://videos/1-video.mp4");
        let (bytes, content_type) = store.get(VIDEOS_BUCKET, "1-video.mp4").unwrap();
        assert_eq!(bytes, b"bytes");
        assert_eq!(content_type, "video/mp4");
    }

    #[tokio::test]
    async fn memory_put_overwrites() {
        let store = MemoryProvider::new();
        store
            .put(VIDEOS_BUCKET, "a", b"one".to_vec(), "video/mp4")
            .await
            .unwrap();
        store
            .put(VIDEOS_BUCKET, "a", b"two".to_vec(), "video/mp4")
            .await
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(VIDEOS_BUCKET, "a").unwrap().0, b"two");
    }

    #[tokio::test]
    async fn injected_failure_surfaces_as_upload_error() {
        let store = MemoryProvider::new();
        store.fail_path("doomed.jpg");

        let result = store
            .put(PERSONA_PHOTOS_BUCKET, "doomed.jpg", vec![1, 2], "image/jpeg")
            .await;
        assert!(result.is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn buckets_are_distinct_namespaces() {
        let store = MemoryProvider::new();
        assert_ne!(
            store.public_url(VIDEOS_BUCKET, "x"),
            store.public_url(PERSONA_PHOTOS_BUCKET, "x")
        );
    }
}
