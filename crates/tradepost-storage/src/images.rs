//! Listing image bucket.
//!
//! Photos are stored at `{bucket}/{user_id}/{listing_id}/{unix_millis}-{index}.{ext}`
//! and served publicly at `{public_base_url}/{bucket}/{path}`.

use std::io::Cursor;
use std::sync::Arc;

use bytes::Bytes;
use image::{ImageFormat, ImageReader};
use tracing::{debug, info, warn};
use uuid::Uuid;

use tradepost_core::error::AppError;
use tradepost_core::result::AppResult;
use tradepost_core::traits::storage::{ByteStream, StorageProvider};

/// An uploaded photo after it has been written to the bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Object path inside the bucket.
    pub path: String,
    /// Public URL stored on the listing.
    pub url: String,
    /// MIME type detected from the file content.
    pub content_type: &'static str,
    pub width: u32,
    pub height: u32,
}

/// Stores and serves listing photos in a single bucket.
#[derive(Debug, Clone)]
pub struct ImageStore {
    provider: Arc<dyn StorageProvider>,
    bucket: String,
    public_base_url: String,
}

impl ImageStore {
    /// Create a store for `bucket` on top of `provider`.
    pub fn new(
        provider: Arc<dyn StorageProvider>,
        bucket: impl Into<String>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            bucket: bucket.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Name of the image bucket.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Whether the underlying provider is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        self.provider.health_check().await
    }

    /// Validate and write the photos of one listing.
    ///
    /// Every file must be a PNG, JPEG, GIF or WebP image; the first file that
    /// is not aborts the upload before anything is written. If a write fails,
    /// photos already written for this call are removed again.
    pub async fn store_listing_images(
        &self,
        user_id: Uuid,
        listing_id: Uuid,
        files: &[Bytes],
    ) -> AppResult<Vec<StoredImage>> {
        let inspected = inspect_all(files)?;

        let millis = chrono::Utc::now().timestamp_millis();
        let mut stored = Vec::with_capacity(files.len());

        for (index, (data, meta)) in files.iter().zip(inspected).enumerate() {
            let path = object_path(user_id, listing_id, millis, index, meta.extension);
            if let Err(e) = self
                .provider
                .write(&self.bucket_path(&path), data.clone())
                .await
            {
                self.discard(&stored).await;
                return Err(e);
            }
            debug!(%listing_id, %path, bytes = data.len(), "Stored listing photo");

            stored.push(StoredImage {
                url: self.public_url(&path),
                path,
                content_type: meta.content_type,
                width: meta.width,
                height: meta.height,
            });
        }

        info!(%listing_id, count = stored.len(), "Uploaded listing photos");
        Ok(stored)
    }

    /// Check that every file is a supported image without writing anything.
    pub fn validate(&self, files: &[Bytes]) -> AppResult<()> {
        inspect_all(files).map(|_| ())
    }

    /// Delete photos previously returned by [`Self::store_listing_images`].
    ///
    /// URLs that do not point into this bucket are skipped.
    pub async fn delete_by_urls(&self, urls: &[String]) -> AppResult<()> {
        for url in urls {
            if let Some(path) = self.path_from_url(url) {
                self.provider.delete(&self.bucket_path(path)).await?;
            }
        }
        Ok(())
    }

    /// Open a stored object for serving.
    ///
    /// Returns the stream and a content type guessed from the extension.
    pub async fn open(&self, bucket: &str, path: &str) -> AppResult<(ByteStream, &'static str)> {
        if bucket != self.bucket {
            return Err(AppError::not_found(format!("Bucket not found: {bucket}")));
        }
        let stream = self.provider.read(&self.bucket_path(path)).await?;
        Ok((stream, content_type_for_path(path)))
    }

    /// Public URL for an object path inside the bucket.
    pub fn public_url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.public_base_url, self.bucket, path)
    }

    fn path_from_url<'a>(&self, url: &'a str) -> Option<&'a str> {
        url.strip_prefix(&self.public_base_url)?
            .strip_prefix('/')?
            .strip_prefix(self.bucket.as_str())?
            .strip_prefix('/')
    }

    async fn discard(&self, stored: &[StoredImage]) {
        for image in stored {
            if let Err(e) = self.provider.delete(&self.bucket_path(&image.path)).await {
                warn!(path = %image.path, error = %e, "Failed to remove partially uploaded photo");
            }
        }
    }

    fn bucket_path(&self, path: &str) -> String {
        format!("{}/{}", self.bucket, path.trim_start_matches('/'))
    }
}

/// `{user_id}/{listing_id}/{unix_millis}-{index}.{ext}`
pub fn object_path(
    user_id: Uuid,
    listing_id: Uuid,
    unix_millis: i64,
    index: usize,
    extension: &str,
) -> String {
    format!("{user_id}/{listing_id}/{unix_millis}-{index}.{extension}")
}

#[derive(Debug)]
struct ImageMeta {
    extension: &'static str,
    content_type: &'static str,
    width: u32,
    height: u32,
}

fn inspect_all(files: &[Bytes]) -> AppResult<Vec<ImageMeta>> {
    files
        .iter()
        .enumerate()
        .map(|(index, data)| {
            inspect(data).map_err(|e| {
                AppError::validation(format!(
                    "Photo {} is not a valid image: {}",
                    index + 1,
                    e.message
                ))
            })
        })
        .collect()
}

/// Detect the format from magic bytes and read the dimensions from the header.
fn inspect(data: &[u8]) -> AppResult<ImageMeta> {
    let format = image::guess_format(data)
        .map_err(|_| AppError::validation("unrecognised file format"))?;

    let (extension, content_type) = match format {
        ImageFormat::Png => ("png", "image/png"),
        ImageFormat::Jpeg => ("jpg", "image/jpeg"),
        ImageFormat::Gif => ("gif", "image/gif"),
        ImageFormat::WebP => ("webp", "image/webp"),
        other => {
            return Err(AppError::validation(format!(
                "unsupported format {other:?}"
            )));
        }
    };

    let (width, height) = ImageReader::with_format(Cursor::new(data), format)
        .into_dimensions()
        .map_err(|e| AppError::validation(format!("unreadable image header: {e}")))?;

    Ok(ImageMeta {
        extension,
        content_type,
        width,
        height,
    })
}

/// Guess a MIME type from an object path extension.
pub fn content_type_for_path(path: &str) -> &'static str {
    let ext = path.rsplit('.').next().unwrap_or_default().to_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LocalStorageProvider;

    /// Smallest valid GIF: 1x1 pixel.
    const TINY_GIF: &[u8] = &[
        0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0xff, 0xff,
        0xff, 0x00, 0x00, 0x00, 0x21, 0xf9, 0x04, 0x01, 0x00, 0x00, 0x00, 0x00, 0x2c, 0x00, 0x00,
        0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x02, 0x02, 0x44, 0x01, 0x00, 0x3b,
    ];

    async fn store(dir: &tempfile::TempDir) -> ImageStore {
        let provider = LocalStorageProvider::new(dir.path()).await.unwrap();
        ImageStore::new(Arc::new(provider), "listing-images", "http://localhost:8080/media/")
    }

    #[test]
    fn test_object_path_layout() {
        let user = Uuid::nil();
        let listing = Uuid::from_u128(1);
        assert_eq!(
            object_path(user, listing, 1700000000000, 2, "png"),
            format!("{user}/{listing}/1700000000000-2.png")
        );
    }

    #[tokio::test]
    async fn test_store_and_open_gif() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        let user = Uuid::new_v4();
        let listing = Uuid::new_v4();

        let stored = store
            .store_listing_images(user, listing, &[Bytes::from_static(TINY_GIF)])
            .await
            .unwrap();

        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].content_type, "image/gif");
        assert_eq!((stored[0].width, stored[0].height), (1, 1));
        assert!(stored[0].path.ends_with("-0.gif"));
        assert!(
            stored[0]
                .url
                .starts_with("http://localhost:8080/media/listing-images/")
        );

        let (_, content_type) = store.open("listing-images", &stored[0].path).await.unwrap();
        assert_eq!(content_type, "image/gif");
    }

    #[tokio::test]
    async fn test_non_image_rejected_before_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        let err = store
            .store_listing_images(
                Uuid::new_v4(),
                Uuid::new_v4(),
                &[Bytes::from_static(TINY_GIF), Bytes::from_static(b"%PDF-1.7")],
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind, tradepost_core::error::ErrorKind::Validation);
        assert!(err.message.starts_with("Photo 2"));
        assert!(!dir.path().join("listing-images").exists());
    }

    /// Local storage that refuses the write with index `fail_at`.
    #[derive(Debug)]
    struct FailingWrites {
        inner: LocalStorageProvider,
        fail_at: usize,
        writes: std::sync::atomic::AtomicUsize,
    }

    #[async_trait::async_trait]
    impl StorageProvider for FailingWrites {
        async fn health_check(&self) -> AppResult<bool> {
            self.inner.health_check().await
        }

        async fn read(&self, path: &str) -> AppResult<ByteStream> {
            self.inner.read(path).await
        }

        async fn write(&self, path: &str, data: Bytes) -> AppResult<()> {
            let n = self
                .writes
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            if n == self.fail_at {
                return Err(AppError::storage("disk full"));
            }
            self.inner.write(path, data).await
        }

        async fn delete(&self, path: &str) -> AppResult<()> {
            self.inner.delete(path).await
        }
    }

    #[tokio::test]
    async fn test_failed_write_removes_earlier_photos() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FailingWrites {
            inner: LocalStorageProvider::new(dir.path()).await.unwrap(),
            fail_at: 1,
            writes: Default::default(),
        };
        let store = ImageStore::new(Arc::new(provider), "listing-images", "http://localhost/media");
        let user = Uuid::new_v4();
        let listing = Uuid::new_v4();
        let gif = Bytes::from_static(TINY_GIF);

        let err = store
            .store_listing_images(user, listing, &[gif.clone(), gif.clone(), gif])
            .await
            .unwrap_err();
        assert_eq!(err.kind, tradepost_core::error::ErrorKind::Storage);

        let listing_dir = dir
            .path()
            .join("listing-images")
            .join(user.to_string())
            .join(listing.to_string());
        let left = std::fs::read_dir(&listing_dir)
            .map(|entries| entries.count())
            .unwrap_or(0);
        assert_eq!(left, 0);
    }

    #[tokio::test]
    async fn test_delete_by_urls() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        let stored = store
            .store_listing_images(Uuid::new_v4(), Uuid::new_v4(), &[Bytes::from_static(TINY_GIF)])
            .await
            .unwrap();

        store
            .delete_by_urls(&[stored[0].url.clone(), "https://elsewhere/x.png".to_string()])
            .await
            .unwrap();

        let err = store.open("listing-images", &stored[0].path).await.err().expect("expected error");
        assert_eq!(err.kind, tradepost_core::error::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_unknown_bucket_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        let err = store.open("avatars", "a.png").await.err().expect("expected error");
        assert_eq!(err.kind, tradepost_core::error::ErrorKind::NotFound);
    }

    #[test]
    fn test_content_type_for_path() {
        assert_eq!(content_type_for_path("a/b/1-0.JPG"), "image/jpeg");
        assert_eq!(content_type_for_path("a/b/file"), "application/octet-stream");
    }
}
