// src/services/upload_encoder.rs
use std::sync::Arc;

use crate::errors::FacelensError;
use crate::models::{CapturedImage, UploadPayload};
use crate::platform::{BlobLoader, PlatformCapabilities};

const DEFAULT_FILENAME: &str = "photo.jpg";
const DEFAULT_MIME: &str = "image/jpeg";

/// Builds the platform-correct multipart material for one image. Browser
/// runtimes need the bytes materialized up front; native runtimes attach a
/// `file://` reference. Mixing these up produces silent server-side decode
/// failures, not client errors.
pub struct UploadEncoder {
    caps: PlatformCapabilities,
    blobs: Arc<dyn BlobLoader>,
}

impl UploadEncoder {
    pub fn new(caps: PlatformCapabilities, blobs: Arc<dyn BlobLoader>) -> Self {
        Self { caps, blobs }
    }

    pub async fn encode(&self, image: &CapturedImage) -> Result<UploadPayload, FacelensError> {
        let filename =
            basename(&image.uri).unwrap_or_else(|| DEFAULT_FILENAME.to_string());
        let mime = mime_for(&filename);

        if self.caps.uses_blob_upload {
            let data = self
                .blobs
                .load(&image.uri)
                .await
                .map_err(FacelensError::Encode)?;
            Ok(UploadPayload::Blob {
                filename,
                mime,
                data,
            })
        } else {
            Ok(UploadPayload::FileRef {
                uri: ensure_file_scheme(&image.uri),
                filename,
                mime,
            })
        }
    }
}

/// Trailing path segment of a URI, or `None` when nothing extractable
/// (empty input, trailing slash).
pub fn basename(uri: &str) -> Option<String> {
    let segment = uri.rsplit('/').next().unwrap_or(uri);
    if segment.is_empty() {
        None
    } else {
        Some(segment.to_string())
    }
}

/// Extension of a filename, lowercased. `None` when there is no dot or
/// the dot leads the name (".hidden").
pub fn extension(filename: &str) -> Option<String> {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
            Some(ext.to_ascii_lowercase())
        }
        _ => None,
    }
}

/// MIME type for a filename. `jpg` normalizes to the canonical `jpeg`
/// subtype; anything else passes through as `image/<ext>`; no extension
/// defaults to `image/jpeg`.
pub fn mime_for(filename: &str) -> String {
    match extension(filename) {
        Some(ext) if ext == "jpg" => DEFAULT_MIME.to_string(),
        Some(ext) => format!("image/{}", ext),
        None => DEFAULT_MIME.to_string(),
    }
}

/// Prefixes `file://` exactly once.
pub fn ensure_file_scheme(uri: &str) -> String {
    if uri.starts_with("file://") {
        uri.to_string()
    } else {
        format!("file://{}", uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceKind;
    use async_trait::async_trait;
    use bytes::Bytes;

    #[test]
    fn basename_takes_trailing_segment() {
        assert_eq!(
            basename("/data/user/0/cache/IMG_0042.jpg").as_deref(),
            Some("IMG_0042.jpg")
        );
        assert_eq!(basename("solo.png").as_deref(), Some("solo.png"));
        assert_eq!(basename("/data/cache/"), None);
        assert_eq!(basename(""), None);
    }

    #[test]
    fn jpg_normalizes_to_jpeg() {
        assert_eq!(mime_for("photo.jpg"), "image/jpeg");
        assert_eq!(mime_for("PHOTO.JPG"), "image/jpeg");
    }

    #[test]
    fn other_extensions_pass_through() {
        assert_eq!(mime_for("shot.png"), "image/png");
        assert_eq!(mime_for("anim.webp"), "image/webp");
    }

    #[test]
    fn missing_extension_defaults_to_jpeg() {
        assert_eq!(mime_for("photo"), "image/jpeg");
        assert_eq!(extension("photo"), None);
        assert_eq!(extension(".hidden"), None);
    }

    #[test]
    fn file_scheme_prefix_is_idempotent() {
        assert_eq!(ensure_file_scheme("/tmp/a.jpg"), "file:///tmp/a.jpg");
        assert_eq!(
            ensure_file_scheme("file:///tmp/a.jpg"),
            "file:///tmp/a.jpg"
        );
    }

    struct StaticBlobs;

    #[async_trait]
    impl BlobLoader for StaticBlobs {
        async fn load(&self, _uri: &str) -> Result<Bytes, String> {
            Ok(Bytes::from_static(b"\xff\xd8\xff"))
        }
    }

    struct NoBlobs;

    #[async_trait]
    impl BlobLoader for NoBlobs {
        async fn load(&self, _uri: &str) -> Result<Bytes, String> {
            Err("blob loading unavailable".to_string())
        }
    }

    #[tokio::test]
    async fn blob_runtime_materializes_bytes() {
        let encoder = UploadEncoder::new(PlatformCapabilities::web(), Arc::new(StaticBlobs));
        let image = CapturedImage::new("blob:abc123/selfie.jpg", SourceKind::Gallery);

        match encoder.encode(&image).await.unwrap() {
            UploadPayload::Blob {
                filename,
                mime,
                data,
            } => {
                assert_eq!(filename, "selfie.jpg");
                assert_eq!(mime, "image/jpeg");
                assert_eq!(&data[..], b"\xff\xd8\xff");
            }
            other => panic!("expected blob payload, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn native_runtime_attaches_by_reference() {
        let encoder = UploadEncoder::new(PlatformCapabilities::native(), Arc::new(NoBlobs));
        let image = CapturedImage::new("/var/mobile/Media/DCIM/selfie", SourceKind::Camera);

        match encoder.encode(&image).await.unwrap() {
            UploadPayload::FileRef {
                uri,
                filename,
                mime,
            } => {
                assert_eq!(uri, "file:///var/mobile/Media/DCIM/selfie");
                assert_eq!(filename, "selfie");
                assert_eq!(mime, "image/jpeg");
            }
            other => panic!("expected file-ref payload, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unextractable_segment_defaults_filename_and_mime() {
        let encoder = UploadEncoder::new(PlatformCapabilities::native(), Arc::new(NoBlobs));
        let image = CapturedImage::new("content://media/external/", SourceKind::Gallery);

        match encoder.encode(&image).await.unwrap() {
            UploadPayload::FileRef { filename, mime, .. } => {
                assert_eq!(filename, "photo.jpg");
                assert_eq!(mime, "image/jpeg");
            }
            other => panic!("expected file-ref payload, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn blob_load_failure_is_encode_error() {
        let encoder = UploadEncoder::new(PlatformCapabilities::web(), Arc::new(NoBlobs));
        let image = CapturedImage::new("blob:abc/x.png", SourceKind::Gallery);

        let err = encoder.encode(&image).await.unwrap_err();
        assert!(matches!(err, FacelensError::Encode(_)));
    }
}
