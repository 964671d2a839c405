// src/platform.rs
use async_trait::async_trait;
use bytes::Bytes;

use crate::models::PermissionState;

/// What the hosting runtime can do, resolved once at startup and passed
/// explicitly to the services that care. Replaces scattered per-call
/// platform checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformCapabilities {
    /// The runtime can prompt for and operate a live camera.
    pub has_camera: bool,
    /// Uploads must carry materialized bytes (browser-hosted runtimes)
    /// rather than a file reference.
    pub uses_blob_upload: bool,
}

impl PlatformCapabilities {
    pub fn native() -> Self {
        Self {
            has_camera: true,
            uses_blob_upload: false,
        }
    }

    pub fn web() -> Self {
        Self {
            has_camera: false,
            uses_blob_upload: true,
        }
    }
}

/// Platform camera-permission query and prompt. Errors are raw platform
/// diagnostics; the permission gate converts them.
#[async_trait]
pub trait PermissionBackend: Send + Sync {
    /// Current authorization without prompting.
    async fn probe(&self) -> PermissionState;

    /// Prompt the user and report the outcome.
    async fn request(&self) -> Result<PermissionState, String>;
}

/// Live camera shutter. `quality` is a 0-100 JPEG quality knob applied at
/// capture time.
#[async_trait]
pub trait CameraShutter: Send + Sync {
    async fn take_picture(&self, quality: u8) -> Result<String, String>;
}

/// Device image library. `Ok(None)` means the user dismissed the picker.
#[async_trait]
pub trait GalleryPicker: Send + Sync {
    async fn pick_image(&self, quality: u8) -> Result<Option<String>, String>;
}

/// Materializes an image reference into bytes. Only consulted on runtimes
/// where uploads carry blob content.
#[async_trait]
pub trait BlobLoader: Send + Sync {
    async fn load(&self, uri: &str) -> Result<Bytes, String>;
}
