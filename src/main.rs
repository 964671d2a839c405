// src/main.rs
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use log::info;

use facelens::platform::{
    BlobLoader, CameraShutter, GalleryPicker, PermissionBackend, PlatformCapabilities,
};
use facelens::services::{CAPTURE_QUALITY, recompress_jpeg};
use facelens::{
    AnalysisClient, ImageAcquirer, PermissionGate, PermissionState, SessionController,
    UploadEncoder, default_endpoint,
};

/// Headless runtime: no camera, no prompt to show.
struct HeadlessPermissions;

#[async_trait]
impl PermissionBackend for HeadlessPermissions {
    async fn probe(&self) -> PermissionState {
        PermissionState::Denied
    }

    async fn request(&self) -> Result<PermissionState, String> {
        Err("no camera permission surface on this runtime".to_string())
    }
}

struct NoCamera;

#[async_trait]
impl CameraShutter for NoCamera {
    async fn take_picture(&self, _quality: u8) -> Result<String, String> {
        Err("no camera device".to_string())
    }
}

/// "Gallery" that hands back the path given on the command line.
struct ArgGallery {
    path: String,
}

#[async_trait]
impl GalleryPicker for ArgGallery {
    async fn pick_image(&self, _quality: u8) -> Result<Option<String>, String> {
        Ok(Some(self.path.clone()))
    }
}

/// Blob loader for the emulated browser path: reads the file and
/// re-encodes it at the fixed capture quality.
struct FsBlobs;

#[async_trait]
impl BlobLoader for FsBlobs {
    async fn load(&self, uri: &str) -> Result<Bytes, String> {
        let path = uri.strip_prefix("file://").unwrap_or(uri);
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| format!("cannot read {}: {}", path, e))?;
        let jpeg = recompress_jpeg(&data, CAPTURE_QUALITY).map_err(|e| e.to_string())?;
        Ok(Bytes::from(jpeg))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let path = std::env::args()
        .nth(1)
        .context("usage: facelens <image-path>")?;
    anyhow::ensure!(Path::new(&path).is_file(), "no such file: {}", path);

    // FACELENS_BLOB=1 emulates the browser upload path (materialized
    // bytes); the default exercises the native file-reference path.
    let caps = if std::env::var("FACELENS_BLOB").is_ok() {
        PlatformCapabilities {
            has_camera: false,
            uses_blob_upload: true,
        }
    } else {
        PlatformCapabilities {
            has_camera: false,
            uses_blob_upload: false,
        }
    };

    let endpoint = std::env::var("FACELENS_ENDPOINT")
        .unwrap_or_else(|_| default_endpoint(&caps).to_string());
    info!("analysis endpoint: {}", endpoint);

    let gate = PermissionGate::new(caps, Arc::new(HeadlessPermissions));
    let acquirer = ImageAcquirer::new(Arc::new(NoCamera), Arc::new(ArgGallery { path }));
    let encoder = UploadEncoder::new(caps, Arc::new(FsBlobs));
    let api = Arc::new(AnalysisClient::new(endpoint));

    let mut session = SessionController::new(caps, gate, acquirer, encoder, api);
    session.probe_permission().await;

    session.pick_image().await?;
    session.analyze().await?;

    let state = session.snapshot();
    if let Some(error) = state.error {
        anyhow::bail!("analysis failed: {}", error);
    }

    let result = state
        .result
        .context("analysis produced neither result nor error")?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
