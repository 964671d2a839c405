// src/models.rs
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::FacelensError;

/// Camera authorization as last reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionState {
    Unknown,
    Granted,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    Camera,
    Gallery,
}

/// A single acquired image. Immutable once created; a new capture
/// replaces, never mutates, the old one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapturedImage {
    pub id: Uuid,
    /// Opaque platform resource handle (file path, content:// URI, blob URL).
    pub uri: String,
    pub source: SourceKind,
    pub captured_at: DateTime<Utc>,
}

impl CapturedImage {
    pub fn new(uri: impl Into<String>, source: SourceKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            uri: uri.into(),
            source,
            captured_at: Utc::now(),
        }
    }
}

/// Multipart body material for one upload attempt. Transient: built for a
/// single submission and dropped afterwards.
#[derive(Debug, Clone)]
pub enum UploadPayload {
    /// Browser-hosted runtimes materialize the image reference into bytes
    /// before attaching it.
    Blob {
        filename: String,
        mime: String,
        data: Bytes,
    },
    /// Native runtimes attach by `file://` reference; the bytes are read
    /// at submission time.
    FileRef {
        uri: String,
        filename: String,
        mime: String,
    },
}

impl UploadPayload {
    pub fn filename(&self) -> &str {
        match self {
            UploadPayload::Blob { filename, .. } => filename,
            UploadPayload::FileRef { filename, .. } => filename,
        }
    }

    pub fn mime(&self) -> &str {
        match self {
            UploadPayload::Blob { mime, .. } => mime,
            UploadPayload::FileRef { mime, .. } => mime,
        }
    }
}

/// The single UI-facing aggregate. Mutated only by the session controller;
/// presentation reads immutable snapshots of it.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub permission: PermissionState,
    pub camera_active: bool,
    pub image: Option<CapturedImage>,
    pub loading: bool,
    /// Normalized analysis payload of the last successful attempt.
    pub result: Option<Value>,
    pub error: Option<FacelensError>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            permission: PermissionState::Unknown,
            camera_active: false,
            image: None,
            loading: false,
            result: None,
            error: None,
        }
    }
}
