// src/lib.rs
//! Client-side face analysis workflow: acquire a photo (camera or
//! gallery), upload it as multipart form data to a remote analysis
//! service, and normalize the returned distribution into a dominant
//! gender/emotion view.
//!
//! Platform specifics (permission prompts, shutter, picker, blob
//! loading) sit behind the traits in [`platform`]; the
//! [`session::SessionController`] sequences the whole cycle and owns the
//! single state aggregate presentation reads from.

pub mod errors;
pub mod models;
pub mod platform;
pub mod services;
pub mod session;

pub use errors::FacelensError;
pub use models::{CapturedImage, PermissionState, SessionState, SourceKind, UploadPayload};
pub use platform::{
    BlobLoader, CameraShutter, GalleryPicker, PermissionBackend, PlatformCapabilities,
};
pub use services::{
    AnalysisApi, AnalysisClient, ImageAcquirer, PermissionGate, UploadEncoder, default_endpoint,
};
pub use session::SessionController;
