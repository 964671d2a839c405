// src/errors.rs
use thiserror::Error;

/// Every failure the session can surface to the user. Gallery-pick
/// cancellation is deliberately absent: it is modelled as `Ok(None)`,
/// not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FacelensError {
    #[error("Camera permission denied: {0}")]
    PermissionDenied(String),

    #[error("Camera not supported: {0}")]
    PermissionUnsupported(String),

    #[error("Capture error: {0}")]
    Capture(String),

    #[error("Gallery error: {0}")]
    Pick(String),

    #[error("Upload encoding error: {0}")]
    Encode(String),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Analysis service error: {0}")]
    Remote(String),

    #[error("Malformed analysis response: {0}")]
    MalformedResponse(String),

    #[error("An analysis is already in flight")]
    Busy,
}
