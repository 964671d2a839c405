// src/services/permission_gate.rs
use std::sync::Arc;

use log::warn;

use crate::errors::FacelensError;
use crate::models::PermissionState;
use crate::platform::{PermissionBackend, PlatformCapabilities};

/// Requests and tracks camera authorization. All platform failures are
/// caught here and converted to a Denied outcome with a user-visible
/// message.
pub struct PermissionGate {
    caps: PlatformCapabilities,
    backend: Arc<dyn PermissionBackend>,
}

impl PermissionGate {
    pub fn new(caps: PlatformCapabilities, backend: Arc<dyn PermissionBackend>) -> Self {
        Self { caps, backend }
    }

    /// Queries current authorization without prompting. Called once at
    /// session start.
    pub async fn probe(&self) -> PermissionState {
        if !self.caps.has_camera {
            return PermissionState::Denied;
        }
        self.backend.probe().await
    }

    /// Prompts the user where the platform supports it. On a runtime with
    /// no camera capability this returns Denied immediately with a
    /// "not supported" diagnostic instead of invoking a prompt.
    pub async fn request(&self) -> (PermissionState, Option<FacelensError>) {
        if !self.caps.has_camera {
            return (
                PermissionState::Denied,
                Some(FacelensError::PermissionUnsupported(
                    "camera access is not available on this platform - use the gallery instead"
                        .to_string(),
                )),
            );
        }

        match self.backend.request().await {
            Ok(PermissionState::Granted) => (PermissionState::Granted, None),
            Ok(state) => (
                state,
                Some(FacelensError::PermissionDenied(
                    "camera permission is required to take a photo".to_string(),
                )),
            ),
            Err(e) => {
                warn!("permission prompt failed: {}", e);
                (
                    PermissionState::Denied,
                    Some(FacelensError::PermissionDenied(e)),
                )
            }
        }
    }
}
