// src/session.rs
use std::sync::Arc;

use log::{info, warn};
use serde_json::Value;

use crate::errors::FacelensError;
use crate::models::{CapturedImage, PermissionState, SessionState};
use crate::platform::PlatformCapabilities;
use crate::services::normalizer::normalize;
use crate::services::{AnalysisApi, ImageAcquirer, PermissionGate, UploadEncoder};

/// Orchestrates one capture-to-result cycle and owns the single UI-facing
/// state aggregate. All operational failures are caught here and recorded
/// on the state; the only error a trigger method returns is `Busy`, the
/// refusal to start new work while an analysis is in flight.
pub struct SessionController {
    caps: PlatformCapabilities,
    gate: PermissionGate,
    acquirer: ImageAcquirer,
    encoder: UploadEncoder,
    api: Arc<dyn AnalysisApi>,
    state: SessionState,
}

impl SessionController {
    pub fn new(
        caps: PlatformCapabilities,
        gate: PermissionGate,
        acquirer: ImageAcquirer,
        encoder: UploadEncoder,
        api: Arc<dyn AnalysisApi>,
    ) -> Self {
        Self {
            caps,
            gate,
            acquirer,
            encoder,
            api,
            state: SessionState::default(),
        }
    }

    /// Immutable copy of the current session state, for presentation.
    pub fn snapshot(&self) -> SessionState {
        self.state.clone()
    }

    /// Startup probe: records current authorization without prompting.
    pub async fn probe_permission(&mut self) -> PermissionState {
        let state = self.gate.probe().await;
        self.state.permission = state;
        state
    }

    /// Requests camera permission and activates the camera view on grant.
    /// The camera is never activated on a denied or unsupported outcome.
    pub async fn open_camera(&mut self) -> Result<(), FacelensError> {
        self.reject_if_busy()?;

        let (permission, error) = self.gate.request().await;
        self.state.permission = permission;

        match error {
            None => {
                self.state.camera_active = true;
                self.state.error = None;
                info!("camera view activated");
            }
            Some(e) => {
                self.state.camera_active = false;
                warn!("camera not opened: {}", e);
                self.state.error = Some(e);
            }
        }
        Ok(())
    }

    pub fn close_camera(&mut self) {
        self.state.camera_active = false;
    }

    /// Fires the shutter and auto-submits the capture for analysis. The
    /// camera view is deactivated whether the shutter succeeds or fails;
    /// gallery picks, by contrast, wait for an explicit `analyze` call.
    pub async fn take_picture(&mut self) -> Result<(), FacelensError> {
        self.reject_if_busy()?;

        if !self.state.camera_active {
            self.state.error = Some(FacelensError::Capture(
                "camera is not active".to_string(),
            ));
            return Ok(());
        }

        match self.acquirer.capture_from_camera().await {
            Ok(image) => {
                self.state.camera_active = false;
                self.state.image = Some(image.clone());
                self.run_analysis(image).await;
            }
            Err(e) => {
                self.state.camera_active = false;
                warn!("capture failed: {}", e);
                self.state.error = Some(e);
            }
        }
        Ok(())
    }

    /// Opens the gallery picker. Cancellation leaves the session exactly
    /// as it was; a picked image replaces the current one but is not
    /// submitted until the user asks.
    pub async fn pick_image(&mut self) -> Result<(), FacelensError> {
        self.reject_if_busy()?;

        match self.acquirer.pick_from_gallery().await {
            Ok(Some(image)) => {
                self.state.image = Some(image);
            }
            Ok(None) => {
                info!("gallery pick cancelled");
            }
            Err(e) => {
                warn!("gallery pick failed: {}", e);
                self.state.error = Some(e);
            }
        }
        Ok(())
    }

    /// Explicit analysis trigger for the currently held image.
    pub async fn analyze(&mut self) -> Result<(), FacelensError> {
        self.reject_if_busy()?;

        let Some(image) = self.state.image.clone() else {
            self.state.error = Some(FacelensError::Encode(
                "select or take a photo first".to_string(),
            ));
            return Ok(());
        };

        self.run_analysis(image).await;
        Ok(())
    }

    /// One analysis attempt. Prior result stays visible while loading;
    /// on failure it is left untouched and only the error is recorded.
    async fn run_analysis(&mut self, image: CapturedImage) {
        self.state.loading = true;
        self.state.error = None;

        match self.submit(&image).await {
            Ok(report) => {
                info!("analysis complete for {}", image.id);
                self.state.result = Some(report);
                self.state.error = None;
            }
            Err(e) => {
                warn!("analysis failed for {}: {}", image.id, e);
                self.state.error = Some(e);
            }
        }

        self.state.loading = false;
    }

    async fn submit(&self, image: &CapturedImage) -> Result<Value, FacelensError> {
        let payload = self.encoder.encode(image).await?;
        let raw = self.api.submit(payload).await?;
        Ok(normalize(raw))
    }

    fn reject_if_busy(&self) -> Result<(), FacelensError> {
        if self.state.loading {
            return Err(FacelensError::Busy);
        }
        Ok(())
    }

    pub fn capabilities(&self) -> PlatformCapabilities {
        self.caps
    }
}
