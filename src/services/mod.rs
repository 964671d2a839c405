// src/services/mod.rs
pub mod analysis_client;
pub mod image_acquirer;
pub mod normalizer;
pub mod permission_gate;
pub mod upload_encoder;

pub use analysis_client::{AnalysisApi, AnalysisClient, default_endpoint};
pub use image_acquirer::{CAPTURE_QUALITY, ImageAcquirer, recompress_jpeg};
pub use normalizer::normalize;
pub use permission_gate::PermissionGate;
pub use upload_encoder::UploadEncoder;
