// src/services/image_acquirer.rs
use std::io::Cursor;
use std::sync::Arc;

use image::codecs::jpeg::JpegEncoder;
use log::info;

use crate::errors::FacelensError;
use crate::models::{CapturedImage, SourceKind};
use crate::platform::{CameraShutter, GalleryPicker};

/// Fixed JPEG quality applied to every capture and pick to bound upload
/// size. Not user-tunable.
pub const CAPTURE_QUALITY: u8 = 70;

/// Obtains a single image from the live camera or the device gallery.
pub struct ImageAcquirer {
    camera: Arc<dyn CameraShutter>,
    gallery: Arc<dyn GalleryPicker>,
}

impl ImageAcquirer {
    pub fn new(camera: Arc<dyn CameraShutter>, gallery: Arc<dyn GalleryPicker>) -> Self {
        Self { camera, gallery }
    }

    /// Fires the camera shutter. The caller is responsible for having
    /// verified permission and an active camera view first.
    pub async fn capture_from_camera(&self) -> Result<CapturedImage, FacelensError> {
        let uri = self
            .camera
            .take_picture(CAPTURE_QUALITY)
            .await
            .map_err(FacelensError::Capture)?;

        info!("captured photo at {}", uri);
        Ok(CapturedImage::new(uri, SourceKind::Camera))
    }

    /// Opens the platform image library. `Ok(None)` is a user
    /// cancellation, not a failure.
    pub async fn pick_from_gallery(&self) -> Result<Option<CapturedImage>, FacelensError> {
        let picked = self
            .gallery
            .pick_image(CAPTURE_QUALITY)
            .await
            .map_err(FacelensError::Pick)?;

        Ok(picked.map(|uri| {
            info!("picked gallery image {}", uri);
            CapturedImage::new(uri, SourceKind::Gallery)
        }))
    }
}

/// Re-encodes arbitrary image bytes as JPEG at the given quality. Used by
/// platform backends that have no native quality knob on capture or pick.
pub fn recompress_jpeg(data: &[u8], quality: u8) -> Result<Vec<u8>, FacelensError> {
    let img = image::load_from_memory(data)
        .map_err(|e| FacelensError::Capture(format!("invalid image data: {}", e)))?;

    let mut output = Vec::new();
    let mut cursor = Cursor::new(&mut output);
    let encoder = JpegEncoder::new_with_quality(&mut cursor, quality);
    img.write_with_encoder(encoder)
        .map_err(|e| FacelensError::Capture(format!("failed to re-encode image: {}", e)))?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    fn sample_png() -> Vec<u8> {
        let img = RgbImage::from_fn(64, 64, |x, y| image::Rgb([x as u8, y as u8, 128]));
        let mut out = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn recompress_yields_decodable_jpeg() {
        let jpeg = recompress_jpeg(&sample_png(), CAPTURE_QUALITY).unwrap();
        let reloaded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!(reloaded.width(), 64);
        assert_eq!(reloaded.height(), 64);
    }

    #[test]
    fn recompress_rejects_garbage() {
        let err = recompress_jpeg(b"not an image", CAPTURE_QUALITY).unwrap_err();
        assert!(matches!(err, FacelensError::Capture(_)));
    }
}
