//! This module provides [`WebcamSource`], a [`FrameSource`] backed by a real camera.

use crate::{FrameSource, GestureError};
use image::RgbImage;
use nokhwa::{
    pixel_format::RgbFormat,
    utils::{ApiBackend, RequestedFormat, RequestedFormatType, Resolution},
    Camera,
};
use tracing::{debug, info, instrument, trace, warn};

/// Frames from the camera with the highest resolution on this device.
pub struct WebcamSource {
    /// The camera, with its stream open.
    camera: Camera,
}

impl WebcamSource {
    /// Find the camera with the highest resolution and open its stream.
    #[instrument]
    pub fn open() -> Result<Self, GestureError> {
        nokhwa::nokhwa_initialize(|_| {});

        let cameras = nokhwa::query(ApiBackend::Auto)
            .map_err(|error| GestureError::CameraUnavailable(error.to_string()))?;

        let mut camera = cameras
            .into_iter()
            .filter_map(|camera_info| {
                Camera::new(
                    camera_info.index().clone(),
                    RequestedFormat::new::<RgbFormat>(
                        RequestedFormatType::AbsoluteHighestResolution,
                    ),
                )
                .ok()
            })
            .max_by_key(|camera| {
                let Resolution { width_x, height_y } = camera.resolution();
                width_x * height_y
            })
            .ok_or_else(|| GestureError::CameraUnavailable("no cameras found".to_string()))?;

        camera
            .open_stream()
            .map_err(|error| GestureError::CameraUnavailable(error.to_string()))?;

        info!(index = ?camera.index(), resolution = ?camera.resolution(), "Opened camera");
        Ok(Self { camera })
    }
}

impl FrameSource for WebcamSource {
    fn next_frame(&mut self) -> Option<RgbImage> {
        let buffer = match self.camera.frame() {
            Ok(buffer) => buffer,
            Err(error) => {
                trace!(%error, "No frame from camera");
                return None;
            }
        };

        buffer
            .decode_image::<RgbFormat>()
            .map_err(|error| warn!(%error, "Couldn't decode camera frame"))
            .ok()
    }
}

impl Drop for WebcamSource {
    fn drop(&mut self) {
        debug!("Releasing camera");
        if let Err(error) = self.camera.stop_stream() {
            warn!(%error, "Couldn't stop the camera stream");
        }
    }
}
