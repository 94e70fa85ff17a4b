//! This module contains the traits for the external collaborators of the gesture detector.

use crate::Gesture;
use image::RgbImage;
use std::time::Duration;
use thiserror::Error;

/// An error from a frame source or a classifier.
#[derive(Debug, Error)]
#[allow(missing_docs, reason = "the #[error] attributes document the variants")]
pub enum GestureError {
    #[error("No camera could be opened: {0}")]
    CameraUnavailable(String),

    #[error("The classifier failed: {0}")]
    Classifier(String),
}

/// Something that produces camera frames.
pub trait FrameSource {
    /// Get the latest frame, or `None` if no new frame is ready yet.
    fn next_frame(&mut self) -> Option<RgbImage>;
}

/// Something that recognises hand gestures in camera frames.
pub trait GestureClassifier {
    /// Classify a single frame. `timestamp` is the time since the detector started, and should
    /// increase with every call.
    ///
    /// The gestures should be ordered from most to least likely.
    fn classify(
        &mut self,
        frame: &RgbImage,
        timestamp: Duration,
    ) -> Result<Vec<Gesture>, GestureError>;
}
