//! This crate turns hand gestures in front of a camera into the snow signal.
//!
//! The gesture classifier itself is an external collaborator. This crate only defines what a
//! classifier has to provide ([`GestureClassifier`]), where frames come from ([`FrameSource`]),
//! and the loop that connects them to a [`SnowSwitch`](tinsel_scene::SnowSwitch) without ever
//! blocking the frame loop of the scene.

mod classifier;
mod detector;
mod gesture;
mod source;

#[cfg(feature = "webcam")]
mod webcam;

pub use self::{
    classifier::SkinToneClassifier,
    detector::{DetectorHandle, GestureDetector},
    gesture::{is_open_palm, Gesture, GestureCategory, OPEN_PALM_THRESHOLD},
    source::{FrameSource, GestureClassifier, GestureError},
};

#[cfg(feature = "webcam")]
pub use self::webcam::WebcamSource;
