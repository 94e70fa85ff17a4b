//! This module contains [`SkinToneClassifier`], a simple [`GestureClassifier`] that works without
//! a trained model.

use crate::{Gesture, GestureCategory, GestureClassifier, GestureError};
use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::trace;

/// Treats a large patch of skin close to the camera as an open palm.
///
/// An open hand held up to the camera covers far more of the frame than a fist or a face in the
/// background, so the fraction of skin-coloured pixels is a usable stand-in for a real gesture
/// recogniser. Any other [`GestureClassifier`] can be used in its place.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkinToneClassifier {
    /// The fraction of the frame that has to be skin before it's reported as an open palm at all.
    pub min_coverage: f32,

    /// The fraction of the frame that gives an open palm a score of 1.
    pub full_coverage: f32,
}

impl Default for SkinToneClassifier {
    fn default() -> Self {
        Self {
            min_coverage: 0.05,
            full_coverage: 0.3,
        }
    }
}

/// Whether a pixel looks like skin under normal lighting.
fn is_skin(&Rgb([r, g, b]): &Rgb<u8>) -> bool {
    let (r, g, b) = (r as i16, g as i16, b as i16);
    let spread = r.max(g).max(b) - r.min(g).min(b);

    r > 95 && g > 40 && b > 20 && spread > 15 && (r - g).abs() > 15 && r > g && r > b
}

impl SkinToneClassifier {
    /// The fraction of pixels in the frame that look like skin.
    pub fn coverage(frame: &RgbImage) -> f32 {
        let total = frame.width() as usize * frame.height() as usize;
        if total == 0 {
            return 0.;
        }

        let skin = frame.pixels().filter(|pixel| is_skin(pixel)).count();
        skin as f32 / total as f32
    }
}

impl GestureClassifier for SkinToneClassifier {
    fn classify(
        &mut self,
        frame: &RgbImage,
        _timestamp: Duration,
    ) -> Result<Vec<Gesture>, GestureError> {
        if frame.width() == 0 || frame.height() == 0 {
            return Ok(Vec::new());
        }

        let coverage = Self::coverage(frame);
        trace!(coverage, "Measured skin coverage");

        let gesture = if coverage >= self.min_coverage {
            let score = (coverage / self.full_coverage.max(f32::EPSILON)).min(1.);
            Gesture::new(GestureCategory::OpenPalm, score)
        } else {
            Gesture::new(GestureCategory::Unrecognised, 1. - coverage)
        };

        Ok(vec![gesture])
    }
}
