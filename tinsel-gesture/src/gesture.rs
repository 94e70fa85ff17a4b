//! This module contains [`Gesture`] and the logic that decides whether it should snow.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The score an open palm needs to beat to count.
pub const OPEN_PALM_THRESHOLD: f32 = 0.5;

/// The categories reported by the standard gesture recogniser.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[allow(missing_docs, reason = "the recogniser names document the variants")]
pub enum GestureCategory {
    #[strum(serialize = "None")]
    #[serde(rename = "None")]
    Unrecognised,

    #[strum(serialize = "Closed_Fist")]
    #[serde(rename = "Closed_Fist")]
    ClosedFist,

    #[strum(serialize = "Open_Palm")]
    #[serde(rename = "Open_Palm")]
    OpenPalm,

    #[strum(serialize = "Pointing_Up")]
    #[serde(rename = "Pointing_Up")]
    PointingUp,

    #[strum(serialize = "Thumb_Down")]
    #[serde(rename = "Thumb_Down")]
    ThumbDown,

    #[strum(serialize = "Thumb_Up")]
    #[serde(rename = "Thumb_Up")]
    ThumbUp,

    #[strum(serialize = "Victory")]
    #[serde(rename = "Victory")]
    Victory,

    #[strum(serialize = "ILoveYou")]
    #[serde(rename = "ILoveYou")]
    ILoveYou,
}

/// A single gesture reported by the classifier.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gesture {
    /// What kind of gesture it is.
    pub category: GestureCategory,

    /// How confident the classifier is, in [0, 1].
    pub score: f32,
}

impl Gesture {
    /// Create a new gesture.
    pub fn new(category: GestureCategory, score: f32) -> Self {
        Self { category, score }
    }
}

/// Whether the gestures from one frame should turn the snow on.
///
/// Only the first (most likely) gesture is considered. It has to be an open palm with a score
/// strictly greater than [`OPEN_PALM_THRESHOLD`].
pub fn is_open_palm(gestures: &[Gesture]) -> bool {
    gestures.first().map_or(false, |gesture| {
        gesture.category == GestureCategory::OpenPalm && gesture.score > OPEN_PALM_THRESHOLD
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn is_open_palm_test() {
        use GestureCategory::*;

        assert!(!is_open_palm(&[]));
        assert!(is_open_palm(&[Gesture::new(OpenPalm, 0.9)]));
        assert!(is_open_palm(&[Gesture::new(OpenPalm, 0.51)]));

        // Exactly the threshold isn't enough
        assert!(!is_open_palm(&[Gesture::new(OpenPalm, 0.5)]));
        assert!(!is_open_palm(&[Gesture::new(OpenPalm, 0.2)]));
        assert!(!is_open_palm(&[Gesture::new(ClosedFist, 0.99)]));

        // Only the first gesture counts
        assert!(!is_open_palm(&[
            Gesture::new(Victory, 0.8),
            Gesture::new(OpenPalm, 0.9),
        ]));
    }

    #[test]
    fn category_names_test() {
        assert_eq!(
            GestureCategory::from_str("Open_Palm"),
            Ok(GestureCategory::OpenPalm)
        );
        assert_eq!(
            GestureCategory::from_str("None"),
            Ok(GestureCategory::Unrecognised)
        );
        assert!(GestureCategory::from_str("OpenPalm").is_err());

        let names: Vec<String> = GestureCategory::iter().map(|c| c.to_string()).collect();
        assert_eq!(
            names,
            [
                "None",
                "Closed_Fist",
                "Open_Palm",
                "Pointing_Up",
                "Thumb_Down",
                "Thumb_Up",
                "Victory",
                "ILoveYou"
            ]
        );
    }
}
