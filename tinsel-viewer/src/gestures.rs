//! This module starts the gesture detector that lets an open palm turn the snow on.

use tinsel_gesture::{
    DetectorHandle, FrameSource, GestureDetector, GestureError, SkinToneClassifier,
};
use tinsel_scene::SnowSwitch;
use tracing::{info, warn};

/// Start watching frames from `open_source` for an open palm, writing the result to `switch`.
///
/// The `S` key keeps working alongside the detector, but the detector overwrites it with every
/// frame it classifies. Returns `None` if the detector thread couldn't be started.
#[cfg_attr(not(feature = "webcam"), allow(dead_code))]
pub(crate) fn start_gesture_detection<S, F>(
    open_source: F,
    switch: SnowSwitch,
) -> Option<DetectorHandle>
where
    S: FrameSource,
    F: FnOnce() -> Result<S, GestureError> + Send + 'static,
{
    match GestureDetector::default().spawn(open_source, SkinToneClassifier::default(), switch) {
        Ok(handle) => {
            info!("Started gesture detection");
            Some(handle)
        }
        Err(error) => {
            warn!(%error, "Couldn't start the gesture detector thread");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::{
        thread,
        time::{Duration, Instant},
    };
    use tinsel_scene::snow_channel;

    /// Shows the camera nothing, then a hand.
    struct HandAfterBackground {
        frames_seen: usize,
    }

    impl FrameSource for HandAfterBackground {
        fn next_frame(&mut self) -> Option<RgbImage> {
            self.frames_seen += 1;
            let colour = if self.frames_seen > 2 {
                Rgb([224, 172, 140])
            } else {
                Rgb([10, 60, 30])
            };
            Some(RgbImage::from_pixel(16, 16, colour))
        }
    }

    #[test]
    fn open_palm_turns_snow_on_test() {
        let (switch, signal) = snow_channel();

        let handle = start_gesture_detection(
            || Ok(HandAfterBackground { frames_seen: 0 }),
            switch.clone(),
        )
        .expect("The detector thread should start");

        let start = Instant::now();
        while !signal.is_active() {
            assert!(
                start.elapsed() < Duration::from_secs(5),
                "The snow never turned on"
            );
            thread::sleep(Duration::from_millis(5));
        }

        handle.stop();
        assert!(switch.is_active());
    }
}
