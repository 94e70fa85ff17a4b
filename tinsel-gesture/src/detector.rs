//! This module contains [`GestureDetector`], which runs the capture and classify loop on its own
//! thread.

use crate::{is_open_palm, FrameSource, GestureClassifier, GestureError};
use std::{
    io,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};
use tinsel_scene::SnowSwitch;
use tokio::sync::oneshot;
use tracing::{debug, info, instrument, trace, warn};
use tracing_unwrap::ResultExt;

/// Runs the gesture classifier on camera frames and publishes whether the user is showing an open
/// palm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GestureDetector {
    /// How long to wait between frames.
    interval: Duration,
}

impl Default for GestureDetector {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
        }
    }
}

impl GestureDetector {
    /// Create a detector that looks at a new frame every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Start the detector on a background thread and return a handle to stop it.
    ///
    /// The frame source is opened on the background thread, since camera handles often can't be
    /// sent between threads. If it can't be opened, the error is logged, the snow stays off, and
    /// the thread finishes immediately.
    ///
    /// Every `interval`, the latest frame is classified and the result is written to `switch`.
    /// Nothing here ever waits on the scene.
    pub fn spawn<S, F, C>(
        &self,
        open_source: F,
        classifier: C,
        switch: SnowSwitch,
    ) -> io::Result<DetectorHandle>
    where
        S: FrameSource,
        F: FnOnce() -> Result<S, GestureError> + Send + 'static,
        C: GestureClassifier + Send + 'static,
    {
        let (kill_tx, kill_rx) = oneshot::channel();
        let interval = self.interval;

        let thread = thread::Builder::new()
            .name("gesture-detector".to_string())
            .spawn(move || run_detector(open_source, classifier, switch, interval, kill_rx))?;

        Ok(DetectorHandle {
            kill_thread: Some(kill_tx),
            thread: Some(thread),
        })
    }
}

/// Open the source and classify frames until told to stop. Intended to be run in a background
/// thread.
#[instrument(skip_all)]
fn run_detector<S, F, C>(
    open_source: F,
    mut classifier: C,
    switch: SnowSwitch,
    interval: Duration,
    kill_thread: oneshot::Receiver<()>,
) where
    S: FrameSource,
    F: FnOnce() -> Result<S, GestureError>,
    C: GestureClassifier,
{
    let mut source = match open_source() {
        Ok(source) => source,
        Err(error) => {
            warn!(%error, "Gesture detection is disabled");
            switch.set(false);
            return;
        }
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect_or_log("Should be able to build a tokio runtime for the gesture detector");

    info!(?interval, "Starting gesture detection");
    let start = Instant::now();

    let detect = async {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;

            let Some(frame) = source.next_frame() else {
                trace!("No frame ready");
                continue;
            };

            let active = match classifier.classify(&frame, start.elapsed()) {
                Ok(gestures) => {
                    trace!(?gestures, "Classified frame");
                    is_open_palm(&gestures)
                }
                Err(error) => {
                    warn!(%error, "Couldn't classify frame");
                    false
                }
            };
            switch.set(active);
        }
    };

    runtime.block_on(async {
        tokio::select! {
            biased;

            _ = kill_thread => {
                debug!("Stopping gesture detection");
            }

            _ = detect => {}
        }
    });

    // Release the camera before the thread finishes
    drop(source);
}

/// A handle to a running [`GestureDetector`]. Dropping the handle stops the detector.
#[derive(Debug)]
pub struct DetectorHandle {
    /// Send a message on this to stop the loop.
    kill_thread: Option<oneshot::Sender<()>>,

    /// The background thread.
    thread: Option<JoinHandle<()>>,
}

impl DetectorHandle {
    /// Whether the background thread has finished, either because it was stopped or because the
    /// frame source couldn't be opened.
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Stop the loop, release the frame source, and wait for the thread to finish.
    pub fn stop(mut self) {
        self.stop_inner();
    }

    /// Stop the loop and join the thread, if that hasn't already happened.
    fn stop_inner(&mut self) {
        if let Some(kill_thread) = self.kill_thread.take() {
            // An error means the thread has already finished
            let _ = kill_thread.send(());
        }

        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("The gesture detector thread panicked");
            }
        }
    }
}

impl Drop for DetectorHandle {
    fn drop(&mut self) {
        self.stop_inner();
    }
}
