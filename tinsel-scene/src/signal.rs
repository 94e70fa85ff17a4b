//! This module contains the snow signal, which lets anything on any thread turn the snow on and
//! off without ever blocking the frame loop.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::trace;

/// Create a new snow signal, which starts off inactive.
pub fn snow_channel() -> (SnowSwitch, SnowSignal) {
    let (tx, rx) = watch::channel(false);
    (SnowSwitch(Arc::new(tx)), SnowSignal(rx))
}

/// The writing end of the snow signal. The last value written wins.
///
/// This can be cloned and sent to other threads. Once every clone has been dropped, the signal
/// reads as inactive.
#[derive(Clone, Debug)]
pub struct SnowSwitch(Arc<watch::Sender<bool>>);

impl SnowSwitch {
    /// Turn the snow on or off.
    pub fn set(&self, active: bool) {
        let previous = self.0.send_replace(active);
        if previous != active {
            trace!(active, "Snow signal changed");
        }
    }

    /// Flip the snow signal and return the new value.
    pub fn toggle(&self) -> bool {
        let mut active = false;
        self.0.send_modify(|value| {
            *value = !*value;
            active = *value;
        });
        trace!(active, "Snow signal toggled");
        active
    }

    /// Whether the snow is currently on.
    pub fn is_active(&self) -> bool {
        *self.0.borrow()
    }
}

/// The reading end of the snow signal. Reading it never waits.
#[derive(Clone, Debug)]
pub struct SnowSignal(watch::Receiver<bool>);

impl SnowSignal {
    /// Whether it should be snowing right now.
    pub fn is_active(&self) -> bool {
        // An error means every switch has been dropped
        self.0.has_changed().is_ok() && *self.0.borrow()
    }
}
