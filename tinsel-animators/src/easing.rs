//! This module contains the easing functions shared by the scene and the animators.

/// The fraction of the remaining distance that the scene progress covers each frame.
pub const PROGRESS_EASING_RATE: f32 = 0.05;

/// When the scene progress is closer than this to its target, it snaps to the target.
pub const PROGRESS_SNAP_THRESHOLD: f32 = 0.001;

/// Hermite smoothstep between `min` and `max`, clamped to [0, 1].
pub fn smoothstep(x: f32, min: f32, max: f32) -> f32 {
    if x <= min {
        return 0.;
    }
    if x >= max {
        return 1.;
    }

    let x = (x - min) / (max - min);
    x * x * (3. - 2. * x)
}

/// Get the local progress of an element with the given weight.
///
/// The local progress is `progress * weight - (weight - 1) / 2`, clamped to [0, 1]. This
/// steepens the ramp around the midpoint, so an element with a weight of 2 starts moving when the
/// global progress is 0.25 and arrives when it's 0.75, while an element with a weight of 1 moves
/// over the whole ramp.
///
/// Weights less than 1 would stop elements from ever reaching either end, so the weight must be
/// at least 1.
pub fn weighted_progress(progress: f32, weight: f32) -> f32 {
    debug_assert!(weight >= 1., "Weights must be at least 1, got {weight}");
    (progress * weight - (weight - 1.) * 0.5).clamp(0., 1.)
}

/// Convert a rate per second into a per-frame interpolation factor, clamped to [0, 1] so that
/// long frames can never overshoot.
pub fn per_frame_factor(rate_per_second: f32, delta: f32) -> f32 {
    (rate_per_second * delta).clamp(0., 1.)
}

/// A value that eases exponentially towards a target, one step at a time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Easing {
    /// The current value.
    value: f32,

    /// The fraction of the remaining distance covered by [`Easing::step`].
    rate: f32,

    /// When the value is closer than this to the target at the start of a step, it snaps to the
    /// target instead.
    snap_threshold: f32,
}

impl Easing {
    /// Create a new easing value.
    pub const fn new(value: f32, rate: f32, snap_threshold: f32) -> Self {
        Self {
            value,
            rate,
            snap_threshold,
        }
    }

    /// An easing value using the rate and threshold of the scene progress, starting at 0.
    pub const fn progress() -> Self {
        Self::new(0., PROGRESS_EASING_RATE, PROGRESS_SNAP_THRESHOLD)
    }

    /// The current value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Move towards the target by the configured rate and return the new value.
    pub fn step(&mut self, target: f32) -> f32 {
        self.step_with_rate(target, self.rate)
    }

    /// Move towards the target by the given rate and return the new value.
    ///
    /// The rate should be in [0, 1], which means the value never overshoots the target.
    pub fn step_with_rate(&mut self, target: f32, rate: f32) -> f32 {
        let difference = target - self.value;
        if difference.abs() < self.snap_threshold {
            self.value = target;
        } else {
            self.value += difference * rate;
        }
        self.value
    }

    /// Whether the value has reached the target exactly.
    pub fn has_settled_at(&self, target: f32) -> bool {
        self.value == target
    }
}
