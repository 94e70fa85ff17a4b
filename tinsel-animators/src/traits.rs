//! This module contains the [`Animator`] trait and the context it gets every frame.

use crate::TreeShape;
use rand::Rng;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use tinsel_frame::CameraPose;

/// Everything an animator might need to know about the current frame.
///
/// The scene builds one of these per displayed frame and hands the same one to every animator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameContext {
    /// The scene progress, in [0, 1]. 0 is chaos and 1 is formed.
    pub progress: f32,

    /// The number of seconds since the scene was mounted.
    pub elapsed: f32,

    /// The number of seconds since the previous frame.
    pub delta: f32,

    /// Where the camera is this frame.
    pub camera: CameraPose,

    /// Whether it should currently be snowing.
    pub snow_active: bool,
}

impl Default for FrameContext {
    fn default() -> Self {
        Self {
            progress: 0.,
            elapsed: 0.,
            delta: 1. / 60.,
            camera: CameraPose::default(),
            snow_active: false,
        }
    }
}

/// The trait implemented by all animators, which defines how to mount them and how to advance
/// them by one frame.
pub trait Animator {
    /// The type of this animator's config.
    type Config: Clone + Debug + Default + PartialEq + Serialize + DeserializeOwned;

    /// The data this animator produces every frame.
    type Frame;

    /// The name of the animator, used for logging.
    fn animator_name() -> &'static str;

    /// Create every element this animator owns, drawing all randomness from `rng`.
    ///
    /// This is only called once, when the scene is mounted. The chaos and formed arrangements
    /// created here are never changed afterwards.
    fn mount<R: Rng + ?Sized>(config: &Self::Config, tree: &TreeShape, rng: &mut R) -> Self
    where
        Self: Sized;

    /// Advance the animation by one frame and return the data to render.
    ///
    /// This should be called exactly once per displayed frame.
    fn next_frame(&mut self, ctx: &FrameContext) -> Self::Frame;
}
