//! This crate composes every animator into a single scene.
//!
//! The [`SceneContext`] owns the progress value, the state of the tree, the photo selection, and
//! the snow signal. Shells like the viewer and the console create one and call
//! [`SceneContext::frame_update`] once per displayed frame.

mod config;
mod context;
mod signal;
mod state;

pub use self::{
    config::{ConfigError, SceneConfig},
    context::{FrameInput, PointerTarget, SceneContext},
    signal::{snow_channel, SnowSignal, SnowSwitch},
    state::TreeState,
};
