//! This crate provides the animators for every kind of element in the scene, as well as the
//! easing functions they share.
//!
//! Each animator owns a fixed set of elements, each with a "chaos" arrangement and a "formed"
//! arrangement that are generated once when the animator is mounted. Every displayed frame, the
//! animator reads the shared [`FrameContext`] and writes out the transforms for that frame.

pub mod animators;
pub mod easing;
mod traits;
mod tree;

pub use self::{
    animators::{
        texture_fit, CardState, Foliage, FoliageConfig, GoldPlacement, LightPlacement,
        OrnamentBatches, OrnamentRecord, Ornaments, OrnamentsConfig, PolaroidRecord, Polaroids,
        PolaroidsConfig, Snow, SnowConfig, SnowFlake, Star, StarConfig, TextureFit, BACK_SIZE,
        CARD_SIZE, PHOTO_OFFSET_Y, PHOTO_SIZE,
    },
    traits::{Animator, FrameContext},
    tree::TreeShape,
};
