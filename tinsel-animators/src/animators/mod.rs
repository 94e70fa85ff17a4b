//! This module handles all implementations of [`Animator`].

#[cfg(doc)]
use crate::traits::Animator;

/// A prelude to be imported by animator implementations.
#[allow(unused_imports)]
pub(crate) mod prelude {
    pub(crate) use crate::{
        easing::{per_frame_factor, smoothstep, weighted_progress, Easing},
        traits::{Animator, FrameContext},
        tree::TreeShape,
    };
    pub use glam::{EulerRot, Quat, Vec2, Vec3};
    pub use rand::Rng;
    pub use serde::{Deserialize, Serialize};
    pub use std::f32::consts::PI;
    pub use tinsel_frame::{
        palette, Instance, InstanceTransform, PointVertex, Pose, RGBArray,
    };
    pub use tracing::{debug, instrument, trace};
}

mod foliage;
mod ornaments;
mod polaroid;
mod snow;
mod star;

pub use self::{
    foliage::{Foliage, FoliageConfig},
    ornaments::{
        GoldPlacement, LightPlacement, OrnamentBatches, OrnamentRecord, Ornaments,
        OrnamentsConfig,
    },
    polaroid::{
        texture_fit, CardState, PolaroidRecord, Polaroids, PolaroidsConfig, TextureFit, BACK_SIZE,
        CARD_SIZE, PHOTO_OFFSET_Y, PHOTO_SIZE,
    },
    snow::{Snow, SnowConfig, SnowFlake},
    star::{Star, StarConfig},
};
