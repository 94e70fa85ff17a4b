//! This module contains the [`Star`] animator.

use super::prelude::*;
use tinsel_frame::StarFrame;
use tinsel_placement::{star_outline, STAR_POINTS};

/// The config for the [`Star`] animator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarConfig {
    /// Where the centre of the star is.
    pub position: Vec3,

    /// The rotation of the star about the z axis, in radians.
    pub tilt: f32,

    /// The distance from the centre to the tips of the points.
    pub outer_radius: f32,

    /// The distance from the centre to the notches between the points.
    pub inner_radius: f32,

    /// How thick the star is when extruded.
    pub depth: f32,

    /// The colour of the star.
    pub colour: RGBArray,

    /// The emissive intensity of the star when the tree is fully formed.
    pub peak_emissive_intensity: f32,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0., 6., 0.),
            tilt: 0.2 * PI,
            outer_radius: 0.7,
            inner_radius: 0.35,
            depth: 0.3,
            colour: palette::GOLD_BRIGHT,
            peak_emissive_intensity: 12.,
        }
    }
}

/// The star at the top of the tree.
///
/// The star doesn't have a chaos arrangement. It just grows out of nothing as the tree forms and
/// glows brighter the more formed the tree is.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    /// The config of the star.
    config: StarConfig,
}

impl Star {
    /// The outline of the star in its local xy plane, before scaling.
    pub fn outline(&self) -> [Vec2; STAR_POINTS * 2] {
        star_outline(self.config.outer_radius, self.config.inner_radius)
    }

    /// How thick the star is.
    pub fn depth(&self) -> f32 {
        self.config.depth
    }
}

impl Animator for Star {
    type Config = StarConfig;
    type Frame = StarFrame;

    fn animator_name() -> &'static str {
        "Star"
    }

    fn mount<R: Rng + ?Sized>(config: &StarConfig, _tree: &TreeShape, _rng: &mut R) -> Self {
        Self {
            config: config.clone(),
        }
    }

    fn next_frame(&mut self, ctx: &FrameContext) -> StarFrame {
        StarFrame {
            transform: InstanceTransform {
                translation: self.config.position,
                rotation: Quat::from_rotation_z(self.config.tilt),
                scale: ctx.progress,
            },
            colour: self.config.colour,
            emissive_intensity: self.config.peak_emissive_intensity * ctx.progress,
        }
    }
}
