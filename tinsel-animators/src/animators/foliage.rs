//! This module contains the [`Foliage`] animator, a point cloud of needles that fills the tree.

use super::prelude::*;
use tinsel_frame::FoliageFrame;
use tinsel_placement::{bottom_weighted_cone_point, cone_point, sphere_point, ConeFill};
use tracing::warn;

/// The colour of the needles at the bottom of the tree.
const LOW_COLOUR: Vec3 = Vec3::new(0.01, 0.12, 0.06);

/// The colour of the needles at the top of the tree.
const HIGH_COLOUR: Vec3 = Vec3::new(0.05, 0.40, 0.20);

/// The config for the [`Foliage`] animator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FoliageConfig {
    /// The number of needles.
    pub count: usize,

    /// The chance that a needle is placed inside the volume of the tree rather than on its
    /// surface.
    pub volume_chance: f64,

    /// The size of every needle before it's scaled by the progress.
    pub point_size: f32,

    /// How far the needles sway in the wind when the tree is formed.
    pub sway_amplitude: f32,
}

impl Default for FoliageConfig {
    fn default() -> Self {
        Self {
            count: 2000,
            volume_chance: 0.6,
            point_size: 1.,
            sway_amplitude: 0.025,
        }
    }
}

/// The needles of the tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Foliage {
    /// The config of this foliage.
    config: FoliageConfig,

    /// Where each needle is in the chaos state.
    chaos: Vec<Vec3>,

    /// Where each needle is in the formed state.
    formed: Vec<Vec3>,

    /// The progress used by the needles, which trails the scene progress.
    progress: Easing,
}

impl Foliage {
    /// Where each needle is in the chaos state.
    pub fn chaos_positions(&self) -> &[Vec3] {
        &self.chaos
    }

    /// Where each needle is in the formed state.
    pub fn formed_positions(&self) -> &[Vec3] {
        &self.formed
    }

    /// The progress currently used by the needles.
    pub fn progress(&self) -> f32 {
        self.progress.value()
    }

    /// Compute the final vertex for one needle.
    fn vertex(&self, chaos: Vec3, formed: Vec3, progress: f32, elapsed: f32) -> PointVertex {
        let mut position = chaos.lerp(formed, progress);

        let wave = (elapsed * 1.5 + position.x * 2. + position.z * 2.).sin()
            * self.config.sway_amplitude
            * progress;
        position.x += wave;
        position.z += wave;

        let shade = ((position.y + 5.) / 12.).clamp(0., 1.);

        PointVertex {
            position,
            size: self.config.point_size * (0.8 + progress * 0.5),
            colour: LOW_COLOUR.lerp(HIGH_COLOUR, shade),
            opacity: 0.2 + 0.5 * progress,
        }
    }
}

impl Animator for Foliage {
    type Config = FoliageConfig;
    type Frame = FoliageFrame;

    fn animator_name() -> &'static str {
        "Foliage"
    }

    #[instrument(skip_all, fields(count = config.count))]
    fn mount<R: Rng + ?Sized>(config: &FoliageConfig, tree: &TreeShape, rng: &mut R) -> Self {
        let cone = tree.cone();
        let volume_chance = if config.volume_chance.is_finite() {
            config.volume_chance.clamp(0., 1.)
        } else {
            let default = FoliageConfig::default().volume_chance;
            warn!(
                volume_chance = config.volume_chance,
                default, "Foliage volume chance isn't a number, using the default"
            );
            default
        };

        let (chaos, formed) = (0..config.count)
            .map(|_| {
                let chaos = sphere_point(rng, tree.chaos_radius);
                let formed = if rng.gen_bool(volume_chance) {
                    cone_point(rng, &cone, ConeFill::Volume)
                } else {
                    bottom_weighted_cone_point(rng, &cone).position
                };
                (chaos, formed)
            })
            .unzip();

        debug!("Mounted foliage");

        Self {
            config: config.clone(),
            chaos,
            formed,
            progress: Easing::progress(),
        }
    }

    fn next_frame(&mut self, ctx: &FrameContext) -> FoliageFrame {
        let progress = self.progress.step(ctx.progress);

        FoliageFrame {
            progress,
            vertices: self
                .chaos
                .iter()
                .zip(&self.formed)
                .map(|(&chaos, &formed)| self.vertex(chaos, formed, progress, ctx.elapsed))
                .collect(),
        }
    }
}
