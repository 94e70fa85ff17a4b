//! This module contains the [`Ornaments`] animator, which owns the ornament balls and the string
//! lights.

use super::prelude::*;
use tinsel_placement::{
    bottom_weighted_cone_point, golden_spiral_point, layered_ring_point, sphere_point,
    spiral_path_point, ConeSample,
};

/// How to place the gold ornaments on the tree.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum GoldPlacement {
    /// Scattered over the surface with more towards the bottom, like the red ornaments.
    BottomWeighted,

    /// In evenly spaced rings up the tree.
    LayeredRings,
}

/// How to place the string lights on the tree.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, strum::Display)]
pub enum LightPlacement {
    /// Along a helix winding up the tree.
    SpiralPath {
        /// The number of times the string wraps around the tree.
        loops: f32,
    },

    /// Spread evenly over the surface along a golden-angle spiral.
    GoldenSpiral,
}

/// The config for the [`Ornaments`] animator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrnamentsConfig {
    /// The number of gold ornaments.
    pub gold_count: usize,

    /// How the gold ornaments are placed.
    pub gold_placement: GoldPlacement,

    /// The colour of the gold ornaments.
    pub gold_colour: RGBArray,

    /// The number of red ornaments.
    pub red_count: usize,

    /// The colour of the red ornaments.
    pub red_colour: RGBArray,

    /// The radius of the cone the balls sit on, as a fraction of the tree radius. Slightly less
    /// than 1 so they nestle into the foliage.
    pub ball_radius_factor: f32,

    /// The number of lights on the string.
    pub light_count: usize,

    /// How the lights are placed.
    pub light_placement: LightPlacement,

    /// The radius of the cone the lights sit on, as a fraction of the tree radius.
    pub light_radius_factor: f32,

    /// The size of each light.
    pub light_scale: f32,

    /// The colour of the lights.
    pub light_colour: RGBArray,
}

impl Default for OrnamentsConfig {
    fn default() -> Self {
        Self {
            gold_count: 200,
            gold_placement: GoldPlacement::BottomWeighted,
            gold_colour: palette::GOLD_BRIGHT,
            red_count: 40,
            red_colour: palette::RICH_RED,
            ball_radius_factor: 0.95,
            light_count: 300,
            light_placement: LightPlacement::SpiralPath { loops: 10. },
            light_radius_factor: 1.02,
            light_scale: 0.1,
            light_colour: palette::GOLD_HIGHLIGHT,
        }
    }
}

/// A single ornament or light, with its two fixed arrangements.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrnamentRecord {
    /// Where the element is in the chaos state.
    chaos: Pose,

    /// Where the element is in the formed state.
    formed: Pose,

    /// The uniform scale of the element.
    scale: f32,

    /// How steeply the element moves through the global progress ramp. Always at least 1.
    weight: f32,

    /// The colour of the element.
    colour: RGBArray,
}

impl OrnamentRecord {
    /// Create a new record. The weight is clamped to be at least 1.
    pub fn new(chaos: Pose, formed: Pose, scale: f32, weight: f32, colour: RGBArray) -> Self {
        Self {
            chaos,
            formed,
            scale,
            weight: weight.max(1.),
            colour,
        }
    }

    /// Where the element is in the chaos state.
    pub fn chaos(&self) -> Pose {
        self.chaos
    }

    /// Where the element is in the formed state.
    pub fn formed(&self) -> Pose {
        self.formed
    }

    /// The uniform scale of the element.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// The weight of the element.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// The colour of the element.
    pub fn colour(&self) -> RGBArray {
        self.colour
    }

    /// Get the pose of the element for the given global progress.
    pub fn pose_at(&self, progress: f32) -> Pose {
        let t = smoothstep(weighted_progress(progress, self.weight), 0., 1.);
        self.chaos.interpolate(&self.formed, t)
    }

    /// Get the render instance of the element for the given global progress.
    pub fn instance_at(&self, progress: f32) -> Instance {
        Instance {
            transform: InstanceTransform::from_pose(self.pose_at(progress), self.scale),
            colour: self.colour,
        }
    }
}

/// The two instance batches produced by [`Ornaments`] every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct OrnamentBatches {
    /// The ornament balls, gold first and then red.
    pub balls: Vec<Instance>,

    /// The string lights, from the bottom of the string to the top.
    pub lights: Vec<Instance>,
}

/// The ornament balls and string lights on the tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Ornaments {
    /// The ornament balls, gold first and then red.
    balls: Vec<OrnamentRecord>,

    /// The string lights.
    lights: Vec<OrnamentRecord>,
}

impl Ornaments {
    /// The ornament balls, gold first and then red.
    pub fn balls(&self) -> &[OrnamentRecord] {
        &self.balls
    }

    /// The string lights.
    pub fn lights(&self) -> &[OrnamentRecord] {
        &self.lights
    }

    /// A random chaos rotation, tumbled about x and y.
    fn chaos_rotation<R: Rng + ?Sized>(rng: &mut R) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            rng.gen::<f32>() * PI,
            rng.gen::<f32>() * PI,
            0.,
        )
    }
}

impl Animator for Ornaments {
    type Config = OrnamentsConfig;
    type Frame = OrnamentBatches;

    fn animator_name() -> &'static str {
        "Ornaments"
    }

    #[instrument(skip_all)]
    fn mount<R: Rng + ?Sized>(config: &OrnamentsConfig, tree: &TreeShape, rng: &mut R) -> Self {
        let ball_cone = tree.cone().scale_radius(config.ball_radius_factor);
        let light_cone = tree.cone().scale_radius(config.light_radius_factor);

        let mut balls = Vec::with_capacity(config.gold_count + config.red_count);

        // Gold balls are medium sized and all settle at about the same rate
        for index in 0..config.gold_count {
            let chaos_position = sphere_point(rng, tree.chaos_radius);
            let ConeSample { position, y_normal } = match config.gold_placement {
                GoldPlacement::BottomWeighted => bottom_weighted_cone_point(rng, &ball_cone),
                GoldPlacement::LayeredRings => {
                    let position = layered_ring_point(rng, index, config.gold_count, &ball_cone);
                    ConeSample {
                        position,
                        y_normal: ball_cone.y_normal_of(position.y).clamp(0., 1.),
                    }
                }
            };
            let chaos_rotation = Self::chaos_rotation(rng);

            let size_factor = (1. - y_normal) * 0.2 + 0.2;
            let scale = size_factor + rng.gen::<f32>() * 0.3;
            let weight = 1. + rng.gen::<f32>() * 0.5;

            balls.push(OrnamentRecord::new(
                Pose::new(chaos_position, chaos_rotation),
                Pose::new(position, Quat::IDENTITY),
                scale,
                weight,
                config.gold_colour,
            ));
        }

        // Red balls are bigger towards the bottom of the tree and feel a bit heavier
        for _ in 0..config.red_count {
            let chaos_position = sphere_point(rng, tree.chaos_radius);
            let ConeSample { position, y_normal } = bottom_weighted_cone_point(rng, &ball_cone);
            let chaos_rotation = Self::chaos_rotation(rng);

            let size_factor = (1. - y_normal) * 0.4 + 0.3;
            let scale = size_factor + rng.gen::<f32>() * 0.1;
            let weight = 1.2 + rng.gen::<f32>() * 0.8;

            balls.push(OrnamentRecord::new(
                Pose::new(chaos_position, chaos_rotation),
                Pose::new(position, Quat::IDENTITY),
                scale,
                weight,
                config.red_colour,
            ));
        }

        // The bottom of the light string forms first
        let lights = (0..config.light_count)
            .map(|index| {
                let chaos_position = sphere_point(rng, tree.chaos_radius);
                let formed_position = match config.light_placement {
                    LightPlacement::SpiralPath { loops } => {
                        spiral_path_point(rng, index, config.light_count, &light_cone, loops)
                    }
                    LightPlacement::GoldenSpiral => {
                        golden_spiral_point(index, config.light_count, &light_cone)
                    }
                };
                let weight = 1. + (1. - index as f32 / config.light_count as f32) * 0.5;

                OrnamentRecord::new(
                    Pose::new(chaos_position, Quat::IDENTITY),
                    Pose::new(formed_position, Quat::IDENTITY),
                    config.light_scale,
                    weight,
                    config.light_colour,
                )
            })
            .collect();

        debug!(
            balls = balls.len(),
            gold_placement = %config.gold_placement,
            light_placement = %config.light_placement,
            "Mounted ornaments"
        );

        Self { balls, lights }
    }

    fn next_frame(&mut self, ctx: &FrameContext) -> OrnamentBatches {
        OrnamentBatches {
            balls: self
                .balls
                .iter()
                .map(|record| record.instance_at(ctx.progress))
                .collect(),
            lights: self
                .lights
                .iter()
                .map(|record| record.instance_at(ctx.progress))
                .collect(),
        }
    }
}
