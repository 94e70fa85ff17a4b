//! This module contains the [`Snow`] animator.

use super::prelude::*;
use crate::easing::PROGRESS_SNAP_THRESHOLD;
use std::f32::consts::TAU;
use tinsel_frame::{rgb_to_vec3, SnowFrame};

/// The config for the [`Snow`] animator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnowConfig {
    /// The number of flakes.
    pub count: usize,

    /// Half the width and depth of the box the flakes fall through.
    pub half_width: f32,

    /// The y coordinate of the bottom of the box. Flakes that fall past this wrap back to the top.
    pub floor: f32,

    /// The height of the box.
    pub height: f32,

    /// The colour of every flake.
    pub colour: RGBArray,

    /// How fast the snow fades in and out, per second.
    pub fade_rate: f32,

    /// The alpha of a flake when the snow is fully faded in.
    pub max_alpha: f32,
}

impl Default for SnowConfig {
    fn default() -> Self {
        Self {
            count: 3000,
            half_width: 25.,
            floor: -10.,
            height: 40.,
            colour: palette::WHITE,
            fade_rate: 0.8,
            max_alpha: 0.8,
        }
    }
}

/// A single snowflake.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnowFlake {
    /// Where the flake starts.
    pub origin: Vec3,

    /// How fast the flake falls. Smaller flakes fall faster.
    pub speed: f32,

    /// How far the flake drifts from side to side.
    pub drift: f32,

    /// The size of the flake.
    pub size: f32,

    /// Where in its drift cycle the flake starts, in radians.
    pub phase: f32,
}

impl SnowFlake {
    /// Create a random flake somewhere in the box described by the config.
    fn random<R: Rng + ?Sized>(rng: &mut R, config: &SnowConfig) -> Self {
        let origin = Vec3::new(
            (rng.gen::<f32>() - 0.5) * 2. * config.half_width,
            rng.gen::<f32>() * config.height + config.floor,
            (rng.gen::<f32>() - 0.5) * 2. * config.half_width,
        );

        let size = rng.gen::<f32>() * 0.5 + 0.1;
        let speed = 0.5 + (1. - (size - 0.1) / 0.5) * 0.8;

        Self {
            origin,
            speed,
            drift: rng.gen::<f32>() * 2.2,
            size,
            phase: rng.gen::<f32>() * TAU,
        }
    }

    /// Where the flake is at the given time, wrapping around the box.
    pub fn position_at(&self, elapsed: f32, floor: f32, height: f32) -> Vec3 {
        let y = (self.origin.y - elapsed * self.speed - floor).rem_euclid(height) + floor;
        let x = self.origin.x + (elapsed + self.phase).sin() * self.drift * 0.5;
        let z = self.origin.z + (elapsed * 0.8 + self.phase).cos() * self.drift * 0.5;
        Vec3::new(x, y, z)
    }
}

/// The snow falling around the tree.
///
/// The snow fades in while the snow signal is active and fades out otherwise.
#[derive(Clone, Debug, PartialEq)]
pub struct Snow {
    /// The config of the snow.
    config: SnowConfig,

    /// Every flake.
    flakes: Vec<SnowFlake>,

    /// The global opacity of the snow.
    opacity: Easing,
}

impl Snow {
    /// Every flake.
    pub fn flakes(&self) -> &[SnowFlake] {
        &self.flakes
    }

    /// The current global opacity.
    pub fn opacity(&self) -> f32 {
        self.opacity.value()
    }
}

impl Animator for Snow {
    type Config = SnowConfig;
    type Frame = SnowFrame;

    fn animator_name() -> &'static str {
        "Snow"
    }

    #[instrument(skip_all, fields(count = config.count))]
    fn mount<R: Rng + ?Sized>(config: &SnowConfig, _tree: &TreeShape, rng: &mut R) -> Self {
        let flakes = (0..config.count)
            .map(|_| SnowFlake::random(rng, config))
            .collect();

        debug!("Mounted snow");

        Self {
            config: config.clone(),
            flakes,
            opacity: Easing::new(0., config.fade_rate, PROGRESS_SNAP_THRESHOLD),
        }
    }

    fn next_frame(&mut self, ctx: &FrameContext) -> SnowFrame {
        let target = if ctx.snow_active { 1. } else { 0. };
        let opacity = self
            .opacity
            .step_with_rate(target, per_frame_factor(self.config.fade_rate, ctx.delta));

        let colour = rgb_to_vec3(self.config.colour);
        let alpha = self.config.max_alpha * opacity;

        SnowFrame {
            opacity,
            colour: self.config.colour,
            flakes: self
                .flakes
                .iter()
                .map(|flake| PointVertex {
                    position: flake.position_at(ctx.elapsed, self.config.floor, self.config.height),
                    size: flake.size,
                    colour,
                    opacity: alpha,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use rand::{rngs::StdRng, SeedableRng};

    fn mount() -> Snow {
        Snow::mount(
            &SnowConfig::default(),
            &TreeShape::default(),
            &mut StdRng::seed_from_u64(12345),
        )
    }

    #[test]
    fn flakes_test() {
        let snow = mount();
        assert_eq!(snow.flakes().len(), 3000);

        for flake in snow.flakes() {
            assert!(flake.origin.x.abs() <= 25. && flake.origin.z.abs() <= 25.);
            assert!(flake.origin.y >= -10. && flake.origin.y < 30.);
            assert!((0.1..0.6).contains(&flake.size));
            assert!((0.5..=1.3 + 1e-5).contains(&flake.speed));
            assert!((0. ..2.2).contains(&flake.drift));
            assert!((0. ..TAU).contains(&flake.phase));
        }

        // Smaller flakes fall faster
        let mut flakes = snow.flakes().to_vec();
        flakes.sort_by(|a, b| a.size.total_cmp(&b.size));
        assert!(flakes
            .windows(2)
            .all(|pair| pair[0].speed >= pair[1].speed - 1e-6));
    }

    #[test]
    fn flakes_wrap_around_the_box_test() {
        let flake = SnowFlake {
            origin: Vec3::new(1., 0., -2.),
            speed: 1.,
            drift: 0.,
            size: 0.3,
            phase: 0.,
        };

        assert!(flake
            .position_at(0., -10., 40.)
            .abs_diff_eq(Vec3::new(1., 0., -2.), 1e-6));
        assert!(approx_eq!(f32, flake.position_at(5., -10., 40.).y, -5., epsilon = 1e-5));

        // 10 seconds takes it to the floor, which wraps to the top
        assert!(approx_eq!(f32, flake.position_at(11., -10., 40.).y, 29., epsilon = 1e-4));

        for step in 0..500 {
            let y = flake.position_at(step as f32 * 0.37, -10., 40.).y;
            assert!((-10. ..30.).contains(&y), "{y} escaped the box");
        }
    }

    #[test]
    fn drift_test() {
        let flake = SnowFlake {
            origin: Vec3::ZERO,
            speed: 0.,
            drift: 2.,
            size: 0.3,
            phase: 0.,
        };

        let position = flake.position_at(PI / 2., -10., 40.);
        assert!(approx_eq!(f32, position.x, 1., epsilon = 1e-5));
        assert!(approx_eq!(
            f32,
            position.z,
            (0.4 * PI).cos(),
            epsilon = 1e-5
        ));
    }

    #[test]
    fn opacity_fades_monotonically_test() {
        let mut snow = mount();
        let active = FrameContext {
            snow_active: true,
            ..FrameContext::default()
        };
        let inactive = FrameContext::default();

        let mut previous = snow.opacity();
        assert_eq!(previous, 0.);

        for _ in 0..1000 {
            let frame = snow.next_frame(&active);
            assert!(frame.opacity >= previous && frame.opacity <= 1.);
            assert!(frame
                .flakes
                .iter()
                .all(|flake| approx_eq!(f32, flake.opacity, 0.8 * frame.opacity, ulps = 2)));
            previous = frame.opacity;
        }
        assert_eq!(previous, 1.);

        for _ in 0..1000 {
            let frame = snow.next_frame(&inactive);
            assert!(frame.opacity <= previous && frame.opacity >= 0.);
            previous = frame.opacity;
        }
        assert_eq!(previous, 0.);
    }

    #[test]
    fn long_frames_never_overshoot_test() {
        let mut snow = mount();
        let frame = snow.next_frame(&FrameContext {
            snow_active: true,
            delta: 10.,
            ..FrameContext::default()
        });
        assert_eq!(frame.opacity, 1.);
    }
}
