//! This module places points on and inside the cone of the tree.

use crate::GOLDEN_ANGLE;
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// The number of discrete height layers used by [`layered_ring_point`].
pub const LAYER_COUNT: usize = 12;

/// A cone standing upright on the plane `y = base_y` with its apex on the y axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cone {
    /// The distance from the base to the apex.
    pub height: f32,

    /// The radius of the base.
    pub radius: f32,

    /// The y coordinate of the base.
    pub base_y: f32,
}

impl Cone {
    /// Create a new cone.
    pub const fn new(height: f32, radius: f32, base_y: f32) -> Self {
        Self {
            height,
            radius,
            base_y,
        }
    }

    /// The same cone with the height scaled by the given factor.
    #[must_use]
    pub fn scale_height(self, factor: f32) -> Self {
        Self {
            height: self.height * factor,
            ..self
        }
    }

    /// The same cone with the radius scaled by the given factor.
    #[must_use]
    pub fn scale_radius(self, factor: f32) -> Self {
        Self {
            radius: self.radius * factor,
            ..self
        }
    }

    /// The radius of the cone at the given normalised height, where 0 is the base and 1 is the
    /// apex.
    pub fn radius_at(&self, y_normal: f32) -> f32 {
        (1. - y_normal) * self.radius
    }

    /// The normalised height of the given y coordinate.
    pub fn y_normal_of(&self, y: f32) -> f32 {
        (y - self.base_y) / self.height
    }

    /// Place a point at the given normalised height, distance from the axis, and angle.
    fn point_at(&self, y_normal: f32, r: f32, angle: f32) -> Vec3 {
        Vec3::new(
            r * angle.cos(),
            y_normal * self.height + self.base_y,
            r * angle.sin(),
        )
    }
}

/// How to fill the cone in [`cone_point`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConeFill {
    /// Anywhere in the volume, with uniform density over each horizontal slice.
    Volume,

    /// Only on the sloped surface.
    Surface,
}

/// A point sampled from [`bottom_weighted_cone_point`], along with the normalised height that
/// was used to generate it.
///
/// The normalised height doesn't include the vertical jitter, so it can't be recovered exactly
/// from the position. Callers use it to size and weight the element placed there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConeSample {
    /// The position of the point.
    pub position: Vec3,

    /// The normalised height, where 0 is the base and 1 is the apex.
    pub y_normal: f32,
}

/// Get a random point in or on the cone. The height is uniformly distributed.
///
/// When filling the volume, the distance from the axis is `sqrt(u) * r_max`, which gives uniform
/// density over the disc at each height.
pub fn cone_point<R: Rng + ?Sized>(rng: &mut R, cone: &Cone, fill: ConeFill) -> Vec3 {
    let y_normal: f32 = rng.gen();
    let r_max = cone.radius_at(y_normal);

    let r = match fill {
        ConeFill::Volume => rng.gen::<f32>().sqrt() * r_max,
        ConeFill::Surface => r_max,
    };
    let theta = rng.gen::<f32>() * TAU;

    cone.point_at(y_normal, r, theta)
}

/// Get a random point on the surface of the cone, with more points towards the base.
///
/// The normalised height is `1 - sqrt(u)`, so its median is `1 - sqrt(0.5)` (about 0.29). A
/// vertical jitter in [0, 1) is then added to the position.
pub fn bottom_weighted_cone_point<R: Rng + ?Sized>(rng: &mut R, cone: &Cone) -> ConeSample {
    let y_normal = 1. - rng.gen::<f32>().sqrt();
    let r = cone.radius_at(y_normal);
    let theta = rng.gen::<f32>() * TAU;

    let mut position = cone.point_at(y_normal, r, theta);
    position.y += rng.gen::<f32>();

    ConeSample { position, y_normal }
}

/// Place the `index`th of `total` points in evenly spaced rings on the surface of the cone.
///
/// The points are split into [`LAYER_COUNT`] height layers. Each layer is rotated a little
/// relative to the one below it so the rings don't line up, and each point gets a vertical
/// jitter in [0, 1).
pub fn layered_ring_point<R: Rng + ?Sized>(
    rng: &mut R,
    index: usize,
    total: usize,
    cone: &Cone,
) -> Vec3 {
    debug_assert!(index < total, "index must be less than total");

    let per_layer = total as f32 / LAYER_COUNT as f32;
    let layer = (index as f32 / per_layer).floor();
    let y_normal = layer / LAYER_COUNT as f32;
    let angle = (index as f32).rem_euclid(per_layer) * (TAU / per_layer) + layer * 0.6;

    let mut position = cone.point_at(y_normal, cone.radius_at(y_normal), angle);
    position.y += rng.gen::<f32>();
    position
}

/// Place the `index`th of `total` points on a golden-angle spiral up the surface of the cone,
/// covering the bottom 90% of its height.
pub fn golden_spiral_point(index: usize, total: usize, cone: &Cone) -> Vec3 {
    let y_normal = index as f32 / total as f32 * 0.9;
    let angle = index as f32 * GOLDEN_ANGLE;

    cone.point_at(y_normal, cone.radius_at(y_normal), angle)
}

/// Place the `index`th of `total` photo cards on a golden-angle spiral around the cone.
///
/// The cards cover the band between 30% and 90% of the height, and stand a little way off the
/// surface so they don't intersect the foliage.
pub fn polaroid_point(index: usize, total: usize, cone: &Cone) -> Vec3 {
    let y_normal = index as f32 / total as f32 * 0.6 + 0.3;
    let r = cone.radius_at(y_normal) * 1.15 + 1.;
    let angle = index as f32 * GOLDEN_ANGLE;

    cone.point_at(y_normal, r, angle)
}

/// Place the `index`th of `total` points along a helix winding `loops` times up the cone, like a
/// string of lights.
///
/// The position along the helix is `index / total * sqrt(u)`, which scatters the points
/// backwards along the string so it doesn't look too regular. The helix sits half a unit off the
/// surface.
pub fn spiral_path_point<R: Rng + ?Sized>(
    rng: &mut R,
    index: usize,
    total: usize,
    cone: &Cone,
    loops: f32,
) -> Vec3 {
    let t = index as f32 / total as f32 * rng.gen::<f32>().sqrt();
    let r = cone.radius_at(t) + 0.5;
    let angle = t * TAU * loops;

    cone.point_at(t, r, angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TREE_BASE_Y;
    use float_cmp::approx_eq;
    use rand::{
        rngs::{mock::StepRng, StdRng},
        SeedableRng,
    };

    const CONE: Cone = Cone::new(12., 5.5, TREE_BASE_Y);

    /// The distance of the point from the y axis.
    fn horizontal_distance(point: Vec3) -> f32 {
        point.x.hypot(point.z)
    }

    /// Assert that the point is within the horizontal radius and the vertical range.
    fn assert_within(point: Vec3, radius: f32, min_y: f32, max_y: f32) {
        assert!(
            horizontal_distance(point) <= radius + 1e-4,
            "{point:?} is further than {radius} from the axis"
        );
        assert!(
            point.y >= min_y - 1e-4 && point.y <= max_y + 1e-4,
            "{point:?} is outside the height range [{min_y}, {max_y}]"
        );
    }

    #[test]
    fn cone_point_bounds_test() {
        let mut rng = StdRng::seed_from_u64(12345);
        let top = CONE.base_y + CONE.height;

        for fill in [ConeFill::Volume, ConeFill::Surface] {
            for _ in 0..5000 {
                let point = cone_point(&mut rng, &CONE, fill);
                assert_within(point, CONE.radius, CONE.base_y, top);

                // Nothing pokes out of the side of the cone
                let r_max = CONE.radius_at(CONE.y_normal_of(point.y));
                assert!(horizontal_distance(point) <= r_max + 1e-4);

                if fill == ConeFill::Surface {
                    assert!(approx_eq!(
                        f32,
                        horizontal_distance(point),
                        r_max,
                        epsilon = 1e-3
                    ));
                }
            }
        }
    }

    #[test]
    fn cone_point_fixed_draws_test() {
        // Every draw is 0: the very centre of the base
        let point = cone_point(&mut StepRng::new(0, 0), &CONE, ConeFill::Volume);
        assert!(point.abs_diff_eq(Vec3::new(0., TREE_BASE_Y, 0.), 1e-6));

        // On the surface, the same draws land on the edge of the base along the x axis
        let point = cone_point(&mut StepRng::new(0, 0), &CONE, ConeFill::Surface);
        assert!(point.abs_diff_eq(Vec3::new(5.5, TREE_BASE_Y, 0.), 1e-6));
    }

    #[test]
    fn cone_volume_density_test() {
        const SAMPLES: usize = 40_000;
        let mut rng = StdRng::seed_from_u64(12345);

        let points: Vec<Vec3> = (0..SAMPLES)
            .map(|_| cone_point(&mut rng, &CONE, ConeFill::Volume))
            .collect();

        // At any given height, a quarter of the area of the disc is within half the radius, so
        // three quarters of the points should be outside it
        let outer_half_of_slice = points
            .iter()
            .filter(|&&point| {
                let r_max = CONE.radius_at(CONE.y_normal_of(point.y));
                horizontal_distance(point) > r_max / 2.
            })
            .count() as f32
            / SAMPLES as f32;
        assert!(
            (outer_half_of_slice - 0.75).abs() < 0.015,
            "Expected about 0.75 but got {outer_half_of_slice}"
        );

        // Integrating that over the whole cone gives a quarter of the points further than half
        // the base radius from the axis
        let outside_half_radius = points
            .iter()
            .filter(|&&point| horizontal_distance(point) > CONE.radius / 2.)
            .count() as f32
            / SAMPLES as f32;
        assert!(
            (outside_half_radius - 0.25).abs() < 0.015,
            "Expected about 0.25 but got {outside_half_radius}"
        );
    }

    #[test]
    fn bottom_weighted_cone_point_test() {
        const SAMPLES: usize = 20_000;
        let mut rng = StdRng::seed_from_u64(12345);

        let mut y_normals: Vec<f32> = (0..SAMPLES)
            .map(|_| {
                let ConeSample { position, y_normal } =
                    bottom_weighted_cone_point(&mut rng, &CONE);

                assert!((0.0..=1.0).contains(&y_normal));
                assert!(approx_eq!(
                    f32,
                    horizontal_distance(position),
                    CONE.radius_at(y_normal),
                    epsilon = 1e-3
                ));

                // The jitter only ever moves the point up, by less than 1
                let unjittered_y = y_normal * CONE.height + CONE.base_y;
                assert!(position.y >= unjittered_y - 1e-4 && position.y <= unjittered_y + 1. + 1e-4);
                assert_within(
                    position,
                    CONE.radius,
                    CONE.base_y,
                    CONE.base_y + CONE.height + 1.,
                );

                y_normal
            })
            .collect();

        y_normals.sort_by(f32::total_cmp);
        let median = y_normals[SAMPLES / 2];
        assert!(median < 0.5);
        assert!(
            (median - (1. - 0.5f32.sqrt())).abs() < 0.02,
            "Expected a median of about 0.29 but got {median}"
        );
    }

    #[test]
    fn bottom_weighted_cone_point_fixed_draws_test() {
        // A draw of 0 puts the point right at the apex
        let sample = bottom_weighted_cone_point(&mut StepRng::new(0, 0), &CONE);
        assert_eq!(sample.y_normal, 1.);
        assert!(sample
            .position
            .abs_diff_eq(Vec3::new(0., CONE.base_y + CONE.height, 0.), 1e-5));
    }

    #[test]
    fn layered_ring_point_test() {
        let mut rng = StdRng::seed_from_u64(12345);
        let total = 24;

        for index in 0..total {
            let point = layered_ring_point(&mut rng, index, total, &CONE);

            // Two points per layer
            let layer = (index / 2) as f32;
            let y_normal = layer / LAYER_COUNT as f32;
            let ring_y = y_normal * CONE.height + CONE.base_y;

            assert!(point.y >= ring_y - 1e-4 && point.y <= ring_y + 1. + 1e-4);
            assert!(approx_eq!(
                f32,
                horizontal_distance(point),
                CONE.radius_at(y_normal),
                epsilon = 1e-3
            ));
        }

        // The two points in the bottom layer are opposite each other
        let first = layered_ring_point(&mut StepRng::new(0, 0), 0, total, &CONE);
        let second = layered_ring_point(&mut StepRng::new(0, 0), 1, total, &CONE);
        assert!(first.abs_diff_eq(Vec3::new(5.5, TREE_BASE_Y, 0.), 1e-4));
        assert!(second.abs_diff_eq(Vec3::new(-5.5, TREE_BASE_Y, 0.), 1e-4));
    }

    #[test]
    fn golden_spiral_point_test() {
        let total = 300;
        let points: Vec<Vec3> = (0..total)
            .map(|index| golden_spiral_point(index, total, &CONE))
            .collect();

        assert!(points[0].abs_diff_eq(Vec3::new(5.5, TREE_BASE_Y, 0.), 1e-5));

        for (index, &point) in points.iter().enumerate() {
            assert_within(
                point,
                CONE.radius,
                CONE.base_y,
                CONE.base_y + CONE.height * 0.9,
            );

            // Each point sits at its own multiple of the golden angle around the axis
            let angle = index as f32 * GOLDEN_ANGLE;
            let direction = glam::Vec2::new(point.x, point.z).normalize();
            assert!(direction.abs_diff_eq(glam::Vec2::new(angle.cos(), angle.sin()), 1e-3));
        }

        // Strictly climbing
        assert!(points.windows(2).all(|pair| pair[1].y > pair[0].y));
    }

    #[test]
    fn polaroid_point_test() {
        let total = 17;
        for index in 0..total {
            let point = polaroid_point(index, total, &CONE);
            let y_normal = index as f32 / total as f32 * 0.6 + 0.3;

            assert!(approx_eq!(
                f32,
                point.y,
                y_normal * CONE.height + CONE.base_y,
                epsilon = 1e-4
            ));
            assert!(approx_eq!(
                f32,
                horizontal_distance(point),
                (1. - y_normal) * CONE.radius * 1.15 + 1.,
                epsilon = 1e-4
            ));
        }
    }

    #[test]
    fn spiral_path_point_test() {
        let mut rng = StdRng::seed_from_u64(12345);
        let total = 300;

        for index in 0..total {
            let point = spiral_path_point(&mut rng, index, total, &CONE, 10.);
            assert_within(
                point,
                CONE.radius + 0.5,
                CONE.base_y,
                CONE.base_y + CONE.height,
            );

            // Never further up the string than its own index allows
            assert!(CONE.y_normal_of(point.y) <= index as f32 / total as f32 + 1e-5);
        }

        // A draw of 0 pulls every light back to the start of the string
        let point = spiral_path_point(&mut StepRng::new(0, 0), 150, total, &CONE, 10.);
        assert!(point.abs_diff_eq(Vec3::new(6., TREE_BASE_Y, 0.), 1e-5));
    }

    #[test]
    fn generators_are_deterministic_test() {
        let run = |seed: u64| -> Vec<Vec3> {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut points = Vec::new();
            for index in 0..50 {
                points.push(cone_point(&mut rng, &CONE, ConeFill::Volume));
                points.push(bottom_weighted_cone_point(&mut rng, &CONE).position);
                points.push(layered_ring_point(&mut rng, index, 50, &CONE));
                points.push(spiral_path_point(&mut rng, index, 50, &CONE, 8.));
            }
            points
        };

        assert_eq!(run(99), run(99));
        assert_ne!(run(99), run(100));
    }
}
