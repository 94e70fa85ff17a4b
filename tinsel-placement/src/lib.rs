//! This crate provides the pure functions that place points in 3D space, both for the scattered
//! "chaos" arrangement and for the tree-shaped "formed" arrangement.
//!
//! Every function that needs randomness takes an `&mut R where R: Rng + ?Sized`, so callers decide
//! where the randomness comes from. Given identical random draws, every function returns
//! identical points.
//!
//! The coordinate system has y pointing up. The tree is a cone standing on the plane
//! `y = base_y` with its apex on the y axis.

mod cone;
mod sphere;
mod star;

pub use self::{
    cone::{
        bottom_weighted_cone_point, cone_point, golden_spiral_point, layered_ring_point,
        polaroid_point, spiral_path_point, Cone, ConeFill, ConeSample, LAYER_COUNT,
    },
    sphere::sphere_point,
    star::{star_outline, STAR_POINTS},
};

use glam::Vec3;

/// The golden angle in radians, `pi * (3 - sqrt(5))`.
///
/// Stepping around a circle by this angle never lines up with a previous step, so points placed
/// this way don't form visible bands.
pub const GOLDEN_ANGLE: f32 = 2.399_963_2;

/// The height of the base of the tree.
pub const TREE_BASE_Y: f32 = -7.5;

/// Get the unit vector pointing horizontally away from `center` towards `position`, tilted
/// slightly upwards so that things facing along it lean back a little.
pub fn outward_normal(position: Vec3, center: Vec3) -> Vec3 {
    let offset = position - center;
    let mut normal = Vec3::new(offset.x, 0., offset.z).normalize_or_zero();
    normal.y = 0.1;
    normal.normalize()
}
