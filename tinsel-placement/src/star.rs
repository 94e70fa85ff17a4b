//! This module provides the outline of the star on top of the tree.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

/// The number of points on the star.
pub const STAR_POINTS: usize = 5;

/// Get the outline of a star as alternating outer and inner vertices, going anticlockwise.
///
/// The first vertex is an outer one pointing straight down, so a star rotated by `0.2 * pi`
/// about its axis stands on two legs with one point straight up.
pub fn star_outline(outer_radius: f32, inner_radius: f32) -> [Vec2; STAR_POINTS * 2] {
    std::array::from_fn(|i| {
        let angle = i as f32 * PI / STAR_POINTS as f32 - FRAC_PI_2;
        let r = if i % 2 == 0 {
            outer_radius
        } else {
            inner_radius
        };
        Vec2::new(angle.cos() * r, angle.sin() * r)
    })
}
