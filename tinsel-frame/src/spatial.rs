//! This module handles poses, cameras, and rays.

use glam::{Mat3, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// A position and orientation in world space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Where the thing is.
    pub position: Vec3,

    /// Which way the thing is facing, as a unit quaternion.
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Pose {
    /// Create a new pose.
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Linearly interpolate the position and spherically interpolate the rotation between `self`
    /// and `other`. A `t` of 0 or less gives exactly `self` and a `t` of 1 or more gives exactly
    /// `other`.
    #[must_use]
    pub fn interpolate(&self, other: &Self, t: f32) -> Self {
        if t <= 0. {
            return *self;
        }
        if t >= 1. {
            return *other;
        }

        Self {
            position: self.position.lerp(other.position, t),
            rotation: self.rotation.slerp(other.rotation, t).normalize(),
        }
    }

    /// Move this pose a fraction `rate` of the way towards `target`.
    pub fn ease_toward(&mut self, target: &Self, rate: f32) {
        *self = self.interpolate(target, rate);
    }
}

/// Where the camera is and which way it's looking.
///
/// The camera looks down its local negative z axis with y up.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// The position of the camera.
    pub position: Vec3,

    /// The orientation of the camera.
    pub rotation: Quat,
}

impl Default for CameraPose {
    /// The camera the scene starts with, slightly above the tree and looking at its centre.
    fn default() -> Self {
        Self::looking_at(Vec3::new(0., 5., 22.), Vec3::ZERO)
    }
}

impl CameraPose {
    /// Create a camera at `position` looking at `target`, with world y as up.
    ///
    /// When looking straight up or down, world z is used as up instead. If `target` is
    /// `position`, the camera looks down negative z.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let forward = (target - position).try_normalize().unwrap_or(Vec3::NEG_Z);
        let right = forward
            .cross(Vec3::Y)
            .try_normalize()
            .unwrap_or_else(|| forward.cross(Vec3::Z).normalize());
        let up = right.cross(forward);

        Self {
            position,
            rotation: Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize(),
        }
    }

    /// The direction the camera is looking in.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// The camera as a [`Pose`].
    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.rotation)
    }
}

/// A half-line in world space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    /// Where the ray starts.
    pub origin: Vec3,

    /// The direction of the ray. Always normalised.
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalising the direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Build the ray through a point on the screen of a perspective camera.
    ///
    /// `ndc` is in normalised device coordinates, so (-1, -1) is the bottom left of the screen and
    /// (1, 1) is the top right. `fov_y` is the vertical field of view in radians.
    pub fn from_camera(camera: &CameraPose, ndc: Vec2, fov_y: f32, aspect_ratio: f32) -> Self {
        let half_height = (fov_y / 2.).tan();
        let local = Vec3::new(ndc.x * half_height * aspect_ratio, ndc.y * half_height, -1.);
        Self::new(camera.position, camera.rotation * local)
    }

    /// The point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Intersect this ray with a rectangle centred on `center`, lying in the local xy plane of
    /// `rotation`, and return the distance along the ray to the hit point.
    ///
    /// Both faces of the rectangle count. `half_extents` is half the width and height.
    pub fn intersect_rectangle(
        &self,
        center: Vec3,
        rotation: Quat,
        half_extents: Vec2,
    ) -> Option<f32> {
        let normal = rotation * Vec3::Z;
        let denominator = self.direction.dot(normal);
        if denominator.abs() < 1e-6 {
            return None;
        }

        let t = (center - self.origin).dot(normal) / denominator;
        if t < 0. {
            return None;
        }

        let local = rotation.inverse() * (self.at(t) - center);
        (local.x.abs() <= half_extents.x && local.y.abs() <= half_extents.y).then_some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn pose_interpolate_endpoints_test() {
        let a = Pose::new(Vec3::new(1., 2., 3.), Quat::IDENTITY);
        let b = Pose::new(Vec3::new(-4., 0., 8.), Quat::from_rotation_y(FRAC_PI_2));

        let start = a.interpolate(&b, 0.);
        let end = a.interpolate(&b, 1.);

        assert!(start.position.abs_diff_eq(a.position, 1e-6));
        assert!(start.rotation.abs_diff_eq(a.rotation, 1e-6));
        assert!(end.position.abs_diff_eq(b.position, 1e-6));
        assert!(end.rotation.abs_diff_eq(b.rotation, 1e-6));

        let middle = a.interpolate(&b, 0.5);
        assert!(middle.position.abs_diff_eq(Vec3::new(-1.5, 1., 5.5), 1e-6));
        assert!(approx_eq!(
            f32,
            middle.rotation.angle_between(Quat::IDENTITY),
            FRAC_PI_2 / 2.,
            epsilon = 1e-4
        ));
    }

    #[test]
    fn camera_looking_at_test() {
        let camera = CameraPose::looking_at(Vec3::new(0., 0., 10.), Vec3::ZERO);
        assert!(camera.forward().abs_diff_eq(Vec3::NEG_Z, 1e-6));

        let camera = CameraPose::looking_at(Vec3::new(10., 0., 0.), Vec3::ZERO);
        assert!(camera.forward().abs_diff_eq(Vec3::NEG_X, 1e-6));
    }

    #[test]
    fn camera_looking_straight_down_test() {
        let camera = CameraPose::looking_at(Vec3::new(0., 10., 0.), Vec3::ZERO);
        assert!(camera.rotation.is_finite());
        assert!(camera.rotation.is_normalized());
        assert!(camera.forward().abs_diff_eq(Vec3::NEG_Y, 1e-5));

        let camera = CameraPose::looking_at(Vec3::new(0., -3., 0.), Vec3::ZERO);
        assert!(camera.rotation.is_finite());
        assert!(camera.forward().abs_diff_eq(Vec3::Y, 1e-5));

        // Nowhere to look, so it looks down negative z
        let camera = CameraPose::looking_at(Vec3::ONE, Vec3::ONE);
        assert!(camera.forward().abs_diff_eq(Vec3::NEG_Z, 1e-6));
    }

    #[test]
    fn ray_from_camera_centre_follows_forward_test() {
        let camera = CameraPose::default();
        let ray = Ray::from_camera(&camera, Vec2::ZERO, 1.0, 16. / 9.);
        assert!(ray.direction.abs_diff_eq(camera.forward(), 1e-6));
        assert_eq!(ray.origin, camera.position);
    }

    #[test]
    fn ray_rectangle_intersection_test() {
        let ray = Ray::new(Vec3::new(0., 0., 10.), Vec3::NEG_Z);

        let hit = ray.intersect_rectangle(Vec3::ZERO, Quat::IDENTITY, Vec2::new(1., 1.));
        assert!(approx_eq!(f32, hit.unwrap(), 10., ulps = 2));

        // Just off to the side
        let miss = ray.intersect_rectangle(Vec3::new(1.5, 0., 0.), Quat::IDENTITY, Vec2::ONE);
        assert_eq!(miss, None);

        // Behind the ray
        let behind = ray.intersect_rectangle(Vec3::new(0., 0., 20.), Quat::IDENTITY, Vec2::ONE);
        assert_eq!(behind, None);

        // Edge-on
        let edge_on = ray.intersect_rectangle(
            Vec3::ZERO,
            Quat::from_rotation_y(FRAC_PI_2),
            Vec2::ONE,
        );
        assert_eq!(edge_on, None);
    }
}
