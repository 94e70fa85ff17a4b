//! This module handles the frame data itself.

use crate::{Pose, RGBArray};
use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The transform of one instance in a batched mesh.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstanceTransform {
    /// The position of the instance.
    pub translation: Vec3,

    /// The orientation of the instance.
    pub rotation: Quat,

    /// The uniform scale of the instance.
    pub scale: f32,
}

impl InstanceTransform {
    /// Create a transform from a pose and a uniform scale.
    pub fn from_pose(pose: Pose, scale: f32) -> Self {
        Self {
            translation: pose.position,
            rotation: pose.rotation,
            scale,
        }
    }

    /// The pose part of this transform.
    pub fn pose(&self) -> Pose {
        Pose::new(self.translation, self.rotation)
    }

    /// Compose the transform into a single matrix, applying scale, then rotation, then
    /// translation.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.rotation,
            self.translation,
        )
    }
}

/// A single instance in a batched mesh: a transform and a colour.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    /// Where the instance is.
    pub transform: InstanceTransform,

    /// What colour it is.
    pub colour: RGBArray,
}

/// A single point in a point cloud, after the per-vertex animation has been applied.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointVertex {
    /// The final world position of the point.
    pub position: Vec3,

    /// The size of the point before perspective scaling.
    pub size: f32,

    /// The linear colour of the point, with each component in [0, 1].
    pub colour: Vec3,

    /// The opacity of the point in [0, 1].
    pub opacity: f32,
}

/// The foliage point cloud for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FoliageFrame {
    /// The progress value used by the foliage this frame. This lags slightly behind the scene
    /// progress because the foliage eases towards it.
    pub progress: f32,

    /// The animated points.
    pub vertices: Vec<PointVertex>,
}

/// The star at the top of the tree for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarFrame {
    /// Where the star is and how big it is.
    pub transform: InstanceTransform,

    /// The colour of the star.
    pub colour: RGBArray,

    /// How strongly the star glows.
    pub emissive_intensity: f32,
}

/// A single photo card for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolaroidFrame {
    /// The transform of the card, not including the flip.
    pub transform: InstanceTransform,

    /// The extra rotation about the card's own vertical axis, in radians. 0 shows the photo and
    /// pi shows the back of the card.
    pub flip_angle: f32,

    /// Whether this card is the selected one.
    pub selected: bool,
}

impl PolaroidFrame {
    /// The full rotation of the card, including the flip.
    pub fn flipped_rotation(&self) -> Quat {
        self.transform.rotation * Quat::from_rotation_y(self.flip_angle)
    }
}

/// The snow for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnowFrame {
    /// The global opacity of the snow in [0, 1].
    pub opacity: f32,

    /// The colour of every flake.
    pub colour: RGBArray,

    /// The animated flakes.
    pub flakes: Vec<PointVertex>,
}

/// Everything needed to draw one frame of the scene.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFrame {
    /// The scene progress for this frame. 0 is chaos and 1 is formed.
    pub progress: f32,

    /// The star.
    pub star: StarFrame,

    /// The foliage point cloud.
    pub foliage: FoliageFrame,

    /// The ornament balls, as one instance batch.
    pub ornaments: Vec<Instance>,

    /// The string lights, as one instance batch.
    pub lights: Vec<Instance>,

    /// The photo cards, in the same order as the photo resources.
    pub polaroids: Vec<PolaroidFrame>,

    /// The snow.
    pub snow: SnowFrame,
}

impl fmt::Debug for SceneFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneFrame")
            .field("progress", &self.progress)
            .field("star", &self.star)
            .field("foliage_points", &self.foliage.vertices.len())
            .field("ornaments", &self.ornaments.len())
            .field("lights", &self.lights.len())
            .field("polaroids", &self.polaroids.len())
            .field("snow_opacity", &self.snow.opacity)
            .field("snow_flakes", &self.snow.flakes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn to_matrix_test() {
        let transform = InstanceTransform {
            translation: Vec3::new(1., -2., 3.),
            rotation: Quat::from_rotation_y(PI / 2.),
            scale: 2.,
        };
        let matrix = transform.to_matrix();

        // The unit x vector gets scaled to length 2, rotated to -z, then moved
        let transformed = matrix.transform_point3(Vec3::X);
        assert!(transformed.abs_diff_eq(Vec3::new(1., -2., 1.), 1e-5));

        let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
        assert!(scale.abs_diff_eq(Vec3::splat(2.), 1e-5));
        assert!(rotation.abs_diff_eq(transform.rotation, 1e-5));
        assert!(translation.abs_diff_eq(transform.translation, 1e-5));
    }

    #[test]
    fn flipped_rotation_test() {
        let card = PolaroidFrame {
            transform: InstanceTransform::from_pose(Pose::default(), 1.),
            flip_angle: PI,
            selected: true,
        };

        // A flipped card faces the other way
        let facing = card.flipped_rotation() * Vec3::Z;
        assert!(facing.abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }
}
