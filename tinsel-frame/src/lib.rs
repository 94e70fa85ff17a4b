//! This crate provides the types that describe a single rendered frame of the scene, along with
//! the small amount of spatial vocabulary (poses, cameras, rays) shared by everything that
//! produces or consumes those frames.

mod frame;
mod spatial;

pub use self::{
    frame::{
        FoliageFrame, Instance, InstanceTransform, PointVertex, PolaroidFrame, SceneFrame,
        SnowFrame, StarFrame,
    },
    spatial::{CameraPose, Pose, Ray},
};

/// An RGB colour.
pub type RGBArray = [u8; 3];

/// Convert an RGB colour into a vector with every component in [0, 1].
pub fn rgb_to_vec3(colour: RGBArray) -> glam::Vec3 {
    let [r, g, b] = colour;
    glam::Vec3::new(r as f32, g as f32, b as f32) / 255.
}

/// The named colours used throughout the scene.
pub mod palette {
    use super::RGBArray;

    /// A deep emerald green, `#004d33`.
    pub const EMERALD: RGBArray = [0x00, 0x4d, 0x33];

    /// A bright metallic gold, `#ffd700`.
    pub const GOLD_BRIGHT: RGBArray = [0xff, 0xd7, 0x00];

    /// A darker gold used for card backs and emissive tints, `#b8860b`.
    pub const GOLD_DEEP: RGBArray = [0xb8, 0x86, 0x0b];

    /// A pale gold used for the string lights, `#fff8e1`.
    pub const GOLD_HIGHLIGHT: RGBArray = [0xff, 0xf8, 0xe1];

    /// A rich red for the larger ornaments, `#b22222`.
    pub const RICH_RED: RGBArray = [0xb2, 0x22, 0x22];

    /// A champagne off-white, `#f7e7ce`.
    pub const CHAMPAGNE: RGBArray = [0xf7, 0xe7, 0xce];

    /// Pure white, used for snow.
    pub const WHITE: RGBArray = [0xff, 0xff, 0xff];
}
