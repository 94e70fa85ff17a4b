//! This module contains the [`Polaroids`] animator, which owns the photo cards hanging around the
//! tree and the state of the card that the user has picked out.

use super::prelude::*;
use tinsel_frame::{PolaroidFrame, Ray};
use tinsel_placement::{outward_normal, polaroid_point};

/// The size of the white card.
pub const CARD_SIZE: Vec2 = Vec2::new(1.3, 1.75);

/// The size of the photo on the front of the card.
pub const PHOTO_SIZE: Vec2 = Vec2::new(1.05, 1.15);

/// How far above the centre of the card the photo sits.
pub const PHOTO_OFFSET_Y: f32 = 0.15;

/// The size of the gold panel on the back of the card.
pub const BACK_SIZE: Vec2 = Vec2::new(1.2, 1.5);

/// The texture coordinates needed to show an image in the photo window without stretching it.
///
/// The image is scaled to cover the window and centre-cropped along whichever axis is too long.
/// Texture coordinates should run from `offset` to `offset + repeat` on each axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextureFit {
    /// The fraction of the image shown along each axis.
    pub repeat: Vec2,

    /// Where the visible part of the image starts along each axis.
    pub offset: Vec2,
}

impl Default for TextureFit {
    fn default() -> Self {
        Self {
            repeat: Vec2::ONE,
            offset: Vec2::ZERO,
        }
    }
}

/// Work out how to crop an image of the given dimensions to fit the photo window.
pub fn texture_fit(width: u32, height: u32) -> TextureFit {
    if width == 0 || height == 0 {
        return TextureFit::default();
    }

    let image_aspect = width as f32 / height as f32;
    let frame_aspect = PHOTO_SIZE.x / PHOTO_SIZE.y;

    if image_aspect > frame_aspect {
        // Too wide, so crop the sides
        let repeat = frame_aspect / image_aspect;
        TextureFit {
            repeat: Vec2::new(repeat, 1.),
            offset: Vec2::new((1. - repeat) / 2., 0.),
        }
    } else {
        // Too tall, so crop the top and bottom
        let repeat = image_aspect / frame_aspect;
        TextureFit {
            repeat: Vec2::new(1., repeat),
            offset: Vec2::new(0., (1. - repeat) / 2.),
        }
    }
}

/// The config for the [`Polaroids`] animator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolaroidsConfig {
    /// The paths of the photos, one card each. The order decides where each card hangs.
    pub photos: Vec<String>,

    /// The height of the band the cards are placed in, as a fraction of the tree height.
    pub height_factor: f32,

    /// The radius the cards scatter to in the chaos state, as a fraction of the tree radius.
    pub chaos_radius_factor: f32,

    /// The radius the cards hang at in the formed state, as a fraction of the tree radius.
    pub formed_radius_factor: f32,

    /// The scale of a card that isn't selected.
    pub rest_scale: f32,

    /// The scale of the selected card.
    pub selected_scale: f32,

    /// How far in front of the camera the selected card floats.
    pub focus_distance: f32,

    /// The fraction of the remaining distance the selected card covers each frame.
    pub focus_rate: f32,

    /// How fast cards flip over, per second.
    pub flip_rate: f32,
}

impl Default for PolaroidsConfig {
    fn default() -> Self {
        let photos = (245..=261)
            .map(|number| {
                let extension = if number == 259 { "png" } else { "jpg" };
                format!("pictures/{number}_16.{extension}")
            })
            .collect();

        Self {
            photos,
            height_factor: 0.8,
            chaos_radius_factor: 1.3,
            formed_radius_factor: 1.02,
            rest_scale: 0.85,
            selected_scale: 1.6,
            focus_distance: 4.,
            focus_rate: 0.1,
            flip_rate: 6.,
        }
    }
}

/// The fixed arrangements of a single photo card.
#[derive(Clone, Debug, PartialEq)]
pub struct PolaroidRecord {
    /// The path of the photo on the front.
    photo: String,

    /// Where the card is in the chaos state.
    chaos: Pose,

    /// Where the card hangs in the formed state, facing out from the tree.
    formed: Pose,
}

impl PolaroidRecord {
    /// The path of the photo on the front.
    pub fn photo(&self) -> &str {
        &self.photo
    }

    /// Where the card is in the chaos state.
    pub fn chaos(&self) -> Pose {
        self.chaos
    }

    /// Where the card hangs in the formed state.
    pub fn formed(&self) -> Pose {
        self.formed
    }

    /// Get the pose of the card for the given global progress, if it's not selected.
    pub fn pose_at(&self, progress: f32) -> Pose {
        self.chaos
            .interpolate(&self.formed, smoothstep(progress, 0., 1.))
    }
}

/// The state of a single card as seen by the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardState {
    /// Hanging on the tree with everything else.
    Unselected,

    /// Floating in front of the camera.
    Selected {
        /// Whether the card is showing its back.
        flipped: bool,
    },
}

/// The currently selected card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Selection {
    /// The index of the card.
    index: usize,

    /// Whether the card is showing its back.
    flipped: bool,
}

/// The photo cards around the tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Polaroids {
    /// The config of the cards.
    config: PolaroidsConfig,

    /// The fixed arrangements of every card.
    records: Vec<PolaroidRecord>,

    /// Where every card was put in the last frame.
    current: Vec<Pose>,

    /// The flip angle of every card from the last frame.
    flip_angles: Vec<f32>,

    /// The selected card, if there is one.
    selection: Option<Selection>,
}

impl Polaroids {
    /// The fixed arrangements of every card.
    pub fn records(&self) -> &[PolaroidRecord] {
        &self.records
    }

    /// The number of cards.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no cards at all.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The index of the selected card, if there is one.
    pub fn selected(&self) -> Option<usize> {
        self.selection.map(|selection| selection.index)
    }

    /// The state of the given card.
    pub fn card_state(&self, index: usize) -> CardState {
        match self.selection {
            Some(Selection { index: i, flipped }) if i == index => CardState::Selected { flipped },
            _ => CardState::Unselected,
        }
    }

    /// Where the given card was put in the last frame.
    pub fn current_pose(&self, index: usize) -> Option<Pose> {
        self.current.get(index).copied()
    }

    /// The scale of the given card.
    pub fn card_scale(&self, index: usize) -> f32 {
        if self.selected() == Some(index) {
            self.config.selected_scale
        } else {
            self.config.rest_scale
        }
    }

    /// Select the given card, deselecting any other card and resetting its flip.
    ///
    /// Selecting the card that's already selected does nothing. Returns false if there's no card
    /// with that index.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.records.len() {
            return false;
        }

        if self.selected() != Some(index) {
            if let Some(previous) = self.selected() {
                debug!(previous, "Deselecting card");
            }
            self.selection = Some(Selection {
                index,
                flipped: false,
            });
            debug!(index, photo = self.records[index].photo(), "Selected card");
        }
        true
    }

    /// React to the user clicking on the given card.
    ///
    /// Clicking an unselected card selects it, and clicking the selected card flips it over.
    /// Returns false if there's no card with that index.
    pub fn interact(&mut self, index: usize) -> bool {
        if self.selected() != Some(index) {
            return self.select(index);
        }

        if let Some(selection) = &mut self.selection {
            selection.flipped = !selection.flipped;
            debug!(index, flipped = selection.flipped, "Flipped card");
        }
        true
    }

    /// Put the selected card back on the tree.
    pub fn deselect(&mut self) {
        if let Some(Selection { index, .. }) = self.selection.take() {
            debug!(index, "Deselected card");
        }
    }

    /// Find the nearest card hit by the ray, using where the cards were put in the last frame.
    pub fn pick(&self, ray: &Ray) -> Option<usize> {
        self.current
            .iter()
            .zip(&self.flip_angles)
            .enumerate()
            .filter_map(|(index, (pose, &flip_angle))| {
                let half_extents = CARD_SIZE * self.card_scale(index) / 2.;
                let rotation = pose.rotation * Quat::from_rotation_y(flip_angle);
                ray.intersect_rectangle(pose.position, rotation, half_extents)
                    .map(|distance| (index, distance))
            })
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(index, _)| index)
    }
}

impl Animator for Polaroids {
    type Config = PolaroidsConfig;
    type Frame = Vec<PolaroidFrame>;

    fn animator_name() -> &'static str {
        "Polaroids"
    }

    #[instrument(skip_all, fields(count = config.photos.len()))]
    fn mount<R: Rng + ?Sized>(config: &PolaroidsConfig, tree: &TreeShape, rng: &mut R) -> Self {
        let band = tree.cone().scale_height(config.height_factor);
        let chaos_cone = band.scale_radius(config.chaos_radius_factor);
        let formed_cone = band.scale_radius(config.formed_radius_factor);
        let total = config.photos.len();

        let records: Vec<PolaroidRecord> = config
            .photos
            .iter()
            .enumerate()
            .map(|(index, photo)| {
                let chaos_position = polaroid_point(index, total, &chaos_cone);
                let formed_position = polaroid_point(index, total, &formed_cone);

                let normal = outward_normal(
                    formed_position,
                    Vec3::new(0., formed_position.y, 0.),
                );
                let formed_rotation = Quat::from_rotation_y(normal.x.atan2(normal.z));

                let chaos_rotation = Quat::from_euler(
                    EulerRot::XYZ,
                    (rng.gen::<f32>() - 0.5) * PI,
                    (rng.gen::<f32>() - 0.5) * PI,
                    (rng.gen::<f32>() - 0.5) * 0.2,
                );

                PolaroidRecord {
                    photo: photo.clone(),
                    chaos: Pose::new(chaos_position, chaos_rotation),
                    formed: Pose::new(formed_position, formed_rotation),
                }
            })
            .collect();

        debug!("Mounted polaroids");

        Self {
            config: config.clone(),
            current: records.iter().map(PolaroidRecord::chaos).collect(),
            flip_angles: vec![0.; records.len()],
            records,
            selection: None,
        }
    }

    fn next_frame(&mut self, ctx: &FrameContext) -> Vec<PolaroidFrame> {
        let focus = Pose::new(
            ctx.camera.position + ctx.camera.forward() * self.config.focus_distance,
            ctx.camera.rotation,
        );
        let flip_factor = per_frame_factor(self.config.flip_rate, ctx.delta);

        let mut frames = Vec::with_capacity(self.records.len());
        for (index, record) in self.records.iter().enumerate() {
            let state = self.card_state(index);

            let pose = &mut self.current[index];
            match state {
                CardState::Selected { .. } => pose.ease_toward(&focus, self.config.focus_rate),
                CardState::Unselected => *pose = record.pose_at(ctx.progress),
            }

            let flip_target = match state {
                CardState::Selected { flipped: true } => PI,
                _ => 0.,
            };
            let flip_angle = &mut self.flip_angles[index];
            *flip_angle += (flip_target - *flip_angle) * flip_factor;

            let scale = match state {
                CardState::Selected { .. } => self.config.selected_scale,
                CardState::Unselected => self.config.rest_scale,
            };

            frames.push(PolaroidFrame {
                transform: InstanceTransform::from_pose(*pose, scale),
                flip_angle: *flip_angle,
                selected: matches!(state, CardState::Selected { .. }),
            });
        }

        frames
    }
}
