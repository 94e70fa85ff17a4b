//! This module contains the Bevy systems that drive the scene and copy each frame onto the
//! entities.

use crate::{
    bevy_setup::{
        LightIndex, OrnamentIndex, PendingPhoto, PointCloud, PolaroidIndex, StarMarker,
    },
    meshes::{apply_texture_fit, point_cloud_mesh},
};
use bevy::{asset::LoadState, prelude::*};
use tinsel_animators::texture_fit;
use tinsel_frame::{rgb_to_vec3, CameraPose, InstanceTransform, RGBArray, Ray, SceneFrame};
use tinsel_scene::{FrameInput, SceneContext, SnowSwitch};
use tracing::{debug, instrument, trace, warn};

/// The radius of a needle for every unit of point size.
const FOLIAGE_RADIUS_PER_SIZE: f32 = 0.05;

/// The radius of a snowflake for every unit of point size.
const SNOW_RADIUS_PER_SIZE: f32 = 0.12;

/// The scene and the most recent frame it produced.
#[derive(Resource)]
pub(crate) struct Scene {
    /// The scene.
    pub(crate) context: SceneContext,

    /// The writing end of the snow signal.
    pub(crate) snow_switch: SnowSwitch,

    /// The frame produced by [`advance_scene`] this update.
    pub(crate) last_frame: Option<SceneFrame>,
}

/// A label for [`advance_scene`] so that input can come before it and rendering after it.
#[derive(SystemLabel, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct AdvanceScene;

/// Convert one of our colours to a Bevy colour.
pub(crate) fn colour(colour: RGBArray) -> Color {
    let [r, g, b] = colour;
    Color::rgb_u8(r, g, b)
}

/// Convert one of our transforms to a Bevy transform.
fn to_transform(transform: &InstanceTransform) -> Transform {
    Transform {
        translation: Vec3::from_array(transform.translation.to_array()),
        rotation: Quat::from_array(transform.rotation.to_array()),
        scale: Vec3::splat(transform.scale),
    }
}

/// Convert the transform of the Bevy camera to a [`CameraPose`].
fn camera_pose(transform: &GlobalTransform) -> CameraPose {
    let (_, rotation, translation) = transform.to_scale_rotation_translation();
    CameraPose {
        position: glam::Vec3::from_array(translation.to_array()),
        rotation: glam::Quat::from_array(rotation.to_array()),
    }
}

/// Space toggles the tree, `S` toggles the snow, and a left click picks a photo or the
/// background.
pub(crate) fn handle_input(
    keys: Res<Input<KeyCode>>,
    mouse_buttons: Res<Input<MouseButton>>,
    windows: Res<Windows>,
    camera: Query<(&GlobalTransform, &Projection), With<Camera3d>>,
    mut scene: ResMut<Scene>,
) {
    if keys.just_pressed(KeyCode::Space) {
        scene.context.toggle();
    }

    if keys.just_pressed(KeyCode::S) {
        scene.snow_switch.toggle();
        debug!(active = scene.snow_switch.is_active(), "Toggled snow");
    }

    if !mouse_buttons.just_pressed(MouseButton::Left) {
        return;
    }

    let Some(window) = windows.get_primary() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((transform, Projection::Perspective(projection))) = camera.get_single() else {
        return;
    };

    // The cursor position starts at the bottom left of the window
    let ndc = glam::Vec2::new(
        cursor.x / window.width() * 2. - 1.,
        cursor.y / window.height() * 2. - 1.,
    );
    let ray = Ray::from_camera(
        &camera_pose(transform),
        ndc,
        projection.fov,
        window.width() / window.height(),
    );

    let target = scene.context.pick(&ray);
    scene.context.pointer(target);
}

/// Advance the scene by one frame.
#[instrument(skip_all)]
pub(crate) fn advance_scene(
    time: Res<Time>,
    camera: Query<&GlobalTransform, With<Camera3d>>,
    mut scene: ResMut<Scene>,
) {
    let input = FrameInput {
        delta: time.delta_seconds(),
        camera: camera.get_single().map(camera_pose).unwrap_or_default(),
    };

    let frame = scene.context.frame_update(input);
    trace!(progress = frame.progress);
    scene.last_frame = Some(frame);
}

/// Move the ornament balls.
pub(crate) fn update_ornaments(
    scene: Res<Scene>,
    mut query: Query<(&OrnamentIndex, &mut Transform)>,
) {
    let Some(frame) = &scene.last_frame else {
        return;
    };

    for (&OrnamentIndex(index), mut transform) in query.iter_mut() {
        if let Some(instance) = frame.ornaments.get(index) {
            *transform = to_transform(&instance.transform);
        }
    }
}

/// Move the string lights.
pub(crate) fn update_lights(scene: Res<Scene>, mut query: Query<(&LightIndex, &mut Transform)>) {
    let Some(frame) = &scene.last_frame else {
        return;
    };

    for (&LightIndex(index), mut transform) in query.iter_mut() {
        if let Some(instance) = frame.lights.get(index) {
            *transform = to_transform(&instance.transform);
        }
    }
}

/// Grow the star and make it glow.
pub(crate) fn update_star(
    scene: Res<Scene>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut query: Query<(&Handle<StandardMaterial>, &mut Transform), With<StarMarker>>,
) {
    let Some(frame) = &scene.last_frame else {
        return;
    };

    let [r, g, b] = (rgb_to_vec3(frame.star.colour) * frame.star.emissive_intensity).to_array();
    for (handle, mut transform) in query.iter_mut() {
        *transform = to_transform(&frame.star.transform);
        if let Some(material) = materials.get_mut(handle) {
            material.emissive = Color::rgb_linear(r, g, b);
        }
    }
}

/// Move and flip the photo cards.
pub(crate) fn update_polaroids(
    scene: Res<Scene>,
    mut query: Query<(&PolaroidIndex, &mut Transform)>,
) {
    let Some(frame) = &scene.last_frame else {
        return;
    };

    for (&PolaroidIndex(index), mut transform) in query.iter_mut() {
        if let Some(card) = frame.polaroids.get(index) {
            *transform = to_transform(&card.transform)
                .with_rotation(Quat::from_array(card.flipped_rotation().to_array()));
        }
    }
}

/// Rebuild the foliage and snow meshes. The snow is hidden once it's faded out completely.
pub(crate) fn update_point_clouds(
    scene: Res<Scene>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut query: Query<(&PointCloud, &Handle<Mesh>, &mut Visibility)>,
) {
    let Some(frame) = &scene.last_frame else {
        return;
    };

    for (cloud, handle, mut visibility) in query.iter_mut() {
        let (points, radius_per_size) = match cloud {
            PointCloud::Foliage => (&frame.foliage.vertices, FOLIAGE_RADIUS_PER_SIZE),
            PointCloud::Snow => (&frame.snow.flakes, SNOW_RADIUS_PER_SIZE),
        };

        let visible = !points.is_empty() && (*cloud != PointCloud::Snow || frame.snow.opacity > 0.);
        visibility.is_visible = visible;

        if visible {
            if let Some(mesh) = meshes.get_mut(handle) {
                *mesh = point_cloud_mesh(points, radius_per_size);
            }
        }
    }
}

/// Crop each photo to fit its window once the image has loaded. Photos that fail to load leave a
/// blank card.
pub(crate) fn fit_photo_textures(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    images: Res<Assets<Image>>,
    mut meshes: ResMut<Assets<Mesh>>,
    query: Query<(Entity, &PendingPhoto)>,
) {
    for (entity, pending) in &query {
        match asset_server.get_load_state(&pending.image) {
            LoadState::Loaded => {
                let Some(image) = images.get(&pending.image) else {
                    continue;
                };

                let size = image.size();
                let fit = texture_fit(size.x as u32, size.y as u32);
                if let Some(mesh) = meshes.get_mut(&pending.mesh) {
                    apply_texture_fit(mesh, fit);
                }

                debug!(path = %pending.path, ?fit, "Fitted photo");
                commands.entity(entity).remove::<PendingPhoto>();
            }
            LoadState::Failed => {
                warn!(path = %pending.path, "Couldn't load photo");
                commands.entity(entity).remove::<PendingPhoto>();
            }
            _ => {}
        }
    }
}
