//! This module handles things to setup bevy for the viewer.

use crate::{
    meshes::{point_cloud_mesh, star_mesh},
    systems::{colour, Scene},
};
use bevy::{core_pipeline::bloom::BloomSettings, prelude::*, render::render_resource::Face};
use smooth_bevy_cameras::controllers::orbit::{OrbitCameraBundle, OrbitCameraController};
use std::{collections::HashMap, f32::consts::PI};
use tinsel_animators::{BACK_SIZE, CARD_SIZE, PHOTO_OFFSET_Y, PHOTO_SIZE};
use tinsel_frame::{palette, CameraPose, RGBArray};
use tracing::debug;

/// The index of an ornament ball in the scene frame.
#[derive(Component, Clone, Copy, Debug)]
pub(crate) struct OrnamentIndex(pub(crate) usize);

/// The index of a light along the string of lights.
#[derive(Component, Clone, Copy, Debug)]
pub(crate) struct LightIndex(pub(crate) usize);

/// The index of a photo card.
#[derive(Component, Clone, Copy, Debug)]
pub(crate) struct PolaroidIndex(pub(crate) usize);

/// Marks the star.
#[derive(Component, Clone, Copy, Debug)]
pub(crate) struct StarMarker;

/// A mesh that gets rebuilt from the points of the scene frame every frame.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PointCloud {
    /// The needles.
    Foliage,

    /// The snow.
    Snow,
}

/// A photo whose texture coordinates still need to be fitted to the image, once it's loaded.
#[derive(Component, Clone, Debug)]
pub(crate) struct PendingPhoto {
    /// The path of the photo in the asset folder.
    pub(crate) path: String,

    /// The photo.
    pub(crate) image: Handle<Image>,

    /// The mesh that shows the photo.
    pub(crate) mesh: Handle<Mesh>,
}

/// Setup the Bevy world with a camera, a floor, and some light.
pub(super) fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let camera = CameraPose::default();
    let [x, y, z] = camera.position.to_array();

    // Hold LControl to orbit the camera
    commands
        .spawn((
            Camera3dBundle {
                camera: Camera {
                    hdr: true,
                    ..default()
                },
                ..default()
            },
            BloomSettings {
                intensity: 1.2,
                threshold: 0.8,
                ..default()
            },
        ))
        .insert(OrbitCameraBundle::new(
            OrbitCameraController {
                mouse_rotate_sensitivity: Vec2::splat(0.25),
                smoothing_weight: 0.1,
                ..default()
            },
            Vec3::new(x, y, z),
            Vec3::ZERO,
            Vec3::Y,
        ));

    // Floor
    commands.spawn(PbrBundle {
        mesh: meshes.add(Mesh::from(shape::Plane { size: 200. })),
        material: materials.add(StandardMaterial {
            base_color: Color::rgb_u8(0, 0x1a, 0x10),
            perceptual_roughness: 0.9,
            ..default()
        }),
        transform: Transform::from_xyz(0., -10.5, 0.),
        ..default()
    });

    // A warm light above the tree
    commands.spawn(PointLightBundle {
        point_light: PointLight {
            color: Color::rgb_u8(0xff, 0xd7, 0x00),
            intensity: 8000.,
            range: 60.,
            shadows_enabled: false,
            ..default()
        },
        transform: Transform::from_xyz(4., 12., 10.),
        ..default()
    });
}

/// Spawn an entity for every element of the scene.
pub(super) fn spawn_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    scene: Res<Scene>,
) {
    let context = &scene.context;

    debug!("Adding point clouds");
    for cloud in [PointCloud::Foliage, PointCloud::Snow] {
        commands.spawn((
            PbrBundle {
                mesh: meshes.add(point_cloud_mesh(&[], 1.)),
                material: materials.add(StandardMaterial {
                    base_color: Color::WHITE,
                    unlit: true,
                    alpha_mode: AlphaMode::Blend,
                    ..default()
                }),
                visibility: Visibility { is_visible: false },
                ..default()
            },
            cloud,
        ));
    }

    // Ornament balls share a material for each colour
    debug!(count = context.ornaments().balls().len(), "Adding ornaments");
    let ball_mesh = meshes.add(Mesh::from(shape::UVSphere {
        radius: 0.5,
        sectors: 32,
        stacks: 16,
    }));
    let mut ball_materials: HashMap<RGBArray, Handle<StandardMaterial>> = HashMap::new();
    for (index, record) in context.ornaments().balls().iter().enumerate() {
        let material = ball_materials
            .entry(record.colour())
            .or_insert_with(|| {
                materials.add(StandardMaterial {
                    base_color: colour(record.colour()),
                    metallic: 0.8,
                    perceptual_roughness: 0.2,
                    ..default()
                })
            })
            .clone();

        commands.spawn((
            PbrBundle {
                mesh: ball_mesh.clone(),
                material,
                ..default()
            },
            OrnamentIndex(index),
        ));
    }

    debug!(count = context.ornaments().lights().len(), "Adding lights");
    let light_mesh = meshes.add(Mesh::from(shape::UVSphere {
        radius: 0.5,
        sectors: 16,
        stacks: 8,
    }));
    let light_colour = colour(context.config().ornaments.light_colour).as_rgba_linear();
    let light_material = materials.add(StandardMaterial {
        base_color: light_colour,
        emissive: light_colour * 4.,
        ..default()
    });
    for index in 0..context.ornaments().lights().len() {
        commands.spawn((
            PbrBundle {
                mesh: light_mesh.clone(),
                material: light_material.clone(),
                ..default()
            },
            LightIndex(index),
        ));
    }

    debug!("Adding star");
    let star = context.star();
    commands.spawn((
        PbrBundle {
            mesh: meshes.add(star_mesh(&star.outline(), star.depth())),
            material: materials.add(StandardMaterial {
                base_color: colour(context.config().star.colour),
                metallic: 1.,
                perceptual_roughness: 0.1,
                double_sided: true,
                cull_mode: None,
                ..default()
            }),
            transform: Transform::from_scale(Vec3::ZERO),
            ..default()
        },
        StarMarker,
    ));

    debug!(count = context.polaroids().len(), "Adding photos");
    let card_mesh = meshes.add(Mesh::from(shape::Quad::new(Vec2::new(
        CARD_SIZE.x,
        CARD_SIZE.y,
    ))));
    let card_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        perceptual_roughness: 0.8,
        double_sided: true,
        cull_mode: None,
        ..default()
    });
    let back_mesh = meshes.add(Mesh::from(shape::Quad::new(Vec2::new(
        BACK_SIZE.x,
        BACK_SIZE.y,
    ))));
    let back_material = materials.add(StandardMaterial {
        base_color: colour(palette::CHAMPAGNE),
        perceptual_roughness: 0.6,
        cull_mode: Some(Face::Back),
        ..default()
    });

    for (index, record) in context.polaroids().records().iter().enumerate() {
        let image: Handle<Image> = asset_server.load(record.photo());

        // Every photo needs its own mesh, since the texture coordinates depend on the image
        let photo_mesh = meshes.add(Mesh::from(shape::Quad::new(Vec2::new(
            PHOTO_SIZE.x,
            PHOTO_SIZE.y,
        ))));
        let photo_material = materials.add(StandardMaterial {
            base_color_texture: Some(image.clone()),
            unlit: true,
            ..default()
        });

        commands
            .spawn((
                SpatialBundle::default(),
                PolaroidIndex(index),
            ))
            .with_children(|builder| {
                builder.spawn(PbrBundle {
                    mesh: card_mesh.clone(),
                    material: card_material.clone(),
                    ..default()
                });

                builder.spawn((
                    PbrBundle {
                        mesh: photo_mesh.clone(),
                        material: photo_material,
                        transform: Transform::from_xyz(0., PHOTO_OFFSET_Y, 0.005),
                        ..default()
                    },
                    PendingPhoto {
                        path: record.photo().to_string(),
                        image,
                        mesh: photo_mesh,
                    },
                ));

                builder.spawn(PbrBundle {
                    mesh: back_mesh.clone(),
                    material: back_material.clone(),
                    transform: Transform::from_xyz(0., 0., -0.005)
                        .with_rotation(Quat::from_rotation_y(PI)),
                    ..default()
                });
            });
    }

    debug!("Finished adding the scene");
}
