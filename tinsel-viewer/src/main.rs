//! This crate provides a window that renders the Tinsel scene with Bevy.
//!
//! The scene itself knows nothing about Bevy. Every frame, [`systems::advance_scene`] asks it for
//! a [`SceneFrame`](tinsel_frame::SceneFrame) and the other systems copy that frame onto the
//! entities spawned by [`bevy_setup`].

mod bevy_setup;
mod gestures;
mod meshes;
mod systems;

use self::{
    bevy_setup::{setup, spawn_scene},
    systems::{
        advance_scene, fit_photo_textures, handle_input, update_lights, update_ornaments,
        update_point_clouds, update_polaroids, update_star, AdvanceScene, Scene,
    },
};
use bevy::{log::LogPlugin, prelude::*, DefaultPlugins};
use clap::Parser;
use color_eyre::Result;
use smooth_bevy_cameras::{controllers::orbit::OrbitCameraPlugin, LookTransformPlugin};
use std::{path::PathBuf, process};
use tinsel_scene::{snow_channel, SceneConfig, SceneContext};
use tracing::{info, instrument, warn, Level};

/// Show the Tinsel scene in a window.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// The config file for the scene. A default one is written here if it doesn't exist.
    #[arg(default_value = "tinsel.ron")]
    config: PathBuf,

    /// The directory that the photo paths in the config are relative to.
    #[arg(long, default_value = "assets")]
    assets: String,

    /// Watch the camera and turn the snow on while an open palm is held up to it.
    #[cfg(feature = "webcam")]
    #[arg(long)]
    webcam: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt().with_max_level(Level::WARN).init();

    let args = Args::parse();
    let config = SceneConfig::from_file(&args.config);

    let (snow_switch, snow_signal) = snow_channel();

    // Kept alive until the process exits
    #[cfg(feature = "webcam")]
    let _gesture_detection = args.webcam.then(|| {
        gestures::start_gesture_detection(
            tinsel_gesture::WebcamSource::open,
            snow_switch.clone(),
        )
    });

    let scene = Scene {
        context: SceneContext::mount(config, snow_signal),
        snow_switch,
        last_frame: None,
    };

    run_viewer(scene, args.assets);
    Ok(())
}

/// Run the viewer with Bevy.
#[instrument(skip(scene))]
fn run_viewer(scene: Scene, asset_folder: String) {
    // Logging is handled by our own subscriber rather than Bevy's
    info!(seed = scene.context.seed(), "Starting bevy app");
    App::new()
        .insert_resource(Msaa { samples: 4 })
        .insert_resource(ClearColor(Color::rgb_u8(0, 0x0a, 0x06)))
        .insert_resource(AmbientLight {
            color: Color::rgb_u8(0xf7, 0xe7, 0xce),
            brightness: 0.3,
        })
        .insert_resource(scene)
        .add_plugins(
            DefaultPlugins
                .build()
                .disable::<LogPlugin>()
                .set(WindowPlugin {
                    window: WindowDescriptor {
                        title: "Tinsel".to_string(),
                        ..default()
                    },
                    ..default()
                })
                .set(AssetPlugin {
                    asset_folder,
                    ..default()
                }),
        )
        .add_plugin(LookTransformPlugin)
        .add_plugin(OrbitCameraPlugin::default())
        .add_startup_system(setup)
        .add_startup_system(spawn_scene)
        .add_system(handle_input.before(AdvanceScene))
        .add_system(advance_scene.label(AdvanceScene))
        .add_system(update_ornaments.after(AdvanceScene))
        .add_system(update_lights.after(AdvanceScene))
        .add_system(update_star.after(AdvanceScene))
        .add_system(update_polaroids.after(AdvanceScene))
        .add_system(update_point_clouds.after(AdvanceScene))
        .add_system(fit_photo_textures)
        .run();

    // Winit terminates the program after the event loop ends, so we should never get here
    warn!(concat!(
        "Winit should terminate the program when the eventloop ends, but it hasn't. ",
        "Now terminating the program."
    ));
    process::exit(255);
}
