//! This module contains the commands that the user can type, and the [`Console`] that runs them.

use std::{
    io::{self, Write},
    ops::RangeInclusive,
    path::PathBuf,
};
use tinsel_animators::CardState;
use tinsel_frame::{CameraPose, Instance, SceneFrame};
use tinsel_gesture::{is_open_palm, Gesture, GestureCategory};
use tinsel_scene::{FrameInput, PointerTarget, SceneContext, SnowSwitch};
use tracing::{debug, instrument};

/// The help text shown by the `help` command and at startup.
pub const HELP_TEXT: &str = r#"Use the following commands to drive the scene:

    help  -  Show this help text
    ?     -  Same as help

    toggle      -  Switch the tree between chaos and formed
    state       -  Show the state of the tree and the progress

    tick          -  Run one frame
    tick 120      -  Run 120 frames
    tick 10 0.5   -  Run 10 frames of half a second each

    select 4     -  Click on photo 4. Clicking the selected photo flips it over
    background   -  Click on the background, which puts the selected photo back

    snow on      -  Turn the snow on
    snow off     -  Turn the snow off
    palm 0.8     -  Pretend the camera saw an open palm with the given score

    show progress         -  Show the progress
    show star             -  Show the star from the last frame
    show snow             -  Show the snow from the last frame
    show photos           -  Show every photo card
    show ornaments        -  Show every ornament from the last frame
    show ornaments 10:20  -  Show ornaments 10 to 20 (inclusive) from the last frame
    show lights 5         -  Show light 5 from the last frame

    seed  -  Show the seed that the scene was created with

    save             -  Save the config, including the seed, back to its file
    save "filename"  -  Save the config, including the seed, to a given file

Use Ctrl+D with an empty prompt to quit."#;

/// The frame time used by `tick` when none is given.
const DEFAULT_DELTA: f32 = 1. / 60.;

/// What to show with the `show` command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShowTarget {
    /// The progress and its target.
    Progress,

    /// The star.
    Star,

    /// The snow.
    Snow,

    /// The photo cards.
    Photos,

    /// All the ornaments, or a range of them.
    Ornaments(Option<RangeInclusive<usize>>),

    /// All the lights, or a range of them.
    Lights(Option<RangeInclusive<usize>>),
}

/// A user-given command.
#[derive(Clone, Debug, PartialEq)]
pub enum Command<'s> {
    /// Show available commands.
    Help,

    /// Switch between chaos and formed.
    Toggle,

    /// Show the state and progress.
    State,

    /// Run some frames, optionally with a given frame time in seconds.
    Tick {
        /// The number of frames to run.
        frames: u32,

        /// The length of each frame in seconds.
        delta: Option<f32>,
    },

    /// Click on a photo card.
    Select(usize),

    /// Click on the background.
    Background,

    /// Turn the snow on or off.
    Snow(bool),

    /// Feed an open palm with the given score through the gesture logic.
    Palm(f32),

    /// Show part of the scene.
    Show(ShowTarget),

    /// Show the seed.
    Seed,

    /// Save the config back to the file it was loaded from, or a new one.
    Save(Option<&'s str>),
}

/// The scene and everything needed to drive it from the command line.
#[derive(Debug)]
pub struct Console {
    /// The scene.
    scene: SceneContext,

    /// The writing end of the snow signal.
    snow_switch: SnowSwitch,

    /// The file that the config was loaded from.
    config_path: PathBuf,

    /// The most recent frame, if any frames have been run.
    last_frame: Option<SceneFrame>,
}

impl Console {
    /// Create a new console to drive the given scene.
    pub fn new(scene: SceneContext, snow_switch: SnowSwitch, config_path: PathBuf) -> Self {
        Self {
            scene,
            snow_switch,
            config_path,
            last_frame: None,
        }
    }

    /// Run the command and write its output.
    #[instrument(skip(self, out))]
    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> io::Result<()> {
        match command {
            Command::Help => writeln!(out, "{HELP_TEXT}")?,
            Command::Toggle => {
                let state = self.scene.toggle();
                writeln!(out, "The tree is now {state}")?;
            }
            Command::State => {
                let settled = if self.scene.is_settled() {
                    "settled"
                } else {
                    "moving"
                };
                writeln!(
                    out,
                    "The tree is {} with progress {:.4} ({settled}) after {} frames",
                    self.scene.state(),
                    self.scene.progress(),
                    self.scene.frame_count()
                )?;
            }
            Command::Tick { frames, delta } => {
                let input = FrameInput {
                    delta: delta.unwrap_or(DEFAULT_DELTA),
                    camera: CameraPose::default(),
                };
                for _ in 0..frames {
                    self.last_frame = Some(self.scene.frame_update(input));
                }
                debug!(frames, "Ran frames");
                writeln!(
                    out,
                    "Ran {frames} frames, progress is now {:.4}",
                    self.scene.progress()
                )?;
            }
            Command::Select(idx) => {
                let count = self.scene.polaroids().len();
                if idx >= count {
                    writeln!(out, "There are only {count} photos")?;
                } else {
                    self.scene.pointer(PointerTarget::Photo(idx));
                    let state = describe_card_state(self.scene.polaroids().card_state(idx));
                    writeln!(out, "Photo {idx} is {state}")?;
                }
            }
            Command::Background => {
                self.scene.pointer(PointerTarget::Background);
                writeln!(out, "No photo is selected")?;
            }
            Command::Snow(active) => {
                self.snow_switch.set(active);
                writeln!(out, "The snow is now {}", on_off(active))?;
            }
            Command::Palm(score) => {
                let active = is_open_palm(&[Gesture::new(GestureCategory::OpenPalm, score)]);
                self.snow_switch.set(active);
                writeln!(
                    out,
                    "An open palm with a score of {score} turns the snow {}",
                    on_off(active)
                )?;
            }
            Command::Show(target) => self.show(target, out)?,
            Command::Seed => writeln!(out, "Seed: {}", self.scene.seed())?,
            Command::Save(filename) => {
                let path = filename.map_or_else(|| self.config_path.clone(), PathBuf::from);

                let mut config = self.scene.config().clone();
                config.seed = Some(self.scene.seed());

                match config.save_to_file(&path) {
                    Ok(()) => writeln!(out, "Saved config to {path:?}")?,
                    Err(error) => writeln!(out, "Failed to save config to {path:?}: {error}")?,
                }
            }
        };

        writeln!(out)
    }

    /// Run the `show` command.
    fn show(&self, target: ShowTarget, out: &mut impl Write) -> io::Result<()> {
        if let ShowTarget::Progress = target {
            return writeln!(
                out,
                "progress: {:.4}, target: {}",
                self.scene.progress(),
                self.scene.state().target_progress()
            );
        }

        if let ShowTarget::Photos = target {
            let polaroids = self.scene.polaroids();
            for (idx, record) in polaroids.records().iter().enumerate() {
                let pose = polaroids.current_pose(idx).unwrap_or_else(|| record.chaos());
                let [x, y, z] = pose.position.to_array();
                writeln!(
                    out,
                    "{idx}: {:?} at ({x:.3}, {y:.3}, {z:.3}), {}",
                    record.photo(),
                    describe_card_state(polaroids.card_state(idx))
                )?;
            }
            return Ok(());
        }

        let Some(frame) = &self.last_frame else {
            return writeln!(out, "No frames have been run yet. Use `tick` first");
        };

        match target {
            ShowTarget::Star => {
                let [x, y, z] = frame.star.transform.translation.to_array();
                writeln!(
                    out,
                    "star at ({x:.3}, {y:.3}, {z:.3}) with scale {:.4} and emissive intensity {:.4}",
                    frame.star.transform.scale, frame.star.emissive_intensity
                )?;
            }
            ShowTarget::Snow => writeln!(
                out,
                "snow is {} with opacity {:.4} and {} flakes",
                on_off(self.scene.snow_active()),
                frame.snow.opacity,
                frame.snow.flakes.len()
            )?,
            ShowTarget::Ornaments(range) => show_instances(&frame.ornaments, range, out)?,
            ShowTarget::Lights(range) => show_instances(&frame.lights, range, out)?,
            ShowTarget::Progress | ShowTarget::Photos => unreachable!("handled above"),
        }

        Ok(())
    }

    /// The most recent frame, if any frames have been run.
    #[cfg(test)]
    fn last_frame(&self) -> Option<&SceneFrame> {
        self.last_frame.as_ref()
    }
}

/// Write out the given range of instances, clamped to the ones that exist.
fn show_instances(
    instances: &[Instance],
    range: Option<RangeInclusive<usize>>,
    out: &mut impl Write,
) -> io::Result<()> {
    let Some(last) = instances.len().checked_sub(1) else {
        return writeln!(out, "There are none");
    };

    let range = range.unwrap_or(0..=last);
    let range = *range.start()..=(*range.end()).min(last);

    for idx in range {
        let Instance { transform, colour } = instances[idx];
        let [x, y, z] = transform.translation.to_array();
        let [r, g, b] = colour;
        writeln!(
            out,
            "{idx}: ({x:.3}, {y:.3}, {z:.3}) scale {:.3} colour #{r:02x}{g:02x}{b:02x}",
            transform.scale
        )?;
    }

    Ok(())
}

/// Describe the state of a card for the user.
fn describe_card_state(state: CardState) -> &'static str {
    match state {
        CardState::Unselected => "on the tree",
        CardState::Selected { flipped: false } => "selected, showing the photo",
        CardState::Selected { flipped: true } => "selected, showing the back",
    }
}

/// Say "on" or "off".
fn on_off(active: bool) -> &'static str {
    if active {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, process};
    use tinsel_animators::{FoliageConfig, SnowConfig};
    use tinsel_scene::{snow_channel, SceneConfig, TreeState};

    fn console() -> Console {
        let config = SceneConfig {
            seed: Some(99),
            foliage: FoliageConfig {
                count: 50,
                ..FoliageConfig::default()
            },
            snow: SnowConfig {
                count: 50,
                ..SnowConfig::default()
            },
            ..SceneConfig::default()
        };
        let (switch, signal) = snow_channel();
        Console::new(
            SceneContext::mount(config, signal),
            switch,
            PathBuf::from("unused.ron"),
        )
    }

    /// Run the command and return what it printed.
    fn run(console: &mut Console, command: Command) -> String {
        let mut out = Vec::new();
        console
            .execute(command, &mut out)
            .expect("Writing to a Vec shouldn't fail");
        String::from_utf8(out).expect("Output should be UTF-8")
    }

    #[test]
    fn tick_and_toggle_test() {
        let mut console = console();

        let output = run(
            &mut console,
            Command::Tick {
                frames: 200,
                delta: None,
            },
        );
        assert_eq!(output, "Ran 200 frames, progress is now 1.0000\n\n");

        assert_eq!(run(&mut console, Command::Toggle), "The tree is now Chaos\n\n");
        assert_eq!(console.scene.state(), TreeState::Chaos);

        let output = run(&mut console, Command::State);
        assert_eq!(
            output,
            "The tree is Chaos with progress 1.0000 (moving) after 200 frames\n\n"
        );
    }

    #[test]
    fn show_before_tick_test() {
        let mut console = console();

        assert_eq!(
            run(&mut console, Command::Show(ShowTarget::Star)),
            "No frames have been run yet. Use `tick` first\n\n"
        );
        assert_eq!(
            run(&mut console, Command::Show(ShowTarget::Progress)),
            "progress: 0.0000, target: 1\n\n"
        );
    }

    #[test]
    fn show_instances_test() {
        let mut console = console();
        run(
            &mut console,
            Command::Tick {
                frames: 1,
                delta: None,
            },
        );
        assert!(console.last_frame().is_some());

        let output = run(
            &mut console,
            Command::Show(ShowTarget::Ornaments(Some(238..=1000))),
        );
        let lines: Vec<&str> = output.lines().filter(|line| !line.is_empty()).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("238: ("));
        assert!(lines[1].ends_with("colour #b22222"));

        let output = run(&mut console, Command::Show(ShowTarget::Lights(Some(3..=3))));
        assert!(output.starts_with("3: ("));
        assert!(output.contains("scale 0.100 colour #fff8e1"));
    }

    #[test]
    fn select_test() {
        let mut console = console();

        assert_eq!(
            run(&mut console, Command::Select(3)),
            "Photo 3 is selected, showing the photo\n\n"
        );
        assert_eq!(
            run(&mut console, Command::Select(3)),
            "Photo 3 is selected, showing the back\n\n"
        );
        assert_eq!(
            run(&mut console, Command::Select(40)),
            "There are only 17 photos\n\n"
        );
        assert_eq!(
            run(&mut console, Command::Background),
            "No photo is selected\n\n"
        );
        assert_eq!(console.scene.polaroids().selected(), None);
    }

    #[test]
    fn snow_and_palm_test() {
        let mut console = console();

        run(&mut console, Command::Snow(true));
        assert!(console.scene.snow_active());

        assert_eq!(
            run(&mut console, Command::Palm(0.3)),
            "An open palm with a score of 0.3 turns the snow off\n\n"
        );
        assert!(!console.scene.snow_active());

        run(&mut console, Command::Palm(0.9));
        assert!(console.scene.snow_active());
    }

    #[test]
    fn save_records_seed_test() {
        let mut console = console();
        let path = env::temp_dir()
            .join(format!("tinsel-console-{}", process::id()))
            .join("saved.ron");
        let filename = path.to_str().expect("Temp path should be UTF-8").to_string();

        let output = run(&mut console, Command::Save(Some(filename.as_str())));
        assert!(output.starts_with("Saved config to"));

        let saved = SceneConfig::try_from_file(&path).expect("Saved config should load");
        assert_eq!(saved.seed, Some(99));
        assert_eq!(saved.foliage.count, 50);
    }
}
