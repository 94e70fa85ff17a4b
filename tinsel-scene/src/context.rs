//! This module contains [`SceneContext`], which owns all the state of the scene and produces a
//! [`SceneFrame`] every displayed frame.

use crate::{SceneConfig, SnowSignal, TreeState};
use rand::{rngs::StdRng, SeedableRng};
use tinsel_animators::{
    easing::Easing, Animator, Foliage, FrameContext, Ornaments, Polaroids, Snow, Star,
};
use tinsel_frame::{CameraPose, Ray, SceneFrame};
use tracing::{debug, info, instrument, warn};

/// Choose the seed to mount the scene with.
fn choose_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        cfg_if::cfg_if! {
            if #[cfg(any(test, feature = "bench"))] {
                12345
            } else {
                rand::random()
            }
        }
    })
}

/// What the user pointed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    /// The photo card with the given index.
    Photo(usize),

    /// Empty space.
    Background,
}

/// The information from the shell that the scene needs to advance by one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    /// The number of seconds since the last frame.
    pub delta: f32,

    /// Where the camera is this frame.
    pub camera: CameraPose,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            delta: 1. / 60.,
            camera: CameraPose::default(),
        }
    }
}

/// The whole scene.
///
/// All recomputation happens in [`frame_update`](Self::frame_update), which should be called once
/// per displayed frame on a single thread. The only state shared with other threads is the snow
/// signal.
#[derive(Debug)]
pub struct SceneContext {
    /// The config that the scene was mounted with.
    config: SceneConfig,

    /// The seed that the scene was mounted with.
    seed: u64,

    /// The state the user has asked for.
    state: TreeState,

    /// The progress, which eases towards the target of the state.
    progress: Easing,

    /// The number of seconds since the scene was mounted.
    elapsed: f32,

    /// The number of frames since the scene was mounted.
    frame_count: u64,

    /// Whether it should be snowing.
    snow_signal: SnowSignal,

    /// The needles.
    foliage: Foliage,

    /// The ornament balls and string lights.
    ornaments: Ornaments,

    /// The star on top.
    star: Star,

    /// The photo cards.
    polaroids: Polaroids,

    /// The snow.
    snow: Snow,
}

impl SceneContext {
    /// Mount the scene, creating every element.
    ///
    /// The scene starts in the [`Formed`](TreeState::Formed) state with a progress of 0, so the
    /// tree assembles itself as soon as frames start being displayed.
    #[instrument(skip_all)]
    pub fn mount(config: SceneConfig, snow_signal: SnowSignal) -> Self {
        let seed = choose_seed(config.seed);
        info!(seed, "Mounting scene");

        let mut rng = StdRng::seed_from_u64(seed);

        let foliage = Foliage::mount(&config.foliage, &config.tree, &mut rng);
        let ornaments = Ornaments::mount(&config.ornaments, &config.tree, &mut rng);
        let star = Star::mount(&config.star, &config.tree, &mut rng);
        let polaroids = Polaroids::mount(&config.polaroids, &config.tree, &mut rng);
        let snow = Snow::mount(&config.snow, &config.tree, &mut rng);

        if polaroids.is_empty() {
            warn!("There are no photos in the config");
        }

        Self {
            config,
            seed,
            state: TreeState::Formed,
            progress: Easing::progress(),
            elapsed: 0.,
            frame_count: 0,
            snow_signal,
            foliage,
            ornaments,
            star,
            polaroids,
            snow,
        }
    }

    /// The config that the scene was mounted with.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// The seed that the scene was mounted with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The state the user has asked for.
    pub fn state(&self) -> TreeState {
        self.state
    }

    /// The current progress, where 0 is chaos and 1 is formed.
    pub fn progress(&self) -> f32 {
        self.progress.value()
    }

    /// Whether the progress has reached the target of the current state.
    pub fn is_settled(&self) -> bool {
        self.progress
            .has_settled_at(self.state.target_progress())
    }

    /// The number of seconds since the scene was mounted.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// The number of frames since the scene was mounted.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Whether it should be snowing right now.
    pub fn snow_active(&self) -> bool {
        self.snow_signal.is_active()
    }

    /// The needles.
    pub fn foliage(&self) -> &Foliage {
        &self.foliage
    }

    /// The ornament balls and string lights.
    pub fn ornaments(&self) -> &Ornaments {
        &self.ornaments
    }

    /// The star on top.
    pub fn star(&self) -> &Star {
        &self.star
    }

    /// The photo cards.
    pub fn polaroids(&self) -> &Polaroids {
        &self.polaroids
    }

    /// The snow.
    pub fn snow(&self) -> &Snow {
        &self.snow
    }

    /// Switch between chaos and formed, returning the new state.
    pub fn toggle(&mut self) -> TreeState {
        self.set_state(self.state.toggled());
        self.state
    }

    /// Ask the tree to be in the given state.
    pub fn set_state(&mut self, state: TreeState) {
        if state != self.state {
            info!(%state, "Changing tree state");
        }
        self.state = state;
    }

    /// React to the user pointing at something.
    ///
    /// Pointing at a card selects it, or flips it if it's already selected. Pointing at the
    /// background puts the selected card back on the tree.
    pub fn pointer(&mut self, target: PointerTarget) {
        debug!(?target, "Pointer event");

        match target {
            PointerTarget::Photo(index) => {
                if !self.polaroids.interact(index) {
                    warn!(
                        index,
                        count = self.polaroids.len(),
                        "Tried to select a photo that doesn't exist"
                    );
                }
            }
            PointerTarget::Background => self.polaroids.deselect(),
        }
    }

    /// Find what the given ray hits, based on where the cards were in the last frame.
    pub fn pick(&self, ray: &Ray) -> PointerTarget {
        self.polaroids
            .pick(ray)
            .map_or(PointerTarget::Background, PointerTarget::Photo)
    }

    /// Advance the scene by one frame and return everything needed to draw it.
    pub fn frame_update(&mut self, input: FrameInput) -> SceneFrame {
        let progress = self.progress.step(self.state.target_progress());
        self.elapsed += input.delta;
        self.frame_count += 1;

        let ctx = FrameContext {
            progress,
            elapsed: self.elapsed,
            delta: input.delta,
            camera: input.camera,
            snow_active: self.snow_signal.is_active(),
        };

        let foliage = self.foliage.next_frame(&ctx);
        let ornaments = self.ornaments.next_frame(&ctx);
        let star = self.star.next_frame(&ctx);
        let polaroids = self.polaroids.next_frame(&ctx);
        let snow = self.snow.next_frame(&ctx);

        SceneFrame {
            progress,
            star,
            foliage,
            ornaments: ornaments.balls,
            lights: ornaments.lights,
            polaroids,
            snow,
        }
    }
}
