//! This module contains [`SceneConfig`] and the functions to load and save it.

use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};
use thiserror::Error;
use tinsel_animators::{
    FoliageConfig, OrnamentsConfig, PolaroidsConfig, SnowConfig, StarConfig, TreeShape,
};
use tracing::{info, instrument, warn};

/// An error from loading or saving a [`SceneConfig`].
#[derive(Debug, Error)]
#[allow(missing_docs, reason = "the #[error] attributes document the variants")]
pub enum ConfigError {
    #[error("IO error: `{0:?}`")]
    Io(#[from] io::Error),

    #[error("Invalid RON: `{0}`")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Failed to serialize config: `{0}`")]
    Serialize(#[from] ron::Error),
}

/// The config of the whole scene.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// The seed used to generate every element. If this is `None`, a random seed is chosen and
    /// logged, so that the scene can be recreated by putting that seed here.
    pub seed: Option<u64>,

    /// The size of the tree and of the chaos cloud.
    pub tree: TreeShape,

    /// The config of the needles.
    pub foliage: FoliageConfig,

    /// The config of the ornament balls and the string lights.
    pub ornaments: OrnamentsConfig,

    /// The config of the star on top.
    pub star: StarConfig,

    /// The config of the photo cards.
    pub polaroids: PolaroidsConfig,

    /// The config of the snow.
    pub snow: SnowConfig,
}

impl SceneConfig {
    /// Serialize the config into pretty RON.
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default().struct_names(true),
        )?)
    }

    /// Load the config from the given file, returning an error if it couldn't be read or parsed.
    pub fn try_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(ron::from_str(&text)?)
    }

    /// Load the config from the given file, or use the default if the file is unavailable or
    /// invalid. In that case, also save the default to the file for future editing.
    #[instrument]
    pub fn from_file(path: &Path) -> Self {
        match Self::try_from_file(path) {
            Ok(config) => {
                info!("Loaded scene config");
                config
            }
            Err(error) => {
                warn!(%error, "Couldn't load scene config, using the default");

                let default = Self::default();
                if let Err(error) = default.save_to_file(path) {
                    warn!(%error, "Couldn't save the default scene config");
                }
                default
            }
        }
    }

    /// Save the config to the given file, creating its parent directory if needed.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::DirBuilder::new().recursive(true).create(parent)?;
            }
        }

        fs::write(path, self.to_ron_string()?)?;
        Ok(())
    }
}
