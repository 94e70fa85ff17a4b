//! This module contains [`TreeState`].

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The state that the user has asked the tree to be in.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum TreeState {
    /// Everything is scattered in a cloud around the tree.
    Chaos,

    /// Everything is in its place on the tree.
    Formed,
}

impl TreeState {
    /// The progress value that this state eases towards.
    pub fn target_progress(self) -> f32 {
        match self {
            Self::Chaos => 0.,
            Self::Formed => 1.,
        }
    }

    /// The other state.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Chaos => Self::Formed,
            Self::Formed => Self::Chaos,
        }
    }
}
