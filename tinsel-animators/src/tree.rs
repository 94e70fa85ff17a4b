//! This module contains [`TreeShape`].

use serde::{Deserialize, Serialize};
use tinsel_placement::{Cone, TREE_BASE_Y};

/// The overall dimensions of the tree and of the cloud it scatters into.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeShape {
    /// The height of the tree.
    pub height: f32,

    /// The radius of the base of the tree.
    pub radius: f32,

    /// The y coordinate of the base of the tree.
    pub base_y: f32,

    /// The radius of the sphere that elements scatter into in the chaos state.
    pub chaos_radius: f32,
}

impl Default for TreeShape {
    fn default() -> Self {
        Self {
            height: 12.,
            radius: 5.5,
            base_y: TREE_BASE_Y,
            chaos_radius: 20.,
        }
    }
}

impl TreeShape {
    /// The cone of the tree.
    pub fn cone(&self) -> Cone {
        Cone::new(self.height, self.radius, self.base_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tree_shape_test() {
        insta::assert_debug_snapshot!(TreeShape::default(), @r###"
        TreeShape {
            height: 12.0,
            radius: 5.5,
            base_y: -7.5,
            chaos_radius: 20.0,
        }
        "###);
    }
}
