//! Editing session configuration.

use serde::{Deserialize, Serialize};

use crate::geometry::Vector2;

/// Settings supplied when an [`EditorSession`](crate::session::EditorSession)
/// is created.
///
/// Missing fields fall back to [`SessionConfig::default`] when deserialized,
/// so front ends only send what they override.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Width of the visible canvas in world units, used to centre new images.
    pub viewport_width: f32,
    /// Height of the visible canvas in world units.
    pub viewport_height: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 480.0,
        }
    }
}

impl SessionConfig {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            viewport_width,
            viewport_height,
        }
    }

    /// World position that centres an image of the given size in the viewport.
    pub fn centered_position(&self, image_width: u32, image_height: u32) -> Vector2 {
        Vector2::new(
            self.viewport_width / 2.0 - image_width as f32 / 2.0,
            self.viewport_height / 2.0 - image_height as f32 / 2.0,
        )
    }
}
