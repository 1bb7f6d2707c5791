//! Scene Graph Settings
//!
//! Construction-time configuration for [`SceneManager`](crate::scene::SceneManager)
//! and [`Engine`](crate::Engine).
//!
//! ```rust,ignore
//! use myth_scene::{Engine, SceneSettings};
//!
//! let engine = Engine::new(SceneSettings {
//!     entity_capacity: 4096,
//!     ..Default::default()
//! });
//! ```

use glam::{Vec3, Vec4};

/// Tunables applied when arenas and scenes are created.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSettings {
    /// Initial capacity of the engine-wide entity arena.
    pub entity_capacity: usize,
    /// Color of the ambient light installed in every new scene.
    pub default_ambient_color: Vec3,
    /// Intensity of the ambient light installed in every new scene.
    pub default_ambient_intensity: f32,
    /// Solid clear color of every new scene's background.
    pub default_background: Vec4,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            entity_capacity: 256,
            default_ambient_color: Vec3::new(0.212, 0.227, 0.259),
            default_ambient_intensity: 1.0,
            default_background: Vec4::new(0.25, 0.25, 0.25, 1.0),
        }
    }
}
