//! Engine Core Module
//!
//! [`Engine`] ties the [`SceneManager`] to the engine-global shader macro set
//! and drives the once-per-frame bookkeeping the render pipeline consumes.
//!
//! # Example
//!
//! ```rust,ignore
//! use myth_scene::{Engine, SceneSettings};
//!
//! let mut engine = Engine::new(SceneSettings::default());
//! let scene = engine.scene_manager.create_scene("Main");
//! engine.scene_manager.set_active_scene(Some(scene))?;
//!
//! loop {
//!     engine.update();
//!     // ... render engine.scene_manager.scene(scene) ...
//! }
//! ```

use crate::scene::manager::SceneManager;
use crate::settings::SceneSettings;
use crate::shader::ShaderMacroCollection;
use crate::utils::interner;

/// Owns the scene graph and the engine-wide macro set.
pub struct Engine {
    pub scene_manager: SceneManager,
    /// Macros applied to every scene, unioned first during aggregation.
    pub macro_collection: ShaderMacroCollection,

    frame_count: u64,
}

impl Engine {
    #[must_use]
    pub fn new(settings: SceneSettings) -> Self {
        interner::preload_scene_macros();
        Self {
            scene_manager: SceneManager::with_settings(settings),
            macro_collection: ShaderMacroCollection::new(),
            frame_count: 0,
        }
    }

    /// Returns the total number of frames updated since startup.
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Per-frame update: rebuilds the active scene's macro aggregate.
    pub fn update(&mut self) {
        self.scene_manager.update_shader_data(&self.macro_collection);
        self.frame_count += 1;
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(SceneSettings::default())
    }
}
