//! # Myth Scene
//!
//! The hierarchical scene graph of the Myth engine: entities and their
//! parent/child structure, active state and how it cascades through the tree,
//! entity transfer between scenes, and the per-scene registries (cameras,
//! ambient light, aggregated shader macros) the render loop reads each frame.
//!
//! ```rust,ignore
//! use myth_scene::{Engine, SceneSettings};
//!
//! let mut engine = Engine::default();
//! let graph = &mut engine.scene_manager;
//!
//! let scene = graph.create_scene("Main");
//! let player = graph.create_root_entity(scene, "Player")?;
//! let hand = graph.create_child(player, "Hand")?;
//!
//! graph.set_active_scene(Some(scene))?;
//! assert!(graph.is_active_in_hierarchy(hand));
//! assert_eq!(graph.find_entity_by_path(scene, "/Player/Hand/"), Some(hand));
//! ```

pub mod engine;
pub mod errors;
pub mod scene;
pub mod settings;
pub mod shader;
pub mod utils;

pub use engine::Engine;
pub use errors::{Result, SceneError};
pub use scene::{
    AmbientLight, Background, BackgroundMode, Camera, CameraKey, Component, DiffuseMode, Entity,
    EntityId, EntityMut, HookContext, LightKey, Scene, SceneHandle, SceneManager,
};
pub use settings::SceneSettings;
pub use shader::{ShaderData, ShaderDataGroup, ShaderMacroCollection};
