//! Scene Graph
//!
//! - [`Entity`]: tree node with local/derived activation, parent and children
//! - [`Component`]: capability hooks driven by the activation cascade
//! - [`Scene`]: root list, camera list, ambient light slot, macro aggregate
//! - [`SceneManager`]: arenas for all of the above plus the active-scene slot
//!
//! Every cross-object reference is a slot map key. Keys never own anything,
//! so tearing down a subtree cannot leave dangling pointers or cycles.

mod activation;
pub mod background;
pub mod camera;
pub mod component;
pub mod entity;
mod hierarchy;
pub mod light;
pub mod manager;
mod roots;
pub mod scene;
pub mod wrapper;

pub use background::{Background, BackgroundMode};
pub use camera::Camera;
pub use component::{Component, HookContext};
pub use entity::Entity;
pub use light::{AmbientLight, DiffuseMode};
pub use manager::SceneManager;
pub use scene::Scene;
pub use wrapper::EntityMut;

use slotmap::new_key_type;

new_key_type! {
    pub struct EntityId;
    pub struct SceneHandle;
    pub struct CameraKey;
    pub struct LightKey;
}
