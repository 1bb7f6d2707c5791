//! Component capability.
//!
//! Anything attached to an [`Entity`](crate::scene::Entity) implements
//! [`Component`]. The activation cascade calls `on_enable` / `on_disable`
//! exactly once per effective active-in-hierarchy transition of the owning
//! entity; `on_destroy` fires once when the entity is freed.

use std::any::Any;

use crate::scene::{EntityId, SceneHandle};

/// Context handed to every component hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookContext {
    /// The entity that owns the component.
    pub entity: EntityId,
    /// The entity's owning scene at the time of the call.
    pub scene: Option<SceneHandle>,
}

pub trait Component: Any {
    /// The owning entity became active in hierarchy.
    fn on_enable(&mut self, _ctx: &HookContext) {}

    /// The owning entity stopped being active in hierarchy.
    fn on_disable(&mut self, _ctx: &HookContext) {}

    /// The owning entity is being destroyed.
    fn on_destroy(&mut self, _ctx: &HookContext) {}
}
