//! Chainable entity operation wrapper.
//!
//! [`EntityMut`] borrows a [`SceneManager`] mutably and provides a fluent API
//! over one entity. All methods silently no-op when the handle is stale;
//! hierarchy violations are logged.
//!
//! # Example
//!
//! ```rust,ignore
//! manager.entity(player)
//!     .set_name("Player")
//!     .add_component(Box::new(Health::default()))
//!     .set_active(true);
//! ```
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::must_use_candidate)]

use crate::scene::component::Component;
use crate::scene::manager::SceneManager;
use crate::scene::EntityId;

/// Temporary mutable borrow of one entity for chainable operations.
pub struct EntityMut<'a> {
    manager: &'a mut SceneManager,
    id: EntityId,
}

impl<'a> EntityMut<'a> {
    #[inline]
    pub fn new(manager: &'a mut SceneManager, id: EntityId) -> Self {
        Self { manager, id }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[inline]
    pub fn set_name(self, name: &str) -> Self {
        let _ = self.manager.set_name(self.id, name);
        self
    }

    #[inline]
    pub fn set_active(self, active: bool) -> Self {
        let _ = self.manager.set_active(self.id, active);
        self
    }

    #[inline]
    pub fn add_component(self, component: Box<dyn Component>) -> Self {
        let _ = self.manager.add_component(self.id, component);
        self
    }

    /// Moves `child` under this entity.
    pub fn add_child(self, child: EntityId) -> Self {
        if let Err(e) = self.manager.add_child(self.id, child) {
            log::warn!("EntityMut::add_child failed: {e}");
        }
        self
    }

    /// Creates a child and continues the chain on it.
    pub fn with_child(self, name: &str) -> Self {
        match self.manager.create_child(self.id, name) {
            Ok(child) => Self {
                manager: self.manager,
                id: child,
            },
            Err(_) => self,
        }
    }
}

impl SceneManager {
    /// Chainable access to one entity.
    #[inline]
    pub fn entity(&mut self, id: EntityId) -> EntityMut<'_> {
        EntityMut::new(self, id)
    }
}
