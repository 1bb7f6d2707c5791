use std::any::Any;
use std::fmt;

use smallvec::SmallVec;

use crate::scene::component::Component;
use crate::scene::{EntityId, SceneHandle};

/// A scene graph node.
///
/// Entities are stored in the [`SceneManager`](crate::scene::SceneManager)'s
/// arena and reference each other by [`EntityId`]. Parent and owning scene
/// are lookups, not ownership: a stale id simply resolves to `None`.
///
/// Structural fields are only mutated through the manager so that the
/// active-in-hierarchy flag, root membership and owning scene stay
/// consistent with each other.
pub struct Entity {
    pub(crate) name: String,

    // === Activation ===
    /// Author-controlled local flag.
    pub(crate) is_active: bool,
    /// Derived flag, written only by the activation cascade.
    pub(crate) is_active_in_hierarchy: bool,

    // === Hierarchy ===
    pub(crate) is_root: bool,
    pub(crate) parent: Option<EntityId>,
    /// Insertion ordered; searches walk it back to front.
    pub(crate) children: SmallVec<[EntityId; 4]>,
    pub(crate) scene: Option<SceneHandle>,

    pub(crate) components: Vec<Box<dyn Component>>,
}

impl Entity {
    #[must_use]
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_active: true,
            is_active_in_hierarchy: false,
            is_root: false,
            parent: None,
            children: SmallVec::new(),
            scene: None,
            components: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    #[inline]
    #[must_use]
    pub fn is_active_in_hierarchy(&self) -> bool {
        self.is_active_in_hierarchy
    }

    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.is_root
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn scene(&self) -> Option<SceneHandle> {
        self.scene
    }

    #[inline]
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Returns the first component of type `T`.
    #[must_use]
    pub fn get_component<T: Component>(&self) -> Option<&T> {
        self.components.iter().find_map(|c| {
            let any: &dyn Any = &**c;
            any.downcast_ref::<T>()
        })
    }

    pub fn get_component_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components.iter_mut().find_map(|c| {
            let any: &mut dyn Any = &mut **c;
            any.downcast_mut::<T>()
        })
    }

    pub(crate) fn remove_child(&mut self, child: EntityId) {
        if let Some(pos) = self.children.iter().position(|&c| c == child) {
            self.children.remove(pos);
        }
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("name", &self.name)
            .field("is_active", &self.is_active)
            .field("is_active_in_hierarchy", &self.is_active_in_hierarchy)
            .field("is_root", &self.is_root)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("scene", &self.scene)
            .field("components", &self.components.len())
            .finish()
    }
}
