//! Entity tree operations.
//!
//! Creation, reparenting, detaching, activation toggling, name lookup and
//! destruction of entities. Every structural change finishes its activation
//! reconciliation and owning-scene propagation before returning.

use crate::errors::{Result, SceneError};
use crate::scene::component::{Component, HookContext};
use crate::scene::entity::Entity;
use crate::scene::manager::SceneManager;
use crate::scene::{EntityId, SceneHandle};

impl SceneManager {
    // ========================================================================
    // Creation & access
    // ========================================================================

    /// Creates a free-standing entity: no parent, no scene, locally active.
    pub fn create_entity(&mut self, name: &str) -> EntityId {
        self.entities.insert(Entity::new(name))
    }

    /// Creates a child of `parent`, appended after its existing children.
    pub fn create_child(&mut self, parent: EntityId, name: &str) -> Result<EntityId> {
        let parent_node = self
            .entities
            .get(parent)
            .ok_or(SceneError::EntityNotFound(parent))?;
        let scene = parent_node.scene;
        let parent_active = parent_node.is_active_in_hierarchy;

        let mut entity = Entity::new(name);
        entity.parent = Some(parent);
        entity.scene = scene;
        let child = self.entities.insert(entity);
        self.entities[parent].children.push(child);

        if parent_active {
            self.cascade.activate(&mut self.entities, child);
        }
        Ok(child)
    }

    #[inline]
    #[must_use]
    pub fn get_entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    #[inline]
    #[must_use]
    pub fn contains_entity(&self, id: EntityId) -> bool {
        self.entities.contains_key(id)
    }

    #[inline]
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn set_name(&mut self, id: EntityId, name: &str) -> Result<()> {
        let entity = self
            .entities
            .get_mut(id)
            .ok_or(SceneError::EntityNotFound(id))?;
        name.clone_into(&mut entity.name);
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn scene_of(&self, id: EntityId) -> Option<SceneHandle> {
        self.entities.get(id)?.scene
    }

    // ========================================================================
    // Components
    // ========================================================================

    /// Attaches a component. If the entity is already active in hierarchy the
    /// component's `on_enable` fires immediately.
    pub fn add_component(&mut self, id: EntityId, mut component: Box<dyn Component>) -> Result<()> {
        let entity = self
            .entities
            .get_mut(id)
            .ok_or(SceneError::EntityNotFound(id))?;
        if entity.is_active_in_hierarchy {
            component.on_enable(&HookContext {
                entity: id,
                scene: entity.scene,
            });
        }
        entity.components.push(component);
        Ok(())
    }

    #[must_use]
    pub fn get_component<T: Component>(&self, id: EntityId) -> Option<&T> {
        self.entities.get(id)?.get_component::<T>()
    }

    pub fn get_component_mut<T: Component>(&mut self, id: EntityId) -> Option<&mut T> {
        self.entities.get_mut(id)?.get_component_mut::<T>()
    }

    // ========================================================================
    // Activation
    // ========================================================================

    /// Sets the entity's local active flag and cascades the effective change.
    pub fn set_active(&mut self, id: EntityId, value: bool) -> Result<()> {
        let entity = self
            .entities
            .get_mut(id)
            .ok_or(SceneError::EntityNotFound(id))?;
        if entity.is_active == value {
            return Ok(());
        }
        entity.is_active = value;
        let was_active_in_hierarchy = entity.is_active_in_hierarchy;

        if value {
            if self.effective_parent_active(id) {
                self.cascade.activate(&mut self.entities, id);
            }
        } else if was_active_in_hierarchy {
            self.cascade.deactivate(&mut self.entities, id);
        }
        Ok(())
    }

    #[must_use]
    pub fn is_active(&self, id: EntityId) -> bool {
        self.entities.get(id).is_some_and(|e| e.is_active)
    }

    #[must_use]
    pub fn is_active_in_hierarchy(&self, id: EntityId) -> bool {
        self.entities.get(id).is_some_and(|e| e.is_active_in_hierarchy)
    }

    /// Whether the node's effective parent (its parent entity, or its scene
    /// when it is a root) is active. Orphans have no active parent.
    pub(crate) fn effective_parent_active(&self, id: EntityId) -> bool {
        let Some(entity) = self.entities.get(id) else {
            return false;
        };
        match entity.parent {
            Some(parent) => self.is_active_in_hierarchy(parent),
            None if entity.is_root => entity
                .scene
                .and_then(|s| self.scenes.get(s))
                .is_some_and(|s| s.is_active_in_engine),
            None => false,
        }
    }

    /// Brings `id`'s active-in-hierarchy state in line with its current
    /// position in the tree. Issues at most one cascade.
    pub(crate) fn reconcile_activation(&mut self, id: EntityId) {
        let Some(entity) = self.entities.get(id) else {
            return;
        };
        let current = entity.is_active_in_hierarchy;
        let target = entity.is_active && self.effective_parent_active(id);

        if target && !current {
            self.cascade.activate(&mut self.entities, id);
        } else if !target && current {
            self.cascade.deactivate(&mut self.entities, id);
        }
    }

    // ========================================================================
    // Reparenting
    // ========================================================================

    /// Moves `child` under `parent`, appending it after existing children.
    ///
    /// The child leaves its old parent, or its old scene's root list, takes
    /// the parent's owning scene for its whole subtree and is reconciled
    /// against the parent's activation state.
    pub fn add_child(&mut self, parent: EntityId, child: EntityId) -> Result<()> {
        if !self.entities.contains_key(parent) {
            return Err(SceneError::EntityNotFound(parent));
        }
        let child_node = self
            .entities
            .get(child)
            .ok_or(SceneError::EntityNotFound(child))?;
        if child_node.parent == Some(parent) {
            return Ok(());
        }
        if child == parent || self.is_ancestor_of(child, parent) {
            log::warn!("Cannot attach entity to itself or its own descendant!");
            return Err(SceneError::HierarchyCycle { child, parent });
        }

        if child_node.is_root {
            if let Some(scene) = child_node.scene
                && let Some(scene) = self.scenes.get_mut(scene)
            {
                scene.remove_root(child);
            }
            self.entities[child].is_root = false;
        } else {
            self.detach_from_parent(child);
        }

        self.entities[parent].children.push(child);
        self.entities[child].parent = Some(parent);

        let new_scene = self.entities[parent].scene;
        if self.entities[child].scene != new_scene {
            self.traverse_set_owner_scene(child, new_scene);
        }

        self.reconcile_activation(child);
        Ok(())
    }

    /// `Some(parent)` behaves like [`add_child`](Self::add_child), `None`
    /// like [`remove_from_parent`](Self::remove_from_parent).
    pub fn set_parent(&mut self, child: EntityId, parent: Option<EntityId>) -> Result<()> {
        match parent {
            Some(parent) => self.add_child(parent, child),
            None => self.remove_from_parent(child),
        }
    }

    /// Detaches the entity from its parent without destroying it.
    ///
    /// The entity ends with no parent, `is_root == false` and no owning scene
    /// for its whole subtree; it is cascaded inactive if it was active. Root
    /// entities have no parent and are left untouched.
    pub fn remove_from_parent(&mut self, id: EntityId) -> Result<()> {
        let entity = self
            .entities
            .get(id)
            .ok_or(SceneError::EntityNotFound(id))?;
        if entity.parent.is_none() {
            return Ok(());
        }

        self.detach_from_parent(id);
        self.entities[id].is_root = false;
        if self.entities[id].is_active_in_hierarchy {
            self.cascade.deactivate(&mut self.entities, id);
        }
        self.traverse_set_owner_scene(id, None);
        Ok(())
    }

    /// Unlinks `id` from its parent's child list. No activation or scene
    /// bookkeeping; callers finish that themselves.
    pub(crate) fn detach_from_parent(&mut self, id: EntityId) {
        let Some(parent) = self.entities.get_mut(id).and_then(|e| e.parent.take()) else {
            return;
        };
        if let Some(parent) = self.entities.get_mut(parent) {
            parent.remove_child(id);
        }
    }

    /// Writes `scene` as the owning scene of every node in `root`'s subtree.
    pub(crate) fn traverse_set_owner_scene(&mut self, root: EntityId, scene: Option<SceneHandle>) {
        self.walk.clear();
        self.walk.push(root);
        while let Some(id) = self.walk.pop() {
            if let Some(entity) = self.entities.get_mut(id) {
                entity.scene = scene;
                self.walk.extend_from_slice(&entity.children);
            }
        }
    }

    /// True if `ancestor` appears on `node`'s parent chain.
    #[must_use]
    pub fn is_ancestor_of(&self, ancestor: EntityId, node: EntityId) -> bool {
        let mut current = self.entities.get(node).and_then(|e| e.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.entities.get(id).and_then(|e| e.parent);
        }
        false
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Depth-first preorder search of `id`'s subtree, `id` included.
    ///
    /// Children are searched last-added first at every level, so with
    /// duplicate names the most recently added match wins. The walk uses an
    /// explicit stack and handles arbitrarily deep chains.
    #[must_use]
    pub fn find_by_name(&self, id: EntityId, name: &str) -> Option<EntityId> {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(entity) = self.entities.get(current) else {
                continue;
            };
            if entity.name == name {
                return Some(current);
            }
            // Pushed front to back so the last child is popped first.
            stack.extend_from_slice(&entity.children);
        }
        None
    }

    /// Single-level lookup among `id`'s direct children, last-added first.
    #[must_use]
    pub fn find_child_by_name(&self, id: EntityId, name: &str) -> Option<EntityId> {
        let entity = self.entities.get(id)?;
        entity
            .children
            .iter()
            .rev()
            .copied()
            .find(|&child| self.entities.get(child).is_some_and(|c| c.name == name))
    }

    // ========================================================================
    // Destruction
    // ========================================================================

    /// Destroys an entity and its whole subtree. Stale ids are ignored.
    ///
    /// The subtree is cascaded inactive first, then unlinked from its parent
    /// or scene root list, then every node fires `on_destroy` (children before
    /// parents) and is freed.
    pub fn destroy_entity(&mut self, id: EntityId) {
        let Some(entity) = self.entities.get(id) else {
            return;
        };
        if entity.is_active_in_hierarchy {
            self.cascade.deactivate(&mut self.entities, id);
        }

        let entity = &self.entities[id];
        if entity.parent.is_some() {
            self.detach_from_parent(id);
        } else if entity.is_root
            && let Some(scene) = entity.scene
            && let Some(scene) = self.scenes.get_mut(scene)
        {
            scene.remove_root(id);
        }

        // Collect in preorder, free in reverse so children go first.
        self.walk.clear();
        let mut cursor = 0;
        self.walk.push(id);
        while cursor < self.walk.len() {
            let current = self.walk[cursor];
            cursor += 1;
            if let Some(node) = self.entities.get(current) {
                self.walk.extend_from_slice(&node.children);
            }
        }

        let doomed = std::mem::take(&mut self.walk);
        for &node_id in doomed.iter().rev() {
            if let Some(mut node) = self.entities.remove(node_id) {
                let ctx = HookContext {
                    entity: node_id,
                    scene: node.scene,
                };
                for component in &mut node.components {
                    component.on_destroy(&ctx);
                }
            }
        }
        self.walk = doomed;
    }
}
