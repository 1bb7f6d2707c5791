//! Scene root registry.
//!
//! Root membership, cross-scene transfer and scene-level lookup. An entity is
//! root of at most one scene; moving it between scenes is a single call that
//! leaves both scenes, the subtree's owning-scene keys and the activation
//! state consistent when it returns.

use crate::errors::{Result, SceneError};
use crate::scene::manager::SceneManager;
use crate::scene::{EntityId, SceneHandle};

impl SceneManager {
    /// Creates an entity and registers it as a root of `scene`.
    pub fn create_root_entity(&mut self, scene: SceneHandle, name: &str) -> Result<EntityId> {
        self.live_scene(scene)?;
        let entity = self.create_entity(name);
        self.add_root_entity(scene, entity)?;
        Ok(entity)
    }

    /// Registers `entity` as a root of `scene`.
    ///
    /// 1. A non-root entity is detached from its parent and marked root.
    /// 2. If it belonged to another scene it leaves that scene's root list (if
    ///    it was root there), is appended here, and the whole subtree takes
    ///    this scene as owner.
    /// 3. A demoted node already owned by this scene is just appended.
    /// 4. Activation is reconciled against this scene's engine-active state.
    pub fn add_root_entity(&mut self, scene: SceneHandle, entity: EntityId) -> Result<()> {
        self.live_scene(scene)?;
        let node = self
            .entities
            .get_mut(entity)
            .ok_or(SceneError::EntityNotFound(entity))?;

        let was_root = node.is_root;
        let old_scene = node.scene;

        if !was_root {
            node.is_root = true;
            self.detach_from_parent(entity);
        }

        if old_scene != Some(scene) {
            if was_root
                && let Some(old) = old_scene
                && let Some(old) = self.scenes.get_mut(old)
            {
                old.remove_root(entity);
            }
            self.scenes[scene].root_entities.push(entity);
            self.traverse_set_owner_scene(entity, Some(scene));
        } else if !was_root {
            self.scenes[scene].root_entities.push(entity);
        }

        let node = &self.entities[entity];
        if self.scenes[scene].is_active_in_engine {
            if !node.is_active_in_hierarchy && node.is_active {
                self.cascade.activate(&mut self.entities, entity);
            }
        } else if node.is_active_in_hierarchy {
            self.cascade.deactivate(&mut self.entities, entity);
        }
        Ok(())
    }

    /// Unregisters a root of `scene`.
    ///
    /// Does nothing unless `entity` is currently root of *this* scene. The
    /// entity is cascaded inactive and its subtree loses its owning scene.
    pub fn remove_root_entity(&mut self, scene: SceneHandle, entity: EntityId) -> Result<()> {
        self.live_scene(scene)?;
        let node = self
            .entities
            .get_mut(entity)
            .ok_or(SceneError::EntityNotFound(entity))?;
        if !node.is_root || node.scene != Some(scene) {
            return Ok(());
        }
        node.is_root = false;
        let was_active_in_hierarchy = node.is_active_in_hierarchy;

        self.scenes[scene].remove_root(entity);
        if was_active_in_hierarchy {
            self.cascade.deactivate(&mut self.entities, entity);
        }
        self.traverse_set_owner_scene(entity, None);
        Ok(())
    }

    /// Root entity of `scene` at `index`; `None` when out of range.
    #[must_use]
    pub fn get_root_entity(&self, scene: SceneHandle, index: usize) -> Option<EntityId> {
        self.scenes.get(scene)?.get_root_entity(index)
    }

    /// Searches the whole scene by name.
    ///
    /// Root names are checked first (last root first), then each root's
    /// subtree in the same order.
    #[must_use]
    pub fn find_entity_by_name(&self, scene: SceneHandle, name: &str) -> Option<EntityId> {
        let roots = &self.scenes.get(scene)?.root_entities;

        roots
            .iter()
            .rev()
            .copied()
            .find(|&root| self.entities.get(root).is_some_and(|e| e.name == name))
            .or_else(|| {
                roots
                    .iter()
                    .rev()
                    .find_map(|&root| self.find_by_name(root, name))
            })
    }

    /// Resolves a `/`-separated path such as `"Player/Arm/Hand"`.
    ///
    /// Empty segments are ignored, so `"/A/B/"` equals `"A/B"`. The first
    /// segment selects a root (last root first), each further segment a direct
    /// child (last child first). Any unresolved segment, or an empty path,
    /// yields `None`.
    #[must_use]
    pub fn find_entity_by_path(&self, scene: SceneHandle, path: &str) -> Option<EntityId> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let first = segments.next()?;

        let mut current = self
            .scenes
            .get(scene)?
            .root_entities
            .iter()
            .rev()
            .copied()
            .find(|&root| self.entities.get(root).is_some_and(|e| e.name == first))?;

        for segment in segments {
            current = self.find_child_by_name(current, segment)?;
        }
        Some(current)
    }
}
