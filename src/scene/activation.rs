//! Activation Cascade
//!
//! Propagates an active-in-hierarchy transition from one entity down through
//! its subtree. The traversal is iterative (no recursion depth limit on deep
//! hierarchies) and runs in two phases:
//!
//! 1. Walk the subtree and flip `is_active_in_hierarchy` on every node whose
//!    state actually changes, recording them in visit order.
//! 2. Fire component hooks for the recorded nodes.
//!
//! Hooks therefore always observe the final state of the whole subtree.
//!
//! # Visit Rules
//!
//! - Children are visited in reverse insertion order.
//! - A child whose local `is_active` is false is skipped together with its
//!   subtree; its state is resolved when it is itself activated later.
//! - A node is only recorded when its flag changes, so one logical transition
//!   never delivers two hooks to the same node.
//!
//! The scratch buffers live on the cascade and are reused, so steady-state
//! toggling does not allocate.

use slotmap::SlotMap;

use crate::scene::component::HookContext;
use crate::scene::entity::Entity;
use crate::scene::EntityId;

#[derive(Debug, Default)]
pub(crate) struct ActivationCascade {
    stack: Vec<EntityId>,
    changed: Vec<EntityId>,
}

#[derive(Clone, Copy)]
enum Transition {
    Activate,
    Deactivate,
}

impl ActivationCascade {
    /// Cascades `root` and its eligible descendants active.
    ///
    /// The caller decides that `root` *should* be active (its own flag and its
    /// effective parent allow it). Returns the number of nodes that changed.
    pub(crate) fn activate(
        &mut self,
        entities: &mut SlotMap<EntityId, Entity>,
        root: EntityId,
    ) -> usize {
        self.run(entities, root, Transition::Activate)
    }

    /// Cascades `root` and every descendant that is active in hierarchy to
    /// inactive. Returns the number of nodes that changed.
    pub(crate) fn deactivate(
        &mut self,
        entities: &mut SlotMap<EntityId, Entity>,
        root: EntityId,
    ) -> usize {
        self.run(entities, root, Transition::Deactivate)
    }

    fn run(
        &mut self,
        entities: &mut SlotMap<EntityId, Entity>,
        root: EntityId,
        transition: Transition,
    ) -> usize {
        let target = matches!(transition, Transition::Activate);

        match entities.get(root) {
            Some(node) if node.is_active_in_hierarchy != target => {}
            _ => return 0,
        }

        self.stack.clear();
        self.changed.clear();
        self.stack.push(root);

        // Phase 1: flags
        while let Some(id) = self.stack.pop() {
            let Some(node) = entities.get_mut(id) else {
                continue;
            };
            node.is_active_in_hierarchy = target;
            self.changed.push(id);

            let Some(node) = entities.get(id) else {
                continue;
            };
            // Pushed front to back so the last child is popped first.
            for &child_id in &node.children {
                if let Some(child) = entities.get(child_id)
                    && child.is_active
                    && child.is_active_in_hierarchy != target
                {
                    self.stack.push(child_id);
                }
            }
        }

        // Phase 2: hooks
        for &id in &self.changed {
            let Some(node) = entities.get_mut(id) else {
                continue;
            };
            let ctx = HookContext {
                entity: id,
                scene: node.scene,
            };
            for component in &mut node.components {
                match transition {
                    Transition::Activate => component.on_enable(&ctx),
                    Transition::Deactivate => component.on_disable(&ctx),
                }
            }
        }

        self.changed.len()
    }
}
