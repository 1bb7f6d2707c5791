//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use myth_scene::{Component, EntityId, HookContext, SceneManager};

/// Routes `log` output through the test harness. Safe to call repeatedly.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Counts hook invocations through shared cells the test keeps a copy of.
#[derive(Clone, Default)]
pub struct HookCounter {
    pub enabled: Rc<Cell<u32>>,
    pub disabled: Rc<Cell<u32>>,
    pub destroyed: Rc<Cell<u32>>,
}

impl HookCounter {
    pub fn enabled(&self) -> u32 {
        self.enabled.get()
    }

    pub fn disabled(&self) -> u32 {
        self.disabled.get()
    }

    pub fn destroyed(&self) -> u32 {
        self.destroyed.get()
    }

    pub fn total(&self) -> u32 {
        self.enabled() + self.disabled() + self.destroyed()
    }
}

impl Component for HookCounter {
    fn on_enable(&mut self, _ctx: &HookContext) {
        self.enabled.set(self.enabled.get() + 1);
    }

    fn on_disable(&mut self, _ctx: &HookContext) {
        self.disabled.set(self.disabled.get() + 1);
    }

    fn on_destroy(&mut self, _ctx: &HookContext) {
        self.destroyed.set(self.destroyed.get() + 1);
    }
}

/// Attaches a fresh counter to `id` and returns a handle to its cells.
pub fn attach_counter(manager: &mut SceneManager, id: EntityId) -> HookCounter {
    let counter = HookCounter::default();
    manager
        .add_component(id, Box::new(counter.clone()))
        .expect("entity exists");
    counter
}

/// Records `(label, enabled)` for every hook call into a shared log.
pub struct HookRecorder {
    pub label: &'static str,
    pub log: Rc<RefCell<Vec<(&'static str, bool)>>>,
}

impl Component for HookRecorder {
    fn on_enable(&mut self, _ctx: &HookContext) {
        self.log.borrow_mut().push((self.label, true));
    }

    fn on_disable(&mut self, _ctx: &HookContext) {
        self.log.borrow_mut().push((self.label, false));
    }
}

/// Checks `active_in_hierarchy == active && effective_parent_active` for `ids`.
pub fn assert_hierarchy_consistent(manager: &SceneManager, ids: &[EntityId]) {
    for &id in ids {
        let Some(entity) = manager.get_entity(id) else {
            continue;
        };
        let parent_active = match entity.parent() {
            Some(parent) => manager.is_active_in_hierarchy(parent),
            None if entity.is_root() => entity
                .scene()
                .and_then(|s| manager.scene(s))
                .is_some_and(|s| s.is_active_in_engine()),
            None => false,
        };
        assert_eq!(
            entity.is_active_in_hierarchy(),
            entity.is_active() && parent_active,
            "inconsistent activation for '{}'",
            entity.name()
        );
    }
}
