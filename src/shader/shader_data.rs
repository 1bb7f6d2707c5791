//! Shader Data
//!
//! Per-owner shading state (currently its macro collection) shared with the
//! render pipeline. Lifetime is governed by an explicit holder count rather
//! than single ownership: every holder calls [`ShaderData::add_ref_count`]
//! with `+1` when it starts using the data and `-1` when it lets go.

use crate::shader::macros::ShaderMacroCollection;

/// Which binding group a [`ShaderData`] feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderDataGroup {
    Scene,
    Camera,
}

#[derive(Debug, Clone)]
pub struct ShaderData {
    group: ShaderDataGroup,
    pub(crate) macro_collection: ShaderMacroCollection,
    ref_count: u32,
}

impl ShaderData {
    #[must_use]
    pub fn new(group: ShaderDataGroup) -> Self {
        Self {
            group,
            macro_collection: ShaderMacroCollection::new(),
            ref_count: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn group(&self) -> ShaderDataGroup {
        self.group
    }

    /// Macros contributed by this owner.
    #[inline]
    #[must_use]
    pub fn macros(&self) -> &ShaderMacroCollection {
        &self.macro_collection
    }

    #[inline]
    pub fn macros_mut(&mut self) -> &mut ShaderMacroCollection {
        &mut self.macro_collection
    }

    #[inline]
    pub fn enable_macro(&mut self, name: &str) {
        self.macro_collection.enable(name);
    }

    #[inline]
    pub fn enable_macro_with_value(&mut self, name: &str, value: &str) {
        self.macro_collection.enable_with_value(name, value);
    }

    #[inline]
    pub fn disable_macro(&mut self, name: &str) -> bool {
        self.macro_collection.disable(name)
    }

    #[inline]
    #[must_use]
    pub fn ref_count(&self) -> u32 {
        self.ref_count
    }

    /// True once the last holder has released the data.
    #[inline]
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.ref_count == 0
    }

    /// Adjusts the holder count by `delta`.
    ///
    /// The count never drops below zero; an unbalanced release is logged and
    /// ignored.
    pub fn add_ref_count(&mut self, delta: i32) {
        match self.ref_count.checked_add_signed(delta) {
            Some(count) => self.ref_count = count,
            None => {
                log::error!(
                    "{:?} shader data released more times than referenced (count {}, delta {})",
                    self.group,
                    self.ref_count,
                    delta
                );
                self.ref_count = 0;
            }
        }
    }
}
