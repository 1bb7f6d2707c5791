//! Shader Macro Collections
//!
//! A [`ShaderMacroCollection`] is the set of `#define`s that selects a shader
//! variant. Collections come from three independent sources (the engine, the
//! scene's shader data and, per draw, the camera) and are unioned into one
//! aggregate by [`ShaderMacroCollection::union_collection`].
//!
//! Names and values are interned [`Symbol`]s kept in a sorted `Vec`, so two
//! collections holding the same macros compare and hash identically no matter
//! the order the macros were enabled in.
//!
//! ```rust,ignore
//! let mut engine = ShaderMacroCollection::new();
//! engine.enable("SCENE_USE_SKY");
//!
//! let mut scene = ShaderMacroCollection::new();
//! scene.enable_with_value("SCENE_FOG_MODE", "2");
//!
//! let mut out = ShaderMacroCollection::new();
//! ShaderMacroCollection::union_collection(&engine, &scene, &mut out);
//! assert_eq!(out.len(), 2);
//! ```

use std::hash::{Hash, Hasher};

use crate::utils::interner::{self, Symbol};

/// Value stored for a macro enabled without an explicit value.
const ENABLED_VALUE: &str = "1";

/// An ordered set of shader macro definitions.
///
/// # Performance
///
/// - Insertion/lookup: O(log n) binary search
/// - Union: O(n + m) merge of two sorted runs
/// - Comparison: integer comparison per entry
#[derive(Debug, Clone, Default)]
pub struct ShaderMacroCollection {
    macros: Vec<(Symbol, Symbol)>,
}

impl ShaderMacroCollection {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { macros: Vec::new() }
    }

    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            macros: Vec::with_capacity(capacity),
        }
    }

    /// Enables a valueless macro (`#define NAME 1`).
    pub fn enable(&mut self, name: &str) {
        self.enable_with_value(name, ENABLED_VALUE);
    }

    /// Enables a macro with a value, replacing any previous value.
    pub fn enable_with_value(&mut self, name: &str, value: &str) {
        let name_sym = interner::intern(name);
        let value_sym = interner::intern(value);
        self.enable_symbol(name_sym, value_sym);
    }

    #[inline]
    pub fn enable_symbol(&mut self, name: Symbol, value: Symbol) {
        match self.macros.binary_search_by_key(&name, |&(k, _)| k) {
            Ok(idx) => self.macros[idx].1 = value,
            Err(idx) => self.macros.insert(idx, (name, value)),
        }
    }

    /// Disables a macro. Returns whether it was enabled.
    pub fn disable(&mut self, name: &str) -> bool {
        interner::get(name).is_some_and(|sym| self.disable_symbol(sym))
    }

    #[inline]
    pub fn disable_symbol(&mut self, name: Symbol) -> bool {
        if let Ok(idx) = self.macros.binary_search_by_key(&name, |&(k, _)| k) {
            self.macros.remove(idx);
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        interner::get(name).is_some_and(|sym| self.is_enabled_symbol(sym))
    }

    #[inline]
    #[must_use]
    pub fn is_enabled_symbol(&self, name: Symbol) -> bool {
        self.macros.binary_search_by_key(&name, |&(k, _)| k).is_ok()
    }

    /// Returns the value of an enabled macro.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'static str> {
        let sym = interner::get(name)?;
        self.macros
            .binary_search_by_key(&sym, |&(k, _)| k)
            .ok()
            .map(|idx| interner::resolve(self.macros[idx].1))
    }

    #[inline]
    pub fn clear(&mut self) {
        self.macros.clear();
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.macros.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &(Symbol, Symbol)> {
        self.macros.iter()
    }

    /// Iterates `(name, value)` pairs as strings.
    pub fn iter_strings(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.macros
            .iter()
            .map(|&(k, v)| (interner::resolve(k), interner::resolve(v)))
    }

    /// Merges `other` into `self`; values from `other` win on conflict.
    pub fn merge(&mut self, other: &ShaderMacroCollection) {
        for &(name, value) in &other.macros {
            self.enable_symbol(name, value);
        }
    }

    /// Overwrites `out` with the union of `left` and `right`.
    ///
    /// `out` is cleared first and reuses its allocation, so calling this every
    /// frame does not allocate once the aggregate has reached its working size.
    /// When both inputs define the same macro the value from `right` is kept.
    pub fn union_collection(
        left: &ShaderMacroCollection,
        right: &ShaderMacroCollection,
        out: &mut ShaderMacroCollection,
    ) {
        let out_macros = &mut out.macros;
        out_macros.clear();
        out_macros.reserve(left.macros.len() + right.macros.len());

        let (mut i, mut j) = (0, 0);
        let (a, b) = (&left.macros, &right.macros);
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => {
                    out_macros.push(a[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    out_macros.push(b[j]);
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    out_macros.push(b[j]);
                    i += 1;
                    j += 1;
                }
            }
        }
        out_macros.extend_from_slice(&a[i..]);
        out_macros.extend_from_slice(&b[j..]);
    }

    /// Content hash used as a shader variant cache key.
    #[must_use]
    pub fn compute_hash(&self) -> u64 {
        use std::hash::BuildHasher;

        rustc_hash::FxBuildHasher.hash_one(self)
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[(Symbol, Symbol)] {
        &self.macros
    }
}

impl Hash for ShaderMacroCollection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.macros.hash(state);
    }
}

impl PartialEq for ShaderMacroCollection {
    fn eq(&self, other: &Self) -> bool {
        self.macros == other.macros
    }
}

impl Eq for ShaderMacroCollection {}

impl From<&[(&str, &str)]> for ShaderMacroCollection {
    fn from(macros: &[(&str, &str)]) -> Self {
        let mut result = Self::with_capacity(macros.len());
        for (name, value) in macros {
            result.enable_with_value(name, value);
        }
        result
    }
}
