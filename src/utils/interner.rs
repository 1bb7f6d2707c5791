//! Global String Interner
//!
//! Maps shader macro names and values to compact integer [`Symbol`]s so macro
//! collections compare and hash as plain integers.

use std::sync::LazyLock;

use lasso::{Spur, ThreadedRodeo};

static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::new);

/// Compact identifier of an interned string.
pub type Symbol = Spur;

/// Interns `s`, returning the existing symbol when it is already known.
#[inline]
pub fn intern(s: &str) -> Symbol {
    INTERNER.get_or_intern(s)
}

/// Looks up the symbol of an already interned string without allocating.
#[inline]
#[must_use]
pub fn get(s: &str) -> Option<Symbol> {
    INTERNER.get(s)
}

/// Resolves a symbol back to its string.
#[inline]
#[must_use]
pub fn resolve(sym: Symbol) -> &'static str {
    INTERNER.resolve(&sym)
}

/// Pre-interns macro names toggled by scenes and cameras every frame.
pub fn preload_scene_macros() {
    let common = [
        "SCENE_AMBIENT_SOLID",
        "SCENE_AMBIENT_SH",
        "SCENE_USE_SKY",
        "CAMERA_ORTHOGRAPHIC",
        "1",
    ];

    for name in common {
        intern(name);
    }
}
