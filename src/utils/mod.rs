//! Utility Module
//!
//! - [`interner`]: String interning for shader macro names and values
//!
//! ```rust,ignore
//! use myth_scene::utils::interner;
//!
//! let sym1 = interner::intern("SCENE_USE_SKY");
//! let sym2 = interner::intern("SCENE_USE_SKY");
//! assert_eq!(sym1, sym2); // O(1) comparison
//! ```

pub mod interner;

pub use interner::Symbol;
