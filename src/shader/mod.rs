//! Shader State
//!
//! - [`ShaderMacroCollection`]: interned, sorted macro sets and their union
//! - [`ShaderData`]: ref-counted per-owner shading state

pub mod macros;
pub mod shader_data;

pub use macros::ShaderMacroCollection;
pub use shader_data::{ShaderData, ShaderDataGroup};
