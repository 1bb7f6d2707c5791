//! Scene background description.
//!
//! Pure data read by the render pipeline's clear/skybox step.

use glam::Vec4;

/// What to draw behind the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundMode {
    /// Hardware clear with [`Background::solid_color`].
    #[default]
    SolidColor,
    /// Sky rendered by the pipeline's skybox pass.
    Sky,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Background {
    pub mode: BackgroundMode,
    pub solid_color: Vec4,
}

impl Background {
    #[must_use]
    pub fn new(solid_color: Vec4) -> Self {
        Self {
            mode: BackgroundMode::SolidColor,
            solid_color,
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::new(Vec4::new(0.25, 0.25, 0.25, 1.0))
    }
}
