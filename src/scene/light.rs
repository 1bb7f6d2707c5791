use glam::Vec3;

use crate::scene::SceneHandle;
use crate::shader::ShaderData;

/// How the ambient term is evaluated in the shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffuseMode {
    #[default]
    SolidColor,
    SphericalHarmonics,
}

/// The single ambient light slot of a scene.
///
/// A light is associated with at most one scene at a time. The association
/// is only written by [`SceneManager::set_ambient_light`](crate::scene::SceneManager::set_ambient_light).
#[derive(Debug, Clone)]
pub struct AmbientLight {
    pub color: Vec3,
    pub intensity: f32,
    diffuse_mode: DiffuseMode,
    scene: Option<SceneHandle>,
}

impl AmbientLight {
    #[must_use]
    pub fn new(color: Vec3, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            diffuse_mode: DiffuseMode::SolidColor,
            scene: None,
        }
    }

    /// Same light with a different diffuse mode, for use before installation.
    #[must_use]
    pub fn with_diffuse_mode(mut self, mode: DiffuseMode) -> Self {
        self.diffuse_mode = mode;
        self
    }

    #[inline]
    #[must_use]
    pub fn diffuse_mode(&self) -> DiffuseMode {
        self.diffuse_mode
    }

    /// Changing the mode of an installed light goes through
    /// [`SceneManager::set_ambient_diffuse_mode`](crate::scene::SceneManager::set_ambient_diffuse_mode)
    /// so the owning scene's macros follow.
    #[inline]
    pub(crate) fn set_diffuse_mode(&mut self, mode: DiffuseMode) {
        self.diffuse_mode = mode;
    }

    /// The scene this light is currently installed in.
    #[inline]
    #[must_use]
    pub fn scene(&self) -> Option<SceneHandle> {
        self.scene
    }

    #[inline]
    pub(crate) fn set_scene(&mut self, scene: Option<SceneHandle>) {
        self.scene = scene;
    }

    /// Writes the diffuse-mode macros into the owning scene's shader data.
    pub(crate) fn apply_macros(&self, shader_data: &mut ShaderData) {
        match self.diffuse_mode {
            DiffuseMode::SolidColor => {
                shader_data.disable_macro("SCENE_AMBIENT_SH");
                shader_data.enable_macro("SCENE_AMBIENT_SOLID");
            }
            DiffuseMode::SphericalHarmonics => {
                shader_data.disable_macro("SCENE_AMBIENT_SOLID");
                shader_data.enable_macro("SCENE_AMBIENT_SH");
            }
        }
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::new(Vec3::new(0.212, 0.227, 0.259), 1.0)
    }
}
