use crate::shader::{ShaderData, ShaderDataGroup};

/// A render camera.
///
/// The scene graph treats cameras as opaque handles: it only keeps the
/// ordered list of cameras rendering into each scene and unions each
/// camera's macros with the scene aggregate at draw time.
#[derive(Debug, Clone)]
pub struct Camera {
    pub name: String,
    pub(crate) shader_data: ShaderData,
    orthographic: bool,
}

impl Camera {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            shader_data: ShaderData::new(ShaderDataGroup::Camera),
            orthographic: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn shader_data(&self) -> &ShaderData {
        &self.shader_data
    }

    #[inline]
    pub fn shader_data_mut(&mut self) -> &mut ShaderData {
        &mut self.shader_data
    }

    #[inline]
    #[must_use]
    pub fn is_orthographic(&self) -> bool {
        self.orthographic
    }

    /// Switches projection mode, keeping `CAMERA_ORTHOGRAPHIC` in sync.
    pub fn set_orthographic(&mut self, orthographic: bool) {
        self.orthographic = orthographic;
        if orthographic {
            self.shader_data.enable_macro("CAMERA_ORTHOGRAPHIC");
        } else {
            self.shader_data.disable_macro("CAMERA_ORTHOGRAPHIC");
        }
    }
}
