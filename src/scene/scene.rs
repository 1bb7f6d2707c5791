use crate::scene::background::{Background, BackgroundMode};
use crate::scene::{CameraKey, EntityId, LightKey};
use crate::shader::{ShaderData, ShaderDataGroup, ShaderMacroCollection};

/// A scene: an ordered list of root entities plus the per-scene registries the
/// render loop reads every frame.
///
/// `Scene` only manages its own registries. Operations that also touch
/// entities, lights or the engine's active-scene slot live on
/// [`SceneManager`](crate::scene::SceneManager), which owns every arena.
///
/// # Registries
///
/// - `root_entities`: insertion ordered, no duplicates; the default
///   front-to-back search and render order.
/// - `active_cameras`: cameras rendering into this scene, in attach order.
/// - `ambient_light`: always populated after construction.
/// - `global_shader_macro`: engine + scene macro aggregate, rebuilt each frame.
#[derive(Debug)]
pub struct Scene {
    /// Display name, not required to be unique.
    pub name: String,
    pub background: Background,

    pub(crate) root_entities: Vec<EntityId>,
    pub(crate) active_cameras: Vec<CameraKey>,
    pub(crate) ambient_light: LightKey,

    pub(crate) shader_data: ShaderData,
    pub(crate) global_shader_macro: ShaderMacroCollection,

    pub(crate) is_active_in_engine: bool,
    pub(crate) destroyed: bool,
}

impl Scene {
    /// Builds a scene holding one reference on its shader data.
    pub(crate) fn new(name: &str, ambient_light: LightKey, background: Background) -> Self {
        let mut shader_data = ShaderData::new(ShaderDataGroup::Scene);
        shader_data.add_ref_count(1);

        Self {
            name: name.to_string(),
            background,
            root_entities: Vec::new(),
            active_cameras: Vec::new(),
            ambient_light,
            shader_data,
            global_shader_macro: ShaderMacroCollection::new(),
            is_active_in_engine: false,
            destroyed: false,
        }
    }

    // ========================================================================
    // Read-only views
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn root_entities(&self) -> &[EntityId] {
        &self.root_entities
    }

    #[inline]
    #[must_use]
    pub fn root_entities_count(&self) -> usize {
        self.root_entities.len()
    }

    /// Root entity at `index`, `None` when out of range.
    #[inline]
    #[must_use]
    pub fn get_root_entity(&self, index: usize) -> Option<EntityId> {
        self.root_entities.get(index).copied()
    }

    /// The primary root (index 0).
    #[inline]
    #[must_use]
    pub fn root_entity(&self) -> Option<EntityId> {
        self.get_root_entity(0)
    }

    #[inline]
    #[must_use]
    pub fn active_cameras(&self) -> &[CameraKey] {
        &self.active_cameras
    }

    #[inline]
    #[must_use]
    pub fn ambient_light(&self) -> LightKey {
        self.ambient_light
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

    /// The aggregated macro set. Overwritten by every
    /// [`update_shader_data`](Self::update_shader_data).
    #[inline]
    #[must_use]
    pub fn global_shader_macro(&self) -> &ShaderMacroCollection {
        &self.global_shader_macro
    }

    #[inline]
    #[must_use]
    pub fn is_active_in_engine(&self) -> bool {
        self.is_active_in_engine
    }

    #[inline]
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    // ========================================================================
    // Camera registry
    // ========================================================================

    /// Appends `camera` to the render list.
    ///
    /// Returns `false` and leaves the list untouched if it is already attached.
    pub fn attach_render_camera(&mut self, camera: CameraKey) -> bool {
        if self.active_cameras.contains(&camera) {
            log::warn!("Camera {camera:?} already attached to scene '{}'.", self.name);
            return false;
        }
        self.active_cameras.push(camera);
        true
    }

    /// Removes `camera` from the render list. Returns whether it was attached.
    pub fn detach_render_camera(&mut self, camera: CameraKey) -> bool {
        if let Some(pos) = self.active_cameras.iter().position(|&c| c == camera) {
            self.active_cameras.remove(pos);
            true
        } else {
            false
        }
    }

    // ========================================================================
    // Shader macro aggregation
    // ========================================================================

    /// Rebuilds the macro aggregate from the engine's global macros and the
    /// scene's own shader data. Called once per frame.
    pub fn update_shader_data(&mut self, engine_macros: &ShaderMacroCollection) {
        match self.background.mode {
            BackgroundMode::Sky => self.shader_data.enable_macro("SCENE_USE_SKY"),
            BackgroundMode::SolidColor => {
                self.shader_data.disable_macro("SCENE_USE_SKY");
            }
        }

        ShaderMacroCollection::union_collection(
            engine_macros,
            &self.shader_data.macro_collection,
            &mut self.global_shader_macro,
        );
    }

    /// Per-draw macro set: the scene aggregate unioned with a camera's macros.
    pub fn camera_shader_macro(
        &self,
        camera_macros: &ShaderMacroCollection,
        out: &mut ShaderMacroCollection,
    ) {
        ShaderMacroCollection::union_collection(&self.global_shader_macro, camera_macros, out);
    }

    // ========================================================================
    // Internal
    // ========================================================================

    /// Drops `entity` from the root list, keeping the order of the rest.
    pub(crate) fn remove_root(&mut self, entity: EntityId) -> bool {
        if let Some(pos) = self.root_entities.iter().position(|&e| e == entity) {
            self.root_entities.remove(pos);
            true
        } else {
            false
        }
    }
}
