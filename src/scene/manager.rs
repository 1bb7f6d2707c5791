//! Scene Manager
//!
//! Owns every arena of the scene graph (entities, scenes, cameras, ambient
//! lights) and the engine's single active-scene designation.
//!
//! Entities live in one engine-wide arena rather than per scene so an entity
//! can move between scenes by rewriting keys; no node is ever copied or
//! re-allocated by a cross-scene transfer.
//!
//! The entity tree operations live in `hierarchy.rs` and the root registry
//! operations in `roots.rs`; both extend this type.

use slotmap::SlotMap;

use crate::errors::{Result, SceneError};
use crate::scene::activation::ActivationCascade;
use crate::scene::background::Background;
use crate::scene::camera::Camera;
use crate::scene::entity::Entity;
use crate::scene::light::{AmbientLight, DiffuseMode};
use crate::scene::scene::Scene;
use crate::scene::{CameraKey, EntityId, LightKey, SceneHandle};
use crate::settings::SceneSettings;
use crate::shader::ShaderMacroCollection;

pub struct SceneManager {
    pub(crate) entities: SlotMap<EntityId, Entity>,
    pub(crate) scenes: SlotMap<SceneHandle, Scene>,
    pub(crate) cameras: SlotMap<CameraKey, Camera>,
    pub(crate) lights: SlotMap<LightKey, AmbientLight>,

    active_scene: Option<SceneHandle>,

    pub(crate) cascade: ActivationCascade,
    /// Scratch buffer for subtree walks outside the cascade.
    pub(crate) walk: Vec<EntityId>,

    settings: SceneSettings,
}

impl SceneManager {
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(SceneSettings::default())
    }

    #[must_use]
    pub fn with_settings(settings: SceneSettings) -> Self {
        Self {
            entities: SlotMap::with_capacity_and_key(settings.entity_capacity),
            scenes: SlotMap::with_key(),
            cameras: SlotMap::with_key(),
            lights: SlotMap::with_key(),
            active_scene: None,
            cascade: ActivationCascade::default(),
            walk: Vec::new(),
            settings,
        }
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    // ========================================================================
    // Scene lifecycle
    // ========================================================================

    /// Creates a scene with a default ambient light installed.
    pub fn create_scene(&mut self, name: &str) -> SceneHandle {
        let light = AmbientLight::new(
            self.settings.default_ambient_color,
            self.settings.default_ambient_intensity,
        );
        let light_key = self.lights.insert(light);
        let background = Background::new(self.settings.default_background);

        let handle = self
            .scenes
            .insert(Scene::new(name, light_key, background));

        let light = &mut self.lights[light_key];
        light.set_scene(Some(handle));
        light.apply_macros(&mut self.scenes[handle].shader_data);

        log::debug!("Created scene '{name}' ({handle:?})");
        handle
    }

    #[inline]
    #[must_use]
    pub fn scene(&self, handle: SceneHandle) -> Option<&Scene> {
        self.scenes.get(handle)
    }

    #[inline]
    pub fn scene_mut(&mut self, handle: SceneHandle) -> Option<&mut Scene> {
        self.scenes.get_mut(handle)
    }

    /// Iterates every scene still held by the manager, destroyed ones included.
    pub fn scenes(&self) -> impl Iterator<Item = (SceneHandle, &Scene)> {
        self.scenes.iter()
    }

    /// Looks up a scene that may still be mutated.
    pub(crate) fn live_scene(&self, handle: SceneHandle) -> Result<&Scene> {
        let scene = self
            .scenes
            .get(handle)
            .ok_or(SceneError::SceneNotFound(handle))?;
        if scene.destroyed {
            log::warn!("Rejected mutation of destroyed scene '{}'", scene.name);
            return Err(SceneError::SceneDestroyed(handle));
        }
        Ok(scene)
    }

    /// Tears a scene down. Calling it again is a no-op.
    ///
    /// Order: clear the engine's active designation if it points here, destroy
    /// every root entity (and their subtrees), clear the root and camera lists,
    /// release the scene's shader data reference.
    ///
    /// The scene stays addressable (as destroyed) until [`remove_scene`](Self::remove_scene).
    pub fn destroy_scene(&mut self, handle: SceneHandle) -> Result<()> {
        let scene = self
            .scenes
            .get(handle)
            .ok_or(SceneError::SceneNotFound(handle))?;
        if scene.destroyed {
            return Ok(());
        }

        if self.active_scene == Some(handle) {
            self.set_active_scene(None)?;
        }

        let roots = std::mem::take(&mut self.scenes[handle].root_entities);
        for root in roots {
            self.destroy_entity(root);
        }

        let scene = &mut self.scenes[handle];
        scene.root_entities.clear();
        scene.active_cameras.clear();
        scene.shader_data.add_ref_count(-1);
        scene.destroyed = true;

        log::debug!("Destroyed scene '{}' ({handle:?})", scene.name);
        Ok(())
    }

    /// Destroys the scene and frees its slot; the handle goes stale.
    ///
    /// The installed ambient light is freed with it, unless another live
    /// scene's slot still holds that light.
    pub fn remove_scene(&mut self, handle: SceneHandle) -> Result<()> {
        self.destroy_scene(handle)?;
        let Some(scene) = self.scenes.remove(handle) else {
            return Ok(());
        };

        let key = scene.ambient_light;
        if self.lights.get(key).is_some_and(|l| l.scene() == Some(handle)) {
            if self.is_light_installed(key) {
                self.lights[key].set_scene(None);
            } else {
                self.lights.remove(key);
            }
        }
        Ok(())
    }

    // ========================================================================
    // Active scene designation
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn active_scene(&self) -> Option<SceneHandle> {
        self.active_scene
    }

    /// Changes the engine's active scene.
    ///
    /// The previous scene's roots are cascaded inactive before the new scene's
    /// roots are cascaded active. Re-designating the current scene is a no-op.
    pub fn set_active_scene(&mut self, handle: Option<SceneHandle>) -> Result<()> {
        if self.active_scene == handle {
            return Ok(());
        }
        if let Some(h) = handle {
            self.live_scene(h)?;
        }

        if let Some(old) = self.active_scene.take() {
            self.process_scene_active(old, false);
        }
        self.active_scene = handle;
        if let Some(new) = handle {
            self.process_scene_active(new, true);
        }

        log::debug!("Active scene changed to {handle:?}");
        Ok(())
    }

    /// Flips a scene's engine-active flag and cascades over its roots, last
    /// root first, skipping roots whose local flag is off.
    fn process_scene_active(&mut self, handle: SceneHandle, active: bool) {
        let Some(scene) = self.scenes.get_mut(handle) else {
            return;
        };
        scene.is_active_in_engine = active;

        let scene = &self.scenes[handle];
        for &root in scene.root_entities.iter().rev() {
            let Some(entity) = self.entities.get(root) else {
                continue;
            };
            if !entity.is_active {
                continue;
            }
            if active {
                self.cascade.activate(&mut self.entities, root);
            } else {
                self.cascade.deactivate(&mut self.entities, root);
            }
        }
    }

    // ========================================================================
    // Cameras
    // ========================================================================

    pub fn create_camera(&mut self, camera: Camera) -> CameraKey {
        self.cameras.insert(camera)
    }

    #[inline]
    #[must_use]
    pub fn camera(&self, key: CameraKey) -> Option<&Camera> {
        self.cameras.get(key)
    }

    #[inline]
    pub fn camera_mut(&mut self, key: CameraKey) -> Option<&mut Camera> {
        self.cameras.get_mut(key)
    }

    /// Frees a camera, detaching it from every scene it renders into.
    pub fn remove_camera(&mut self, key: CameraKey) -> Option<Camera> {
        let camera = self.cameras.remove(key)?;
        for (_, scene) in &mut self.scenes {
            scene.detach_render_camera(key);
        }
        Some(camera)
    }

    /// Starts rendering `camera` into `scene`.
    ///
    /// `Ok(false)` means the camera was already attached (a warning is logged).
    pub fn attach_render_camera(&mut self, scene: SceneHandle, camera: CameraKey) -> Result<bool> {
        self.live_scene(scene)?;
        if !self.cameras.contains_key(camera) {
            return Err(SceneError::CameraNotFound(camera));
        }
        Ok(self.scenes[scene].attach_render_camera(camera))
    }

    /// Stops rendering `camera` into `scene`. Detaching an absent camera is a no-op.
    pub fn detach_render_camera(&mut self, scene: SceneHandle, camera: CameraKey) -> Result<bool> {
        self.live_scene(scene)?;
        Ok(self.scenes[scene].detach_render_camera(camera))
    }

    /// Writes the per-draw macro set for `camera` rendering `scene` into `out`.
    pub fn camera_shader_macro(
        &self,
        scene: SceneHandle,
        camera: CameraKey,
        out: &mut ShaderMacroCollection,
    ) -> Result<()> {
        let scene = self
            .scenes
            .get(scene)
            .ok_or(SceneError::SceneNotFound(scene))?;
        let camera = self
            .cameras
            .get(camera)
            .ok_or(SceneError::CameraNotFound(camera))?;
        scene.camera_shader_macro(camera.shader_data.macros(), out);
        Ok(())
    }

    // ========================================================================
    // Ambient light slot
    // ========================================================================

    pub fn create_ambient_light(&mut self, light: AmbientLight) -> LightKey {
        self.lights.insert(light)
    }

    #[inline]
    #[must_use]
    pub fn ambient_light(&self, key: LightKey) -> Option<&AmbientLight> {
        self.lights.get(key)
    }

    #[inline]
    pub fn ambient_light_mut(&mut self, key: LightKey) -> Option<&mut AmbientLight> {
        self.lights.get_mut(key)
    }

    /// Frees an ambient light that no live scene has installed.
    ///
    /// Lights still sitting in a live scene's slot are refused with
    /// [`SceneError::LightInUse`]; replace them with
    /// [`set_ambient_light`](Self::set_ambient_light) first.
    pub fn remove_ambient_light(&mut self, key: LightKey) -> Result<AmbientLight> {
        if !self.lights.contains_key(key) {
            return Err(SceneError::LightNotFound(key));
        }
        if self.is_light_installed(key) {
            log::warn!("Refused to remove ambient light {key:?}: still installed");
            return Err(SceneError::LightInUse(key));
        }
        self.lights
            .remove(key)
            .ok_or(SceneError::LightNotFound(key))
    }

    /// True if any live scene's ambient slot holds `key`.
    fn is_light_installed(&self, key: LightKey) -> bool {
        self.scenes
            .values()
            .any(|scene| !scene.destroyed && scene.ambient_light == key)
    }

    /// Changes a light's diffuse mode and refreshes the macros of the scene
    /// it is associated with.
    pub fn set_ambient_diffuse_mode(&mut self, key: LightKey, mode: DiffuseMode) -> Result<()> {
        let light = self
            .lights
            .get_mut(key)
            .ok_or(SceneError::LightNotFound(key))?;
        if light.diffuse_mode() == mode {
            return Ok(());
        }
        light.set_diffuse_mode(mode);

        if let Some(handle) = light.scene()
            && let Some(scene) = self.scenes.get_mut(handle)
        {
            light.apply_macros(&mut scene.shader_data);
        }
        Ok(())
    }

    /// The light currently installed in `scene`.
    #[must_use]
    pub fn scene_ambient_light(&self, scene: SceneHandle) -> Option<&AmbientLight> {
        let key = self.scenes.get(scene)?.ambient_light;
        self.lights.get(key)
    }

    /// Installs `light` as the scene's ambient light.
    ///
    /// - `None` is rejected with a warning; the installed light stays and
    ///   `Ok(false)` is returned.
    /// - Re-installing the current light is a no-op.
    /// - Otherwise the previous light's scene association is cleared (only if
    ///   it still points here), the new light is associated with this scene,
    ///   then the slot is switched.
    pub fn set_ambient_light(&mut self, scene: SceneHandle, light: Option<LightKey>) -> Result<bool> {
        self.live_scene(scene)?;
        let Some(light) = light else {
            log::warn!("The scene must have one ambient light");
            return Ok(false);
        };
        if !self.lights.contains_key(light) {
            return Err(SceneError::LightNotFound(light));
        }

        let last = self.scenes[scene].ambient_light;
        if last == light {
            return Ok(true);
        }

        if let Some(last_light) = self.lights.get_mut(last)
            && last_light.scene() == Some(scene)
        {
            last_light.set_scene(None);
        }
        let new_light = &mut self.lights[light];
        new_light.set_scene(Some(scene));

        let scene = &mut self.scenes[scene];
        new_light.apply_macros(&mut scene.shader_data);
        scene.ambient_light = light;
        Ok(true)
    }

    // ========================================================================
    // Per-frame
    // ========================================================================

    /// Rebuilds the active scene's macro aggregate. No-op without an active scene.
    pub fn update_shader_data(&mut self, engine_macros: &ShaderMacroCollection) {
        if let Some(handle) = self.active_scene
            && let Some(scene) = self.scenes.get_mut(handle)
        {
            scene.update_shader_data(engine_macros);
        }
    }
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}
