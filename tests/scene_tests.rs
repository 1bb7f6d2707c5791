//! Scene Registry & Lifecycle Tests
//!
//! Tests for:
//! - Ambient light slot (default install, null rejection, handoff)
//! - Camera registry (ordering, duplicate rejection, detach)
//! - Shader macro aggregation (engine + scene, per-camera union)
//! - Scene destruction (idempotence, ref count balance, active designation)

mod common;

use glam::Vec3;
use myth_scene::{
    AmbientLight, BackgroundMode, Camera, DiffuseMode, Engine, SceneError, SceneManager,
    SceneSettings, ShaderMacroCollection,
};

use common::{attach_counter, init_logger};

// ============================================================================
// Ambient Light
// ============================================================================

#[test]
fn new_scene_installs_default_ambient_light() {
    let mut graph = SceneManager::new();
    let scene = graph.create_scene("Main");

    let key = graph.scene(scene).unwrap().ambient_light();
    let light = graph.ambient_light(key).unwrap();
    assert_eq!(light.scene(), Some(scene));
    assert!(graph.scene(scene).unwrap().shader_data().macros().is_enabled("SCENE_AMBIENT_SOLID"));
}

#[test]
fn settings_drive_scene_defaults() {
    let settings = SceneSettings {
        default_ambient_color: Vec3::new(1.0, 0.0, 0.0),
        default_ambient_intensity: 0.5,
        ..Default::default()
    };
    let mut graph = SceneManager::with_settings(settings.clone());
    let scene = graph.create_scene("Main");

    let light = graph.scene_ambient_light(scene).unwrap();
    assert_eq!(light.color, settings.default_ambient_color);
    assert!((light.intensity - 0.5).abs() < f32::EPSILON);
    assert_eq!(
        graph.scene(scene).unwrap().background.solid_color,
        settings.default_background
    );
}

#[test]
fn null_ambient_light_is_rejected() {
    init_logger();
    let mut graph = SceneManager::new();
    let scene = graph.create_scene("Main");
    let before = graph.scene(scene).unwrap().ambient_light();

    assert_eq!(graph.set_ambient_light(scene, None), Ok(false));

    assert_eq!(graph.scene(scene).unwrap().ambient_light(), before);
    assert_eq!(graph.ambient_light(before).unwrap().scene(), Some(scene));
}

#[test]
fn replacing_ambient_light_hands_off_association() {
    let mut graph = SceneManager::new();
    let scene = graph.create_scene("Main");
    let old = graph.scene(scene).unwrap().ambient_light();

    let light =
        AmbientLight::new(Vec3::ONE, 2.0).with_diffuse_mode(DiffuseMode::SphericalHarmonics);
    let new = graph.create_ambient_light(light);
    assert_eq!(graph.ambient_light(new).unwrap().scene(), None);

    assert_eq!(graph.set_ambient_light(scene, Some(new)), Ok(true));

    assert_eq!(graph.scene(scene).unwrap().ambient_light(), new);
    assert_eq!(graph.ambient_light(old).unwrap().scene(), None);
    assert_eq!(graph.ambient_light(new).unwrap().scene(), Some(scene));

    let macros = graph.scene(scene).unwrap().shader_data().macros();
    assert!(macros.is_enabled("SCENE_AMBIENT_SH"));
    assert!(!macros.is_enabled("SCENE_AMBIENT_SOLID"));
}

#[test]
fn reinstalling_same_ambient_light_is_noop() {
    let mut graph = SceneManager::new();
    let scene = graph.create_scene("Main");
    let current = graph.scene(scene).unwrap().ambient_light();

    assert_eq!(graph.set_ambient_light(scene, Some(current)), Ok(true));
    assert_eq!(graph.ambient_light(current).unwrap().scene(), Some(scene));
}

#[test]
fn light_moved_between_scenes_is_associated_with_one() {
    let mut graph = SceneManager::new();
    let s1 = graph.create_scene("One");
    let s2 = graph.create_scene("Two");
    let shared = graph.create_ambient_light(AmbientLight::default());

    graph.set_ambient_light(s1, Some(shared)).unwrap();
    graph.set_ambient_light(s2, Some(shared)).unwrap();

    assert_eq!(graph.ambient_light(shared).unwrap().scene(), Some(s2));
}

#[test]
fn replacing_light_in_one_scene_leaves_other_holder_associated() {
    let mut graph = SceneManager::new();
    let a = graph.create_scene("A");
    let b = graph.create_scene("B");
    let moved = graph.scene(a).unwrap().ambient_light();
    graph.set_ambient_light(b, Some(moved)).unwrap();

    let fresh = graph.create_ambient_light(AmbientLight::default());
    graph.set_ambient_light(a, Some(fresh)).unwrap();

    assert_eq!(graph.scene(b).unwrap().ambient_light(), moved);
    assert_eq!(graph.ambient_light(moved).unwrap().scene(), Some(b));
    assert_eq!(graph.ambient_light(fresh).unwrap().scene(), Some(a));
}

#[test]
fn installed_ambient_light_cannot_be_removed() {
    init_logger();
    let mut graph = SceneManager::new();
    let scene = graph.create_scene("Main");
    let installed = graph.scene(scene).unwrap().ambient_light();

    assert_eq!(
        graph.remove_ambient_light(installed).unwrap_err(),
        SceneError::LightInUse(installed)
    );

    let replacement = graph.create_ambient_light(AmbientLight::default());
    graph.set_ambient_light(scene, Some(replacement)).unwrap();

    assert!(graph.remove_ambient_light(installed).is_ok());
    assert!(graph.ambient_light(installed).is_none());
    assert_eq!(
        graph.remove_ambient_light(installed).unwrap_err(),
        SceneError::LightNotFound(installed)
    );
}

#[test]
fn diffuse_mode_change_reaches_next_frame_aggregate() {
    let mut engine = Engine::default();
    let scene = engine.scene_manager.create_scene("Main");
    engine.scene_manager.set_active_scene(Some(scene)).unwrap();
    let light = engine.scene_manager.scene(scene).unwrap().ambient_light();
    engine.update();

    engine
        .scene_manager
        .set_ambient_diffuse_mode(light, DiffuseMode::SphericalHarmonics)
        .unwrap();
    engine.update();

    let aggregate = engine.scene_manager.scene(scene).unwrap().global_shader_macro();
    assert!(aggregate.is_enabled("SCENE_AMBIENT_SH"));
    assert!(!aggregate.is_enabled("SCENE_AMBIENT_SOLID"));
    assert_eq!(
        engine.scene_manager.ambient_light(light).unwrap().diffuse_mode(),
        DiffuseMode::SphericalHarmonics
    );
}

// ============================================================================
// Camera Registry
// ============================================================================

#[test]
fn cameras_keep_attach_order() {
    let mut graph = SceneManager::new();
    let scene = graph.create_scene("Main");
    let c1 = graph.create_camera(Camera::new("Main"));
    let c2 = graph.create_camera(Camera::new("Minimap"));
    let c3 = graph.create_camera(Camera::new("Mirror"));

    for cam in [c2, c1, c3] {
        assert_eq!(graph.attach_render_camera(scene, cam), Ok(true));
    }

    assert_eq!(graph.scene(scene).unwrap().active_cameras(), &[c2, c1, c3]);
}

#[test]
fn attaching_camera_twice_keeps_single_entry() {
    init_logger();
    let mut graph = SceneManager::new();
    let scene = graph.create_scene("Main");
    let cam = graph.create_camera(Camera::new("Main"));

    assert_eq!(graph.attach_render_camera(scene, cam), Ok(true));
    assert_eq!(graph.attach_render_camera(scene, cam), Ok(false));

    assert_eq!(graph.scene(scene).unwrap().active_cameras(), &[cam]);
}

#[test]
fn detaching_absent_camera_is_silent() {
    let mut graph = SceneManager::new();
    let scene = graph.create_scene("Main");
    let c1 = graph.create_camera(Camera::new("A"));
    let c2 = graph.create_camera(Camera::new("B"));
    let c3 = graph.create_camera(Camera::new("C"));
    graph.attach_render_camera(scene, c1).unwrap();
    graph.attach_render_camera(scene, c2).unwrap();
    graph.attach_render_camera(scene, c3).unwrap();

    assert_eq!(graph.detach_render_camera(scene, c2), Ok(true));
    assert_eq!(graph.detach_render_camera(scene, c2), Ok(false));

    assert_eq!(graph.scene(scene).unwrap().active_cameras(), &[c1, c3]);
}

#[test]
fn removing_camera_detaches_it_everywhere() {
    let mut graph = SceneManager::new();
    let s1 = graph.create_scene("One");
    let s2 = graph.create_scene("Two");
    let cam = graph.create_camera(Camera::new("Shared"));
    graph.attach_render_camera(s1, cam).unwrap();
    graph.attach_render_camera(s2, cam).unwrap();

    assert!(graph.remove_camera(cam).is_some());

    assert!(graph.scene(s1).unwrap().active_cameras().is_empty());
    assert!(graph.scene(s2).unwrap().active_cameras().is_empty());
    assert_eq!(
        graph.attach_render_camera(s1, cam),
        Err(SceneError::CameraNotFound(cam))
    );
}

// ============================================================================
// Shader Macro Aggregation
// ============================================================================

#[test]
fn engine_update_unions_engine_and_scene_macros() {
    let mut engine = Engine::default();
    let scene = engine.scene_manager.create_scene("Main");
    engine.scene_manager.set_active_scene(Some(scene)).unwrap();

    engine.macro_collection.enable("ENGINE_FLAG");
    engine
        .scene_manager
        .scene_mut(scene)
        .unwrap()
        .shader_data_mut()
        .enable_macro_with_value("SCENE_FOG_MODE", "2");

    engine.update();

    let aggregate = engine.scene_manager.scene(scene).unwrap().global_shader_macro();
    assert!(aggregate.is_enabled("ENGINE_FLAG"));
    assert_eq!(aggregate.get("SCENE_FOG_MODE"), Some("2"));
    assert!(aggregate.is_enabled("SCENE_AMBIENT_SOLID"));
    assert_eq!(engine.frame_count(), 1);
}

#[test]
fn aggregate_is_overwritten_each_frame() {
    let mut engine = Engine::default();
    let scene = engine.scene_manager.create_scene("Main");
    engine.scene_manager.set_active_scene(Some(scene)).unwrap();

    engine.macro_collection.enable("TRANSIENT");
    engine.update();
    assert!(
        engine
            .scene_manager
            .scene(scene)
            .unwrap()
            .global_shader_macro()
            .is_enabled("TRANSIENT")
    );

    engine.macro_collection.disable("TRANSIENT");
    engine.scene_manager.scene_mut(scene).unwrap().background.mode = BackgroundMode::Sky;
    engine.update();

    let aggregate = engine.scene_manager.scene(scene).unwrap().global_shader_macro();
    assert!(!aggregate.is_enabled("TRANSIENT"));
    assert!(aggregate.is_enabled("SCENE_USE_SKY"));
}

#[test]
fn camera_macros_are_unioned_per_draw() {
    let mut engine = Engine::default();
    let graph = &mut engine.scene_manager;
    let scene = graph.create_scene("Main");
    graph.set_active_scene(Some(scene)).unwrap();

    let mut camera = Camera::new("Ortho");
    camera.set_orthographic(true);
    let cam = graph.create_camera(camera);

    engine.macro_collection.enable("ENGINE_FLAG");
    engine.update();

    let mut per_draw = ShaderMacroCollection::new();
    engine
        .scene_manager
        .camera_shader_macro(scene, cam, &mut per_draw)
        .unwrap();

    assert!(per_draw.is_enabled("ENGINE_FLAG"));
    assert!(per_draw.is_enabled("CAMERA_ORTHOGRAPHIC"));
    // The scene aggregate itself is not touched by per-draw unions.
    assert!(
        !engine
            .scene_manager
            .scene(scene)
            .unwrap()
            .global_shader_macro()
            .is_enabled("CAMERA_ORTHOGRAPHIC")
    );
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn scene_holds_one_shader_data_reference() {
    let mut graph = SceneManager::new();
    let scene = graph.create_scene("Main");
    assert_eq!(graph.scene(scene).unwrap().shader_data().ref_count(), 1);
}

#[test]
fn destroy_twice_is_noop_second_time() {
    let mut graph = SceneManager::new();
    let scene = graph.create_scene("Main");
    let root = graph.create_root_entity(scene, "Root").unwrap();
    let child = graph.create_child(root, "Child").unwrap();
    let cam = graph.create_camera(Camera::new("Main"));
    graph.attach_render_camera(scene, cam).unwrap();
    let counter = attach_counter(&mut graph, child);

    graph.destroy_scene(scene).unwrap();

    let s = graph.scene(scene).unwrap();
    assert!(s.is_destroyed());
    assert!(s.root_entities().is_empty());
    assert!(s.active_cameras().is_empty());
    assert_eq!(s.shader_data().ref_count(), 0);
    assert!(!graph.contains_entity(root));
    assert!(!graph.contains_entity(child));
    assert_eq!(counter.destroyed(), 1);

    graph.destroy_scene(scene).unwrap();

    let s = graph.scene(scene).unwrap();
    assert!(s.root_entities().is_empty());
    assert!(s.active_cameras().is_empty());
    assert_eq!(s.shader_data().ref_count(), 0);
    assert_eq!(counter.destroyed(), 1);
}

#[test]
fn destroying_active_scene_clears_designation() {
    let mut graph = SceneManager::new();
    let scene = graph.create_scene("Main");
    let root = graph.create_root_entity(scene, "Root").unwrap();
    graph.set_active_scene(Some(scene)).unwrap();
    let counter = attach_counter(&mut graph, root);

    graph.destroy_scene(scene).unwrap();

    assert_eq!(graph.active_scene(), None);
    assert!(!graph.scene(scene).unwrap().is_active_in_engine());
    assert_eq!(counter.disabled(), 1);
    assert_eq!(counter.destroyed(), 1);
}

#[test]
fn destroyed_scene_cannot_become_active_or_take_cameras() {
    init_logger();
    let mut graph = SceneManager::new();
    let scene = graph.create_scene("Main");
    let cam = graph.create_camera(Camera::new("Main"));
    graph.destroy_scene(scene).unwrap();

    assert_eq!(
        graph.set_active_scene(Some(scene)),
        Err(SceneError::SceneDestroyed(scene))
    );
    assert_eq!(
        graph.attach_render_camera(scene, cam),
        Err(SceneError::SceneDestroyed(scene))
    );
    assert_eq!(
        graph.set_ambient_light(scene, None),
        Err(SceneError::SceneDestroyed(scene))
    );
}

#[test]
fn remove_scene_frees_handle() -> anyhow::Result<()> {
    let mut graph = SceneManager::new();
    let scene = graph.create_scene("Main");
    let light = graph.scene(scene).unwrap().ambient_light();

    graph.remove_scene(scene)?;

    assert!(graph.scene(scene).is_none());
    assert!(graph.ambient_light(light).is_none());
    assert_eq!(
        graph.destroy_scene(scene),
        Err(SceneError::SceneNotFound(scene))
    );
    Ok(())
}

#[test]
fn remove_scene_keeps_light_installed_elsewhere() -> anyhow::Result<()> {
    let mut graph = SceneManager::new();
    let a = graph.create_scene("A");
    let b = graph.create_scene("B");
    let light = graph.scene(a).unwrap().ambient_light();
    graph.set_ambient_light(b, Some(light))?;

    graph.remove_scene(a)?;

    assert_eq!(graph.ambient_light(light).unwrap().scene(), Some(b));
    assert_eq!(graph.scene(b).unwrap().ambient_light(), light);
    Ok(())
}
