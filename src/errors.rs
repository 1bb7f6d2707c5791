//! Error Types
//!
//! This module defines the error types used by the scene graph.
//!
//! # Overview
//!
//! [`SceneError`] only covers hard failures: stale handles, hierarchy cycles
//! and operations on torn-down scenes. Recoverable authoring mistakes (a null
//! ambient light, attaching the same camera twice) are *not* errors; they log
//! a warning and report through a `bool` return instead.
//!
//! # Usage
//!
//! ```rust,ignore
//! use myth_scene::errors::{SceneError, Result};
//!
//! fn promote(manager: &mut SceneManager, scene: SceneHandle, e: EntityId) -> Result<()> {
//!     manager.add_root_entity(scene, e)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::scene::{CameraKey, EntityId, LightKey, SceneHandle};

/// The main error type for scene graph operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    // ========================================================================
    // Handle Errors
    // ========================================================================
    /// The scene handle does not refer to a live scene.
    #[error("Scene not found: {0:?}")]
    SceneNotFound(SceneHandle),

    /// The entity handle does not refer to a live entity.
    #[error("Entity not found: {0:?}")]
    EntityNotFound(EntityId),

    /// The camera handle does not refer to a live camera.
    #[error("Camera not found: {0:?}")]
    CameraNotFound(CameraKey),

    /// The light handle does not refer to a live ambient light.
    #[error("Ambient light not found: {0:?}")]
    LightNotFound(LightKey),

    /// The light is still installed in a live scene's ambient slot.
    #[error("Ambient light {0:?} is installed in a live scene")]
    LightInUse(LightKey),

    // ========================================================================
    // Lifecycle & Structure Errors
    // ========================================================================
    /// A mutating operation was issued against a destroyed scene.
    #[error("Scene {0:?} has been destroyed")]
    SceneDestroyed(SceneHandle),

    /// Reparenting would make an entity its own ancestor.
    #[error("Cannot attach {child:?} under {parent:?}: would create a cycle")]
    HierarchyCycle {
        /// The entity being moved
        child: EntityId,
        /// The requested new parent
        parent: EntityId,
    },
}

/// Alias for `Result<T, SceneError>`.
pub type Result<T> = std::result::Result<T, SceneError>;
