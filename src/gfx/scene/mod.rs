//! # Scene Management Module
//!
//! The scene owns the camera and everything drawn through it: lights,
//! objects and wireframe helpers. Content is addressed through typed handles
//! ([`LightId`], [`ObjectId`], [`HelperId`]) returned when it is added, which
//! is how the parameter panel and the renderer refer back to it.
//!
//! ## Usage
//!
//! ```no_run
//! use glimpse::gfx::camera::PerspectiveCamera;
//! use glimpse::gfx::color::Color;
//! use glimpse::gfx::scene::{Light, Scene};
//!
//! let mut scene = Scene::new(PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0));
//! let ambient = scene.add_light(Light::ambient("Ambient", Color::WHITE, 0.3));
//! scene[ambient].visible = false;
//! ```
//!
//! Models are decoded off the main thread by [`ModelLoader`] and inserted once
//! their [`PendingModel`] resolves.

pub mod helper;
pub mod light;
pub mod loader;
pub mod object;
pub mod scene;
pub mod vertex;

pub use helper::{Helper, HelperKind};
pub use light::{Light, LightKind};
pub use loader::{LoadError, ModelLoader, PendingModel};
pub use object::{Mesh, Object, Transform};
pub use scene::{HelperId, LightId, ObjectId, Scene, SceneLighting, SceneStatistics};
pub use vertex::{LineVertex, Vertex3D};
