//! # Graphics Module
//!
//! Everything between the scene description and the pixels on screen.
//!
//! - **Camera** ([`camera`]) - perspective camera, damped orbit controls and
//!   the input controller driving them
//! - **Geometry** ([`geometry`]) - box and plane primitives, helper line sets
//! - **Scene** ([`scene`]) - lights, objects, helpers and model loading
//! - **Resources** ([`resources`]) - materials, uniform bindings, depth buffer
//! - **Rendering** ([`rendering`]) - surface, pipelines and the frame pass
//!
//! Colours are linear throughout ([`color::Color`]); the panel converts to
//! and from sRGB hex at its edge.
//!
//! ```no_run
//! use glimpse::gfx::{color::Color, rendering::Viewport};
//!
//! let viewport = Viewport::new(1280.0, 800.0, 3.0, 2.0);
//! assert_eq!(viewport.pixel_ratio(), 2.0);
//! let background = Color::from_hex(0x888888);
//! ```

pub mod camera;
pub mod color;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use rendering::{RenderEngine, Viewport};
pub use scene::Scene;
