// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Materials, uniform bindings and the depth buffer.

pub mod global_bindings;
pub mod material;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{GlobalBindings, GlobalUniform, ObjectUbo, ObjectUniform};
pub use material::Material;
pub use texture_resource::TextureResource;
