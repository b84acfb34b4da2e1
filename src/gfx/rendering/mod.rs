// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! Handles render pipelines, the surface viewport and frame rendering.

pub mod pipeline_manager;
pub mod render_engine;
pub mod viewport;

// Re-export main types
pub use pipeline_manager::{PipelineConfig, PipelineManager};
pub use render_engine::{RenderEngine, RenderError, RenderStats};
pub use viewport::{Viewport, DEFAULT_MAX_PIXEL_RATIO};
