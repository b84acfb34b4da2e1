// src/lib.rs
//! Glimpse 3D scene viewer
//!
//! A lit demo scene with orbit controls, a live parameter panel and frame
//! statistics, built on wgpu, winit and Dear ImGui.

pub mod app;
pub mod assembler;
pub mod config;
pub mod gfx;
pub mod performance;
pub mod prelude;
pub mod ui;
pub mod viewer;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::GlimpseApp;
pub use config::AppConfig;
pub use viewer::Viewer;

/// Creates a viewer application with the default configuration
pub fn default() -> GlimpseApp {
    GlimpseApp::new(AppConfig::default())
}
