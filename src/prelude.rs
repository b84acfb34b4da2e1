//! # Glimpse Prelude
//!
//! Commonly used types in one import.
//!
//! ```no_run
//! use glimpse::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     GlimpseApp::new(AppConfig::default().with_model(Some("duck"))).run()
//! }
//! ```

// Re-export core application types
pub use crate::app::{AppPhase, FrameLoop, GlimpseApp};
pub use crate::config::AppConfig;
pub use crate::viewer::Viewer;

// Re-export graphics and scene types
pub use crate::gfx::camera::{CameraRig, CameraRigConfig, PerspectiveCamera};
pub use crate::gfx::color::Color;
pub use crate::gfx::rendering::{RenderEngine, RenderStats, Viewport};
pub use crate::gfx::scene::{Helper, HelperKind, Light, ModelLoader, Object, Scene};

// Re-export UI and statistics types
pub use crate::performance::{FrameClock, PerformanceOverlay, StatKind};
pub use crate::ui::{ControlValue, ParameterPanel, SliderRange};

// Re-export common external dependencies
pub use cgmath::{Deg, Vector3};
pub use imgui::Ui;
