//! # User Interface Module
//!
//! Dear ImGui integration and the live parameter panel.
//!
//! - [`UiManager`] - ImGui context, winit input and wgpu rendering
//! - [`ParameterPanel`] - folders of controls bound to fields of a target
//!
//! ## Usage
//!
//! ```no_run
//! use glimpse::ui::{ParameterPanel, SliderRange};
//!
//! struct Light { intensity: f32, visible: bool }
//!
//! let mut panel = ParameterPanel::<Light>::new("Parameters");
//! let folder = panel.add_folder("Light");
//! folder.add_toggle("enable", |l| l.visible, |l, v| l.visible = v);
//! folder.add_slider(
//!     "intensity",
//!     SliderRange::new(0.0, 1.0, 0.001),
//!     |l| l.intensity,
//!     |l, v| l.intensity = v,
//! );
//! folder.open();
//! ```
//!
//! Input that ImGui captures is not forwarded to the camera controls.

pub mod binding;
pub mod manager;
pub mod panel;

// Re-export main types
pub use binding::{Binding, ControlKind, ControlValue, SliderRange};
pub use manager::UiManager;
pub use panel::{Control, Folder, PanelError, ParameterPanel};
