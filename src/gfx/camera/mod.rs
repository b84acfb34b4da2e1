pub mod camera_controller;
pub mod camera_utils;
pub mod orbit_controls;
pub mod perspective_camera;
pub mod rig;

// Re-export main types
pub use camera_controller::{CameraController, DragMode};
pub use camera_utils::{Camera, OPENGL_TO_WGPU_MATRIX};
pub use orbit_controls::{OrbitBounds, OrbitControls, Spherical};
pub use perspective_camera::PerspectiveCamera;
pub use rig::{CameraRig, CameraRigConfig};
