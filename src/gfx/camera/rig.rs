//! Camera rig: orbit controls plus the input controller that drives them.
//!
//! The rig does not own the camera; the scene does. Every frame the app
//! calls [`CameraRig::update`] with the scene's camera so damping keeps
//! integrating after input stops.

use cgmath::Vector3;
use winit::event::WindowEvent;

use super::{
    camera_controller::CameraController, orbit_controls::OrbitControls,
    perspective_camera::PerspectiveCamera,
};

/// Initial camera and control settings for the viewer.
#[derive(Debug, Clone, Copy)]
pub struct CameraRigConfig {
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vector3<f32>,
    pub target: Vector3<f32>,
    pub damping_factor: f32,
}

impl Default for CameraRigConfig {
    fn default() -> Self {
        Self {
            fov: 75.0,
            near: 0.1,
            far: 100.0,
            position: Vector3::new(-8.0, 4.0, 8.0),
            target: Vector3::new(0.0, 1.0, 0.0),
            damping_factor: 0.05,
        }
    }
}

pub struct CameraRig {
    pub controls: OrbitControls,
    pub controller: CameraController,
}

impl CameraRig {
    /// Configures `camera` from `config` and builds damped orbit controls
    /// around the configured target.
    pub fn new(config: &CameraRigConfig, camera: &mut PerspectiveCamera) -> Self {
        camera.fov = config.fov;
        camera.near = config.near;
        camera.far = config.far;
        camera.position = config.position;
        camera.update_projection_matrix();

        let mut controls = OrbitControls::new(config.target);
        controls.enable_damping = true;
        controls.damping_factor = config.damping_factor;
        controls.update(camera);

        Self {
            controls,
            controller: CameraController::new(),
        }
    }

    pub fn process_event(
        &mut self,
        event: &WindowEvent,
        camera: &PerspectiveCamera,
        viewport_height: f32,
    ) -> bool {
        self.controller
            .process_event(event, &mut self.controls, camera, viewport_height)
    }

    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        self.controls.update(camera)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rig_applies_initial_state() {
        let mut camera = PerspectiveCamera::new(50.0, 1.6, 1.0, 10.0);
        let rig = CameraRig::new(&CameraRigConfig::default(), &mut camera);

        assert_eq!(camera.fov, 75.0);
        assert_eq!(camera.near, 0.1);
        assert_eq!(camera.far, 100.0);
        assert_eq!(camera.look_at, Vector3::new(0.0, 1.0, 0.0));
        assert!(rig.controls.enable_damping);
        assert_eq!(rig.controls.damping_factor, 0.05);
        assert!((camera.position.x + 8.0).abs() < 1e-4);
        assert!((camera.position.y - 4.0).abs() < 1e-4);
    }
}
