//! Orbit controls with exponential damping.
//!
//! User input accumulates into pending rotation, pan and zoom. Every call to
//! [`OrbitControls::update`] applies a `damping_factor` share of the pending
//! rotation and pan to the camera and decays what is left by
//! `1 - damping_factor`, so motion eases towards the requested delta over
//! several frames. `update` must run every frame even without new input.

use cgmath::{InnerSpace, Vector3};
use std::f32::consts::PI;

use super::perspective_camera::PerspectiveCamera;

const EPS: f32 = 1e-6;

/// Camera position relative to the target in spherical coordinates (Y up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    /// Polar angle from +Y
    pub phi: f32,
    /// Azimuth around +Y, measured from +Z towards +X
    pub theta: f32,
}

impl Spherical {
    pub fn from_offset(offset: Vector3<f32>) -> Self {
        let radius = offset.magnitude();
        if radius == 0.0 {
            return Self {
                radius,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vector3<f32> {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vector3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

/// Limits applied after every update.
#[derive(Debug, Clone, Copy)]
pub struct OrbitBounds {
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
}

impl Default for OrbitBounds {
    fn default() -> Self {
        Self {
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vector3<f32>,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,
    pub bounds: OrbitBounds,
    spherical_delta: Spherical,
    pan_offset: Vector3<f32>,
    scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vector3::new(0.0, 0.0, 0.0),
            enable_damping: false,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            pan_speed: 1.0,
            zoom_speed: 1.0,
            bounds: OrbitBounds::default(),
            spherical_delta: Spherical {
                radius: 0.0,
                phi: 0.0,
                theta: 0.0,
            },
            pan_offset: Vector3::new(0.0, 0.0, 0.0),
            scale: 1.0,
        }
    }
}

impl OrbitControls {
    pub fn new(target: Vector3<f32>) -> Self {
        Self {
            target,
            ..Default::default()
        }
    }

    /// Requests an azimuthal rotation of `angle` radians (positive turns the
    /// camera to its left around the target).
    pub fn rotate_left(&mut self, angle: f32) {
        self.spherical_delta.theta -= angle;
    }

    /// Requests a polar rotation of `angle` radians (positive raises the camera).
    pub fn rotate_up(&mut self, angle: f32) {
        self.spherical_delta.phi -= angle;
    }

    /// Requests a world-space pan of the target (and camera with it).
    pub fn pan_by(&mut self, offset: Vector3<f32>) {
        self.pan_offset += offset;
    }

    /// Pans by screen pixels, scaled so the point under the cursor follows it.
    pub fn pan_pixels(
        &mut self,
        camera: &PerspectiveCamera,
        delta_x: f32,
        delta_y: f32,
        viewport_height: f32,
    ) {
        let height = viewport_height.max(1.0);
        let distance = (camera.position - self.target).magnitude();
        let visible_height = 2.0 * distance * (camera.fov.to_radians() * 0.5).tan();

        let forward = camera.forward();
        let right = forward.cross(camera.up);
        if right.magnitude2() < EPS {
            return;
        }
        let right = right.normalize();
        let up = right.cross(forward).normalize();

        let scale = visible_height / height * self.pan_speed;
        self.pan_by(-right * delta_x * scale + up * delta_y * scale);
    }

    /// Rotates by screen pixels; a drag across the full viewport height turns
    /// the camera by `2π · rotate_speed`.
    pub fn rotate_pixels(&mut self, delta_x: f32, delta_y: f32, viewport_height: f32) {
        let height = viewport_height.max(1.0);
        self.rotate_left(2.0 * PI * delta_x / height * self.rotate_speed);
        self.rotate_up(2.0 * PI * delta_y / height * self.rotate_speed);
    }

    /// Zooms by wheel steps; positive steps move closer.
    pub fn zoom_steps(&mut self, steps: f32) {
        let factor = 0.95f32.powf(self.zoom_speed * steps.abs());
        if steps > 0.0 {
            self.scale *= factor;
        } else if steps < 0.0 {
            self.scale /= factor;
        }
    }

    /// True while damped motion from earlier input is still being applied.
    pub fn is_settling(&self) -> bool {
        self.spherical_delta.theta.abs() > EPS
            || self.spherical_delta.phi.abs() > EPS
            || self.pan_offset.magnitude2() > EPS * EPS
    }

    /// Advances the controls one frame and writes the result to `camera`.
    ///
    /// Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let before = camera.position;
        let offset = camera.position - self.target;
        let mut spherical = Spherical::from_offset(offset);

        let share = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        spherical.theta += self.spherical_delta.theta * share;
        spherical.phi += self.spherical_delta.phi * share;
        spherical.phi = spherical
            .phi
            .clamp(self.bounds.min_polar_angle, self.bounds.max_polar_angle)
            .clamp(EPS, PI - EPS);

        spherical.radius = (spherical.radius * self.scale)
            .clamp(self.bounds.min_distance, self.bounds.max_distance);

        self.target += self.pan_offset * share;

        camera.position = self.target + spherical.to_offset();
        camera.look_at(self.target);

        if self.enable_damping {
            let decay = 1.0 - self.damping_factor;
            self.spherical_delta.theta *= decay;
            self.spherical_delta.phi *= decay;
            self.pan_offset *= decay;
        } else {
            self.spherical_delta.theta = 0.0;
            self.spherical_delta.phi = 0.0;
            self.pan_offset = Vector3::new(0.0, 0.0, 0.0);
        }
        self.scale = 1.0;

        (camera.position - before).magnitude2() > 1e-10
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at(x: f32, y: f32, z: f32) -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0);
        camera.set_position(x, y, z);
        camera
    }

    fn azimuth(camera: &PerspectiveCamera, target: Vector3<f32>) -> f32 {
        Spherical::from_offset(camera.position - target).theta
    }

    #[test]
    fn test_spherical_round_trip() {
        let offset = Vector3::new(-8.0, 3.0, 8.0);
        let back = Spherical::from_offset(offset).to_offset();
        assert!((back - offset).magnitude() < 1e-4);
    }

    #[test]
    fn test_damped_rotation_moves_partially_then_converges() {
        let target = Vector3::new(0.0, 1.0, 0.0);
        let mut camera = camera_at(-8.0, 4.0, 8.0);
        let mut controls = OrbitControls::new(target);
        controls.enable_damping = true;
        controls.damping_factor = 0.05;
        controls.update(&mut camera);

        let start = azimuth(&camera, target);
        let requested = 0.5;
        controls.rotate_left(requested);

        controls.update(&mut camera);
        let first_step = (azimuth(&camera, target) - start).abs();
        assert!(first_step > 0.0);
        assert!(first_step < requested);
        assert!((first_step - requested * 0.05).abs() < 1e-4);

        for _ in 0..400 {
            controls.update(&mut camera);
        }
        let total = (azimuth(&camera, target) - start).abs();
        assert!((total - requested).abs() < 1e-3);
        assert!(!controls.is_settling());
    }

    #[test]
    fn test_undamped_rotation_applies_in_full() {
        let target = Vector3::new(0.0, 0.0, 0.0);
        let mut camera = camera_at(0.0, 0.0, 10.0);
        let mut controls = OrbitControls::new(target);
        controls.update(&mut camera);

        controls.rotate_left(0.3);
        controls.update(&mut camera);
        assert!((azimuth(&camera, target) + 0.3).abs() < 1e-4);
        assert!(!controls.is_settling());
    }

    #[test]
    fn test_update_without_input_keeps_distance_and_looks_at_target() {
        let target = Vector3::new(0.0, 1.0, 0.0);
        let mut camera = camera_at(-8.0, 4.0, 8.0);
        let mut controls = OrbitControls::new(target);
        controls.enable_damping = true;
        let distance = (camera.position - target).magnitude();

        for _ in 0..10 {
            controls.update(&mut camera);
        }
        assert!(((camera.position - target).magnitude() - distance).abs() < 1e-4);
        assert_eq!(camera.look_at, target);
    }

    #[test]
    fn test_polar_angle_is_clamped() {
        let target = Vector3::new(0.0, 0.0, 0.0);
        let mut camera = camera_at(0.0, 0.0, 5.0);
        let mut controls = OrbitControls::new(target);
        controls.rotate_up(10.0);
        controls.update(&mut camera);
        assert!(camera.position.y > 4.99);
        assert!(camera.position.x.is_finite() && camera.position.z.is_finite());
    }

    #[test]
    fn test_zoom_scales_distance() {
        let target = Vector3::new(0.0, 0.0, 0.0);
        let mut camera = camera_at(0.0, 0.0, 10.0);
        let mut controls = OrbitControls::new(target);
        controls.bounds.min_distance = 2.0;

        controls.zoom_steps(1.0);
        controls.update(&mut camera);
        assert!((camera.position.z - 9.5).abs() < 1e-4);

        controls.zoom_steps(-1.0);
        controls.update(&mut camera);
        assert!((camera.position.z - 10.0).abs() < 1e-3);

        controls.zoom_steps(200.0);
        controls.update(&mut camera);
        assert!((camera.position.z - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_pan_moves_target_and_camera_together() {
        let mut camera = camera_at(0.0, 0.0, 10.0);
        let mut controls = OrbitControls::new(Vector3::new(0.0, 0.0, 0.0));
        controls.update(&mut camera);

        controls.pan_pixels(&camera, 100.0, 0.0, 800.0);
        controls.update(&mut camera);

        assert!(controls.target.x < 0.0);
        assert!((camera.position.x - controls.target.x).abs() < 1e-4);
        assert!((camera.position.z - 10.0).abs() < 1e-4);
    }
}
