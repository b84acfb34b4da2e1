//! Perspective camera with an explicitly refreshed projection matrix.
//!
//! Field edits (`fov`, `near`, `far`, `aspect`) do not touch the cached
//! projection until [`PerspectiveCamera::update_projection_matrix`] runs, so
//! whoever edits a field is responsible for refreshing it before the next
//! render.

use cgmath::{perspective, Deg, EuclideanSpace, InnerSpace, Matrix4, Point3, Vector3};

use super::camera_utils::{Camera, OPENGL_TO_WGPU_MATRIX};

const MAX_CLIP_DISTANCE: f32 = 1e15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
    pub position: Vector3<f32>,
    /// Point the camera looks at
    pub look_at: Vector3<f32>,
    pub up: Vector3<f32>,
    projection: Matrix4<f32>,
}

impl Camera for PerspectiveCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * self.projection * self.view_matrix()
    }
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov,
            near,
            far,
            aspect,
            position: Vector3::new(0.0, 0.0, 0.0),
            look_at: Vector3::new(0.0, 0.0, -1.0),
            up: Vector3::unit_y(),
            projection: Matrix4::from_scale(1.0),
        };
        camera.update_projection_matrix();
        camera
    }

    /// Recomputes the cached projection from `fov`, `aspect`, `near` and `far`.
    ///
    /// Degenerate parameters (non-positive aspect, `near >= far`, zero fov)
    /// are nudged into a valid range instead of producing NaNs. A non-finite
    /// `fov`, `near` or `far` keeps the last valid projection.
    pub fn update_projection_matrix(&mut self) {
        if !(self.fov.is_finite() && self.near.is_finite() && self.far.is_finite()) {
            log::warn!(
                "camera projection unchanged: fov={} near={} far={}",
                self.fov,
                self.near,
                self.far
            );
            return;
        }

        let fov = self.fov.clamp(1e-3, 179.0);
        let aspect = if self.aspect.is_finite() && self.aspect > 0.0 {
            self.aspect
        } else {
            1.0
        };
        let near = self.near.clamp(1e-5, MAX_CLIP_DISTANCE);
        // Margin grows with `near` so the planes stay distinct in f32
        let far = self.far.max(near + (near * 1e-4).max(1e-3));
        self.projection = perspective(Deg(fov), aspect, near, far);
        log::trace!(
            "camera projection: fov={:.2} aspect={:.3} near={} far={}",
            fov,
            aspect,
            near,
            far
        );
    }

    /// OpenGL-convention projection as last computed.
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(
            Point3::from_vec(self.position),
            Point3::from_vec(self.look_at),
            self.up,
        )
    }

    /// OpenGL-convention view-projection, used to unproject helper geometry.
    pub fn gl_view_projection(&self) -> Matrix4<f32> {
        self.projection * self.view_matrix()
    }

    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.position = Vector3::new(x, y, z);
    }

    pub fn look_at(&mut self, target: Vector3<f32>) {
        self.look_at = target;
    }

    /// Unit vector from the camera towards its look-at point.
    pub fn forward(&self) -> Vector3<f32> {
        let dir = self.look_at - self.position;
        if dir.magnitude2() > f32::EPSILON {
            dir.normalize()
        } else {
            -Vector3::unit_z()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_is_cached_until_update() {
        let mut camera = PerspectiveCamera::new(75.0, 1.5, 0.1, 100.0);
        let before = camera.projection_matrix();

        camera.fov = 40.0;
        assert_eq!(camera.projection_matrix(), before);

        camera.update_projection_matrix();
        assert_ne!(camera.projection_matrix(), before);
    }

    #[test]
    fn test_aspect_drives_horizontal_scale() {
        let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0);
        let square = camera.projection_matrix();
        camera.aspect = 2.0;
        camera.update_projection_matrix();
        let wide = camera.projection_matrix();
        assert!((square.x.x / wide.x.x - 2.0).abs() < 1e-5);
        assert_eq!(square.y.y, wide.y.y);
    }

    #[test]
    fn test_degenerate_parameters_stay_finite() {
        let mut camera = PerspectiveCamera::new(0.0, 0.0, 5.0, 1.0);
        camera.update_projection_matrix();
        let m = camera.projection_matrix();
        let cols: [[f32; 4]; 4] = m.into();
        assert!(cols.iter().flatten().all(|v| v.is_finite()));
    }

    #[test]
    fn test_far_near_clip_plane_stays_distinct() {
        let mut camera = PerspectiveCamera::new(75.0, 1.6, 0.1, 100.0);
        camera.near = 40000.0;
        camera.update_projection_matrix();
        let cols: [[f32; 4]; 4] = camera.projection_matrix().into();
        assert!(cols.iter().flatten().all(|v| v.is_finite()));

        camera.near = 1e30;
        camera.update_projection_matrix();
        let cols: [[f32; 4]; 4] = camera.projection_matrix().into();
        assert!(cols.iter().flatten().all(|v| v.is_finite()));
    }

    #[test]
    fn test_non_finite_parameters_keep_last_projection() {
        let mut camera = PerspectiveCamera::new(75.0, 1.6, 0.1, 100.0);
        let before = camera.projection_matrix();

        camera.fov = f32::NAN;
        camera.update_projection_matrix();
        assert_eq!(camera.projection_matrix(), before);

        camera.fov = 75.0;
        camera.far = f32::INFINITY;
        camera.update_projection_matrix();
        assert_eq!(camera.projection_matrix(), before);
    }
}
