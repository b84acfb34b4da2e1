use cgmath::{Deg, Matrix4, One, Quaternion, Rotation3, Vector3};

use crate::gfx::{geometry::GeometryData, resources::material::Material};

/// Translation, rotation and scale, composed as `T * R * S`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::one(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from(self.rotation)
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

/// Triangle geometry owned by an object.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub geometry: GeometryData,
}

impl Mesh {
    pub fn new(geometry: GeometryData) -> Self {
        Self { geometry }
    }

    pub fn index_count(&self) -> u32 {
        self.geometry.indices.len() as u32
    }
}

/// A named renderable: one or more meshes sharing a material and transform.
///
/// Built-in primitives carry a single mesh; a loaded model root carries one
/// mesh per model part.
#[derive(Debug, Clone)]
pub struct Object {
    pub name: String,
    pub meshes: Vec<Mesh>,
    pub material: Material,
    pub transform: Transform,
    pub visible: bool,
}

impl Object {
    pub fn new(name: &str, meshes: Vec<Mesh>, material: Material) -> Self {
        Self {
            name: name.to_string(),
            meshes,
            material,
            transform: Transform::default(),
            visible: true,
        }
    }

    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.transform.position = Vector3::new(x, y, z);
    }

    /// Rotates about the object's local X axis, composing with any existing
    /// rotation.
    pub fn rotate_x(&mut self, angle: Deg<f32>) {
        self.transform.rotation = self.transform.rotation * Quaternion::from_angle_x(angle);
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.geometry.triangle_count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_plane;
    use cgmath::{InnerSpace, Vector4};

    #[test]
    fn test_plane_rotated_flat_faces_up() {
        let mut plane = Object::new(
            "plane",
            vec![Mesh::new(generate_plane(20.0, 20.0, 1, 1))],
            Material::default(),
        );
        plane.rotate_x(Deg(-90.0));

        let m = plane.transform.matrix();
        let normal = (m * Vector4::new(0.0, 0.0, 1.0, 0.0)).truncate();
        assert!((normal - Vector3::unit_y()).magnitude() < 1e-5);

        let corner = m * Vector4::new(10.0, 10.0, 0.0, 1.0);
        assert!(corner.y.abs() < 1e-5);
        assert!((corner.z + 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_translation_applies_after_scale() {
        let mut transform = Transform::default();
        transform.position = Vector3::new(0.0, 2.0, 0.0);
        transform.scale = Vector3::new(2.0, 2.0, 2.0);
        let p = transform.matrix() * Vector4::new(0.5, 0.5, 0.5, 1.0);
        assert_eq!(p.truncate(), Vector3::new(1.0, 3.0, 1.0));
    }
}
