//! Uniform bindings for per-frame and per-object shader data
//!
//! Group 0 holds the camera and the scene's light terms; group 1 holds one
//! object's transform and material. Layouts here MUST match `mesh.wgsl` and
//! `line.wgsl`.

use cgmath::{Matrix, Matrix4, SquareMatrix};

use crate::{
    gfx::{
        camera::{camera_utils::convert_matrix4_to_array, Camera},
        resources::material::Material,
        scene::{object::Object, Scene},
    },
    wgpu_utils::{binding_types, UniformBuffer},
};

/// Per-frame uniform content (group 0)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUniform {
    pub view_proj: [[f32; 4]; 4],
    /// Camera position, w = 1
    pub eye: [f32; 4],
    /// Summed ambient light, w unused
    pub ambient: [f32; 4],
    /// Directional light colour times intensity, w unused
    pub light_color: [f32; 4],
    /// Unit vector towards the directional light, w unused
    pub light_dir: [f32; 4],
}

impl GlobalUniform {
    pub fn from_scene(scene: &Scene) -> Self {
        let lighting = scene.lighting();
        let eye = scene.camera.position;
        let d = lighting.direction;
        let rgba = |c: crate::gfx::color::Color| [c.r, c.g, c.b, 1.0];
        Self {
            view_proj: convert_matrix4_to_array(scene.camera.build_view_projection_matrix()),
            eye: [eye.x, eye.y, eye.z, 1.0],
            ambient: rgba(lighting.ambient),
            light_color: rgba(lighting.directional),
            light_dir: [d.x, d.y, d.z, 0.0],
        }
    }
}

/// Per-object uniform content (group 1)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of `model`, for normals under non-uniform scale
    pub normal: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub specular: [f32; 4],
    /// x = shininess
    pub params: [f32; 4],
}

impl ObjectUniform {
    pub fn from_object(object: &Object) -> Self {
        let model = object.transform.matrix();
        let normal = model
            .invert()
            .map(|inv| inv.transpose())
            .unwrap_or_else(Matrix4::identity);
        let Material {
            color,
            specular,
            shininess,
            ..
        } = &object.material;
        Self {
            model: convert_matrix4_to_array(model),
            normal: convert_matrix4_to_array(normal),
            color: [color.r, color.g, color.b, 1.0],
            specular: [specular.r, specular.g, specular.b, 1.0],
            params: [*shininess, 0.0, 0.0, 0.0],
        }
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUbo = UniformBuffer<GlobalUniform>;
/// Type alias for a per-object uniform buffer
pub type ObjectUbo = UniformBuffer<ObjectUniform>;

/// Bind group layout and bind group for [`GlobalUniform`], bound to slot 0
/// in every pipeline.
pub struct GlobalBindings {
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    ubo: GlobalUbo,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let layout = binding_types::single_uniform_layout(device, "Globals Bind Group Layout");
        let ubo = GlobalUbo::new(device);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Global Bind Group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.binding_resource(),
            }],
        });

        GlobalBindings {
            layout,
            bind_group,
            ubo,
        }
    }

    pub fn update(&mut self, queue: &wgpu::Queue, content: GlobalUniform) {
        self.ubo.update_content(queue, content);
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        camera::PerspectiveCamera,
        color::Color,
        geometry::generate_box,
        scene::{object::Mesh, Light},
    };
    use cgmath::{Deg, Vector3};

    #[test]
    fn test_uniform_sizes_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<GlobalUniform>(), 128);
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 176);
    }

    #[test]
    fn test_hidden_light_zeroes_uniform_color() {
        let mut scene = Scene::new(PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0));
        let sun = scene.add_light(Light::directional(
            "sun",
            Color::WHITE,
            0.3,
            Vector3::new(1.0, 4.0, 0.0),
        ));
        assert!(GlobalUniform::from_scene(&scene).light_color[0] > 0.0);

        scene[sun].visible = false;
        let uniform = GlobalUniform::from_scene(&scene);
        assert_eq!(&uniform.light_color[..3], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_object_uniform_carries_material() {
        let mut object = Object::new(
            "cube",
            vec![Mesh::new(generate_box(1.0, 1.0, 1.0))],
            Material::phong("flat", Color::new(0.2, 0.4, 0.6)),
        );
        object.rotate_x(Deg(30.0));
        let uniform = ObjectUniform::from_object(&object);
        assert_eq!(uniform.color, [0.2, 0.4, 0.6, 1.0]);
        assert_eq!(uniform.params[0], 30.0);
        // rotation only: normal matrix equals model matrix
        for (a, b) in uniform.model.iter().flatten().zip(uniform.normal.iter().flatten()) {
            assert!((a - b).abs() < 1e-5);
        }
    }
}
