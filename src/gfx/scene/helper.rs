//! Wireframe helpers that visualise otherwise invisible scene state.
//!
//! Helpers are regenerated from the scene every frame they are visible, so a
//! light helper follows edits to its light and a camera helper follows the
//! camera.

use crate::gfx::{
    geometry::{axes_lines, directional_light_lines, frustum_lines},
    scene::{light::LightKind, scene::LightId, vertex::LineVertex, Scene},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HelperKind {
    /// RGB axes at the origin
    Axes { size: f32 },
    /// Outline of a directional light and a line to its target
    DirectionalLight { light: LightId, size: f32 },
    /// Frustum of the scene camera
    Camera,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Helper {
    pub name: String,
    pub kind: HelperKind,
    pub visible: bool,
}

impl Helper {
    pub fn new(name: &str, kind: HelperKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            visible: true,
        }
    }

    pub fn lines(&self, scene: &Scene) -> Vec<LineVertex> {
        match self.kind {
            HelperKind::Axes { size } => axes_lines(size),
            HelperKind::DirectionalLight { light, size } => {
                let light = &scene[light];
                match light.kind {
                    LightKind::Directional { position, target } => {
                        directional_light_lines(position, target, size, light.color.to_array())
                    }
                    LightKind::Ambient => Vec::new(),
                }
            }
            HelperKind::Camera => {
                frustum_lines(scene.camera.gl_view_projection(), scene.camera.position)
            }
        }
    }
}
