//! Scene lights.

use cgmath::{InnerSpace, Vector3};

use crate::gfx::color::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Uniform light from every direction
    Ambient,
    /// Parallel rays travelling from `position` towards `target`
    Directional {
        position: Vector3<f32>,
        target: Vector3<f32>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub name: String,
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
    pub visible: bool,
}

impl Light {
    pub fn ambient(name: &str, color: Color, intensity: f32) -> Self {
        Self {
            name: name.to_string(),
            kind: LightKind::Ambient,
            color,
            intensity,
            visible: true,
        }
    }

    /// Directional light at `position` aimed at the origin.
    pub fn directional(name: &str, color: Color, intensity: f32, position: Vector3<f32>) -> Self {
        Self {
            name: name.to_string(),
            kind: LightKind::Directional {
                position,
                target: Vector3::new(0.0, 0.0, 0.0),
            },
            color,
            intensity,
            visible: true,
        }
    }

    /// Colour times intensity, or black while hidden.
    pub fn contribution(&self) -> Color {
        if self.visible {
            self.color.scaled(self.intensity)
        } else {
            Color::BLACK
        }
    }

    /// Unit vector from the lit surface towards the light, for directional
    /// lights with distinct position and target.
    pub fn direction_to_light(&self) -> Option<Vector3<f32>> {
        match self.kind {
            LightKind::Ambient => None,
            LightKind::Directional { position, target } => {
                let dir = position - target;
                (dir.magnitude2() > f32::EPSILON).then(|| dir.normalize())
            }
        }
    }

    pub fn position(&self) -> Option<Vector3<f32>> {
        match self.kind {
            LightKind::Ambient => None,
            LightKind::Directional { position, .. } => Some(position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_light_contributes_nothing() {
        let mut light = Light::ambient("ambient", Color::WHITE, 0.3);
        assert_eq!(light.contribution(), Color::new(0.3, 0.3, 0.3));
        light.visible = false;
        assert_eq!(light.contribution(), Color::BLACK);
    }

    #[test]
    fn test_directional_points_towards_light() {
        let light = Light::directional("sun", Color::WHITE, 0.3, Vector3::new(0.0, 4.0, 0.0));
        let dir = light.direction_to_light().expect("directional");
        assert!((dir - Vector3::unit_y()).magnitude() < 1e-6);
        assert!(Light::ambient("a", Color::WHITE, 1.0)
            .direction_to_light()
            .is_none());
    }
}
