//! Surface materials.
//!
//! A material is a solid colour with a Phong highlight; there are no textures.

use crate::gfx::color::Color;

/// Shaded with ambient + Lambert diffuse + Blinn-Phong specular.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub color: Color,
    pub shininess: f32,
    /// Specular highlight colour (linear)
    pub specular: Color,
}

impl Default for Material {
    fn default() -> Self {
        Self::phong("Default", Color::WHITE)
    }
}

impl Material {
    /// Phong material with the usual dim-gray highlight.
    pub fn phong(name: &str, color: Color) -> Self {
        Self {
            name: name.to_string(),
            color,
            shininess: 30.0,
            specular: Color::from_hex(0x111111),
        }
    }

    /// Converts an MTL material; shininess maps directly, diffuse becomes the
    /// base colour.
    pub fn from_mtl(mtl: &tobj::Material) -> Self {
        let diffuse = mtl.diffuse.unwrap_or([1.0, 1.0, 1.0]);
        let mut material = Self::phong(
            if mtl.name.is_empty() {
                "Model"
            } else {
                &mtl.name
            },
            Color::new(diffuse[0], diffuse[1], diffuse[2]),
        );
        if let Some(shininess) = mtl.shininess {
            material.shininess = shininess.max(1.0);
        }
        if let Some(specular) = mtl.specular {
            material.specular = Color::new(specular[0], specular[1], specular[2]);
        }
        material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mtl_uses_diffuse() {
        let mtl = tobj::Material {
            name: "red".to_string(),
            diffuse: Some([1.0, 0.0, 0.0]),
            shininess: Some(0.0),
            ..Default::default()
        };
        let material = Material::from_mtl(&mtl);
        assert_eq!(material.name, "red");
        assert_eq!(material.color, Color::new(1.0, 0.0, 0.0));
        assert_eq!(material.shininess, 1.0);
        assert_eq!(material.specular, Color::from_hex(0x111111));
    }

    #[test]
    fn test_from_mtl_defaults_to_white() {
        let material = Material::from_mtl(&tobj::Material::default());
        assert_eq!(material.color, Color::WHITE);
        assert_eq!(material.name, "Model");
    }
}
