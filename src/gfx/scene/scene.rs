use std::ops::{Index, IndexMut};

use cgmath::Vector3;

use crate::gfx::{
    camera::PerspectiveCamera,
    color::Color,
    scene::{
        helper::Helper,
        light::{Light, LightKind},
        object::Object,
        vertex::LineVertex,
    },
};

/// Handle to a light in a [`Scene`]. Lights are never removed, so handles
/// stay valid for the scene's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightId(usize);

/// Handle to an object in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(usize);

/// Handle to a helper in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HelperId(usize);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Light terms fed to the shaders for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLighting {
    pub ambient: Color,
    pub directional: Color,
    /// Unit vector towards the directional light
    pub direction: Vector3<f32>,
}

/// Main scene: the camera plus every light, object and helper.
///
/// The scene only grows; content added during setup (or by a finished model
/// load) lives until the process exits.
pub struct Scene {
    pub camera: PerspectiveCamera,
    lights: Vec<Light>,
    objects: Vec<Object>,
    helpers: Vec<Helper>,
}

impl Scene {
    pub fn new(camera: PerspectiveCamera) -> Self {
        Self {
            camera,
            lights: Vec::new(),
            objects: Vec::new(),
            helpers: Vec::new(),
        }
    }

    pub fn add_light(&mut self, light: Light) -> LightId {
        self.lights.push(light);
        LightId(self.lights.len() - 1)
    }

    pub fn add_object(&mut self, object: Object) -> ObjectId {
        log::debug!(
            "scene: added object '{}' ({} triangles)",
            object.name,
            object.triangle_count()
        );
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    pub fn add_helper(&mut self, helper: Helper) -> HelperId {
        self.helpers.push(helper);
        HelperId(self.helpers.len() - 1)
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn helpers(&self) -> &[Helper] {
        &self.helpers
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &Object)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, object)| (ObjectId(i), object))
    }

    pub fn visible_objects(&self) -> impl Iterator<Item = (ObjectId, &Object)> {
        self.objects().filter(|(_, object)| object.visible)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn find_object(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .position(|o| o.name == name)
            .map(ObjectId)
    }

    pub fn find_light(&self, name: &str) -> Option<LightId> {
        self.lights.iter().position(|l| l.name == name).map(LightId)
    }

    pub fn find_helper(&self, name: &str) -> Option<HelperId> {
        self.helpers.iter().position(|h| h.name == name).map(HelperId)
    }

    /// Sums ambient light and takes the first directional light. Hidden lights
    /// contribute nothing.
    pub fn lighting(&self) -> SceneLighting {
        let mut lighting = SceneLighting {
            ambient: Color::BLACK,
            directional: Color::BLACK,
            direction: Vector3::unit_y(),
        };

        let mut have_directional = false;
        for light in &self.lights {
            let c = light.contribution();
            match light.kind {
                LightKind::Ambient => {
                    lighting.ambient = lighting.ambient + c;
                }
                LightKind::Directional { .. } if !have_directional => {
                    have_directional = true;
                    lighting.directional = c;
                    if let Some(direction) = light.direction_to_light() {
                        lighting.direction = direction;
                    }
                }
                LightKind::Directional { .. } => {
                    log::trace!("scene: ignoring extra directional light '{}'", light.name);
                }
            }
        }
        lighting
    }

    /// Line vertices of every visible helper, in insertion order.
    pub fn helper_lines(&self) -> Vec<LineVertex> {
        self.helpers
            .iter()
            .filter(|h| h.visible)
            .flat_map(|h| h.lines(self))
            .collect()
    }

    pub fn statistics(&self) -> SceneStatistics {
        SceneStatistics {
            object_count: self.objects.len(),
            light_count: self.lights.len(),
            helper_count: self.helpers.len(),
            total_triangles: self.objects.iter().map(Object::triangle_count).sum(),
        }
    }
}

impl Index<LightId> for Scene {
    type Output = Light;
    fn index(&self, id: LightId) -> &Light {
        &self.lights[id.0]
    }
}

impl IndexMut<LightId> for Scene {
    fn index_mut(&mut self, id: LightId) -> &mut Light {
        &mut self.lights[id.0]
    }
}

impl Index<ObjectId> for Scene {
    type Output = Object;
    fn index(&self, id: ObjectId) -> &Object {
        &self.objects[id.0]
    }
}

impl IndexMut<ObjectId> for Scene {
    fn index_mut(&mut self, id: ObjectId) -> &mut Object {
        &mut self.objects[id.0]
    }
}

impl Index<HelperId> for Scene {
    type Output = Helper;
    fn index(&self, id: HelperId) -> &Helper {
        &self.helpers[id.0]
    }
}

impl IndexMut<HelperId> for Scene {
    fn index_mut(&mut self, id: HelperId) -> &mut Helper {
        &mut self.helpers[id.0]
    }
}

/// Scene statistics for logging and UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub light_count: usize,
    pub helper_count: usize,
    pub total_triangles: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        geometry::generate_box,
        resources::material::Material,
        scene::{helper::HelperKind, object::Mesh},
    };

    fn scene() -> Scene {
        Scene::new(PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0))
    }

    #[test]
    fn test_lighting_respects_visibility() {
        let mut scene = scene();
        let ambient = scene.add_light(Light::ambient("ambient", Color::WHITE, 0.3));
        let sun = scene.add_light(Light::directional(
            "sun",
            Color::WHITE,
            0.5,
            Vector3::new(0.0, 4.0, 0.0),
        ));

        let lit = scene.lighting();
        assert_eq!(lit.ambient, Color::new(0.3, 0.3, 0.3));
        assert_eq!(lit.directional, Color::new(0.5, 0.5, 0.5));

        scene[ambient].visible = false;
        scene[sun].visible = false;
        let dark = scene.lighting();
        assert_eq!(dark.ambient, Color::BLACK);
        assert_eq!(dark.directional, Color::BLACK);

        scene[sun].visible = true;
        assert_eq!(scene.lighting().directional, Color::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_hidden_objects_are_not_drawn() {
        let mut scene = scene();
        let cube = scene.add_object(Object::new(
            "cube",
            vec![Mesh::new(generate_box(1.0, 1.0, 1.0))],
            Material::default(),
        ));
        assert_eq!(scene.visible_objects().count(), 1);
        scene[cube].visible = false;
        assert_eq!(scene.visible_objects().count(), 0);
        assert_eq!(scene.find_object("cube"), Some(cube));
        assert_eq!(scene.statistics().total_triangles, 12);
    }

    #[test]
    fn test_helper_lines_only_from_visible_helpers() {
        let mut scene = scene();
        let axes = scene.add_helper(Helper::new("axes", HelperKind::Axes { size: 5.0 }));
        assert_eq!(scene.helper_lines().len(), 6);
        scene[axes].visible = false;
        assert!(scene.helper_lines().is_empty());
    }

    #[test]
    fn test_light_helper_follows_light() {
        let mut scene = scene();
        let sun = scene.add_light(Light::directional(
            "sun",
            Color::WHITE,
            0.3,
            Vector3::new(1.0, 4.0, 0.0),
        ));
        scene.add_helper(Helper::new(
            "sun helper",
            HelperKind::DirectionalLight { light: sun, size: 1.0 },
        ));

        scene[sun].color = Color::new(1.0, 0.0, 0.0);
        let lines = scene.helper_lines();
        assert_eq!(lines.len(), 10);
        assert!(lines.iter().all(|v| v.color == [1.0, 0.0, 0.0]));
        assert_eq!(lines[8].position, [1.0, 4.0, 0.0]);
    }
}
