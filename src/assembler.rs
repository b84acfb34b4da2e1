//! Demo scene construction
//!
//! Builds the fixed scene content and registers a panel folder for each piece
//! as it is created. Every control binds through the object's handle, so the
//! panel edits the scene the viewer owns rather than a copy.

use cgmath::{Deg, Vector3};

use crate::gfx::{
    camera::{CameraRig, CameraRigConfig, PerspectiveCamera},
    color::Color,
    geometry::{generate_box, generate_plane},
    resources::Material,
    scene::{
        Helper, HelperId, HelperKind, Light, LightId, Mesh, ModelLoader, Object, ObjectId,
        PendingModel, Scene,
    },
};
use crate::ui::{Folder, ParameterPanel, SliderRange};

pub const PANEL_TITLE: &str = "Parameters";

/// Builds the scene and its parameter panel side by side.
pub struct SceneAssembler {
    scene: Scene,
    panel: ParameterPanel<Scene>,
}

impl SceneAssembler {
    /// Starts from an empty scene with a placeholder camera at `aspect`;
    /// [`SceneAssembler::setup_camera`] gives it its real settings.
    pub fn new(aspect: f32) -> Self {
        let defaults = CameraRigConfig::default();
        Self {
            scene: Scene::new(PerspectiveCamera::new(
                defaults.fov,
                aspect,
                defaults.near,
                defaults.far,
            )),
            panel: ParameterPanel::new(PANEL_TITLE),
        }
    }

    /// Scene axes, hidden until enabled from the `General` folder.
    pub fn setup_basics(&mut self) -> HelperId {
        let mut axes = Helper::new("axes", HelperKind::Axes { size: 5.0 });
        axes.visible = false;
        let axes = self.scene.add_helper(axes);

        let general = self.panel.add_folder("General");
        helper_toggle(general, "Scene axis", axes);
        general.open();
        axes
    }

    /// Ambient and directional light, each with its own folder.
    pub fn setup_lights(&mut self) -> (LightId, LightId) {
        let ambient = self
            .scene
            .add_light(Light::ambient("ambient", Color::WHITE, 0.3));
        let directional = self.scene.add_light(Light::directional(
            "directional",
            Color::WHITE,
            0.3,
            Vector3::new(1.0, 4.0, 0.0),
        ));
        let helper = self.scene.add_helper(Helper::new(
            "directional helper",
            HelperKind::DirectionalLight {
                light: directional,
                size: 1.0,
            },
        ));

        light_controls(self.panel.add_folder("Ambient light"), ambient).open();

        let folder = self.panel.add_folder("Directional light");
        light_controls(folder, directional);
        helper_toggle(folder, "show helper", helper);
        folder.open();

        log::debug!("assembler: lights ready");
        (ambient, directional)
    }

    /// Requests `model` from `loader`, then adds the ground plane and cube.
    ///
    /// The returned load is not awaited here; the caller polls it and adds
    /// the object once it arrives.
    pub fn setup_models(
        &mut self,
        loader: &ModelLoader,
        model: Option<&str>,
    ) -> (Option<PendingModel>, ObjectId, ObjectId) {
        let pending = model.map(|name| loader.request(name));

        let mut plane = Object::new(
            "plane",
            vec![Mesh::new(generate_plane(20.0, 20.0, 1, 1))],
            Material::phong("plane", Color::WHITE),
        );
        plane.rotate_x(Deg(-90.0));
        let plane = self.scene.add_object(plane);
        mesh_controls(self.panel.add_folder("Plane"), plane).open();

        let mut cube = Object::new(
            "cube",
            vec![Mesh::new(generate_box(1.0, 1.0, 1.0))],
            Material::phong("cube", Color::WHITE),
        );
        cube.set_position(0.0, 2.0, 0.0);
        let cube = self.scene.add_object(cube);
        mesh_controls(self.panel.add_folder("Cube"), cube).open();

        (pending, plane, cube)
    }

    /// Applies `config` to the scene camera and returns the rig driving it.
    /// Projection edits from the `Camera` folder recompute the matrix
    /// immediately.
    pub fn setup_camera(&mut self, config: &CameraRigConfig) -> CameraRig {
        let rig = CameraRig::new(config, &mut self.scene.camera);

        let mut helper = Helper::new("camera helper", HelperKind::Camera);
        helper.visible = false;
        let helper = self.scene.add_helper(helper);

        let folder = self.panel.add_folder("Camera");
        folder
            .add_number("fov", |s: &Scene| s.camera.fov, |s, v| s.camera.fov = v)
            .on_change(refresh_projection);
        folder
            .add_number("near", |s: &Scene| s.camera.near, |s, v| s.camera.near = v)
            .on_change(refresh_projection);
        folder
            .add_number("far", |s: &Scene| s.camera.far, |s, v| s.camera.far = v)
            .on_change(refresh_projection);
        helper_toggle(folder, "Show helper", helper);
        folder.open();

        rig
    }

    pub fn finish(self) -> (Scene, ParameterPanel<Scene>) {
        let stats = self.scene.statistics();
        log::info!(
            "scene assembled: {} objects, {} lights, {} helpers, {} panel folders",
            stats.object_count,
            stats.light_count,
            stats.helper_count,
            self.panel.folders().len()
        );
        (self.scene, self.panel)
    }
}

fn refresh_projection(scene: &mut Scene) {
    scene.camera.update_projection_matrix();
}

fn helper_toggle(folder: &mut Folder<Scene>, label: &str, id: HelperId) {
    folder.add_toggle(
        label,
        move |s: &Scene| s[id].visible,
        move |s, v| s[id].visible = v,
    );
}

fn light_controls(folder: &mut Folder<Scene>, id: LightId) -> &mut Folder<Scene> {
    folder.add_toggle(
        "enable",
        move |s: &Scene| s[id].visible,
        move |s, v| s[id].visible = v,
    );
    folder.add_slider(
        "intensity",
        SliderRange::new(0.0, 1.0, 0.001),
        move |s: &Scene| s[id].intensity,
        move |s, v| s[id].intensity = v,
    );
    folder.add_color(
        "color",
        move |s: &Scene| s[id].color,
        move |s, v| s[id].color = v,
    );
    folder
}

fn mesh_controls(folder: &mut Folder<Scene>, id: ObjectId) -> &mut Folder<Scene> {
    folder.add_toggle(
        "enable",
        move |s: &Scene| s[id].visible,
        move |s, v| s[id].visible = v,
    );
    folder.add_color(
        "color",
        move |s: &Scene| s[id].material.color,
        move |s, v| s[id].material.color = v,
    );
    folder
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{ControlKind, ControlValue};

    fn assembled() -> (Scene, ParameterPanel<Scene>) {
        let mut assembler = SceneAssembler::new(1.6);
        assembler.setup_basics();
        assembler.setup_lights();
        let (pending, _, _) = assembler.setup_models(&ModelLoader::new("."), None);
        assert!(pending.is_none());
        assembler.setup_camera(&CameraRigConfig::default());
        assembler.finish()
    }

    #[test]
    fn test_folders_in_construction_order() {
        let (_, panel) = assembled();
        let names: Vec<_> = panel.folders().iter().map(|f| f.name()).collect();
        assert_eq!(
            names,
            [
                "General",
                "Ambient light",
                "Directional light",
                "Plane",
                "Cube",
                "Camera"
            ]
        );
        assert!(panel.folders().iter().all(|f| f.is_open()));
    }

    #[test]
    fn test_scene_content() {
        let (scene, _) = assembled();

        let cube = &scene[scene.find_object("cube").unwrap()];
        assert_eq!(cube.transform.position, Vector3::new(0.0, 2.0, 0.0));
        assert_eq!(cube.triangle_count(), 12);

        let plane = &scene[scene.find_object("plane").unwrap()];
        assert_eq!(plane.triangle_count(), 2);

        let sun = &scene[scene.find_light("directional").unwrap()];
        assert_eq!(sun.position(), Some(Vector3::new(1.0, 4.0, 0.0)));
        assert_eq!(sun.intensity, 0.3);

        assert!(!scene[scene.find_helper("axes").unwrap()].visible);
        assert!(!scene[scene.find_helper("camera helper").unwrap()].visible);
        assert!(scene[scene.find_helper("directional helper").unwrap()].visible);
    }

    #[test]
    fn test_light_folder_controls() {
        let (mut scene, panel) = assembled();
        let folder = panel.folder("Directional light").unwrap();
        let kinds: Vec<_> = folder.controls().iter().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            [
                ControlKind::Toggle,
                ControlKind::Slider,
                ControlKind::Color,
                ControlKind::Toggle
            ]
        );

        panel
            .write(&mut scene, "Ambient light", "intensity", ControlValue::Number(0.75))
            .unwrap();
        assert_eq!(scene[scene.find_light("ambient").unwrap()].intensity, 0.75);

        panel
            .write(&mut scene, "Directional light", "show helper", ControlValue::Bool(false))
            .unwrap();
        assert!(!scene[scene.find_helper("directional helper").unwrap()].visible);
    }

    #[test]
    fn test_cube_color_round_trips_through_panel() {
        let (mut scene, panel) = assembled();
        panel
            .write(&mut scene, "Cube", "color", ControlValue::Color(0x3366cc))
            .unwrap();
        let cube = &scene[scene.find_object("cube").unwrap()];
        assert_eq!(cube.material.color, Color::from_hex(0x3366cc));
        assert_eq!(
            panel.read(&scene, "Cube", "color").unwrap(),
            ControlValue::Color(0x3366cc)
        );
    }

    #[test]
    fn test_fov_edit_recomputes_projection() {
        let (mut scene, panel) = assembled();
        let before = scene.camera.projection_matrix();
        panel
            .write(&mut scene, "Camera", "fov", ControlValue::Number(40.0))
            .unwrap();
        assert_eq!(scene.camera.fov, 40.0);
        assert_ne!(scene.camera.projection_matrix(), before);
    }

    #[test]
    fn test_extreme_camera_edits_do_not_panic() {
        let (mut scene, panel) = assembled();
        panel
            .write(&mut scene, "Camera", "near", ControlValue::Number(40000.0))
            .unwrap();
        assert_eq!(scene.camera.near, 40000.0);

        let before = scene.camera.projection_matrix();
        panel
            .write(&mut scene, "Camera", "fov", ControlValue::Number(f32::NAN))
            .unwrap();
        assert_eq!(scene.camera.projection_matrix(), before);
    }
}
