//! Window-independent viewer state.
//!
//! [`Viewer`] owns everything a frame reads or writes on the CPU side: the
//! scene, the camera rig, the parameter panel, the viewport, the clock and
//! the model load in flight. The app feeds it window events and hands its
//! scene to the renderer; nothing here touches the GPU.

use winit::event::WindowEvent;

use crate::{
    assembler::SceneAssembler,
    config::AppConfig,
    gfx::{
        camera::{CameraRig, CameraRigConfig},
        rendering::Viewport,
        scene::{ModelLoader, ObjectId, PendingModel, Scene},
    },
    performance::{FrameClock, FrameTime},
    ui::ParameterPanel,
};

pub struct Viewer {
    pub scene: Scene,
    pub rig: CameraRig,
    pub panel: ParameterPanel<Scene>,
    viewport: Viewport,
    clock: FrameClock,
    pending: Option<PendingModel>,
}

impl Viewer {
    /// Assembles the demo scene for `viewport` and starts loading the
    /// configured model.
    pub fn new(config: &AppConfig, viewport: Viewport) -> Self {
        let loader = ModelLoader::new(&config.asset_root);

        let mut assembler = SceneAssembler::new(viewport.aspect());
        assembler.setup_basics();
        assembler.setup_lights();
        let (pending, _, _) = assembler.setup_models(&loader, config.model.as_deref());
        let rig = assembler.setup_camera(&CameraRigConfig::default());
        let (scene, panel) = assembler.finish();

        Self {
            scene,
            rig,
            panel,
            viewport,
            clock: FrameClock::new(),
            pending,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Takes the new viewport and refreshes the camera projection for its
    /// aspect ratio. Empty viewports (minimised windows) leave the camera
    /// untouched.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if viewport.is_empty() {
            return;
        }
        self.scene.camera.aspect = viewport.aspect();
        self.scene.camera.update_projection_matrix();
        log::debug!(
            "viewer: resized to {}x{} (pixel ratio {})",
            viewport.width,
            viewport.height,
            viewport.pixel_ratio()
        );
    }

    /// Forwards pointer input to the camera rig. Returns true if consumed.
    pub fn handle_input(&mut self, event: &WindowEvent) -> bool {
        self.rig
            .process_event(event, &self.scene.camera, self.viewport.pointer_height())
    }

    /// Per-frame update: advances the clock, adds a finished model to the
    /// scene and steps the camera damping.
    pub fn update(&mut self) -> FrameTime {
        let time = self.clock.advance();
        self.poll_model();
        self.rig.update(&mut self.scene.camera);
        log::trace!("frame at {:.3}s (+{:.4}s)", time.elapsed, time.delta);
        time
    }

    /// Checks the model load once. A finished model is added to the scene;
    /// a failed one is logged and dropped.
    pub fn poll_model(&mut self) -> Option<ObjectId> {
        let pending = self.pending.as_mut()?;
        let outcome = pending.poll();
        if pending.is_done() {
            self.pending = None;
        }

        match outcome? {
            Ok(object) => {
                log::info!(
                    "model '{}' loaded ({} triangles)",
                    object.name,
                    object.triangle_count()
                );
                Some(self.scene.add_object(object))
            }
            Err(err) => {
                log::warn!("model not loaded: {}", err);
                None
            }
        }
    }
}
