use anyhow::Context;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::AppConfig,
    gfx::rendering::{RenderEngine, Viewport},
    performance::PerformanceOverlay,
    ui::UiManager,
    viewer::Viewer,
};

/// Lifecycle of the application. There is no terminal phase; the loop runs
/// until the window closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    Uninitialized,
    /// Window exists, scene and renderer are being built
    Constructing,
    /// Render loop active, resize handling active
    Running,
}

/// Start/stop switch for the redraw loop.
#[derive(Debug, Default)]
pub struct FrameLoop {
    running: bool,
    frames: u64,
}

impl FrameLoop {
    pub fn start(&mut self) {
        if !self.running {
            log::info!("frame loop started");
        }
        self.running = true;
    }

    pub fn stop(&mut self) {
        if self.running {
            log::info!("frame loop stopped after {} frames", self.frames);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn tick(&mut self) {
        self.frames += 1;
    }
}

pub struct GlimpseApp {
    state: AppState,
}

struct AppState {
    config: AppConfig,
    phase: AppPhase,
    frame_loop: FrameLoop,
    window: Option<Arc<Window>>,
    viewer: Option<Viewer>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    overlay: PerformanceOverlay,
    fatal: Option<anyhow::Error>,
}

impl GlimpseApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            state: AppState {
                config,
                phase: AppPhase::Uninitialized,
                frame_loop: FrameLoop::default(),
                window: None,
                viewer: None,
                render_engine: None,
                ui_manager: None,
                overlay: PerformanceOverlay::disabled(),
                fatal: None,
            },
        }
    }

    pub fn phase(&self) -> AppPhase {
        self.state.phase
    }

    /// Run the application until the window closes or Escape is pressed.
    ///
    /// # Errors
    /// Fails if the event loop cannot start or the window or renderer cannot
    /// be created.
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = EventLoop::new().context("failed to create event loop")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.state)
            .context("event loop exited with an error")?;

        match self.state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{:#}", err);
        self.frame_loop.stop();
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn viewport(&self, window: &Window, scale_factor: f64) -> Viewport {
        Viewport::from_physical(window.inner_size(), scale_factor, self.config.max_pixel_ratio)
    }

    /// Camera, surface and UI scale all follow the new viewport before the
    /// handler returns.
    fn apply_resize(&mut self, viewport: Viewport) {
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.resize(viewport);
        }
        if let Some(render_engine) = self.render_engine.as_mut() {
            render_engine.resize(&viewport);
        }
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            ui_manager.set_pixel_ratio(viewport.pixel_ratio());
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(viewer), Some(render_engine), Some(ui_manager)) = (
            self.window.as_ref(),
            self.viewer.as_mut(),
            self.render_engine.as_mut(),
            self.ui_manager.as_mut(),
        ) else {
            return;
        };

        self.overlay.begin();
        viewer.update();

        // Panel edits land in the scene before it is drawn
        let overlay = &self.overlay;
        ui_manager.update_logic(window, |ui| {
            viewer.panel.draw(ui, &mut viewer.scene);
            overlay.draw(ui);
        });

        let result = render_engine.render_frame(&viewer.scene, |device, queue, encoder, view| {
            ui_manager.render(device, queue, encoder, view);
        });

        match result {
            Ok(stats) => {
                self.overlay.set_render_stats(stats);
                self.frame_loop.tick();
            }
            Err(err) => {
                self.overlay.end();
                self.fail(event_loop, anyhow::Error::new(err).context("rendering failed"));
                return;
            }
        }
        self.overlay.end();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        self.phase = AppPhase::Constructing;

        let (width, height) = self.config.window_size;
        let attributes = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(width, height));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                self.fail(event_loop, anyhow::Error::new(err).context("failed to create window"));
                return;
            }
        };
        let viewport = self.viewport(&window, window.scale_factor());

        if self.config.show_overlay {
            self.overlay = PerformanceOverlay::standard();
        }

        let viewer = Viewer::new(&self.config, viewport);

        let clear_color = self.config.clear_color();
        let surface_window = window.clone();
        let render_engine = match pollster::block_on(async move {
            RenderEngine::new(surface_window, &viewport, clear_color).await
        }) {
            Ok(render_engine) => render_engine,
            Err(err) => {
                self.fail(event_loop, anyhow::Error::new(err).context("no draw surface"));
                return;
            }
        };

        let ui_manager = UiManager::new(
            render_engine.device(),
            render_engine.queue(),
            render_engine.surface_format(),
            &window,
            viewport.pixel_ratio(),
        );

        log::info!(
            "{} ready: {}x{} logical, pixel ratio {} (device {})",
            self.config.title,
            viewport.width,
            viewport.height,
            viewport.pixel_ratio(),
            viewport.device_pixel_ratio()
        );

        self.window = Some(window);
        self.viewer = Some(viewer);
        self.render_engine = Some(render_engine);
        self.ui_manager = Some(ui_manager);
        self.phase = AppPhase::Running;
        self.frame_loop.start();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.clone() else {
            return;
        };

        // Handle UI input first
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            if ui_manager.handle_input(&window, window_id, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                self.frame_loop.stop();
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.frame_loop.stop();
                event_loop.exit();
            }
            WindowEvent::Resized(_) => {
                let viewport = self.viewport(&window, window.scale_factor());
                self.apply_resize(viewport);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let viewport = self.viewport(&window, scale_factor);
                self.apply_resize(viewport);
            }
            WindowEvent::RedrawRequested => {
                if self.frame_loop.is_running() {
                    self.redraw(event_loop);
                }
            }
            other => {
                if let Some(viewer) = self.viewer.as_mut() {
                    viewer.handle_input(&other);
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if !self.frame_loop.is_running() {
            return;
        }
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_loop_start_stop() {
        let mut frame_loop = FrameLoop::default();
        assert!(!frame_loop.is_running());

        frame_loop.start();
        frame_loop.start();
        assert!(frame_loop.is_running());

        frame_loop.tick();
        frame_loop.stop();
        assert!(!frame_loop.is_running());
        assert_eq!(frame_loop.frames(), 1);
    }

    #[test]
    fn test_new_app_is_uninitialized() {
        let app = GlimpseApp::new(AppConfig::default());
        assert_eq!(app.phase(), AppPhase::Uninitialized);
        assert!(!app.state.frame_loop.is_running());
        assert!(!app.state.overlay.is_enabled());
    }
}
