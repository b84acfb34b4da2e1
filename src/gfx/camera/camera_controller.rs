use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    keyboard::ModifiersState,
};

use super::{orbit_controls::OrbitControls, perspective_camera::PerspectiveCamera};

/// Pixel distance treated as one wheel notch for touchpad scrolling.
const PIXELS_PER_WHEEL_STEP: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Rotate,
    Pan,
}

/// Translates window pointer input into orbit-control requests.
///
/// Left drag rotates, right drag or shift + left drag pans, the wheel zooms.
#[derive(Debug, Default)]
pub struct CameraController {
    drag: Option<DragMode>,
    cursor: Option<PhysicalPosition<f64>>,
    modifiers: ModifiersState,
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_mode(&self) -> Option<DragMode> {
        self.drag
    }

    /// Feeds one window event. `viewport_height` is in the same physical
    /// pixels as the cursor positions winit reports.
    ///
    /// Returns whether the event was used.
    pub fn process_event(
        &mut self,
        event: &WindowEvent,
        controls: &mut OrbitControls,
        camera: &PerspectiveCamera,
        viewport_height: f32,
    ) -> bool {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
                false
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.press(*button, *state);
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.move_cursor(*position, controls, camera, viewport_height)
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.drag = None;
                false
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => {
                        *y as f32 / PIXELS_PER_WHEEL_STEP
                    }
                };
                controls.zoom_steps(steps);
                true
            }
            _ => false,
        }
    }

    fn press(&mut self, button: MouseButton, state: ElementState) {
        match (button, state) {
            (MouseButton::Left, ElementState::Pressed) => {
                self.drag = Some(if self.modifiers.shift_key() {
                    DragMode::Pan
                } else {
                    DragMode::Rotate
                });
            }
            (MouseButton::Right, ElementState::Pressed) => {
                self.drag = Some(DragMode::Pan);
            }
            (MouseButton::Left | MouseButton::Right, ElementState::Released) => {
                self.drag = None;
            }
            _ => (),
        }
    }

    fn move_cursor(
        &mut self,
        position: PhysicalPosition<f64>,
        controls: &mut OrbitControls,
        camera: &PerspectiveCamera,
        viewport_height: f32,
    ) -> bool {
        let previous = self.cursor.replace(position);
        let (Some(previous), Some(mode)) = (previous, self.drag) else {
            return false;
        };

        let dx = (position.x - previous.x) as f32;
        let dy = (position.y - previous.y) as f32;
        match mode {
            DragMode::Rotate => controls.rotate_pixels(dx, dy, viewport_height),
            DragMode::Pan => controls.pan_pixels(camera, dx, dy, viewport_height),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    fn setup() -> (CameraController, OrbitControls, PerspectiveCamera) {
        let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0);
        camera.set_position(0.0, 0.0, 10.0);
        let controls = OrbitControls::new(Vector3::new(0.0, 0.0, 0.0));
        (CameraController::new(), controls, camera)
    }

    #[test]
    fn test_motion_without_drag_is_ignored() {
        let (mut controller, mut controls, mut camera) = setup();
        controller.move_cursor(PhysicalPosition::new(10.0, 10.0), &mut controls, &camera, 800.0);
        assert!(!controller.move_cursor(
            PhysicalPosition::new(50.0, 10.0),
            &mut controls,
            &camera,
            800.0
        ));
        assert!(!controls.update(&mut camera));
    }

    #[test]
    fn test_left_drag_rotates() {
        let (mut controller, mut controls, mut camera) = setup();
        controller.press(MouseButton::Left, ElementState::Pressed);
        assert_eq!(controller.drag_mode(), Some(DragMode::Rotate));

        controller.move_cursor(PhysicalPosition::new(10.0, 10.0), &mut controls, &camera, 800.0);
        controller.move_cursor(PhysicalPosition::new(60.0, 10.0), &mut controls, &camera, 800.0);
        controls.update(&mut camera);

        assert!(camera.position.x < 0.0);
        assert!((camera.position.y).abs() < 1e-4);

        controller.press(MouseButton::Left, ElementState::Released);
        assert_eq!(controller.drag_mode(), None);
    }

    #[test]
    fn test_shift_left_and_right_drag_pan() {
        let (mut controller, _, _) = setup();
        controller.modifiers = ModifiersState::SHIFT;
        controller.press(MouseButton::Left, ElementState::Pressed);
        assert_eq!(controller.drag_mode(), Some(DragMode::Pan));

        let (mut controller, _, _) = setup();
        controller.press(MouseButton::Right, ElementState::Pressed);
        assert_eq!(controller.drag_mode(), Some(DragMode::Pan));
    }
}
