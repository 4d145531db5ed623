use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, MouseButton},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use super::{arcball::Arcball, walk_camera::WalkCamera};

/// Routes discrete key commands to the camera and pointer drags to the
/// arcball, requesting a redraw after every state change.
pub struct Controls {
    pub turn_step: f32,
    pub move_step: f32,
    is_pointer_down: bool,
    cursor: PhysicalPosition<f64>,
}

impl Controls {
    pub fn new(turn_step: f32, move_step: f32) -> Self {
        Self {
            turn_step,
            move_step,
            is_pointer_down: false,
            cursor: PhysicalPosition::new(0.0, 0.0),
        }
    }

    pub fn on_cursor_moved(
        &mut self,
        position: PhysicalPosition<f64>,
        arcball: &mut Arcball,
        window: &Window,
    ) {
        self.cursor = position;
        if self.is_pointer_down {
            arcball.end(position.x, position.y);
            window.request_redraw();
        }
    }

    pub fn on_mouse_input(
        &mut self,
        state: ElementState,
        button: MouseButton,
        arcball: &mut Arcball,
    ) {
        if button != MouseButton::Left {
            return;
        }
        let pressed = state == ElementState::Pressed;
        if pressed && !self.is_pointer_down {
            arcball.start(self.cursor.x, self.cursor.y);
        }
        self.is_pointer_down = pressed;
    }

    pub fn on_key(&mut self, event: &KeyEvent, camera: &mut WalkCamera, window: &Window) {
        if event.state != ElementState::Pressed {
            return;
        }
        match event.physical_key {
            PhysicalKey::Code(KeyCode::ArrowLeft | KeyCode::KeyA) => {
                camera.rotate(self.turn_step);
            }
            PhysicalKey::Code(KeyCode::ArrowRight | KeyCode::KeyD) => {
                camera.rotate(-self.turn_step);
            }
            PhysicalKey::Code(KeyCode::ArrowUp | KeyCode::KeyW) => {
                camera.advance(self.move_step);
            }
            PhysicalKey::Code(KeyCode::ArrowDown | KeyCode::KeyS) => {
                camera.advance(-self.move_step);
            }
            _ => return,
        }
        window.request_redraw();
    }

    /// True while a drag gesture is feeding the arcball.
    pub fn is_dragging(&self) -> bool {
        self.is_pointer_down
    }
}
