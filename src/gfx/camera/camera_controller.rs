use cgmath::Vector3;
use winit::{
    event::{ElementState, KeyEvent, MouseButton},
    keyboard::{KeyCode, PhysicalKey},
};

use super::fly_camera::FlyCamera;

/// Turns keyboard and mouse input into fly camera motion
///
/// Keys only record state; movement is applied once per frame in
/// [`CameraController::update_camera`] scaled by the frame time, so speed does
/// not depend on the frame rate. Mouse look is active while the right button
/// is held.
#[derive(Debug, Clone)]
pub struct CameraController {
    /// Units per second
    pub speed: f32,
    /// Degrees per pixel of mouse motion
    pub sensitivity: f32,
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    is_looking: bool,
}

impl CameraController {
    pub fn new(speed: f32, sensitivity: f32) -> Self {
        Self {
            speed,
            sensitivity,
            forward: false,
            backward: false,
            left: false,
            right: false,
            up: false,
            down: false,
            is_looking: false,
        }
    }

    /// Records movement key state; returns whether the key was consumed
    pub fn process_keyed_events(&mut self, event: &KeyEvent) -> bool {
        let PhysicalKey::Code(code) = event.physical_key else {
            return false;
        };
        let pressed = event.state == ElementState::Pressed;
        self.process_key(code, pressed)
    }

    pub fn process_key(&mut self, code: KeyCode, pressed: bool) -> bool {
        match code {
            KeyCode::KeyW | KeyCode::ArrowUp => self.forward = pressed,
            KeyCode::KeyS | KeyCode::ArrowDown => self.backward = pressed,
            KeyCode::KeyA | KeyCode::ArrowLeft => self.left = pressed,
            KeyCode::KeyD | KeyCode::ArrowRight => self.right = pressed,
            KeyCode::Space => self.up = pressed,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => self.down = pressed,
            _ => return false,
        }
        true
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Right {
            self.is_looking = state == ElementState::Pressed;
        }
    }

    /// Applies raw mouse motion while looking
    pub fn process_mouse_motion(&mut self, delta: (f64, f64), camera: &mut FlyCamera) {
        if !self.is_looking {
            return;
        }
        camera.add_yaw(delta.0 as f32 * self.sensitivity);
        camera.add_pitch(-delta.1 as f32 * self.sensitivity);
    }

    pub fn is_looking(&self) -> bool {
        self.is_looking
    }

    /// Moves the camera by the held keys for a frame lasting `dt` seconds
    pub fn update_camera(&self, camera: &mut FlyCamera, dt: f32) {
        let axis = |positive: bool, negative: bool| (positive as i8 - negative as i8) as f32;
        let direction = Vector3::new(
            axis(self.right, self.left),
            axis(self.up, self.down),
            axis(self.forward, self.backward),
        );

        if direction != Vector3::new(0.0, 0.0, 0.0) {
            camera.translate_local(direction * self.speed * dt);
        }
        camera.update_view_proj();
    }

    /// Drops all held keys, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        *self = Self::new(self.speed, self.sensitivity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    fn camera() -> FlyCamera {
        FlyCamera::new(Vector3::new(0.0, 2.0, 0.0), -90.0, 0.0, 1.0)
    }

    #[test]
    fn held_key_moves_at_speed() {
        let mut controller = CameraController::new(2.5, 0.1);
        let mut camera = camera();

        assert!(controller.process_key(KeyCode::KeyW, true));
        controller.update_camera(&mut camera, 2.0);
        assert!((camera.position - Vector3::new(0.0, 2.0, -5.0)).magnitude() < 1e-5);

        controller.process_key(KeyCode::KeyW, false);
        controller.update_camera(&mut camera, 2.0);
        assert!((camera.position - Vector3::new(0.0, 2.0, -5.0)).magnitude() < 1e-5);
    }

    #[test]
    fn space_and_shift_move_vertically() {
        let mut controller = CameraController::new(1.0, 0.1);
        let mut camera = camera();
        controller.process_key(KeyCode::Space, true);
        controller.update_camera(&mut camera, 1.0);
        assert!((camera.position.y - 3.0).abs() < 1e-5);

        controller.process_key(KeyCode::ShiftLeft, true);
        controller.update_camera(&mut camera, 1.0);
        assert!((camera.position.y - 3.0).abs() < 1e-5);
    }

    #[test]
    fn unrelated_key_is_not_consumed() {
        let mut controller = CameraController::new(1.0, 0.1);
        assert!(!controller.process_key(KeyCode::KeyQ, true));
    }

    #[test]
    fn mouse_look_requires_right_button() {
        let mut controller = CameraController::new(1.0, 0.1);
        let mut camera = camera();

        controller.process_mouse_motion((100.0, 0.0), &mut camera);
        assert_eq!(camera.yaw, -90.0);

        controller.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        controller.process_mouse_motion((100.0, 50.0), &mut camera);
        assert!((camera.yaw - -80.0).abs() < 1e-4);
        assert!((camera.pitch - -5.0).abs() < 1e-4);

        controller.process_mouse_button(MouseButton::Right, ElementState::Released);
        assert!(!controller.is_looking());
    }

    #[test]
    fn release_all_stops_motion() {
        let mut controller = CameraController::new(1.0, 0.1);
        let mut camera = camera();
        controller.process_key(KeyCode::KeyD, true);
        controller.release_all();
        let before = camera.position;
        controller.update_camera(&mut camera, 1.0);
        assert_eq!(camera.position, before);
    }
}
