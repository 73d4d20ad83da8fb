use cgmath::{Matrix4, SquareMatrix};
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseButton};

use super::{camera_controller::CameraController, fly_camera::FlyCamera};

pub struct CameraManager {
    pub camera: FlyCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: FlyCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    pub fn process_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.controller
                .process_mouse_motion(*delta, &mut self.camera);
        }
    }

    pub fn process_keyboard_event(&mut self, event: &KeyEvent) -> bool {
        self.controller.process_keyed_events(event)
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.controller.process_mouse_button(button, state);
    }

    /// Advances the camera by one frame of `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.controller.update_camera(&mut self.camera, dt);
    }

    pub fn uniform(&self) -> CameraUniform {
        self.camera.uniform
    }
}

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix4.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    #[test]
    fn mouse_motion_only_turns_while_looking() {
        let camera = FlyCamera::new(Vector3::new(0.0, 2.0, 10.0), -90.0, 0.0, 1.5);
        let mut manager = CameraManager::new(camera, CameraController::new(2.5, 0.1));

        manager.process_event(&DeviceEvent::MouseMotion { delta: (30.0, 0.0) });
        assert_eq!(manager.camera.yaw, -90.0);

        manager.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        manager.process_event(&DeviceEvent::MouseMotion { delta: (30.0, 0.0) });
        assert!((manager.camera.yaw - -87.0).abs() < 1e-4);
    }

    #[test]
    fn update_refreshes_uniform() {
        let camera = FlyCamera::new(Vector3::new(0.0, 2.0, 10.0), -90.0, 0.0, 1.5);
        let mut manager = CameraManager::new(camera, CameraController::new(2.5, 0.1));
        manager.camera.position = Vector3::new(4.0, 1.0, 0.0);
        manager.update(0.016);
        assert_eq!(manager.uniform().view_position, [4.0, 1.0, 0.0, 1.0]);
    }
}
