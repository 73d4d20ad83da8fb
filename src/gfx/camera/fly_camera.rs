use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Pitch limit in degrees; looking straight up or down would flip the view
pub const PITCH_LIMIT: f32 = 89.0;

/// First-person camera steered by yaw and pitch angles in degrees
///
/// Yaw `-90°` looks down `-Z`, yaw `0°` down `+X`.
#[derive(Debug, Clone, Copy)]
pub struct FlyCamera {
    pub position: Vector3<f32>,
    pub yaw: f32,
    pub pitch: f32,
    pub up: Vector3<f32>,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl Camera for FlyCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.position);
        let view = Matrix4::look_to_rh(eye, self.forward(), self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl FlyCamera {
    pub fn new(position: Vector3<f32>, yaw: f32, pitch: f32, aspect: f32) -> Self {
        let mut camera = Self {
            position,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            up: Vector3::unit_y(),
            aspect,
            fovy: Rad::from(Deg(45.0)),
            znear: 0.1,
            zfar: 500.0,
            uniform: CameraUniform::default(),
        };
        camera.update_view_proj();
        camera
    }

    /// Unit view direction
    pub fn forward(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = Rad::from(Deg(self.yaw)).0.sin_cos();
        let (pitch_sin, pitch_cos) = Rad::from(Deg(self.pitch)).0.sin_cos();
        Vector3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize()
    }

    /// Unit vector to the right of the view direction, always horizontal
    pub fn right(&self) -> Vector3<f32> {
        self.forward().cross(self.up).normalize()
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.yaw = (self.yaw + delta) % 360.0;
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.pitch = (self.pitch + delta).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Moves along the camera's own axes: `x` right, `y` world up, `z` forward
    pub fn translate_local(&mut self, offset: Vector3<f32>) {
        self.position += self.right() * offset.x + self.up * offset.y + self.forward() * offset.z;
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.position.x, self.position.y, self.position.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).magnitude() < 1e-5
    }

    #[test]
    fn default_yaw_looks_down_negative_z() {
        let camera = FlyCamera::new(Vector3::zero(), -90.0, 0.0, 1.5);
        assert!(approx(camera.forward(), Vector3::new(0.0, 0.0, -1.0)));
        assert!(approx(camera.right(), Vector3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = FlyCamera::new(Vector3::zero(), -90.0, 0.0, 1.0);
        camera.add_pitch(500.0);
        assert_eq!(camera.pitch, PITCH_LIMIT);
        camera.add_pitch(-1000.0);
        assert_eq!(camera.pitch, -PITCH_LIMIT);
        assert!(camera.forward().x.is_finite());
    }

    #[test]
    fn local_translation_follows_heading() {
        let mut camera = FlyCamera::new(Vector3::new(0.0, 2.0, 10.0), -90.0, 0.0, 1.0);
        camera.translate_local(Vector3::new(0.0, 0.0, 3.0));
        assert!(approx(camera.position, Vector3::new(0.0, 2.0, 7.0)));
        camera.translate_local(Vector3::new(1.0, 1.0, 0.0));
        assert!(approx(camera.position, Vector3::new(1.0, 3.0, 7.0)));
    }

    #[test]
    fn uniform_tracks_position() {
        let mut camera = FlyCamera::new(Vector3::new(1.0, 2.0, 3.0), -90.0, 0.0, 1.0);
        camera.position.y = 5.0;
        camera.update_view_proj();
        assert_eq!(camera.uniform.view_position, [1.0, 5.0, 3.0, 1.0]);
    }
}
