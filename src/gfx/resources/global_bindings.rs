//! Global uniform bindings for camera and lighting
//!
//! One uniform buffer bound at group 0 for every pipeline. The sun doubles as
//! the only light: its world position drives the diffuse term of the lit
//! shader.

use crate::{
    gfx::camera::camera_utils::CameraUniform,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Global uniform buffer content
///
/// MUST match the `Globals` struct in `forest.wgsl` exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    light_position: [f32; 3],
    _padding: f32,
    light_color: [f32; 3],
    ambient: f32,
}

/// Point light placed at the sun
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightConfig {
    pub position: [f32; 3],
    pub color: [f32; 3],
    /// Fraction of the base color lit regardless of orientation
    pub ambient: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: [10.0, 18.0, -12.0],
            color: [1.0, 0.97, 0.9],
            ambient: 0.3,
        }
    }
}

impl LightConfig {
    pub fn at(position: [f32; 3]) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

pub fn global_content(camera: CameraUniform, light: LightConfig) -> GlobalUBOContent {
    GlobalUBOContent {
        view_position: camera.view_position,
        view_proj: camera.view_proj,
        light_position: light.position,
        _padding: 0.0,
        light_color: light.color,
        ambient: light.ambient,
    }
}

/// Writes the frame's camera and light into the global uniform buffer
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    light: LightConfig,
) {
    ubo.write(queue, &global_content(camera, light));
}

/// Layout and bind group for group 0
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform_of::<GlobalUBOContent>())
            .create(device, "Globals Bind Group Layout");

        let bind_group = BindGroupBuilder::new(&bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Globals Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group,
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_layout_matches_shader() {
        // vec4 + mat4x4 + vec3/f32 + vec3/f32
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 16 + 64 + 16 + 16);
    }

    #[test]
    fn content_carries_camera_and_light() {
        let camera = CameraUniform {
            view_position: [1.0, 2.0, 3.0, 1.0],
            ..Default::default()
        };
        let light = LightConfig::at([10.0, 18.0, -12.0]);
        let content = global_content(camera, light);

        assert_eq!(content.view_position, camera.view_position);
        assert_eq!(content.light_position, [10.0, 18.0, -12.0]);
        assert_eq!(content.ambient, light.ambient);
    }
}
