use cgmath::{Matrix4, Vector3};

use super::mesh::GeneratedMesh;
use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
    uniform_buffer::UniformBuffer,
};

/// Per-object model matrix, bound at group 1
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniform {
    pub model: [[f32; 4]; 4],
}

impl TransformUniform {
    pub fn from_translation(translation: [f32; 3]) -> Self {
        Self {
            model: Matrix4::from_translation(Vector3::from(translation)).into(),
        }
    }
}

pub fn transform_layout(device: &wgpu::Device) -> BindGroupLayoutWithDesc {
    BindGroupLayoutBuilder::new()
        .next_binding_vertex(binding_types::uniform_of::<TransformUniform>())
        .create(device, "Transform Bind Group Layout")
}

/// An uploaded mesh placed in the world
pub struct SceneObject {
    pub name: String,
    pub mesh: GeneratedMesh,
    _transform: UniformBuffer<TransformUniform>,
    bind_group: wgpu::BindGroup,
}

impl SceneObject {
    pub fn new(
        device: &wgpu::Device,
        layout: &BindGroupLayoutWithDesc,
        name: impl Into<String>,
        mesh: GeneratedMesh,
        translation: [f32; 3],
    ) -> Self {
        let name = name.into();
        let transform = UniformBuffer::new(
            device,
            &format!("{name} Model"),
            &TransformUniform::from_translation(translation),
        );
        let bind_group = BindGroupBuilder::new(layout)
            .resource(transform.binding_resource())
            .create(device, &format!("{name} Transform"));

        Self {
            name,
            mesh,
            _transform: transform,
            bind_group,
        }
    }
}

pub trait DrawObject {
    fn draw_mesh(&mut self, mesh: &GeneratedMesh);
    fn draw_object(&mut self, object: &SceneObject);
}

impl DrawObject for wgpu::RenderPass<'_> {
    fn draw_mesh(&mut self, mesh: &GeneratedMesh) {
        self.set_vertex_buffer(0, mesh.handle.slice(..));
        self.draw(0..mesh.vertex_count, 0..1);
    }

    fn draw_object(&mut self, object: &SceneObject) {
        self.set_bind_group(1, &object.bind_group, &[]);
        self.draw_mesh(&object.mesh);
    }
}
