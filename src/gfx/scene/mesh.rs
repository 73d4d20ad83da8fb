//! Mesh packing and upload
//!
//! Turns generated triangle soup into one interleaved float buffer laid out by
//! a [`VertexSchema`], then uploads it once as a static vertex buffer. Meshes
//! are write-once: there is no update or resize path, regenerating a shape
//! means uploading a new buffer.

use log::debug;
use wgpu::util::DeviceExt;

use super::vertex::VertexSchema;
use crate::error::{ForestError, Result};
use crate::gfx::geometry::MeshData;

/// Interleaved vertex floats ready for upload
#[derive(Debug, Clone, PartialEq)]
pub struct PackedMesh {
    pub schema: VertexSchema,
    pub data: Vec<f32>,
    pub vertex_count: u32,
    pub extent: Option<f32>,
}

impl PackedMesh {
    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    pub fn byte_len(&self) -> u64 {
        self.vertex_count as u64 * self.schema.stride()
    }
}

/// Interleaves the vertices of `mesh` according to `schema`
pub fn pack(mesh: &MeshData, schema: VertexSchema) -> PackedMesh {
    let mut data = Vec::with_capacity(mesh.vertex_count() * schema.floats_per_vertex());
    for vertex in &mesh.vertices {
        schema.write(vertex, &mut data);
    }

    PackedMesh {
        schema,
        data,
        vertex_count: mesh.vertex_count() as u32,
        extent: mesh.extent,
    }
}

/// Something that can turn packed vertex bytes into a GPU-resident buffer
pub trait MeshUploader {
    type Handle;

    fn upload_vertices(&self, label: &str, contents: &[u8]) -> Self::Handle;
}

impl MeshUploader for wgpu::Device {
    type Handle = wgpu::Buffer;

    fn upload_vertices(&self, label: &str, contents: &[u8]) -> wgpu::Buffer {
        self.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents,
            usage: wgpu::BufferUsages::VERTEX,
        })
    }
}

/// An uploaded mesh: buffer handle plus what the scene needs to draw and place it
#[derive(Debug)]
pub struct GeneratedMesh<H = wgpu::Buffer> {
    pub handle: H,
    pub vertex_count: u32,
    /// Shape-specific height, see [`shapes`](crate::gfx::geometry::shapes)
    pub extent: Option<f32>,
    pub schema: VertexSchema,
}

impl<H> GeneratedMesh<H> {
    pub fn triangle_count(&self) -> u32 {
        self.vertex_count / 3
    }
}

/// Uploads a packed mesh, rejecting empty ones
pub fn upload<U: MeshUploader + ?Sized>(
    uploader: &U,
    label: &str,
    packed: &PackedMesh,
) -> Result<GeneratedMesh<U::Handle>> {
    if packed.vertex_count == 0 {
        return Err(ForestError::EmptyMesh(label.to_string()));
    }

    debug!(
        "Uploading '{}': {} vertices, {} bytes, {:?}",
        label,
        packed.vertex_count,
        packed.byte_len(),
        packed.schema
    );

    let handle = uploader.upload_vertices(label, packed.bytes());

    Ok(GeneratedMesh {
        handle,
        vertex_count: packed.vertex_count,
        extent: packed.extent,
        schema: packed.schema,
    })
}

/// Packs `mesh` with `schema` and uploads it
pub fn pack_and_upload<U: MeshUploader + ?Sized>(
    uploader: &U,
    label: &str,
    mesh: &MeshData,
    schema: VertexSchema,
) -> Result<GeneratedMesh<U::Handle>> {
    upload(uploader, label, &pack(mesh, schema))
}
