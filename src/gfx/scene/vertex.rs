//! # Vertex Data Structures
//!
//! Defines the CPU-side vertex record produced by the geometry generators and
//! the two interleaved layouts it can be packed into for the GPU.

use std::mem;

/// A vertex with position, normal and color.
///
/// Generators always fill all three attributes. Whether the normal reaches the
/// GPU depends on the [`VertexSchema`] a mesh is packed with.
///
/// # Memory Layout
///
/// `#[repr(C)]` with three `[f32; 3]` fields, 36 bytes, identical to
/// [`VertexSchema::PositionNormalColor`] so that schema can upload the vertex
/// slice as-is.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    /// Position [x, y, z]
    pub position: [f32; 3],
    /// Unit normal, or zero for a degenerate triangle
    pub normal: [f32; 3],
    /// Linear RGB color
    pub color: [f32; 3],
}

impl Vertex3D {
    pub fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 3]) -> Self {
        Self {
            position,
            normal,
            color,
        }
    }
}

const VEC3_SIZE: wgpu::BufferAddress = mem::size_of::<[f32; 3]>() as wgpu::BufferAddress;

const POSITION_COLOR_ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
    wgpu::VertexAttribute {
        offset: 0,
        shader_location: 0,
        format: wgpu::VertexFormat::Float32x3,
    },
    wgpu::VertexAttribute {
        offset: VEC3_SIZE,
        shader_location: 2,
        format: wgpu::VertexFormat::Float32x3,
    },
];

const POSITION_NORMAL_COLOR_ATTRIBUTES: [wgpu::VertexAttribute; 3] = [
    wgpu::VertexAttribute {
        offset: 0,
        shader_location: 0,
        format: wgpu::VertexFormat::Float32x3,
    },
    wgpu::VertexAttribute {
        offset: VEC3_SIZE,
        shader_location: 1,
        format: wgpu::VertexFormat::Float32x3,
    },
    wgpu::VertexAttribute {
        offset: VEC3_SIZE * 2,
        shader_location: 2,
        format: wgpu::VertexFormat::Float32x3,
    },
];

/// Interleaved vertex layouts a mesh can be packed into
///
/// Shader locations are fixed across schemas: position at 0, normal at 1,
/// color at 2. The compact schema simply has no location 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexSchema {
    /// `pos.xyz, color.rgb`: 6 floats, 24-byte stride
    PositionColor,
    /// `pos.xyz, normal.xyz, color.rgb`: 9 floats, 36-byte stride
    PositionNormalColor,
}

impl VertexSchema {
    pub fn floats_per_vertex(self) -> usize {
        match self {
            VertexSchema::PositionColor => 6,
            VertexSchema::PositionNormalColor => 9,
        }
    }

    pub fn stride(self) -> wgpu::BufferAddress {
        (self.floats_per_vertex() * mem::size_of::<f32>()) as wgpu::BufferAddress
    }

    pub fn normal_offset(self) -> Option<wgpu::BufferAddress> {
        match self {
            VertexSchema::PositionColor => None,
            VertexSchema::PositionNormalColor => Some(VEC3_SIZE),
        }
    }

    pub fn color_offset(self) -> wgpu::BufferAddress {
        match self {
            VertexSchema::PositionColor => VEC3_SIZE,
            VertexSchema::PositionNormalColor => VEC3_SIZE * 2,
        }
    }

    /// Returns the vertex buffer layout for wgpu rendering.
    ///
    /// Pipelines must be created with the layout of the schema their meshes
    /// were packed with; a mismatch is not detected and corrupts rendering.
    pub fn desc(self) -> wgpu::VertexBufferLayout<'static> {
        let attributes: &'static [wgpu::VertexAttribute] = match self {
            VertexSchema::PositionColor => &POSITION_COLOR_ATTRIBUTES,
            VertexSchema::PositionNormalColor => &POSITION_NORMAL_COLOR_ATTRIBUTES,
        };

        wgpu::VertexBufferLayout {
            array_stride: self.stride(),
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes,
        }
    }

    /// Writes the floats of one vertex in this schema's order
    pub fn write(self, vertex: &Vertex3D, out: &mut Vec<f32>) {
        out.extend_from_slice(&vertex.position);
        if self == VertexSchema::PositionNormalColor {
            out.extend_from_slice(&vertex.normal);
        }
        out.extend_from_slice(&vertex.color);
    }
}
