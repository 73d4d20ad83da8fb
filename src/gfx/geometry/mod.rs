//! # Procedural Geometry Generation
//!
//! This module synthesizes every mesh the forest viewer draws. Nothing is loaded
//! from disk: trunks, canopies, fronds, the ground and the sun are sampled from
//! small parameter sets each run.
//!
//! ## Layers
//!
//! - [`math`] - spherical sampling, face normals, triangle assembly
//! - [`random`] - the injectable [`UniformSource`](random::UniformSource)
//! - [`primitives`] - cylinder, cone, disk and UV sphere samplers
//! - [`shapes`] - composite trees, ground quad and sun sphere
//!
//! ## Usage
//!
//! ```rust
//! use forest_viewer::gfx::geometry::{random::forest_rng, shapes::ConeTreeParams};
//!
//! let mut rng = forest_rng(Some(3));
//! let tree = ConeTreeParams::sample(&mut rng).build();
//! assert_eq!(tree.vertex_count() % 3, 0);
//! ```

pub mod math;
pub mod primitives;
pub mod random;
pub mod shapes;

use crate::gfx::scene::vertex::Vertex3D;

/// Linear RGB color
pub type Color = [f32; 3];

/// Generated triangle soup ready for packing
///
/// Every consecutive group of three vertices is one triangle; nothing is
/// shared or indexed.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex3D>,
    /// Shape-specific height reported to the scene, if the shape defines one
    pub extent: Option<f32>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            extent: None,
        }
    }

    pub fn with_extent(mut self, extent: f32) -> Self {
        self.extent = Some(extent);
        self
    }

    pub fn push_triangle(&mut self, triangle: [Vertex3D; 3]) {
        self.vertices.extend_from_slice(&triangle);
    }

    /// Appends the vertices of `other`; its extent is discarded
    pub fn append(&mut self, other: MeshData) {
        self.vertices.extend(other.vertices);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
