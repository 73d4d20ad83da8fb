//! # Scene Module
//!
//! Everything between generated geometry and a draw call: the vertex record
//! and its GPU layouts, the packer that uploads meshes, forest assembly, and
//! placed objects with their transform uniforms.
//!
//! - [`vertex`] - [`Vertex3D`] and the two [`VertexSchema`] layouts
//! - [`mesh`] - packing and one-shot upload into a [`GeneratedMesh`]
//! - [`forest`] - weighted tree selection, placement and scene statistics
//! - [`object`] - [`SceneObject`] and the [`DrawObject`] render pass extension

pub mod forest;
pub mod mesh;
pub mod object;
pub mod vertex;

pub use forest::{ForestLayout, ForestScene, ForestStats, ShapeWeights, TreeInstance};
pub use mesh::{GeneratedMesh, MeshUploader, PackedMesh};
pub use object::{DrawObject, SceneObject};
pub use vertex::{Vertex3D, VertexSchema};
