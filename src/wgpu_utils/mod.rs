// src/wgpu_utils/mod.rs
//! Small wrappers over recurring wgpu chores: typed uniform buffers and
//! incremental bind group construction.

pub mod binding_builder;
pub mod binding_types;
pub mod uniform_buffer;

pub use binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc};
pub use uniform_buffer::UniformBuffer;
