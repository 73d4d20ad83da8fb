// src/gfx/resources/mod.rs
//! GPU resources shared by every draw: global uniforms and the depth target.

pub mod depth_buffer;
pub mod global_bindings;

pub use depth_buffer::DepthBuffer;
pub use global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO, LightConfig};
