// src/gfx/rendering/mod.rs
//! Frame rendering: pipelines built from `forest.wgsl` and the engine that
//! owns the surface and issues draw calls.

pub mod pipeline_manager;
pub mod render_engine;

pub use pipeline_manager::{PipelineConfig, PipelineManager};
pub use render_engine::{DrawList, RenderEngine};
