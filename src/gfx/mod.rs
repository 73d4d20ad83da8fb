//! # Graphics Module
//!
//! Everything between the planted forest and pixels on screen.
//!
//! - **Camera** ([`camera`]) - first-person fly camera and its input controller
//! - **Geometry** ([`geometry`]) - procedural tree, ground and sun meshes
//! - **Scene** ([`scene`]) - vertex packing, mesh upload and forest layout
//! - **Resources** ([`resources`]) - global uniforms and the depth buffer
//! - **Rendering** ([`rendering`]) - pipelines and the frame loop
//!
//! Generation never touches the GPU: [`scene::forest::ForestLayout`] is
//! sampled on the CPU first and only [`scene::forest::ForestScene::upload`]
//! creates vertex buffers.

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::fly_camera::FlyCamera;
pub use rendering::render_engine::RenderEngine;
