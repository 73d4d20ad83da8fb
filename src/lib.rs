// src/lib.rs
//! Forest Viewer
//!
//! Plants a procedurally generated low-poly forest and renders it with wgpu
//! inside a winit window, explored through a first-person fly camera.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::ForestApp;
pub use config::ForestConfig;
pub use error::ForestError;
