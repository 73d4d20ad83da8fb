// src/error.rs
//! Error types for the forest viewer

use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, ForestError>;

/// Errors raised while configuring the scene or bringing up the GPU
#[derive(Error, Debug)]
pub enum ForestError {
    #[error("Failed to create render surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("No compatible graphics adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("Failed to request a device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("Surface texture unavailable: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("Cannot upload empty mesh '{0}'")]
    EmptyMesh(String),

    #[error("Pipeline setup failed: {0}")]
    Pipeline(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
