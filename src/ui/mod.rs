//! # User Interface Module
//!
//! Dear ImGui overlay for the forest viewer. [`UiManager`] owns the imgui
//! context and its winit/wgpu glue; [`panel`] builds the stats window.
//!
//! When imgui wants the mouse or keyboard, camera input is suppressed so
//! typing into or dragging the overlay does not move the view.

pub mod manager;
pub mod panel;

pub use manager::{InputRoute, UiManager};
pub use panel::{forest_stats_panel, OverlayInfo};
