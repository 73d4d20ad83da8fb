// src/ui/panel.rs
//! Stats overlay for the forest viewer

use crate::gfx::camera::FlyCamera;
use crate::gfx::geometry::shapes::ShapeKind;
use crate::gfx::scene::forest::ForestStats;

/// Everything the overlay shows, gathered once per frame
pub struct OverlayInfo<'a> {
    pub stats: &'a ForestStats,
    pub seed: u64,
    pub camera: &'a FlyCamera,
    pub looking: bool,
}

/// Text lines describing the planted forest
pub fn forest_lines(stats: &ForestStats, seed: u64) -> Vec<String> {
    let mut lines: Vec<String> = ShapeKind::ALL
        .iter()
        .map(|kind| format!("{:<12} {}", kind.name(), stats.count(*kind)))
        .collect();

    lines.push(format!("triangles    {}", stats.total_triangles));
    lines.push(match stats.tallest {
        Some(height) => format!("tallest      {height:.2}"),
        None => "tallest      -".to_string(),
    });
    lines.push(format!("seed         {seed}"));
    lines
}

pub fn camera_lines(camera: &FlyCamera) -> Vec<String> {
    vec![
        format!(
            "position     ({:.1}, {:.1}, {:.1})",
            camera.position.x, camera.position.y, camera.position.z
        ),
        format!("yaw/pitch    {:.0} / {:.0}", camera.yaw, camera.pitch),
    ]
}

pub fn forest_stats_panel(ui: &imgui::Ui, info: &OverlayInfo) {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }

    ui.window("Forest")
        .size([300.0, 0.0], imgui::Condition::FirstUseEver)
        .position([16.0, 16.0], imgui::Condition::FirstUseEver)
        .resizable(false)
        .collapsible(true)
        .build(|| {
            for line in forest_lines(info.stats, info.seed) {
                ui.text(line);
            }

            ui.separator();
            for line in camera_lines(info.camera) {
                ui.text(line);
            }
            ui.text(format!("{:.0} fps", ui.io().framerate));

            if ui.collapsing_header("Controls", imgui::TreeNodeFlags::empty()) {
                ui.text("WASD        move");
                ui.text("Space/Shift up / down");
                ui.text("Right mouse look");
                ui.text("Esc         quit");
            }
            if info.looking {
                ui.text_disabled("looking");
            }
        });
}
