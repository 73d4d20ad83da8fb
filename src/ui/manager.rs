// src/ui/manager.rs
//! ImGui integration
//!
//! Bridges imgui with winit for input and wgpu for drawing. The overlay is
//! rendered in its own pass on top of the finished scene.

use imgui::{Context, FontConfig, FontSource, MouseCursor};
use imgui_wgpu::{Renderer, RendererConfig};
use imgui_winit_support::{HiDpiMode, WinitPlatform};
use log::warn;
use std::time::Instant;
use wgpu::{CommandEncoder, Device, Queue, TextureFormat, TextureView};
use winit::{
    event::{ElementState, Event, WindowEvent},
    window::{Window, WindowId},
};

const FONT_SIZE: f32 = 18.0;

/// How a window event relates to the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRoute {
    /// Pointer or keyboard input imgui may claim for itself
    Capturable,
    /// Forwarded to imgui but never claimed: window state and releases
    Observed,
    /// Not forwarded to imgui
    Ignored,
}

impl InputRoute {
    pub fn of(event: &WindowEvent) -> Self {
        match event {
            WindowEvent::KeyboardInput { event, .. } => InputRoute::for_state(event.state),
            WindowEvent::MouseInput { state, .. } => InputRoute::for_state(*state),
            WindowEvent::CursorMoved { .. } | WindowEvent::MouseWheel { .. } => {
                InputRoute::Capturable
            }
            WindowEvent::Resized(_)
            | WindowEvent::ScaleFactorChanged { .. }
            | WindowEvent::Focused(_)
            | WindowEvent::CursorLeft { .. } => InputRoute::Observed,
            _ => InputRoute::Ignored,
        }
    }

    /// Presses may be claimed; a release always reaches the camera so a key
    /// let go over the overlay cannot stay held
    pub fn for_state(state: ElementState) -> Self {
        match state {
            ElementState::Pressed => InputRoute::Capturable,
            ElementState::Released => InputRoute::Observed,
        }
    }

    /// Whether the overlay keeps this input from the camera
    pub fn claimed(self, overlay_wants_input: bool) -> bool {
        self == InputRoute::Capturable && overlay_wants_input
    }
}

pub struct UiManager {
    context: Context,
    platform: WinitPlatform,
    renderer: Renderer,
    last_frame: Instant,
    last_cursor: Option<MouseCursor>,
}

impl UiManager {
    /// Sets up imgui for `window`, drawing into targets of `surface_format`
    pub fn new(device: &Device, queue: &Queue, surface_format: TextureFormat, window: &Window) -> Self {
        let mut context = Context::create();
        context.set_ini_filename(None);

        let mut platform = WinitPlatform::new(&mut context);
        platform.attach_window(context.io_mut(), window, HiDpiMode::Locked(1.0));

        context.fonts().add_font(&[FontSource::DefaultFontData {
            config: Some(FontConfig {
                oversample_h: 1,
                pixel_snap_h: true,
                size_pixels: FONT_SIZE,
                ..Default::default()
            }),
        }]);

        let renderer = Renderer::new(
            &mut context,
            device,
            queue,
            RendererConfig {
                texture_format: surface_format,
                ..Default::default()
            },
        );

        Self {
            context,
            platform,
            renderer,
            last_frame: Instant::now(),
            last_cursor: None,
        }
    }

    /// Feeds a window event to imgui; true when the overlay claimed it
    pub fn handle_window_event(&mut self, window: &Window, window_id: WindowId, event: &WindowEvent) -> bool {
        let route = InputRoute::of(event);
        if route == InputRoute::Ignored {
            return false;
        }

        let wrapped: Event<()> = Event::WindowEvent {
            window_id,
            event: event.clone(),
        };
        self.platform
            .handle_event(self.context.io_mut(), window, &wrapped);

        route.claimed(self.wants_input())
    }

    /// Whether the pointer hovers or the keyboard focuses an overlay widget
    pub fn wants_input(&self) -> bool {
        let io = self.context.io();
        io.want_capture_mouse || io.want_capture_keyboard
    }

    /// Builds the overlay through `build` and draws it over `target`
    pub fn draw<F>(
        &mut self,
        device: &Device,
        queue: &Queue,
        encoder: &mut CommandEncoder,
        window: &Window,
        target: &TextureView,
        build: F,
    ) where
        F: FnOnce(&imgui::Ui),
    {
        let now = Instant::now();
        self.context.io_mut().update_delta_time(now - self.last_frame);
        self.last_frame = now;

        if let Err(err) = self.platform.prepare_frame(self.context.io_mut(), window) {
            warn!("Skipping overlay frame: {err}");
            return;
        }

        let ui = self.context.frame();
        build(&*ui);
        if self.last_cursor != ui.mouse_cursor() {
            self.last_cursor = ui.mouse_cursor();
            self.platform.prepare_render(ui, window);
        }

        let draw_data = self.context.render();
        if draw_data.display_size[0] <= 0.0 || draw_data.display_size[1] <= 0.0 {
            return;
        }

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Overlay Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if let Err(err) = self.renderer.render(draw_data, queue, device, &mut pass) {
            warn!("Overlay render failed: {err:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{CameraController, FlyCamera};
    use cgmath::Vector3;
    use winit::dpi::PhysicalSize;
    use winit::keyboard::KeyCode;

    #[test]
    fn window_state_is_observed_but_never_claimed() {
        assert_eq!(
            InputRoute::of(&WindowEvent::Resized(PhysicalSize::new(800, 600))),
            InputRoute::Observed
        );
        assert_eq!(InputRoute::of(&WindowEvent::Focused(false)), InputRoute::Observed);
    }

    #[test]
    fn only_presses_can_be_claimed() {
        assert!(InputRoute::for_state(ElementState::Pressed).claimed(true));
        assert!(!InputRoute::for_state(ElementState::Pressed).claimed(false));
        assert!(!InputRoute::for_state(ElementState::Released).claimed(true));
    }

    #[test]
    fn key_released_over_overlay_stops_the_camera() {
        let mut controller = CameraController::new(1.0, 0.1);
        let mut camera = FlyCamera::new(Vector3::new(0.0, 1.0, 0.0), -90.0, 0.0, 1.0);

        // W goes down over the scene, comes up while the panel is hovered
        for (state, overlay_wants_input) in [
            (ElementState::Pressed, false),
            (ElementState::Released, true),
        ] {
            if !InputRoute::for_state(state).claimed(overlay_wants_input) {
                controller.process_key(KeyCode::KeyW, state == ElementState::Pressed);
            }
        }

        let before = camera.position;
        controller.update_camera(&mut camera, 1.0);
        assert_eq!(camera.position, before);
    }

    #[test]
    fn look_button_released_over_overlay_ends_looking() {
        let mut controller = CameraController::new(1.0, 0.1);

        for (state, overlay_wants_input) in [
            (ElementState::Pressed, false),
            (ElementState::Released, true),
        ] {
            if !InputRoute::for_state(state).claimed(overlay_wants_input) {
                controller.process_mouse_button(winit::event::MouseButton::Right, state);
            }
        }

        assert!(!controller.is_looking());
    }

    #[test]
    fn press_over_overlay_never_reaches_the_camera() {
        let mut controller = CameraController::new(1.0, 0.1);
        let state = ElementState::Pressed;
        if !InputRoute::for_state(state).claimed(true) {
            controller.process_mouse_button(winit::event::MouseButton::Right, state);
        }
        assert!(!controller.is_looking());
    }

    #[test]
    fn redraws_bypass_the_overlay() {
        assert_eq!(InputRoute::of(&WindowEvent::RedrawRequested), InputRoute::Ignored);
        assert_eq!(InputRoute::of(&WindowEvent::CloseRequested), InputRoute::Ignored);
    }
}
