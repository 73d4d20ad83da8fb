//! Window and event loop for the forest viewer
//!
//! [`ForestApp::new`] makes every random decision up front; GPU setup, mesh
//! upload and UI creation happen once the event loop resumes and a window
//! exists. From then on each redraw only moves the camera and issues draws.

use cgmath::Vector3;
use log::{error, info};
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::config::ForestConfig;
use crate::error::{ForestError, Result};
use crate::gfx::{
    camera::{CameraController, CameraManager, FlyCamera},
    geometry::random::{forest_rng, resolve_seed},
    rendering::{DrawList, RenderEngine},
    scene::forest::{ForestLayout, ForestScene, ForestStats},
};
use crate::ui::{forest_stats_panel, OverlayInfo, UiManager};

/// Fly camera speed in units per second
pub const CAMERA_SPEED: f32 = 2.5;
/// Mouse look sensitivity in degrees per pixel
pub const CAMERA_SENSITIVITY: f32 = 0.1;

pub struct ForestApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

struct AppState {
    config: ForestConfig,
    layout: Option<ForestLayout>,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    draw_list: Option<DrawList>,
    stats: ForestStats,
    seed: u64,
    camera_manager: CameraManager,
    last_frame: Instant,
    error: Option<ForestError>,
}

impl ForestApp {
    /// Validates `config` and plans the forest
    pub fn new(config: ForestConfig) -> Result<Self> {
        config.validate()?;
        let event_loop = EventLoop::new()?;

        let seed = resolve_seed(config.seed);
        let mut rng = forest_rng(Some(seed));
        let layout = ForestLayout::generate(&config, &mut rng);
        info!(
            "Planned {} trees within ±{} (seed {seed}, replant with FOREST_SEED={seed})",
            layout.trees.len(),
            config.spread,
        );

        let (width, height) = config.window_size;
        let camera = FlyCamera::new(
            Vector3::from(config.camera_position),
            -90.0,
            0.0,
            width as f32 / height as f32,
        );
        let controller = CameraController::new(CAMERA_SPEED, CAMERA_SENSITIVITY);

        Ok(Self {
            event_loop,
            app_state: AppState {
                config,
                layout: Some(layout),
                window: None,
                render_engine: None,
                ui_manager: None,
                draw_list: None,
                stats: ForestStats::default(),
                seed,
                camera_manager: CameraManager::new(camera, controller),
                last_frame: Instant::now(),
                error: None,
            },
        })
    }

    /// Runs until the window closes; returns the error that stopped it, if any
    pub fn run(mut self) -> Result<()> {
        self.event_loop.set_control_flow(ControlFlow::Poll);
        self.event_loop.run_app(&mut self.app_state)?;

        match self.app_state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let (width, height) = self.config.window_size;
        let window = Arc::new(
            event_loop.create_window(
                WindowAttributes::default()
                    .with_title(self.config.window_title.clone())
                    .with_inner_size(LogicalSize::new(width, height)),
            )?,
        );
        self.window = Some(window.clone());

        let PhysicalSize { width, height } = window.inner_size();
        let mut renderer = pollster::block_on(RenderEngine::new(window.clone(), width, height))?;
        renderer.set_clear_color(self.config.sky_color);
        self.camera_manager.camera.resize_projection(width, height);

        let layout = self
            .layout
            .take()
            .ok_or_else(|| ForestError::Config("forest already uploaded".into()))?;
        let scene = ForestScene::upload(renderer.device(), &layout)?;
        self.stats = scene.stats();
        self.draw_list = Some(renderer.place_scene(scene));

        self.ui_manager = Some(UiManager::new(
            renderer.device(),
            renderer.queue(),
            renderer.surface_format(),
            &window,
        ));
        self.render_engine = Some(renderer);
        self.last_frame = Instant::now();
        Ok(())
    }

    fn redraw(&mut self) -> Result<()> {
        let (Some(render_engine), Some(window), Some(draw_list)) = (
            self.render_engine.as_mut(),
            self.window.as_ref(),
            self.draw_list.as_ref(),
        ) else {
            return Ok(());
        };

        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.camera_manager.update(dt);
        render_engine.update(self.camera_manager.uniform());

        let Some(ui_manager) = self.ui_manager.as_mut() else {
            return render_engine.render_frame(
                draw_list,
                None::<
                    fn(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
                >,
            );
        };

        let info = OverlayInfo {
            stats: &self.stats,
            seed: self.seed,
            camera: &self.camera_manager.camera,
            looking: self.camera_manager.controller.is_looking(),
        };
        render_engine.render_frame(
            draw_list,
            Some(
                |device: &wgpu::Device,
                 queue: &wgpu::Queue,
                 encoder: &mut wgpu::CommandEncoder,
                 view: &wgpu::TextureView| {
                    ui_manager.draw(device, queue, encoder, window, view, |ui| {
                        forest_stats_panel(ui, &info)
                    });
                },
            ),
        )
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: ForestError) {
        error!("{err}");
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.init_graphics(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.clone() else {
            return;
        };

        if let Some(ui_manager) = self.ui_manager.as_mut() {
            if ui_manager.handle_window_event(&window, window_id, &event) {
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            }
            | WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.camera_manager.process_keyboard_event(&event);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.camera_manager.process_mouse_button(button, state);
            }
            WindowEvent::Focused(false) => {
                self.camera_manager.controller.release_all();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.camera_manager.camera.resize_projection(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw() {
                    self.fail(event_loop, err);
                }
            }
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let Some(ui_manager) = self.ui_manager.as_ref() {
            if ui_manager.wants_input() {
                return;
            }
        }

        self.camera_manager.process_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
