//! wgpu rendering engine for the forest viewer
//!
//! Owns the surface, device, depth buffer, global uniforms and the two
//! pipelines the scene needs: a lit pipeline for meshes packed with normals
//! and an unlit one for the sun.

use std::sync::Arc;

use log::{info, warn};
use wgpu::{Device, TextureFormat};

use crate::error::{ForestError, Result};
use crate::gfx::{
    camera::camera_utils::CameraUniform,
    resources::{
        depth_buffer::DepthBuffer,
        global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO, LightConfig},
    },
    scene::{
        forest::ForestScene,
        object::{transform_layout, DrawObject, SceneObject},
        vertex::VertexSchema,
    },
};
use crate::wgpu_utils::binding_builder::BindGroupLayoutWithDesc;

use super::pipeline_manager::{PipelineConfig, PipelineManager};

pub const LIT_PIPELINE: &str = "Forest";
pub const UNLIT_PIPELINE: &str = "Sun";

/// Placed objects grouped by the pipeline that draws them
pub struct DrawList {
    pub lit: Vec<SceneObject>,
    pub unlit: Vec<SceneObject>,
}

pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth: DepthBuffer,
    format: TextureFormat,
    pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    transform_layout: BindGroupLayoutWithDesc,
    light: LightConfig,
    clear_color: wgpu::Color,
}

impl RenderEngine {
    /// Brings up wgpu for `window` and builds the forest pipelines
    ///
    /// # Errors
    /// Fails when no surface, adapter or device can be obtained.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Forest Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or_else(|| ForestError::Pipeline("surface reports no formats".into()))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth = DepthBuffer::new(&device, config.width, config.height);

        let global_ubo = GlobalUBO::new(&device, "Globals", &bytemuck::Zeroable::zeroed());
        let global_bindings = GlobalBindings::new(&device, &global_ubo);
        let transform_layout = transform_layout(&device);

        let device_handle: Arc<Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        pipeline_manager.load_shader("forest", include_str!("forest.wgsl"));

        let layouts = vec![
            global_bindings.bind_group_layout().clone(),
            transform_layout.layout.clone(),
        ];

        // fronds are single ribbons seen from both sides
        pipeline_manager.register_pipeline(
            LIT_PIPELINE,
            PipelineConfig::default()
                .with_label(LIT_PIPELINE)
                .with_shader("forest")
                .with_entry_points("vs_main", "fs_main")
                .with_schema(VertexSchema::PositionNormalColor)
                .with_cull_mode(None)
                .with_bind_group_layouts(layouts.clone())
                .with_depth_format(DepthBuffer::FORMAT)
                .with_color_format(format),
        );

        pipeline_manager.register_pipeline(
            UNLIT_PIPELINE,
            PipelineConfig::default()
                .with_label(UNLIT_PIPELINE)
                .with_shader("forest")
                .with_entry_points("vs_unlit", "fs_unlit")
                .with_schema(VertexSchema::PositionColor)
                .with_cull_mode(None)
                .with_bind_group_layouts(layouts)
                .with_depth_format(DepthBuffer::FORMAT)
                .with_color_format(format),
        );

        pipeline_manager.create_all_pipelines()?;

        Ok(RenderEngine {
            surface,
            device: device_handle,
            queue: queue_handle,
            config,
            depth,
            format,
            pipeline_manager,
            global_ubo,
            global_bindings,
            transform_layout,
            light: LightConfig::default(),
            clear_color: wgpu::Color::BLACK,
        })
    }

    /// Wraps every uploaded mesh of `scene` in a placed object
    ///
    /// Trees sit at their planted position, the ground at the origin and the
    /// sun at its configured position, which also becomes the light position.
    pub fn place_scene(&mut self, scene: ForestScene) -> DrawList {
        let ForestScene {
            trees,
            ground,
            sun,
            sun_position,
        } = scene;

        let mut lit = Vec::with_capacity(trees.len() + 1);
        lit.push(SceneObject::new(
            &self.device,
            &self.transform_layout,
            "ground",
            ground,
            [0.0, 0.0, 0.0],
        ));
        for (index, tree) in trees.into_iter().enumerate() {
            let translation = tree.translation();
            let name = format!("{} #{index}", tree.kind.name());
            lit.push(SceneObject::new(
                &self.device,
                &self.transform_layout,
                name,
                tree.mesh,
                translation,
            ));
        }

        let unlit = vec![SceneObject::new(
            &self.device,
            &self.transform_layout,
            "sun",
            sun,
            sun_position,
        )];

        self.light = LightConfig::at(sun_position);
        DrawList { lit, unlit }
    }

    pub fn set_clear_color(&mut self, rgb: [f64; 3]) {
        self.clear_color = wgpu::Color {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
            a: 1.0,
        };
    }

    /// Draws one frame, then hands the encoder to `ui_callback` for overlays
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    pub fn render_frame<F>(&mut self, draw_list: &DrawList, ui_callback: Option<F>) -> Result<()>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Surface texture timed out, skipping frame");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Forest Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(self.depth.attachment()),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

            for (pipeline_name, objects) in [
                (LIT_PIPELINE, &draw_list.lit),
                (UNLIT_PIPELINE, &draw_list.unlit),
            ] {
                let Some(pipeline) = self.pipeline_manager.get_pipeline(pipeline_name) else {
                    warn!("Pipeline '{}' missing, skipping {} objects", pipeline_name, objects.len());
                    continue;
                };
                render_pass.set_pipeline(pipeline);
                for object in objects {
                    render_pass.draw_object(object);
                }
            }
        }

        if let Some(ui_callback) = ui_callback {
            ui_callback(
                &self.device,
                &self.queue,
                &mut encoder,
                &surface_texture_view,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// Uploads this frame's camera together with the current light
    pub fn update(&mut self, camera_uniform: CameraUniform) {
        update_global_ubo(&mut self.global_ubo, &self.queue, camera_uniform, self.light);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth.resize(&self.device, width, height);
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}
