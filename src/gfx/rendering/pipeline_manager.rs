//! Render pipeline management
//!
//! Pipelines are registered by name with a [`PipelineConfig`] and created in
//! one go once every shader is loaded. Each config names the
//! [`VertexSchema`] its meshes are packed with, so the vertex layout a
//! pipeline expects always comes from the same place as the data fed to it.

use std::{collections::HashMap, sync::Arc};
use wgpu::*;

use crate::error::{ForestError, Result};
use crate::gfx::scene::vertex::VertexSchema;

/// Configuration for creating a render pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub label: String,
    pub shader: String,
    pub vertex_entry: String,
    pub fragment_entry: String,
    pub schema: VertexSchema,
    pub bind_group_layouts: Vec<BindGroupLayout>,
    pub cull_mode: Option<Face>,
    pub depth_format: Option<TextureFormat>,
    pub color_format: TextureFormat,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            label: "Default Pipeline".to_string(),
            shader: "forest".to_string(),
            vertex_entry: "vs_main".to_string(),
            fragment_entry: "fs_main".to_string(),
            schema: VertexSchema::PositionNormalColor,
            bind_group_layouts: Vec::new(),
            cull_mode: Some(Face::Back),
            depth_format: None,
            color_format: TextureFormat::Bgra8Unorm,
        }
    }
}

impl PipelineConfig {
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_owned();
        self
    }

    pub fn with_shader(mut self, shader: &str) -> Self {
        self.shader = shader.to_string();
        self
    }

    pub fn with_entry_points(mut self, vertex: &str, fragment: &str) -> Self {
        self.vertex_entry = vertex.to_string();
        self.fragment_entry = fragment.to_string();
        self
    }

    pub fn with_schema(mut self, schema: VertexSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_cull_mode(mut self, face: Option<Face>) -> Self {
        self.cull_mode = face;
        self
    }

    pub fn with_bind_group_layouts(mut self, layouts: Vec<BindGroupLayout>) -> Self {
        self.bind_group_layouts = layouts;
        self
    }

    pub fn with_depth_format(mut self, format: TextureFormat) -> Self {
        self.depth_format = Some(format);
        self
    }

    pub fn with_color_format(mut self, format: TextureFormat) -> Self {
        self.color_format = format;
        self
    }

    fn depth_stencil(&self) -> Option<DepthStencilState> {
        self.depth_format.map(|format| DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: CompareFunction::Less,
            stencil: StencilState::default(),
            bias: DepthBiasState::default(),
        })
    }
}

/// Owns shader modules and the pipelines built from them
pub struct PipelineManager {
    device: Arc<Device>,
    pipelines: HashMap<String, RenderPipeline>,
    pipeline_configs: HashMap<String, PipelineConfig>,
    shader_modules: HashMap<String, ShaderModule>,
}

impl PipelineManager {
    pub fn new(device: Arc<Device>) -> Self {
        Self {
            device,
            pipelines: HashMap::new(),
            pipeline_configs: HashMap::new(),
            shader_modules: HashMap::new(),
        }
    }

    /// Compiles a WGSL module under `name`
    pub fn load_shader(&mut self, name: &str, source: &str) {
        let shader_module = self.device.create_shader_module(ShaderModuleDescriptor {
            label: Some(name),
            source: ShaderSource::Wgsl(source.into()),
        });
        self.shader_modules.insert(name.to_string(), shader_module);
    }

    /// Registers a pipeline configuration without creating it
    pub fn register_pipeline(&mut self, name: &str, config: PipelineConfig) {
        self.pipeline_configs.insert(name.to_string(), config);
    }

    /// Creates every registered pipeline that does not exist yet
    pub fn create_all_pipelines(&mut self) -> Result<()> {
        let pending: Vec<String> = self
            .pipeline_configs
            .keys()
            .filter(|name| !self.pipelines.contains_key(*name))
            .cloned()
            .collect();

        for name in pending {
            let pipeline = self.create_pipeline_from_config(&name, &self.pipeline_configs[&name])?;
            log::debug!("Created pipeline '{}'", name);
            self.pipelines.insert(name, pipeline);
        }
        Ok(())
    }

    pub fn get_pipeline(&self, name: &str) -> Option<&RenderPipeline> {
        self.pipelines.get(name)
    }

    fn create_pipeline_from_config(
        &self,
        name: &str,
        config: &PipelineConfig,
    ) -> Result<RenderPipeline> {
        let shader = self.shader_modules.get(&config.shader).ok_or_else(|| {
            ForestError::Pipeline(format!("shader '{}' not loaded for '{}'", config.shader, name))
        })?;

        let bind_group_layout_refs: Vec<&BindGroupLayout> =
            config.bind_group_layouts.iter().collect();
        let pipeline_layout = self
            .device
            .create_pipeline_layout(&PipelineLayoutDescriptor {
                label: Some(&format!("{} Layout", name)),
                bind_group_layouts: &bind_group_layout_refs,
                push_constant_ranges: &[],
            });

        let color_targets = [Some(ColorTargetState {
            format: config.color_format,
            blend: Some(BlendState::REPLACE),
            write_mask: ColorWrites::ALL,
        })];

        let pipeline = self
            .device
            .create_render_pipeline(&RenderPipelineDescriptor {
                label: Some(&config.label),
                layout: Some(&pipeline_layout),
                vertex: VertexState {
                    module: shader,
                    entry_point: Some(&config.vertex_entry),
                    buffers: &[config.schema.desc()],
                    compilation_options: PipelineCompilationOptions::default(),
                },
                fragment: Some(FragmentState {
                    module: shader,
                    entry_point: Some(&config.fragment_entry),
                    targets: &color_targets,
                    compilation_options: PipelineCompilationOptions::default(),
                }),
                primitive: PrimitiveState {
                    topology: PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: FrontFace::Ccw,
                    cull_mode: config.cull_mode,
                    polygon_mode: PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: config.depth_stencil(),
                multisample: MultisampleState::default(),
                multiview: None,
                cache: None,
            });

        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_schema_and_entry_points() {
        let config = PipelineConfig::default()
            .with_label("Sun")
            .with_entry_points("vs_unlit", "fs_unlit")
            .with_schema(VertexSchema::PositionColor)
            .with_cull_mode(None);

        assert_eq!(config.label, "Sun");
        assert_eq!(config.vertex_entry, "vs_unlit");
        assert_eq!(config.fragment_entry, "fs_unlit");
        assert_eq!(config.schema, VertexSchema::PositionColor);
        assert_eq!(config.cull_mode, None);
    }

    #[test]
    fn depth_state_follows_format() {
        let config = PipelineConfig::default();
        assert!(config.depth_stencil().is_none());

        let state = config
            .with_depth_format(TextureFormat::Depth32Float)
            .depth_stencil()
            .unwrap();
        assert_eq!(state.format, TextureFormat::Depth32Float);
        assert_eq!(state.depth_compare, CompareFunction::Less);
    }
}
