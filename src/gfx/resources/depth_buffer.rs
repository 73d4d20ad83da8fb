//! Depth target shared by every pass that draws the forest

/// Depth texture sized to the surface
pub struct DepthBuffer {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
    size: (u32, u32),
}

impl DepthBuffer {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
    /// Depth the attachment is cleared to at the start of a frame
    pub const CLEAR_DEPTH: f32 = 1.0;

    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let size = clamp_size(width, height);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Forest Depth"),
            size: wgpu::Extent3d {
                width: size.0,
                height: size.1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            _texture: texture,
            view,
            size,
        }
    }

    /// Recreates the texture when the surface size changed
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if clamp_size(width, height) != self.size {
            *self = Self::new(device, width, height);
        }
    }

    /// Attachment that clears depth and keeps it for later passes
    pub fn attachment(&self) -> wgpu::RenderPassDepthStencilAttachment<'_> {
        wgpu::RenderPassDepthStencilAttachment {
            view: &self.view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(Self::CLEAR_DEPTH),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }
    }
}

fn clamp_size(width: u32, height: u32) -> (u32, u32) {
    (width.max(1), height.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimised_window_keeps_a_valid_extent() {
        assert_eq!(clamp_size(0, 0), (1, 1));
        assert_eq!(clamp_size(1200, 0), (1200, 1));
        assert_eq!(clamp_size(640, 480), (640, 480));
    }
}
