// src/wgpu_utils/uniform_buffer.rs
//! Uniform buffers typed by their `Pod` content

use std::marker::PhantomData;
use wgpu::util::DeviceExt;

/// A uniform buffer holding exactly one `Content`
///
/// Remembers the bytes last written so per-frame updates with unchanged
/// content cost no queue write.
pub struct UniformBuffer<Content> {
    buffer: wgpu::Buffer,
    written: Vec<u8>,
    content: PhantomData<Content>,
}

impl<Content: bytemuck::Pod> UniformBuffer<Content> {
    /// Creates the buffer already holding `initial`
    pub fn new(device: &wgpu::Device, label: &str, initial: &Content) -> Self {
        let bytes = bytemuck::bytes_of(initial);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytes,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            buffer,
            written: bytes.to_vec(),
            content: PhantomData,
        }
    }

    /// Queues a write of `content`; returns false when nothing changed
    pub fn write(&mut self, queue: &wgpu::Queue, content: &Content) -> bool {
        let bytes = bytemuck::bytes_of(content);
        if !replace_if_changed(&mut self.written, bytes) {
            return false;
        }
        queue.write_buffer(&self.buffer, 0, bytes);
        true
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource<'_> {
        self.buffer.as_entire_binding()
    }
}

fn replace_if_changed(written: &mut Vec<u8>, bytes: &[u8]) -> bool {
    if written.as_slice() == bytes {
        return false;
    }
    written.clear();
    written.extend_from_slice(bytes);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_content_is_not_rewritten() {
        let mut written = bytemuck::bytes_of(&[1.0f32, 2.0]).to_vec();

        assert!(!replace_if_changed(&mut written, bytemuck::bytes_of(&[1.0f32, 2.0])));
        assert!(replace_if_changed(&mut written, bytemuck::bytes_of(&[1.0f32, 3.0])));
        assert_eq!(written, bytemuck::bytes_of(&[1.0f32, 3.0]));
    }
}
