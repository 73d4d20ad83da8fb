// src/wgpu_utils/binding_types.rs
//! Binding types the forest pipelines declare

/// Uniform buffer binding holding one `T`
///
/// The minimum binding size lets wgpu reject a mismatched buffer when the
/// bind group is created instead of at draw time.
pub fn uniform_of<T: bytemuck::Pod>() -> wgpu::BindingType {
    wgpu::BindingType::Buffer {
        ty: wgpu::BufferBindingType::Uniform,
        has_dynamic_offset: false,
        min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<T>() as u64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_size_follows_content() {
        let wgpu::BindingType::Buffer {
            ty,
            min_binding_size,
            ..
        } = uniform_of::<[[f32; 4]; 4]>()
        else {
            panic!("expected a buffer binding");
        };
        assert_eq!(ty, wgpu::BufferBindingType::Uniform);
        assert_eq!(min_binding_size.map(|size| size.get()), Some(64));
    }
}
