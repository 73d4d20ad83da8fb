//! Sun sphere used as a visible proxy for the scene light

use cgmath::Vector3;

use crate::gfx::geometry::primitives::generate_sphere;
use crate::gfx::geometry::{Color, MeshData};

pub const SUN_RADIUS: f32 = 2.0;
/// Latitude and longitude band count
pub const SUN_BANDS: u32 = 20;
pub const SUN_YELLOW: Color = [1.0, 0.9, 0.3];

/// Generate the sun sphere centered on the origin
///
/// Normals are the outward radial direction, i.e. position / radius.
pub fn generate_sun() -> MeshData {
    generate_sphere(
        Vector3::new(0.0, 0.0, 0.0),
        SUN_RADIUS,
        SUN_BANDS,
        SUN_BANDS,
        SUN_YELLOW,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sun_tessellation() {
        let sun = generate_sun();
        assert_eq!(sun.vertex_count(), (SUN_BANDS * SUN_BANDS * 6) as usize);
        assert!(sun.extent.is_none());

        for vertex in &sun.vertices {
            assert_eq!(vertex.color, SUN_YELLOW);
            for axis in 0..3 {
                let expected = vertex.position[axis] / SUN_RADIUS;
                assert!((vertex.normal[axis] - expected).abs() < 1e-5);
            }
        }
    }
}
