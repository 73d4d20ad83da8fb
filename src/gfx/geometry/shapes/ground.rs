//! Flat ground quad

use crate::gfx::geometry::{Color, MeshData};
use crate::gfx::scene::vertex::Vertex3D;

/// Default half side of the ground quad
pub const GROUND_SIZE: f32 = 30.0;

const GROUND_BROWN: Color = [0.3, 0.25, 0.15];
const UP: [f32; 3] = [0.0, 1.0, 0.0];

/// Generate a two-triangle quad spanning `[-size, size]²` on `y = 0`
///
/// All six vertices share the up normal; winding is counter-clockwise seen
/// from above.
pub fn generate_ground(size: f32) -> MeshData {
    let corner = |x: f32, z: f32| Vertex3D::new([x, 0.0, z], UP, GROUND_BROWN);

    let mut data = MeshData::with_capacity(6);
    data.push_triangle([corner(-size, -size), corner(-size, size), corner(size, -size)]);
    data.push_triangle([corner(size, -size), corner(-size, size), corner(size, size)]);
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::math::face_normal;
    use cgmath::Vector3;

    #[test]
    fn test_ground_layout() {
        let ground = generate_ground(GROUND_SIZE);
        assert_eq!(ground.vertex_count(), 6);
        assert!(ground.extent.is_none());

        for vertex in &ground.vertices {
            assert_eq!(vertex.position[1], 0.0);
            assert_eq!(vertex.position[0].abs(), 30.0);
            assert_eq!(vertex.position[2].abs(), 30.0);
            assert_eq!(vertex.normal, UP);
        }
    }

    #[test]
    fn test_ground_winding_matches_normal() {
        let ground = generate_ground(10.0);
        for tri in ground.vertices.chunks(3) {
            let flat = face_normal(
                Vector3::from(tri[0].position),
                Vector3::from(tri[1].position),
                Vector3::from(tri[2].position),
            );
            assert_eq!(flat, Vector3::new(0.0, 1.0, 0.0));
        }
    }
}
