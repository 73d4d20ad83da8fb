//! Palm: a tall thin trunk topped by drooping, feathered fronds
//!
//! Each frond is a ribbon following `y = top − t²·1.5` outwards from the trunk
//! top, narrowing linearly to a point. Serrated feather triangles line both
//! edges for most of its length, lifted along the ribbon normal so the leaflets
//! form a shallow V.

use cgmath::Vector3;
use std::f32::consts::PI;

use crate::gfx::geometry::math::{build_triangle, normalize_or_zero};
use crate::gfx::geometry::primitives::{generate_cylinder, generate_disk, Facing};
use crate::gfx::geometry::random::UniformSource;
use crate::gfx::geometry::{Color, MeshData};

pub const TRUNK_HEIGHT: (f32, f32) = (2.5, 4.0);
pub const TRUNK_RADIUS: (f32, f32) = (0.05, 0.08);
pub const FROND_LENGTH: (f32, f32) = (1.2, 1.8);
pub const TRUNK_SEGMENTS: u32 = 8;
pub const FROND_COUNT: u32 = 6;
pub const FROND_SEGMENTS: u32 = 12;
/// Total drop of a frond tip below the trunk top
pub const FROND_DROOP: f32 = 1.5;
/// Ribbon width where the frond leaves the trunk
pub const FROND_BASE_WIDTH: f32 = 0.4;
/// Feathers stop once this far along the frond
pub const FEATHER_CUTOFF: f32 = 0.9;
pub const FEATHER_SCALE: f32 = 0.15;

const TRUNK_TAN: Color = [0.62, 0.48, 0.3];
const FROND_GREEN: Color = [0.2, 0.6, 0.2];
const FEATHER_GREEN: Color = [0.3, 0.7, 0.25];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PalmTreeParams {
    pub trunk_height: f32,
    pub trunk_radius: f32,
    pub frond_length: f32,
}

impl PalmTreeParams {
    pub fn sample<R: UniformSource + ?Sized>(rng: &mut R) -> Self {
        Self {
            trunk_height: rng.uniform(TRUNK_HEIGHT.0, TRUNK_HEIGHT.1),
            trunk_radius: rng.uniform(TRUNK_RADIUS.0, TRUNK_RADIUS.1),
            frond_length: rng.uniform(FROND_LENGTH.0, FROND_LENGTH.1),
        }
    }

    /// Point on the frond spine at parameter `t ∈ [0, 1]`
    fn spine(&self, heading: Vector3<f32>, t: f32) -> Vector3<f32> {
        let along = heading * (t * self.frond_length);
        Vector3::new(along.x, self.trunk_height - t * t * FROND_DROOP, along.z)
    }

    fn build_frond(&self, angle: f32, mesh: &mut MeshData) {
        let heading = Vector3::new(angle.cos(), 0.0, angle.sin());
        let side = heading.cross(Vector3::unit_y());

        for s in 0..FROND_SEGMENTS {
            let t0 = s as f32 / FROND_SEGMENTS as f32;
            let t1 = (s + 1) as f32 / FROND_SEGMENTS as f32;

            let c0 = self.spine(heading, t0);
            let c1 = self.spine(heading, t1);
            let half0 = 0.5 * frond_width(t0);
            let half1 = 0.5 * frond_width(t1);

            let left0 = c0 - side * half0;
            let right0 = c0 + side * half0;
            let left1 = c1 - side * half1;
            let right1 = c1 + side * half1;

            // the tip segment collapses to a point, leaving one zero-area triangle
            mesh.push_triangle(build_triangle(left0, right0, right1, FROND_GREEN));
            mesh.push_triangle(build_triangle(left0, right1, left1, FROND_GREEN));

            if t0 < FEATHER_CUTOFF {
                let direction = normalize_or_zero(c1 - c0);
                let lift = side.cross(direction) * (FEATHER_SCALE * (1.0 - t0));

                let right_tip = (right0 + right1) * 0.5 + side * half0 + lift;
                let left_tip = (left0 + left1) * 0.5 - side * half0 + lift;

                mesh.push_triangle(build_triangle(right0, right_tip, right1, FEATHER_GREEN));
                mesh.push_triangle(build_triangle(left0, left1, left_tip, FEATHER_GREEN));
            }
        }
    }

    pub fn build(&self) -> MeshData {
        let mut mesh = generate_cylinder(
            self.trunk_radius,
            self.trunk_height,
            TRUNK_SEGMENTS,
            TRUNK_TAN,
        );
        mesh.append(generate_disk(
            self.trunk_radius,
            self.trunk_height,
            TRUNK_SEGMENTS,
            Facing::Up,
            TRUNK_TAN,
        ));

        for i in 0..FROND_COUNT {
            let angle = 2.0 * PI * i as f32 / FROND_COUNT as f32;
            self.build_frond(angle, &mut mesh);
        }

        mesh.with_extent(self.trunk_height)
    }
}

/// Full ribbon width at parameter `t`
pub fn frond_width(t: f32) -> f32 {
    FROND_BASE_WIDTH * (1.0 - t)
}

/// Feathered segments per frond
pub fn feathered_segments() -> u32 {
    (0..FROND_SEGMENTS)
        .filter(|&s| (s as f32 / FROND_SEGMENTS as f32) < FEATHER_CUTOFF)
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::random::forest_rng;
    use cgmath::InnerSpace;

    fn fixed() -> PalmTreeParams {
        PalmTreeParams {
            trunk_height: 3.0,
            trunk_radius: 0.06,
            frond_length: 1.5,
        }
    }

    #[test]
    fn test_vertex_count() {
        let mesh = fixed().build();
        let trunk = TRUNK_SEGMENTS * 6 + TRUNK_SEGMENTS * 3;
        let per_frond = FROND_SEGMENTS * 6 + feathered_segments() * 6;
        assert_eq!(feathered_segments(), 11);
        assert_eq!(mesh.vertex_count() as u32, trunk + FROND_COUNT * per_frond);
    }

    #[test]
    fn test_extent_is_trunk_height() {
        let mesh = fixed().build();
        assert_eq!(mesh.extent, Some(3.0));
        // fronds droop, nothing rises above the trunk top except feather lift
        let top = mesh.vertices.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert!(top <= 3.0 + FEATHER_SCALE + 1e-5);
    }

    #[test]
    fn test_frond_tips_droop_and_reach_out() {
        let params = fixed();
        let heading = Vector3::new(1.0, 0.0, 0.0);
        let tip = params.spine(heading, 1.0);
        assert!((tip.y - (3.0 - FROND_DROOP)).abs() < 1e-6);
        assert!((tip.x - 1.5).abs() < 1e-6);
        assert_eq!(frond_width(1.0), 0.0);
        assert!((frond_width(0.0) - FROND_BASE_WIDTH).abs() < 1e-6);
    }

    #[test]
    fn test_tip_segment_has_degenerate_triangle() {
        let mut mesh = MeshData::new();
        fixed().build_frond(0.0, &mut mesh);
        // last segment has no feathers; its second triangle collapses
        let last = &mesh.vertices[mesh.vertices.len() - 3..];
        assert_eq!(last[0].normal, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_feather_tip_offset() {
        let params = fixed();
        let mut mesh = MeshData::new();
        params.build_frond(0.0, &mut mesh);

        // at angle 0 the frond heads along +x, so the ribbon spreads along +z
        let side = Vector3::new(0.0, 0.0, 1.0);
        let spine = |t: f32| Vector3::new(t * 1.5, 3.0 - t * t * FROND_DROOP, 0.0);

        let first = 0;
        let last = feathered_segments() - 1;
        for s in [first, last] {
            let t0 = s as f32 / FROND_SEGMENTS as f32;
            let t1 = (s + 1) as f32 / FROND_SEGMENTS as f32;
            let half0 = 0.5 * FROND_BASE_WIDTH * (1.0 - t0);
            let half1 = 0.5 * FROND_BASE_WIDTH * (1.0 - t1);
            let right0 = spine(t0) + side * half0;
            let right1 = spine(t1) + side * half1;

            let direction = (spine(t1) - spine(t0)).normalize();
            let expected = side.cross(direction) * (0.15 * (1.0 - t0));

            // two ribbon and two feather triangles per feathered segment
            let right_tip = Vector3::from(mesh.vertices[s as usize * 12 + 7].position);
            let offset = right_tip - ((right0 + right1) * 0.5 + side * half0);
            assert!(
                (offset - expected).magnitude() < 1e-5,
                "segment {s}: {offset:?} vs {expected:?}"
            );
            // the lift points up and away from the trunk
            assert!(offset.y > 0.0 && offset.x > 0.0);
        }
    }

    #[test]
    fn test_ribbon_faces_up() {
        let mut mesh = MeshData::new();
        fixed().build_frond(1.0, &mut mesh);
        let first_ribbon = &mesh.vertices[0..3];
        assert!(first_ribbon[0].normal[1] > 0.0);
    }

    #[test]
    fn test_sampled_parameters_in_range() {
        let mut rng = forest_rng(Some(31));
        for _ in 0..200 {
            let p = PalmTreeParams::sample(&mut rng);
            assert!((TRUNK_HEIGHT.0..=TRUNK_HEIGHT.1).contains(&p.trunk_height));
            assert!((TRUNK_RADIUS.0..=TRUNK_RADIUS.1).contains(&p.trunk_radius));
            assert!((FROND_LENGTH.0..=FROND_LENGTH.1).contains(&p.frond_length));
        }
    }
}
