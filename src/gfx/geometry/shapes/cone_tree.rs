//! Conifer built from a trunk and two stacked, overlapping cones

use super::TRUNK_BROWN;
use crate::gfx::geometry::primitives::{generate_cone, generate_cylinder};
use crate::gfx::geometry::random::UniformSource;
use crate::gfx::geometry::{Color, MeshData};

pub const TRUNK_HEIGHT: (f32, f32) = (0.3, 0.5);
pub const TRUNK_RADIUS: (f32, f32) = (0.05, 0.12);
pub const CROWN_HEIGHT: (f32, f32) = (1.0, 1.6);
pub const CROWN_RADIUS: (f32, f32) = (0.5, 0.8);
pub const SEGMENTS: (u32, u32) = (8, 12);

/// Lower tier radius relative to the crown radius
pub const LOWER_RADIUS_SCALE: f32 = 1.2;
/// Share of the crown height taken by the lower tier
pub const LOWER_HEIGHT_SHARE: f32 = 0.5;
/// Share of the crown height taken by the upper tier
pub const UPPER_HEIGHT_SHARE: f32 = 0.6;
/// Part of the lower tier the upper tier sinks into
pub const TIER_OVERLAP: f32 = 0.4;

const LOWER_GREEN: Color = [0.05, 0.42, 0.1];
const UPPER_GREEN: Color = [0.1, 0.6, 0.1];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeTreeParams {
    pub trunk_height: f32,
    pub trunk_radius: f32,
    pub crown_height: f32,
    pub crown_radius: f32,
    pub segments: u32,
}

impl ConeTreeParams {
    pub fn sample<R: UniformSource + ?Sized>(rng: &mut R) -> Self {
        Self {
            trunk_height: rng.uniform(TRUNK_HEIGHT.0, TRUNK_HEIGHT.1),
            trunk_radius: rng.uniform(TRUNK_RADIUS.0, TRUNK_RADIUS.1),
            crown_height: rng.uniform(CROWN_HEIGHT.0, CROWN_HEIGHT.1),
            crown_radius: rng.uniform(CROWN_RADIUS.0, CROWN_RADIUS.1),
            segments: rng.uniform_int(SEGMENTS.0, SEGMENTS.1),
        }
    }

    pub fn lower_cone_height(&self) -> f32 {
        self.crown_height * LOWER_HEIGHT_SHARE
    }

    pub fn upper_cone_height(&self) -> f32 {
        self.crown_height * UPPER_HEIGHT_SHARE
    }

    pub fn overlap(&self) -> f32 {
        self.lower_cone_height() * TIER_OVERLAP
    }

    /// Y of the upper cone's base ring
    pub fn upper_cone_base(&self) -> f32 {
        self.trunk_height + self.lower_cone_height() - self.overlap()
    }

    /// Y of the tree's tip
    pub fn apex_height(&self) -> f32 {
        self.upper_cone_base() + self.upper_cone_height()
    }

    pub fn build(&self) -> MeshData {
        let mut mesh = generate_cylinder(
            self.trunk_radius,
            self.trunk_height,
            self.segments,
            TRUNK_BROWN,
        );

        mesh.append(generate_cone(
            self.crown_radius * LOWER_RADIUS_SCALE,
            self.lower_cone_height(),
            self.segments,
            self.trunk_height,
            LOWER_GREEN,
        ));
        mesh.append(generate_cone(
            self.crown_radius,
            self.upper_cone_height(),
            self.segments,
            self.upper_cone_base(),
            UPPER_GREEN,
        ));

        mesh.with_extent(self.apex_height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::random::forest_rng;

    fn fixed() -> ConeTreeParams {
        ConeTreeParams {
            trunk_height: 0.4,
            trunk_radius: 0.1,
            crown_height: 1.5,
            crown_radius: 0.6,
            segments: 10,
        }
    }

    #[test]
    fn test_extent_is_apex_with_overlap_removed() {
        let params = fixed();
        let lower = 1.5 * 0.5;
        let upper = 1.5 * 0.6;
        let expected = 0.4 + lower + upper - 0.4 * lower;

        let mesh = params.build();
        let extent = mesh.extent.unwrap();
        assert!((extent - expected).abs() < 1e-6);
    }

    #[test]
    fn test_highest_vertex_is_the_extent() {
        let mesh = fixed().build();
        let top = mesh
            .vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        assert!((top - mesh.extent.unwrap()).abs() < 1e-6);
    }

    #[test]
    fn test_structure_counts() {
        let mesh = fixed().build();
        // trunk 2 triangles per segment, one per segment for each cone
        assert_eq!(mesh.triangle_count(), 10 * 2 + 10 + 10);
    }

    #[test]
    fn test_tiers_overlap() {
        let params = fixed();
        let lower_top = params.trunk_height + params.lower_cone_height();
        assert!(params.upper_cone_base() < lower_top);
        assert!(params.upper_cone_base() > params.trunk_height);
    }

    #[test]
    fn test_sampled_parameters_in_range() {
        let mut rng = forest_rng(Some(11));
        for _ in 0..200 {
            let p = ConeTreeParams::sample(&mut rng);
            assert!((TRUNK_HEIGHT.0..=TRUNK_HEIGHT.1).contains(&p.trunk_height));
            assert!((TRUNK_RADIUS.0..=TRUNK_RADIUS.1).contains(&p.trunk_radius));
            assert!((CROWN_HEIGHT.0..=CROWN_HEIGHT.1).contains(&p.crown_height));
            assert!((CROWN_RADIUS.0..=CROWN_RADIUS.1).contains(&p.crown_radius));
            assert!((SEGMENTS.0..=SEGMENTS.1).contains(&p.segments));
        }
    }
}
