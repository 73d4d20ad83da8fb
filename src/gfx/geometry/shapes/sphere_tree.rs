//! Broadleaf tree: a trunk crowned by a cluster of foliage blobs

use cgmath::Vector3;

use super::TRUNK_BROWN;
use crate::gfx::geometry::primitives::{generate_cylinder, generate_sphere};
use crate::gfx::geometry::random::UniformSource;
use crate::gfx::geometry::{Color, MeshData};

pub const TRUNK_HEIGHT: (f32, f32) = (0.6, 1.5);
pub const TRUNK_RADIUS: (f32, f32) = (0.05, 0.15);
pub const SEGMENTS: (u32, u32) = (6, 12);
pub const BLOB_COUNT: (u32, u32) = (4, 8);
pub const BLOB_RADIUS: (f32, f32) = (0.2, 0.4);
/// Horizontal blob jitter around the trunk axis
pub const BLOB_JITTER_XZ: f32 = 0.2;
/// Vertical blob jitter above the trunk top
pub const BLOB_JITTER_Y: (f32, f32) = (0.0, 0.4);
pub const BLOB_RINGS: u32 = 6;
pub const BLOB_SEGMENTS: u32 = 8;
/// Fixed crown allowance added to the trunk height for the reported extent
pub const CROWN_EXTENT: f32 = 0.8;

const FOLIAGE_GREEN: Color = [0.13, 0.55, 0.13];
const SHADE_JITTER: (f32, f32) = (0.8, 1.2);

/// One foliage cluster, positioned relative to the trunk top
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoliageBlob {
    pub offset: [f32; 3],
    pub radius: f32,
    pub color: Color,
}

impl FoliageBlob {
    pub fn sample<R: UniformSource + ?Sized>(rng: &mut R) -> Self {
        let radius = rng.uniform(BLOB_RADIUS.0, BLOB_RADIUS.1);
        let offset = [
            rng.uniform(-BLOB_JITTER_XZ, BLOB_JITTER_XZ),
            rng.uniform(BLOB_JITTER_Y.0, BLOB_JITTER_Y.1),
            rng.uniform(-BLOB_JITTER_XZ, BLOB_JITTER_XZ),
        ];
        let shade = rng.uniform(SHADE_JITTER.0, SHADE_JITTER.1);

        Self {
            offset,
            radius,
            color: FOLIAGE_GREEN.map(|c| (c * shade).min(1.0)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SphereTreeParams {
    pub trunk_height: f32,
    pub trunk_radius: f32,
    pub segments: u32,
    pub blobs: Vec<FoliageBlob>,
}

impl SphereTreeParams {
    pub fn sample<R: UniformSource + ?Sized>(rng: &mut R) -> Self {
        let trunk_height = rng.uniform(TRUNK_HEIGHT.0, TRUNK_HEIGHT.1);
        let trunk_radius = rng.uniform(TRUNK_RADIUS.0, TRUNK_RADIUS.1);
        let segments = rng.uniform_int(SEGMENTS.0, SEGMENTS.1);
        let blob_count = rng.uniform_int(BLOB_COUNT.0, BLOB_COUNT.1);
        let blobs = (0..blob_count).map(|_| FoliageBlob::sample(rng)).collect();

        Self {
            trunk_height,
            trunk_radius,
            segments,
            blobs,
        }
    }

    /// Reported height; deliberately independent of the sampled blobs
    pub fn extent(&self) -> f32 {
        self.trunk_height + CROWN_EXTENT
    }

    pub fn build(&self) -> MeshData {
        let mut mesh = generate_cylinder(
            self.trunk_radius,
            self.trunk_height,
            self.segments,
            TRUNK_BROWN,
        );

        for blob in &self.blobs {
            let center = Vector3::new(
                blob.offset[0],
                self.trunk_height + blob.offset[1],
                blob.offset[2],
            );
            mesh.append(generate_sphere(
                center,
                blob.radius,
                BLOB_RINGS,
                BLOB_SEGMENTS,
                blob.color,
            ));
        }

        mesh.with_extent(self.extent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::random::forest_rng;

    #[test]
    fn test_vertex_count_follows_blob_count() {
        let mut rng = forest_rng(Some(5));
        for _ in 0..50 {
            let params = SphereTreeParams::sample(&mut rng);
            let blob_vertices = (BLOB_RINGS * BLOB_SEGMENTS * 6) as usize;
            let expected = params.segments as usize * 6 + params.blobs.len() * blob_vertices;
            assert_eq!(params.build().vertex_count(), expected);
            assert!((BLOB_COUNT.0..=BLOB_COUNT.1).contains(&(params.blobs.len() as u32)));
        }
    }

    #[test]
    fn test_extent_ignores_blob_geometry() {
        let base = SphereTreeParams {
            trunk_height: 1.0,
            trunk_radius: 0.1,
            segments: 8,
            blobs: vec![],
        };
        let mut tall = base.clone();
        tall.blobs.push(FoliageBlob {
            offset: [0.0, 0.4, 0.0],
            radius: 0.4,
            color: FOLIAGE_GREEN,
        });

        let short_extent = base.build().extent.unwrap();
        let tall_extent = tall.build().extent.unwrap();
        assert!((short_extent - 1.8).abs() < 1e-6);
        assert_eq!(short_extent, tall_extent);
    }

    #[test]
    fn test_blob_samples_in_range() {
        let mut rng = forest_rng(Some(8));
        for _ in 0..200 {
            let blob = FoliageBlob::sample(&mut rng);
            assert!((BLOB_RADIUS.0..=BLOB_RADIUS.1).contains(&blob.radius));
            assert!(blob.offset[0].abs() <= BLOB_JITTER_XZ);
            assert!((BLOB_JITTER_Y.0..=BLOB_JITTER_Y.1).contains(&blob.offset[1]));
            assert!(blob.offset[2].abs() <= BLOB_JITTER_XZ);
            assert!(blob.color[1] > blob.color[0]);
        }
    }

    #[test]
    fn test_blobs_sit_on_trunk_top() {
        let params = SphereTreeParams {
            trunk_height: 1.2,
            trunk_radius: 0.1,
            segments: 6,
            blobs: vec![FoliageBlob {
                offset: [0.1, 0.2, -0.1],
                radius: 0.3,
                color: FOLIAGE_GREEN,
            }],
        };
        let mesh = params.build();
        let foliage = &mesh.vertices[params.segments as usize * 6..];
        let top = foliage.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert!((top - (1.2 + 0.2 + 0.3)).abs() < 1e-5);
    }
}
