//! # Composite Shapes
//!
//! Assembles primitives into the named shapes of the forest scene. Tree shapes
//! are split into a parameter record, sampled once from fixed intervals, and a
//! deterministic `build` that turns those parameters into a mesh. Tests inject
//! parameters directly; the scene samples them through a
//! [`UniformSource`](super::random::UniformSource).
//!
//! | Shape | Extent |
//! |---|---|
//! | [`ConeTreeParams`] | apex height of the upper cone |
//! | [`SphereTreeParams`] | trunk height + 0.8 |
//! | [`PalmTreeParams`] | trunk height |
//! | [`generate_ground`] | none |
//! | [`generate_sun`] | none |

pub mod cone_tree;
pub mod ground;
pub mod palm_tree;
pub mod sphere_tree;
pub mod sun;

pub use cone_tree::ConeTreeParams;
pub use ground::generate_ground;
pub use palm_tree::PalmTreeParams;
pub use sphere_tree::{FoliageBlob, SphereTreeParams};
pub use sun::generate_sun;

use super::random::UniformSource;
use super::{Color, MeshData};

/// Bark color shared by the cone and sphere trees
pub const TRUNK_BROWN: Color = [0.55, 0.27, 0.07];

/// The tree variants the scene can plant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    ConeTree,
    SphereTree,
    PalmTree,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::ConeTree, ShapeKind::SphereTree, ShapeKind::PalmTree];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::ConeTree => "cone tree",
            ShapeKind::SphereTree => "sphere tree",
            ShapeKind::PalmTree => "palm tree",
        }
    }
}

/// Sampled parameters of one tree of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum TreeParams {
    Cone(ConeTreeParams),
    Sphere(SphereTreeParams),
    Palm(PalmTreeParams),
}

impl TreeParams {
    /// Draws the parameters of a tree of the given kind
    pub fn sample<R: UniformSource + ?Sized>(kind: ShapeKind, rng: &mut R) -> Self {
        match kind {
            ShapeKind::ConeTree => TreeParams::Cone(ConeTreeParams::sample(rng)),
            ShapeKind::SphereTree => TreeParams::Sphere(SphereTreeParams::sample(rng)),
            ShapeKind::PalmTree => TreeParams::Palm(PalmTreeParams::sample(rng)),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            TreeParams::Cone(_) => ShapeKind::ConeTree,
            TreeParams::Sphere(_) => ShapeKind::SphereTree,
            TreeParams::Palm(_) => ShapeKind::PalmTree,
        }
    }

    /// Height the scene reports for this tree
    pub fn extent(&self) -> f32 {
        match self {
            TreeParams::Cone(params) => params.apex_height(),
            TreeParams::Sphere(params) => params.extent(),
            TreeParams::Palm(params) => params.trunk_height,
        }
    }

    pub fn build(&self) -> MeshData {
        match self {
            TreeParams::Cone(params) => params.build(),
            TreeParams::Sphere(params) => params.build(),
            TreeParams::Palm(params) => params.build(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::random::forest_rng;

    #[test]
    fn every_kind_builds_whole_triangles_with_matching_extent() {
        let mut rng = forest_rng(Some(2024));
        for _ in 0..20 {
            for kind in ShapeKind::ALL {
                let params = TreeParams::sample(kind, &mut rng);
                assert_eq!(params.kind(), kind);

                let mesh = params.build();
                assert!(!mesh.is_empty());
                assert_eq!(mesh.vertex_count() % 3, 0);
                assert_eq!(mesh.extent, Some(params.extent()));
            }
        }
    }
}
