//! # Forest Scene Assembly
//!
//! Plants a forest in two passes. [`ForestLayout::generate`] samples every
//! tree kind, parameter set and position up front; [`ForestScene::upload`]
//! then builds and uploads each mesh exactly once. Splitting the two keeps the
//! random draws independent of the GPU and lets tests inspect a layout without
//! a device.

use std::collections::HashMap;

use log::{debug, info};

use super::mesh::{pack_and_upload, GeneratedMesh, MeshUploader};
use super::vertex::VertexSchema;
use crate::config::ForestConfig;
use crate::error::{ForestError, Result};
use crate::gfx::geometry::random::UniformSource;
use crate::gfx::geometry::shapes::{generate_ground, generate_sun, ShapeKind, TreeParams};

/// Relative likelihood of planting each tree kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeWeights {
    pub cone: f32,
    pub sphere: f32,
    pub palm: f32,
}

impl Default for ShapeWeights {
    fn default() -> Self {
        Self {
            cone: 0.33,
            sphere: 0.33,
            palm: 0.34,
        }
    }
}

impl ShapeWeights {
    pub fn new(cone: f32, sphere: f32, palm: f32) -> Self {
        Self { cone, sphere, palm }
    }

    pub fn total(&self) -> f32 {
        self.cone + self.sphere + self.palm
    }

    /// Draws one kind in proportion to the weights
    ///
    /// With the defaults this is the cumulative threshold test
    /// `r < 0.33 → cone`, `r < 0.66 → sphere`, otherwise palm.
    ///
    /// A draw landing exactly on the upper bound goes to the last kind with a
    /// non-zero weight, so a zero-weight kind is never picked.
    pub fn pick<R: UniformSource + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        let weighted = [
            (ShapeKind::ConeTree, self.cone),
            (ShapeKind::SphereTree, self.sphere),
            (ShapeKind::PalmTree, self.palm),
        ];
        let r = rng.uniform(0.0, self.total());

        let mut upper = 0.0;
        for (kind, weight) in weighted {
            if weight <= 0.0 {
                continue;
            }
            upper += weight;
            if r < upper {
                return kind;
            }
        }
        weighted
            .iter()
            .rev()
            .find(|(_, weight)| *weight > 0.0)
            .map_or(ShapeKind::PalmTree, |(kind, _)| *kind)
    }

    pub fn validate(&self) -> Result<()> {
        let weights = [self.cone, self.sphere, self.palm];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ForestError::Config(format!(
                "shape weights must be finite and non-negative, got {self:?}"
            )));
        }
        if self.total() <= 0.0 {
            return Err(ForestError::Config("shape weights sum to zero".into()));
        }
        Ok(())
    }
}

/// A tree chosen and positioned but not yet built
#[derive(Debug, Clone, PartialEq)]
pub struct TreePlan {
    pub params: TreeParams,
    pub x: f32,
    pub z: f32,
}

/// Every random decision of a forest, made before any mesh exists
#[derive(Debug, Clone)]
pub struct ForestLayout {
    pub trees: Vec<TreePlan>,
    pub ground_size: f32,
    pub sun_position: [f32; 3],
}

impl ForestLayout {
    /// Picks a kind, samples its parameters and places it, once per tree
    pub fn generate<R: UniformSource + ?Sized>(config: &ForestConfig, rng: &mut R) -> Self {
        let spread = config.spread;
        let trees = (0..config.tree_count)
            .map(|_| {
                let kind = config.shape_weights.pick(rng);
                let params = TreeParams::sample(kind, rng);
                let x = rng.uniform(-spread, spread);
                let z = rng.uniform(-spread, spread);
                TreePlan { params, x, z }
            })
            .collect();

        Self {
            trees,
            ground_size: config.ground_size,
            sun_position: config.sun_position,
        }
    }
}

/// One uploaded tree standing on the ground at `(x, 0, z)`
#[derive(Debug)]
pub struct TreeInstance<H = wgpu::Buffer> {
    pub kind: ShapeKind,
    pub mesh: GeneratedMesh<H>,
    pub x: f32,
    pub z: f32,
}

impl<H> TreeInstance<H> {
    pub fn translation(&self) -> [f32; 3] {
        [self.x, 0.0, self.z]
    }
}

/// Summary figures for logging and the stats overlay
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForestStats {
    pub counts: HashMap<ShapeKind, usize>,
    pub total_triangles: u32,
    pub tallest: Option<f32>,
}

impl ForestStats {
    pub fn count(&self, kind: ShapeKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }
}

/// The uploaded forest: trees, ground and sun, owned for the process lifetime
#[derive(Debug)]
pub struct ForestScene<H = wgpu::Buffer> {
    pub trees: Vec<TreeInstance<H>>,
    pub ground: GeneratedMesh<H>,
    pub sun: GeneratedMesh<H>,
    pub sun_position: [f32; 3],
}

impl<H> ForestScene<H> {
    /// Builds and uploads every mesh of `layout`
    ///
    /// Trees and ground carry normals; the sun is drawn unlit and uses the
    /// compact schema.
    pub fn upload<U>(uploader: &U, layout: &ForestLayout) -> Result<Self>
    where
        U: MeshUploader<Handle = H> + ?Sized,
    {
        let mut trees = Vec::with_capacity(layout.trees.len());
        for (index, plan) in layout.trees.iter().enumerate() {
            let kind = plan.params.kind();
            let label = format!("{} #{index}", kind.name());
            let mesh = pack_and_upload(
                uploader,
                &label,
                &plan.params.build(),
                VertexSchema::PositionNormalColor,
            )?;

            debug!(
                "Planted {} at ({:.2}, {:.2}): {} triangles, extent {:?}",
                label,
                plan.x,
                plan.z,
                mesh.triangle_count(),
                mesh.extent
            );

            trees.push(TreeInstance {
                kind,
                mesh,
                x: plan.x,
                z: plan.z,
            });
        }

        let ground = pack_and_upload(
            uploader,
            "ground",
            &generate_ground(layout.ground_size),
            VertexSchema::PositionNormalColor,
        )?;
        let sun = pack_and_upload(uploader, "sun", &generate_sun(), VertexSchema::PositionColor)?;

        let scene = Self {
            trees,
            ground,
            sun,
            sun_position: layout.sun_position,
        };

        let stats = scene.stats();
        info!(
            "Forest ready: {} cone, {} sphere, {} palm trees, {} triangles, tallest {:.2}",
            stats.count(ShapeKind::ConeTree),
            stats.count(ShapeKind::SphereTree),
            stats.count(ShapeKind::PalmTree),
            stats.total_triangles,
            stats.tallest.unwrap_or(0.0)
        );

        Ok(scene)
    }

    pub fn stats(&self) -> ForestStats {
        let mut stats = ForestStats::default();
        for tree in &self.trees {
            *stats.counts.entry(tree.kind).or_insert(0) += 1;
            stats.total_triangles += tree.mesh.triangle_count();
            if let Some(extent) = tree.mesh.extent {
                stats.tallest = Some(stats.tallest.map_or(extent, |t: f32| t.max(extent)));
            }
        }
        stats.total_triangles += self.ground.triangle_count() + self.sun.triangle_count();
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::random::forest_rng;
    use crate::gfx::scene::mesh::tests::RecordingUploader;

    /// Replays a fixed sequence of draws
    struct Scripted(Vec<f32>);

    impl UniformSource for Scripted {
        fn uniform(&mut self, low: f32, high: f32) -> f32 {
            let t = self.0.remove(0);
            low + t * (high - low)
        }

        fn uniform_int(&mut self, low: u32, _high: u32) -> u32 {
            low
        }
    }

    #[test]
    fn default_weights_use_reference_thresholds() {
        let weights = ShapeWeights::default();
        assert!((weights.total() - 1.0).abs() < 1e-6);

        let mut rng = Scripted(vec![0.1, 0.32, 0.34, 0.65, 0.67, 0.99]);
        let picks: Vec<_> = (0..6).map(|_| weights.pick(&mut rng)).collect();
        assert_eq!(
            picks,
            vec![
                ShapeKind::ConeTree,
                ShapeKind::ConeTree,
                ShapeKind::SphereTree,
                ShapeKind::SphereTree,
                ShapeKind::PalmTree,
                ShapeKind::PalmTree,
            ]
        );
    }

    #[test]
    fn zero_weight_kind_is_never_picked() {
        let weights = ShapeWeights::new(1.0, 0.0, 1.0);
        let mut rng = forest_rng(Some(5));
        for _ in 0..500 {
            assert_ne!(weights.pick(&mut rng), ShapeKind::SphereTree);
        }
    }

    #[test]
    fn interval_ends_respect_zero_weights() {
        let no_palms = ShapeWeights::new(1.0, 1.0, 0.0);
        assert_eq!(no_palms.pick(&mut Scripted(vec![1.0])), ShapeKind::SphereTree);

        let no_cones = ShapeWeights::new(0.0, 1.0, 1.0);
        assert_eq!(no_cones.pick(&mut Scripted(vec![0.0])), ShapeKind::SphereTree);

        let palms_only = ShapeWeights::new(0.0, 0.0, 2.0);
        assert_eq!(palms_only.pick(&mut Scripted(vec![1.0])), ShapeKind::PalmTree);
    }

    #[test]
    fn invalid_weights_are_rejected() {
        assert!(ShapeWeights::new(0.0, 0.0, 0.0).validate().is_err());
        assert!(ShapeWeights::new(-0.1, 0.5, 0.5).validate().is_err());
        assert!(ShapeWeights::new(f32::NAN, 0.5, 0.5).validate().is_err());
        assert!(ShapeWeights::default().validate().is_ok());
    }

    #[test]
    fn layout_places_trees_inside_spread() {
        let config = ForestConfig::default().with_tree_count(200).with_spread(12.0);
        let layout = ForestLayout::generate(&config, &mut forest_rng(Some(8)));

        assert_eq!(layout.trees.len(), 200);
        for plan in &layout.trees {
            assert!((-12.0..=12.0).contains(&plan.x));
            assert!((-12.0..=12.0).contains(&plan.z));
        }
        for kind in ShapeKind::ALL {
            assert!(layout.trees.iter().any(|plan| plan.params.kind() == kind));
        }
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let config = ForestConfig::default().with_tree_count(25);
        let a = ForestLayout::generate(&config, &mut forest_rng(Some(77)));
        let b = ForestLayout::generate(&config, &mut forest_rng(Some(77)));
        assert_eq!(a.trees, b.trees);
    }

    #[test]
    fn uploaded_scene_matches_layout() {
        let config = ForestConfig::default().with_tree_count(15);
        let layout = ForestLayout::generate(&config, &mut forest_rng(Some(3)));
        let scene = ForestScene::upload(&RecordingUploader, &layout).unwrap();

        assert_eq!(scene.trees.len(), 15);
        for (tree, plan) in scene.trees.iter().zip(&layout.trees) {
            assert_eq!(tree.kind, plan.params.kind());
            assert_eq!(tree.translation(), [plan.x, 0.0, plan.z]);
            assert_eq!(tree.mesh.extent, Some(plan.params.extent()));
            assert_eq!(tree.mesh.schema, VertexSchema::PositionNormalColor);
        }

        assert_eq!(scene.ground.vertex_count, 6);
        assert_eq!(scene.ground.extent, None);
        assert_eq!(scene.sun.schema, VertexSchema::PositionColor);
        assert_eq!(scene.sun_position, config.sun_position);
    }

    #[test]
    fn stats_add_up() {
        let config = ForestConfig::default().with_tree_count(30);
        let layout = ForestLayout::generate(&config, &mut forest_rng(Some(19)));
        let scene = ForestScene::upload(&RecordingUploader, &layout).unwrap();
        let stats = scene.stats();

        let planted: usize = ShapeKind::ALL.iter().map(|k| stats.count(*k)).sum();
        assert_eq!(planted, 30);

        let tallest = layout
            .trees
            .iter()
            .map(|plan| plan.params.extent())
            .fold(f32::MIN, f32::max);
        assert_eq!(stats.tallest, Some(tallest));

        let trees: u32 = scene.trees.iter().map(|t| t.mesh.triangle_count()).sum();
        assert_eq!(stats.total_triangles, trees + 2 + scene.sun.triangle_count());
    }

    #[test]
    fn empty_forest_still_has_ground_and_sun() {
        let config = ForestConfig::default().with_tree_count(0);
        let layout = ForestLayout::generate(&config, &mut forest_rng(Some(1)));
        let scene = ForestScene::upload(&RecordingUploader, &layout).unwrap();
        assert!(scene.trees.is_empty());
        assert_eq!(scene.stats().tallest, None);
    }
}
