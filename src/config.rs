// src/config.rs
//! Viewer and scene configuration
//!
//! [`ForestConfig`] collects every tunable of a run: how many trees are planted,
//! how far they spread, where the sun hangs and how the window looks. Defaults
//! reproduce the reference scene; [`ForestConfig::from_env`] lets a shell
//! override the common knobs without recompiling.

use std::str::FromStr;

use crate::error::{ForestError, Result};
use crate::gfx::scene::forest::ShapeWeights;

/// Environment variable overriding [`ForestConfig::tree_count`]
pub const ENV_TREES: &str = "FOREST_TREES";
/// Environment variable overriding [`ForestConfig::seed`]
pub const ENV_SEED: &str = "FOREST_SEED";
/// Environment variable overriding [`ForestConfig::spread`]
pub const ENV_SPREAD: &str = "FOREST_SPREAD";

#[derive(Debug, Clone, PartialEq)]
pub struct ForestConfig {
    /// Number of trees planted on the ground
    pub tree_count: usize,
    /// Half side of the square trees are scattered in, centered on the origin
    pub spread: f32,
    /// Half side of the ground quad
    pub ground_size: f32,
    /// Relative likelihood of each tree kind
    pub shape_weights: ShapeWeights,
    /// World position of the sun sphere, also used as the light position
    pub sun_position: [f32; 3],
    /// Where the fly camera starts, facing `-Z`
    pub camera_position: [f32; 3],
    pub window_size: (u32, u32),
    pub window_title: String,
    /// Clear color behind the scene
    pub sky_color: [f64; 3],
    /// Fixed seed for reproducible forests; `None` draws a fresh one
    pub seed: Option<u64>,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            tree_count: 60,
            spread: 25.0,
            ground_size: 30.0,
            shape_weights: ShapeWeights::default(),
            sun_position: [10.0, 18.0, -12.0],
            camera_position: [0.0, 0.5, 2.0],
            window_size: (1200, 800),
            window_title: "Procedural Forest".to_string(),
            sky_color: [0.5, 0.7, 1.0],
            seed: None,
        }
    }
}

impl ForestConfig {
    /// Builds the default configuration with environment overrides applied
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides looked up through `lookup`
    ///
    /// Split out from [`ForestConfig::from_env`] so tests can feed values
    /// without touching the process environment.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(trees) = parse_var::<usize>(&lookup, ENV_TREES)? {
            self.tree_count = trees;
        }
        if let Some(seed) = parse_var::<u64>(&lookup, ENV_SEED)? {
            self.seed = Some(seed);
        }
        if let Some(spread) = parse_var::<f32>(&lookup, ENV_SPREAD)? {
            self.spread = spread;
        }
        Ok(self)
    }

    pub fn with_tree_count(mut self, tree_count: usize) -> Self {
        self.tree_count = tree_count;
        self
    }

    pub fn with_spread(mut self, spread: f32) -> Self {
        self.spread = spread;
        self
    }

    pub fn with_ground_size(mut self, ground_size: f32) -> Self {
        self.ground_size = ground_size;
        self
    }

    pub fn with_shape_weights(mut self, weights: ShapeWeights) -> Self {
        self.shape_weights = weights;
        self
    }

    pub fn with_sun_position(mut self, position: [f32; 3]) -> Self {
        self.sun_position = position;
        self
    }

    pub fn with_camera_position(mut self, position: [f32; 3]) -> Self {
        self.camera_position = position;
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the values that would otherwise produce a broken scene
    pub fn validate(&self) -> Result<()> {
        if !(self.spread > 0.0) {
            return Err(ForestError::Config(format!(
                "spread must be positive, got {}",
                self.spread
            )));
        }
        if self.spread > self.ground_size {
            return Err(ForestError::Config(format!(
                "spread {} exceeds ground size {}",
                self.spread, self.ground_size
            )));
        }
        self.shape_weights.validate()?;
        if self.window_size.0 == 0 || self.window_size.1 == 0 {
            return Err(ForestError::Config("window size must be non-zero".into()));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ForestError::Config(format!("{key}={raw:?} is not a valid value"))),
    }
}
