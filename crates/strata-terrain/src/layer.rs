//! Terrain layers: a vertical range paired with noise and candidate
//! materials.

use std::sync::Arc;

use glam::DVec3;
use strata_noise::{ConversionCurve, NoiseGenerator};

use crate::error::TerrainConfigError;
use crate::material::TerrainMaterial;

/// Reference y at which heightmap noise is sampled; the heightmap describes
/// a surface over (x, z), so the vertical input is fixed.
const HEIGHTMAP_REFERENCE_Y: f64 = 0.0;

/// A vertical slice of the world with its own density field and material
/// stack.
///
/// Density at a cell is the main noise sample plus the height-to-density
/// curve evaluated at the cell's normalized position within the layer
/// (0 at `min_y`, 1 at `max_y`). Cells with density >= 0 are solid.
#[derive(Clone, Debug)]
pub struct TerrainLayer {
    min_y: i32,
    max_y: i32,
    main: Arc<NoiseGenerator>,
    heightmap: Option<Arc<NoiseGenerator>>,
    height_curve: Option<ConversionCurve>,
    /// Sorted by descending priority; insertion order breaks ties.
    materials: Vec<TerrainMaterial>,
}

impl TerrainLayer {
    /// Starts building a layer spanning `min_y..=max_y` with the given main
    /// noise.
    pub fn builder(min_y: i32, max_y: i32, main: Arc<NoiseGenerator>) -> TerrainLayerBuilder {
        TerrainLayerBuilder {
            min_y,
            max_y,
            main,
            heightmap: None,
            height_curve: None,
            materials: Vec::new(),
        }
    }

    /// Lowest block y covered by this layer (inclusive).
    pub fn min_y(&self) -> i32 {
        self.min_y
    }

    /// Highest block y covered by this layer (inclusive).
    pub fn max_y(&self) -> i32 {
        self.max_y
    }

    /// Returns `true` if `y` lies within the layer's vertical range.
    pub fn contains(&self, y: i32) -> bool {
        (self.min_y..=self.max_y).contains(&y)
    }

    /// Density of the cell at (x, y, z).
    pub fn density(&self, seed: u64, x: i32, y: i32, z: i32) -> f64 {
        let point = DVec3::new(x as f64, y as f64, z as f64);
        let base = self.main.sample(seed, point);
        match &self.height_curve {
            Some(curve) => {
                let t = (y - self.min_y) as f64 / (self.max_y - self.min_y).max(1) as f64;
                base + curve.evaluate(t)
            }
            None => base,
        }
    }

    /// First material in descending-priority order that is active at the
    /// given cell, or `None` when nothing matches.
    pub fn resolve_material(&self, seed: u64, x: i32, y: i32, z: i32) -> Option<&TerrainMaterial> {
        let point = DVec3::new(x as f64, y as f64, z as f64);
        self.materials.iter().find(|m| m.is_active(seed, point))
    }

    /// Evaluates the whole column footprint of this layer at (x, z):
    /// densities for every in-world y the layer covers, plus the estimated
    /// surface height.
    ///
    /// With a heightmap generator configured, the surface is the layer's
    /// vertical midpoint offset by the heightmap sample (taken at a fixed
    /// reference y), clamped into the layer range. Otherwise it is the
    /// highest covered y whose density is >= 0 — the upward solid-to-air
    /// crossing — or `None` when the layer is air throughout.
    pub fn evaluate_column(&self, seed: u64, x: i32, z: i32, world_height: i32) -> LayerColumn {
        let lo = self.min_y.max(0);
        let hi = self.max_y.min(world_height - 1);
        let densities: Vec<f64> = if lo <= hi {
            (lo..=hi).map(|y| self.density(seed, x, y, z)).collect()
        } else {
            Vec::new()
        };

        let surface = match &self.heightmap {
            Some(heightmap) => {
                let offset = heightmap.sample(
                    seed,
                    DVec3::new(x as f64, HEIGHTMAP_REFERENCE_Y, z as f64),
                );
                let midpoint = (self.min_y as f64 + self.max_y as f64) * 0.5;
                let h = (midpoint + offset).round() as i32;
                Some(h.clamp(self.min_y, self.max_y))
            }
            None => (lo..=hi)
                .rev()
                .find(|&y| densities[(y - lo) as usize] >= 0.0),
        };

        LayerColumn {
            base_y: lo,
            densities,
            surface,
        }
    }
}

/// Per-column evaluation cache for one terrain layer: densities over the
/// covered y range and the estimated surface height.
#[derive(Clone, Debug)]
pub struct LayerColumn {
    base_y: i32,
    densities: Vec<f64>,
    surface: Option<i32>,
}

impl LayerColumn {
    /// Density at height `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y` is outside the evaluated range.
    pub fn density(&self, y: i32) -> f64 {
        self.densities[(y - self.base_y) as usize]
    }

    /// Estimated surface height for this column, if any cell is solid.
    pub fn surface(&self) -> Option<i32> {
        self.surface
    }
}

/// Fluent builder for [`TerrainLayer`].
#[derive(Clone, Debug)]
pub struct TerrainLayerBuilder {
    min_y: i32,
    max_y: i32,
    main: Arc<NoiseGenerator>,
    heightmap: Option<Arc<NoiseGenerator>>,
    height_curve: Option<ConversionCurve>,
    materials: Vec<TerrainMaterial>,
}

impl TerrainLayerBuilder {
    /// Heightmap noise estimating the surface height over (x, z).
    pub fn heightmap(mut self, noise: Arc<NoiseGenerator>) -> Self {
        self.heightmap = Some(noise);
        self
    }

    /// Height-to-density conversion curve over the layer's normalized
    /// vertical position.
    pub fn height_curve(mut self, curve: ConversionCurve) -> Self {
        self.height_curve = Some(curve);
        self
    }

    /// Appends a candidate material.
    pub fn material(mut self, material: TerrainMaterial) -> Self {
        self.materials.push(material);
        self
    }

    /// Validates the range and freezes the layer; materials are sorted by
    /// descending priority (stable, so insertion order breaks ties).
    ///
    /// # Errors
    ///
    /// Returns [`TerrainConfigError::InvalidRange`] if `min_y > max_y`.
    pub fn build(mut self) -> Result<TerrainLayer, TerrainConfigError> {
        if self.min_y > self.max_y {
            return Err(TerrainConfigError::InvalidRange {
                min_y: self.min_y,
                max_y: self.max_y,
            });
        }
        self.materials
            .sort_by(|a, b| b.priority().cmp(&a.priority()));
        Ok(TerrainLayer {
            min_y: self.min_y,
            max_y: self.max_y,
            main: self.main,
            heightmap: self.heightmap,
            height_curve: self.height_curve,
            materials: self.materials,
        })
    }
}
