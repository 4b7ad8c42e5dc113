//! Terrain materials: a prioritized stack of block assignments.

use std::sync::Arc;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use strata_noise::NoiseGenerator;
use strata_voxel::BlockState;

use crate::error::TerrainConfigError;

/// A fixed-width band of one block type below the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    /// Band thickness in blocks; always >= 1.
    pub width: i32,
    /// The block emitted throughout the band.
    pub block: BlockState,
}

/// A candidate material for a terrain layer.
///
/// Selection walks a layer's materials in descending priority order and
/// picks the first whose activation noise samples above zero (materials
/// without activation noise are always eligible). The chosen material then
/// decides the concrete block from the cell's position relative to the
/// column's surface height:
///
/// - at the surface: the cover block, falling back to the surface block,
///   falling back to base; columns whose surface lies below sea level use
///   the sea-floor block instead when one is configured
/// - within `surface.width` blocks below: the surface block
/// - within `filling.width` blocks below that: the filling block
/// - deeper, or above the surface: the base block
#[derive(Clone, Debug)]
pub struct TerrainMaterial {
    priority: i32,
    base: BlockState,
    cover: Option<BlockState>,
    surface: Option<Band>,
    filling: Option<Band>,
    sea_floor: Option<BlockState>,
    diffuse: f64,
    activation: Option<Arc<NoiseGenerator>>,
}

impl TerrainMaterial {
    /// Starts building a material with the given priority and base block.
    pub fn builder(priority: i32, base: BlockState) -> TerrainMaterialBuilder {
        TerrainMaterialBuilder {
            priority,
            base,
            cover: None,
            surface: None,
            filling: None,
            sea_floor: None,
            diffuse: 0.0,
            activation: None,
        }
    }

    /// Selection priority; higher wins.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Visual diffuse scalar, carried for consumers; never used by
    /// selection.
    pub fn diffuse(&self) -> f64 {
        self.diffuse
    }

    /// Returns `true` if this material is eligible at the given coordinate:
    /// either it has no activation noise, or that noise samples above zero.
    pub fn is_active(&self, seed: u64, point: DVec3) -> bool {
        match &self.activation {
            Some(noise) => noise.sample(seed, point) > 0.0,
            None => true,
        }
    }

    /// Resolves the concrete block for a solid cell at height `y`, given
    /// the column's surface height and whether that surface lies below the
    /// generator's sea level.
    pub fn block_at(&self, y: i32, surface_y: i32, below_sea_level: bool) -> BlockState {
        let surface_width = self.surface.map_or(0, |band| band.width);
        let filling_width = self.filling.map_or(0, |band| band.width);

        if y == surface_y {
            if below_sea_level && let Some(sea_floor) = self.sea_floor {
                return sea_floor;
            }
            return self
                .cover
                .or(self.surface.map(|band| band.block))
                .unwrap_or(self.base);
        }
        // Solid cells above the surface estimate (a heightmap may pin the
        // surface below dense cells) are plain base.
        if y > surface_y {
            return self.base;
        }
        if y >= surface_y.saturating_sub(surface_width)
            && let Some(band) = self.surface
        {
            return band.block;
        }
        if y >= surface_y
            .saturating_sub(surface_width)
            .saturating_sub(filling_width)
            && let Some(band) = self.filling
        {
            return band.block;
        }
        self.base
    }
}

/// Fluent builder for [`TerrainMaterial`].
#[derive(Clone, Debug)]
pub struct TerrainMaterialBuilder {
    priority: i32,
    base: BlockState,
    cover: Option<BlockState>,
    surface: Option<Band>,
    filling: Option<Band>,
    sea_floor: Option<BlockState>,
    diffuse: f64,
    activation: Option<Arc<NoiseGenerator>>,
}

impl TerrainMaterialBuilder {
    /// Block emitted at the very surface of the column.
    pub fn cover(mut self, block: BlockState) -> Self {
        self.cover = Some(block);
        self
    }

    /// Surface band: `width` blocks of `block` directly below the cover.
    pub fn surface(mut self, width: i32, block: BlockState) -> Self {
        self.surface = Some(Band { width, block });
        self
    }

    /// Filling band: `width` blocks of `block` below the surface band.
    pub fn filling(mut self, width: i32, block: BlockState) -> Self {
        self.filling = Some(Band { width, block });
        self
    }

    /// Block replacing cover/surface at the top of underwater columns.
    pub fn sea_floor(mut self, block: BlockState) -> Self {
        self.sea_floor = Some(block);
        self
    }

    /// Visual diffuse scalar.
    pub fn diffuse(mut self, diffuse: f64) -> Self {
        self.diffuse = diffuse;
        self
    }

    /// Activation noise gating this material's eligibility.
    pub fn activation(mut self, noise: Arc<NoiseGenerator>) -> Self {
        self.activation = Some(noise);
        self
    }

    /// Validates and freezes the material.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainConfigError::InvalidBandWidth`] for a zero or
    /// negative band width, and [`TerrainConfigError::NonFinite`] for a
    /// NaN/infinite diffuse value.
    pub fn build(self) -> Result<TerrainMaterial, TerrainConfigError> {
        for band in [self.surface, self.filling].into_iter().flatten() {
            if band.width < 1 {
                return Err(TerrainConfigError::InvalidBandWidth(band.width));
            }
        }
        if !self.diffuse.is_finite() {
            return Err(TerrainConfigError::NonFinite("material diffuse"));
        }
        Ok(TerrainMaterial {
            priority: self.priority,
            base: self.base,
            cover: self.cover,
            surface: self.surface,
            filling: self.filling,
            sea_floor: self.sea_floor,
            diffuse: self.diffuse,
            activation: self.activation,
        })
    }
}
