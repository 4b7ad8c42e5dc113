//! Generator presets: RON documents describing a complete generator
//! configuration.
//!
//! Presets are a serde mirror of the builder surface and compile through
//! the real builders, so every validation rule applies identically to
//! hand-written configs and programmatic setup.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strata_noise::{ConversionCurve, NoiseGenerator, NoiseLayer, NoiseOctave, OctaveKind};
use strata_terrain::{Band, BiomeTerrainModel, TerrainLayer, TerrainMaterial};
use strata_voxel::BlockState;

use crate::error::PresetError;
use crate::generator::{BaseKind, Generator};

/// Loads a generator from a RON preset document.
///
/// # Errors
///
/// Returns [`PresetError::Parse`] for malformed RON and the wrapped
/// configuration error when the document describes an invalid generator.
pub fn generator_from_ron(source: &str) -> Result<Generator, PresetError> {
    let preset: GeneratorPreset = ron::from_str(source).map_err(PresetError::Parse)?;
    preset.build()
}

/// Top-level preset for one dimension's generator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneratorPreset {
    pub base: BaseKind,
    #[serde(default)]
    pub world_seed: u64,
    #[serde(default = "default_sea_level")]
    pub sea_level: i32,
    #[serde(default)]
    pub vanilla_surface: bool,
    #[serde(default)]
    pub vanilla_structures: bool,
    #[serde(default)]
    pub mod_structures: bool,
    #[serde(default = "default_mod_dimension")]
    pub mod_generation_base_dimension: i32,
    #[serde(default)]
    pub terrain: Option<TerrainModelPreset>,
}

fn default_sea_level() -> i32 {
    64
}

fn default_mod_dimension() -> i32 {
    -1
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TerrainModelPreset {
    pub biome_id: i32,
    pub layers: Vec<TerrainLayerPreset>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TerrainLayerPreset {
    pub min_y: i32,
    pub max_y: i32,
    pub main: NoisePreset,
    #[serde(default)]
    pub heightmap: Option<NoisePreset>,
    #[serde(default)]
    pub height_curve: Option<CurvePreset>,
    #[serde(default)]
    pub materials: Vec<MaterialPreset>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaterialPreset {
    pub priority: i32,
    pub base: BlockState,
    #[serde(default)]
    pub cover: Option<BlockState>,
    #[serde(default)]
    pub surface: Option<Band>,
    #[serde(default)]
    pub filling: Option<Band>,
    #[serde(default)]
    pub sea_floor: Option<BlockState>,
    #[serde(default)]
    pub diffuse: f64,
    #[serde(default)]
    pub activation: Option<NoisePreset>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NoisePreset {
    #[serde(default)]
    pub layers: Vec<NoiseLayerPreset>,
    #[serde(default)]
    pub curve: Option<CurvePreset>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NoiseLayerPreset {
    #[serde(default)]
    pub octaves: Vec<OctavePreset>,
    #[serde(default)]
    pub curve: Option<CurvePreset>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OctavePreset {
    pub kind: OctaveKind,
    #[serde(default)]
    pub translation: [f64; 3],
    #[serde(default = "unit_scale")]
    pub scale: [f64; 3],
    #[serde(default = "unit_weight")]
    pub weight: f64,
    #[serde(default)]
    pub seed_offset: [i64; 3],
    #[serde(default)]
    pub curve: Option<CurvePreset>,
}

fn unit_scale() -> [f64; 3] {
    [1.0; 3]
}

fn unit_weight() -> f64 {
    1.0
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CurvePreset {
    pub nodes: Vec<(f64, f64)>,
}

impl CurvePreset {
    fn build(&self) -> Result<ConversionCurve, PresetError> {
        Ok(ConversionCurve::from_nodes(&self.nodes)?)
    }
}

impl OctavePreset {
    fn build(&self) -> Result<NoiseOctave, PresetError> {
        let mut builder = NoiseOctave::builder(self.kind)
            .translation(self.translation.into())
            .scale(self.scale.into())
            .weight(self.weight)
            .seed_offset(self.seed_offset[0], self.seed_offset[1], self.seed_offset[2]);
        if let Some(curve) = &self.curve {
            builder = builder.curve(curve.build()?);
        }
        Ok(builder.build()?)
    }
}

impl NoisePreset {
    fn build(&self) -> Result<Arc<NoiseGenerator>, PresetError> {
        let mut builder = NoiseGenerator::builder();
        for layer in &self.layers {
            let mut layer_builder = NoiseLayer::builder();
            for octave in &layer.octaves {
                layer_builder = layer_builder.octave(octave.build()?);
            }
            if let Some(curve) = &layer.curve {
                layer_builder = layer_builder.curve(curve.build()?);
            }
            builder = builder.layer(layer_builder.build());
        }
        if let Some(curve) = &self.curve {
            builder = builder.curve(curve.build()?);
        }
        Ok(builder.build())
    }
}

impl MaterialPreset {
    fn build(&self) -> Result<TerrainMaterial, PresetError> {
        let mut builder = TerrainMaterial::builder(self.priority, self.base).diffuse(self.diffuse);
        if let Some(cover) = self.cover {
            builder = builder.cover(cover);
        }
        if let Some(band) = self.surface {
            builder = builder.surface(band.width, band.block);
        }
        if let Some(band) = self.filling {
            builder = builder.filling(band.width, band.block);
        }
        if let Some(sea_floor) = self.sea_floor {
            builder = builder.sea_floor(sea_floor);
        }
        if let Some(activation) = &self.activation {
            builder = builder.activation(activation.build()?);
        }
        Ok(builder.build()?)
    }
}

impl TerrainLayerPreset {
    fn build(&self) -> Result<TerrainLayer, PresetError> {
        let mut builder = TerrainLayer::builder(self.min_y, self.max_y, self.main.build()?);
        if let Some(heightmap) = &self.heightmap {
            builder = builder.heightmap(heightmap.build()?);
        }
        if let Some(curve) = &self.height_curve {
            builder = builder.height_curve(curve.build()?);
        }
        for material in &self.materials {
            builder = builder.material(material.build()?);
        }
        Ok(builder.build()?)
    }
}

impl GeneratorPreset {
    /// Compiles the preset into an unfrozen generator.
    ///
    /// # Errors
    ///
    /// Propagates the underlying configuration error for any invalid
    /// curve, octave, material, or layer.
    pub fn build(&self) -> Result<Generator, PresetError> {
        let mut generator = Generator::new(self.base);
        generator
            .set_world_seed(self.world_seed)?
            .set_sea_level(self.sea_level)?
            .set_vanilla_surface(self.vanilla_surface)?
            .set_vanilla_structures(self.vanilla_structures)?
            .set_mod_structures(self.mod_structures)?
            .set_mod_generation_base_dimension(self.mod_generation_base_dimension)?;
        if let Some(terrain) = &self.terrain {
            let mut model = BiomeTerrainModel::new(terrain.biome_id);
            for layer in &terrain.layers {
                model.push_layer(layer.build()?);
            }
            generator.set_terrain_model(model)?;
        }
        Ok(generator)
    }
}
