//! The mono-biome terrain model: one biome id plus an ordered list of
//! terrain layers.

use crate::layer::TerrainLayer;

/// An ordered stack of terrain layers attached to a single biome.
///
/// Layers may overlap vertically. For any given y, the **last** inserted
/// layer containing y wins outright — layers are painted in sequence, and
/// later registrations override earlier ones. Blending across overlapping
/// layers is deliberately not performed.
#[derive(Clone, Debug)]
pub struct BiomeTerrainModel {
    biome_id: i32,
    layers: Vec<TerrainLayer>,
}

impl BiomeTerrainModel {
    /// Creates an empty model for the given biome id. The id is opaque to
    /// the terrain pipeline; it is not validated against any registry.
    pub fn new(biome_id: i32) -> Self {
        Self {
            biome_id,
            layers: Vec::new(),
        }
    }

    /// The biome id this model is attached to.
    pub fn biome_id(&self) -> i32 {
        self.biome_id
    }

    /// Appends a terrain layer. Later layers override earlier ones wherever
    /// their ranges overlap.
    pub fn push_layer(&mut self, layer: TerrainLayer) -> &mut Self {
        self.layers.push(layer);
        self
    }

    /// All layers in insertion order.
    pub fn layers(&self) -> &[TerrainLayer] {
        &self.layers
    }

    /// The winning layer for height `y`: the last inserted layer whose
    /// range contains `y`, together with its index.
    pub fn layer_for(&self, y: i32) -> Option<(usize, &TerrainLayer)> {
        self.layers
            .iter()
            .enumerate()
            .rev()
            .find(|(_, layer)| layer.contains(y))
    }
}
