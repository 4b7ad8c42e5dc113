//! Terrain composition on top of the noise pipeline: materials selected by
//! priority, vertical terrain layers with height-to-density curves, and the
//! mono-biome terrain model.

mod error;
mod layer;
mod material;
mod model;

pub use error::TerrainConfigError;
pub use layer::{LayerColumn, TerrainLayer, TerrainLayerBuilder};
pub use material::{Band, TerrainMaterial, TerrainMaterialBuilder};
pub use model::BiomeTerrainModel;
