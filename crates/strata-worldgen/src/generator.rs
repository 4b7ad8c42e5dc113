//! The per-dimension generator: base kind selection, configuration
//! lifecycle, and column generation.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use strata_terrain::{BiomeTerrainModel, LayerColumn, TerrainLayer};
use strata_voxel::{BlockState, ColumnBlocks, WORLD_HEIGHT, block_ids};

use crate::error::WorldGenError;

/// The built-in base generation a dimension starts from before terrain
/// layers paint over it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseKind {
    Overworld,
    Flat,
    Nether,
    End,
}

impl BaseKind {
    /// Pre-fills a column with this kind's baseline blocks.
    fn prefill(self, column: &mut ColumnBlocks, sea_level: i32, vanilla_surface: bool) {
        match self {
            BaseKind::Overworld => {
                fill(column, 0, sea_level - 5, block_ids::STONE);
                fill(column, sea_level - 4, sea_level - 2, block_ids::DIRT);
                let cap = if vanilla_surface {
                    block_ids::GRASS
                } else {
                    block_ids::STONE
                };
                fill(column, sea_level - 1, sea_level - 1, cap);
            }
            BaseKind::Flat => {
                fill(column, 0, 0, block_ids::BEDROCK);
                fill(column, 1, 2, block_ids::DIRT);
                fill(column, 3, 3, block_ids::GRASS);
            }
            BaseKind::Nether => {
                fill(column, 0, sea_level - 1, block_ids::NETHERRACK);
            }
            BaseKind::End => {
                fill(column, 0, 40, block_ids::END_STONE);
            }
        }
    }
}

/// Fills `lo..=hi` with `state`, clamped to the world range; empty ranges
/// are a no-op.
fn fill(column: &mut ColumnBlocks, lo: i32, hi: i32, state: BlockState) {
    let lo = lo.max(0);
    let hi = hi.min(WORLD_HEIGHT as i32 - 1);
    for y in lo..=hi {
        column.set(y as usize, state);
    }
}

/// One dimension's world generator.
///
/// Configured single-threaded through the fluent setters during setup, then
/// frozen by the first [`Generator::generate_column`] call. The freeze is a
/// one-shot atomic publish: once any worker may be reading the graph, every
/// setter fails with [`WorldGenError::FrozenMutation`] instead of silently
/// racing.
///
/// Generation itself holds no state beyond its own stack and the output
/// buffer, so callers may drop a column mid-flight without corrupting
/// anything.
#[derive(Debug)]
pub struct Generator {
    base: BaseKind,
    vanilla_surface: bool,
    vanilla_structures: bool,
    mod_structures: bool,
    /// Base dimension id whose mod-generation callback also edits columns;
    /// -1 disables the hook.
    mod_generation_base_dimension: i32,
    world_seed: u64,
    sea_level: i32,
    model: Option<BiomeTerrainModel>,
    frozen: AtomicBool,
}

impl Generator {
    /// Creates an unconfigured generator with the given base kind.
    pub fn new(base: BaseKind) -> Self {
        Self {
            base,
            vanilla_surface: false,
            vanilla_structures: false,
            mod_structures: false,
            mod_generation_base_dimension: -1,
            world_seed: 0,
            sea_level: 64,
            model: None,
            frozen: AtomicBool::new(false),
        }
    }

    fn ensure_mutable(&self) -> Result<(), WorldGenError> {
        if self.frozen.load(Ordering::Acquire) {
            return Err(WorldGenError::FrozenMutation);
        }
        Ok(())
    }

    /// Replaces the base kind.
    pub fn set_base(&mut self, base: BaseKind) -> Result<&mut Self, WorldGenError> {
        self.ensure_mutable()?;
        self.base = base;
        Ok(self)
    }

    /// Sets the world seed every noise sample derives from. Supplied by the
    /// seed source before the generator freezes.
    pub fn set_world_seed(&mut self, seed: u64) -> Result<&mut Self, WorldGenError> {
        self.ensure_mutable()?;
        self.world_seed = seed;
        Ok(self)
    }

    /// Sets the sea level used by base prefill and sea-floor placement.
    pub fn set_sea_level(&mut self, sea_level: i32) -> Result<&mut Self, WorldGenError> {
        self.ensure_mutable()?;
        self.sea_level = sea_level;
        Ok(self)
    }

    /// Enables or disables the vanilla surface cap in base prefill.
    pub fn set_vanilla_surface(&mut self, enabled: bool) -> Result<&mut Self, WorldGenError> {
        self.ensure_mutable()?;
        self.vanilla_surface = enabled;
        Ok(self)
    }

    /// Flags vanilla structure placement for external collaborators.
    pub fn set_vanilla_structures(&mut self, enabled: bool) -> Result<&mut Self, WorldGenError> {
        self.ensure_mutable()?;
        self.vanilla_structures = enabled;
        Ok(self)
    }

    /// Flags mod structure placement for external collaborators.
    pub fn set_mod_structures(&mut self, enabled: bool) -> Result<&mut Self, WorldGenError> {
        self.ensure_mutable()?;
        self.mod_structures = enabled;
        Ok(self)
    }

    /// Selects which base dimension's mod-generation callback also edits
    /// generated columns; -1 disables the hook.
    pub fn set_mod_generation_base_dimension(
        &mut self,
        dimension: i32,
    ) -> Result<&mut Self, WorldGenError> {
        self.ensure_mutable()?;
        self.mod_generation_base_dimension = dimension;
        Ok(self)
    }

    /// Attaches the active terrain model, replacing any previous one.
    pub fn set_terrain_model(
        &mut self,
        model: BiomeTerrainModel,
    ) -> Result<&mut Self, WorldGenError> {
        self.ensure_mutable()?;
        self.model = Some(model);
        Ok(self)
    }

    /// Appends a terrain layer to the active model, creating a model with
    /// biome id 0 when none has been attached yet.
    pub fn add_terrain_layer(&mut self, layer: TerrainLayer) -> Result<&mut Self, WorldGenError> {
        self.ensure_mutable()?;
        self.model
            .get_or_insert_with(|| BiomeTerrainModel::new(0))
            .push_layer(layer);
        Ok(self)
    }

    pub fn base(&self) -> BaseKind {
        self.base
    }

    pub fn world_seed(&self) -> u64 {
        self.world_seed
    }

    pub fn sea_level(&self) -> i32 {
        self.sea_level
    }

    pub fn vanilla_surface(&self) -> bool {
        self.vanilla_surface
    }

    pub fn vanilla_structures(&self) -> bool {
        self.vanilla_structures
    }

    pub fn mod_structures(&self) -> bool {
        self.mod_structures
    }

    pub fn mod_generation_base_dimension(&self) -> i32 {
        self.mod_generation_base_dimension
    }

    /// The active terrain model, if one is attached.
    pub fn terrain_model(&self) -> Option<&BiomeTerrainModel> {
        self.model.as_ref()
    }

    /// Returns `true` once the first column has been generated.
    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }

    /// Publishes the frozen state. Idempotent; logs on the first
    /// transition only.
    fn freeze(&self) {
        if self
            .frozen
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            tracing::info!(
                base = ?self.base,
                seed = self.world_seed,
                "generator frozen; configuration is now immutable"
            );
        }
    }

    /// Generates one vertical column of blocks at world (x, z).
    ///
    /// Freezes the generator on first use; afterwards it is safe to call
    /// concurrently from any number of worker threads. Recoverable
    /// conditions (no layer covering a height, negative density, no
    /// material matching) leave the base-kind block in place rather than
    /// erroring.
    pub fn generate_column(&self, x: i32, z: i32) -> ColumnBlocks {
        self.freeze();

        let mut column = ColumnBlocks::new_air();
        self.base
            .prefill(&mut column, self.sea_level, self.vanilla_surface);

        let Some(model) = &self.model else {
            return column;
        };

        let world_height = WORLD_HEIGHT as i32;
        let seed = self.world_seed;
        let mut cache: Vec<Option<LayerColumn>> = vec![None; model.layers().len()];

        for y in 0..world_height {
            let Some((index, layer)) = model.layer_for(y) else {
                continue;
            };
            let evaluated = cache[index]
                .get_or_insert_with(|| layer.evaluate_column(seed, x, z, world_height));
            if evaluated.density(y) < 0.0 {
                continue;
            }
            let Some(surface) = evaluated.surface() else {
                continue;
            };
            match layer.resolve_material(seed, x, y, z) {
                Some(material) => {
                    let below_sea = surface < self.sea_level;
                    column.set(y as usize, material.block_at(y, surface, below_sea));
                }
                None => {
                    tracing::debug!(x, y, z, "no terrain material matched; keeping base block");
                }
            }
        }

        column
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use strata_noise::{ConversionCurve, NoiseGenerator, NoiseLayer, NoiseOctave, OctaveKind};
    use strata_terrain::TerrainMaterial;

    const BASE: BlockState = BlockState::simple(30);
    const COVER: BlockState = BlockState::simple(31);
    const SURFACE: BlockState = BlockState::simple(32);
    const FILLING: BlockState = BlockState::simple(33);

    fn silent_noise() -> Arc<NoiseGenerator> {
        NoiseGenerator::builder().build()
    }

    /// A generator whose output is pinned to `value` by a constant curve.
    fn constant_noise(value: f64) -> Arc<NoiseGenerator> {
        NoiseGenerator::builder()
            .curve(ConversionCurve::from_nodes(&[(0.5, value)]).unwrap())
            .build()
    }

    /// Density 1 everywhere in the layer.
    fn solid_layer(min_y: i32, max_y: i32, material: TerrainMaterial) -> TerrainLayer {
        TerrainLayer::builder(min_y, max_y, constant_noise(1.0))
            .material(material)
            .build()
            .unwrap()
    }

    #[test]
    fn test_base_only_generation() {
        let mut generator = Generator::new(BaseKind::Flat);
        generator.set_world_seed(1).unwrap();
        let column = generator.generate_column(0, 0);

        assert_eq!(column.get(0), block_ids::BEDROCK);
        assert_eq!(column.get(1), block_ids::DIRT);
        assert_eq!(column.get(2), block_ids::DIRT);
        assert_eq!(column.get(3), block_ids::GRASS);
        assert_eq!(column.get(4), BlockState::AIR);
    }

    #[test]
    fn test_overworld_prefill_respects_vanilla_surface() {
        let mut with_cap = Generator::new(BaseKind::Overworld);
        with_cap.set_vanilla_surface(true).unwrap();
        let column = with_cap.generate_column(0, 0);
        assert_eq!(column.get(63), block_ids::GRASS);
        assert_eq!(column.get(60), block_ids::DIRT);
        assert_eq!(column.get(10), block_ids::STONE);
        assert_eq!(column.get(64), BlockState::AIR);

        let without_cap = Generator::new(BaseKind::Overworld);
        let column = without_cap.generate_column(0, 0);
        assert_eq!(column.get(63), block_ids::STONE);
    }

    #[test]
    fn test_freeze_blocks_further_mutation() {
        let mut generator = Generator::new(BaseKind::Flat);
        generator.set_world_seed(7).unwrap();
        assert!(!generator.is_frozen());

        let _ = generator.generate_column(0, 0);
        assert!(generator.is_frozen());

        let layer = solid_layer(0, 10, TerrainMaterial::builder(0, BASE).build().unwrap());
        assert!(matches!(
            generator.add_terrain_layer(layer),
            Err(WorldGenError::FrozenMutation)
        ));
        assert!(matches!(
            generator.set_world_seed(8),
            Err(WorldGenError::FrozenMutation)
        ));
        assert!(matches!(
            generator.set_sea_level(70),
            Err(WorldGenError::FrozenMutation)
        ));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let build = || {
            let mut generator = Generator::new(BaseKind::Flat);
            generator.set_world_seed(12345).unwrap();
            let octave = NoiseOctave::builder(OctaveKind::Perlin)
                .uniform_scale(0.05)
                .build()
                .unwrap();
            let noise = NoiseGenerator::builder()
                .layer(NoiseLayer::builder().octave(octave).build())
                .build();
            let curve = ConversionCurve::from_nodes(&[(0.0, 2.0), (1.0, -2.0)]).unwrap();
            let layer = TerrainLayer::builder(0, 128, noise)
                .height_curve(curve)
                .material(TerrainMaterial::builder(0, BASE).build().unwrap())
                .build()
                .unwrap();
            generator.add_terrain_layer(layer).unwrap();
            generator
        };

        let a = build();
        let b = build();
        for (x, z) in [(0, 0), (17, -4), (-100, 250), (3000, 3000)] {
            assert_eq!(
                a.generate_column(x, z).content_hash(),
                b.generate_column(x, z).content_hash(),
                "identically configured generators must agree at ({x}, {z})"
            );
        }
        assert_eq!(
            a.generate_column(5, 5).content_hash(),
            a.generate_column(5, 5).content_hash(),
            "repeated generation must be bit-identical"
        );
    }

    #[test]
    fn test_concurrent_generation_matches() {
        let mut generator = Generator::new(BaseKind::Overworld);
        generator.set_world_seed(99).unwrap();
        let octave = NoiseOctave::builder(OctaveKind::Gray)
            .uniform_scale(0.03)
            .build()
            .unwrap();
        let noise = NoiseGenerator::builder()
            .layer(NoiseLayer::builder().octave(octave).build())
            .build();
        let curve = ConversionCurve::from_nodes(&[(0.0, 4.0), (1.0, -4.0)]).unwrap();
        let layer = TerrainLayer::builder(0, 128, noise)
            .height_curve(curve)
            .material(TerrainMaterial::builder(0, BASE).build().unwrap())
            .build()
            .unwrap();
        generator.add_terrain_layer(layer).unwrap();

        let generator = Arc::new(generator);
        let a = {
            let generator = Arc::clone(&generator);
            std::thread::spawn(move || generator.generate_column(42, -7).content_hash())
        };
        let b = {
            let generator = Arc::clone(&generator);
            std::thread::spawn(move || generator.generate_column(42, -7).content_hash())
        };
        assert_eq!(
            a.join().unwrap(),
            b.join().unwrap(),
            "same column generated on different threads must hash identically"
        );
    }

    #[test]
    fn test_overlapping_layers_later_wins() {
        let mut generator = Generator::new(BaseKind::Flat);
        generator.set_world_seed(1).unwrap();
        let early = BlockState::simple(40);
        let late = BlockState::simple(41);
        generator
            .add_terrain_layer(solid_layer(
                0,
                20,
                TerrainMaterial::builder(0, early).build().unwrap(),
            ))
            .unwrap()
            .add_terrain_layer(solid_layer(
                5,
                15,
                TerrainMaterial::builder(0, late).build().unwrap(),
            ))
            .unwrap();

        let column = generator.generate_column(0, 0);
        assert_eq!(column.get(10), late, "later layer must win in overlap");
        assert_eq!(column.get(18), early, "outside overlap the first layer holds");
        assert_eq!(column.get(3), early);
    }

    #[test]
    fn test_material_priority_wins() {
        let low = TerrainMaterial::builder(5, BlockState::simple(50))
            .build()
            .unwrap();
        let high = TerrainMaterial::builder(10, BlockState::simple(51))
            .build()
            .unwrap();
        let layer = TerrainLayer::builder(0, 30, constant_noise(1.0))
            .material(low)
            .material(high)
            .build()
            .unwrap();

        let mut generator = Generator::new(BaseKind::Flat);
        generator.set_world_seed(1).unwrap();
        generator.add_terrain_layer(layer).unwrap();

        let column = generator.generate_column(0, 0);
        assert_eq!(column.get(15), BlockState::simple(51));
    }

    #[test]
    fn test_band_placement_on_flat_surface() {
        // Density 1 - 2t over [0, 128] crosses zero exactly at y = 64 with
        // no noise attached, giving a flat surface at H = 64.
        let curve = ConversionCurve::from_nodes(&[(0.0, 1.0), (0.5, 0.0), (1.0, -1.0)]).unwrap();
        let material = TerrainMaterial::builder(0, BASE)
            .cover(COVER)
            .surface(3, SURFACE)
            .filling(4, FILLING)
            .build()
            .unwrap();
        let layer = TerrainLayer::builder(0, 128, silent_noise())
            .height_curve(curve)
            .material(material)
            .build()
            .unwrap();

        let mut generator = Generator::new(BaseKind::Flat);
        generator.set_world_seed(1).unwrap();
        generator.add_terrain_layer(layer).unwrap();

        for (x, z) in [(0, 0), (9, -3), (-77, 1234)] {
            let column = generator.generate_column(x, z);
            assert_eq!(column.get(65), BlockState::AIR, "({x}, {z})");
            assert_eq!(column.get(64), COVER, "({x}, {z})");
            for y in 61..=63 {
                assert_eq!(column.get(y), SURFACE, "({x}, {z}) y = {y}");
            }
            for y in 57..=60 {
                assert_eq!(column.get(y), FILLING, "({x}, {z}) y = {y}");
            }
            for y in 1..=56 {
                assert_eq!(column.get(y), BASE, "({x}, {z}) y = {y}");
            }
        }
    }

    #[test]
    fn test_heightmap_pinned_surface_keeps_base_above() {
        // Constant density 1 everywhere with the heightmap pinning the
        // surface at the layer midpoint: cells above the surface estimate
        // are solid but must emit the base block, not a band block.
        let material = TerrainMaterial::builder(0, BASE)
            .surface(2, SURFACE)
            .build()
            .unwrap();
        let layer = TerrainLayer::builder(0, 100, constant_noise(1.0))
            .heightmap(constant_noise(0.0))
            .material(material)
            .build()
            .unwrap();

        let mut generator = Generator::new(BaseKind::Flat);
        generator.set_world_seed(1).unwrap();
        generator.add_terrain_layer(layer).unwrap();

        let column = generator.generate_column(0, 0);
        assert_eq!(column.get(50), SURFACE, "cover falls back to surface");
        assert_eq!(column.get(49), SURFACE);
        assert_eq!(column.get(48), SURFACE);
        assert_eq!(column.get(47), BASE);
        assert_eq!(column.get(80), BASE, "solid above the surface is base");
        assert_eq!(column.get(100), BASE);
    }

    #[test]
    fn test_unresolved_material_keeps_base_blocks() {
        let gated = TerrainMaterial::builder(0, BASE)
            .activation(constant_noise(-1.0))
            .build()
            .unwrap();
        let layer = TerrainLayer::builder(0, 50, constant_noise(1.0))
            .material(gated)
            .build()
            .unwrap();

        let mut generator = Generator::new(BaseKind::Flat);
        generator.set_world_seed(1).unwrap();
        generator.add_terrain_layer(layer).unwrap();

        let column = generator.generate_column(0, 0);
        // Everything falls through to the flat prefill.
        assert_eq!(column.get(0), block_ids::BEDROCK);
        assert_eq!(column.get(3), block_ids::GRASS);
        assert_eq!(column.get(10), BlockState::AIR);
    }

    #[test]
    fn test_end_to_end_perlin_terrain() {
        let octave = NoiseOctave::builder(OctaveKind::Perlin)
            .uniform_scale(0.01)
            .weight(1.0)
            .build()
            .unwrap();
        let noise = NoiseGenerator::builder()
            .layer(NoiseLayer::builder().octave(octave).build())
            .build();
        // Steep ramp so the curve slope (0.125/block) dominates the noise
        // drift at scale 0.01 and the transition is monotonic.
        let curve = ConversionCurve::from_nodes(&[(0.0, 8.0), (1.0, -8.0)]).unwrap();
        let material = TerrainMaterial::builder(0, block_ids::STONE)
            .surface(1, block_ids::GRASS)
            .filling(4, block_ids::DIRT)
            .build()
            .unwrap();
        let layer = TerrainLayer::builder(0, 128, noise)
            .height_curve(curve)
            .material(material)
            .build()
            .unwrap();

        let mut generator = Generator::new(BaseKind::Flat);
        generator.set_world_seed(777).unwrap();
        generator.add_terrain_layer(layer).unwrap();

        for x in (0..200).step_by(40) {
            for z in (0..200).step_by(40) {
                let column = generator.generate_column(x, z);
                let top = column.top_solid().expect("column must have a surface") as i32;
                assert!(
                    (40..=90).contains(&top),
                    "surface at ({x}, {z}) out of expected range: {top}"
                );
                // Cover falls back to the surface block, which also fills
                // its one-block band below.
                assert_eq!(column.get(top as usize), block_ids::GRASS, "({x}, {z})");
                assert_eq!(column.get(top as usize - 1), block_ids::GRASS, "({x}, {z})");
                for y in (top - 5)..=(top - 2) {
                    assert_eq!(column.get(y as usize), block_ids::DIRT, "({x}, {z}) y = {y}");
                }
                for y in 0..=(top - 6) {
                    assert_eq!(
                        column.get(y as usize),
                        block_ids::STONE,
                        "({x}, {z}) y = {y}"
                    );
                }
                for y in (top + 1)..128 {
                    assert_eq!(
                        column.get(y as usize),
                        BlockState::AIR,
                        "({x}, {z}) y = {y}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_empty_model_generates_base_only() {
        let mut generator = Generator::new(BaseKind::End);
        generator
            .set_terrain_model(BiomeTerrainModel::new(9))
            .unwrap();
        let column = generator.generate_column(4, 4);
        assert_eq!(column.get(20), block_ids::END_STONE);
        assert_eq!(column.get(41), BlockState::AIR);
    }
}
