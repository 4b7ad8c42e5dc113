//! Dimension registry: binds configured generators to dimension ids and
//! runs the mod-generation column editor hook.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use strata_voxel::ColumnBlocks;

use crate::error::RegistryError;
use crate::generator::Generator;

/// Post-generation hook: the mod-generation callback host boundary.
///
/// Invoked after material resolution with a mutable view of the generated
/// column; the implementor may overwrite any block.
pub trait ColumnEditor: Send + Sync {
    fn edit_column(&self, x: i32, z: i32, column: &mut ColumnBlocks);
}

/// Maps dimension ids to their generators and column editors.
///
/// Registration happens during single-threaded setup; afterwards the
/// registry is read-only and `generate_column` may be called from any
/// thread.
#[derive(Default)]
pub struct DimensionRegistry {
    generators: FxHashMap<i32, Arc<Generator>>,
    editors: FxHashMap<i32, Arc<dyn ColumnEditor>>,
}

impl DimensionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a generator to a dimension id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateDimension`] if the id is taken.
    pub fn register(
        &mut self,
        dimension: i32,
        generator: Arc<Generator>,
    ) -> Result<(), RegistryError> {
        if self.generators.contains_key(&dimension) {
            return Err(RegistryError::DuplicateDimension(dimension));
        }
        self.generators.insert(dimension, generator);
        Ok(())
    }

    /// Registers the column editor serving mod generation for a base
    /// dimension id. Replaces any previous editor under the same id.
    pub fn register_editor(&mut self, base_dimension: i32, editor: Arc<dyn ColumnEditor>) {
        self.editors.insert(base_dimension, editor);
    }

    /// Returns the generator bound to a dimension, if any.
    pub fn generator(&self, dimension: i32) -> Option<&Arc<Generator>> {
        self.generators.get(&dimension)
    }

    /// Generates one column in the given dimension, then lets the
    /// mod-generation editor (if the generator opted into one) post-edit
    /// it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownDimension`] if no generator is
    /// bound to `dimension`.
    pub fn generate_column(
        &self,
        dimension: i32,
        x: i32,
        z: i32,
    ) -> Result<ColumnBlocks, RegistryError> {
        let generator = self
            .generators
            .get(&dimension)
            .ok_or(RegistryError::UnknownDimension(dimension))?;
        let mut column = generator.generate_column(x, z);

        let base = generator.mod_generation_base_dimension();
        if base >= 0
            && let Some(editor) = self.editors.get(&base)
        {
            editor.edit_column(x, z, &mut column);
        }
        Ok(column)
    }
}
