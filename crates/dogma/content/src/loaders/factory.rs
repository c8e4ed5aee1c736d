//! Content factory for loading reference data from a data directory.

use std::path::{Path, PathBuf};

use dogma_core::{
    AttributeDefinition, DbuffRow, EffectDefinition, EngineConfig, Loadout, OracleSnapshot,
};

use crate::loaders::{
    AttributeLoader, ConfigLoader, DbuffLoader, EffectLoader, LoadResult, LoadoutLoader,
    TypeEntry, TypeLoader,
};

/// Content factory that loads every data file from a base directory.
///
/// Layout:
/// ```text
/// data/
///   attributes.ron
///   types.ron
///   effects.ron
///   dbuffs.ron        (optional)
///   config.toml       (optional)
///   loadouts/<name>.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Create a new content factory with the given data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load attribute definitions from `attributes.ron`.
    pub fn load_attributes(&self) -> LoadResult<Vec<AttributeDefinition>> {
        AttributeLoader::load(&self.data_dir.join("attributes.ron"))
    }

    /// Load item types from `types.ron`.
    pub fn load_types(&self) -> LoadResult<Vec<TypeEntry>> {
        TypeLoader::load(&self.data_dir.join("types.ron"))
    }

    /// Load effect definitions from `effects.ron`.
    pub fn load_effects(&self) -> LoadResult<Vec<EffectDefinition>> {
        EffectLoader::load(&self.data_dir.join("effects.ron"))
    }

    /// Load dbuff collections from `dbuffs.ron`, if present.
    pub fn load_dbuffs(&self) -> LoadResult<Vec<DbuffRow>> {
        DbuffLoader::load_optional(&self.data_dir.join("dbuffs.ron"))
    }

    /// Load engine configuration from `config.toml`, if present.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        ConfigLoader::load_or_default(&self.data_dir.join("config.toml"))
    }

    /// Load every reference table into one snapshot.
    pub fn load_snapshot(&self) -> LoadResult<OracleSnapshot> {
        let mut snapshot = TypeLoader::into_snapshot(self.load_types()?);
        snapshot.attributes = self.load_attributes()?;
        snapshot.effects = self.load_effects()?;
        snapshot.dbuffs = self.load_dbuffs()?;
        Ok(snapshot)
    }

    /// Load `loadouts/<name>.ron`.
    pub fn load_loadout(&self, name: &str) -> LoadResult<Loadout> {
        LoadoutLoader::load(&self.loadout_path(name))
    }

    /// Path a named loadout is read from.
    pub fn loadout_path(&self, name: &str) -> PathBuf {
        self.data_dir.join("loadouts").join(format!("{name}.ron"))
    }

    /// Get the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
