//! Effect definition loader.
//!
//! Modifier descriptions stay as the raw JSON text reference data ships;
//! dogma-core parses them during simulation so that one malformed entry only
//! drops itself.

use std::path::Path;

use dogma_core::EffectDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Effect table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectTable {
    pub effects: Vec<EffectDefinition>,
}

/// Loader for effect definitions from RON files.
pub struct EffectLoader;

impl EffectLoader {
    /// Load effect definitions from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<EffectDefinition>> {
        let content = read_file(path)?;
        let table: EffectTable = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse effect table RON: {}", e))?;
        Ok(table.effects)
    }
}
