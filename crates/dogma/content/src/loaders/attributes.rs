//! Attribute definition loader.

use std::path::Path;

use dogma_core::AttributeDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Attribute table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeTable {
    pub attributes: Vec<AttributeDefinition>,
}

/// Loader for attribute definitions from RON files.
pub struct AttributeLoader;

impl AttributeLoader {
    /// Load attribute definitions from a RON file.
    ///
    /// Ids must be unique; a duplicate usually means two rows were merged by
    /// hand and one of them silently shadows the other.
    pub fn load(path: &Path) -> LoadResult<Vec<AttributeDefinition>> {
        let content = read_file(path)?;
        let table: AttributeTable = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse attribute table RON: {}", e))?;

        let mut seen = std::collections::BTreeSet::new();
        for definition in &table.attributes {
            if !seen.insert(definition.attribute_id) {
                anyhow::bail!(
                    "Duplicate attribute id {} ({}) in {}",
                    definition.attribute_id.get(),
                    definition.name,
                    path.display()
                );
            }
        }

        Ok(table.attributes)
    }
}
