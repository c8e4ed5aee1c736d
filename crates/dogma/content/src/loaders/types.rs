//! Item type loader.
//!
//! A type entry bundles what reference data spreads over three tables: the
//! type row itself, its attribute values, and its effect links.

use std::collections::BTreeMap;
use std::path::Path;

use dogma_core::{
    AttributeId, CategoryId, EffectId, GroupId, OracleSnapshot, TypeEffectRow, TypeId, TypeInfo,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One item type as written in `types.ron`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeEntry {
    pub type_id: TypeId,
    pub name: String,
    pub group_id: GroupId,
    pub category_id: CategoryId,
    #[serde(default)]
    pub mass: Option<f64>,
    #[serde(default)]
    pub capacity: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub attributes: BTreeMap<AttributeId, f64>,
    #[serde(default)]
    pub effects: Vec<EffectId>,
}

impl TypeEntry {
    fn info(&self) -> TypeInfo {
        TypeInfo {
            type_id: self.type_id,
            name: self.name.clone(),
            group_id: self.group_id,
            category_id: self.category_id,
            mass: self.mass,
            capacity: self.capacity,
            volume: self.volume,
        }
    }
}

/// Type table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeTable {
    pub types: Vec<TypeEntry>,
}

/// Loader for item types from RON files.
pub struct TypeLoader;

impl TypeLoader {
    /// Load type entries from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<TypeEntry>> {
        let content = read_file(path)?;
        let table: TypeTable = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse type table RON: {}", e))?;
        Ok(table.types)
    }

    /// Flatten type entries into the type, attribute and effect-link tables
    /// of a snapshot.
    pub fn into_snapshot(entries: Vec<TypeEntry>) -> OracleSnapshot {
        let mut snapshot = OracleSnapshot::new();
        for entry in entries {
            let attributes: Vec<(AttributeId, f64)> =
                entry.attributes.iter().map(|(&id, &value)| (id, value)).collect();
            snapshot.add_type(entry.info(), &attributes);
            snapshot
                .type_effects
                .extend(entry.effects.iter().map(|&effect_id| TypeEffectRow {
                    type_id: entry.type_id,
                    effect_id,
                    is_default: false,
                }));
        }
        snapshot
    }
}
