//! Warfare-buff collection loader.

use std::path::Path;

use dogma_core::DbuffRow;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Dbuff table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbuffTable {
    pub dbuffs: Vec<DbuffRow>,
}

/// Loader for dbuff collections from RON files.
pub struct DbuffLoader;

impl DbuffLoader {
    /// Load dbuff rows from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<DbuffRow>> {
        let content = read_file(path)?;
        let table: DbuffTable = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse dbuff table RON: {}", e))?;
        Ok(table.dbuffs)
    }

    /// Like [`DbuffLoader::load`], but a missing file means no dbuffs.
    pub fn load_optional(path: &Path) -> LoadResult<Vec<DbuffRow>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        Self::load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dogma_core::{AggregateMode, DbuffId, TypeId};
    use tempfile::TempDir;

    #[test]
    fn test_load_dbuffs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dbuffs.ron");
        std::fs::write(
            &path,
            r##"(
                dbuffs: [
                    (
                        type_id: 42526,
                        dbuff_id: 10,
                        aggregate_mode: Maximum,
                        modifier_info: r#"[{"func": "ItemModifier", "domain": "shipID", "modifiedAttributeID": 37, "modifyingAttributeID": 2468, "operation": 6}]"#,
                    ),
                    (type_id: 42527, dbuff_id: 11, modifier_info: "[]"),
                ],
            )"##,
        )
        .unwrap();

        let rows = DbuffLoader::load(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].type_id, TypeId(42526));
        assert_eq!(rows[0].dbuff_id, DbuffId(10));
        assert_eq!(rows[0].aggregate_mode, AggregateMode::Maximum);
        assert_eq!(rows[1].aggregate_mode, AggregateMode::Default);
    }

    #[test]
    fn test_optional_file_may_be_absent() {
        let temp_dir = TempDir::new().unwrap();
        let rows = DbuffLoader::load_optional(&temp_dir.path().join("dbuffs.ron")).unwrap();
        assert!(rows.is_empty());
    }
}
