//! Loadout loader.

use std::path::Path;

use dogma_core::Loadout;

use crate::loaders::{LoadResult, read_file};

/// Loader for loadouts from RON files.
pub struct LoadoutLoader;

impl LoadoutLoader {
    /// Load a loadout from a RON file.
    pub fn load(path: &Path) -> LoadResult<Loadout> {
        let content = read_file(path)?;
        let loadout: Loadout = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse loadout RON: {}", e))?;
        Ok(loadout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dogma_core::{AttributeId, ModuleStatus, SlotFlag, TypeId};
    use tempfile::TempDir;

    #[test]
    fn test_load_loadout() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rifter.ron");
        std::fs::write(
            &path,
            r#"(
                hull: 587,
                pilot: (skills: {3449: 5}),
                modules: [
                    (type_id: 439, slot: medium, status: active),
                    (type_id: 2873, slot: high, charge: Some((type_id: 178, quantity: 100))),
                    (type_id: 1999, slot: low, mutated_attributes: {20: 1.1}),
                ],
                drones: [(type_id: 2486, quantity: 2)],
            )"#,
        )
        .unwrap();

        let loadout = LoadoutLoader::load(&path).unwrap();
        assert_eq!(loadout.hull, TypeId(587));
        assert_eq!(loadout.pilot.skills[&TypeId(3449)], 5);
        assert_eq!(loadout.modules.len(), 3);
        assert_eq!(loadout.modules[0].status, ModuleStatus::Active);
        assert_eq!(loadout.modules[1].slot, SlotFlag::High);
        assert_eq!(loadout.modules[1].status, ModuleStatus::Online);
        assert_eq!(loadout.modules[1].charge.unwrap().quantity, 100);
        assert_eq!(loadout.modules[2].mutated_attributes[&AttributeId(20)], 1.1);
        assert_eq!(loadout.drones[0].quantity, 2);
        assert!(loadout.fighters.is_empty());
    }
}
