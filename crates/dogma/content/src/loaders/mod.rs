//! Content loaders for reading reference data from files.
//!
//! Each loader converts one RON/TOML file into dogma-core types;
//! [`ContentFactory`] ties them to a data directory.

pub mod attributes;
pub mod config;
pub mod dbuffs;
pub mod effects;
pub mod factory;
pub mod loadout;
pub mod types;

pub use attributes::AttributeLoader;
pub use config::ConfigLoader;
pub use dbuffs::DbuffLoader;
pub use effects::EffectLoader;
pub use factory::ContentFactory;
pub use loadout::LoadoutLoader;
pub use types::{TypeEntry, TypeLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
