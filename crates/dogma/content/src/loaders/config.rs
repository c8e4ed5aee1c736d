//! Engine configuration loader.

use std::path::Path;

use dogma_core::EngineConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`EngineConfig`] from TOML files.
///
/// Every key is optional; omitted keys keep their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load engine configuration from a TOML file.
    pub fn load(path: &Path) -> LoadResult<EngineConfig> {
        let content = read_file(path)?;
        let config: EngineConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Ok(config)
    }

    /// Like [`ConfigLoader::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> LoadResult<EngineConfig> {
        if !path.exists() {
            return Ok(EngineConfig::default());
        }
        Self::load(path)
    }
}
