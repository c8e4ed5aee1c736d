//! Composition root for the `dogma` binary.
//!
//! ```text
//! ClientConfig (env + argv)
//!   ├─→ ContentFactory   (reference data, engine config, loadout)
//!   ├─→ DogmaEngine      (one simulation run)
//!   └─→ render           (JSON or summary, then digest)
//! ```

pub mod config;
pub mod logging;
pub mod render;

pub use config::{ClientConfig, OutputFormat};

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use dogma_content::{ContentFactory, LoadoutLoader};
use dogma_core::{DogmaEngine, DogmaEnv, DogmaError, Loadout, SimulationOutput};

/// Resolves a loadout argument: a path to an existing RON file, or a name
/// under the data directory's `loadouts/`.
pub fn load_loadout(factory: &ContentFactory, loadout: &str) -> Result<Loadout> {
    let path = Path::new(loadout);
    if path.extension().is_some_and(|ext| ext == "ron") && path.is_file() {
        return LoadoutLoader::load(path);
    }
    factory.load_loadout(loadout)
}

/// Loads content from `config.data_dir` and simulates the configured loadout.
pub fn simulate(config: &ClientConfig) -> Result<SimulationOutput> {
    let factory = ContentFactory::new(&config.data_dir);

    let snapshot = factory
        .load_snapshot()
        .with_context(|| format!("loading reference data from {}", config.data_dir.display()))?;
    let engine_config = factory.load_config()?;
    tracing::info!(
        types = snapshot.types.len(),
        attributes = snapshot.attributes.len(),
        effects = snapshot.effects.len(),
        dbuffs = snapshot.dbuffs.len(),
        "Reference data loaded"
    );

    let loadout = load_loadout(&factory, config.loadout_or_default())
        .with_context(|| format!("loading loadout {}", config.loadout_or_default()))?;

    let env = DogmaEnv::from_snapshot(&snapshot);
    let output = DogmaEngine::from_env(&env, engine_config)
        .and_then(|engine| engine.simulate(&env, &loadout))
        .inspect_err(|err| {
            tracing::error!(code = err.error_code(), severity = %err.severity(), "{}", err);
        })?;
    tracing::info!(items = output.items().count(), "Simulation complete");

    Ok(output)
}

/// Runs one simulation and writes the result to `out`.
pub fn run(config: &ClientConfig, out: &mut impl Write) -> Result<()> {
    let output = simulate(config)?;
    render::render(&output, config.output, out)
}
