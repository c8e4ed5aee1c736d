//! `dogma` binary.
//!
//! Computes the final attributes of one loadout against the reference data in
//! the data directory.
//!
//! ```bash
//! # Named loadout under data/loadouts/
//! DOGMA_DATA_DIR=./data cargo run -p dogma-client -- rifter
//!
//! # Explicit file, summary output
//! DOGMA_OUTPUT=summary cargo run -p dogma-client -- ./my_fit.ron
//! ```

use anyhow::Result;
use dogma_client::{ClientConfig, logging};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env().with_loadout_arg(std::env::args().nth(1));
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    tracing::info!("Starting dogma");
    tracing::info!("Data directory: {}", config.data_dir.display());
    tracing::info!("Loadout: {}", config.loadout_or_default());

    let stdout = std::io::stdout();
    dogma_client::run(&config, &mut stdout.lock())
}
