//! Data-driven reference data and loadout loaders.
//!
//! This crate reads the files that feed the engine:
//! - Attribute definitions (RON)
//! - Item types with their attribute tables and effect links (RON)
//! - Effect definitions carrying JSON modifier descriptions (RON)
//! - Warfare-buff collections (RON, optional)
//! - Engine configuration (TOML, optional)
//! - Loadouts (RON)
//!
//! Everything is decoded straight into dogma-core types and bundled into an
//! [`dogma_core::OracleSnapshot`] that implements every oracle trait.

pub mod loaders;

pub use loaders::{
    AttributeLoader, ConfigLoader, ContentFactory, DbuffLoader, EffectLoader, LoadResult,
    LoadoutLoader, TypeEntry, TypeLoader,
};
