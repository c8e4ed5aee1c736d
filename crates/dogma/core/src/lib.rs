//! Deterministic attribute engine for simulated ship loadouts.
//!
//! `dogma-core` computes the final, post-modifier attributes of a loadout
//! (hull, pilot, modules with charges, drones, fighters, implants, skills)
//! from read-only reference data. It performs no I/O: reference data arrives
//! through the oracle traits in [`env`], and every run is a pure function of
//! its input.
//!
//! The pipeline lives in [`engine::DogmaEngine`]; its stages are public for
//! tools and tests:
//! [`collect()`] → [`parse_effects`] → [`apply_modifiers`] → [`Resolver`] →
//! [`post_pass`]
pub mod apply;
pub mod collect;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod fit;
pub mod ids;
pub mod loadout;
pub mod modifier;
pub mod output;
pub mod postpass;
pub mod resolve;

pub use apply::{apply_modifiers, resolve_targets};
pub use collect::{Collected, collect};
pub use config::EngineConfig;
pub use engine::DogmaEngine;
pub use env::{
    AggregateMode, AttributeCatalog, AttributeDefinition, AttributeOracle, DbuffOracle, DbuffRow,
    DogmaEnv, EffectCategory, EffectDefinition, EffectFlags, EffectOracle, Env, OracleError,
    OracleSnapshot, TypeAttributeRow, TypeEffectRow, TypeInfo, TypeOracle,
};
pub use error::{DogmaError, ErrorSeverity, SimulationError};
pub use fit::{AppliedModifier, Fit, Instance, ItemKind};
pub use ids::{AttributeId, CategoryId, DbuffId, EffectId, GroupId, InstanceId, TypeId, attrs};
pub use loadout::{
    ChargeSpec, DroneSpec, FighterSpec, Loadout, ModuleSpec, ModuleStatus, MutatedAttributes,
    PilotSpec, SlotFlag,
};
pub use modifier::{Domain, Modifier, ModifierParseError, Operation, parse_effects};
pub use output::{
    ResolvedCharge, ResolvedItem, ResolvedModule, ResolvedSkill, ResolvedSquad, SimulationOutput,
};
pub use postpass::post_pass;
pub use resolve::{ResolvedValues, Resolver};
