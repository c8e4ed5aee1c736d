//! Simulation pipeline.
//!
//! [`DogmaEngine`] runs the stages strictly in sequence:
//! collect → parse → apply → resolve → post-pass
//!
//! The engine holds only batch-wide read-only data (the attribute catalog and
//! the configuration). Every run builds its own arena and cache, so one engine
//! can serve any number of runs, including concurrent ones.

use crate::apply::apply_modifiers;
use crate::collect::collect;
use crate::config::EngineConfig;
use crate::env::{AttributeCatalog, AttributeOracle, DbuffOracle, EffectOracle, Env, TypeOracle};
use crate::error::SimulationError;
use crate::loadout::Loadout;
use crate::modifier::parse_effects;
use crate::output::SimulationOutput;
use crate::postpass::post_pass;
use crate::resolve::Resolver;

/// Rules engine computing the final attributes of a loadout.
#[derive(Clone, Debug)]
pub struct DogmaEngine {
    catalog: AttributeCatalog,
    config: EngineConfig,
}

impl DogmaEngine {
    pub fn new(catalog: AttributeCatalog, config: EngineConfig) -> Self {
        Self { catalog, config }
    }

    /// Builds the attribute catalog from the environment's attribute oracle.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Oracle`] when `env` has no attribute oracle.
    pub fn from_env<T, E, A, D>(
        env: &Env<'_, T, E, A, D>,
        config: EngineConfig,
    ) -> Result<Self, SimulationError>
    where
        T: TypeOracle + ?Sized,
        E: EffectOracle + ?Sized,
        A: AttributeOracle + ?Sized,
        D: DbuffOracle + ?Sized,
    {
        let catalog = AttributeCatalog::new(env.attributes()?.attribute_definitions());
        Ok(Self::new(catalog, config))
    }

    pub fn catalog(&self) -> &AttributeCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs one simulation of `loadout` against the reference data in `env`.
    ///
    /// # Errors
    ///
    /// Fails only when a required oracle is missing. Data problems (unknown
    /// type ids, malformed modifiers, missing attributes) degrade instead.
    pub fn simulate<T, E, A, D>(
        &self,
        env: &Env<'_, T, E, A, D>,
        loadout: &Loadout,
    ) -> Result<SimulationOutput, SimulationError>
    where
        T: TypeOracle + ?Sized,
        E: EffectOracle + ?Sized,
        A: AttributeOracle + ?Sized,
        D: DbuffOracle + ?Sized,
    {
        let _span = tracing::debug_span!("simulate", hull = %loadout.hull).entered();

        let mut collected = {
            let _stage = tracing::debug_span!("collect").entered();
            collect(env, loadout, &self.config)?
        };

        let index = {
            let _stage = tracing::debug_span!("parse").entered();
            parse_effects(collected.effect_lists(), &collected.effects, &collected.dbuffs)
        };

        {
            let _stage = tracing::debug_span!("apply").entered();
            apply_modifiers(&mut collected.fit, &index, &self.catalog, &self.config);
        }

        let fit = &collected.fit;
        let mut values = {
            let _stage = tracing::debug_span!("resolve").entered();
            Resolver::new(fit, &self.catalog).resolve_all()
        };

        {
            let _stage = tracing::debug_span!("post_pass").entered();
            post_pass(fit, &mut values, &self.catalog, &self.config);
        }

        Ok(SimulationOutput::build(fit, &values, &self.catalog))
    }
}
