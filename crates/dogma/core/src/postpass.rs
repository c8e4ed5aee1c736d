//! Corrections applied after value resolution.
//!
//! Mutation multipliers run first so the propulsion correction reads mutated
//! module attributes.

use crate::config::EngineConfig;
use crate::env::AttributeCatalog;
use crate::fit::Fit;
use crate::ids::{AttributeId, InstanceId, attrs};
use crate::loadout::ModuleStatus;
use crate::resolve::ResolvedValues;

/// Runs every enabled correction over `values`.
pub fn post_pass(
    fit: &Fit,
    values: &mut ResolvedValues,
    catalog: &AttributeCatalog,
    config: &EngineConfig,
) {
    if !config.post_pass {
        return;
    }
    if config.apply_mutations {
        apply_mutations(fit, values);
    }
    apply_propulsion(fit, values, catalog, config);
}

/// Multiplies resolved module and drone attributes by their mutation
/// multipliers. Attributes the instance does not carry are ignored.
pub fn apply_mutations(fit: &Fit, values: &mut ResolvedValues) {
    for &id in fit.modules().iter().chain(fit.drones()) {
        let Some(mutations) = fit.get(id).and_then(|instance| instance.mutations()) else {
            continue;
        };
        let Some(resolved) = values.get_mut(&id) else {
            continue;
        };
        for (attribute, multiplier) in mutations {
            if let Some(value) = resolved.get_mut(attribute) {
                *value *= multiplier;
            }
        }
    }
}

/// First module, in fit order, that is at least active and carries a
/// propulsion effect.
pub fn propulsion_module(fit: &Fit, config: &EngineConfig) -> Option<InstanceId> {
    fit.modules().iter().copied().find(|&id| {
        fit.get(id).is_some_and(|module| {
            module
                .module_status()
                .is_some_and(|status| status.satisfies(ModuleStatus::Active))
                && module
                    .effects
                    .iter()
                    .any(|&effect| config.is_propulsion_effect(effect))
        })
    })
}

/// Scales the hull's resolved max velocity by the boost of the selected
/// propulsion module, corrected by the hull's resolved mass.
pub fn apply_propulsion(
    fit: &Fit,
    values: &mut ResolvedValues,
    catalog: &AttributeCatalog,
    config: &EngineConfig,
) {
    let Some(module) = propulsion_module(fit, config) else {
        return;
    };

    let read = |values: &ResolvedValues, id: InstanceId, attribute: AttributeId| {
        values
            .get(&id)
            .and_then(|resolved| resolved.get(&attribute))
            .copied()
            .unwrap_or_else(|| catalog.default_value(attribute))
    };

    let hull = fit.hull();
    let mass = read(values, hull, attrs::MASS);
    if mass == 0.0 {
        tracing::warn!(%module, "hull mass is zero; skipping propulsion correction");
        return;
    }

    let boost = read(values, module, attrs::SPEED_BOOST_FACTOR)
        * read(values, module, attrs::SPEED_FACTOR)
        / mass;

    if let Some(velocity) = values
        .get_mut(&hull)
        .and_then(|resolved| resolved.get_mut(&attrs::MAX_VELOCITY))
    {
        *velocity *= 1.0 + boost / 100.0;
        tracing::debug!(%module, boost, velocity = *velocity, "applied propulsion correction");
    }
}
