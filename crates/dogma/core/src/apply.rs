//! Modifier applicator.
//!
//! Expands every parsed modifier's domain into concrete target instances and
//! attaches an [`AppliedModifier`] edge to the targeted attribute. No value is
//! computed here.

use crate::config::EngineConfig;
use crate::env::AttributeCatalog;
use crate::fit::{AppliedModifier, Attribute, Fit};
use crate::ids::InstanceId;
use crate::modifier::{Domain, Modifier, ModifierIndex};

/// Instances a modifier owned by `source` resolves to, in arena order.
pub fn resolve_targets(fit: &Fit, source: InstanceId, modifier: &Modifier) -> Vec<InstanceId> {
    let Some(owner) = fit.get(source) else {
        return Vec::new();
    };

    match modifier.domain {
        Domain::Item => vec![source],
        Domain::Ship => vec![fit.hull()],
        Domain::Pilot => vec![fit.pilot()],
        Domain::Other => owner
            .charge()
            .or_else(|| owner.parent_module())
            .into_iter()
            .collect(),
        Domain::Location => fit.ids().collect(),
        Domain::LocationGroup(group) => fit
            .iter()
            .filter(|instance| instance.group_id == group)
            .map(|instance| instance.id)
            .collect(),
        Domain::RequiredSkill(skill) => {
            let skill = skill.resolve(modifier.source_type);
            fit.iter()
                .filter(|instance| instance.requires_skill(skill))
                .map(|instance| instance.id)
                .collect()
        }
    }
}

/// Attaches every modifier of every instance to its targets.
///
/// Returns the number of edges attached.
pub fn apply_modifiers(
    fit: &mut Fit,
    index: &ModifierIndex,
    catalog: &AttributeCatalog,
    config: &EngineConfig,
) -> usize {
    let mut attached = 0;
    let sources: Vec<InstanceId> = fit.ids().collect();

    for source in sources {
        let Some(owner) = fit.get(source) else {
            continue;
        };
        let exempt_source = config.is_stacking_exempt(owner.category_id);
        let modifiers = index.for_type(owner.type_id);

        for modifier in modifiers {
            let penalized = (!catalog.is_stackable(modifier.modified_attribute) && !exempt_source)
                || modifier.is_dbuff();
            let edge = AppliedModifier {
                source,
                source_attribute: modifier.modifying_attribute,
                operation: modifier.operation,
                effect: modifier.effect,
                category: modifier.category,
                penalized,
                dbuff: modifier.dbuff,
            };

            for target in resolve_targets(fit, source, modifier) {
                if attach(fit, target, modifier, edge, catalog) {
                    attached += 1;
                }
            }
        }
    }

    tracing::debug!(edges = attached, "applied modifiers");
    attached
}

/// Attaches `edge` to `target` when the target declares the attribute.
///
/// Assign operations seed a missing attribute with its catalog default first.
fn attach(
    fit: &mut Fit,
    target: InstanceId,
    modifier: &Modifier,
    edge: AppliedModifier,
    catalog: &AttributeCatalog,
) -> bool {
    let Some(instance) = fit.get_mut(target) else {
        return false;
    };
    let attribute = modifier.modified_attribute;

    if !instance.has_attribute(attribute) {
        if !modifier.operation.is_assign() {
            return false;
        }
        instance
            .attributes
            .insert(attribute, Attribute::new(catalog.default_value(attribute)));
    }

    if let Some(slot) = instance.attributes.get_mut(&attribute) {
        slot.modifiers.push(edge);
        true
    } else {
        false
    }
}
