//! Simulation output.
//!
//! The output mirrors the loadout's shape: one entry per input item, each
//! carrying its fully resolved attribute map by id and by canonical name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::env::AttributeCatalog;
use crate::fit::{Fit, Instance, ItemKind};
use crate::ids::{AttributeId, CategoryId, EffectId, GroupId, InstanceId, TypeId, attrs};
use crate::loadout::{ModuleStatus, SlotFlag};
use crate::resolve::ResolvedValues;

/// One resolved item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolvedItem {
    pub type_id: TypeId,
    pub name: Option<String>,
    pub group_id: GroupId,
    pub category_id: CategoryId,
    pub effects: Vec<EffectId>,
    pub attributes: BTreeMap<AttributeId, f64>,
    pub attributes_by_name: BTreeMap<String, f64>,
}

impl ResolvedItem {
    fn build(instance: &Instance, values: &ResolvedValues, catalog: &AttributeCatalog) -> Self {
        let attributes = values.get(&instance.id).cloned().unwrap_or_default();
        let attributes_by_name = attributes
            .iter()
            .map(|(&id, &value)| (attribute_name(catalog, id), value))
            .collect();

        Self {
            type_id: instance.type_id,
            name: instance.name.clone(),
            group_id: instance.group_id,
            category_id: instance.category_id,
            effects: instance.effects.clone(),
            attributes,
            attributes_by_name,
        }
    }

    fn empty(type_id: TypeId) -> Self {
        Self {
            type_id,
            name: None,
            group_id: GroupId::default(),
            category_id: CategoryId::default(),
            effects: Vec::new(),
            attributes: BTreeMap::new(),
            attributes_by_name: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn attribute(&self, id: AttributeId) -> Option<f64> {
        self.attributes.get(&id).copied()
    }

    pub fn attribute_by_name(&self, name: &str) -> Option<f64> {
        self.attributes_by_name.get(name).copied()
    }
}

/// Canonical attribute name, with fallbacks for the physical properties that
/// reference data carries outside the attribute table.
fn attribute_name(catalog: &AttributeCatalog, id: AttributeId) -> String {
    if let Some(definition) = catalog.get(id) {
        return definition.name.clone();
    }
    match id {
        attrs::MASS => attrs::MASS_NAME.to_string(),
        attrs::CAPACITY => attrs::CAPACITY_NAME.to_string(),
        attrs::VOLUME => attrs::VOLUME_NAME.to_string(),
        attrs::SKILL_LEVEL => attrs::SKILL_LEVEL_NAME.to_string(),
        _ => catalog.name(id),
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolvedCharge {
    pub item: ResolvedItem,
    pub quantity: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolvedModule {
    pub item: ResolvedItem,
    pub slot: SlotFlag,
    pub quantity: u32,
    pub status: ModuleStatus,
    pub charge: Option<ResolvedCharge>,
}

/// A drone stack or fighter squadron.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSquad {
    pub item: ResolvedItem,
    pub quantity: u32,
    pub status: ModuleStatus,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSkill {
    pub item: ResolvedItem,
    pub level: u8,
}

/// Result of one simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub hull: ResolvedItem,
    pub pilot: ResolvedItem,
    pub modules: Vec<ResolvedModule>,
    pub drones: Vec<ResolvedSquad>,
    pub fighters: Vec<ResolvedSquad>,
    pub implants: Vec<ResolvedItem>,
    pub skills: Vec<ResolvedSkill>,
}

impl SimulationOutput {
    /// Assembles the output from a fit and its final values.
    pub fn build(fit: &Fit, values: &ResolvedValues, catalog: &AttributeCatalog) -> Self {
        let item = |id: InstanceId| {
            fit.get(id)
                .map(|instance| (instance, ResolvedItem::build(instance, values, catalog)))
        };

        let single = |id: InstanceId| {
            item(id)
                .map(|(_, resolved)| resolved)
                .unwrap_or_else(|| ResolvedItem::empty(TypeId::default()))
        };

        let modules = fit
            .modules()
            .iter()
            .filter_map(|&id| item(id))
            .filter_map(|(instance, item_out)| match &instance.kind {
                ItemKind::Module(state) => Some(ResolvedModule {
                    item: item_out,
                    slot: state.slot,
                    quantity: state.quantity,
                    status: state.status,
                    charge: state.charge.and_then(|charge| {
                        let (charge_instance, charge_item) = item(charge)?;
                        match charge_instance.kind {
                            ItemKind::Charge { quantity, .. } => Some(ResolvedCharge {
                                item: charge_item,
                                quantity,
                            }),
                            _ => None,
                        }
                    }),
                }),
                _ => None,
            })
            .collect();

        let squads = |ids: &[InstanceId]| -> Vec<ResolvedSquad> {
            ids.iter()
                .filter_map(|&id| item(id))
                .filter_map(|(instance, item_out)| {
                    let (quantity, status) = match &instance.kind {
                        ItemKind::Drone(drone) => (drone.quantity, drone.status),
                        ItemKind::Fighter { quantity, status } => (*quantity, *status),
                        _ => return None,
                    };
                    Some(ResolvedSquad {
                        item: item_out,
                        quantity,
                        status,
                    })
                })
                .collect()
        };

        let skills = fit
            .skills()
            .iter()
            .filter_map(|&id| item(id))
            .filter_map(|(instance, item_out)| match instance.kind {
                ItemKind::Skill { level } => Some(ResolvedSkill {
                    item: item_out,
                    level,
                }),
                _ => None,
            })
            .collect();

        Self {
            hull: single(fit.hull()),
            pilot: single(fit.pilot()),
            modules,
            drones: squads(fit.drones()),
            fighters: squads(fit.fighters()),
            implants: fit
                .implants()
                .iter()
                .filter_map(|&id| item(id).map(|(_, item_out)| item_out))
                .collect(),
            skills,
        }
    }

    /// Resolved hull attribute.
    pub fn hull_attribute(&self, id: AttributeId) -> Option<f64> {
        self.hull.attribute(id)
    }

    /// Every item in arena order: hull, pilot, modules each followed by its
    /// charge, drones, fighters, implants, skills.
    pub fn items(&self) -> impl Iterator<Item = &ResolvedItem> {
        std::iter::once(&self.hull)
            .chain(std::iter::once(&self.pilot))
            .chain(self.modules.iter().flat_map(|module| {
                std::iter::once(&module.item).chain(module.charge.as_ref().map(|charge| &charge.item))
            }))
            .chain(self.drones.iter().map(|drone| &drone.item))
            .chain(self.fighters.iter().map(|fighter| &fighter.item))
            .chain(self.implants.iter())
            .chain(self.skills.iter().map(|skill| &skill.item))
    }

    /// SHA-256 over every resolved value's bit pattern, in arena order.
    ///
    /// Two runs over identical input yield identical digests.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        for item in self.items() {
            hasher.update(item.type_id.get().to_le_bytes());
            hasher.update((item.attributes.len() as u64).to_le_bytes());
            for (id, value) in &item.attributes {
                hasher.update(id.get().to_le_bytes());
                hasher.update(value.to_bits().to_le_bytes());
            }
        }
        hasher.finalize().into()
    }
}
