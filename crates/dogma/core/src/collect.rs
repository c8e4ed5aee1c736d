//! Collector: turns a [`Loadout`] into a populated [`Fit`].
//!
//! Reference data is fetched with one batched query per oracle method over the
//! full set of participating type ids. Unknown type ids degrade to empty
//! instances instead of failing the run.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::EngineConfig;
use crate::env::{
    AttributeOracle, DbuffOracle, EffectCategory, EffectDefinition, EffectFlags, EffectOracle, Env,
    TypeInfo, TypeOracle,
};
use crate::error::SimulationError;
use crate::fit::{
    Attribute, DbuffTag, DroneState, Fit, Instance, ItemKind, ModuleState, RequiredSkills,
};
use crate::ids::{AttributeId, CategoryId, EffectId, GroupId, InstanceId, TypeId, attrs};
use crate::loadout::Loadout;

/// Output of the collector stage.
#[derive(Clone, Debug)]
pub struct Collected {
    pub fit: Fit,
    /// Effect ids per participating type, dbuff effects included.
    pub type_effects: BTreeMap<TypeId, Vec<EffectId>>,
    /// Definitions of every referenced effect, synthetic dbuff effects included.
    pub effects: BTreeMap<EffectId, EffectDefinition>,
    /// Dbuff identity of each synthetic dbuff effect.
    pub dbuffs: BTreeMap<EffectId, DbuffTag>,
}

impl Collected {
    /// `(type, effects)` pairs in type id order, ready for the parser.
    pub fn effect_lists(&self) -> impl Iterator<Item = (TypeId, &[EffectId])> {
        self.type_effects
            .iter()
            .map(|(&type_id, effects)| (type_id, effects.as_slice()))
    }
}

/// Every type id the loadout references, the pilot type included.
pub fn participating_types(loadout: &Loadout, config: &EngineConfig) -> BTreeSet<TypeId> {
    let mut ids = BTreeSet::new();
    ids.insert(loadout.hull);
    ids.insert(config.pilot_type_id);
    for module in &loadout.modules {
        ids.insert(module.type_id);
        if let Some(charge) = &module.charge {
            ids.insert(charge.type_id);
        }
    }
    ids.extend(loadout.drones.iter().map(|drone| drone.type_id));
    ids.extend(loadout.fighters.iter().map(|fighter| fighter.type_id));
    ids.extend(loadout.implants.iter().copied());
    ids.extend(loadout.pilot.skills.keys().copied());
    ids
}

/// Reference data of every participating type, keyed by type id.
#[derive(Default)]
struct TypeTable {
    infos: BTreeMap<TypeId, TypeInfo>,
    attributes: BTreeMap<TypeId, BTreeMap<AttributeId, f64>>,
    effects: BTreeMap<TypeId, Vec<EffectId>>,
}

impl TypeTable {
    /// Builds a fresh instance of `type_id`; the arena assigns its handle.
    fn instance(&self, type_id: TypeId, kind: ItemKind) -> Instance {
        let info = self.infos.get(&type_id);
        if info.is_none() {
            tracing::debug!(%type_id, kind = kind.as_ref(), "unknown type id; instance left empty");
        }

        let mut attributes: BTreeMap<AttributeId, Attribute> = self
            .attributes
            .get(&type_id)
            .into_iter()
            .flatten()
            .map(|(&id, &value)| (id, Attribute::new(value)))
            .collect();

        if let Some(info) = info {
            for (id, value) in [
                (attrs::MASS, info.mass),
                (attrs::CAPACITY, info.capacity),
                (attrs::VOLUME, info.volume),
            ] {
                if let Some(value) = value {
                    attributes.entry(id).or_insert_with(|| Attribute::new(value));
                }
            }
        }

        let required_skills: RequiredSkills = attrs::REQUIRED_SKILLS
            .iter()
            .filter_map(|slot| attributes.get(slot))
            .map(|attr| attr.base as i32)
            .filter(|&skill| skill > 0)
            .map(TypeId)
            .collect();

        Instance {
            id: InstanceId(0),
            kind,
            type_id,
            name: info.map(|info| info.name.clone()),
            group_id: info.map_or(GroupId(0), |info| info.group_id),
            category_id: info.map_or(CategoryId(0), |info| info.category_id),
            effects: self.effects.get(&type_id).cloned().unwrap_or_default(),
            required_skills,
            attributes,
        }
    }
}

/// Runs the collector stage.
///
/// # Errors
///
/// Fails only when the type or effect oracle is missing from `env`. The dbuff
/// oracle is optional.
pub fn collect<T, E, A, D>(
    env: &Env<'_, T, E, A, D>,
    loadout: &Loadout,
    config: &EngineConfig,
) -> Result<Collected, SimulationError>
where
    T: TypeOracle + ?Sized,
    E: EffectOracle + ?Sized,
    A: AttributeOracle + ?Sized,
    D: DbuffOracle + ?Sized,
{
    let type_ids = participating_types(loadout, config);
    let types = env.types()?;
    let effect_oracle = env.effects()?;

    let mut table = TypeTable {
        infos: types
            .type_infos(&type_ids)
            .into_iter()
            .map(|info| (info.type_id, info))
            .collect(),
        ..TypeTable::default()
    };
    for row in types.type_attributes(&type_ids) {
        table
            .attributes
            .entry(row.type_id)
            .or_default()
            .insert(row.attribute_id, row.value);
    }

    for row in effect_oracle.type_effects(&type_ids) {
        let list = table.effects.entry(row.type_id).or_default();
        if !list.contains(&row.effect_id) {
            list.push(row.effect_id);
        }
    }
    let effect_ids: BTreeSet<EffectId> = table.effects.values().flatten().copied().collect();
    let mut effects: BTreeMap<EffectId, EffectDefinition> = effect_oracle
        .effects(&effect_ids)
        .into_iter()
        .map(|definition| (definition.effect_id, definition))
        .collect();

    let mut dbuffs = BTreeMap::new();
    if let Some(oracle) = env.dbuffs() {
        for row in oracle.dbuff_collections(&type_ids) {
            let effect_id = EffectId::from_dbuff(row.dbuff_id);
            if !dbuffs.contains_key(&effect_id) {
                dbuffs.insert(
                    effect_id,
                    DbuffTag {
                        dbuff_id: row.dbuff_id,
                        mode: row.aggregate_mode,
                    },
                );
                effects.insert(
                    effect_id,
                    EffectDefinition {
                        effect_id,
                        name: format!("dbuff{}", row.dbuff_id.get()),
                        category: EffectCategory::Active,
                        flags: EffectFlags::empty(),
                        modifier_info: Some(row.modifier_info),
                    },
                );
            }
            let list = table.effects.entry(row.type_id).or_default();
            if !list.contains(&effect_id) {
                list.push(effect_id);
            }
        }
    }

    let fit = build_fit(&table, loadout, config);
    tracing::debug!(
        types = type_ids.len(),
        resolved = table.infos.len(),
        instances = fit.len(),
        effects = effects.len(),
        dbuffs = dbuffs.len(),
        "collected loadout"
    );

    Ok(Collected {
        fit,
        type_effects: table.effects,
        effects,
        dbuffs,
    })
}

fn build_fit(table: &TypeTable, loadout: &Loadout, config: &EngineConfig) -> Fit {
    let mut pilot = table.instance(config.pilot_type_id, ItemKind::Pilot);
    for (&attribute, &value) in &loadout.pilot.attributes {
        pilot.attributes.insert(attribute, Attribute::new(value));
    }
    let mut fit = Fit::new(table.instance(loadout.hull, ItemKind::Hull), pilot);

    for spec in &loadout.modules {
        let module = fit.push_module(table.instance(
            spec.type_id,
            ItemKind::Module(ModuleState {
                slot: spec.slot,
                quantity: spec.quantity,
                status: spec.status,
                charge: None,
                mutations: spec.mutated_attributes.clone(),
            }),
        ));

        if let Some(charge) = &spec.charge {
            let charge_id = fit.push_charge(table.instance(
                charge.type_id,
                ItemKind::Charge {
                    module,
                    quantity: charge.quantity,
                },
            ));
            if let Some(ItemKind::Module(state)) = fit.get_mut(module).map(|m| &mut m.kind) {
                state.charge = Some(charge_id);
            }
        }
    }

    for spec in &loadout.drones {
        fit.push_drone(table.instance(
            spec.type_id,
            ItemKind::Drone(DroneState {
                quantity: spec.quantity,
                status: spec.status,
                mutations: spec.mutated_attributes.clone(),
            }),
        ));
    }

    for spec in &loadout.fighters {
        fit.push_fighter(table.instance(
            spec.type_id,
            ItemKind::Fighter {
                quantity: spec.quantity,
                status: spec.status,
            },
        ));
    }

    for &implant in &loadout.implants {
        fit.push_implant(table.instance(implant, ItemKind::Implant));
    }

    for (&skill, &level) in &loadout.pilot.skills {
        let mut instance = table.instance(skill, ItemKind::Skill { level });
        instance
            .attributes
            .insert(attrs::SKILL_LEVEL, Attribute::new(f64::from(level)));
        fit.push_skill(instance);
    }

    fit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{AggregateMode, DbuffRow, DogmaEnv, OracleSnapshot};
    use crate::ids::DbuffId;
    use crate::loadout::{ModuleSpec, SlotFlag};

    fn info(type_id: i32, group: i32, category: i32) -> TypeInfo {
        TypeInfo {
            type_id: TypeId(type_id),
            name: format!("type {type_id}"),
            group_id: GroupId(group),
            category_id: CategoryId(category),
            mass: None,
            capacity: None,
            volume: None,
        }
    }

    fn snapshot() -> OracleSnapshot {
        let mut snapshot = OracleSnapshot::new();
        let mut hull = info(100, 25, 6);
        hull.mass = Some(1_000_000.0);
        hull.volume = Some(27_000.0);
        snapshot
            .add_type(hull, &[(attrs::MAX_VELOCITY, 300.0), (attrs::VOLUME, 28_600.0)])
            .add_type(info(200, 46, 7), &[(attrs::REQUIRED_SKILLS[0], 3450.0)])
            .add_type(info(300, 83, 8), &[])
            .add_type(info(3450, 275, 16), &[]);
        snapshot
    }

    #[test]
    fn arena_order_follows_loadout() {
        let snapshot = snapshot();
        let env = DogmaEnv::from_snapshot(&snapshot);
        let loadout = Loadout::new(TypeId(100))
            .with_module(ModuleSpec::new(TypeId(200), SlotFlag::Medium).with_charge(TypeId(300), 10))
            .with_module(ModuleSpec::new(TypeId(200), SlotFlag::Medium))
            .with_implant(TypeId(999))
            .with_skill(TypeId(3450), 4);

        let collected = collect(&env, &loadout, &EngineConfig::default()).unwrap();
        let fit = &collected.fit;

        assert_eq!(fit.len(), 7);
        assert_eq!(fit.modules(), &[InstanceId(2), InstanceId(4)]);
        let module = fit.get(InstanceId(2)).unwrap();
        assert_eq!(module.charge(), Some(InstanceId(3)));
        assert_eq!(fit.get(InstanceId(3)).unwrap().parent_module(), Some(InstanceId(2)));
        assert!(module.requires_skill(TypeId(3450)));

        let implant = fit.get(fit.implants()[0]).unwrap();
        assert_eq!(implant.name, None);
        assert!(implant.attributes.is_empty());

        let skill = fit.get(fit.skills()[0]).unwrap();
        assert_eq!(skill.base_value(attrs::SKILL_LEVEL), Some(4.0));
    }

    #[test]
    fn pilot_attributes_override_reference_values() {
        let mut snapshot = snapshot();
        snapshot.add_type(
            info(EngineConfig::DEFAULT_PILOT_TYPE_ID.get(), 1, 1),
            &[(AttributeId(1200), 5.0), (AttributeId(1201), 1.0)],
        );
        let env = DogmaEnv::from_snapshot(&snapshot);
        let loadout = Loadout::new(TypeId(100))
            .with_pilot_attribute(AttributeId(1200), 8.0)
            .with_pilot_attribute(AttributeId(1202), 3.0);

        let collected = collect(&env, &loadout, &EngineConfig::default()).unwrap();
        let pilot = collected.fit.get(collected.fit.pilot()).unwrap();

        assert_eq!(pilot.base_value(AttributeId(1200)), Some(8.0));
        assert_eq!(pilot.base_value(AttributeId(1201)), Some(1.0));
        assert_eq!(pilot.base_value(AttributeId(1202)), Some(3.0));
    }

    #[test]
    fn physical_properties_only_fill_gaps() {
        let snapshot = snapshot();
        let env = DogmaEnv::from_snapshot(&snapshot);
        let collected = collect(&env, &Loadout::new(TypeId(100)), &EngineConfig::default()).unwrap();
        let hull = collected.fit.get(collected.fit.hull()).unwrap();

        assert_eq!(hull.base_value(attrs::MASS), Some(1_000_000.0));
        assert_eq!(hull.base_value(attrs::VOLUME), Some(28_600.0));
        assert!(!hull.has_attribute(attrs::CAPACITY));
    }

    #[test]
    fn dbuff_rows_become_synthetic_effects() {
        let mut snapshot = snapshot();
        snapshot.add_dbuff(DbuffRow {
            type_id: TypeId(200),
            dbuff_id: DbuffId(10),
            aggregate_mode: AggregateMode::Maximum,
            modifier_info: "[]".into(),
        });
        let env = DogmaEnv::from_snapshot(&snapshot);
        let loadout =
            Loadout::new(TypeId(100)).with_module(ModuleSpec::new(TypeId(200), SlotFlag::High));

        let collected = collect(&env, &loadout, &EngineConfig::default()).unwrap();
        let effect = EffectId(-10);
        assert_eq!(collected.effects[&effect].category, EffectCategory::Active);
        assert_eq!(collected.dbuffs[&effect].mode, AggregateMode::Maximum);
        assert!(collected.fit.get(InstanceId(2)).unwrap().has_effect(effect));
    }

    #[test]
    fn missing_type_oracle_is_fatal() {
        let env = DogmaEnv::empty();
        let result = collect(&env, &Loadout::new(TypeId(1)), &EngineConfig::default());
        assert!(matches!(result, Err(SimulationError::Oracle(_))));
    }
}
