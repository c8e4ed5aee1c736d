use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::config::EngineConfig;
use crate::env::{AggregateMode, EffectCategory};
use crate::ids::{AttributeId, CategoryId, DbuffId, EffectId, GroupId, InstanceId, TypeId};
use crate::loadout::{ModuleStatus, MutatedAttributes, SlotFlag};
use crate::modifier::Operation;

/// Required-skill ids of an item, one per required-skill attribute slot.
pub type RequiredSkills = ArrayVec<TypeId, { EngineConfig::MAX_REQUIRED_SKILLS }>;

/// Kind of an item instance with its kind-specific state.
///
/// Stages work generically over [`Instance`] and only match on the kind where
/// behaviour truly differs (module activation gating, module/charge pairing).
#[derive(Clone, Debug, PartialEq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ItemKind {
    Hull,
    Pilot,
    Module(ModuleState),
    Charge {
        /// Module this charge is loaded into.
        module: InstanceId,
        quantity: u32,
    },
    Drone(DroneState),
    Fighter {
        quantity: u32,
        status: ModuleStatus,
    },
    Implant,
    Skill {
        level: u8,
    },
}

/// Module-specific state.
#[derive(Clone, Debug, PartialEq)]
pub struct ModuleState {
    pub slot: SlotFlag,
    pub quantity: u32,
    pub status: ModuleStatus,
    /// Charge owned by this module; its lifetime is bound to the module.
    pub charge: Option<InstanceId>,
    pub mutations: MutatedAttributes,
}

/// Drone-specific state.
#[derive(Clone, Debug, PartialEq)]
pub struct DroneState {
    pub quantity: u32,
    pub status: ModuleStatus,
    pub mutations: MutatedAttributes,
}

/// A directed, resolved modifier edge attached to a target attribute.
///
/// The target is implied by where the edge is stored; the source is addressed
/// by handle so the value resolver can recurse into it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AppliedModifier {
    pub source: InstanceId,
    pub source_attribute: AttributeId,
    pub operation: Operation,
    pub effect: EffectId,
    pub category: EffectCategory,
    /// Fixed at attach time.
    pub penalized: bool,
    pub dbuff: Option<DbuffTag>,
}

/// Dbuff identity carried by modifiers of synthetic dbuff effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DbuffTag {
    pub dbuff_id: DbuffId,
    pub mode: AggregateMode,
}

/// Base value of one attribute plus every modifier targeting it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attribute {
    pub base: f64,
    pub modifiers: Vec<AppliedModifier>,
}

impl Attribute {
    pub fn new(base: f64) -> Self {
        Self {
            base,
            modifiers: Vec::new(),
        }
    }
}

/// One participating item inside a simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    pub id: InstanceId,
    pub kind: ItemKind,
    pub type_id: TypeId,
    /// Display name; `None` when the type is unknown to the reference data.
    pub name: Option<String>,
    pub group_id: GroupId,
    pub category_id: CategoryId,
    pub effects: Vec<EffectId>,
    pub required_skills: RequiredSkills,
    pub attributes: BTreeMap<AttributeId, Attribute>,
}

impl Instance {
    /// Base value of `attribute`, if the instance declares it.
    #[inline]
    pub fn base_value(&self, attribute: AttributeId) -> Option<f64> {
        self.attributes.get(&attribute).map(|attr| attr.base)
    }

    #[inline]
    pub fn has_attribute(&self, attribute: AttributeId) -> bool {
        self.attributes.contains_key(&attribute)
    }

    /// Modifiers targeting `attribute`, empty when there are none.
    pub fn modifiers(&self, attribute: AttributeId) -> &[AppliedModifier] {
        self.attributes
            .get(&attribute)
            .map_or(&[], |attr| attr.modifiers.as_slice())
    }

    #[inline]
    pub fn has_effect(&self, effect: EffectId) -> bool {
        self.effects.contains(&effect)
    }

    #[inline]
    pub fn requires_skill(&self, skill: TypeId) -> bool {
        self.required_skills.contains(&skill)
    }

    /// Activation status for modules; `None` for every other kind.
    pub fn module_status(&self) -> Option<ModuleStatus> {
        match &self.kind {
            ItemKind::Module(module) => Some(module.status),
            _ => None,
        }
    }

    /// Charge loaded into this module.
    pub fn charge(&self) -> Option<InstanceId> {
        match &self.kind {
            ItemKind::Module(module) => module.charge,
            _ => None,
        }
    }

    /// Module this charge is loaded into.
    pub fn parent_module(&self) -> Option<InstanceId> {
        match self.kind {
            ItemKind::Charge { module, .. } => Some(module),
            _ => None,
        }
    }

    /// Mutation multipliers supplied for this instance.
    pub fn mutations(&self) -> Option<&MutatedAttributes> {
        match &self.kind {
            ItemKind::Module(module) => Some(&module.mutations),
            ItemKind::Drone(drone) => Some(&drone.mutations),
            _ => None,
        }
    }
}
