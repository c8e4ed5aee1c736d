//! Loadout description: the engine's input.
//!
//! A loadout names item types only. Base attributes, effects and required
//! skills are filled in by the collector from reference data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::{AttributeId, TypeId};

/// Operating state of a module, ordered from least to most engaged.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum ModuleStatus {
    Offline = 0,
    #[default]
    Online = 1,
    Active = 2,
    Overloaded = 3,
}

impl ModuleStatus {
    /// Returns true when this status satisfies `required`.
    #[inline]
    pub fn satisfies(self, required: ModuleStatus) -> bool {
        self >= required
    }
}

/// Slot a module is fitted into.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum SlotFlag {
    High,
    #[default]
    Medium,
    Low,
    Rig,
    Subsystem,
    Service,
}

/// Per-attribute multipliers applied to an individual item after resolution.
pub type MutatedAttributes = BTreeMap<AttributeId, f64>;

/// Complete loadout handed to the engine.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    pub hull: TypeId,
    #[serde(default)]
    pub pilot: PilotSpec,
    /// Fitted modules in fit order. Order matters for the propulsion
    /// correction (first match wins).
    #[serde(default)]
    pub modules: Vec<ModuleSpec>,
    #[serde(default)]
    pub drones: Vec<DroneSpec>,
    #[serde(default)]
    pub fighters: Vec<FighterSpec>,
    #[serde(default)]
    pub implants: Vec<TypeId>,
}

impl Loadout {
    pub fn new(hull: TypeId) -> Self {
        Self {
            hull,
            ..Self::default()
        }
    }

    pub fn with_skill(mut self, skill: TypeId, level: u8) -> Self {
        self.pilot.skills.insert(skill, level);
        self
    }

    pub fn with_pilot_attribute(mut self, attribute: AttributeId, value: f64) -> Self {
        self.pilot.attributes.insert(attribute, value);
        self
    }

    pub fn with_module(mut self, module: ModuleSpec) -> Self {
        self.modules.push(module);
        self
    }

    pub fn with_drone(mut self, drone: DroneSpec) -> Self {
        self.drones.push(drone);
        self
    }

    pub fn with_fighter(mut self, fighter: FighterSpec) -> Self {
        self.fighters.push(fighter);
        self
    }

    pub fn with_implant(mut self, implant: TypeId) -> Self {
        self.implants.push(implant);
        self
    }
}

/// Pilot description: trained skill levels by skill type id, plus base
/// attribute values that replace the pilot type's reference values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PilotSpec {
    #[serde(default)]
    pub skills: BTreeMap<TypeId, u8>,
    #[serde(default)]
    pub attributes: BTreeMap<AttributeId, f64>,
}

/// One fitted module.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleSpec {
    pub type_id: TypeId,
    #[serde(default)]
    pub slot: SlotFlag,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub status: ModuleStatus,
    #[serde(default)]
    pub charge: Option<ChargeSpec>,
    #[serde(default)]
    pub mutated_attributes: MutatedAttributes,
}

impl ModuleSpec {
    pub fn new(type_id: TypeId, slot: SlotFlag) -> Self {
        Self {
            type_id,
            slot,
            quantity: 1,
            status: ModuleStatus::Online,
            charge: None,
            mutated_attributes: MutatedAttributes::new(),
        }
    }

    pub fn with_status(mut self, status: ModuleStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_charge(mut self, type_id: TypeId, quantity: u32) -> Self {
        self.charge = Some(ChargeSpec { type_id, quantity });
        self
    }

    pub fn with_mutation(mut self, attribute: AttributeId, multiplier: f64) -> Self {
        self.mutated_attributes.insert(attribute, multiplier);
        self
    }
}

/// Charge loaded into a module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeSpec {
    pub type_id: TypeId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// A stack of drones of one type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DroneSpec {
    pub type_id: TypeId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub status: ModuleStatus,
    #[serde(default)]
    pub mutated_attributes: MutatedAttributes,
}

impl DroneSpec {
    pub fn new(type_id: TypeId, quantity: u32) -> Self {
        Self {
            type_id,
            quantity,
            status: ModuleStatus::Active,
            mutated_attributes: MutatedAttributes::new(),
        }
    }

    pub fn with_mutation(mut self, attribute: AttributeId, multiplier: f64) -> Self {
        self.mutated_attributes.insert(attribute, multiplier);
        self
    }
}

/// A fighter squadron.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FighterSpec {
    pub type_id: TypeId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub status: ModuleStatus,
}

impl FighterSpec {
    pub fn new(type_id: TypeId, quantity: u32) -> Self {
        Self {
            type_id,
            quantity,
            status: ModuleStatus::Active,
        }
    }
}

fn default_quantity() -> u32 {
    1
}
