//! Shared fixture builder for engine integration tests.
#![allow(dead_code)]

use dogma_core::{
    AttributeDefinition, AttributeId, CategoryId, DogmaEngine, DogmaEnv, EffectCategory,
    EffectDefinition, EffectFlags, EffectId, EngineConfig, GroupId, Loadout, OracleSnapshot,
    SimulationOutput, TypeAttributeRow, TypeId, TypeInfo, attrs,
};
use serde_json::{Value, json};

pub const HULL: TypeId = TypeId(100);
pub const PILOT: TypeId = EngineConfig::DEFAULT_PILOT_TYPE_ID;

pub const CATEGORY_PILOT: i32 = 1;
pub const CATEGORY_SHIP: i32 = 6;
pub const CATEGORY_MODULE: i32 = 7;
pub const CATEGORY_CHARGE: i32 = 8;
pub const CATEGORY_SKILL: i32 = 16;
pub const CATEGORY_DRONE: i32 = 18;
pub const CATEGORY_IMPLANT: i32 = 20;

pub const EPSILON: f64 = 1e-9;

pub const OP_PRE_ASSIGN: i32 = -1;
pub const OP_PRE_MUL: i32 = 0;
pub const OP_PRE_DIV: i32 = 1;
pub const OP_MOD_ADD: i32 = 2;
pub const OP_MOD_SUB: i32 = 3;
pub const OP_POST_MUL: i32 = 4;
pub const OP_POST_DIV: i32 = 5;
pub const OP_POST_PERCENT: i32 = 6;
pub const OP_POST_ASSIGN: i32 = 7;

/// Reference data under construction plus the engine configuration.
pub struct Fixture {
    pub snapshot: OracleSnapshot,
    pub config: EngineConfig,
}

impl Fixture {
    /// A hull with `maxVelocity = 200` and an empty pilot.
    pub fn new() -> Self {
        let mut fixture = Self {
            snapshot: OracleSnapshot::new(),
            config: EngineConfig::default(),
        };
        fixture
            .attribute(AttributeDefinition::new(attrs::MAX_VELOCITY, "maxVelocity"))
            .attribute(AttributeDefinition::new(attrs::MASS, "mass"))
            .attribute(AttributeDefinition::new(attrs::SPEED_FACTOR, "speedFactor"))
            .attribute(AttributeDefinition::new(attrs::SPEED_BOOST_FACTOR, "speedBoostFactor"))
            .item(HULL, 25, CATEGORY_SHIP, &[(attrs::MAX_VELOCITY.get(), 200.0)])
            .item(PILOT, 1, CATEGORY_PILOT, &[]);
        fixture
    }

    pub fn attribute(&mut self, definition: AttributeDefinition) -> &mut Self {
        self.snapshot.add_attribute(definition);
        self
    }

    /// Registers an item type with its attribute table.
    pub fn item(
        &mut self,
        type_id: TypeId,
        group: i32,
        category: i32,
        values: &[(i32, f64)],
    ) -> &mut Self {
        let values: Vec<(AttributeId, f64)> = values
            .iter()
            .map(|&(id, value)| (AttributeId(id), value))
            .collect();
        self.snapshot.add_type(
            TypeInfo {
                type_id,
                name: format!("type {}", type_id.get()),
                group_id: GroupId(group),
                category_id: CategoryId(category),
                mass: None,
                capacity: None,
                volume: None,
            },
            &values,
        );
        self
    }

    /// Adds or overrides one attribute of an already registered type.
    pub fn set(&mut self, type_id: TypeId, attribute: i32, value: f64) -> &mut Self {
        self.snapshot.type_attributes.push(TypeAttributeRow {
            type_id,
            attribute_id: AttributeId(attribute),
            value,
        });
        self
    }

    /// Registers an effect carrying `modifiers` and links it to `type_id`.
    pub fn effect(
        &mut self,
        type_id: TypeId,
        effect_id: i32,
        category: EffectCategory,
        modifiers: Vec<Value>,
    ) -> &mut Self {
        let effect_id = EffectId(effect_id);
        if !self.snapshot.effects.iter().any(|def| def.effect_id == effect_id) {
            self.snapshot.add_effect(EffectDefinition {
                effect_id,
                name: format!("effect{}", effect_id.get()),
                category,
                flags: EffectFlags::empty(),
                modifier_info: Some(Value::Array(modifiers).to_string()),
            });
        }
        self.snapshot.link_effect(type_id, effect_id);
        self
    }

    pub fn engine(&self) -> DogmaEngine {
        let env = DogmaEnv::from_snapshot(&self.snapshot);
        DogmaEngine::from_env(&env, self.config.clone()).expect("attribute oracle present")
    }

    pub fn simulate(&self, loadout: &Loadout) -> SimulationOutput {
        let env = DogmaEnv::from_snapshot(&self.snapshot);
        self.engine()
            .simulate(&env, loadout)
            .expect("simulation succeeds")
    }
}

/// `ItemModifier` entry targeting `domain` (`itemID`, `shipID`, `charID`, `otherID`).
pub fn item_modifier(domain: &str, modified: i32, modifying: i32, operation: i32) -> Value {
    json!({
        "func": "ItemModifier",
        "domain": domain,
        "modifiedAttributeID": modified,
        "modifyingAttributeID": modifying,
        "operation": operation,
    })
}

pub fn location_modifier(modified: i32, modifying: i32, operation: i32) -> Value {
    json!({
        "func": "LocationModifier",
        "domain": "shipID",
        "modifiedAttributeID": modified,
        "modifyingAttributeID": modifying,
        "operation": operation,
    })
}

pub fn group_modifier(group: i32, modified: i32, modifying: i32, operation: i32) -> Value {
    json!({
        "func": "LocationGroupModifier",
        "domain": "shipID",
        "groupID": group,
        "modifiedAttributeID": modified,
        "modifyingAttributeID": modifying,
        "operation": operation,
    })
}

pub fn skill_modifier(skill: i32, modified: i32, modifying: i32, operation: i32) -> Value {
    json!({
        "func": "OwnerRequiredSkillModifier",
        "domain": "charID",
        "skillTypeID": skill,
        "modifiedAttributeID": modified,
        "modifyingAttributeID": modifying,
        "operation": operation,
    })
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}
