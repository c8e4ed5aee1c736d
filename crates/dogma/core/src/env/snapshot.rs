//! In-memory reference data.
//!
//! [`OracleSnapshot`] is a serializable bundle of every row the engine can ask
//! for, and implements all four oracle traits directly. Loaders deserialize
//! into it; tests build it by hand.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{
    AttributeDefinition, AttributeOracle, DbuffOracle, DbuffRow, EffectDefinition, EffectOracle,
    TypeAttributeRow, TypeEffectRow, TypeInfo, TypeOracle,
};
use crate::ids::{AttributeId, EffectId, TypeId};

/// Complete snapshot of reference data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleSnapshot {
    pub attributes: Vec<AttributeDefinition>,
    pub types: Vec<TypeInfo>,
    pub type_attributes: Vec<TypeAttributeRow>,
    pub type_effects: Vec<TypeEffectRow>,
    pub effects: Vec<EffectDefinition>,
    pub dbuffs: Vec<DbuffRow>,
}

impl OracleSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an attribute definition.
    pub fn add_attribute(&mut self, definition: AttributeDefinition) -> &mut Self {
        self.attributes.push(definition);
        self
    }

    /// Registers an item type together with its attribute table.
    pub fn add_type(&mut self, info: TypeInfo, attributes: &[(AttributeId, f64)]) -> &mut Self {
        let type_id = info.type_id;
        self.types.push(info);
        self.type_attributes
            .extend(attributes.iter().map(|&(attribute_id, value)| TypeAttributeRow {
                type_id,
                attribute_id,
                value,
            }));
        self
    }

    /// Registers an effect definition.
    pub fn add_effect(&mut self, definition: EffectDefinition) -> &mut Self {
        self.effects.push(definition);
        self
    }

    /// Attaches an already registered effect to an item type.
    pub fn link_effect(&mut self, type_id: TypeId, effect_id: EffectId) -> &mut Self {
        self.type_effects.push(TypeEffectRow {
            type_id,
            effect_id,
            is_default: false,
        });
        self
    }

    /// Registers a dbuff collection.
    pub fn add_dbuff(&mut self, row: DbuffRow) -> &mut Self {
        self.dbuffs.push(row);
        self
    }

    /// Appends every row of `other`.
    pub fn merge(&mut self, other: OracleSnapshot) {
        self.attributes.extend(other.attributes);
        self.types.extend(other.types);
        self.type_attributes.extend(other.type_attributes);
        self.type_effects.extend(other.type_effects);
        self.effects.extend(other.effects);
        self.dbuffs.extend(other.dbuffs);
    }
}

impl TypeOracle for OracleSnapshot {
    fn type_infos(&self, type_ids: &BTreeSet<TypeId>) -> Vec<TypeInfo> {
        self.types
            .iter()
            .filter(|info| type_ids.contains(&info.type_id))
            .cloned()
            .collect()
    }

    fn type_attributes(&self, type_ids: &BTreeSet<TypeId>) -> Vec<TypeAttributeRow> {
        self.type_attributes
            .iter()
            .filter(|row| type_ids.contains(&row.type_id))
            .copied()
            .collect()
    }
}

impl EffectOracle for OracleSnapshot {
    fn type_effects(&self, type_ids: &BTreeSet<TypeId>) -> Vec<TypeEffectRow> {
        self.type_effects
            .iter()
            .filter(|row| type_ids.contains(&row.type_id))
            .copied()
            .collect()
    }

    fn effects(&self, effect_ids: &BTreeSet<EffectId>) -> Vec<EffectDefinition> {
        self.effects
            .iter()
            .filter(|def| effect_ids.contains(&def.effect_id))
            .cloned()
            .collect()
    }
}

impl AttributeOracle for OracleSnapshot {
    fn attribute_definitions(&self) -> Vec<AttributeDefinition> {
        self.attributes.clone()
    }
}

impl DbuffOracle for OracleSnapshot {
    fn dbuff_collections(&self, type_ids: &BTreeSet<TypeId>) -> Vec<DbuffRow> {
        self.dbuffs
            .iter()
            .filter(|row| type_ids.contains(&row.type_id))
            .cloned()
            .collect()
    }
}
