use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ids::{AttributeId, CategoryId, GroupId, TypeId};

/// Batched access to item type records and their attribute tables.
pub trait TypeOracle: Send + Sync {
    /// Core records (name, group, category, physical properties) for every
    /// known id in `type_ids`. Unknown ids are simply absent from the result.
    fn type_infos(&self, type_ids: &BTreeSet<TypeId>) -> Vec<TypeInfo>;

    /// Attribute rows for every known id in `type_ids`.
    fn type_attributes(&self, type_ids: &BTreeSet<TypeId>) -> Vec<TypeAttributeRow>;
}

/// Core record of an item type.
///
/// `mass`, `capacity` and `volume` live on the record rather than in the
/// attribute table; the collector merges them into the attribute map only
/// when the table does not already declare them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypeInfo {
    pub type_id: TypeId,
    pub name: String,
    pub group_id: GroupId,
    pub category_id: CategoryId,
    #[serde(default)]
    pub mass: Option<f64>,
    #[serde(default)]
    pub capacity: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
}

/// One `(type, attribute, value)` triple of a type's attribute table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypeAttributeRow {
    pub type_id: TypeId,
    pub attribute_id: AttributeId,
    pub value: f64,
}
