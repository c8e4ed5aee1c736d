use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ids::{DbuffId, TypeId};

/// Batched access to warfare-buff (dbuff) collections.
pub trait DbuffOracle: Send + Sync {
    /// Dbuff collections owned by every known id in `type_ids`.
    fn dbuff_collections(&self, type_ids: &BTreeSet<TypeId>) -> Vec<DbuffRow>;
}

/// A dbuff collection attached to an owning item type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DbuffRow {
    pub type_id: TypeId,
    pub dbuff_id: DbuffId,
    #[serde(default)]
    pub aggregate_mode: AggregateMode,
    /// JSON modifier description in the same format as effect modifiers.
    pub modifier_info: String,
}

/// How duplicate dbuffs of the same id on one attribute collapse to one.
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
pub enum AggregateMode {
    /// Keep the largest source value.
    Maximum,
    /// Keep the smallest source value.
    Minimum,
    /// Keep the source value with the largest magnitude.
    #[default]
    Default,
}

impl AggregateMode {
    /// Returns the index of the winning value, or `None` for an empty slice.
    ///
    /// Ties keep the earliest candidate.
    pub fn select(self, values: &[f64]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (index, &value) in values.iter().enumerate() {
            let better = match best {
                None => true,
                Some((_, current)) => match self {
                    Self::Maximum => value > current,
                    Self::Minimum => value < current,
                    Self::Default => value.abs() > current.abs(),
                },
            };
            if better {
                best = Some((index, value));
            }
        }
        best.map(|(index, _)| index)
    }
}
