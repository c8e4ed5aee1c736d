use std::collections::BTreeSet;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::ids::{EffectId, TypeId};
use crate::loadout::ModuleStatus;

/// Batched access to effect links and effect definitions.
pub trait EffectOracle: Send + Sync {
    /// Effect links of every known id in `type_ids`.
    fn type_effects(&self, type_ids: &BTreeSet<TypeId>) -> Vec<TypeEffectRow>;

    /// Definitions of every known id in `effect_ids`.
    fn effects(&self, effect_ids: &BTreeSet<EffectId>) -> Vec<EffectDefinition>;
}

/// Links an effect to the item type that carries it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEffectRow {
    pub type_id: TypeId,
    pub effect_id: EffectId,
    /// The effect that runs when the item is activated without choosing one.
    #[serde(default)]
    pub is_default: bool,
}

bitflags! {
    /// Behavioural flags of an effect.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct EffectFlags: u8 {
        const OFFENSIVE = 1 << 0;
        const ASSISTANCE = 1 << 1;
    }
}

/// Static definition of an effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectDefinition {
    pub effect_id: EffectId,
    pub name: String,
    pub category: EffectCategory,
    #[serde(default)]
    pub flags: EffectFlags,
    /// JSON modifier description; `None` for effects implemented outside the
    /// generic modifier system.
    #[serde(default)]
    pub modifier_info: Option<String>,
}

/// Effect category, deciding which module state activates the effect.
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
#[serde(from = "i32", into = "i32")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EffectCategory {
    #[default]
    Passive,
    Active,
    Target,
    Area,
    Online,
    Overload,
    Dungeon,
    System,
    /// Category codes the engine does not know; treated like passive.
    Unknown(i32),
}

impl EffectCategory {
    pub const fn code(self) -> i32 {
        match self {
            Self::Passive => 0,
            Self::Active => 1,
            Self::Target => 2,
            Self::Area => 3,
            Self::Online => 4,
            Self::Overload => 5,
            Self::Dungeon => 6,
            Self::System => 7,
            Self::Unknown(code) => code,
        }
    }

    /// Minimum module status at which an effect of this category applies.
    pub const fn required_status(self) -> ModuleStatus {
        match self {
            Self::Online => ModuleStatus::Online,
            Self::Active | Self::Target => ModuleStatus::Active,
            Self::Overload => ModuleStatus::Overloaded,
            Self::Passive | Self::Area | Self::Dungeon | Self::System | Self::Unknown(_) => {
                ModuleStatus::Offline
            }
        }
    }
}

impl From<i32> for EffectCategory {
    fn from(code: i32) -> Self {
        match code {
            0 => Self::Passive,
            1 => Self::Active,
            2 => Self::Target,
            3 => Self::Area,
            4 => Self::Online,
            5 => Self::Overload,
            6 => Self::Dungeon,
            7 => Self::System,
            other => Self::Unknown(other),
        }
    }
}

impl From<EffectCategory> for i32 {
    fn from(category: EffectCategory) -> Self {
        category.code()
    }
}
