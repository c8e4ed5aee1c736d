//! Structured modifier records.
//!
//! Effects carry their modifiers as an embedded JSON description. This module
//! defines the strongly-typed form ([`RawModifier`], [`Modifier`]) and the
//! parser that produces it ([`parse_effects`]).
mod error;
mod parse;

pub use error::ModifierParseError;
pub use parse::{ModifierIndex, decode_modifier_info, parse_effects};

use crate::env::EffectCategory;
use crate::fit::DbuffTag;
use crate::ids::{AttributeId, EffectId, GroupId, TypeId};

/// Modifier operation, in application order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumCount,
)]
#[strum(serialize_all = "camelCase")]
pub enum Operation {
    PreAssign,
    PreMul,
    PreDiv,
    ModAdd,
    ModSub,
    PostMul,
    PostDiv,
    PostPercent,
    PostAssign,
}

impl Operation {
    /// Every operation in the order groups are applied.
    pub const APPLY_ORDER: [Operation; 9] = [
        Operation::PreAssign,
        Operation::PreMul,
        Operation::PreDiv,
        Operation::ModAdd,
        Operation::ModSub,
        Operation::PostMul,
        Operation::PostDiv,
        Operation::PostPercent,
        Operation::PostAssign,
    ];

    /// Operation code reserved for "skill points to level", always discarded.
    pub const SKILL_POINTS_TO_LEVEL: i32 = 9;

    /// Maps a reference-data operation code to an operation.
    ///
    /// # Errors
    ///
    /// Code 9 is a documented no-op and yields
    /// [`ModifierParseError::SkillPointsToLevel`]; any other unknown code
    /// yields [`ModifierParseError::UnknownOperation`].
    pub fn from_code(code: i32) -> Result<Self, ModifierParseError> {
        Ok(match code {
            -1 => Self::PreAssign,
            0 => Self::PreMul,
            1 => Self::PreDiv,
            2 => Self::ModAdd,
            3 => Self::ModSub,
            4 => Self::PostMul,
            5 => Self::PostDiv,
            6 => Self::PostPercent,
            7 => Self::PostAssign,
            Self::SKILL_POINTS_TO_LEVEL => return Err(ModifierParseError::SkillPointsToLevel),
            other => return Err(ModifierParseError::UnknownOperation(other)),
        })
    }

    /// Position of this operation in [`Self::APPLY_ORDER`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn is_assign(self) -> bool {
        matches!(self, Self::PreAssign | Self::PostAssign)
    }
}

/// Skill named by a skill-restricted domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkillRef {
    Type(TypeId),
    /// The modifier's own source type (`skillTypeID = -1`).
    Source,
}

impl SkillRef {
    pub const SOURCE_CODE: i32 = -1;

    pub fn from_code(code: i32) -> Self {
        if code == Self::SOURCE_CODE {
            Self::Source
        } else {
            Self::Type(TypeId(code))
        }
    }

    /// Concrete skill id given the source type of the modifier.
    #[inline]
    pub fn resolve(self, source_type: TypeId) -> TypeId {
        match self {
            Self::Type(skill) => skill,
            Self::Source => source_type,
        }
    }
}

/// Which instances a modifier targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Domain {
    /// The owning instance itself.
    Item,
    Ship,
    Pilot,
    /// The module/charge counterpart of the owner.
    Other,
    /// Every instance in the fit.
    Location,
    /// Every instance of a group.
    LocationGroup(GroupId),
    /// Every instance requiring a skill.
    RequiredSkill(SkillRef),
}

/// One decoded modifier entry, before it is tied to an effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawModifier {
    pub operation: Operation,
    pub domain: Domain,
    pub modified_attribute: AttributeId,
    pub modifying_attribute: AttributeId,
}

/// A modifier owned by an effect of a source type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Modifier {
    pub source_type: TypeId,
    pub effect: EffectId,
    pub category: EffectCategory,
    pub operation: Operation,
    pub domain: Domain,
    pub modified_attribute: AttributeId,
    pub modifying_attribute: AttributeId,
    pub dbuff: Option<DbuffTag>,
}

impl Modifier {
    pub fn is_dbuff(&self) -> bool {
        self.effect.is_dbuff()
    }
}
