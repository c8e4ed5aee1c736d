//! Strongly-typed identifiers used throughout the engine.
//!
//! Reference-data keys ([`TypeId`], [`AttributeId`], [`EffectId`], [`GroupId`],
//! [`CategoryId`]) are shared by every instance of the same item type.
//! [`InstanceId`] is the only identifier that distinguishes two copies of the
//! same type inside one simulation run.
use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! reference_id {
    ($(#[$meta:meta])* $name:ident($inner:ty), $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl $name {
            #[inline]
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            #[inline]
            pub const fn get(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }
    };
}

reference_id!(
    /// Item type key in the reference data. Not unique per instance.
    TypeId(i32),
    "type:"
);
reference_id!(
    /// Attribute key in the reference data.
    AttributeId(i32),
    "attr:"
);
reference_id!(
    /// Effect key. Negative values are synthetic dbuff effects.
    EffectId(i32),
    "effect:"
);
reference_id!(
    /// Item group key (e.g. "Propulsion Module").
    GroupId(i32),
    "group:"
);
reference_id!(
    /// Item category key (e.g. "Ship", "Charge", "Skill").
    CategoryId(i32),
    "category:"
);
reference_id!(
    /// Logical warfare-buff id shared by every dbuff of the same kind.
    DbuffId(i32),
    "dbuff:"
);

impl EffectId {
    /// Synthetic effect id carrying the modifiers of a dbuff collection.
    pub const fn from_dbuff(dbuff: DbuffId) -> Self {
        Self(-dbuff.0)
    }

    /// Returns true for synthetic dbuff effects (negative id space).
    #[inline]
    pub const fn is_dbuff(self) -> bool {
        self.0 < 0
    }
}

impl CategoryId {
    pub const SHIP: Self = Self(6);
    pub const CHARGE: Self = Self(8);
    pub const SKILL: Self = Self(16);
    pub const IMPLANT: Self = Self(20);
    pub const SUBSYSTEM: Self = Self(32);
}

/// Handle of an instance inside one simulation run's arena.
///
/// Handles are dense indices assigned in collection order, so two runs over
/// the same loadout hand out identical handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Well-known attribute ids the engine reads or writes directly.
pub mod attrs {
    use super::AttributeId;

    pub const MASS: AttributeId = AttributeId(4);
    pub const SPEED_FACTOR: AttributeId = AttributeId(20);
    pub const MAX_VELOCITY: AttributeId = AttributeId(37);
    pub const CAPACITY: AttributeId = AttributeId(38);
    pub const VOLUME: AttributeId = AttributeId(161);
    pub const SKILL_LEVEL: AttributeId = AttributeId(280);
    pub const SPEED_BOOST_FACTOR: AttributeId = AttributeId(567);

    /// Attribute slots whose values name the skills an item requires.
    pub const REQUIRED_SKILLS: [AttributeId; 6] = [
        AttributeId(182),
        AttributeId(183),
        AttributeId(184),
        AttributeId(1285),
        AttributeId(1289),
        AttributeId(1290),
    ];

    pub const MASS_NAME: &str = "mass";
    pub const CAPACITY_NAME: &str = "capacity";
    pub const VOLUME_NAME: &str = "volume";
    pub const SKILL_LEVEL_NAME: &str = "skillLevel";
}
