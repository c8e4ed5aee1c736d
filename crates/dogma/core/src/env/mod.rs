//! Traits describing read-only reference data.
//!
//! Oracles expose item type records, attribute tables, effect definitions and
//! dbuff collections. Every query is batched over a set of ids so the
//! collector issues one lookup per stage, never one per instance. The [`Env`]
//! aggregate bundles the oracles so the engine can reach everything it needs
//! without hard coupling to concrete implementations.
mod attributes;
mod dbuffs;
mod effects;
mod error;
mod snapshot;
mod types;

pub use attributes::{AttributeCatalog, AttributeDefinition, AttributeOracle};
pub use dbuffs::{AggregateMode, DbuffOracle, DbuffRow};
pub use effects::{EffectCategory, EffectDefinition, EffectFlags, EffectOracle, TypeEffectRow};
pub use error::OracleError;
pub use snapshot::OracleSnapshot;
pub use types::{TypeAttributeRow, TypeInfo, TypeOracle};

/// Aggregates read-only oracles required by the collector.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, T, E, A, D>
where
    T: TypeOracle + ?Sized,
    E: EffectOracle + ?Sized,
    A: AttributeOracle + ?Sized,
    D: DbuffOracle + ?Sized,
{
    types: Option<&'a T>,
    effects: Option<&'a E>,
    attributes: Option<&'a A>,
    dbuffs: Option<&'a D>,
}

pub type DogmaEnv<'a> = Env<
    'a,
    dyn TypeOracle + 'a,
    dyn EffectOracle + 'a,
    dyn AttributeOracle + 'a,
    dyn DbuffOracle + 'a,
>;

impl<'a, T, E, A, D> Env<'a, T, E, A, D>
where
    T: TypeOracle + ?Sized,
    E: EffectOracle + ?Sized,
    A: AttributeOracle + ?Sized,
    D: DbuffOracle + ?Sized,
{
    pub fn new(
        types: Option<&'a T>,
        effects: Option<&'a E>,
        attributes: Option<&'a A>,
        dbuffs: Option<&'a D>,
    ) -> Self {
        Self {
            types,
            effects,
            attributes,
            dbuffs,
        }
    }

    pub fn with_all(types: &'a T, effects: &'a E, attributes: &'a A, dbuffs: &'a D) -> Self {
        Self::new(Some(types), Some(effects), Some(attributes), Some(dbuffs))
    }

    pub fn empty() -> Self {
        Self {
            types: None,
            effects: None,
            attributes: None,
            dbuffs: None,
        }
    }

    /// Returns the TypeOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::TypesNotAvailable` if no type oracle was provided.
    pub fn types(&self) -> Result<&'a T, OracleError> {
        self.types.ok_or(OracleError::TypesNotAvailable)
    }

    /// Returns the EffectOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::EffectsNotAvailable` if no effect oracle was provided.
    pub fn effects(&self) -> Result<&'a E, OracleError> {
        self.effects.ok_or(OracleError::EffectsNotAvailable)
    }

    /// Returns the AttributeOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::AttributesNotAvailable` if no attribute oracle was provided.
    pub fn attributes(&self) -> Result<&'a A, OracleError> {
        self.attributes.ok_or(OracleError::AttributesNotAvailable)
    }

    /// Returns the DbuffOracle, or `None` when the environment carries none.
    ///
    /// Dbuffs are optional: a dataset without warfare buffs simply has no
    /// dbuff effects.
    pub fn dbuffs(&self) -> Option<&'a D> {
        self.dbuffs
    }
}

impl<'a, T, E, A, D> Env<'a, T, E, A, D>
where
    T: TypeOracle + 'a,
    E: EffectOracle + 'a,
    A: AttributeOracle + 'a,
    D: DbuffOracle + 'a,
{
    /// Converts this environment into a trait-object based `DogmaEnv`.
    pub fn into_dogma_env(self) -> DogmaEnv<'a> {
        let types: Option<&'a dyn TypeOracle> = self.types.map(|types| types as _);
        let effects: Option<&'a dyn EffectOracle> = self.effects.map(|effects| effects as _);
        let attributes: Option<&'a dyn AttributeOracle> =
            self.attributes.map(|attributes| attributes as _);
        let dbuffs: Option<&'a dyn DbuffOracle> = self.dbuffs.map(|dbuffs| dbuffs as _);
        Env::new(types, effects, attributes, dbuffs)
    }
}

impl<'a> DogmaEnv<'a> {
    /// Builds a complete environment backed by one snapshot.
    pub fn from_snapshot(snapshot: &'a OracleSnapshot) -> Self {
        Env::with_all(snapshot, snapshot, snapshot, snapshot).into_dogma_env()
    }
}
