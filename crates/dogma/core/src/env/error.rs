//! Oracle access errors.

use crate::error::{DogmaError, ErrorSeverity};

/// Errors that occur when accessing oracle data.
///
/// Only oracle *availability* is an error. Lookups for unknown ids return
/// empty row sets instead, and the collector degrades from there.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    /// TypeOracle is not available in the environment.
    #[error("TypeOracle not available")]
    TypesNotAvailable,

    /// EffectOracle is not available in the environment.
    #[error("EffectOracle not available")]
    EffectsNotAvailable,

    /// AttributeOracle is not available in the environment.
    #[error("AttributeOracle not available")]
    AttributesNotAvailable,
}

impl DogmaError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        // Missing oracles are fatal - the collector cannot proceed
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            TypesNotAvailable => "ORACLE_TYPES_NOT_AVAILABLE",
            EffectsNotAvailable => "ORACLE_EFFECTS_NOT_AVAILABLE",
            AttributesNotAvailable => "ORACLE_ATTRIBUTES_NOT_AVAILABLE",
        }
    }
}
