//! Error classification shared by dogma-core.
//!
//! The engine prefers degrading over aborting: unknown type ids, malformed
//! modifier descriptions and missing source attributes are skipped with a
//! diagnostic instead of surfacing as errors. What remains here is the shared
//! classification trait and the top-level [`SimulationError`].
//!
//! Domain-specific errors ([`crate::env::OracleError`],
//! [`crate::modifier::ModifierParseError`]) live next to the code that
//! produces them.

use std::fmt;

use crate::env::OracleError;

/// How bad an error is for the run that hit it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Only the offending input is skipped; the run continues.
    ///
    /// Examples: malformed modifier entry, unknown operation code
    Recoverable,

    /// The caller handed in input that has to be corrected.
    Validation,

    /// Engine bookkeeping went inconsistent.
    Internal,

    /// Nothing can be computed.
    ///
    /// Examples: missing required oracle
    Fatal,
}

impl ErrorSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    #[inline]
    pub const fn is_recoverable(self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification implemented by every dogma-core error enum.
///
/// Implementors derive `thiserror::Error` for the message and map each
/// variant to a stable, screaming-snake `error_code`.
pub trait DogmaError: fmt::Display + fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for the variant. Falls back to the type name.
    fn error_code(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Errors that abort a simulation run.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    /// A reference-data oracle required by the collector is missing.
    #[error("reference data unavailable: {0}")]
    Oracle(#[from] OracleError),
}

impl DogmaError for SimulationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Oracle(err) => err.error_code(),
        }
    }
}
