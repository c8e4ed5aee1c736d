//! Modifier description decode errors.

use crate::error::{DogmaError, ErrorSeverity};

/// Reasons a single modifier entry is dropped.
///
/// None of these abort a run: the parser logs the entry and moves on, so a
/// malformed entry never takes the rest of its effect down with it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ModifierParseError {
    /// The description is not valid JSON, or not a JSON array.
    #[error("invalid modifier description: {0}")]
    InvalidJson(String),

    /// An entry lacks a mandatory field or has a field of the wrong type.
    #[error("modifier entry missing `{0}`")]
    MissingField(&'static str),

    #[error("modifier entry is malformed: {0}")]
    Malformed(String),

    #[error("unknown modifier operation code {0}")]
    UnknownOperation(i32),

    /// Operation code 9, which is a documented no-op.
    #[error("skill-points-to-level operation is not a modifier")]
    SkillPointsToLevel,

    #[error("unknown modifier domain `{0}`")]
    UnknownDomain(String),

    #[error("unsupported modifier function `{0}`")]
    UnknownFunction(String),
}

impl DogmaError for ModifierParseError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        use ModifierParseError::*;
        match self {
            InvalidJson(_) => "MODIFIER_INVALID_JSON",
            MissingField(_) => "MODIFIER_MISSING_FIELD",
            Malformed(_) => "MODIFIER_MALFORMED",
            UnknownOperation(_) => "MODIFIER_UNKNOWN_OPERATION",
            SkillPointsToLevel => "MODIFIER_SKILL_POINTS_TO_LEVEL",
            UnknownDomain(_) => "MODIFIER_UNKNOWN_DOMAIN",
            UnknownFunction(_) => "MODIFIER_UNKNOWN_FUNCTION",
        }
    }
}
