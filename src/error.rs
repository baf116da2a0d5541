//! Error types for the grant liaison engine.
//!

use thiserror::Error;

/// Every failure surfaced by the engine.
///
/// Nothing here is transient: callers correct their input and resubmit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiaisonError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Call {call_id} already has a recorded outcome")]
    DoubleCompletion { call_id: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl LiaisonError {
    /// Short machine-readable kind, used in structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::NotFound { .. } => "not_found",
            Self::DoubleCompletion { .. } => "double_completion",
            Self::Configuration(_) => "configuration",
            Self::Serialization(_) => "serialization",
        }
    }
}

impl From<serde_json::Error> for LiaisonError {
    fn from(error: serde_json::Error) -> Self {
        LiaisonError::Serialization(error.to_string())
    }
}

impl From<config::ConfigError> for LiaisonError {
    fn from(error: config::ConfigError) -> Self {
        LiaisonError::Configuration(error.to_string())
    }
}

pub type LiaisonResult<T> = Result<T, LiaisonError>;

/// Helper function to create validation errors
pub fn validation_error(msg: impl Into<String>) -> LiaisonError {
    LiaisonError::Validation(msg.into())
}

/// Helper function to create invalid transition errors
pub fn invalid_transition(from: impl ToString, to: impl ToString) -> LiaisonError {
    LiaisonError::InvalidTransition {
        from: from.to_string(),
        to: to.to_string(),
    }
}

/// Helper function to create not-found errors
pub fn not_found(entity: &'static str, id: impl Into<String>) -> LiaisonError {
    LiaisonError::NotFound {
        entity,
        id: id.into(),
    }
}
