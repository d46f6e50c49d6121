//! Error types for environment construction and reset.

use thiserror::Error;

/// Result type for environment operations.
pub type Result<T> = std::result::Result<T, MealPlanError>;

/// Errors that can occur while constructing or resetting the environment.
///
/// All variants are construction/configuration-time failures: no partially
/// initialized environment is ever returned. Caller-contract breaches during
/// an episode (an illegal action despite masking) are surfaced in-band
/// through the step result, not as an error value.
#[derive(Debug, Error)]
pub enum MealPlanError {
    /// The catalog contains no dishes.
    #[error("catalog is empty")]
    EmptyCatalog,

    /// A dish record failed validation.
    #[error("invalid dish at index {index}: {reason}")]
    InvalidDish { index: usize, reason: String },

    /// Invalid configuration (non-positive target, zero slots, etc.).
    #[error("invalid configuration for '{param}': {message}")]
    InvalidConfig { param: String, message: String },

    /// Catalog file could not be read.
    #[error("failed to read catalog: {0}")]
    CatalogIo(#[from] std::io::Error),

    /// Catalog JSON could not be parsed (includes missing required fields).
    #[error("failed to parse catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),
}

impl MealPlanError {
    /// Shorthand for configuration errors.
    pub fn invalid_config(param: &str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            param: param.to_string(),
            message: message.into(),
        }
    }
}
