use serde_json::Error as JsonError;
use thiserror::Error;
use validator::ValidationErrors;

/// Errors raised while building form models or converting their payloads.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormError {
    #[error("Invalid form model '{model}': {reason}")]
    Structural { model: String, reason: String },

    #[error("Invalid batch configuration: {0}")]
    InvalidBatchConfig(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conversion error: {0}")]
    Conversion(String),
}

impl FormError {
    pub(crate) fn structural(model: &str, reason: impl Into<String>) -> Self {
        Self::Structural {
            model: model.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<ValidationErrors> for FormError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

impl From<JsonError> for FormError {
    fn from(error: JsonError) -> Self {
        Self::Conversion(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FormError>;
