pub mod form;

pub mod dto {
    pub mod common;
    pub mod criterion;
    pub mod phase;
    pub mod user;
}

pub mod error;

// Re-export commonly used items
pub use error::{FormError, Result};

pub use form::{
    BatchConfig, FieldDescriptor, FieldError, FieldKind, FieldValue, FormMode, FormModel,
    FormState, FormValues, InitialValues, SubmissionPayload,
};

// Re-export DTOs
pub use dto::{
    common::ErrorResponse,
    criterion::CriterionDto,
    phase::{CreatePhasesRequest, PhaseDto},
    user::{LoginRequest, LoginResponse, Role, UserDto},
};
