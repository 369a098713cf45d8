//! Error types for Intake.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),
}

/// Settings storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Flow engine and controller errors.
///
/// `Validation` is ordinary control flow: it blocks an advance or a
/// completion until the user fills the named fields, and clears nothing.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("step {step_id} is missing required field(s): {}", .missing.join(", "))]
    Validation { step_id: String, missing: Vec<String> },

    #[error("unknown field: {field_id}")]
    UnknownField { field_id: String },

    #[error("field {field_id} has no option {value}")]
    UnknownOption { field_id: String, value: String },

    #[error("value kind does not match field {field_id}")]
    KindMismatch { field_id: String },

    #[error("already at the final step")]
    AtFinalStep,

    #[error("not at the final step yet")]
    NotAtFinalStep,

    #[error("flow {flow} cannot be skipped")]
    NotSkippable { flow: crate::flow::Flow },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
