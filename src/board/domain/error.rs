//! Error types for board domain validation and parsing.

use super::RequiredField;
use thiserror::Error;

/// Errors returned while constructing board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The task form is missing one or more required fields.
    #[error("missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<RequiredField>),

    /// The task identifier is empty after trimming.
    #[error("task identifier must not be empty")]
    EmptyTaskId,

    /// The case reference is empty after trimming.
    #[error("case reference must not be empty")]
    EmptyCaseId,
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Error returned while strictly parsing a board status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown board status: {0}")]
pub struct ParseBoardStatusError(pub String);
