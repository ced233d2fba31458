pub mod text;

use uuid::Uuid;

/// Identifier for an externally managed user account.
///
/// Account identity (registration, auth) lives outside this workspace;
/// orders only need a stable foreign key into it.
pub type AccountId = Uuid;

/// Synchronous rejection of a single validated write.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid format: {0}")]
    Format(String),
    #[error("Missing relation: {0}")]
    Reference(String),
    #[error("Schedule conflict: {0}")]
    Conflict(String),
    #[error("Out of bounds: {0}")]
    Bounds(String),
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Errors surfaced by a repository implementation.
///
/// `Duplicate` carries the unique-constraint violations the relational
/// schema declares (ISO codes, tail numbers, seat-class priorities, ...);
/// `Conflict` is the exclusion-constraint analogue for double-booked
/// resources, the backstop that keeps racing writes from both committing.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },
    #[error("Duplicate {entity}: {value}")]
    Duplicate { entity: &'static str, value: String },
    #[error("Conflicting schedule for {entity} {value}")]
    Conflict { entity: &'static str, value: String },
    #[error("Storage backend error: {0}")]
    Backend(String),
}

pub type ValidationResult<T> = Result<T, ValidationError>;
pub type StoreResult<T> = Result<T, StoreError>;
