//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors cover value parsing only; building and filtering
/// forests never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown view mode: {0} (expected 'reporting' or 'organization')")]
    UnknownViewMode(String),
}
