// error.rs
use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised by store mutations. Lookup misses are `None`, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Employee with email {0} already exists")]
    DuplicateEmail(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
