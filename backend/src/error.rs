//! Error taxonomy for the backend.
//!
//! Three families, matching the three ways a command can fail: bad input
//! (validation), the authentication provider saying no, and the persistence
//! layer failing. Nothing here is fatal to the process; every failure is
//! scoped to the command that triggered it.

use shared::ValidationError;
use thiserror::Error;

/// Failures from the persistence layer. Surfaced to the user as a retryable
/// notice rather than silently logged.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unreachable: {0}")]
    Unavailable(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored data could not be encoded: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Failures from the authentication provider. Shown inline on the auth form;
/// they never change session state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("an account with this email already exists")]
    AccountExists,
    #[error("password is too weak (minimum 6 characters)")]
    WeakPassword,
}

/// Anything a presentation-layer command can fail with.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
