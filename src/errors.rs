//! Error types for the settlement core.
//!
//! Validation failures are rejected before any balance mutation; persistence
//! failures surface after an in-memory rollback.

use thiserror::Error;

/// Root error type for all core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Request rejected before any mutation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Caller could not be resolved to a known account.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// The durable commit failed; the in-memory mutation has been rolled back.
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Input validation errors, checked at the boundary.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("stake must be positive, got {0}")]
    NonPositiveStake(i64),

    #[error("stake {stake} exceeds balance {balance}")]
    InsufficientBalance { stake: i64, balance: i64 },

    #[error("guess must be between 2 and 12, got {0}")]
    GuessOutOfRange(u8),

    #[error("position must be between 0 and 14, got {0}")]
    PositionOutOfRange(u8),

    #[error("cash-out target must be at least 1.0, got {0}")]
    TargetBelowOne(f64),

    #[error("amount {0} is below the minimum of {1}")]
    BelowMinimumAmount(i64, i64),

    #[error("amount {0} is above the maximum of {1}")]
    AboveMaximumAmount(i64, i64),

    #[error("stake {0} exceeds the maximum of {1}")]
    StakeAboveMaximum(i64, i64),

    #[error("balance arithmetic overflowed")]
    BalanceOverflow,

    #[error("stage {claimed} does not match the active session stage {expected}")]
    StageMismatch { claimed: u32, expected: u32 },

    #[error("no active mines session; start one at stage 0")]
    NoActiveSession,

    #[error("username '{0}' is already taken")]
    UsernameTaken(String),
}

/// Convenience alias used throughout the crate.
pub type CoreResult<T> = Result<T, CoreError>;
