//! Unified error types for the pool engine.
//!
//! Every fallible operation in the crate returns [`AmmError`].  Variants
//! fall into two groups:
//!
//! - **Rejections**: the caller asked for something the pool refuses
//!   (`Unauthorized`, `EmergencyActive`, `PriceImpactTooHigh`, …).  The
//!   caller may retry with different parameters.
//! - **Internal faults**: arithmetic overflow or a broken pool
//!   invariant.  These never leave partial state behind either, but they
//!   indicate a bug rather than bad input.  See
//!   [`AmmError::is_internal_fault`].

use thiserror::Error;

use crate::traits::TokenError;

/// Errors produced by the pool engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    /// The caller does not hold the role the operation requires.
    #[error("caller is not authorized for this operation")]
    Unauthorized,

    /// The pool is halted; mutating operations are rejected.
    #[error("emergency mode active")]
    EmergencyActive,

    /// The swap would move the price further than the configured bound.
    #[error("price impact too high")]
    PriceImpactTooHigh,

    /// The caller swapped too recently.
    #[error("front-run protection active")]
    FrontRunProtectionActive,

    /// The computed result is below the caller's minimum.
    #[error("insufficient output amount")]
    InsufficientOutput,

    /// The caller tried to burn more shares than they own.
    #[error("insufficient liquidity shares")]
    InsufficientShares,

    /// A zero or otherwise malformed input amount.
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// The token is not one of the pool's two assets.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// A price was requested from a pool without liquidity.
    #[error("reserve is zero")]
    ZeroReserve,

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// A token collaborator refused a transfer.
    #[error("token transfer failed: {0}")]
    Token(#[from] TokenError),

    /// Arithmetic overflow (internal fault).
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow (internal fault).
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero (internal fault).
    #[error("division by zero")]
    DivisionByZero,

    /// A pool invariant would be broken by the pending state change
    /// (internal fault).
    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),
}

impl AmmError {
    /// Returns `true` for faults that indicate an engine bug rather than a
    /// rejected request.
    #[must_use]
    pub const fn is_internal_fault(&self) -> bool {
        matches!(
            self,
            Self::Overflow(_)
                | Self::Underflow(_)
                | Self::DivisionByZero
                | Self::InvariantViolation(_)
        )
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = core::result::Result<T, AmmError>;
