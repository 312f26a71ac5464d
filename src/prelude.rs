//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use bastion_amm::prelude::*;
//! ```

pub use crate::domain::{
    AccountId, Amount, BasisPoints, BlockIndex, CallContext, Liquidity, PoolEvent, Price,
    Rounding, SwapQuote, TokenAddress, TokenPair, TokenSide, UserInfo,
};

pub use crate::traits::{EventLog, EventSink, TokenError, TokenLedger};

pub use crate::math::CheckedArithmetic;

pub use crate::config::{DynamicFeeConfig, GuardConfig, PoolConfig};

pub use crate::pool::{GuardedPool, PoolMetrics};

pub use crate::token::InMemoryToken;

pub use crate::error::{AmmError, Result};
