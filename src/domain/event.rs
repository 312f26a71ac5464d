//! Observable pool events for indexers and tests.

use serde::{Deserialize, Serialize};

use super::{AccountId, Amount, BasisPoints, Liquidity, TokenAddress};

/// Notification emitted after a state transition commits.
///
/// Events are only ever emitted for successful calls; a rejected call
/// emits nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PoolEvent {
    /// Liquidity deposited and shares minted.
    LiquidityAdded {
        /// Depositor.
        account: AccountId,
        /// Token A deposited.
        amount_a: Amount,
        /// Token B deposited.
        amount_b: Amount,
        /// Shares minted to the depositor.
        shares_minted: Liquidity,
    },
    /// Shares burned and reserves paid out.
    LiquidityRemoved {
        /// Withdrawer.
        account: AccountId,
        /// Token A paid out.
        amount_a: Amount,
        /// Token B paid out.
        amount_b: Amount,
        /// Shares burned.
        shares_burned: Liquidity,
    },
    /// A swap executed.
    Swap {
        /// Trader.
        account: AccountId,
        /// Token sold to the pool.
        token_in: TokenAddress,
        /// Token bought from the pool.
        token_out: TokenAddress,
        /// Gross input, fee included.
        amount_in: Amount,
        /// Output paid to the trader.
        amount_out: Amount,
    },
    /// Guard parameters changed by the owner.
    MevProtectionUpdated {
        /// New price-impact bound.
        max_slippage_bps: BasisPoints,
        /// New per-account swap cooldown.
        cooldown_blocks: u64,
    },
    /// The pool was permanently halted.
    EmergencyModeActivated,
}

impl PoolEvent {
    /// Short event name, as used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LiquidityAdded { .. } => "LiquidityAdded",
            Self::LiquidityRemoved { .. } => "LiquidityRemoved",
            Self::Swap { .. } => "Swap",
            Self::MevProtectionUpdated { .. } => "MevProtectionUpdated",
            Self::EmergencyModeActivated => "EmergencyModeActivated",
        }
    }
}
