//! Serializable point-in-time report of pool state.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Amount, BasisPoints, Liquidity, Price};

/// Snapshot returned by [`GuardedPool::metrics`](super::GuardedPool::metrics).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolMetrics {
    /// Token A reserve.
    pub reserve_a: Amount,
    /// Token B reserve.
    pub reserve_b: Amount,
    /// Token A in B; `None` on an empty pool.
    pub spot_price: Option<Price>,
    /// Fee rate the next swap pays.
    pub dynamic_fee_rate: BasisPoints,
    /// Reserve deviation from the deposit baseline.
    pub imbalance_bps: u32,
    /// Outstanding shares.
    pub total_liquidity: Liquidity,
    /// Lifetime fees charged on token A input.
    pub accumulated_fees_a: Amount,
    /// Lifetime fees charged on token B input.
    pub accumulated_fees_b: Amount,
    /// Price-impact bound.
    pub max_slippage_bps: BasisPoints,
    /// Per-account swap cooldown.
    pub cooldown_blocks: u64,
    /// Permanent halt flag.
    pub emergency_halted: bool,
    /// Accounts that ever deposited or swapped.
    pub accounts: usize,
}

impl fmt::Display for PoolMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "reserves:      {} A / {} B", self.reserve_a, self.reserve_b)?;
        match self.spot_price {
            Some(price) => writeln!(f, "price:         {price}")?,
            None => writeln!(f, "price:         n/a")?,
        }
        writeln!(
            f,
            "fee:           {} (imbalance {}bp)",
            self.dynamic_fee_rate, self.imbalance_bps
        )?;
        writeln!(f, "liquidity:     {}", self.total_liquidity)?;
        writeln!(
            f,
            "fees earned:   {} A / {} B",
            self.accumulated_fees_a, self.accumulated_fees_b
        )?;
        writeln!(
            f,
            "protection:    max slippage {}, cooldown {} blocks",
            self.max_slippage_bps, self.cooldown_blocks
        )?;
        write!(
            f,
            "halted:        {} ({} accounts)",
            self.emergency_halted, self.accounts
        )
    }
}
