//! Per-account liquidity position report.

use serde::{Deserialize, Serialize};

use super::{Amount, BasisPoints, Liquidity};

/// What an account owns in the pool, as reported by `get_user_info`.
///
/// Derived on demand from the account's share count and the current
/// reserves; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct UserInfo {
    /// Shares held.
    pub shares: Liquidity,
    /// `shares / total_shares` in basis points (rounded down).
    pub share_bps: BasisPoints,
    /// Token A the shares would redeem for right now.
    pub est_value_a: Amount,
    /// Token B the shares would redeem for right now.
    pub est_value_b: Amount,
}

impl UserInfo {
    /// Report for an account with no shares.
    pub const EMPTY: Self = Self {
        shares: Liquidity::ZERO,
        share_bps: BasisPoints::ZERO,
        est_value_a: Amount::ZERO,
        est_value_b: Amount::ZERO,
    };

    /// Returns `true` if the account holds no shares.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.shares.is_zero()
    }
}
