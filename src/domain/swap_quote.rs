//! Priced swap: amounts, fee and impact computed against pre-trade reserves.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, BasisPoints, Price, Rounding, TokenSide};
use crate::error::{AmmError, Result};

/// A fully priced swap, computed from pre-trade reserves.
///
/// Produced by the pricing engine for both the `get_amount_out` query and
/// the `swap` operation, so a quote and the swap that follows it in the
/// same state agree exactly.
///
/// # Invariants
///
/// - `amount_in > 0` and `amount_out > 0`.
/// - `fee < amount_in`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapQuote {
    side_in: TokenSide,
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
    fee_rate: BasisPoints,
    price_impact: BasisPoints,
}

impl SwapQuote {
    /// Creates a new `SwapQuote` with validated invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAmount`] if `amount_in` or `amount_out`
    /// is zero, or if `fee >= amount_in`.
    pub const fn new(
        side_in: TokenSide,
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
        fee_rate: BasisPoints,
        price_impact: BasisPoints,
    ) -> Result<Self> {
        if amount_in.is_zero() {
            return Err(AmmError::InvalidAmount("amount_in must be positive"));
        }
        if amount_out.is_zero() {
            return Err(AmmError::InvalidAmount("swap too small to produce output"));
        }
        if fee.get() >= amount_in.get() {
            return Err(AmmError::InvalidAmount("fee must be less than amount_in"));
        }
        Ok(Self {
            side_in,
            amount_in,
            amount_out,
            fee,
            fee_rate,
            price_impact,
        })
    }

    /// The side of the pool receiving the input.
    #[must_use]
    pub const fn side_in(&self) -> TokenSide {
        self.side_in
    }

    /// The side of the pool paying the output.
    #[must_use]
    pub const fn side_out(&self) -> TokenSide {
        self.side_in.other()
    }

    /// Gross input, fee included.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Output paid to the trader.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Fee portion of the input.
    pub const fn fee(&self) -> Amount {
        self.fee
    }

    /// Input after the fee, the amount that moves along the curve.
    pub const fn net_in(&self) -> Amount {
        // fee < amount_in by construction
        Amount::new(self.amount_in.get() - self.fee.get())
    }

    /// Fee rate the quote was priced at.
    #[must_use]
    pub const fn fee_rate(&self) -> BasisPoints {
        self.fee_rate
    }

    /// Price impact of the fee-net input against the pre-trade spot price.
    #[must_use]
    pub const fn price_impact(&self) -> BasisPoints {
        self.price_impact
    }

    /// Realized price `amount_out / amount_in`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the ratio does not fit.
    pub fn effective_price(&self) -> Result<Price> {
        Price::from_ratio(self.amount_out, self.amount_in, Rounding::Down)
    }
}

impl fmt::Display for SwapQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapQuote({} in={} out={} fee={} @{} impact={})",
            self.side_in,
            self.amount_in,
            self.amount_out,
            self.fee,
            self.fee_rate,
            self.price_impact
        )
    }
}
