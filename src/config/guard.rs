//! Guard parameters: slippage bound and front-run cooldown.

use serde::{Deserialize, Serialize};

use crate::domain::BasisPoints;
use crate::error::AmmError;

/// Initial MEV-protection parameters of a pool.
///
/// The owner can replace both values later through
/// `set_mev_protection`; this struct only seeds them.
///
/// - `max_slippage_bps`: largest accepted price impact of one swap.
/// - `cooldown_blocks`: blocks an account must wait between swaps.
///   Zero disables the cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardConfig {
    max_slippage_bps: BasisPoints,
    cooldown_blocks: u64,
}

impl GuardConfig {
    /// Creates a validated guard configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `max_slippage_bps`
    /// exceeds 100%.
    pub fn new(max_slippage_bps: BasisPoints, cooldown_blocks: u64) -> Result<Self, AmmError> {
        let config = Self {
            max_slippage_bps,
            cooldown_blocks,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `max_slippage_bps`
    /// exceeds 100%.
    pub fn validate(&self) -> Result<(), AmmError> {
        if !self.max_slippage_bps.is_valid_percent() {
            return Err(AmmError::InvalidConfiguration(
                "max_slippage_bps exceeds 100%",
            ));
        }
        Ok(())
    }

    /// Price-impact bound.
    #[must_use]
    pub const fn max_slippage_bps(&self) -> BasisPoints {
        self.max_slippage_bps
    }

    /// Per-account swap cooldown in blocks.
    #[must_use]
    pub const fn cooldown_blocks(&self) -> u64 {
        self.cooldown_blocks
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            max_slippage_bps: BasisPoints::new(1_000),
            cooldown_blocks: 1,
        }
    }
}
