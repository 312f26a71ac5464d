//! Dynamic fee curve parameters.

use serde::{Deserialize, Serialize};

use crate::domain::{BasisPoints, BPS_DENOMINATOR};
use crate::error::AmmError;

/// Bounds and slope of the imbalance-driven swap fee.
///
/// The fee rate moves linearly from `min_fee` (balanced pool) towards
/// `max_fee` as reserve imbalance grows, saturating once
/// `imbalance_bps × sensitivity` reaches 10 000.
///
/// | Field         | Default | Meaning                                   |
/// |---------------|---------|-------------------------------------------|
/// | `min_fee`     | 30 bp   | Rate charged on a balanced pool           |
/// | `max_fee`     | 100 bp  | Ceiling reached at saturation             |
/// | `sensitivity` | 4       | Multiplier on imbalance before saturation |
///
/// # Validation
///
/// - `min_fee ≤ max_fee`.
/// - `max_fee` strictly below 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicFeeConfig {
    min_fee: BasisPoints,
    max_fee: BasisPoints,
    sensitivity: u32,
}

impl DynamicFeeConfig {
    /// Creates a validated fee configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the bounds are
    /// inverted or `max_fee` is 100% or more.
    pub fn new(
        min_fee: BasisPoints,
        max_fee: BasisPoints,
        sensitivity: u32,
    ) -> Result<Self, AmmError> {
        let config = Self {
            min_fee,
            max_fee,
            sensitivity,
        };
        config.validate()?;
        Ok(config)
    }

    /// A flat fee: `min_fee == max_fee == fee`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `fee` is 100% or more.
    pub fn flat(fee: BasisPoints) -> Result<Self, AmmError> {
        Self::new(fee, fee, 0)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the bounds are
    /// inverted or `max_fee` is 100% or more.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.max_fee.get() >= BPS_DENOMINATOR {
            return Err(AmmError::InvalidConfiguration(
                "max_fee must be below 100%",
            ));
        }
        if self.min_fee > self.max_fee {
            return Err(AmmError::InvalidConfiguration(
                "min_fee must not exceed max_fee",
            ));
        }
        Ok(())
    }

    /// Rate charged on a balanced pool.
    #[must_use]
    pub const fn min_fee(&self) -> BasisPoints {
        self.min_fee
    }

    /// Upper bound of the rate.
    #[must_use]
    pub const fn max_fee(&self) -> BasisPoints {
        self.max_fee
    }

    /// Imbalance multiplier.
    #[must_use]
    pub const fn sensitivity(&self) -> u32 {
        self.sensitivity
    }
}

impl Default for DynamicFeeConfig {
    fn default() -> Self {
        Self {
            min_fee: BasisPoints::new(30),
            max_fee: BasisPoints::new(100),
            sensitivity: 4,
        }
    }
}
