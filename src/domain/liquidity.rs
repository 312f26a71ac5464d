//! Liquidity-share units.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Fungible liquidity-share units.
///
/// Distinct from [`Amount`](super::Amount): a share measures proportional
/// ownership of both reserves, not a quantity of either token.  An
/// account's claim is `shares / total_shares` of each reserve.
///
/// # Examples
///
/// ```
/// use bastion_amm::domain::Liquidity;
///
/// let a = Liquidity::new(1_000);
/// let b = Liquidity::new(2_000);
/// assert_eq!(a.checked_add(&b), Some(Liquidity::new(3_000)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Liquidity(u128);

impl Liquidity {
    /// No shares.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Liquidity` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if there are no shares.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl fmt::Display for Liquidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_and_get() {
        assert_eq!(Liquidity::new(42).get(), 42);
        assert!(Liquidity::ZERO.is_zero());
        assert_eq!(Liquidity::default(), Liquidity::ZERO);
    }

    #[test]
    fn add_overflow() {
        assert_eq!(Liquidity::new(u128::MAX).checked_add(&Liquidity::new(1)), None);
    }

    #[test]
    fn sub_to_zero() {
        let l = Liquidity::new(42);
        assert!(l.checked_sub(&l).is_some_and(|v| v.is_zero()));
        assert_eq!(Liquidity::new(1).checked_sub(&Liquidity::new(2)), None);
    }

    #[test]
    fn display() {
        assert_eq!(Liquidity::new(1_000).to_string(), "1000");
    }
}
