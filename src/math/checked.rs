//! Checked arithmetic trait for domain wrapper types.
//!
//! [`CheckedArithmetic`] turns the `Option`-returning inherent methods of
//! [`Amount`] and [`Liquidity`] into `Result`s carrying a specific
//! [`AmmError`] variant, so ledger code can propagate with `?`.
//!
//! # Examples
//!
//! ```
//! use bastion_amm::domain::Amount;
//! use bastion_amm::math::CheckedArithmetic;
//!
//! let sum = Amount::new(100).safe_add(&Amount::new(200));
//! assert_eq!(sum, Ok(Amount::new(300)));
//! ```

use crate::domain::{Amount, Liquidity};
use crate::error::AmmError;

/// Fallible add/sub for domain wrapper types.
///
/// # Contract
///
/// - **No panics**: all error conditions produce `Err`.
/// - **No saturation**: a clamped reserve would silently break the
///   constant-product invariant; errors propagate instead.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result exceeds the
    /// representable range.
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("amount subtraction underflow"))
    }
}

impl CheckedArithmetic for Liquidity {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("share supply overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("share supply underflow"))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    mod amount {
        use super::*;

        #[test]
        fn add_ok() {
            let Ok(r) = Amount::new(100).safe_add(&Amount::new(200)) else {
                panic!("expected Ok");
            };
            assert_eq!(r, Amount::new(300));
        }

        #[test]
        fn add_overflow() {
            let Err(AmmError::Overflow(_)) = Amount::MAX.safe_add(&Amount::new(1)) else {
                panic!("expected Overflow");
            };
        }

        #[test]
        fn sub_underflow() {
            let Err(AmmError::Underflow(_)) = Amount::new(1).safe_sub(&Amount::new(2)) else {
                panic!("expected Underflow");
            };
        }
    }

    mod liquidity {
        use super::*;

        #[test]
        fn add_and_sub() {
            let Ok(sum) = Liquidity::new(5).safe_add(&Liquidity::new(7)) else {
                panic!("expected Ok");
            };
            assert_eq!(sum, Liquidity::new(12));
            let Ok(diff) = sum.safe_sub(&Liquidity::new(12)) else {
                panic!("expected Ok");
            };
            assert!(diff.is_zero());
        }

        #[test]
        fn sub_underflow_is_fault() {
            let Err(err) = Liquidity::ZERO.safe_sub(&Liquidity::new(1)) else {
                panic!("expected Err");
            };
            assert!(err.is_internal_fault());
        }
    }
}
