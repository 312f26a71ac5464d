//! 256-bit intermediates for products of two 18-decimal quantities.
//!
//! Two reserves of a million tokens each are `10^24` raw units; their
//! product (`10^48`) does not fit in `u128`.  Every `a × b / c` in the
//! engine therefore widens to [`U256`] first and narrows the quotient back,
//! reporting [`AmmError::Overflow`] only when the *result* does not fit.
//!
//! # Rounding convention
//!
//! Round against the user:
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Swap output, withdrawal amount, minted shares | [`Rounding::Down`] |
//! | Fee | [`Rounding::Up`] |
//!
//! # Examples
//!
//! ```
//! use bastion_amm::domain::Rounding;
//! use bastion_amm::math::mul_div;
//!
//! assert_eq!(mul_div(10, 1, 3, Rounding::Down), Ok(3));
//! assert_eq!(mul_div(10, 1, 3, Rounding::Up), Ok(4));
//! // 2^127 * 4 / 8 overflows u128 in the middle but not at the end
//! assert_eq!(mul_div(1u128 << 127, 4, 8, Rounding::Down), Ok(1u128 << 126));
//! ```

use ethnum::U256;

use crate::domain::Rounding;
use crate::error::{AmmError, Result};

/// Computes `a × b` exactly.
#[must_use]
pub fn wide_mul(a: u128, b: u128) -> U256 {
    // (2^128 - 1)^2 < 2^256, so the full product always fits.
    U256::from(a) * U256::from(b)
}

/// Narrows a 256-bit value back to `u128`.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] if the high word is non-zero.
pub fn narrow(value: U256, context: &'static str) -> Result<u128> {
    let (hi, lo) = value.into_words();
    if hi != 0 {
        return Err(AmmError::Overflow(context));
    }
    Ok(lo)
}

/// Divides a 256-bit numerator with explicit rounding.
///
/// # Errors
///
/// Returns [`AmmError::DivisionByZero`] if `denominator` is zero.
pub fn div_wide(numerator: U256, denominator: U256, rounding: Rounding) -> Result<U256> {
    if denominator == U256::ZERO {
        return Err(AmmError::DivisionByZero);
    }
    let q = numerator / denominator;
    match rounding {
        Rounding::Down => Ok(q),
        Rounding::Up => {
            if numerator % denominator == U256::ZERO {
                Ok(q)
            } else {
                // q < numerator <= U256::MAX whenever there is a remainder
                Ok(q + U256::ONE)
            }
        }
    }
}

/// Computes `a × b / c` with a 256-bit intermediate.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `c` is zero.
/// - [`AmmError::Overflow`] if the quotient exceeds `u128::MAX`.
pub fn mul_div(a: u128, b: u128, c: u128, rounding: Rounding) -> Result<u128> {
    let q = div_wide(wide_mul(a, b), U256::from(c), rounding)?;
    narrow(q, "mul_div quotient exceeds u128")
}

/// Integer square root of a 256-bit value (floor).
///
/// The result always fits in `u128` because `√(2^256) = 2^128`.
#[must_use]
pub fn isqrt(n: U256) -> u128 {
    if n == U256::ZERO {
        return 0;
    }
    // Newton's method starting from ceil(n / 2); the sequence decreases
    // monotonically until it reaches floor(√n).
    let mut x = n;
    let mut y = (n >> 1u32) + (n & U256::ONE);
    while y < x {
        x = y;
        y = (x + n / x) >> 1u32;
    }
    let (_, lo) = x.into_words();
    lo
}

/// Geometric mean `⌊√(a × b)⌋` of two `u128` values.
#[must_use]
pub fn geometric_mean(a: u128, b: u128) -> u128 {
    isqrt(wide_mul(a, b))
}
