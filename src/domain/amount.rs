//! Raw token quantity in 18-decimal fixed point.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Number of fractional decimal digits carried by every [`Amount`].
pub const DECIMALS: u32 = 18;

/// One whole token in raw units (`10^18`).
pub const ONE_TOKEN: u128 = 1_000_000_000_000_000_000;

/// A token quantity in raw units, where one whole token equals
/// [`ONE_TOKEN`] units.
///
/// Both pool assets share the same 18-decimal scale, so reserves, fees and
/// withdrawal amounts are all plain `Amount`s.  Arithmetic is checked and
/// returns `None` instead of wrapping; products that can exceed `u128` go
/// through [`math::mul_div`](crate::math::mul_div) instead.
///
/// # Examples
///
/// ```
/// use bastion_amm::domain::Amount;
///
/// let a = Amount::from_tokens(2).expect("fits");
/// assert_eq!(a.get(), 2_000_000_000_000_000_000);
/// assert_eq!(a.checked_sub(&Amount::from_tokens(1).expect("fits")), Amount::from_tokens(1));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Creates an `Amount` from raw units.
    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// Creates an `Amount` from a number of whole tokens.
    ///
    /// Returns `None` if `whole * 10^18` does not fit in `u128`.
    pub const fn from_tokens(whole: u128) -> Option<Self> {
        match whole.checked_mul(ONE_TOKEN) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Returns the raw `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
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

    /// Whole-token part, truncating the fractional digits.
    #[must_use]
    pub const fn whole_tokens(&self) -> u128 {
        self.0 / ONE_TOKEN
    }
}

impl fmt::Display for Amount {
    /// Formats as a decimal token quantity, e.g. `1000.5`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / ONE_TOKEN;
        let frac = self.0 % ONE_TOKEN;
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{frac:018}");
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}
