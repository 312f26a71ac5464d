//! Chain-agnostic identities for tokens and accounts.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identity of one of the pool's token ledgers.
///
/// Wraps a fixed-size `[u8; 32]` byte array; every 32-byte sequence is a
/// valid address.
///
/// # Examples
///
/// ```
/// use bastion_amm::domain::TokenAddress;
///
/// let addr = TokenAddress::from_bytes([1u8; 32]);
/// assert_eq!(addr.as_bytes(), [1u8; 32]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenAddress([u8; 32]);

impl TokenAddress {
    /// Creates a `TokenAddress` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_short_hex(f, &self.0)
    }
}

/// Identity of a caller: a liquidity provider, trader, the pool owner, or
/// the pool's own custody account on the token ledgers.
///
/// # Examples
///
/// ```
/// use bastion_amm::domain::AccountId;
///
/// let alice = AccountId::from_bytes([0xA1; 32]);
/// assert_ne!(alice, AccountId::from_bytes([0xB0; 32]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// Creates an `AccountId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_short_hex(f, &self.0)
    }
}

/// `0x` + first four bytes, enough to tell identities apart in logs.
fn write_short_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8; 32]) -> fmt::Result {
    write!(f, "0x")?;
    for b in &bytes[..4] {
        write!(f, "{b:02x}")?;
    }
    write!(f, "…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_address_round_trip() {
        let bytes = [42u8; 32];
        assert_eq!(TokenAddress::from_bytes(bytes).as_bytes(), bytes);
    }

    #[test]
    fn account_ordering_follows_bytes() {
        let a = AccountId::from_bytes([1u8; 32]);
        let b = AccountId::from_bytes([2u8; 32]);
        assert!(a < b);
    }

    #[test]
    fn display_is_short_hex() {
        let a = AccountId::from_bytes([0xab; 32]);
        assert_eq!(a.to_string(), "0xabababab…");
        let t = TokenAddress::from_bytes([0x01; 32]);
        assert_eq!(t.to_string(), "0x01010101…");
    }
}
