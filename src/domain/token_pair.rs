//! The pool's two assets and which side of the pool a token sits on.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::TokenAddress;
use crate::error::AmmError;

/// One side of the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenSide {
    /// The asset whose reserve is `reserve_a`.
    A,
    /// The asset whose reserve is `reserve_b`.
    B,
}

impl TokenSide {
    /// Returns the opposite side.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Returns `true` for [`TokenSide::A`].
    #[must_use]
    pub const fn is_a(self) -> bool {
        matches!(self, Self::A)
    }

    /// Maps the `token_in_is_a` flag used by quote queries to a side.
    #[must_use]
    pub const fn from_is_a(is_a: bool) -> Self {
        if is_a { Self::A } else { Self::B }
    }
}

impl fmt::Display for TokenSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// The pool's ordered pair of distinct tokens.
///
/// Unlike a canonically sorted pair, the order here is the deployment
/// order: `token_a` backs `reserve_a` and the spot price is quoted as
/// B per A.
///
/// # Examples
///
/// ```
/// use bastion_amm::domain::{TokenAddress, TokenPair, TokenSide};
///
/// let tka = TokenAddress::from_bytes([1u8; 32]);
/// let tkb = TokenAddress::from_bytes([2u8; 32]);
/// let pair = TokenPair::new(tka, tkb).expect("distinct tokens");
/// assert_eq!(pair.side_of(&tkb), Ok(TokenSide::B));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenPair {
    token_a: TokenAddress,
    token_b: TokenAddress,
}

impl TokenPair {
    /// Creates a new `TokenPair`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if both addresses are equal.
    pub fn new(token_a: TokenAddress, token_b: TokenAddress) -> Result<Self, AmmError> {
        if token_a == token_b {
            return Err(AmmError::InvalidToken(
                "token pair requires two distinct addresses",
            ));
        }
        Ok(Self { token_a, token_b })
    }

    /// Returns the token backing `reserve_a`.
    #[must_use]
    pub const fn token_a(&self) -> TokenAddress {
        self.token_a
    }

    /// Returns the token backing `reserve_b`.
    #[must_use]
    pub const fn token_b(&self) -> TokenAddress {
        self.token_b
    }

    /// Returns the token on `side`.
    #[must_use]
    pub const fn token(&self, side: TokenSide) -> TokenAddress {
        match side {
            TokenSide::A => self.token_a,
            TokenSide::B => self.token_b,
        }
    }

    /// Returns `true` if the given token is part of this pair.
    #[must_use]
    pub fn contains(&self, token: &TokenAddress) -> bool {
        self.token_a == *token || self.token_b == *token
    }

    /// Returns which side of the pool `token` sits on.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if `token` is not in the pair.
    pub fn side_of(&self, token: &TokenAddress) -> Result<TokenSide, AmmError> {
        if *token == self.token_a {
            Ok(TokenSide::A)
        } else if *token == self.token_b {
            Ok(TokenSide::B)
        } else {
            Err(AmmError::InvalidToken("token is not part of the pool pair"))
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn tka() -> TokenAddress {
        TokenAddress::from_bytes([1u8; 32])
    }

    fn tkb() -> TokenAddress {
        TokenAddress::from_bytes([2u8; 32])
    }

    #[test]
    fn keeps_deployment_order() {
        let Ok(pair) = TokenPair::new(tkb(), tka()) else {
            panic!("expected valid pair");
        };
        assert_eq!(pair.token_a(), tkb());
        assert_eq!(pair.token_b(), tka());
    }

    #[test]
    fn same_token_rejected() {
        let Err(AmmError::InvalidToken(_)) = TokenPair::new(tka(), tka()) else {
            panic!("expected InvalidToken");
        };
    }

    #[test]
    fn side_lookup() {
        let Ok(pair) = TokenPair::new(tka(), tkb()) else {
            panic!("expected valid pair");
        };
        assert_eq!(pair.side_of(&tka()), Ok(TokenSide::A));
        assert_eq!(pair.side_of(&tkb()), Ok(TokenSide::B));
        assert!(pair.side_of(&TokenAddress::from_bytes([9u8; 32])).is_err());
        assert_eq!(pair.token(TokenSide::B), tkb());
        assert!(pair.contains(&tka()));
    }

    #[test]
    fn side_other_and_flag() {
        assert_eq!(TokenSide::A.other(), TokenSide::B);
        assert_eq!(TokenSide::from_is_a(false), TokenSide::B);
        assert!(TokenSide::from_is_a(true).is_a());
    }
}
