//! Top-level pool configuration.

use serde::{Deserialize, Serialize};

use super::{DynamicFeeConfig, GuardConfig};
use crate::domain::{AccountId, TokenPair};
use crate::error::AmmError;

/// Everything needed to deploy a [`GuardedPool`](crate::pool::GuardedPool).
///
/// - `token_pair`: the two assets, in deployment order (A, B).
/// - `owner`: the only account allowed to call admin operations.
/// - `pool_account`: the account that holds the reserves on both token
///   ledgers.
/// - `fee` / `guard`: optional sections, defaulted when omitted from a
///   serialized config.
///
/// # Example
///
/// ```rust
/// use bastion_amm::config::PoolConfig;
///
/// let json = r#"{
///     "token_pair": { "token_a": [1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1],
///                     "token_b": [2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2] },
///     "owner":        [7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7],
///     "pool_account": [8,8,8,8,8,8,8,8,8,8,8,8,8,8,8,8,8,8,8,8,8,8,8,8,8,8,8,8,8,8,8,8]
/// }"#;
/// let cfg: PoolConfig = serde_json::from_str(json).expect("valid json");
/// assert!(cfg.validate().is_ok());
/// assert_eq!(cfg.guard().cooldown_blocks(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    token_pair: TokenPair,
    owner: AccountId,
    pool_account: AccountId,
    #[serde(default)]
    fee: DynamicFeeConfig,
    #[serde(default)]
    guard: GuardConfig,
}

impl PoolConfig {
    /// Creates a validated pool configuration.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if both tokens are the same.
    /// - [`AmmError::InvalidConfiguration`] from the fee or guard section.
    pub fn new(
        token_pair: TokenPair,
        owner: AccountId,
        pool_account: AccountId,
        fee: DynamicFeeConfig,
        guard: GuardConfig,
    ) -> Result<Self, AmmError> {
        let config = Self {
            token_pair,
            owner,
            pool_account,
            fee,
            guard,
        };
        config.validate()?;
        Ok(config)
    }

    /// Pool configuration with default fee and guard sections.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if both tokens are the same.
    pub fn with_defaults(
        token_pair: TokenPair,
        owner: AccountId,
        pool_account: AccountId,
    ) -> Result<Self, AmmError> {
        Self::new(
            token_pair,
            owner,
            pool_account,
            DynamicFeeConfig::default(),
            GuardConfig::default(),
        )
    }

    /// Validates all configuration invariants.
    ///
    /// A deserialized config bypasses [`TokenPair::new`], so the pair is
    /// re-checked here.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if both tokens are the same.
    /// - [`AmmError::InvalidConfiguration`] from the fee or guard section.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.token_pair.token_a() == self.token_pair.token_b() {
            return Err(AmmError::InvalidToken("token pair must be distinct"));
        }
        self.fee.validate()?;
        self.guard.validate()
    }

    /// Returns the token pair.
    #[must_use]
    pub const fn token_pair(&self) -> &TokenPair {
        &self.token_pair
    }

    /// Returns the admin account.
    #[must_use]
    pub const fn owner(&self) -> AccountId {
        self.owner
    }

    /// Returns the account holding the reserves.
    #[must_use]
    pub const fn pool_account(&self) -> AccountId {
        self.pool_account
    }

    /// Returns the fee curve section.
    #[must_use]
    pub const fn fee(&self) -> DynamicFeeConfig {
        self.fee
    }

    /// Returns the initial guard parameters.
    #[must_use]
    pub const fn guard(&self) -> GuardConfig {
        self.guard
    }
}
