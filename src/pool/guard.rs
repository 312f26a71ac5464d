//! Guard layer: emergency halt, price-impact bound and front-run cooldown.
//!
//! Each mutating call builds a read-only [`GuardContext`] and runs an
//! ordered pipeline of pure validators over it.  The first failure rejects
//! the call with no side effects; if every validator passes the pipeline
//! mints an [`Approval`], the only way to obtain one, and the ledger's
//! commit steps demand it.
//!
//! | Pipeline           | Validators (in order)                          |
//! |--------------------|------------------------------------------------|
//! | [`SwapGuard`]      | emergency, caller, price impact, front-run     |
//! | [`LiquidityGuard`] | emergency, caller                              |

use core::marker::PhantomData;

use tracing::{debug, warn};

use crate::config::GuardConfig;
use crate::domain::{AccountId, BasisPoints, BlockIndex};
use crate::error::{AmmError, Result};

/// Everything a validator may look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardContext {
    /// Account making the call.
    pub caller: AccountId,
    /// Account holding the pool's reserves.
    pub pool_account: AccountId,
    /// Block the call executes in.
    pub block: BlockIndex,
    /// Whether the pool is permanently halted.
    pub emergency_halted: bool,
    /// Current protection parameters.
    pub protection: GuardConfig,
    /// Caller's most recent swap, if any.
    pub last_swap_block: Option<BlockIndex>,
    /// Impact of the quoted swap; `None` when no quote could be produced
    /// or the call is not a swap.
    pub price_impact: Option<BasisPoints>,
}

/// A pure check over a [`GuardContext`].
pub type Validator = fn(&GuardContext) -> Result<()>;

/// Rejects every call on a halted pool.
///
/// # Errors
///
/// Returns [`AmmError::EmergencyActive`] when halted.
pub fn check_emergency(ctx: &GuardContext) -> Result<()> {
    if ctx.emergency_halted {
        return Err(AmmError::EmergencyActive);
    }
    Ok(())
}

/// Rejects calls made by the pool's own reserve account.
///
/// Its transfers to and from the pool are self-transfers that move no
/// tokens.
///
/// # Errors
///
/// Returns [`AmmError::Unauthorized`] when the caller is the pool account.
pub fn check_caller(ctx: &GuardContext) -> Result<()> {
    if ctx.caller == ctx.pool_account {
        return Err(AmmError::Unauthorized);
    }
    Ok(())
}

/// Rejects swaps moving the price further than `max_slippage_bps`.
///
/// A call without a quote passes; the quoting error is reported after the
/// pipeline.
///
/// # Errors
///
/// Returns [`AmmError::PriceImpactTooHigh`] when the impact exceeds the
/// bound.
pub fn check_price_impact(ctx: &GuardContext) -> Result<()> {
    match ctx.price_impact {
        Some(impact) if impact > ctx.protection.max_slippage_bps() => {
            Err(AmmError::PriceImpactTooHigh)
        }
        _ => Ok(()),
    }
}

/// Rejects a caller swapping again within the cooldown window.
///
/// # Errors
///
/// Returns [`AmmError::FrontRunProtectionActive`] if fewer than
/// `cooldown_blocks` blocks passed since the caller's last swap.
pub fn check_front_run(ctx: &GuardContext) -> Result<()> {
    let cooldown = ctx.protection.cooldown_blocks();
    match ctx.last_swap_block {
        Some(last) if cooldown > 0 && ctx.block.blocks_since(last) < cooldown => {
            Err(AmmError::FrontRunProtectionActive)
        }
        _ => Ok(()),
    }
}

/// A named, ordered validator pipeline.
pub trait GuardKind {
    /// Pipeline name, for logs.
    const NAME: &'static str;
    /// Validators, run in order.
    const VALIDATORS: &'static [Validator];
}

/// Pipeline guarding `swap`.
#[derive(Debug)]
pub enum SwapGuard {}

impl GuardKind for SwapGuard {
    const NAME: &'static str = "swap";
    const VALIDATORS: &'static [Validator] =
        &[check_emergency, check_caller, check_price_impact, check_front_run];
}

/// Pipeline guarding `add_liquidity` and `remove_liquidity`.
#[derive(Debug)]
pub enum LiquidityGuard {}

impl GuardKind for LiquidityGuard {
    const NAME: &'static str = "liquidity";
    const VALIDATORS: &'static [Validator] = &[check_emergency, check_caller];
}

/// Proof that pipeline `K` approved the current call.
///
/// Not `Clone`: each approval authorises exactly one commit.
#[derive(Debug)]
#[must_use]
pub struct Approval<K: GuardKind> {
    _kind: PhantomData<K>,
}

/// Runs pipeline `K` over `ctx`.
///
/// # Errors
///
/// Returns the first validator error.
pub fn evaluate<K: GuardKind>(ctx: &GuardContext) -> Result<Approval<K>> {
    for validator in K::VALIDATORS {
        if let Err(err) = validator(ctx) {
            warn!(
                pipeline = K::NAME,
                caller = %ctx.caller,
                block = %ctx.block,
                error = %err,
                "guard rejected call"
            );
            return Err(err);
        }
    }
    debug!(pipeline = K::NAME, caller = %ctx.caller, block = %ctx.block, "guard approved call");
    Ok(Approval { _kind: PhantomData })
}


#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const ALICE: AccountId = AccountId::from_bytes([1u8; 32]);
    const VAULT: AccountId = AccountId::from_bytes([9u8; 32]);

    fn ctx() -> GuardContext {
        GuardContext {
            caller: ALICE,
            pool_account: VAULT,
            block: BlockIndex::new(100),
            emergency_halted: false,
            protection: GuardConfig::default(),
            last_swap_block: None,
            price_impact: Some(BasisPoints::new(100)),
        }
    }

    fn protection(max_slippage: u32, cooldown: u64) -> GuardConfig {
        match GuardConfig::new(BasisPoints::new(max_slippage), cooldown) {
            Ok(cfg) => cfg,
            Err(err) => panic!("valid guard config: {err}"),
        }
    }

    #[test]
    fn clean_context_passes_both_pipelines() {
        assert!(evaluate::<SwapGuard>(&ctx()).is_ok());
        assert!(evaluate::<LiquidityGuard>(&ctx()).is_ok());
    }

    #[test]
    fn emergency_blocks_everything() {
        let c = GuardContext {
            emergency_halted: true,
            ..ctx()
        };
        assert_eq!(evaluate::<SwapGuard>(&c).err(), Some(AmmError::EmergencyActive));
        assert_eq!(
            evaluate::<LiquidityGuard>(&c).err(),
            Some(AmmError::EmergencyActive)
        );
    }

    #[test]
    fn emergency_checked_before_impact() {
        let c = GuardContext {
            emergency_halted: true,
            price_impact: Some(BasisPoints::MAX_PERCENT),
            ..ctx()
        };
        assert_eq!(evaluate::<SwapGuard>(&c).err(), Some(AmmError::EmergencyActive));
    }

    #[test]
    fn impact_at_bound_passes_above_rejected() {
        let at = GuardContext {
            protection: protection(500, 0),
            price_impact: Some(BasisPoints::new(500)),
            ..ctx()
        };
        assert!(check_price_impact(&at).is_ok());
        let above = GuardContext {
            price_impact: Some(BasisPoints::new(501)),
            ..at
        };
        assert_eq!(check_price_impact(&above), Err(AmmError::PriceImpactTooHigh));
    }

    #[test]
    fn liquidity_pipeline_ignores_impact() {
        let c = GuardContext {
            protection: protection(0, 0),
            price_impact: Some(BasisPoints::MAX_PERCENT),
            ..ctx()
        };
        assert!(evaluate::<LiquidityGuard>(&c).is_ok());
    }

    #[test]
    fn cooldown_window() {
        let base = GuardContext {
            protection: protection(1_000, 10),
            last_swap_block: Some(BlockIndex::new(100)),
            ..ctx()
        };
        assert_eq!(check_front_run(&base), Err(AmmError::FrontRunProtectionActive));
        let almost = GuardContext {
            block: BlockIndex::new(109),
            ..base
        };
        assert_eq!(check_front_run(&almost), Err(AmmError::FrontRunProtectionActive));
        let after = GuardContext {
            block: BlockIndex::new(110),
            ..base
        };
        assert!(check_front_run(&after).is_ok());
    }

    #[test]
    fn zero_cooldown_disables_check() {
        let c = GuardContext {
            protection: protection(1_000, 0),
            last_swap_block: Some(BlockIndex::new(100)),
            ..ctx()
        };
        assert!(check_front_run(&c).is_ok());
    }

    #[test]
    fn first_swap_never_cooled_down() {
        let c = GuardContext {
            protection: protection(1_000, u64::MAX),
            ..ctx()
        };
        assert!(check_front_run(&c).is_ok());
    }

    #[test]
    fn pool_account_cannot_call() {
        let c = GuardContext {
            caller: VAULT,
            ..ctx()
        };
        assert_eq!(check_caller(&c), Err(AmmError::Unauthorized));
        assert_eq!(evaluate::<SwapGuard>(&c).err(), Some(AmmError::Unauthorized));
        assert_eq!(
            evaluate::<LiquidityGuard>(&c).err(),
            Some(AmmError::Unauthorized)
        );
        let halted = GuardContext {
            emergency_halted: true,
            ..c
        };
        assert_eq!(
            evaluate::<LiquidityGuard>(&halted).err(),
            Some(AmmError::EmergencyActive)
        );
    }

    #[test]
    fn pipeline_order() {
        assert_eq!(SwapGuard::VALIDATORS.len(), 4);
        assert_eq!(LiquidityGuard::VALIDATORS.len(), 2);
    }
}
