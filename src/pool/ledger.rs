//! Reserve ledger: reserves, share supply and the per-account arena.
//!
//! Every mutation is split in two phases:
//!
//! 1. **plan** (`plan_deposit`, `plan_withdraw`, `plan_swap`): pure; reads
//!    the current state, performs all checked arithmetic and returns a plan
//!    carrying the complete next state, or an error.
//! 2. **commit** (`commit_deposit`, `commit_withdraw`, `commit_swap`):
//!    infallible field assignment from the plan.  Commits require an
//!    [`Approval`] from the guard pipeline.
//!
//! A plan is only valid against the state it was computed from; the façade
//! plans and commits within a single `&mut self` call.
//!
//! # Share Minting
//!
//! | Case            | Minted shares                                  |
//! |-----------------|------------------------------------------------|
//! | First deposit   | `⌊√(amount_a × amount_b)⌋`                     |
//! | Later deposits  | `min(amount_a × T / reserve_a, amount_b × T / reserve_b)` |
//!
//! The full deposited amounts always enter the reserves.

use std::collections::HashMap;

use ethnum::U256;
use serde::{Deserialize, Serialize};

use super::guard::{Approval, GuardKind, LiquidityGuard, SwapGuard};
use crate::domain::{
    AccountId, Amount, BasisPoints, BlockIndex, Liquidity, Rounding, SwapQuote, TokenSide,
    UserInfo, BPS_DENOMINATOR,
};
use crate::error::{AmmError, Result};
use crate::math::{geometric_mean, mul_div, wide_mul, CheckedArithmetic};

/// Reserve balances plus the deposit baseline the fee curve measures
/// imbalance against.
///
/// `baseline_a` / `baseline_b` accumulate deposited amounts and shrink
/// proportionally on withdrawal; swaps never touch them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReserveState {
    /// Token A held by the pool.
    pub reserve_a: Amount,
    /// Token B held by the pool.
    pub reserve_b: Amount,
    /// Deposit baseline for token A.
    pub baseline_a: Amount,
    /// Deposit baseline for token B.
    pub baseline_b: Amount,
}

impl ReserveState {
    /// Reserve on `side`.
    #[must_use]
    pub const fn reserve(&self, side: TokenSide) -> Amount {
        match side {
            TokenSide::A => self.reserve_a,
            TokenSide::B => self.reserve_b,
        }
    }

    /// Copy with the `side` reserve replaced by `amount`.
    #[must_use]
    pub const fn with_reserve(self, side: TokenSide, amount: Amount) -> Self {
        match side {
            TokenSide::A => Self {
                reserve_a: amount,
                ..self
            },
            TokenSide::B => Self {
                reserve_b: amount,
                ..self
            },
        }
    }

    /// `reserve_a × reserve_b` without overflow.
    #[must_use]
    pub fn product(&self) -> U256 {
        wide_mul(self.reserve_a.get(), self.reserve_b.get())
    }

    /// `true` when either reserve is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.reserve_a.is_zero() || self.reserve_b.is_zero()
    }
}

/// Per-account record, created on the first mutating interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct AccountEntry {
    shares: Liquidity,
    last_swap_block: Option<BlockIndex>,
}

/// A deposit validated against the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct DepositPlan {
    account: AccountId,
    amount_a: Amount,
    amount_b: Amount,
    minted: Liquidity,
    next: ReserveState,
    next_total: Liquidity,
    next_account_shares: Liquidity,
}

impl DepositPlan {
    /// Token A to pull from the depositor.
    pub const fn amount_a(&self) -> Amount {
        self.amount_a
    }

    /// Token B to pull from the depositor.
    pub const fn amount_b(&self) -> Amount {
        self.amount_b
    }

    /// Shares the deposit mints.
    pub const fn minted(&self) -> Liquidity {
        self.minted
    }

    /// Reserves after commit.
    pub const fn next_state(&self) -> ReserveState {
        self.next
    }
}

/// A withdrawal validated against the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct WithdrawPlan {
    account: AccountId,
    burned: Liquidity,
    amount_a: Amount,
    amount_b: Amount,
    prior: ReserveState,
    next: ReserveState,
    next_total: Liquidity,
    next_account_shares: Liquidity,
}

impl WithdrawPlan {
    /// Token A paid out.
    pub const fn amount_a(&self) -> Amount {
        self.amount_a
    }

    /// Token B paid out.
    pub const fn amount_b(&self) -> Amount {
        self.amount_b
    }

    /// Shares burned.
    pub const fn burned(&self) -> Liquidity {
        self.burned
    }

    /// The same withdrawal with the `side` payout left in the reserves.
    ///
    /// Used when that payout could not be delivered after the other one
    /// was: the shares are still burned and the undelivered tokens stay
    /// with the remaining holders.
    pub const fn retaining(self, side: TokenSide) -> Self {
        let next = self.next.with_reserve(side, self.prior.reserve(side));
        match side {
            TokenSide::A => Self {
                amount_a: Amount::ZERO,
                next,
                ..self
            },
            TokenSide::B => Self {
                amount_b: Amount::ZERO,
                next,
                ..self
            },
        }
    }

    /// Reserves after commit.
    pub const fn next_state(&self) -> ReserveState {
        self.next
    }
}

/// A swap validated against the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct SwapPlan {
    account: AccountId,
    block: BlockIndex,
    quote: SwapQuote,
    next: ReserveState,
    next_fees_a: Amount,
    next_fees_b: Amount,
}

impl SwapPlan {
    /// The quote this plan executes.
    pub const fn quote(&self) -> &SwapQuote {
        &self.quote
    }

    /// Reserves after commit.
    pub const fn next_state(&self) -> ReserveState {
        self.next
    }
}

/// Reserves, share supply, lifetime fee counters and the account arena.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReserveLedger {
    state: ReserveState,
    total_shares: Liquidity,
    accumulated_fees_a: Amount,
    accumulated_fees_b: Amount,
    accounts: HashMap<AccountId, AccountEntry>,
}

impl ReserveLedger {
    /// An empty ledger: zero reserves, zero shares, no accounts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current reserves and baseline.
    #[must_use]
    pub const fn state(&self) -> ReserveState {
        self.state
    }

    /// Outstanding shares.
    #[must_use]
    pub const fn total_shares(&self) -> Liquidity {
        self.total_shares
    }

    /// Lifetime fees charged on token A input.
    #[must_use]
    pub const fn accumulated_fees_a(&self) -> Amount {
        self.accumulated_fees_a
    }

    /// Lifetime fees charged on token B input.
    #[must_use]
    pub const fn accumulated_fees_b(&self) -> Amount {
        self.accumulated_fees_b
    }

    /// Number of accounts that ever deposited or swapped.
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Shares held by `account`.
    #[must_use]
    pub fn shares_of(&self, account: AccountId) -> Liquidity {
        self.accounts
            .get(&account)
            .map_or(Liquidity::ZERO, |entry| entry.shares)
    }

    /// Block of `account`'s most recent swap.
    #[must_use]
    pub fn last_swap_block(&self, account: AccountId) -> Option<BlockIndex> {
        self.accounts
            .get(&account)
            .and_then(|entry| entry.last_swap_block)
    }

    /// Shares a deposit of `(amount_a, amount_b)` would mint now.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] if either amount is zero or the deposit
    ///   is too small to mint a share.
    /// - [`AmmError::Overflow`] on arithmetic overflow.
    pub fn shares_for_deposit(&self, amount_a: Amount, amount_b: Amount) -> Result<Liquidity> {
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(AmmError::InvalidAmount("deposit requires both tokens"));
        }

        let minted = if self.total_shares.is_zero() {
            geometric_mean(amount_a.get(), amount_b.get())
        } else {
            let total = self.total_shares.get();
            let by_a = mul_div(amount_a.get(), total, self.state.reserve_a.get(), Rounding::Down)?;
            let by_b = mul_div(amount_b.get(), total, self.state.reserve_b.get(), Rounding::Down)?;
            by_a.min(by_b)
        };

        if minted == 0 {
            return Err(AmmError::InvalidAmount("deposit too small to mint liquidity"));
        }
        Ok(Liquidity::new(minted))
    }

    /// Plans a deposit by `account`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] if the deposit mints nothing.
    /// - [`AmmError::InsufficientOutput`] if fewer than `min_shares` would
    ///   be minted.
    /// - [`AmmError::Overflow`] if a reserve or the share supply overflows.
    pub fn plan_deposit(
        &self,
        account: AccountId,
        amount_a: Amount,
        amount_b: Amount,
        min_shares: Liquidity,
    ) -> Result<DepositPlan> {
        let minted = self.shares_for_deposit(amount_a, amount_b)?;
        if minted < min_shares {
            return Err(AmmError::InsufficientOutput);
        }

        let next = ReserveState {
            reserve_a: self.state.reserve_a.safe_add(&amount_a)?,
            reserve_b: self.state.reserve_b.safe_add(&amount_b)?,
            baseline_a: self.state.baseline_a.safe_add(&amount_a)?,
            baseline_b: self.state.baseline_b.safe_add(&amount_b)?,
        };

        Ok(DepositPlan {
            account,
            amount_a,
            amount_b,
            minted,
            next,
            next_total: self.total_shares.safe_add(&minted)?,
            next_account_shares: self.shares_of(account).safe_add(&minted)?,
        })
    }

    /// Plans burning `shares` held by `account`.
    ///
    /// Burning the last outstanding share pays out the full reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] if `shares` is zero or redeems nothing.
    /// - [`AmmError::InsufficientShares`] if `account` holds fewer shares.
    pub fn plan_withdraw(&self, account: AccountId, shares: Liquidity) -> Result<WithdrawPlan> {
        if shares.is_zero() {
            return Err(AmmError::InvalidAmount("cannot burn zero shares"));
        }
        let held = self.shares_of(account);
        if held < shares {
            return Err(AmmError::InsufficientShares);
        }

        let total = self.total_shares.get();
        let burned = shares.get();
        let s = self.state;
        let amount_a = Amount::new(mul_div(s.reserve_a.get(), burned, total, Rounding::Down)?);
        let amount_b = Amount::new(mul_div(s.reserve_b.get(), burned, total, Rounding::Down)?);
        if amount_a.is_zero() && amount_b.is_zero() {
            return Err(AmmError::InvalidAmount("withdrawal too small to redeem"));
        }

        let remaining = total
            .checked_sub(burned)
            .ok_or(AmmError::Underflow("share supply underflow"))?;
        let next = ReserveState {
            reserve_a: s.reserve_a.safe_sub(&amount_a)?,
            reserve_b: s.reserve_b.safe_sub(&amount_b)?,
            baseline_a: Amount::new(mul_div(s.baseline_a.get(), remaining, total, Rounding::Down)?),
            baseline_b: Amount::new(mul_div(s.baseline_b.get(), remaining, total, Rounding::Down)?),
        };

        Ok(WithdrawPlan {
            account,
            burned: shares,
            amount_a,
            amount_b,
            prior: s,
            next,
            next_total: Liquidity::new(remaining),
            next_account_shares: held.safe_sub(&shares)?,
        })
    }

    /// Plans executing `quote` for `account` at `block`.
    ///
    /// The input reserve grows by the gross input (fee included), the
    /// output reserve shrinks by the output, and the fee is added to the
    /// input side's lifetime counter.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvariantViolation`] if the output would drain the
    ///   reserve or the reserve product would decrease.
    /// - [`AmmError::Overflow`] / [`AmmError::Underflow`] on checked
    ///   arithmetic failure.
    pub fn plan_swap(
        &self,
        account: AccountId,
        block: BlockIndex,
        quote: SwapQuote,
    ) -> Result<SwapPlan> {
        let side_in = quote.side_in();
        let reserve_in = self.state.reserve(side_in);
        let reserve_out = self.state.reserve(side_in.other());
        if quote.amount_out() >= reserve_out {
            return Err(AmmError::InvariantViolation("swap output drains reserve"));
        }

        let new_in = reserve_in.safe_add(&quote.amount_in())?;
        let new_out = reserve_out.safe_sub(&quote.amount_out())?;
        let mut next = self.state;
        let (mut fees_a, mut fees_b) = (self.accumulated_fees_a, self.accumulated_fees_b);
        match side_in {
            TokenSide::A => {
                next.reserve_a = new_in;
                next.reserve_b = new_out;
                fees_a = fees_a.safe_add(&quote.fee())?;
            }
            TokenSide::B => {
                next.reserve_b = new_in;
                next.reserve_a = new_out;
                fees_b = fees_b.safe_add(&quote.fee())?;
            }
        }

        if next.product() < self.state.product() {
            return Err(AmmError::InvariantViolation("reserve product decreased"));
        }

        Ok(SwapPlan {
            account,
            block,
            quote,
            next,
            next_fees_a: fees_a,
            next_fees_b: fees_b,
        })
    }

    /// Applies a deposit plan.
    pub fn commit_deposit(&mut self, plan: DepositPlan, _approval: Approval<LiquidityGuard>) {
        self.state = plan.next;
        self.total_shares = plan.next_total;
        self.accounts.entry(plan.account).or_default().shares = plan.next_account_shares;
    }

    /// Applies a withdrawal plan.
    pub fn commit_withdraw(&mut self, plan: WithdrawPlan, _approval: Approval<LiquidityGuard>) {
        self.state = plan.next;
        self.total_shares = plan.next_total;
        self.accounts.entry(plan.account).or_default().shares = plan.next_account_shares;
    }

    /// Applies a swap plan and records the caller's swap block.
    pub fn commit_swap(&mut self, plan: SwapPlan, _approval: Approval<SwapGuard>) {
        self.state = plan.next;
        self.accumulated_fees_a = plan.next_fees_a;
        self.accumulated_fees_b = plan.next_fees_b;
        self.accounts.entry(plan.account).or_default().last_swap_block = Some(plan.block);
    }

    /// Moves the `side` reserve to its value in `planned`, leaving shares,
    /// baseline, fee counters and accounts untouched.
    ///
    /// Reconciles tokens a settlement left in the pool account after the
    /// operation itself was abandoned.
    pub fn absorb<K: GuardKind>(
        &mut self,
        side: TokenSide,
        planned: &ReserveState,
        _approval: Approval<K>,
    ) {
        self.state = self.state.with_reserve(side, planned.reserve(side));
    }

    /// Position report for `account` at current reserves.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] only on an internal arithmetic fault.
    pub fn user_info(&self, account: AccountId) -> Result<UserInfo> {
        let shares = self.shares_of(account);
        if shares.is_zero() || self.total_shares.is_zero() {
            return Ok(UserInfo {
                shares,
                ..UserInfo::EMPTY
            });
        }
        let total = self.total_shares.get();
        let share_bps = mul_div(shares.get(), u128::from(BPS_DENOMINATOR), total, Rounding::Down)?;
        let share_bps = u32::try_from(share_bps)
            .map_err(|_| AmmError::InvariantViolation("account holds more than total shares"))?;
        Ok(UserInfo {
            shares,
            share_bps: BasisPoints::new(share_bps),
            est_value_a: Amount::new(mul_div(
                self.state.reserve_a.get(),
                shares.get(),
                total,
                Rounding::Down,
            )?),
            est_value_b: Amount::new(mul_div(
                self.state.reserve_b.get(),
                shares.get(),
                total,
                Rounding::Down,
            )?),
        })
    }
}
