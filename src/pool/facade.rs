//! The guarded pool: public operations over ledger, pricing and guards.
//!
//! Every mutating call follows the same sequence:
//!
//! 1. quote (swaps only; pure)
//! 2. guard pipeline → [`Approval`]
//! 3. ledger plan (pure, all checked arithmetic)
//! 4. token transfers, preflighted, with pulls before payouts
//! 5. ledger commit (infallible) and fee refresh
//! 6. event emission
//!
//! An error at any step before 5 leaves pool state untouched, with one
//! exception: when a token ledger refuses a transfer it approved in the
//! preflight and the leg already executed cannot be returned, the ledger
//! is reconciled with the tokens actually held and the call fails with
//! [`AmmError::InvariantViolation`].

use tracing::{debug, error, info, warn};

use super::guard::{self, Approval, GuardContext, LiquidityGuard, SwapGuard};
use super::ledger::ReserveLedger;
use super::metrics::PoolMetrics;
use super::pricing;
use crate::config::{GuardConfig, PoolConfig};
use crate::domain::{
    AccountId, Amount, BasisPoints, BlockIndex, CallContext, Liquidity, PoolEvent, Price,
    SwapQuote, TokenAddress, TokenPair, TokenSide, UserInfo,
};
use crate::error::{AmmError, Result};
use crate::traits::{EventLog, EventSink, TokenError, TokenLedger};

/// One side of a two-legged settlement.
#[derive(Debug, Clone, Copy)]
enum Leg {
    /// Move tokens from `account` into the pool (allowance based).
    Pull {
        side: TokenSide,
        account: AccountId,
        amount: Amount,
    },
    /// Move tokens from the pool to `account`.
    Push {
        side: TokenSide,
        account: AccountId,
        amount: Amount,
    },
}

impl Leg {
    const fn amount(&self) -> Amount {
        match *self {
            Self::Pull { amount, .. } | Self::Push { amount, .. } => amount,
        }
    }

    const fn side(&self) -> TokenSide {
        match *self {
            Self::Pull { side, .. } | Self::Push { side, .. } => side,
        }
    }
}

/// A settlement that did not complete.
#[derive(Debug, Clone, Copy)]
struct Unsettled {
    error: TokenError,
    /// An executed leg still in effect; the ledger must account for it.
    stranded: Option<Leg>,
}

impl Unsettled {
    fn into_error(self) -> AmmError {
        match self.stranded {
            None => self.error.into(),
            Some(_) => AmmError::InvariantViolation("settlement left a transfer in place"),
        }
    }
}

fn log_fault(err: &AmmError) {
    if err.is_internal_fault() {
        error!(error = %err, "internal fault, call aborted");
    }
}

/// A constant-product pool with dynamic fees and MEV guards.
///
/// Owns its two token ledgers and its event sink, so independent pools
/// never share state.
///
/// # Example
///
/// ```rust
/// use bastion_amm::prelude::*;
///
/// let owner = AccountId::from_bytes([1u8; 32]);
/// let alice = AccountId::from_bytes([2u8; 32]);
/// let vault = AccountId::from_bytes([3u8; 32]);
/// let (addr_a, addr_b) = (TokenAddress::from_bytes([10u8; 32]), TokenAddress::from_bytes([11u8; 32]));
///
/// let pair = TokenPair::new(addr_a, addr_b).expect("distinct");
/// let config = PoolConfig::with_defaults(pair, owner, vault).expect("valid config");
/// let mut pool = GuardedPool::new(config, InMemoryToken::new(addr_a), InMemoryToken::new(addr_b))
///     .expect("pool created");
///
/// let deposit = Amount::from_tokens(1_000).expect("fits");
/// let (token_a, token_b) = pool.tokens_mut();
/// for token in [token_a, token_b] {
///     token.mint(alice, deposit).expect("mint");
///     token.approve(alice, vault, deposit).expect("approve");
/// }
///
/// let ctx = CallContext::new(alice, BlockIndex::new(1));
/// let shares = pool.add_liquidity(ctx, deposit, deposit, Liquidity::ZERO).expect("deposit");
/// assert_eq!(shares, pool.total_liquidity_tokens());
/// assert_eq!(pool.get_reserves(), (deposit, deposit));
/// ```
#[derive(Debug, Clone)]
pub struct GuardedPool<T: TokenLedger, E: EventSink = EventLog> {
    config: PoolConfig,
    token_a: T,
    token_b: T,
    events: E,
    ledger: ReserveLedger,
    protection: GuardConfig,
    dynamic_fee_rate: BasisPoints,
    emergency_halted: bool,
}

impl<T: TokenLedger> GuardedPool<T, EventLog> {
    /// Creates an empty pool recording events in an [`EventLog`].
    ///
    /// # Errors
    ///
    /// Propagates any error from [`PoolConfig::validate`].
    pub fn new(config: PoolConfig, token_a: T, token_b: T) -> Result<Self> {
        Self::with_event_sink(config, token_a, token_b, EventLog::new())
    }
}

impl<T: TokenLedger, E: EventSink> GuardedPool<T, E> {
    /// Creates an empty pool emitting into `events`.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`PoolConfig::validate`].
    pub fn with_event_sink(config: PoolConfig, token_a: T, token_b: T, events: E) -> Result<Self> {
        config.validate()?;
        let ledger = ReserveLedger::new();
        let dynamic_fee_rate = pricing::dynamic_fee_rate(&ledger.state(), &config.fee())?;
        info!(
            token_a = %config.token_pair().token_a(),
            token_b = %config.token_pair().token_b(),
            owner = %config.owner(),
            "pool created"
        );
        Ok(Self {
            protection: config.guard(),
            config,
            token_a,
            token_b,
            events,
            ledger,
            dynamic_fee_rate,
            emergency_halted: false,
        })
    }

    // -- Mutating operations ------------------------------------------------

    /// Deposits both tokens and mints shares to the caller.
    ///
    /// The caller must have approved the pool account for both amounts.
    ///
    /// # Errors
    ///
    /// - [`AmmError::EmergencyActive`] if the pool is halted.
    /// - [`AmmError::InvalidAmount`] if the deposit mints nothing.
    /// - [`AmmError::InsufficientOutput`] if fewer than `min_shares` would
    ///   be minted.
    /// - [`AmmError::Unauthorized`] if the caller is the pool account.
    /// - [`AmmError::Token`] if either transfer is refused.
    /// - [`AmmError::InvariantViolation`] if a pulled token could not be
    ///   returned; it is added to the reserves without minting shares.
    pub fn add_liquidity(
        &mut self,
        ctx: CallContext,
        amount_a: Amount,
        amount_b: Amount,
        min_shares: Liquidity,
    ) -> Result<Liquidity> {
        let approval: Approval<LiquidityGuard> =
            guard::evaluate(&self.guard_context(ctx, None))?;

        let plan = self
            .ledger
            .plan_deposit(ctx.caller(), amount_a, amount_b, min_shares)
            .inspect_err(log_fault)?;
        let next_fee = pricing::dynamic_fee_rate(&plan.next_state(), &self.config.fee())
            .inspect_err(log_fault)?;

        let settled = self.settle(
            Leg::Pull {
                side: TokenSide::A,
                account: ctx.caller(),
                amount: plan.amount_a(),
            },
            Leg::Pull {
                side: TokenSide::B,
                account: ctx.caller(),
                amount: plan.amount_b(),
            },
        );
        if let Err(unsettled) = settled {
            if let Some(kept) = unsettled.stranded {
                self.ledger.absorb(kept.side(), &plan.next_state(), approval);
                self.refresh_fee();
            }
            return Err(unsettled.into_error());
        }

        let minted = plan.minted();
        self.ledger.commit_deposit(plan, approval);
        self.dynamic_fee_rate = next_fee;

        info!(
            account = %ctx.caller(),
            block = %ctx.block(),
            %amount_a,
            %amount_b,
            shares = %minted,
            "liquidity added"
        );
        self.events.emit(PoolEvent::LiquidityAdded {
            account: ctx.caller(),
            amount_a,
            amount_b,
            shares_minted: minted,
        });
        Ok(minted)
    }

    /// Burns `shares` and pays the caller their pro-rata reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::EmergencyActive`] if the pool is halted.
    /// - [`AmmError::InsufficientShares`] if the caller holds fewer shares.
    /// - [`AmmError::InsufficientOutput`] if either payout is below its
    ///   minimum.
    /// - [`AmmError::Unauthorized`] if the caller is the pool account.
    /// - [`AmmError::Token`] if a payout is refused.
    /// - [`AmmError::InvariantViolation`] if one payout was delivered and
    ///   the other refused after its preflight.  The shares are burned and
    ///   the undelivered side stays in the reserves.
    pub fn remove_liquidity(
        &mut self,
        ctx: CallContext,
        shares: Liquidity,
        min_amount_a: Amount,
        min_amount_b: Amount,
    ) -> Result<(Amount, Amount)> {
        let approval: Approval<LiquidityGuard> =
            guard::evaluate(&self.guard_context(ctx, None))?;

        let plan = self
            .ledger
            .plan_withdraw(ctx.caller(), shares)
            .inspect_err(log_fault)?;
        if plan.amount_a() < min_amount_a || plan.amount_b() < min_amount_b {
            warn!(
                account = %ctx.caller(),
                amount_a = %plan.amount_a(),
                amount_b = %plan.amount_b(),
                "withdrawal below caller minimums"
            );
            return Err(AmmError::InsufficientOutput);
        }
        let next_fee = pricing::dynamic_fee_rate(&plan.next_state(), &self.config.fee())
            .inspect_err(log_fault)?;

        let settled = self.settle(
            Leg::Push {
                side: TokenSide::A,
                account: ctx.caller(),
                amount: plan.amount_a(),
            },
            Leg::Push {
                side: TokenSide::B,
                account: ctx.caller(),
                amount: plan.amount_b(),
            },
        );
        if let Err(unsettled) = settled {
            if let Some(delivered) = unsettled.stranded {
                let partial = plan.retaining(delivered.side().other());
                self.ledger.commit_withdraw(partial, approval);
                self.refresh_fee();
                self.events.emit(PoolEvent::LiquidityRemoved {
                    account: ctx.caller(),
                    amount_a: partial.amount_a(),
                    amount_b: partial.amount_b(),
                    shares_burned: partial.burned(),
                });
            }
            return Err(unsettled.into_error());
        }

        let (amount_a, amount_b, burned) = (plan.amount_a(), plan.amount_b(), plan.burned());
        self.ledger.commit_withdraw(plan, approval);
        self.dynamic_fee_rate = next_fee;

        info!(
            account = %ctx.caller(),
            block = %ctx.block(),
            %amount_a,
            %amount_b,
            shares = %burned,
            "liquidity removed"
        );
        self.events.emit(PoolEvent::LiquidityRemoved {
            account: ctx.caller(),
            amount_a,
            amount_b,
            shares_burned: burned,
        });
        Ok((amount_a, amount_b))
    }

    /// Sells `amount_in` of `token_in` for the other pool token.
    ///
    /// Guard rejections take precedence over quoting errors, so a halted
    /// pool always answers [`AmmError::EmergencyActive`].
    ///
    /// # Errors
    ///
    /// - [`AmmError::EmergencyActive`] if the pool is halted.
    /// - [`AmmError::PriceImpactTooHigh`] if the impact exceeds
    ///   `max_slippage_bps`.
    /// - [`AmmError::FrontRunProtectionActive`] if the caller swapped within
    ///   the cooldown window.
    /// - [`AmmError::InvalidToken`] if `token_in` is not in the pair.
    /// - [`AmmError::InvalidAmount`] / [`AmmError::ZeroReserve`] if the swap
    ///   cannot be priced.
    /// - [`AmmError::InsufficientOutput`] if the output is below
    ///   `min_amount_out`.
    /// - [`AmmError::Unauthorized`] if the caller is the pool account.
    /// - [`AmmError::Token`] if a transfer is refused.
    /// - [`AmmError::InvariantViolation`] if the output was refused and the
    ///   input could not be returned; the input is added to the reserves.
    pub fn swap(
        &mut self,
        ctx: CallContext,
        token_in: TokenAddress,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<SwapQuote> {
        let quote = self
            .config
            .token_pair()
            .side_of(&token_in)
            .and_then(|side| self.quote(side, amount_in));

        let impact = quote.as_ref().ok().map(SwapQuote::price_impact);
        let approval: Approval<SwapGuard> = guard::evaluate(&self.guard_context(ctx, impact))?;
        let quote = quote?;
        debug!(account = %ctx.caller(), %quote, "swap quoted");

        if quote.amount_out() < min_amount_out {
            warn!(
                account = %ctx.caller(),
                amount_out = %quote.amount_out(),
                min_amount_out = %min_amount_out,
                "swap output below caller minimum"
            );
            return Err(AmmError::InsufficientOutput);
        }

        let plan = self
            .ledger
            .plan_swap(ctx.caller(), ctx.block(), quote)
            .inspect_err(log_fault)?;
        let next_fee = pricing::dynamic_fee_rate(&plan.next_state(), &self.config.fee())
            .inspect_err(log_fault)?;

        let settled = self.settle(
            Leg::Pull {
                side: quote.side_in(),
                account: ctx.caller(),
                amount: quote.amount_in(),
            },
            Leg::Push {
                side: quote.side_out(),
                account: ctx.caller(),
                amount: quote.amount_out(),
            },
        );
        if let Err(unsettled) = settled {
            if let Some(kept) = unsettled.stranded {
                self.ledger.absorb(kept.side(), &plan.next_state(), approval);
                self.refresh_fee();
            }
            return Err(unsettled.into_error());
        }

        self.ledger.commit_swap(plan, approval);
        self.dynamic_fee_rate = next_fee;

        let pair = self.config.token_pair();
        info!(
            account = %ctx.caller(),
            block = %ctx.block(),
            amount_in = %quote.amount_in(),
            amount_out = %quote.amount_out(),
            fee = %quote.fee(),
            next_fee = %next_fee,
            "swap executed"
        );
        self.events.emit(PoolEvent::Swap {
            account: ctx.caller(),
            token_in: pair.token(quote.side_in()),
            token_out: pair.token(quote.side_out()),
            amount_in: quote.amount_in(),
            amount_out: quote.amount_out(),
        });
        Ok(quote)
    }

    // -- Admin --------------------------------------------------------------

    /// Replaces the price-impact bound and the swap cooldown.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] if the caller is not the owner.
    /// - [`AmmError::EmergencyActive`] if the pool is halted.
    /// - [`AmmError::InvalidAmount`] if `max_slippage_bps` exceeds 10 000.
    pub fn set_mev_protection(
        &mut self,
        ctx: CallContext,
        max_slippage_bps: u32,
        cooldown_blocks: u64,
    ) -> Result<()> {
        self.ensure_admin(ctx)?;
        let max_slippage_bps = BasisPoints::percent(max_slippage_bps)?;
        self.protection = GuardConfig::new(max_slippage_bps, cooldown_blocks)?;

        info!(
            %max_slippage_bps,
            cooldown_blocks,
            block = %ctx.block(),
            "mev protection updated"
        );
        self.events.emit(PoolEvent::MevProtectionUpdated {
            max_slippage_bps,
            cooldown_blocks,
        });
        Ok(())
    }

    /// Permanently halts every mutating operation.  There is no way back.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] if the caller is not the owner.
    /// - [`AmmError::EmergencyActive`] if the pool is already halted.
    pub fn activate_emergency_mode(&mut self, ctx: CallContext) -> Result<()> {
        self.ensure_admin(ctx)?;
        self.emergency_halted = true;
        warn!(block = %ctx.block(), "emergency mode activated, pool halted");
        self.events.emit(PoolEvent::EmergencyModeActivated);
        Ok(())
    }

    // -- Queries ------------------------------------------------------------

    /// `(reserve_a, reserve_b)`.
    #[must_use]
    pub const fn get_reserves(&self) -> (Amount, Amount) {
        let state = self.ledger.state();
        (state.reserve_a, state.reserve_b)
    }

    /// Spot price of token A in token B.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ZeroReserve`] on an empty pool.
    pub fn get_current_price(&self) -> Result<Price> {
        pricing::spot_price(&self.ledger.state())
    }

    /// Output a swap of `amount_in` would produce right now.
    ///
    /// # Errors
    ///
    /// Same pricing errors as [`swap`](Self::swap); guards are not applied.
    pub fn get_amount_out(&self, amount_in: Amount, token_in_is_a: bool) -> Result<Amount> {
        self.quote(TokenSide::from_is_a(token_in_is_a), amount_in)
            .map(|q| q.amount_out())
    }

    /// Full quote for selling `amount_in` on `side_in`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] if the swap cannot be priced.
    /// - [`AmmError::ZeroReserve`] on an empty pool.
    pub fn quote(&self, side_in: TokenSide, amount_in: Amount) -> Result<SwapQuote> {
        pricing::quote_swap(&self.ledger.state(), side_in, amount_in, self.dynamic_fee_rate)
    }

    /// Price impact a swap of `amount_in` would have.
    ///
    /// # Errors
    ///
    /// Same as [`quote`](Self::quote).
    pub fn price_impact(&self, amount_in: Amount, token_in_is_a: bool) -> Result<BasisPoints> {
        self.quote(TokenSide::from_is_a(token_in_is_a), amount_in)
            .map(|q| q.price_impact())
    }

    /// Shares a deposit would mint now, ignoring guards and minimums.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAmount`] if the deposit mints nothing.
    pub fn quote_add_liquidity(&self, amount_a: Amount, amount_b: Amount) -> Result<Liquidity> {
        self.ledger.shares_for_deposit(amount_a, amount_b)
    }

    /// Position report for `account`.
    ///
    /// # Errors
    ///
    /// Only internal arithmetic faults.
    pub fn get_user_info(&self, account: AccountId) -> Result<UserInfo> {
        self.ledger.user_info(account)
    }

    /// Shares held by `account`.
    #[must_use]
    pub fn shares_of(&self, account: AccountId) -> Liquidity {
        self.ledger.shares_of(account)
    }

    /// Block of `account`'s last swap.
    #[must_use]
    pub fn last_swap_block(&self, account: AccountId) -> Option<BlockIndex> {
        self.ledger.last_swap_block(account)
    }

    /// Fee rate the next swap pays.
    #[must_use]
    pub const fn dynamic_fee_rate(&self) -> BasisPoints {
        self.dynamic_fee_rate
    }

    /// Outstanding shares.
    #[must_use]
    pub const fn total_liquidity_tokens(&self) -> Liquidity {
        self.ledger.total_shares()
    }

    /// Lifetime fees charged on token A input.
    #[must_use]
    pub const fn accumulated_fees_a(&self) -> Amount {
        self.ledger.accumulated_fees_a()
    }

    /// Lifetime fees charged on token B input.
    #[must_use]
    pub const fn accumulated_fees_b(&self) -> Amount {
        self.ledger.accumulated_fees_b()
    }

    /// Whether the pool is halted.
    #[must_use]
    pub const fn is_emergency_halted(&self) -> bool {
        self.emergency_halted
    }

    /// The admin account.
    #[must_use]
    pub const fn owner(&self) -> AccountId {
        self.config.owner()
    }

    /// The account holding the reserves.
    #[must_use]
    pub const fn pool_account(&self) -> AccountId {
        self.config.pool_account()
    }

    /// Current protection parameters.
    #[must_use]
    pub const fn mev_protection(&self) -> GuardConfig {
        self.protection
    }

    /// The token pair.
    #[must_use]
    pub const fn token_pair(&self) -> &TokenPair {
        self.config.token_pair()
    }

    /// Snapshot of all pool state.
    ///
    /// # Errors
    ///
    /// Only internal arithmetic faults.
    pub fn metrics(&self) -> Result<PoolMetrics> {
        let state = self.ledger.state();
        Ok(PoolMetrics {
            reserve_a: state.reserve_a,
            reserve_b: state.reserve_b,
            spot_price: pricing::spot_price(&state).ok(),
            dynamic_fee_rate: self.dynamic_fee_rate,
            imbalance_bps: pricing::imbalance_bps(&state)?,
            total_liquidity: self.ledger.total_shares(),
            accumulated_fees_a: self.ledger.accumulated_fees_a(),
            accumulated_fees_b: self.ledger.accumulated_fees_b(),
            max_slippage_bps: self.protection.max_slippage_bps(),
            cooldown_blocks: self.protection.cooldown_blocks(),
            emergency_halted: self.emergency_halted,
            accounts: self.ledger.account_count(),
        })
    }

    // -- Collaborators ------------------------------------------------------

    /// Token A ledger.
    #[must_use]
    pub const fn token_a(&self) -> &T {
        &self.token_a
    }

    /// Token B ledger.
    #[must_use]
    pub const fn token_b(&self) -> &T {
        &self.token_b
    }

    /// Token A ledger, mutably (funding, approvals).
    pub fn token_a_mut(&mut self) -> &mut T {
        &mut self.token_a
    }

    /// Token B ledger, mutably (funding, approvals).
    pub fn token_b_mut(&mut self) -> &mut T {
        &mut self.token_b
    }

    /// Both token ledgers, mutably.
    pub fn tokens_mut(&mut self) -> (&mut T, &mut T) {
        (&mut self.token_a, &mut self.token_b)
    }

    /// The event sink.
    #[must_use]
    pub const fn events(&self) -> &E {
        &self.events
    }

    /// The event sink, mutably.
    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    // -- Internals ----------------------------------------------------------

    fn guard_context(&self, ctx: CallContext, price_impact: Option<BasisPoints>) -> GuardContext {
        GuardContext {
            caller: ctx.caller(),
            pool_account: self.config.pool_account(),
            block: ctx.block(),
            emergency_halted: self.emergency_halted,
            protection: self.protection,
            last_swap_block: self.ledger.last_swap_block(ctx.caller()),
            price_impact,
        }
    }

    fn ensure_admin(&self, ctx: CallContext) -> Result<()> {
        if ctx.caller() != self.config.owner() {
            warn!(caller = %ctx.caller(), "admin call from non-owner");
            return Err(AmmError::Unauthorized);
        }
        if self.emergency_halted {
            warn!(caller = %ctx.caller(), "admin call on halted pool");
            return Err(AmmError::EmergencyActive);
        }
        Ok(())
    }

    fn ledger_mut(&mut self, side: TokenSide) -> &mut T {
        match side {
            TokenSide::A => &mut self.token_a,
            TokenSide::B => &mut self.token_b,
        }
    }

    fn ledger_ref(&self, side: TokenSide) -> &T {
        match side {
            TokenSide::A => &self.token_a,
            TokenSide::B => &self.token_b,
        }
    }

    fn refresh_fee(&mut self) {
        match pricing::dynamic_fee_rate(&self.ledger.state(), &self.config.fee()) {
            Ok(fee) => self.dynamic_fee_rate = fee,
            Err(err) => log_fault(&err),
        }
    }

    fn preflight(&self, leg: Leg) -> core::result::Result<(), TokenError> {
        if leg.amount().is_zero() {
            return Ok(());
        }
        let vault = self.config.pool_account();
        match leg {
            Leg::Pull {
                side,
                account,
                amount,
            } => self.ledger_ref(side).can_transfer(account, vault, amount),
            Leg::Push {
                side,
                account,
                amount,
            } => self.ledger_ref(side).can_transfer(vault, account, amount),
        }
    }

    fn run_leg(&mut self, leg: Leg) -> core::result::Result<(), TokenError> {
        if leg.amount().is_zero() {
            return Ok(());
        }
        let vault = self.config.pool_account();
        match leg {
            Leg::Pull {
                side,
                account,
                amount,
            } => self
                .ledger_mut(side)
                .transfer_from(vault, account, vault, amount),
            Leg::Push {
                side,
                account,
                amount,
            } => self.ledger_mut(side).transfer(vault, account, amount),
        }
    }

    /// Returns an executed pull to its owner.  `true` when nothing of
    /// `leg` remains in effect.
    fn return_pull(&mut self, leg: Leg) -> bool {
        let Leg::Pull {
            side,
            account,
            amount,
        } = leg
        else {
            return false;
        };
        let vault = self.config.pool_account();
        match self.ledger_mut(side).transfer(vault, account, amount) {
            Ok(()) => true,
            Err(err) => {
                error!(%side, %amount, error = %err, "returning pulled tokens refused");
                false
            }
        }
    }

    /// Executes two transfer legs as a unit.
    ///
    /// Every leg is checked with [`TokenLedger::can_transfer`] before
    /// anything moves, and pull legs run first.  If the second leg still
    /// fails, an executed pull is returned to its owner.  An executed push
    /// is never taken back; it is reported as stranded together with a
    /// pull whose return was refused.
    fn settle(&mut self, first: Leg, second: Leg) -> core::result::Result<(), Unsettled> {
        for leg in [first, second] {
            if let Err(error) = self.preflight(leg) {
                warn!(
                    side = %leg.side(),
                    amount = %leg.amount(),
                    %error,
                    "transfer preflight refused"
                );
                return Err(Unsettled {
                    error,
                    stranded: None,
                });
            }
        }

        if let Err(error) = self.run_leg(first) {
            warn!(%error, "token transfer refused");
            return Err(Unsettled {
                error,
                stranded: None,
            });
        }
        let Err(error) = self.run_leg(second) else {
            return Ok(());
        };

        if first.amount().is_zero() || self.return_pull(first) {
            warn!(%error, "second transfer leg failed, first leg returned");
            return Err(Unsettled {
                error,
                stranded: None,
            });
        }
        error!(
            %error,
            side = %first.side(),
            amount = %first.amount(),
            "second transfer leg failed, first leg left in place"
        );
        Err(Unsettled {
            error,
            stranded: Some(first),
        })
    }
}
