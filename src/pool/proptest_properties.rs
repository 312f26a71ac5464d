//! Property-based tests for pool invariants.
//!
//! 1. **Product monotonicity**: `reserve_a × reserve_b` never decreases
//!    across any swap sequence.
//! 2. **Swap reversibility**: A→B→A returns at most the original input.
//! 3. **Quote fidelity**: `get_amount_out` equals the executed output.
//! 4. **Liquidity round trip**: deposit then full withdraw returns ≤ deposit.
//! 5. **Empty iff unshared**: `T == 0 ⇔ reserves == 0` without swaps.
//! 6. **Fee curve**: bounded in `[min, max]`, non-decreasing in imbalance.
//! 7. **Query purity**: queries never change pool state.

use proptest::prelude::*;

use super::ledger::ReserveState;
use super::pricing::{dynamic_fee_rate, imbalance_bps};
use super::GuardedPool;
use crate::config::{DynamicFeeConfig, GuardConfig, PoolConfig};
use crate::domain::{
    AccountId, Amount, BasisPoints, BlockIndex, CallContext, Liquidity, TokenAddress, TokenPair,
};
use crate::token::InMemoryToken;
use crate::traits::TokenLedger;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const OWNER: AccountId = AccountId::from_bytes([0xAA; 32]);
const VAULT: AccountId = AccountId::from_bytes([0xBB; 32]);
const LP: AccountId = AccountId::from_bytes([0x01; 32]);
const TRADER: AccountId = AccountId::from_bytes([0x02; 32]);
const ADDR_A: TokenAddress = TokenAddress::from_bytes([0x0A; 32]);
const ADDR_B: TokenAddress = TokenAddress::from_bytes([0x0B; 32]);

/// Pool with guards opened up so only pricing limits apply.
fn open_pool() -> GuardedPool<InMemoryToken> {
    let Ok(pair) = TokenPair::new(ADDR_A, ADDR_B) else {
        panic!("valid pair");
    };
    let Ok(guard) = GuardConfig::new(BasisPoints::MAX_PERCENT, 0) else {
        panic!("valid guard");
    };
    let Ok(config) = PoolConfig::new(pair, OWNER, VAULT, DynamicFeeConfig::default(), guard)
    else {
        panic!("valid config");
    };
    let Ok(mut pool) =
        GuardedPool::new(config, InMemoryToken::new(ADDR_A), InMemoryToken::new(ADDR_B))
    else {
        panic!("valid pool");
    };
    for account in [LP, TRADER] {
        let (token_a, token_b) = pool.tokens_mut();
        for token in [token_a, token_b] {
            let Ok(()) = token.mint(account, Amount::new(u128::MAX / 4)) else {
                panic!("mint");
            };
            let Ok(()) = token.approve(account, VAULT, Amount::MAX) else {
                panic!("approve");
            };
        }
    }
    pool
}

fn seeded(ra: u128, rb: u128) -> GuardedPool<InMemoryToken> {
    let mut pool = open_pool();
    let ctx = CallContext::new(LP, BlockIndex::GENESIS);
    let Ok(_) = pool.add_liquidity(ctx, Amount::new(ra), Amount::new(rb), Liquidity::ZERO) else {
        panic!("seed liquidity");
    };
    pool
}

fn trader_at(block: u64) -> CallContext {
    CallContext::new(TRADER, BlockIndex::new(block))
}

fn product(pool: &GuardedPool<InMemoryToken>) -> ethnum::U256 {
    let (ra, rb) = pool.get_reserves();
    crate::math::wide_mul(ra.get(), rb.get())
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserves between 1 and 10^9 whole tokens (18 decimals).
fn reserve_strategy() -> impl Strategy<Value = u128> {
    (1u128..=1_000_000_000u128).prop_map(|whole| whole * 1_000_000_000_000_000_000)
}

/// Swap size as a fraction (in bp) of the input reserve.
fn fraction_strategy() -> impl Strategy<Value = u128> {
    1u128..=20_000u128
}

/// A sequence of (direction, fraction) swaps.
fn swap_sequence_strategy() -> impl Strategy<Value = Vec<(bool, u128)>> {
    proptest::collection::vec((any::<bool>(), fraction_strategy()), 1..12)
}

// ---------------------------------------------------------------------------
// Property 1: Product monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_product_never_decreases(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        swaps in swap_sequence_strategy(),
    ) {
        let mut pool = seeded(ra, rb);
        for (block, (a_in, fraction)) in (1u64..).zip(swaps) {
            let (res_a, res_b) = pool.get_reserves();
            let reserve_in = if a_in { res_a } else { res_b };
            let amount = Amount::new(reserve_in.get() / 10_000 * fraction);
            let token = if a_in { ADDR_A } else { ADDR_B };
            let before = product(&pool);
            if pool.swap(trader_at(block), token, amount, Amount::ZERO).is_err() {
                continue;
            }
            prop_assert!(product(&pool) >= before, "product decreased");
            let (res_a, res_b) = pool.get_reserves();
            prop_assert!(!res_a.is_zero() && !res_b.is_zero());
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2 & 3: Swap reversibility and quote fidelity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_reversibility(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        fraction in fraction_strategy(),
    ) {
        let mut pool = seeded(ra, rb);
        let swap_in = Amount::new(ra / 10_000 * fraction);

        let Ok(there) = pool.swap(trader_at(1), ADDR_A, swap_in, Amount::ZERO) else {
            return Ok(());
        };
        let Ok(back) = pool.swap(trader_at(2), ADDR_B, there.amount_out(), Amount::ZERO) else {
            return Ok(());
        };
        prop_assert!(
            back.amount_out() <= swap_in,
            "round-trip should lose value: final={} > original={}",
            back.amount_out(), swap_in
        );
    }

    #[test]
    fn prop_quote_matches_execution(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        fraction in fraction_strategy(),
        a_in in any::<bool>(),
    ) {
        let mut pool = seeded(ra, rb);
        let reserve_in = if a_in { ra } else { rb };
        let amount = Amount::new(reserve_in / 10_000 * fraction);
        let token = if a_in { ADDR_A } else { ADDR_B };

        let quoted = pool.get_amount_out(amount, a_in);
        let executed = pool.swap(trader_at(1), token, amount, Amount::ZERO);
        match (quoted, executed) {
            (Ok(q), Ok(e)) => prop_assert_eq!(q, e.amount_out()),
            (Err(_), Err(_)) => {}
            (q, e) => prop_assert!(false, "quote {:?} disagrees with swap {:?}", q, e),
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4 & 5: Liquidity round trip, empty iff unshared
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_liquidity_round_trip(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        da in reserve_strategy(),
        db in reserve_strategy(),
    ) {
        let mut pool = seeded(ra, rb);
        let ctx = trader_at(1);
        let Ok(shares) = pool.add_liquidity(ctx, Amount::new(da), Amount::new(db), Liquidity::ZERO)
        else {
            return Ok(());
        };
        let Ok((out_a, out_b)) = pool.remove_liquidity(ctx, shares, Amount::ZERO, Amount::ZERO)
        else {
            return Ok(());
        };
        prop_assert!(out_a.get() <= da);
        prop_assert!(out_b.get() <= db);
    }

    #[test]
    fn prop_empty_iff_no_shares(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        burn_bp in 1u128..=10_000u128,
    ) {
        let mut pool = seeded(ra, rb);
        let held = pool.shares_of(LP).get();
        let burn = Liquidity::new((held / 10_000 * burn_bp).max(1).min(held));
        let ctx = CallContext::new(LP, BlockIndex::new(1));
        if pool.remove_liquidity(ctx, burn, Amount::ZERO, Amount::ZERO).is_err() {
            return Ok(());
        }
        let (res_a, res_b) = pool.get_reserves();
        let total = pool.total_liquidity_tokens();
        prop_assert_eq!(total.is_zero(), res_a.is_zero() && res_b.is_zero());
        prop_assert_eq!(pool.token_a().balance_of(VAULT), res_a);
        prop_assert_eq!(pool.token_b().balance_of(VAULT), res_b);
    }
}

// ---------------------------------------------------------------------------
// Property 6: Fee curve
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_fee_bounded_and_monotone(
        base in reserve_strategy(),
        skew_small in 0u128..=5_000u128,
        skew_extra in 0u128..=5_000u128,
        sensitivity in 0u32..=20u32,
        min_fee in 0u32..=200u32,
        span in 0u32..=300u32,
    ) {
        let Ok(cfg) = DynamicFeeConfig::new(
            BasisPoints::new(min_fee),
            BasisPoints::new(min_fee + span),
            sensitivity,
        ) else {
            panic!("valid fee config");
        };
        let skewed = |skew_bp: u128| ReserveState {
            reserve_a: Amount::new(base + base / 10_000 * skew_bp),
            reserve_b: Amount::new(base),
            baseline_a: Amount::new(base),
            baseline_b: Amount::new(base),
        };
        let small = skewed(skew_small);
        let large = skewed(skew_small + skew_extra);

        let (Ok(i_small), Ok(i_large)) = (imbalance_bps(&small), imbalance_bps(&large)) else {
            panic!("imbalance computable");
        };
        prop_assert!(i_small <= i_large);

        let (Ok(f_small), Ok(f_large)) =
            (dynamic_fee_rate(&small, &cfg), dynamic_fee_rate(&large, &cfg))
        else {
            panic!("fee computable");
        };
        prop_assert!(f_small <= f_large);
        prop_assert!(cfg.min_fee() <= f_small && f_large <= cfg.max_fee());
    }
}

// ---------------------------------------------------------------------------
// Property 7: Query purity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_queries_do_not_mutate(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        amount in reserve_strategy(),
    ) {
        let pool = seeded(ra, rb);
        let before = pool.metrics();
        let _ = pool.get_current_price();
        let _ = pool.get_amount_out(Amount::new(amount), true);
        let _ = pool.price_impact(Amount::new(amount), false);
        let _ = pool.quote_add_liquidity(Amount::new(amount), Amount::new(amount));
        let _ = pool.get_user_info(LP);
        let _ = pool.get_reserves();
        prop_assert_eq!(pool.metrics(), before);
    }
}
