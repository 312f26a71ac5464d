//! Pricing and fee engine.
//!
//! Pure functions over a [`ReserveState`] snapshot.  Nothing here mutates
//! the pool, so the same code prices both the `get_amount_out` query and
//! the swap that follows it.
//!
//! # Swap Pricing (exact input)
//!
//! 1. `fee = ⌈amount_in × fee_bps / 10 000⌉`
//! 2. `net = amount_in − fee`
//! 3. `amount_out = ⌊reserve_out × net / (reserve_in + net)⌋`
//! 4. `price_impact = ⌊net × 10 000 / (reserve_in + net)⌋` bp
//!
//! # Dynamic Fee
//!
//! Imbalance compares the live reserve ratio with the deposit baseline
//! ratio:
//!
//! ```text
//! x = reserve_a × baseline_b
//! y = reserve_b × baseline_a
//! imbalance_bps = |x − y| × 10 000 / (x + y)
//! fee = min_fee + (max_fee − min_fee) × min(imbalance_bps × sensitivity, 10 000) / 10 000
//! ```

use ethnum::U256;

use super::ledger::ReserveState;
use crate::config::DynamicFeeConfig;
use crate::domain::{Amount, BasisPoints, Price, Rounding, SwapQuote, TokenSide, BPS_DENOMINATOR};
use crate::error::{AmmError, Result};
use crate::math::{div_wide, mul_div, narrow, wide_mul, CheckedArithmetic};

/// Products at or above this are shifted down before the imbalance ratio
/// so `|x − y| × 10 000` stays inside 256 bits.
const IMBALANCE_SCALE_THRESHOLD: u32 = 240;
const IMBALANCE_SHIFT: u32 = 16;

/// Relative deviation of the reserve ratio from the deposit baseline, in
/// basis points.  Zero for an empty pool.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] only on an internal arithmetic fault.
pub fn imbalance_bps(state: &ReserveState) -> Result<u32> {
    if state.is_empty() || state.baseline_a.is_zero() || state.baseline_b.is_zero() {
        return Ok(0);
    }

    let mut x = wide_mul(state.reserve_a.get(), state.baseline_b.get());
    let mut y = wide_mul(state.reserve_b.get(), state.baseline_a.get());
    if x.max(y) >= (U256::ONE << IMBALANCE_SCALE_THRESHOLD) {
        x >>= IMBALANCE_SHIFT;
        y >>= IMBALANCE_SHIFT;
    }

    let diff = if x > y { x - y } else { y - x };
    let ratio = div_wide(diff * U256::from(BPS_DENOMINATOR), x + y, Rounding::Down)?;
    let ratio = narrow(ratio, "imbalance ratio overflow")?;
    u32::try_from(ratio).map_err(|_| AmmError::Overflow("imbalance ratio overflow"))
}

/// Fee rate charged on the next swap for a given state.
///
/// Bounded in `[min_fee, max_fee]` and non-decreasing in imbalance.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] only on an internal arithmetic fault.
pub fn dynamic_fee_rate(state: &ReserveState, config: &DynamicFeeConfig) -> Result<BasisPoints> {
    let imbalance = imbalance_bps(state)?;
    let min = config.min_fee().get();
    let span = config.max_fee().get().saturating_sub(min);
    let pressure = imbalance
        .saturating_mul(config.sensitivity())
        .min(BPS_DENOMINATOR);
    // span < 10_000 and pressure ≤ 10_000, so the product fits u32
    Ok(BasisPoints::new(min + span * pressure / BPS_DENOMINATOR))
}

/// Prices an exact-input swap at `fee_rate` against `state`.
///
/// # Errors
///
/// - [`AmmError::InvalidAmount`] if `amount_in` is zero, does not cover the
///   fee, or is too small to produce output.
/// - [`AmmError::ZeroReserve`] if the pool has no liquidity.
/// - [`AmmError::Overflow`] if the input reserve would overflow.
pub fn quote_swap(
    state: &ReserveState,
    side_in: TokenSide,
    amount_in: Amount,
    fee_rate: BasisPoints,
) -> Result<SwapQuote> {
    if amount_in.is_zero() {
        return Err(AmmError::InvalidAmount("swap amount must be positive"));
    }
    if state.is_empty() {
        return Err(AmmError::ZeroReserve);
    }

    let reserve_in = state.reserve(side_in);
    let reserve_out = state.reserve(side_in.other());

    let fee = fee_rate.apply(amount_in, Rounding::Up)?;
    let net = amount_in.safe_sub(&fee)?;
    if net.is_zero() {
        return Err(AmmError::InvalidAmount("swap amount does not cover fee"));
    }

    let denominator = reserve_in.safe_add(&net)?;
    let amount_out = mul_div(reserve_out.get(), net.get(), denominator.get(), Rounding::Down)?;
    let impact = mul_div(
        net.get(),
        u128::from(BPS_DENOMINATOR),
        denominator.get(),
        Rounding::Down,
    )?;
    let impact =
        u32::try_from(impact).map_err(|_| AmmError::Overflow("price impact overflow"))?;

    SwapQuote::new(
        side_in,
        amount_in,
        Amount::new(amount_out),
        fee,
        fee_rate,
        BasisPoints::new(impact),
    )
}

/// Spot price of token A in token B: `reserve_b / reserve_a`.
///
/// # Errors
///
/// Returns [`AmmError::ZeroReserve`] if `reserve_a` is zero.
pub fn spot_price(state: &ReserveState) -> Result<Price> {
    Price::from_ratio(state.reserve_b, state.reserve_a, Rounding::Down)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::ONE_TOKEN;

    fn tokens(n: u128) -> Amount {
        Amount::new(n * ONE_TOKEN)
    }

    fn balanced(n: u128) -> ReserveState {
        ReserveState {
            reserve_a: tokens(n),
            reserve_b: tokens(n),
            baseline_a: tokens(n),
            baseline_b: tokens(n),
        }
    }

    #[test]
    fn hundred_into_thousand_pool() {
        let Ok(q) = quote_swap(&balanced(1_000), TokenSide::A, tokens(100), BasisPoints::new(30))
        else {
            panic!("quote");
        };
        // fee = 0.3, net = 99.7, out = 1000 * 99.7 / 1099.7
        assert_eq!(q.fee(), Amount::new(3 * ONE_TOKEN / 10));
        assert!(q.amount_out() < Amount::new(90_900_000_000_000_000_000));
        assert!(q.amount_out() > tokens(90));
        assert_eq!(q.price_impact(), BasisPoints::new(906));
    }

    #[test]
    fn fee_rounds_up() {
        let fee_rate = BasisPoints::new(30);
        let Ok(q) = quote_swap(&balanced(1_000), TokenSide::B, Amount::new(1_001), fee_rate) else {
            panic!("quote");
        };
        // 1001 * 30 / 10000 = 3.003 -> 4
        assert_eq!(q.fee(), Amount::new(4));
        assert_eq!(q.side_out(), TokenSide::A);
    }

    #[test]
    fn dust_swap_rejected() {
        let fee_rate = BasisPoints::new(30);
        let result = quote_swap(&balanced(1_000), TokenSide::A, Amount::new(1), fee_rate);
        assert!(matches!(result, Err(AmmError::InvalidAmount(_))));
    }

    #[test]
    fn zero_input_rejected() {
        let fee_rate = BasisPoints::new(30);
        let result = quote_swap(&balanced(1_000), TokenSide::A, Amount::ZERO, fee_rate);
        assert!(matches!(result, Err(AmmError::InvalidAmount(_))));
    }

    #[test]
    fn empty_pool_has_no_quote() {
        let empty = ReserveState::default();
        let result = quote_swap(&empty, TokenSide::A, tokens(1), BasisPoints::ZERO);
        assert_eq!(result, Err(AmmError::ZeroReserve));
    }

    #[test]
    fn spot_price_of_skewed_pool() {
        let state = ReserveState {
            reserve_a: tokens(1_000),
            reserve_b: tokens(2_000),
            ..ReserveState::default()
        };
        assert_eq!(spot_price(&state), Ok(Price::from_raw(2 * ONE_TOKEN)));
        assert_eq!(spot_price(&ReserveState::default()), Err(AmmError::ZeroReserve));
    }

    #[test]
    fn balanced_pool_charges_min_fee() {
        let cfg = DynamicFeeConfig::default();
        assert_eq!(imbalance_bps(&balanced(1_000)), Ok(0));
        assert_eq!(dynamic_fee_rate(&balanced(1_000), &cfg), Ok(cfg.min_fee()));
        assert_eq!(dynamic_fee_rate(&ReserveState::default(), &cfg), Ok(cfg.min_fee()));
    }

    #[test]
    fn imbalance_raises_fee() {
        let cfg = DynamicFeeConfig::default();
        let mut state = balanced(1_000);
        state.reserve_a = tokens(1_100);
        state.reserve_b = tokens(910);
        // |1100 - 910| / 2010 = 945bp; * 4 = 3780; 30 + 70 * 0.378 = 56
        assert_eq!(imbalance_bps(&state), Ok(945));
        assert_eq!(dynamic_fee_rate(&state, &cfg), Ok(BasisPoints::new(56)));
    }

    #[test]
    fn fee_saturates_at_max() {
        let cfg = DynamicFeeConfig::default();
        let mut state = balanced(1_000);
        state.reserve_a = tokens(9_000);
        state.reserve_b = tokens(112);
        assert_eq!(dynamic_fee_rate(&state, &cfg), Ok(cfg.max_fee()));
    }

    #[test]
    fn imbalance_handles_huge_reserves() {
        let state = ReserveState {
            reserve_a: Amount::new(u128::MAX),
            reserve_b: Amount::new(u128::MAX / 2),
            baseline_a: Amount::new(u128::MAX),
            baseline_b: Amount::new(u128::MAX),
        };
        let Ok(imbalance) = imbalance_bps(&state) else {
            panic!("no overflow");
        };
        // |2 - 1| / 3 ≈ 3333bp
        assert!((3_332..=3_334).contains(&imbalance));
    }
}
