//! The pool engine.
//!
//! | Module    | Role                                                   |
//! |-----------|--------------------------------------------------------|
//! | `ledger`  | Reserves, share supply, per-account arena; plan/commit |
//! | `pricing` | Swap output, spot price, dynamic fee, price impact     |
//! | `guard`   | Emergency halt, slippage bound, front-run cooldown     |
//! | `facade`  | [`GuardedPool`]: public operations and queries         |
//! | `metrics` | [`PoolMetrics`] snapshot                               |

pub mod guard;
pub mod ledger;
pub mod pricing;

mod facade;
mod metrics;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use facade::GuardedPool;
pub use guard::{Approval, GuardContext, GuardKind, LiquidityGuard, SwapGuard, Validator};
pub use ledger::{DepositPlan, ReserveLedger, ReserveState, SwapPlan, WithdrawPlan};
pub use metrics::PoolMetrics;
