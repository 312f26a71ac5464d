//! Pool configuration.
//!
//! [`PoolConfig`] is the deployment blueprint of a pool: its token pair,
//! owner and reserve account, plus a [`DynamicFeeConfig`] fee curve and the
//! initial [`GuardConfig`] protection parameters.  Every struct validates
//! in `new` and exposes `validate` for configs loaded through serde.

mod fee;
mod guard;
mod pool;

pub use fee::DynamicFeeConfig;
pub use guard::GuardConfig;
pub use pool::PoolConfig;
