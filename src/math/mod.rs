//! Arithmetic utilities for pool calculations.
//!
//! - [`CheckedArithmetic`]: `Result`-returning add/sub for domain types.
//! - [`mul_div`], [`wide_mul`], [`geometric_mean`]: 256-bit intermediates
//!   (via `ethnum`) for products of 18-decimal quantities.

mod checked;
mod wide;

pub use checked::CheckedArithmetic;
pub use wide::{div_wide, geometric_mean, isqrt, mul_div, narrow, wide_mul};
