//! Domain value types used throughout the pool engine.
//!
//! Token quantities, share units, basis points, fixed-point prices,
//! identities, the per-call host context, swap quotes and events.  All
//! types are newtypes with validated constructors where a value can be
//! out of range.

mod amount;
mod basis_points;
mod call_context;
mod event;
mod liquidity;
mod position;
mod price;
mod rounding;
mod swap_quote;
mod token_address;
mod token_pair;

pub use amount::{Amount, DECIMALS, ONE_TOKEN};
pub use basis_points::{BPS_DENOMINATOR, BasisPoints};
pub use call_context::{BlockIndex, CallContext};
pub use event::PoolEvent;
pub use liquidity::Liquidity;
pub use position::UserInfo;
pub use price::Price;
pub use rounding::Rounding;
pub use swap_quote::SwapQuote;
pub use token_address::{AccountId, TokenAddress};
pub use token_pair::{TokenPair, TokenSide};
