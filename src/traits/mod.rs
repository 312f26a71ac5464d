//! Seams between the pool engine and its collaborators.
//!
//! - [`TokenLedger`]: the external ledgers holding each pool asset.
//! - [`EventSink`]: where committed-state notifications go.

mod event_sink;
mod token_ledger;

pub use event_sink::{EventLog, EventSink};
pub use token_ledger::{TokenError, TokenLedger};
