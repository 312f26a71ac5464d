//! # Bastion AMM
//!
//! Guarded constant-product liquidity pool engine.
//!
//! A [`GuardedPool`](pool::GuardedPool) holds two token reserves on
//! external ledgers, mints liquidity shares against deposits, prices swaps
//! on the `x · y = k` curve with an imbalance-driven dynamic fee, and wraps
//! every state change in a guard pipeline:
//!
//! - **Emergency halt**: a one-way owner switch that blocks all mutation.
//! - **Slippage bound**: swaps whose price impact exceeds
//!   `max_slippage_bps` are rejected.
//! - **Front-run cooldown**: an account may swap at most once every
//!   `cooldown_blocks` blocks.
//!
//! All arithmetic is checked, products use 256-bit intermediates, and a
//! rejected call performs no mutation at all.
//!
//! ## Deposit and swap
//!
//! ```rust
//! use bastion_amm::prelude::*;
//!
//! let owner = AccountId::from_bytes([1u8; 32]);
//! let lp = AccountId::from_bytes([2u8; 32]);
//! let trader = AccountId::from_bytes([3u8; 32]);
//! let vault = AccountId::from_bytes([4u8; 32]);
//! let (usdc, weth) = (TokenAddress::from_bytes([10u8; 32]), TokenAddress::from_bytes([11u8; 32]));
//!
//! // 1. Configure and create the pool
//! let pair = TokenPair::new(usdc, weth).expect("distinct tokens");
//! let config = PoolConfig::with_defaults(pair, owner, vault).expect("valid config");
//! let mut pool = GuardedPool::new(config, InMemoryToken::new(usdc), InMemoryToken::new(weth))
//!     .expect("pool created");
//!
//! // 2. Fund accounts and approve the pool's vault account
//! let thousand = Amount::from_tokens(1_000).expect("fits");
//! let (token_a, token_b) = pool.tokens_mut();
//! for token in [token_a, token_b] {
//!     for account in [lp, trader] {
//!         token.mint(account, thousand).expect("mint");
//!         token.approve(account, vault, thousand).expect("approve");
//!     }
//! }
//!
//! // 3. Seed liquidity, then swap 100 A for B
//! pool.add_liquidity(CallContext::new(lp, BlockIndex::new(1)), thousand, thousand, Liquidity::ZERO)
//!     .expect("deposit");
//! let hundred = Amount::from_tokens(100).expect("fits");
//! let quote = pool
//!     .swap(CallContext::new(trader, BlockIndex::new(2)), usdc, hundred, Amount::ZERO)
//!     .expect("swap");
//!
//! assert!(quote.amount_out() < Amount::from_tokens(91).expect("fits"));
//! assert_eq!(pool.get_reserves().0, Amount::from_tokens(1_100).expect("fits"));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │ GuardedPool  │  add / remove liquidity, swap, admin, queries
//! └──────┬───────┘
//!        │ quote → guard pipeline → plan → transfers → commit → event
//!        ▼
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │   pricing    │   │    guard     │   │    ledger    │
//! └──────────────┘   └──────────────┘   └──────────────┘
//!        │                                      │
//!        ▼                                      ▼
//! ┌──────────────┐                      ┌──────────────┐
//! │    domain    │                      │ TokenLedger  │  external token ledgers
//! └──────────────┘                      └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Price`](domain::Price), [`BasisPoints`](domain::BasisPoints), events, call context |
//! | [`pool`] | Ledger, pricing, guards and the [`GuardedPool`](pool::GuardedPool) façade |
//! | [`traits`] | Collaborator seams: [`TokenLedger`](traits::TokenLedger), [`EventSink`](traits::EventSink) |
//! | [`token`] | [`InMemoryToken`](token::InMemoryToken) ledger for tests and simulations |
//! | [`config`] | [`PoolConfig`](config::PoolConfig) and its fee and guard sections |
//! | [`math`] | Checked arithmetic and 256-bit helpers |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`utils`] | `tracing` subscriber setup |
//! | [`prelude`] | Convenience re-exports |

pub mod config;
pub mod domain;
pub mod error;
pub mod math;
pub mod pool;
pub mod prelude;
pub mod token;
pub mod traits;
pub mod utils;
