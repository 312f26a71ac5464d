//! Host-supplied execution context for a single pool call.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::AccountId;

/// Monotonic, coarse-grained block index supplied by the host.
///
/// # Examples
///
/// ```
/// use bastion_amm::domain::BlockIndex;
///
/// let b = BlockIndex::new(100);
/// assert_eq!(b.advance(10), BlockIndex::new(110));
/// assert_eq!(b.advance(10).blocks_since(b), 10);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BlockIndex(u64);

impl BlockIndex {
    /// The genesis block.
    pub const GENESIS: Self = Self(0);

    /// Creates a block index.
    #[must_use]
    pub const fn new(index: u64) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns the block `n` blocks later, saturating at `u64::MAX`.
    #[must_use]
    pub const fn advance(&self, n: u64) -> Self {
        Self(self.0.saturating_add(n))
    }

    /// Number of blocks elapsed since `earlier`; zero if `earlier` is not
    /// actually earlier.
    #[must_use]
    pub const fn blocks_since(&self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for BlockIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Who is calling, and in which block.
///
/// The host passes one of these to every mutating pool operation; the
/// pool never reads ambient time or identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallContext {
    caller: AccountId,
    block: BlockIndex,
}

impl CallContext {
    /// Creates a context for `caller` executing in `block`.
    #[must_use]
    pub const fn new(caller: AccountId, block: BlockIndex) -> Self {
        Self { caller, block }
    }

    /// The calling account.
    #[must_use]
    pub const fn caller(&self) -> AccountId {
        self.caller
    }

    /// The block the call executes in.
    #[must_use]
    pub const fn block(&self) -> BlockIndex {
        self.block
    }
}
