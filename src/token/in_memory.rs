//! Map-backed token ledger for tests and simulations.

use std::collections::HashMap;

use tracing::trace;

use crate::domain::{AccountId, Amount, TokenAddress};
use crate::traits::{TokenError, TokenLedger};

/// An ERC-20 style token kept entirely in memory.
///
/// Balances and allowances default to zero for unknown accounts.  Every
/// transfer checks before it writes, so a refused transfer leaves the
/// ledger untouched.
///
/// # Example
///
/// ```rust
/// use bastion_amm::domain::{AccountId, Amount, TokenAddress};
/// use bastion_amm::token::InMemoryToken;
/// use bastion_amm::traits::TokenLedger;
///
/// let alice = AccountId::from_bytes([1u8; 32]);
/// let bob = AccountId::from_bytes([2u8; 32]);
/// let mut token = InMemoryToken::new(TokenAddress::from_bytes([9u8; 32]));
/// token.mint(alice, Amount::new(100)).expect("no overflow");
/// token.transfer(alice, bob, Amount::new(40)).expect("funded");
/// assert_eq!(token.balance_of(bob), Amount::new(40));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryToken {
    address: TokenAddress,
    balances: HashMap<AccountId, Amount>,
    allowances: HashMap<(AccountId, AccountId), Amount>,
    total_supply: Amount,
}

impl InMemoryToken {
    /// Creates an empty ledger for the token at `address`.
    #[must_use]
    pub fn new(address: TokenAddress) -> Self {
        Self {
            address,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            total_supply: Amount::ZERO,
        }
    }

    /// The token's address.
    #[must_use]
    pub const fn address(&self) -> TokenAddress {
        self.address
    }

    /// Sum of all balances.
    #[must_use]
    pub const fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Creates `amount` new tokens in `to`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::BalanceOverflow`] if the balance or total
    /// supply would overflow.
    pub fn mint(&mut self, to: AccountId, amount: Amount) -> Result<(), TokenError> {
        let supply = self
            .total_supply
            .checked_add(&amount)
            .ok_or(TokenError::BalanceOverflow)?;
        let balance = self
            .balance_of(to)
            .checked_add(&amount)
            .ok_or(TokenError::BalanceOverflow)?;
        self.balances.insert(to, balance);
        self.total_supply = supply;
        Ok(())
    }

    /// Current allowance `owner` grants `spender`.
    #[must_use]
    pub fn allowance(&self, owner: AccountId, spender: AccountId) -> Amount {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn move_balance(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let from_balance = self
            .balance_of(from)
            .checked_sub(&amount)
            .ok_or(TokenError::InsufficientBalance)?;
        if from == to {
            return Ok(());
        }
        let to_balance = self
            .balance_of(to)
            .checked_add(&amount)
            .ok_or(TokenError::BalanceOverflow)?;
        self.balances.insert(from, from_balance);
        self.balances.insert(to, to_balance);
        trace!(token = %self.address, %from, %to, %amount, "transfer");
        Ok(())
    }
}

impl TokenLedger for InMemoryToken {
    fn transfer_from(
        &mut self,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let remaining = self
            .allowance(from, spender)
            .checked_sub(&amount)
            .ok_or(TokenError::InsufficientAllowance)?;
        self.move_balance(from, to, amount)?;
        self.allowances.insert((from, spender), remaining);
        Ok(())
    }

    fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), TokenError> {
        self.move_balance(from, to, amount)
    }

    fn balance_of(&self, account: AccountId) -> Amount {
        self.balances.get(&account).copied().unwrap_or(Amount::ZERO)
    }

    fn approve(
        &mut self,
        owner: AccountId,
        spender: AccountId,
        amount: Amount,
    ) -> Result<(), TokenError> {
        self.allowances.insert((owner, spender), amount);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const ALICE: AccountId = AccountId::from_bytes([1u8; 32]);
    const BOB: AccountId = AccountId::from_bytes([2u8; 32]);
    const POOL: AccountId = AccountId::from_bytes([3u8; 32]);

    fn funded() -> InMemoryToken {
        let mut token = InMemoryToken::new(TokenAddress::from_bytes([9u8; 32]));
        let Ok(()) = token.mint(ALICE, Amount::new(1_000)) else {
            panic!("mint");
        };
        token
    }

    #[test]
    fn mint_tracks_supply() {
        let token = funded();
        assert_eq!(token.balance_of(ALICE), Amount::new(1_000));
        assert_eq!(token.total_supply(), Amount::new(1_000));
        assert_eq!(token.balance_of(BOB), Amount::ZERO);
    }

    #[test]
    fn mint_overflow_rejected() {
        let mut token = funded();
        assert_eq!(
            token.mint(BOB, Amount::MAX),
            Err(TokenError::BalanceOverflow)
        );
        assert_eq!(token.total_supply(), Amount::new(1_000));
    }

    #[test]
    fn transfer_moves_balance() {
        let mut token = funded();
        let Ok(()) = token.transfer(ALICE, BOB, Amount::new(300)) else {
            panic!("transfer");
        };
        assert_eq!(token.balance_of(ALICE), Amount::new(700));
        assert_eq!(token.balance_of(BOB), Amount::new(300));
    }

    #[test]
    fn transfer_insufficient_balance_is_noop() {
        let mut token = funded();
        let before = token.clone();
        assert_eq!(
            token.transfer(BOB, ALICE, Amount::new(1)),
            Err(TokenError::InsufficientBalance)
        );
        assert_eq!(token, before);
    }

    #[test]
    fn self_transfer_keeps_balance() {
        let mut token = funded();
        let Ok(()) = token.transfer(ALICE, ALICE, Amount::new(500)) else {
            panic!("transfer");
        };
        assert_eq!(token.balance_of(ALICE), Amount::new(1_000));
    }

    #[test]
    fn transfer_from_spends_allowance() {
        let mut token = funded();
        let Ok(()) = token.approve(ALICE, POOL, Amount::new(400)) else {
            panic!("approve");
        };
        let Ok(()) = token.transfer_from(POOL, ALICE, POOL, Amount::new(150)) else {
            panic!("transfer_from");
        };
        assert_eq!(token.allowance(ALICE, POOL), Amount::new(250));
        assert_eq!(token.balance_of(POOL), Amount::new(150));
    }

    #[test]
    fn transfer_from_without_allowance_rejected() {
        let mut token = funded();
        assert_eq!(
            token.transfer_from(POOL, ALICE, POOL, Amount::new(1)),
            Err(TokenError::InsufficientAllowance)
        );
    }

    #[test]
    fn transfer_from_balance_failure_keeps_allowance() {
        let mut token = funded();
        let Ok(()) = token.approve(ALICE, POOL, Amount::new(5_000)) else {
            panic!("approve");
        };
        assert_eq!(
            token.transfer_from(POOL, ALICE, POOL, Amount::new(2_000)),
            Err(TokenError::InsufficientBalance)
        );
        assert_eq!(token.allowance(ALICE, POOL), Amount::new(5_000));
    }

    #[test]
    fn can_transfer_checks_without_moving() {
        let token = funded();
        assert_eq!(token.can_transfer(ALICE, BOB, Amount::new(1_000)), Ok(()));
        assert_eq!(
            token.can_transfer(ALICE, BOB, Amount::new(1_001)),
            Err(TokenError::InsufficientBalance)
        );
        assert_eq!(token.balance_of(ALICE), Amount::new(1_000));
        assert_eq!(token.balance_of(BOB), Amount::ZERO);
    }
}
