//! Token collaborator interface.
//!
//! The pool never holds token balances itself: each of its two assets
//! lives on an external ledger that enforces its own balance and
//! allowance rules.  [`TokenLedger`] is the slice of that ledger the pool
//! needs.
//!
//! # Failure semantics
//!
//! A transfer either moves the full amount or returns an error and moves
//! nothing.  The pool never assumes a transfer succeeded silently; any
//! [`TokenError`] aborts the enclosing pool operation.
//!
//! Before moving anything the pool asks [`TokenLedger::can_transfer`] about
//! every leg of a settlement.  Ledgers that can refuse a credit (frozen or
//! blacklisted recipients) must report it there; a payout refused only
//! after the preflight cannot be taken back from the recipient.

use thiserror::Error;

use crate::domain::{AccountId, Amount};

/// Reasons a token ledger refuses a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The source account holds less than the requested amount.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// The spender's allowance from the source account is too small.
    #[error("insufficient allowance")]
    InsufficientAllowance,

    /// Crediting the destination would overflow its balance.
    #[error("balance overflow")]
    BalanceOverflow,

    /// The ledger refuses to credit the destination account.
    #[error("recipient rejected")]
    RecipientRejected,
}

/// A fungible token ledger (ERC-20 style).
pub trait TokenLedger {
    /// Moves `amount` from `from` to `to`, spending `spender`'s allowance
    /// granted by `from`.
    ///
    /// # Errors
    ///
    /// - [`TokenError::InsufficientAllowance`] if the allowance is too small.
    /// - [`TokenError::InsufficientBalance`] if `from` holds too little.
    fn transfer_from(
        &mut self,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), TokenError>;

    /// Moves `amount` from `from` to `to` on `from`'s own authority.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InsufficientBalance`] if `from` holds too little.
    fn transfer(&mut self, from: AccountId, to: AccountId, amount: Amount)
        -> Result<(), TokenError>;

    /// Checks that moving `amount` from `from` to `to` would succeed right
    /// now, without moving anything.  Allowances are not considered.
    ///
    /// The default only checks the balance of `from`.
    ///
    /// # Errors
    ///
    /// Returns the [`TokenError`] the transfer would fail with.
    fn can_transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let _ = to;
        if self.balance_of(from) < amount {
            return Err(TokenError::InsufficientBalance);
        }
        Ok(())
    }

    /// Returns the balance of `account`.
    #[must_use]
    fn balance_of(&self, account: AccountId) -> Amount;

    /// Sets the allowance `owner` grants to `spender`, replacing any
    /// previous value.
    ///
    /// # Errors
    ///
    /// Implementations may refuse approvals; the in-memory ledger never does.
    fn approve(
        &mut self,
        owner: AccountId,
        spender: AccountId,
        amount: Amount,
    ) -> Result<(), TokenError>;
}
