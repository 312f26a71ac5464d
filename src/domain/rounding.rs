//! Explicit rounding direction for integer division.

/// Rounding direction for every division in the engine.
///
/// Quantities paid out by the pool round [`Down`](Self::Down); quantities
/// charged by the pool (fees) round [`Up`](Self::Up).
///
/// # Examples
///
/// ```
/// use bastion_amm::domain::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// assert!(!Rounding::Down.is_up());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }
}
