//! Dethroning threshold

/// Strict 1.5x rule, evaluated in integers.
///
/// `new > current * 3 / 2` over the rationals is the same predicate as
/// `new > current + floor(current / 2)` over the integers, and the latter
/// cannot overflow before saturating at `u128::MAX` (which nothing exceeds).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThresholdPolicy;

impl ThresholdPolicy {
    /// Largest canonical value that still does NOT dethrone `current`
    pub fn threshold(current: u128) -> u128 {
        current.saturating_add(current / 2)
    }

    /// Whether `new` dethrones a holder whose deposit is worth `current`
    pub fn qualifies(new: u128, current: u128) -> bool {
        new > Self::threshold(current)
    }

    /// `current` is the holder's canonical value, `None` for an empty throne.
    ///
    /// An empty throne goes to any deposit at all; the positive-amount check
    /// happens before normalization, so a deposit that floors to zero still
    /// takes it.
    pub fn admits(new: u128, current: Option<u128>) -> bool {
        current.map_or(true, |current| Self::qualifies(new, current))
    }
}
