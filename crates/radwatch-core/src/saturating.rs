//! Fixed-width unsigned registers with clamp-on-overflow arithmetic.
//!
//! The alert core keeps its dose accumulator and exposure counter in
//! registers narrower than any native integer (16 and 4 bits). Native
//! wrapping or trapping overflow is never relied upon: every addition goes
//! through [`Saturating::accumulate`], which widens, compares against the
//! register's exclusive bound and clamps to `BOUND - 1`.

use core::fmt;

/// An unsigned register `BITS` wide (1..=16) that clamps instead of wrapping.
///
/// `BOUND` is the exclusive upper bound `2^BITS`. A sum that would reach the
/// bound is stored as `BOUND - 1`, so the register never rolls over to a
/// small value.
///
/// # Example
///
/// ```rust
/// use radwatch_core::Saturating;
///
/// let nibble = Saturating::<4>::new(14).unwrap_or_default();
/// assert_eq!(nibble.accumulate(200).get(), 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Saturating<const BITS: u32>(u16);

/// 16-bit dose accumulator register.
pub type Dose = Saturating<16>;

/// 4-bit consecutive-exposure tick counter.
pub type ExposureTicks = Saturating<4>;

impl<const BITS: u32> Saturating<BITS> {
    /// Exclusive upper bound of the register (`2^BITS`).
    pub const BOUND: u32 = 1 << BITS;

    /// Largest value the register holds; also the clamp target.
    pub const MAX: u16 = u16::MAX >> (16 - BITS);

    /// The zeroed register.
    pub const ZERO: Self = Self(0);

    /// Create a register holding `value`, or `None` if it does not fit.
    #[must_use]
    pub const fn new(value: u16) -> Option<Self> {
        if value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Current value.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Add `amount`, clamping to `BOUND - 1` when the sum reaches the bound.
    #[must_use]
    pub fn accumulate(self, amount: u16) -> Self {
        let candidate = u32::from(self.0).saturating_add(u32::from(amount));
        match u16::try_from(candidate) {
            Ok(value) if u32::from(value) < Self::BOUND => Self(value),
            _ => Self(Self::MAX),
        }
    }

    /// Add one with the same clamp policy as [`Self::accumulate`].
    #[must_use]
    pub fn increment(self) -> Self {
        self.accumulate(1)
    }

    /// True once the register sits at its clamp value.
    #[must_use]
    pub const fn is_saturated(self) -> bool {
        self.0 == Self::MAX
    }
}

impl<const BITS: u32> fmt::Display for Saturating<BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<const BITS: u32> From<Saturating<BITS>> for u16 {
    fn from(value: Saturating<BITS>) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_constants() {
        assert_eq!(Dose::BOUND, 65_536);
        assert_eq!(Dose::MAX, 65_535);
        assert_eq!(ExposureTicks::BOUND, 16);
        assert_eq!(ExposureTicks::MAX, 15);
        assert_eq!(Saturating::<8>::MAX, 255);
        assert_eq!(Saturating::<1>::MAX, 1);
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert_eq!(ExposureTicks::new(15).map(Saturating::get), Some(15));
        assert!(ExposureTicks::new(16).is_none());
        assert!(Dose::new(u16::MAX).is_some());
    }

    #[test]
    fn test_accumulate_below_bound() {
        let dose = Dose::ZERO.accumulate(45).accumulate(75);
        assert_eq!(dose.get(), 120);
        assert!(!dose.is_saturated());
    }

    #[test]
    fn test_accumulate_clamps_at_bound() {
        let near = Dose::new(65_500).unwrap_or_default();
        let clamped = near.accumulate(200);
        assert_eq!(clamped.get(), 65_535);
        assert!(clamped.is_saturated());

        // Stays clamped, never wraps back to a small number
        assert_eq!(clamped.accumulate(255).get(), 65_535);
        assert_eq!(clamped.accumulate(u16::MAX).get(), 65_535);
    }

    #[test]
    fn test_increment_saturates_nibble() {
        let mut ticks = ExposureTicks::ZERO;
        for _ in 0..40 {
            ticks = ticks.increment();
        }
        assert_eq!(ticks.get(), 15);
    }

    #[test]
    fn test_display_and_conversion() {
        let ticks = ExposureTicks::ZERO.increment().increment();
        assert_eq!(ticks.to_string(), "2");
        assert_eq!(u16::from(ticks), 2);
    }
}
