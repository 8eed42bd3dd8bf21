use core::num::{NonZeroU128, NonZeroU32};

use crate::{error::ErrorMessage, TemporalError, TemporalResult};

/// A rounding increment: a positive integer count of the smallest unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoundingIncrement(pub(crate) NonZeroU32);

impl Default for RoundingIncrement {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<f64> for RoundingIncrement {
    type Error = TemporalError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        // The increment is truncated toward zero, then must lie within [1, 10^9].
        if !value.is_finite() {
            return Err(TemporalError::range().with_enum(ErrorMessage::RoundingIncrementOutOfRange));
        }
        let truncated = value as i64;
        if !(1..=1_000_000_000).contains(&truncated) {
            return Err(TemporalError::range().with_enum(ErrorMessage::RoundingIncrementOutOfRange));
        }
        Self::try_new(truncated as u32)
    }
}

impl RoundingIncrement {
    // Using `MIN` avoids either a panic or using NonZeroU32::new_unchecked
    /// The increment of one.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Creates a rounding increment, rejecting zero and values above 10^9.
    pub fn try_new(increment: u32) -> TemporalResult<Self> {
        if increment > 1_000_000_000 {
            return Err(TemporalError::range().with_enum(ErrorMessage::RoundingIncrementOutOfRange));
        }
        NonZeroU32::new(increment)
            .map(Self)
            .ok_or(TemporalError::range().with_enum(ErrorMessage::RoundingIncrementOutOfRange))
    }

    #[inline]
    #[must_use]
    pub fn get(&self) -> u32 {
        self.0.get()
    }

    /// Checks the increment against a `dividend` (the number of smallest
    /// units in the next-larger unit).
    ///
    /// The increment must not exceed the dividend (or the dividend less one
    /// when not `inclusive`) and must divide it evenly.
    pub(crate) fn validate(&self, dividend: u64, inclusive: bool) -> TemporalResult<()> {
        let max = if inclusive { dividend } else { dividend - 1 };
        let increment = u64::from(self.get());

        if increment > max {
            return Err(TemporalError::range().with_enum(ErrorMessage::RoundingIncrementOutOfRange));
        }

        if dividend % increment != 0 {
            return Err(TemporalError::range().with_enum(ErrorMessage::RoundingIncrementNotDivisor));
        }

        Ok(())
    }

    #[inline]
    pub(crate) fn as_extended_increment(&self) -> NonZeroU128 {
        NonZeroU128::from(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::RoundingIncrement;

    #[test]
    fn construction_bounds() {
        assert!(RoundingIncrement::try_new(0).is_err());
        assert!(RoundingIncrement::try_new(1_000_000_001).is_err());
        assert_eq!(RoundingIncrement::try_from(2.9).unwrap().get(), 2);
        assert!(RoundingIncrement::try_from(0.5).is_err());
        assert!(RoundingIncrement::try_from(f64::NAN).is_err());
    }

    #[test]
    fn validation() {
        let five = RoundingIncrement::try_new(5).unwrap();
        assert!(five.validate(60, false).is_ok());
        assert!(five.validate(24, false).is_err());
        assert!(five.validate(5, false).is_err());
        assert!(five.validate(5, true).is_ok());
        assert!(RoundingIncrement::ONE.validate(1, true).is_ok());
    }
}
