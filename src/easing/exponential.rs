use super::Easing;
use crate::{constants::DEFAULT_EASING_STRENGTH, Error, Result};

/// Fixed-ratio exponential approach.
///
/// Every step closes `1 / strength` of the remaining gap, so the gap shrinks by
/// `1 - 1 / strength` per step and the value never overshoots.
pub struct ExponentialEasing {
    strength: f64,
}

impl ExponentialEasing {
    /// Create a new exponential easing
    ///
    /// # Errors
    ///
    /// Returns an error unless `strength` is finite and at least 1.
    pub fn new(strength: f64) -> Result<Self> {
        if !strength.is_finite() || strength < 1.0 {
            return Err(Error::InvalidInput(format!(
                "Easing strength must be a finite value >= 1, got {strength}"
            )));
        }
        Ok(Self { strength })
    }

    /// Divisor applied to the remaining gap
    #[must_use]
    pub const fn strength(&self) -> f64 {
        self.strength
    }
}

impl Default for ExponentialEasing {
    fn default() -> Self {
        Self {
            strength: DEFAULT_EASING_STRENGTH,
        }
    }
}

impl Easing for ExponentialEasing {
    fn ease(&self, current: f64, target: f64) -> f64 {
        current + (target - current) / self.strength
    }

    fn name(&self) -> &str {
        "ExponentialEasing"
    }
}
