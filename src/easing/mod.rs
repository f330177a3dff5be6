//! Easing algorithms that move a tracked value toward its target.
//!
//! The position controller applies one easing step per axis on every update,
//! so the choice of easing decides how quickly and how smoothly the tracked
//! element catches up with the face.

/// Exponential approach toward the target
pub mod exponential;

use crate::{constants::DEFAULT_EASING_STRENGTH, Error, Result};

/// Trait for all easing strategies
pub trait Easing: Send + Sync {
    /// Compute the next value of one axis given its current value and target
    fn ease(&self, current: f64, target: f64) -> f64;

    /// Get easing name
    fn name(&self) -> &str;
}

/// Jumps straight to the target without smoothing
pub struct SnapEasing;

impl Easing for SnapEasing {
    fn ease(&self, _current: f64, target: f64) -> f64 {
        target
    }

    fn name(&self) -> &str {
        "SnapEasing"
    }
}

/// Create an easing by specification string.
///
/// Accepts `snap`/`none`, `exponential`, or `exponential:<strength>`.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for an unknown name or a bad strength.
pub fn create_easing(spec: &str) -> Result<Box<dyn Easing>> {
    let spec = spec.trim().to_lowercase();
    let (name, param) = match spec.split_once(':') {
        Some((name, param)) => (name, Some(param)),
        None => (spec.as_str(), None),
    };

    match (name, param) {
        ("snap" | "none", None) => Ok(Box::new(SnapEasing)),
        ("exponential", None) => Ok(Box::new(exponential::ExponentialEasing::new(DEFAULT_EASING_STRENGTH)?)),
        ("exponential", Some(param)) => {
            let strength: f64 = param
                .parse()
                .map_err(|_| Error::InvalidInput(format!("Invalid easing strength: {param}")))?;
            Ok(Box::new(exponential::ExponentialEasing::new(strength)?))
        }
        _ => Err(Error::InvalidInput(format!("Unknown easing: {spec}"))),
    }
}
