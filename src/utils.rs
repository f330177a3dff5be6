//! Small parsing and conversion helpers shared by the binary and the sinks.

pub mod safe_cast;

use crate::{controller::Dimensions, Error, Result};

/// Parse a `WIDTHxHEIGHT` size such as `1000x800`
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the text is not two positive integers
/// separated by `x`.
pub fn parse_dimensions(text: &str) -> Result<Dimensions> {
    let invalid = || Error::InvalidInput(format!("Expected WIDTHxHEIGHT, got '{text}'"));

    let lowered = text.trim().to_lowercase();
    let (width, height) = lowered.split_once('x').ok_or_else(invalid)?;
    let width: u32 = width.trim().parse().map_err(|_| invalid())?;
    let height: u32 = height.trim().parse().map_err(|_| invalid())?;

    if width == 0 || height == 0 {
        return Err(Error::InvalidInput(format!("Dimensions must be non-zero, got '{text}'")));
    }
    Ok(Dimensions::new(width, height))
}
