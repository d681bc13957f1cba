//! Standard body types.

pub mod circle;
pub mod rectangle;

pub use circle::CircleType;
pub use rectangle::RectangleType;

use crate::{
    config::{BodyConfig, ConfigValue},
    error::BodyError,
    fph,
    registry::BodyRegistry,
};

/// Defines all standard body types in the given registry.
///
/// # Errors
/// Returns an error if any of the standard type names has already been
/// defined.
pub fn register_standard(registry: &mut BodyRegistry) -> Result<(), BodyError> {
    registry.define("circle", CircleType)?;
    registry.define("rectangle", RectangleType)?;
    Ok(())
}

/// Extracts the extra configuration entry with the given key as a positive
/// finite number.
fn positive_extent(config: &BodyConfig, key: &str) -> Result<fph, BodyError> {
    let value = config
        .extras
        .get(key)
        .and_then(ConfigValue::as_number)
        .ok_or_else(|| {
            BodyError::InvalidConfiguration(format!("missing numeric `{key}` entry"))
        })?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(BodyError::InvalidConfiguration(format!(
            "`{key}` must be positive and finite, not {value}"
        )))
    }
}
