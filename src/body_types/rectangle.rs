//! Rectangular bodies.

use crate::{
    body::Body,
    config::BodyOptions,
    error::BodyError,
    geometry::Rectangle,
    registry::BodyType,
};
use std::sync::Arc;

/// Body type for uniformly dense rectangular bodies.
///
/// Requires positive finite `width` and `height` entries in the extra
/// configuration.
#[derive(Copy, Clone, Debug, Default)]
pub struct RectangleType;

impl BodyType for RectangleType {
    fn init(&self, body: &mut Body, _options: &BodyOptions) -> Result<(), BodyError> {
        super::positive_extent(body.config(), "width")?;
        super::positive_extent(body.config(), "height")?;
        self.recalc(body);
        Ok(())
    }

    fn recalc(&self, body: &mut Body) {
        let (Ok(width), Ok(height)) = (
            super::positive_extent(body.config(), "width"),
            super::positive_extent(body.config(), "height"),
        ) else {
            return;
        };
        body.set_geometry(Arc::new(Rectangle::new(width, height)));
        // Moment of inertia of a uniformly dense rectangle
        body.set_moment_of_inertia(Some(
            body.config().mass * (width.powi(2) + height.powi(2)) / 12.0,
        ));
    }
}
