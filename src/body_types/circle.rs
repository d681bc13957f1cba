//! Circular bodies.

use crate::{
    body::Body,
    config::BodyOptions,
    error::BodyError,
    geometry::Circle,
    registry::BodyType,
};
use std::sync::Arc;

/// Body type for uniformly dense circular bodies.
///
/// Requires a positive finite `radius` entry in the extra configuration.
#[derive(Copy, Clone, Debug, Default)]
pub struct CircleType;

impl BodyType for CircleType {
    fn init(&self, body: &mut Body, _options: &BodyOptions) -> Result<(), BodyError> {
        super::positive_extent(body.config(), "radius")?;
        self.recalc(body);
        Ok(())
    }

    fn recalc(&self, body: &mut Body) {
        let Ok(radius) = super::positive_extent(body.config(), "radius") else {
            return;
        };
        body.set_geometry(Arc::new(Circle::new(radius)));
        // Moment of inertia of a uniformly dense disc
        body.set_moment_of_inertia(Some(0.5 * body.config().mass * radius.powi(2)));
    }
}
