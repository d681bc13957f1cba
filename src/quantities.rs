//! Physical quantities.

use crate::fph;
use nalgebra::{Point2, Vector2};

/// A position in 2D space.
pub type Position = Point2<fph>;

/// A velocity in 2D space.
pub type Velocity = Vector2<fph>;

/// An acceleration in 2D space.
pub type Acceleration = Vector2<fph>;

/// A 2D force.
pub type Force = Vector2<fph>;

/// Computes the scalar cross product of the given 2D vectors.
///
/// This is the z-component of the cross product of the corresponding 3D
/// vectors: positive when the rotation from `a` to `b` is counterclockwise.
#[inline]
pub fn cross(a: &Vector2<fph>, b: &Vector2<fph>) -> fph {
    a.x * b.y - a.y * b.x
}

/// Computes the torque about the center of mass exerted by the given force
/// applied at the given offset from the center of mass.
///
/// The returned torque is positive for a counterclockwise rotational sense.
#[inline]
pub fn compute_torque(force_position: &Vector2<fph>, force: &Force) -> fph {
    cross(force_position, force)
}
