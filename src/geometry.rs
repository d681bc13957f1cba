//! Geometric shapes and their bounding boxes.

use crate::fph;
use approx::AbsDiffEq;
use nalgebra::{self as na, Point2, Vector2, point};
use std::fmt;

/// A 2D box with edges aligned with the coordinate system axes.
#[derive(Clone, Debug, PartialEq)]
pub struct Aabb {
    corners: [Point2<fph>; 2],
}

/// A shape that can report its axis-aligned bounding box.
///
/// This is the seam between bodies and the geometry subsystem: the body core
/// never inspects a shape beyond its name and bounds.
pub trait Shape: fmt::Debug + Send + Sync {
    /// Returns the name of the kind of shape.
    fn name(&self) -> &'static str;

    /// Computes the axis-aligned bounding box of the shape centered on its
    /// local origin, with the shape rotated clockwise by the given angle (in
    /// radians).
    fn bounding_box(&self, rotation: fph) -> Aabb;
}

/// A dimensionless point. This is the shape bodies carry before a body type
/// assigns real geometry.
#[derive(Copy, Clone, Debug, Default)]
pub struct Point;

/// A circle centered on its local origin.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Circle {
    radius: fph,
}

/// A rectangle centered on its local origin, with the width and height axes
/// aligned with the local x- and y-axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rectangle {
    width: fph,
    height: fph,
}

impl Aabb {
    /// Creates a new box with the given lower and upper corner points.
    pub fn new(lower_corner: Point2<fph>, upper_corner: Point2<fph>) -> Self {
        Self {
            corners: [lower_corner, upper_corner],
        }
    }

    /// Creates a box centered on the origin with the given half-extents.
    pub fn centered_at_origin(half_extent_x: fph, half_extent_y: fph) -> Self {
        Self::new(
            point![-half_extent_x, -half_extent_y],
            point![half_extent_x, half_extent_y],
        )
    }

    /// Creates a degenerate box containing only the given point.
    pub fn at_point(point: Point2<fph>) -> Self {
        Self::new(point, point)
    }

    /// Returns a reference to the lower corner of the box.
    pub fn lower_corner(&self) -> &Point2<fph> {
        &self.corners[0]
    }

    /// Returns a reference to the upper corner of the box.
    pub fn upper_corner(&self) -> &Point2<fph> {
        &self.corners[1]
    }

    /// Calculates and returns the center point of the box.
    pub fn center(&self) -> Point2<fph> {
        na::center(self.lower_corner(), self.upper_corner())
    }

    /// Returns the extent of the box along the x-axis (the width).
    pub fn extent_x(&self) -> fph {
        self.upper_corner().x - self.lower_corner().x
    }

    /// Returns the extent of the box along the y-axis (the height).
    pub fn extent_y(&self) -> fph {
        self.upper_corner().y - self.lower_corner().y
    }

    /// Returns the box displaced by the given vector.
    pub fn translated(&self, displacement: &Vector2<fph>) -> Self {
        Self::new(
            self.lower_corner() + displacement,
            self.upper_corner() + displacement,
        )
    }
}

impl AbsDiffEq for Aabb {
    type Epsilon = <fph as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        fph::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        Point2::abs_diff_eq(self.lower_corner(), other.lower_corner(), epsilon)
            && Point2::abs_diff_eq(self.upper_corner(), other.upper_corner(), epsilon)
    }
}

impl Shape for Point {
    fn name(&self) -> &'static str {
        "point"
    }

    fn bounding_box(&self, _rotation: fph) -> Aabb {
        Aabb::at_point(Point2::origin())
    }
}

impl Circle {
    /// Creates a new circle with the given radius.
    pub fn new(radius: fph) -> Self {
        Self { radius }
    }

    /// Returns the radius of the circle.
    pub fn radius(&self) -> fph {
        self.radius
    }
}

impl Shape for Circle {
    fn name(&self) -> &'static str {
        "circle"
    }

    fn bounding_box(&self, _rotation: fph) -> Aabb {
        Aabb::centered_at_origin(self.radius, self.radius)
    }
}

impl Rectangle {
    /// Creates a new rectangle with the given width and height.
    pub fn new(width: fph, height: fph) -> Self {
        Self { width, height }
    }

    /// Returns the width of the rectangle.
    pub fn width(&self) -> fph {
        self.width
    }

    /// Returns the height of the rectangle.
    pub fn height(&self) -> fph {
        self.height
    }
}

impl Shape for Rectangle {
    fn name(&self) -> &'static str {
        "rectangle"
    }

    fn bounding_box(&self, rotation: fph) -> Aabb {
        let (sin_rotation, cos_rotation) = rotation.sin_cos();
        let half_extent_x =
            0.5 * (self.width * cos_rotation.abs() + self.height * sin_rotation.abs());
        let half_extent_y =
            0.5 * (self.width * sin_rotation.abs() + self.height * cos_rotation.abs());
        Aabb::centered_at_origin(half_extent_x, half_extent_y)
    }
}
