use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::vector_2d::{finite_point, polar_angle};
use crate::math::{Point2, Tolerance, Vector2};

/// A full circle.
///
/// Positions on the circle are parameterized by arc length measured
/// counter-clockwise from the `+x` direction, so the domain is
/// `[0, 2π · radius)` and composes with segment offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: Point2,
    radius: f64,
}

impl Circle {
    /// Creates a new circle.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidRadius` if the radius is not finite and
    /// positive, or `GeometryError::NonFinite` for a non-finite center.
    pub fn new(center: Point2, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(GeometryError::InvalidRadius(radius).into());
        }
        Ok(Self {
            center: finite_point(&center)?,
            radius,
        })
    }

    /// Builds a circle from a center and radius already known to be valid.
    pub(crate) fn from_parts(center: Point2, radius: f64) -> Self {
        Self { center, radius }
    }

    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn circumference(&self) -> f64 {
        TAU * self.radius
    }

    /// Arc-length parameter of the angular position of `point`.
    #[must_use]
    pub fn offset_at(&self, point: &Point2) -> f64 {
        polar_angle(&self.center, point) * self.radius
    }

    #[must_use]
    pub fn point_at(&self, offset: f64) -> Point2 {
        let angle = offset / self.radius;
        self.center + Vector2::new(angle.cos(), angle.sin()) * self.radius
    }

    /// Returns true if `point` lies in the closed disc, widened by half the pen width.
    #[must_use]
    pub fn contains(&self, point: &Point2, tolerance: &Tolerance) -> bool {
        (self.center - point).norm() <= self.radius + tolerance.half()
    }
}
