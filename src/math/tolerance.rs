use super::{Point2, Vector2};
use crate::error::{GeometryError, Result};
use crate::math::vector_2d::unit_orthogonal;

/// Default pen width: the smallest distance the kernel tells apart.
pub const DEFAULT_THICKNESS: f64 = 1e-6;

/// Returns true if two scalars differ by at most `tolerance`.
#[must_use]
pub fn roughly_equal(a: f64, b: f64, tolerance: f64) -> bool {
    (b - a).abs() <= tolerance
}

/// Returns true if two points are at most `tolerance` apart (Euclidean distance).
#[must_use]
pub fn points_roughly_equal(a: &Point2, b: &Point2, tolerance: f64) -> bool {
    (b - a).norm() <= tolerance
}

/// Distance from `point` to the infinite line through `line_start` along
/// the unit vector `line_direction`.
#[must_use]
pub fn distance_point_to_line(point: &Point2, line_start: &Point2, line_direction: &Vector2) -> f64 {
    (point - line_start).dot(&unit_orthogonal(line_direction)).abs()
}

/// Numeric tolerance shared by every geometric decision in the kernel.
///
/// `thickness` is both the point-coincidence threshold and, halved, the
/// overshoot allowed past the boundary of a ray or segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    thickness: f64,
}

impl Tolerance {
    /// Creates a tolerance with the given pen width.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidTolerance` if `thickness` is not finite and positive.
    pub fn new(thickness: f64) -> Result<Self> {
        if !thickness.is_finite() || thickness <= 0.0 {
            return Err(GeometryError::InvalidTolerance(thickness).into());
        }
        Ok(Self { thickness })
    }

    /// Returns the pen width.
    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// One-sided overshoot allowance at primitive boundaries.
    #[must_use]
    pub fn half(&self) -> f64 {
        self.thickness / 2.0
    }

    /// The pen width expressed as an angle on a circle of the given radius.
    #[must_use]
    pub fn angular(&self, radius: f64) -> f64 {
        self.thickness / radius.abs()
    }

    #[must_use]
    pub fn roughly_equal(&self, a: f64, b: f64) -> bool {
        roughly_equal(a, b, self.thickness)
    }

    #[must_use]
    pub fn points_roughly_equal(&self, a: &Point2, b: &Point2) -> bool {
        points_roughly_equal(a, b, self.thickness)
    }

    #[must_use]
    pub fn is_zero(&self, value: f64) -> bool {
        roughly_equal(value, 0.0, self.thickness)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            thickness: DEFAULT_THICKNESS,
        }
    }
}
