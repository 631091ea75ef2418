use crate::error::Result;
use crate::math::vector_2d::{finite_point, unit};
use crate::math::{distance_point_to_line, Point2, Vector2};

use super::Ray;

/// An infinite line defined by a point and a unit direction.
///
/// The parametric form is `P(t) = point + t * direction`, `t` unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    point: Point2,
    direction: Vector2,
}

impl Line {
    /// Creates a new line through `point` along `direction`.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction is zero-length or any input is not finite.
    pub fn new(point: Point2, direction: Vector2) -> Result<Self> {
        Ok(Self {
            point: finite_point(&point)?,
            direction: unit(&direction)?,
        })
    }

    /// Returns the reference point (`t = 0`).
    #[must_use]
    pub fn point(&self) -> &Point2 {
        &self.point
    }

    /// Returns the unit direction vector.
    #[must_use]
    pub fn direction(&self) -> &Vector2 {
        &self.direction
    }

    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.point + self.direction * t
    }

    /// Parameter of the orthogonal projection of `point` onto the line.
    #[must_use]
    pub fn offset_at(&self, point: &Point2) -> f64 {
        (point - self.point).dot(&self.direction)
    }

    #[must_use]
    pub fn distance_to(&self, point: &Point2) -> f64 {
        distance_point_to_line(point, &self.point, &self.direction)
    }
}

impl From<Ray> for Line {
    fn from(ray: Ray) -> Self {
        Self {
            point: *ray.start(),
            direction: *ray.direction(),
        }
    }
}
