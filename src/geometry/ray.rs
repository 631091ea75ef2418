use crate::error::Result;
use crate::math::vector_2d::{finite_point, unit};
use crate::math::{Point2, Vector2};

/// A semi-infinite line starting at `start`; its parameter domain is `[0, ∞)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    start: Point2,
    direction: Vector2,
}

impl Ray {
    /// Creates a new ray.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction is zero-length or any input is not finite.
    pub fn new(start: Point2, direction: Vector2) -> Result<Self> {
        Ok(Self {
            start: finite_point(&start)?,
            direction: unit(&direction)?,
        })
    }

    /// Builds a ray from an already normalized direction.
    pub(crate) fn from_unit(start: Point2, direction: Vector2) -> Self {
        Self { start, direction }
    }

    #[must_use]
    pub fn start(&self) -> &Point2 {
        &self.start
    }

    /// Returns the unit direction vector.
    #[must_use]
    pub fn direction(&self) -> &Vector2 {
        &self.direction
    }

    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.start + self.direction * t
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn point_at_walks_along_direction() {
        let ray = Ray::new(Point2::new(0.0, 0.5), Vector2::new(2.0, 0.0)).unwrap();
        let p = ray.point_at(0.25);
        assert!((p - Point2::new(0.25, 0.5)).norm() < 1e-12);
    }

    #[test]
    fn non_finite_start_is_rejected() {
        assert!(Ray::new(Point2::new(f64::INFINITY, 0.0), Vector2::x()).is_err());
    }
}
