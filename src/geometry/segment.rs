use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::vector_2d::{
    angle_between, angle_between_with_direction, cross_2d, finite_point, rotate, unit,
    unit_orthogonal,
};
use crate::math::{Point2, Tolerance, Vector2};

use super::{Circle, Primitive, Ray};

/// Turn sense of an arc segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Counter-clockwise; the center lies to the left of the travel direction.
    Leftwards,
    /// Clockwise; the center lies to the right of the travel direction.
    Rightwards,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Shape {
    Straight {
        length: f64,
    },
    Arc {
        center: Point2,
        /// Positive for leftwards arcs, negative for rightwards arcs.
        signed_radius: f64,
        /// Angle swept from start to end, in `(0, 2π)`.
        span: f64,
    },
}

/// A finite piece of a path: either a straight segment or a circular arc.
///
/// Offsets along the segment are arc lengths in `[0, length]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    start: Point2,
    end: Point2,
    direction: Vector2,
    shape: Shape,
}

impl Segment {
    /// Creates a straight segment from `start` to `end`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the endpoints are closer than the
    /// pen width, or `GeometryError::NonFinite` for non-finite coordinates.
    pub fn line(start: Point2, end: Point2, tolerance: &Tolerance) -> Result<Self> {
        let start = finite_point(&start)?;
        let end = finite_point(&end)?;
        let chord = end - start;
        let length = chord.norm();
        if length <= tolerance.thickness() {
            return Err(GeometryError::Degenerate(format!(
                "zero-length segment at ({}, {})",
                start.x, start.y
            ))
            .into());
        }
        Ok(Self {
            start,
            end,
            direction: chord / length,
            shape: Shape::Straight { length },
        })
    }

    /// Creates a circular arc leaving `start` along `direction` and ending at `end`.
    ///
    /// The center is found on the perpendicular bisector of the chord. An arc
    /// whose end lies on its tangent ray (within half the pen width) is a
    /// straight segment.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the chord has zero length or the
    /// direction points straight away from `end`, and `GeometryError::ZeroVector`
    /// for a zero direction.
    pub fn arc(start: Point2, direction: Vector2, end: Point2, tolerance: &Tolerance) -> Result<Self> {
        let start = finite_point(&start)?;
        let end = finite_point(&end)?;
        let direction = unit(&direction)?;

        let chord = end - start;
        let chord_length = chord.norm();
        if chord_length <= tolerance.thickness() {
            return Err(GeometryError::Degenerate(format!(
                "arc with zero-length chord at ({}, {}) has no radial center",
                start.x, start.y
            ))
            .into());
        }

        let deviation = cross_2d(&direction, &chord);
        if deviation.abs() <= tolerance.half() {
            if direction.dot(&chord) > 0.0 {
                return Self::line(start, end, tolerance);
            }
            return Err(
                GeometryError::Degenerate("arc direction points away from its end".into()).into(),
            );
        }

        let signed_radius = chord_length * chord_length / (2.0 * deviation);
        let center = start + unit_orthogonal(&direction) * signed_radius;
        let span = 2.0 * angle_between(&direction, &chord);

        Ok(Self {
            start,
            end,
            direction,
            shape: Shape::Arc {
                center,
                signed_radius,
                span,
            },
        })
    }

    /// Builds the arc from `start` to `end` on a known circle, turning in the
    /// sense given by the sign of `signed_radius`.
    fn from_arc_parts(
        start: Point2,
        end: Point2,
        center: Point2,
        signed_radius: f64,
        tolerance: &Tolerance,
    ) -> Result<Self> {
        let sign = signed_radius.signum();
        let radial = start - center;
        let direction = unit_orthogonal(&radial) * sign;
        let span = angle_between_with_direction(&radial, &direction, &(end - center));
        if span * signed_radius.abs() <= tolerance.thickness() {
            return Err(GeometryError::Degenerate(format!(
                "arc piece from ({}, {}) has no length",
                start.x, start.y
            ))
            .into());
        }
        Ok(Self {
            start,
            end,
            direction,
            shape: Shape::Arc {
                center,
                signed_radius,
                span,
            },
        })
    }

    #[must_use]
    pub fn start(&self) -> &Point2 {
        &self.start
    }

    #[must_use]
    pub fn end(&self) -> &Point2 {
        &self.end
    }

    /// Unit direction of travel at the start.
    #[must_use]
    pub fn direction(&self) -> &Vector2 {
        &self.direction
    }

    #[must_use]
    pub fn is_straight(&self) -> bool {
        matches!(self.shape, Shape::Straight { .. })
    }

    /// Euclidean length for straight segments, `|radius| * span` for arcs.
    #[must_use]
    pub fn length(&self) -> f64 {
        match self.shape {
            Shape::Straight { length } => length,
            Shape::Arc {
                signed_radius,
                span,
                ..
            } => signed_radius.abs() * span,
        }
    }

    /// Center of the arc's circle; `None` for straight segments.
    #[must_use]
    pub fn radial_center(&self) -> Option<Point2> {
        match self.shape {
            Shape::Straight { .. } => None,
            Shape::Arc { center, .. } => Some(center),
        }
    }

    /// Radius with the turn sense as its sign (positive = leftwards).
    #[must_use]
    pub fn signed_radius(&self) -> Option<f64> {
        match self.shape {
            Shape::Straight { .. } => None,
            Shape::Arc { signed_radius, .. } => Some(signed_radius),
        }
    }

    #[must_use]
    pub fn radius(&self) -> Option<f64> {
        self.signed_radius().map(f64::abs)
    }

    #[must_use]
    pub fn orientation(&self) -> Option<Orientation> {
        self.signed_radius().map(|r| {
            if r > 0.0 {
                Orientation::Leftwards
            } else {
                Orientation::Rightwards
            }
        })
    }

    /// Angle swept by the arc; zero for straight segments.
    #[must_use]
    pub fn span_angle(&self) -> f64 {
        match self.shape {
            Shape::Straight { .. } => 0.0,
            Shape::Arc { span, .. } => span,
        }
    }

    /// Point at arc-length `offset` from the start.
    #[must_use]
    pub fn point_at(&self, offset: f64) -> Point2 {
        match self.shape {
            Shape::Straight { .. } => self.start + self.direction * offset,
            Shape::Arc {
                center,
                signed_radius,
                ..
            } => center + rotate(&(self.start - center), offset / signed_radius),
        }
    }

    /// Unit direction of travel at arc-length `offset`.
    #[must_use]
    pub fn direction_of(&self, offset: f64) -> Vector2 {
        match self.shape {
            Shape::Straight { .. } => self.direction,
            Shape::Arc { signed_radius, .. } => rotate(&self.direction, offset / signed_radius),
        }
    }

    #[must_use]
    pub fn end_direction(&self) -> Vector2 {
        self.direction_of(self.length())
    }

    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        self.point_at(self.length() / 2.0)
    }

    /// Angle turned from the start to the angular position of `point`, in `[0, 2π)`.
    fn turn_angle(&self, center: &Point2, point: &Point2) -> f64 {
        angle_between_with_direction(&(self.start - center), &self.direction, &(point - center))
    }

    /// Maps a point on (or near) the segment back to its arc-length offset.
    ///
    /// For arcs, a point outside the angular span gets a negative offset when
    /// it is angularly closer to the start and an offset past `length` when
    /// it is closer to the end, so callers can clamp to the nearer endpoint.
    #[must_use]
    pub fn offset_at(&self, point: &Point2) -> f64 {
        match self.shape {
            Shape::Straight { .. } => (point - self.start).dot(&self.direction),
            Shape::Arc {
                center,
                signed_radius,
                span,
            } => {
                let radius = signed_radius.abs();
                let turned = self.turn_angle(&center, point);
                if turned <= span {
                    return turned * radius;
                }
                let past_end = turned - span;
                let before_start = TAU - turned;
                if past_end <= before_start {
                    turned * radius
                } else {
                    -before_start * radius
                }
            }
        }
    }

    /// Returns true if the angular position of `point` around the arc's
    /// center falls within the arc's span, widened by the pen width.
    ///
    /// For straight segments this checks the projection against `[0, length]`
    /// widened by half the pen width.
    #[must_use]
    pub fn wedge_contains_point(&self, point: &Point2, tolerance: &Tolerance) -> bool {
        match self.shape {
            Shape::Straight { length } => {
                let t = self.offset_at(point);
                t >= -tolerance.half() && t <= length + tolerance.half()
            }
            Shape::Arc {
                center,
                signed_radius,
                span,
            } => {
                let slack = tolerance.angular(signed_radius);
                let turned = self.turn_angle(&center, point);
                turned <= span + slack || turned >= TAU - slack
            }
        }
    }

    /// Offset of the point on the segment closest to `point`.
    #[must_use]
    pub fn closest_offset(&self, point: &Point2) -> f64 {
        match self.shape {
            Shape::Straight { length } => self.offset_at(point).clamp(0.0, length),
            Shape::Arc {
                center,
                signed_radius,
                span,
            } => {
                let turned = self.turn_angle(&center, point);
                if turned <= span {
                    turned * signed_radius.abs()
                } else if (point - self.start).norm() <= (point - self.end).norm() {
                    0.0
                } else {
                    self.length()
                }
            }
        }
    }

    #[must_use]
    pub fn distance_to(&self, point: &Point2) -> f64 {
        (self.point_at(self.closest_offset(point)) - point).norm()
    }

    /// Splits the segment at `point` into two consecutive pieces.
    ///
    /// For arcs both pieces keep the original circle; the second piece's start
    /// direction follows from the turn sense at `point`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if `point` is within the pen width of
    /// an endpoint or beyond it.
    pub fn subdivide(&self, point: &Point2, tolerance: &Tolerance) -> Result<[Segment; 2]> {
        let offset = self.offset_at(point);
        if offset <= tolerance.thickness() || offset >= self.length() - tolerance.thickness() {
            return Err(GeometryError::Degenerate(format!(
                "cannot subdivide at ({}, {}): offset {offset} is not inside (0, {})",
                point.x,
                point.y,
                self.length()
            ))
            .into());
        }
        match self.shape {
            Shape::Straight { .. } => Ok([
                Self::line(self.start, *point, tolerance)?,
                Self::line(*point, self.end, tolerance)?,
            ]),
            Shape::Arc {
                center,
                signed_radius,
                ..
            } => Ok([
                Self::from_arc_parts(self.start, *point, center, signed_radius, tolerance)?,
                Self::from_arc_parts(*point, self.end, center, signed_radius, tolerance)?,
            ]),
        }
    }

    /// Returns the same curve traversed from end to start.
    #[must_use]
    pub fn reversed(&self) -> Self {
        match self.shape {
            Shape::Straight { .. } => Self {
                start: self.end,
                end: self.start,
                direction: -self.direction,
                shape: self.shape,
            },
            Shape::Arc {
                center,
                signed_radius,
                span,
            } => Self {
                start: self.end,
                end: self.start,
                direction: -self.end_direction(),
                shape: Shape::Arc {
                    center,
                    signed_radius: -signed_radius,
                    span,
                },
            },
        }
    }

    /// Returns a copy whose start is moved to `start`, keeping the end and,
    /// for arcs, the circle and turn sense.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the moved segment has no length.
    pub fn with_start(&self, start: Point2, tolerance: &Tolerance) -> Result<Self> {
        match self.shape {
            Shape::Straight { .. } => Self::line(start, self.end, tolerance),
            Shape::Arc {
                center,
                signed_radius,
                ..
            } => Self::from_arc_parts(start, self.end, center, signed_radius, tolerance),
        }
    }

    /// The ray carrying a straight segment; `None` for arcs.
    #[must_use]
    pub fn as_ray(&self) -> Option<Ray> {
        self.is_straight()
            .then(|| Ray::from_unit(self.start, self.direction))
    }

    /// The full circle carrying an arc; `None` for straight segments.
    #[must_use]
    pub fn as_circle(&self) -> Option<Circle> {
        match self.shape {
            Shape::Straight { .. } => None,
            Shape::Arc {
                center,
                signed_radius,
                ..
            } => Some(Circle::from_parts(center, signed_radius.abs())),
        }
    }

    /// The unbounded curve carrying the segment: its ray or its circle.
    pub(crate) fn carrier(&self) -> Primitive {
        match self.shape {
            Shape::Straight { .. } => Primitive::Ray(Ray::from_unit(self.start, self.direction)),
            Shape::Arc {
                center,
                signed_radius,
                ..
            } => Primitive::Circle(Circle::from_parts(center, signed_radius.abs())),
        }
    }

    /// Compares start, end and midpoint within the pen width.
    #[must_use]
    pub fn roughly_eq(&self, other: &Segment, tolerance: &Tolerance) -> bool {
        self.is_straight() == other.is_straight()
            && tolerance.points_roughly_equal(&self.start, &other.start)
            && tolerance.points_roughly_equal(&self.end, &other.end)
            && tolerance.points_roughly_equal(&self.midpoint(), &other.midpoint())
    }
}
