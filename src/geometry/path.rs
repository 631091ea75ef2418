use crate::error::{GeometryError, Result};
use crate::math::vector_2d::cross_2d;
use crate::math::{Point2, Tolerance};

use super::Segment;

/// A closed, cyclically ordered sequence of segments.
///
/// The end of each segment coincides with the start of the next one, and the
/// last segment ends where the first begins. Winding matters: a positive
/// signed area means counter-clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Creates a path from segments that must form a closed loop.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::EmptyPath` for no segments, and
    /// `GeometryError::OpenPath` naming the first segment whose end does not
    /// meet the next segment's start within the pen width.
    pub fn new(segments: Vec<Segment>, tolerance: &Tolerance) -> Result<Self> {
        if segments.is_empty() {
            return Err(GeometryError::EmptyPath.into());
        }
        for (index, segment) in segments.iter().enumerate() {
            let next = &segments[(index + 1) % segments.len()];
            if !tolerance.points_roughly_equal(segment.end(), next.start()) {
                return Err(GeometryError::OpenPath { index }.into());
            }
        }
        Ok(Self { segments })
    }

    /// Builds a closed polygon through `points`.
    ///
    /// A trailing point equal to the first one is ignored, so both open and
    /// explicitly closed point lists are accepted.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::EmptyPath` for an empty list and
    /// `GeometryError::Degenerate` if two consecutive points coincide.
    pub fn from_points(points: &[Point2], tolerance: &Tolerance) -> Result<Self> {
        let mut points = points;
        if points.len() > 1
            && tolerance.points_roughly_equal(&points[0], &points[points.len() - 1])
        {
            points = &points[..points.len() - 1];
        }
        if points.is_empty() {
            return Err(GeometryError::EmptyPath.into());
        }
        let segments = points
            .iter()
            .zip(points.iter().cycle().skip(1))
            .map(|(a, b)| Segment::line(*a, *b, tolerance))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { segments })
    }

    /// Assembles a loop of segments into a path, merging vertices closer than
    /// the pen width.
    ///
    /// Segments no longer than the pen width are dropped and each remaining
    /// segment's start is snapped onto its predecessor's end. Returns `None`
    /// when nothing of substance remains: no segments, or a sliver narrower
    /// than the pen width.
    ///
    /// # Errors
    ///
    /// Returns an error if snapping a start point produces a degenerate segment.
    pub fn weld(segments: Vec<Segment>, tolerance: &Tolerance) -> Result<Option<Self>> {
        let kept: Vec<Segment> = segments
            .into_iter()
            .filter(|s| s.length() > tolerance.thickness())
            .collect();
        let Some(last) = kept.last() else {
            return Ok(None);
        };

        let mut previous_end = *last.end();
        let mut welded = Vec::with_capacity(kept.len());
        for segment in &kept {
            let segment = if *segment.start() == previous_end {
                *segment
            } else {
                segment.with_start(previous_end, tolerance)?
            };
            previous_end = *segment.end();
            welded.push(segment);
        }

        let path = Self::new(welded, tolerance)?;
        let perimeter: f64 = path.segments.iter().map(Segment::length).sum();
        if path.signed_area().abs() <= tolerance.half() * perimeter {
            return Ok(None);
        }
        Ok(Some(path))
    }

    /// Returns a welded copy of this path; see [`Path::weld`].
    ///
    /// # Errors
    ///
    /// Returns an error if snapping a start point produces a degenerate segment.
    pub fn welded(&self, tolerance: &Tolerance) -> Result<Option<Self>> {
        Self::weld(self.segments.clone(), tolerance)
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Start points of every segment, in order.
    #[must_use]
    pub fn vertices(&self) -> Vec<Point2> {
        self.segments.iter().map(|s| *s.start()).collect()
    }

    /// Signed enclosed area; positive for counter-clockwise paths.
    ///
    /// Straight edges contribute through the shoelace formula; each arc adds
    /// the circular segment between its chord and the arc.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        self.segments
            .iter()
            .map(|s| {
                let chord = 0.5 * cross_2d(&s.start().coords, &s.end().coords);
                match s.signed_radius() {
                    None => chord,
                    Some(r) => {
                        let span = s.span_angle();
                        chord + r.signum() * 0.5 * r * r * (span - span.sin())
                    }
                }
            })
            .sum()
    }

    #[must_use]
    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// Returns the path traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            segments: self.segments.iter().rev().map(Segment::reversed).collect(),
        }
    }

    /// Compares two paths segment by segment, allowing a different start vertex.
    #[must_use]
    pub fn roughly_eq(&self, other: &Path, tolerance: &Tolerance) -> bool {
        let n = self.segments.len();
        if n != other.segments.len() {
            return false;
        }
        (0..n).any(|shift| {
            self.segments
                .iter()
                .enumerate()
                .all(|(i, s)| s.roughly_eq(&other.segments[(i + shift) % n], tolerance))
        })
    }
}
