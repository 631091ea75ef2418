//! Intersection algebra over lines, rays, segments and circles.
//!
//! Three fundamental solvers (line/line, circle/circle, line/circle) cover
//! the unbounded carriers. Every other pair is derived from them: a ray is a
//! line whose results are filtered to `[0, ∞)`, a straight segment is a ray
//! filtered to `[0, length]`, an arc is its circle filtered to its wedge, and
//! reversed argument orders swap the parameters of the forward result.
//! Collinear and co-circular overlaps are resolved before derivation.

mod adapt;
mod coincident;
mod fundamental;

use std::ops::Index;

use smallvec::SmallVec;

use crate::error::Result;
use crate::geometry::{Line, Primitive};
use crate::math::{Point2, Tolerance};

/// A point shared by two primitives, with its parameter on each of them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Parameter on the first primitive.
    pub along_a: f64,
    /// Parameter on the second primitive.
    pub along_b: f64,
    pub position: Point2,
}

impl Intersection {
    #[must_use]
    pub fn new(along_a: f64, along_b: f64, position: Point2) -> Self {
        Self {
            along_a,
            along_b,
            position,
        }
    }

    /// Exchanges the two parameters, keeping the position.
    #[must_use]
    pub fn swapped(&self) -> Self {
        Self {
            along_a: self.along_b,
            along_b: self.along_a,
            position: self.position,
        }
    }
}

/// Zero, one or two intersections, stored inline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Intersections(SmallVec<[Intersection; 2]>);

impl Intersections {
    pub(crate) fn none() -> Self {
        Self::default()
    }

    pub(crate) fn one(hit: Intersection) -> Self {
        let mut hits = Self::none();
        hits.push(hit);
        hits
    }

    pub(crate) fn two(first: Intersection, second: Intersection) -> Self {
        let mut hits = Self::one(first);
        hits.push(second);
        hits
    }

    /// Appends `hit` unless two hits are already stored. Two curves of
    /// degree two meet at most twice, so the inline storage never spills.
    pub(crate) fn push(&mut self, hit: Intersection) {
        if self.0.len() >= 2 {
            return;
        }
        self.0.push(hit);
    }

    /// Keeps the hits accepted by `f`, rewriting them in place.
    pub(crate) fn filter_map(self, f: impl FnMut(Intersection) -> Option<Intersection>) -> Self {
        Self(self.0.into_iter().filter_map(f).collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Intersection> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Intersection> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Intersection] {
        &self.0
    }

    /// Swaps the parameters of every hit.
    #[must_use]
    pub fn swapped(&self) -> Self {
        Self(self.0.iter().map(Intersection::swapped).collect())
    }
}

impl Index<usize> for Intersections {
    type Output = Intersection;

    fn index(&self, index: usize) -> &Intersection {
        &self.0[index]
    }
}

impl IntoIterator for Intersections {
    type Item = Intersection;
    type IntoIter = smallvec::IntoIter<[Intersection; 2]>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Intersections {
    type Item = &'a Intersection;
    type IntoIter = std::slice::Iter<'a, Intersection>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Intersects two primitives.
///
/// `along_a` of each hit lies in the parameter domain of `a`, `along_b` in
/// that of `b`. Straight primitives that are collinear report the finite
/// boundary points of their overlap; co-circular ones likewise report the
/// ends of their shared arc.
///
/// # Errors
///
/// Returns `IntersectionError::Unsupported` when two arcs on the same circle
/// overlap in two disjoint pieces.
pub fn intersect(
    a: impl Into<Primitive>,
    b: impl Into<Primitive>,
    tolerance: &Tolerance,
) -> Result<Intersections> {
    let a = a.into();
    let b = b.into();
    if let Some(hits) = coincident::overlap(&a, &b, tolerance)? {
        return Ok(hits);
    }
    derive(&a, &b, tolerance)
}

fn derive(a: &Primitive, b: &Primitive, tolerance: &Tolerance) -> Result<Intersections> {
    match (a, b) {
        (Primitive::Line(a), Primitive::Line(b)) => Ok(fundamental::line_line(a, b, tolerance)),
        (Primitive::Circle(a), Primitive::Circle(b)) => {
            Ok(fundamental::circle_circle(a, b, tolerance))
        }
        (Primitive::Line(a), Primitive::Circle(b)) => {
            Ok(fundamental::line_circle(a, b, tolerance))
        }
        (Primitive::Circle(_), Primitive::Line(_)) => adapt::swap(derive(b, a, tolerance)),
        (Primitive::Ray(ray), _) => {
            let carrier = Primitive::Line(Line::from(*ray));
            Ok(adapt::ray_from_line(derive(&carrier, b, tolerance)?, tolerance))
        }
        (_, Primitive::Ray(_)) => adapt::swap(derive(b, a, tolerance)),
        (Primitive::Segment(segment), _) => {
            let hits = derive(&segment.carrier(), b, tolerance)?;
            if segment.is_straight() {
                Ok(adapt::segment_from_ray(segment, hits, tolerance))
            } else {
                Ok(adapt::segment_from_circle(segment, hits, tolerance))
            }
        }
        (_, Primitive::Segment(_)) => adapt::swap(derive(b, a, tolerance)),
    }
}
