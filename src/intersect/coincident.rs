//! Overlapping carriers: collinear straight primitives and co-circular curves.
//!
//! Such pairs share a whole interval rather than isolated points. They are
//! reported by the finite boundary points of the shared interval.

use smallvec::SmallVec;

use crate::error::{IntersectionError, Result};
use crate::geometry::{Circle, Primitive, Segment};
use crate::math::vector_2d::cross_2d;
use crate::math::{distance_point_to_line, Point2, Tolerance, Vector2};

use super::{Intersection, Intersections};

/// A straight carrier with the parameter bounds of the primitive on it.
struct StraightSpan {
    origin: Point2,
    direction: Vector2,
    min: f64,
    max: f64,
}

impl StraightSpan {
    fn of(primitive: &Primitive) -> Option<Self> {
        let (origin, direction, max) = match primitive {
            Primitive::Line(l) => (*l.point(), *l.direction(), f64::INFINITY),
            Primitive::Ray(r) => (*r.start(), *r.direction(), f64::INFINITY),
            Primitive::Segment(s) if s.is_straight() => (*s.start(), *s.direction(), s.length()),
            _ => return None,
        };
        let min = if matches!(primitive, Primitive::Line(_)) {
            f64::NEG_INFINITY
        } else {
            0.0
        };
        Some(Self {
            origin,
            direction,
            min,
            max,
        })
    }

    fn parameter_of(&self, point: &Point2) -> f64 {
        (point - self.origin).dot(&self.direction)
    }

    /// Foot of the perpendicular from `point` onto the carrier.
    fn project(&self, point: &Point2) -> Point2 {
        self.origin + self.direction * self.parameter_of(point)
    }

    /// The finite ends of the primitive.
    fn endpoints(&self) -> impl Iterator<Item = Point2> + '_ {
        [self.min, self.max]
            .into_iter()
            .filter(|t| t.is_finite())
            .map(|t| self.origin + self.direction * t)
    }

    /// Whether `point` lies on the primitive within half the pen width.
    fn holds(&self, point: &Point2, tolerance: &Tolerance) -> bool {
        let t = self.parameter_of(point);
        t >= self.min - tolerance.half()
            && t <= self.max + tolerance.half()
            && distance_point_to_line(point, &self.origin, &self.direction) <= tolerance.half()
    }
}

/// A circular carrier; `arc` is set when the primitive covers only part of it.
struct CircularSpan<'a> {
    center: Point2,
    radius: f64,
    arc: Option<&'a Segment>,
}

impl<'a> CircularSpan<'a> {
    fn of(primitive: &'a Primitive) -> Option<Self> {
        match primitive {
            Primitive::Circle(c) => Some(Self {
                center: *c.center(),
                radius: c.radius(),
                arc: None,
            }),
            Primitive::Segment(s) => Some(Self {
                center: s.radial_center()?,
                radius: s.radius()?,
                arc: Some(s),
            }),
            _ => None,
        }
    }
}

/// Resolves overlapping carriers; `None` when the carriers are distinct and
/// the regular derivation applies.
pub(super) fn overlap(
    a: &Primitive,
    b: &Primitive,
    tolerance: &Tolerance,
) -> Result<Option<Intersections>> {
    if let (Some(sa), Some(sb)) = (StraightSpan::of(a), StraightSpan::of(b)) {
        return Ok(collinear(&sa, &sb, tolerance));
    }
    if let (Some(ca), Some(cb)) = (CircularSpan::of(a), CircularSpan::of(b)) {
        return co_circular(&ca, &cb, tolerance);
    }
    Ok(None)
}

/// Parallel straight primitives meet where an end of one lies on the other.
///
/// A shared end is placed midway between the end and its foot on the other
/// carrier, so the result does not depend on argument order. Ends of a
/// primitive that drifts away from the other carrier are never reported.
fn collinear(a: &StraightSpan, b: &StraightSpan, tolerance: &Tolerance) -> Option<Intersections> {
    if !tolerance.is_zero(cross_2d(&a.direction, &b.direction)) {
        return None;
    }

    let mut candidates: SmallVec<[Point2; 4]> = a
        .endpoints()
        .filter(|e| b.holds(e, tolerance))
        .map(|e| nalgebra::center(&e, &b.project(&e)))
        .chain(
            b.endpoints()
                .filter(|e| a.holds(e, tolerance))
                .map(|e| nalgebra::center(&e, &a.project(&e))),
        )
        .collect();
    candidates.sort_by(|p, q| p.x.total_cmp(&q.x).then(p.y.total_cmp(&q.y)));

    let mut ends: SmallVec<[Point2; 4]> = SmallVec::new();
    for p in candidates {
        if !ends.iter().any(|e| tolerance.points_roughly_equal(e, &p)) {
            ends.push(p);
        }
    }

    let mut hits: SmallVec<[Intersection; 4]> = ends
        .into_iter()
        .map(|p| {
            Intersection::new(
                a.parameter_of(&p).clamp(a.min, a.max),
                b.parameter_of(&p).clamp(b.min, b.max),
                p,
            )
        })
        .collect();
    hits.sort_by(|x, y| x.along_a.total_cmp(&y.along_a));
    if hits.len() > 2 {
        let last = hits.len() - 1;
        hits.swap(1, last);
        hits.truncate(2);
    }

    let mut out = Intersections::none();
    for hit in hits {
        out.push(hit);
    }
    Some(out)
}

fn co_circular(
    a: &CircularSpan<'_>,
    b: &CircularSpan<'_>,
    tolerance: &Tolerance,
) -> Result<Option<Intersections>> {
    if !tolerance.points_roughly_equal(&a.center, &b.center)
        || !tolerance.roughly_equal(a.radius, b.radius)
    {
        return Ok(None);
    }

    let hits = match (a.arc, b.arc) {
        (None, None) => Intersections::none(),
        (Some(arc), None) => arc_ends_on_circle(arc, &b.center, b.radius),
        (None, Some(arc)) => arc_ends_on_circle(arc, &a.center, a.radius).swapped(),
        (Some(first), Some(second)) => arc_overlap(first, second, tolerance)?,
    };
    Ok(Some(hits))
}

fn arc_ends_on_circle(arc: &Segment, center: &Point2, radius: f64) -> Intersections {
    let circle = Circle::from_parts(*center, radius);
    Intersections::two(
        Intersection::new(0.0, circle.offset_at(arc.start()), *arc.start()),
        Intersection::new(arc.length(), circle.offset_at(arc.end()), *arc.end()),
    )
}

fn arc_overlap(a: &Segment, b: &Segment, tolerance: &Tolerance) -> Result<Intersections> {
    let mut ends: Vec<Point2> = Vec::with_capacity(4);
    let candidates = [
        (a.start(), b),
        (a.end(), b),
        (b.start(), a),
        (b.end(), a),
    ];
    for (point, other) in candidates {
        if other.wedge_contains_point(point, tolerance)
            && !ends.iter().any(|e| tolerance.points_roughly_equal(e, point))
        {
            ends.push(*point);
        }
    }
    if ends.len() > 2 {
        return Err(IntersectionError::Unsupported(format!(
            "co-circular arcs around ({}, {}) overlap in two separate pieces",
            a.radial_center().map_or(f64::NAN, |c| c.x),
            a.radial_center().map_or(f64::NAN, |c| c.y),
        ))
        .into());
    }

    let mut hits = Intersections::none();
    for p in ends {
        hits.push(Intersection::new(
            a.offset_at(&p).clamp(0.0, a.length()),
            b.offset_at(&p).clamp(0.0, b.length()),
            p,
        ));
    }
    Ok(hits)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Line, Ray};

    fn tol() -> Tolerance {
        Tolerance::default()
    }

    #[test]
    fn crossing_carriers_fall_through() {
        let a = Primitive::Line(Line::new(Point2::origin(), Vector2::x()).unwrap());
        let b = Primitive::Line(Line::new(Point2::new(0.0, 1.0), Vector2::y()).unwrap());
        assert!(overlap(&a, &b, &tol()).unwrap().is_none());
    }

    #[test]
    fn parallel_lines_apart_do_not_meet() {
        let a = Primitive::Line(Line::new(Point2::origin(), Vector2::x()).unwrap());
        let b = Primitive::Line(Line::new(Point2::new(0.0, 1.0), Vector2::x()).unwrap());
        assert!(overlap(&a, &b, &tol()).unwrap().unwrap().is_empty());
    }

    // ── near-parallel ──

    #[test]
    fn slightly_tilted_segment_meets_line_only_at_shared_start() {
        let t = tol();
        let tilted = Segment::line(Point2::origin(), Point2::new(10.0, 1e-5), &t).unwrap();
        let a = Primitive::Line(Line::new(Point2::origin(), Vector2::x()).unwrap());
        let b = Primitive::Segment(tilted);

        let hits = overlap(&a, &b, &t).unwrap().unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].position.coords.norm() < 1e-12);
        assert!(hits[0].along_a.abs() < 1e-12);
        assert!(hits[0].along_b.abs() < 1e-12);
    }

    #[test]
    fn slightly_tilted_segments_share_only_their_start() {
        let t = tol();
        let flat = Segment::line(Point2::origin(), Point2::new(10.0, 0.0), &t).unwrap();
        let tilted = Segment::line(Point2::origin(), Point2::new(10.0, 1e-5), &t).unwrap();

        for (a, b) in [(flat, tilted), (tilted, flat)] {
            let hits = overlap(&a.into(), &b.into(), &t).unwrap().unwrap();
            assert_eq!(hits.len(), 1);
            assert!(hits[0].position.coords.norm() < 1e-12);
            for hit in &hits {
                assert!(a.distance_to(&hit.position) <= t.half());
                assert!(b.distance_to(&hit.position) <= t.half());
            }
        }
    }

    #[test]
    fn ends_within_half_the_pen_width_still_overlap() {
        let t = tol();
        let a = Segment::line(Point2::origin(), Point2::new(2.0, 0.0), &t).unwrap();
        let b = Segment::line(Point2::new(1.0, 1e-7), Point2::new(3.0, 2e-7), &t).unwrap();
        let hits = overlap(&a.into(), &b.into(), &t).unwrap().unwrap();
        assert_eq!(hits.len(), 2);
        assert!((hits[0].along_a - 1.0).abs() < 1e-9);
        assert!(hits[0].along_b.abs() < 1e-9);
        assert!((hits[1].along_a - 2.0).abs() < 1e-9);
        assert!((hits[1].along_b - 1.0).abs() < 1e-9);
    }

    #[test]
    fn opposite_rays_share_the_segment_between_starts() {
        let a = Primitive::Ray(Ray::new(Point2::origin(), Vector2::x()).unwrap());
        let b = Primitive::Ray(Ray::new(Point2::new(2.0, 0.0), -Vector2::x()).unwrap());
        let hits = overlap(&a, &b, &tol()).unwrap().unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits[0].along_a.abs() < 1e-12);
        assert!((hits[0].along_b - 2.0).abs() < 1e-12);
        assert!((hits[1].along_a - 2.0).abs() < 1e-12);
        assert!(hits[1].along_b.abs() < 1e-12);
    }

    #[test]
    fn disjoint_collinear_segments_do_not_meet() {
        let t = tol();
        let a = Primitive::Segment(Segment::line(Point2::origin(), Point2::new(1.0, 0.0), &t).unwrap());
        let b = Primitive::Segment(
            Segment::line(Point2::new(2.0, 0.0), Point2::new(3.0, 0.0), &t).unwrap(),
        );
        assert!(overlap(&a, &b, &t).unwrap().unwrap().is_empty());
    }

    #[test]
    fn segment_on_line_reports_its_ends() {
        let t = tol();
        let l = Primitive::Line(Line::new(Point2::new(-4.0, 1.0), Vector2::x()).unwrap());
        let s = Primitive::Segment(
            Segment::line(Point2::new(0.0, 1.0), Point2::new(1.0, 1.0), &t).unwrap(),
        );
        let hits = overlap(&l, &s, &t).unwrap().unwrap();
        assert_eq!(hits.len(), 2);
        assert!((hits[0].along_a - 4.0).abs() < 1e-12);
        assert!(hits[0].along_b.abs() < 1e-12);
        assert!((hits[1].along_b - 1.0).abs() < 1e-12);
    }
}
