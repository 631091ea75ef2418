//! Domain adapters deriving bounded primitives from their unbounded carriers.

use crate::error::Result;
use crate::geometry::Segment;
use crate::math::Tolerance;

use super::Intersections;

/// `intersect(b, a)` from `intersect(a, b)`.
pub(super) fn swap(hits: Result<Intersections>) -> Result<Intersections> {
    hits.map(|hits| hits.swapped())
}

/// Restricts carrier-line hits to a ray's `[0, ∞)`.
///
/// Hits up to half the pen width before the start are kept and snapped to it.
pub(super) fn ray_from_line(hits: Intersections, tolerance: &Tolerance) -> Intersections {
    hits.filter_map(|mut hit| {
        if hit.along_a <= -tolerance.half() {
            return None;
        }
        hit.along_a = hit.along_a.max(0.0);
        Some(hit)
    })
}

/// Restricts carrier-ray hits to a straight segment's `[0, length]`.
pub(super) fn segment_from_ray(
    segment: &Segment,
    hits: Intersections,
    tolerance: &Tolerance,
) -> Intersections {
    let length = segment.length();
    hits.filter_map(|mut hit| {
        if hit.along_a >= length + tolerance.half() {
            return None;
        }
        hit.along_a = hit.along_a.min(length);
        Some(hit)
    })
}

/// Restricts carrier-circle hits to an arc's wedge and converts the circle
/// parameter into the arc's own arc-length offset.
pub(super) fn segment_from_circle(
    segment: &Segment,
    hits: Intersections,
    tolerance: &Tolerance,
) -> Intersections {
    let length = segment.length();
    hits.filter_map(|mut hit| {
        if !segment.wedge_contains_point(&hit.position, tolerance) {
            return None;
        }
        hit.along_a = segment.offset_at(&hit.position).clamp(0.0, length);
        Some(hit)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::intersect::Intersection;
    use crate::math::{Point2, Vector2};

    fn hits(alongs: &[f64]) -> Intersections {
        let mut out = Intersections::none();
        for &t in alongs {
            out.push(Intersection::new(t, 7.0, Point2::new(t, 0.0)));
        }
        out
    }

    #[test]
    fn ray_filter_keeps_near_start_and_clamps() {
        let t = Tolerance::new(0.1).unwrap();
        let kept = ray_from_line(hits(&[-0.04, 2.0]), &t);
        assert_eq!(kept.len(), 2);
        assert!(kept[0].along_a.abs() < f64::EPSILON);
        assert!((kept[1].along_a - 2.0).abs() < f64::EPSILON);

        assert!(ray_from_line(hits(&[-0.06]), &t).is_empty());
    }

    #[test]
    fn segment_filter_clamps_to_length() {
        let t = Tolerance::new(0.1).unwrap();
        let s = Segment::line(Point2::origin(), Point2::new(1.0, 0.0), &t).unwrap();
        let kept = segment_from_ray(&s, hits(&[0.5, 1.04]), &t);
        assert_eq!(kept.len(), 2);
        assert!((kept[1].along_a - 1.0).abs() < f64::EPSILON);
        assert!(segment_from_ray(&s, hits(&[1.06]), &t).is_empty());
    }

    #[test]
    fn swap_exchanges_parameters() {
        let swapped = swap(Ok(hits(&[0.25]))).unwrap();
        assert!((swapped[0].along_a - 7.0).abs() < f64::EPSILON);
        assert!((swapped[0].along_b - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn arc_filter_uses_wedge() {
        let t = Tolerance::default();
        let arc = Segment::arc(Point2::new(1.0, 0.0), Vector2::y(), Point2::new(0.0, 1.0), &t).unwrap();
        let mut candidates = Intersections::none();
        candidates.push(Intersection::new(0.0, 0.0, Point2::new(0.6, 0.8)));
        candidates.push(Intersection::new(0.0, 0.0, Point2::new(-0.6, -0.8)));
        let kept = segment_from_circle(&arc, candidates, &t);
        assert_eq!(kept.len(), 1);
        assert!((kept[0].along_a - 0.8_f64.atan2(0.6)).abs() < 1e-12);
    }
}
