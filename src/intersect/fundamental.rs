use crate::geometry::{Circle, Line};
use crate::math::vector_2d::{cross_2d, unit_orthogonal};
use crate::math::Tolerance;

use super::{Intersection, Intersections};

/// Intersects two infinite lines.
///
/// Parallel lines (direction determinant within the pen width of zero) do
/// not intersect, even when they coincide.
pub(super) fn line_line(a: &Line, b: &Line, tolerance: &Tolerance) -> Intersections {
    let da = a.direction();
    let db = b.direction();
    let det = cross_2d(db, da);
    if tolerance.is_zero(det) {
        return Intersections::none();
    }
    let delta = b.point() - a.point();
    let along_a = (delta.y * db.x - delta.x * db.y) / det;
    let along_b = (delta.y * da.x - delta.x * da.y) / det;
    Intersections::one(Intersection::new(along_a, along_b, a.point_at(along_a)))
}

/// Intersects two circles.
///
/// Tangency is decided on the center distance: within the pen width of
/// `r1 + r2` or `|r1 - r2|` yields a single point on the line of centers.
/// Otherwise the two points are ordered with the one left of the
/// center-to-center direction first.
pub(super) fn circle_circle(a: &Circle, b: &Circle, tolerance: &Tolerance) -> Intersections {
    let to_b = b.center() - a.center();
    let d = to_b.norm();
    let (r1, r2) = (a.radius(), b.radius());
    let t = tolerance.thickness();

    // Concentric circles either coincide or never meet.
    if d <= t {
        return Intersections::none();
    }
    if d > r1 + r2 + t || d < (r1 - r2).abs() - t {
        return Intersections::none();
    }

    let u = to_b / d;
    let centroid_offset = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    let hit = |p| Intersection::new(a.offset_at(&p), b.offset_at(&p), p);

    if tolerance.roughly_equal(d, r1 + r2) || tolerance.roughly_equal(d, (r1 - r2).abs()) {
        let p = a.center() + u * centroid_offset.clamp(-r1, r1);
        return Intersections::one(hit(p));
    }

    let half_chord = (r1 * r1 - centroid_offset * centroid_offset).max(0.0).sqrt();
    let centroid = a.center() + u * centroid_offset;
    let across = unit_orthogonal(&u) * half_chord;
    Intersections::two(hit(centroid + across), hit(centroid - across))
}

/// Intersects an infinite line with a circle.
///
/// Hits are ordered by their parameter along the line. A chord shorter than
/// the pen width collapses to one tangent point at the foot of the
/// perpendicular from the center.
pub(super) fn line_circle(line: &Line, circle: &Circle, tolerance: &Tolerance) -> Intersections {
    let foot_t = line.offset_at(circle.center());
    let foot = line.point_at(foot_t);
    let distance = (circle.center() - foot).norm();
    let r = circle.radius();
    if distance > r + tolerance.half() {
        return Intersections::none();
    }

    let hit = |t: f64| {
        let p = line.point_at(t);
        Intersection::new(t, circle.offset_at(&p), p)
    };

    let half_chord = (r * r - distance * distance).max(0.0).sqrt();
    if half_chord <= tolerance.thickness() {
        return Intersections::one(Intersection::new(foot_t, circle.offset_at(&foot), foot));
    }
    Intersections::two(hit(foot_t - half_chord), hit(foot_t + half_chord))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point2, Vector2};

    fn tol() -> Tolerance {
        Tolerance::default()
    }

    fn circle(x: f64, y: f64, r: f64) -> Circle {
        Circle::new(Point2::new(x, y), r).unwrap()
    }

    // ── circle/circle ──

    #[test]
    fn external_tangency() {
        let hits = circle_circle(&circle(0.0, 0.0, 1.0), &circle(3.0, 0.0, 2.0), &tol());
        assert_eq!(hits.len(), 1);
        assert!((hits[0].position - Point2::new(1.0, 0.0)).norm() < 1e-12);
        assert!(hits[0].along_a.abs() < 1e-12);
    }

    #[test]
    fn internal_tangency_from_the_small_side() {
        let hits = circle_circle(&circle(1.0, 0.0, 1.0), &circle(0.0, 0.0, 2.0), &tol());
        assert_eq!(hits.len(), 1);
        assert!((hits[0].position - Point2::new(2.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn nested_and_distant_circles() {
        assert!(circle_circle(&circle(0.0, 0.0, 3.0), &circle(0.5, 0.0, 1.0), &tol()).is_empty());
        assert!(circle_circle(&circle(0.0, 0.0, 1.0), &circle(5.0, 0.0, 1.0), &tol()).is_empty());
        assert!(circle_circle(&circle(0.0, 0.0, 1.0), &circle(0.0, 0.0, 2.0), &tol()).is_empty());
    }

    #[test]
    fn crossing_points_lie_on_both_circles() {
        let a = circle(0.0, 0.0, 1.0);
        let b = circle(1.2, 0.7, 0.9);
        let hits = circle_circle(&a, &b, &tol());
        assert_eq!(hits.len(), 2);
        for hit in &hits {
            assert!(((hit.position - a.center()).norm() - 1.0).abs() < 1e-12);
            assert!(((hit.position - b.center()).norm() - 0.9).abs() < 1e-12);
            assert!((a.point_at(hit.along_a) - hit.position).norm() < 1e-12);
            assert!((b.point_at(hit.along_b) - hit.position).norm() < 1e-12);
        }
    }

    // ── line/line and line/circle ──

    #[test]
    fn nearly_parallel_lines_count_as_parallel() {
        let a = Line::new(Point2::origin(), Vector2::x()).unwrap();
        let b = Line::new(Point2::new(0.0, 1.0), Vector2::new(1.0, 1e-9)).unwrap();
        assert!(line_line(&a, &b, &tol()).is_empty());
    }

    #[test]
    fn line_misses_circle() {
        let l = Line::new(Point2::new(0.0, 2.0), Vector2::x()).unwrap();
        assert!(line_circle(&l, &circle(0.0, 0.0, 1.0), &tol()).is_empty());
    }

    #[test]
    fn line_grazing_within_half_thickness_touches() {
        let t = tol();
        let l = Line::new(Point2::new(0.0, 1.0 + 0.4 * t.thickness()), Vector2::x()).unwrap();
        let hits = line_circle(&l, &circle(0.0, 0.0, 1.0), &t);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].along_a.abs() < 1e-12);
    }
}
