use tracing::warn;

use crate::error::Result;
use crate::geometry::{Path, Ray, Segment};
use crate::intersect::intersect;
use crate::math::{distance_point_to_line, Point2, Tolerance, Vector2};

use super::chain::{ChainStore, Side};
use super::Location;

/// Probe directions for ray casting, chosen away from the axes and from
/// each other so that axis-aligned input rarely grazes a vertex.
const PROBE_ANGLES: [f64; 4] = [0.371_8, 1.912_7, 4.023_1, 5.440_2];

/// Classifies a point against a closed path.
///
/// Points within the pen width of the boundary are `OnEdge`. Others are
/// located by ray-crossing parity; a ray that grazes a vertex or touches an
/// arc tangentially is discarded and the next probe direction is tried.
///
/// # Errors
///
/// Propagates intersection failures.
pub fn locate(point: &Point2, path: &Path, tolerance: &Tolerance) -> Result<Location> {
    if path
        .segments()
        .iter()
        .any(|s| s.distance_to(point) <= tolerance.thickness())
    {
        return Ok(Location::OnEdge);
    }

    for angle in PROBE_ANGLES {
        let ray = Ray::from_unit(*point, Vector2::new(angle.cos(), angle.sin()));
        if let RayCast::Clear(location) = ray_cast(&ray, path, tolerance)? {
            return Ok(location);
        }
    }

    // Every probe was degenerate; practically unreachable.
    warn!(x = point.x, y = point.y, "all probe rays degenerate, assuming outside");
    Ok(Location::Outside)
}

enum RayCast {
    Clear(Location),
    Degenerate,
}

fn ray_cast(ray: &Ray, path: &Path, tolerance: &Tolerance) -> Result<RayCast> {
    let mut crossings = 0u32;
    for segment in path.segments() {
        let hits = intersect(*ray, *segment, tolerance)?;
        if hits.is_empty() {
            continue;
        }
        if grazes(ray, segment, tolerance) {
            return Ok(RayCast::Degenerate);
        }
        for hit in &hits {
            if hit.along_b <= tolerance.thickness()
                || hit.along_b >= segment.length() - tolerance.thickness()
            {
                return Ok(RayCast::Degenerate);
            }
            crossings += 1;
        }
    }
    Ok(RayCast::Clear(if crossings % 2 == 1 {
        Location::Inside
    } else {
        Location::Outside
    }))
}

/// True if the ray's carrier line is tangent to the arc's circle.
fn grazes(ray: &Ray, segment: &Segment, tolerance: &Tolerance) -> bool {
    match (segment.radial_center(), segment.radius()) {
        (Some(center), Some(radius)) => {
            let d = distance_point_to_line(&center, ray.start(), ray.direction());
            tolerance.roughly_equal(d, radius)
        }
        _ => false,
    }
}

/// Location of a chain edge relative to the other operand, tested at the
/// edge's midpoint, plus whether a shared boundary runs the same way.
fn classify_edge(edge: &Segment, other: &Path, tolerance: &Tolerance) -> Result<(Location, bool)> {
    let half = edge.length() / 2.0;
    let midpoint = edge.point_at(half);
    let location = locate(&midpoint, other, tolerance)?;
    if location != Location::OnEdge {
        return Ok((location, false));
    }

    let along = edge.direction_of(half);
    let same_direction = other
        .segments()
        .iter()
        .filter(|s| s.distance_to(&midpoint) <= tolerance.thickness())
        .any(|s| along.dot(&s.direction_of(s.closest_offset(&midpoint))) > 0.0);
    Ok((Location::OnEdge, same_direction))
}

/// Classifies every edge of one chain against the other operand.
pub(crate) fn classify_chain(
    store: &mut ChainStore,
    side: Side,
    other: &Path,
    tolerance: &Tolerance,
) -> Result<()> {
    for id in store.ring(side)? {
        let edge = store.vertex(id)?.edge;
        let (location, same_direction) = classify_edge(&edge, other, tolerance)?;
        let vertex = store.vertex_mut(id)?;
        vertex.location = location;
        vertex.same_direction = same_direction;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tol() -> Tolerance {
        Tolerance::default()
    }

    fn square() -> Path {
        Path::from_points(
            &[
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(0.0, 1.0),
            ],
            &tol(),
        )
        .unwrap()
    }

    fn disc() -> Path {
        let t = tol();
        let upper = Segment::arc(Point2::new(1.0, 0.0), Vector2::y(), Point2::new(-1.0, 0.0), &t).unwrap();
        let lower = Segment::arc(Point2::new(-1.0, 0.0), -Vector2::y(), Point2::new(1.0, 0.0), &t).unwrap();
        Path::new(vec![upper, lower], &t).unwrap()
    }

    #[test]
    fn square_locations() {
        let sq = square();
        assert_eq!(locate(&Point2::new(0.5, 0.5), &sq, &tol()).unwrap(), Location::Inside);
        assert_eq!(locate(&Point2::new(1.5, 0.5), &sq, &tol()).unwrap(), Location::Outside);
        assert_eq!(locate(&Point2::new(1.0, 0.5), &sq, &tol()).unwrap(), Location::OnEdge);
        assert_eq!(locate(&Point2::new(-0.5, -0.5), &sq, &tol()).unwrap(), Location::Outside);
    }

    #[test]
    fn point_level_with_a_vertex_retries() {
        // The first probe from here passes exactly through the corner (1, 1).
        let angle = PROBE_ANGLES[0];
        let start = Point2::new(1.0, 1.0) - Vector2::new(angle.cos(), angle.sin()) * 0.5;
        assert_eq!(locate(&start, &square(), &tol()).unwrap(), Location::Inside);
    }

    #[test]
    fn disc_locations() {
        let d = disc();
        assert_eq!(locate(&Point2::new(0.2, -0.3), &d, &tol()).unwrap(), Location::Inside);
        assert_eq!(locate(&Point2::new(0.9, 0.9), &d, &tol()).unwrap(), Location::Outside);
        let on = Point2::new(0.6, -0.8);
        assert_eq!(locate(&on, &d, &tol()).unwrap(), Location::OnEdge);
    }

    #[test]
    fn shared_edge_direction() {
        let t = tol();
        let sq = square();
        let along = Segment::line(Point2::new(0.2, 0.0), Point2::new(0.8, 0.0), &t).unwrap();
        assert_eq!(classify_edge(&along, &sq, &t).unwrap(), (Location::OnEdge, true));
        let against = along.reversed();
        assert_eq!(classify_edge(&against, &sq, &t).unwrap(), (Location::OnEdge, false));
    }
}
