use tracing::trace;

use crate::error::Result;

use super::chain::{ChainStore, Side, VertexId};
use super::{Location, Mode, Role};

/// Pairs the ends of every run of shared boundary on one chain and resolves
/// the run's `OnEdge` edges to `Inside` or `Outside`.
///
/// A run is a maximal stretch of consecutive `OnEdge` edges whose shared
/// boundary runs the same way. Its first vertex becomes the first partner of
/// the vertex where it ends. Each run is resolved so that exactly one copy of
/// a shared boundary survives traversal when it bounds the result.
pub(crate) fn resolve_shared_runs(store: &mut ChainStore, side: Side, mode: Mode) -> Result<()> {
    let ring = store.ring(side)?;
    let n = ring.len();
    let mut on = Vec::with_capacity(n);
    for &id in &ring {
        let v = store.vertex(id)?;
        on.push((v.location == Location::OnEdge).then_some(v.same_direction));
    }

    let mut runs: Vec<(VertexId, VertexId)> = Vec::new();
    for i in 0..n {
        let Some(flag) = on[i] else { continue };
        if on[(i + n - 1) % n] == Some(flag) && on.iter().any(|o| *o != Some(flag)) {
            continue;
        }
        let mut j = i;
        while on[(j + 1) % n] == Some(flag) && (j + 1) % n != i {
            j += 1;
        }
        runs.push((ring[i], ring[(j + 1) % n]));
        if on.iter().all(|o| *o == Some(flag)) {
            break;
        }
    }

    // Ends first, so a vertex that closes one run and opens the next keeps
    // the opening pairing.
    for &(start, end) in &runs {
        if end != start {
            let vertex = store.vertex_mut(end)?;
            vertex.partner = Some(start);
            vertex.is_first_partner = false;
        }
    }
    for &(start, end) in &runs {
        let vertex = store.vertex_mut(start)?;
        vertex.partner = Some(end);
        vertex.is_first_partner = true;
    }

    for id in ring {
        let vertex = store.vertex(id)?;
        if !vertex.is_first_partner {
            continue;
        }
        let Some(end) = vertex.partner else { continue };
        let keep = mode.keeps_shared(side, vertex.same_direction);
        let location = if keep == mode.keeps_inside(side) {
            Location::Inside
        } else {
            Location::Outside
        };
        trace!(?side, ?location, "resolved shared boundary run");

        let mut current = id;
        loop {
            let vertex = store.vertex_mut(current)?;
            vertex.location = location;
            current = vertex.next;
            if current == end {
                break;
            }
        }
    }
    Ok(())
}

/// Assigns entry/exit roles to the intersection vertices of one chain from
/// the locations of the edges arriving at and leaving each vertex, then
/// applies the mode's role reversal.
pub(crate) fn assign_roles(store: &mut ChainStore, side: Side, mode: Mode) -> Result<()> {
    let reverse = mode.reverses(side);
    for id in store.ring(side)? {
        let vertex = store.vertex(id)?;
        if !vertex.is_intersection() {
            continue;
        }
        let leaving = vertex.location;
        let arriving = store.vertex(vertex.previous)?.location;
        let role = Role::from_transition(arriving, leaving);
        store.vertex_mut(id)?.role = if reverse { role.reversed() } else { role };
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clip::chain::splice_intersections;
    use crate::clip::classify::classify_chain;
    use crate::geometry::Path;
    use crate::math::{Point2, Tolerance};

    fn tol() -> Tolerance {
        Tolerance::default()
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Path {
        Path::from_points(
            &[
                Point2::new(x0, y0),
                Point2::new(x1, y0),
                Point2::new(x1, y1),
                Point2::new(x0, y1),
            ],
            &tol(),
        )
        .unwrap()
    }

    fn prepared(subject: &Path, clip: &Path, mode: Mode) -> ChainStore {
        let t = tol();
        let mut store = ChainStore::new();
        store.add_chain(Side::Subject, subject);
        store.add_chain(Side::Clip, clip);
        splice_intersections(&mut store, subject, clip, &t).unwrap();
        classify_chain(&mut store, Side::Subject, clip, &t).unwrap();
        classify_chain(&mut store, Side::Clip, subject, &t).unwrap();
        for side in Side::BOTH {
            resolve_shared_runs(&mut store, side, mode).unwrap();
            assign_roles(&mut store, side, mode).unwrap();
        }
        store
    }

    fn roles(store: &ChainStore, side: Side) -> Vec<Role> {
        store
            .ring(side)
            .unwrap()
            .into_iter()
            .map(|id| store.vertex(id).unwrap().role)
            .collect()
    }

    // ── crossing boundaries ──

    #[test]
    fn crossing_squares_intersection_roles() {
        let store = prepared(&rect(0.0, 0.0, 2.0, 2.0), &rect(1.0, 1.0, 3.0, 3.0), Mode::Intersection);
        // Subject: (0,0) (2,0) (2,1)* (2,2) (1,2)* (0,2)
        assert_eq!(
            roles(&store, Side::Subject),
            vec![Role::None, Role::None, Role::Entry, Role::None, Role::Exit, Role::None]
        );
    }

    #[test]
    fn union_reverses_both_chains() {
        let store = prepared(&rect(0.0, 0.0, 2.0, 2.0), &rect(1.0, 1.0, 3.0, 3.0), Mode::Union);
        assert_eq!(
            roles(&store, Side::Subject),
            vec![Role::None, Role::None, Role::Exit, Role::None, Role::Entry, Role::None]
        );
    }

    // ── shared boundaries ──

    #[test]
    fn shared_runs_pair_their_ends() {
        let store = prepared(&rect(0.0, 0.0, 2.0, 1.0), &rect(1.0, 0.0, 3.0, 1.0), Mode::Intersection);
        // Subject: (0,0) (1,0)* (2,0)* (2,1)* (1,1)* (0,1)
        let ring = store.ring(Side::Subject).unwrap();
        let start = store.vertex(ring[1]).unwrap();
        assert!(start.is_first_partner);
        assert_eq!(start.partner, Some(ring[2]));
        let end = store.vertex(ring[2]).unwrap();
        assert!(!end.is_first_partner);
        assert_eq!(end.partner, Some(ring[1]));
        assert!(store.vertex(ring[3]).unwrap().is_first_partner);
    }

    #[test]
    fn same_direction_boundary_kept_once_for_intersection() {
        let store = prepared(&rect(0.0, 0.0, 2.0, 1.0), &rect(1.0, 0.0, 3.0, 1.0), Mode::Intersection);
        let subject = store.ring(Side::Subject).unwrap();
        assert_eq!(store.vertex(subject[1]).unwrap().location, Location::Inside);
        let clip = store.ring(Side::Clip).unwrap();
        // Clip: (1,0)* (2,0)* (3,0) (3,1) (2,1)* (1,1)*
        assert_eq!(store.vertex(clip[0]).unwrap().location, Location::Outside);
        assert_eq!(
            roles(&store, Side::Subject),
            vec![Role::None, Role::Entry, Role::ExitEntry, Role::ExitEntry, Role::Exit, Role::None]
        );
    }

    #[test]
    fn opposite_direction_boundary_in_difference() {
        // Adjacent squares share x = 1, running up on the subject and down on the clip.
        let store = prepared(&rect(0.0, 0.0, 1.0, 1.0), &rect(1.0, 0.0, 2.0, 1.0), Mode::Difference);
        let subject = store.ring(Side::Subject).unwrap();
        // The subject keeps the shared edge: outside is kept on a reversed chain.
        assert_eq!(store.vertex(subject[1]).unwrap().location, Location::Outside);
        let clip = store.ring(Side::Clip).unwrap();
        assert_eq!(store.vertex(clip[3]).unwrap().location, Location::Outside);
    }
}
