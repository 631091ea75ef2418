use tracing::{trace, warn};

use crate::error::{ClipError, Result};
use crate::geometry::{Path, Segment};
use crate::math::Tolerance;

use super::chain::{ChainStore, Side, VertexId};
use super::{Mode, Role};

/// Walks both chains and collects the closed result paths.
///
/// Every unvisited vertex that opens a kept stretch starts a new loop. Chains
/// with no entry or exit at all are emitted whole when their edges are kept.
pub(crate) fn traverse(store: &mut ChainStore, mode: Mode, tolerance: &Tolerance) -> Result<Vec<Path>> {
    let mut paths = Vec::new();
    for side in Side::BOTH {
        let backward = mode.walks_backward(side);
        for id in store.ring(side)? {
            let vertex = store.vertex(id)?;
            if vertex.visited || !vertex.role.opens(backward) {
                continue;
            }
            let segments = walk(store, id, mode)?;
            if let Some(path) = Path::weld(segments, tolerance)? {
                paths.push(path);
            }
        }
    }
    for side in Side::BOTH {
        if let Some(path) = whole_chain(store, side, mode, tolerance)? {
            paths.push(path);
        }
    }
    Ok(paths)
}

/// Follows kept edges from `start`, switching chains at closing vertices,
/// until the loop returns to `start`.
fn walk(store: &mut ChainStore, start: VertexId, mode: Mode) -> Result<Vec<Segment>> {
    let start_neighbor = store.vertex(start)?.neighbor;
    let closes_loop = |id: VertexId| id == start || Some(id) == start_neighbor;
    let limit = store.len();

    let mut segments = Vec::new();
    let mut current = start;
    loop {
        let vertex = store.vertex_mut(current)?;
        vertex.visited = true;
        let (edge, next, previous, side) = (vertex.edge, vertex.next, vertex.previous, vertex.side);
        if mode.walks_backward(side) {
            segments.push(store.vertex(previous)?.edge.reversed());
            current = previous;
        } else {
            segments.push(edge);
            current = next;
        }

        if segments.len() > limit {
            warn!(steps = segments.len(), "chain walk exceeded its step bound");
            return Err(ClipError::TraversalFailed(format!(
                "walk did not close after {} edges",
                segments.len()
            ))
            .into());
        }
        if closes_loop(current) {
            break;
        }

        let vertex = store.vertex_mut(current)?;
        if vertex.role.closes(mode.walks_backward(vertex.side)) {
            let Some(neighbor) = vertex.neighbor else {
                return Err(ClipError::TraversalFailed(
                    "closing vertex has no neighbor on the other chain".into(),
                )
                .into());
            };
            vertex.visited = true;
            trace!(x = vertex.point.x, y = vertex.point.y, "switching chains");
            current = neighbor;
            if closes_loop(current) {
                break;
            }
        }
    }
    Ok(segments)
}

/// Emits a chain that never crosses the other boundary, if it is kept.
fn whole_chain(
    store: &ChainStore,
    side: Side,
    mode: Mode,
    tolerance: &Tolerance,
) -> Result<Option<Path>> {
    let ring = store.ring(side)?;
    let Some(&head) = ring.first() else {
        return Ok(None);
    };
    for &id in &ring {
        if matches!(store.vertex(id)?.role, Role::Entry | Role::Exit) {
            return Ok(None);
        }
    }
    if !mode.keeps(side, store.vertex(head)?.location) {
        return Ok(None);
    }

    let mut segments = Vec::with_capacity(ring.len());
    for &id in &ring {
        segments.push(store.vertex(id)?.edge);
    }
    if mode.walks_backward(side) {
        segments = segments.iter().rev().map(Segment::reversed).collect();
    }
    Path::weld(segments, tolerance)
}
