use slotmap::SlotMap;
use tracing::{debug, trace};

use crate::error::{ClipError, Result};
use crate::geometry::{Path, Segment};
use crate::intersect::intersect;
use crate::math::{Point2, Tolerance};

use super::{Location, Role};

slotmap::new_key_type! {
    /// Identifier of a vertex in a clipping chain.
    pub(crate) struct VertexId;
}

/// Which operand a chain was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Subject,
    Clip,
}

impl Side {
    pub(crate) const BOTH: [Side; 2] = [Side::Subject, Side::Clip];

    #[must_use]
    pub(crate) fn other(self) -> Self {
        match self {
            Self::Subject => Self::Clip,
            Self::Clip => Self::Subject,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Subject => 0,
            Self::Clip => 1,
        }
    }
}

/// One vertex of a chain together with the edge leaving it.
#[derive(Debug, Clone)]
pub(crate) struct ClipperVertex {
    pub point: Point2,
    /// Edge from this vertex to `next`.
    pub edge: Segment,
    pub next: VertexId,
    pub previous: VertexId,
    pub side: Side,
    /// Location of `edge` relative to the other operand.
    pub location: Location,
    /// For `OnEdge` edges: whether the other boundary runs the same way.
    pub same_direction: bool,
    pub role: Role,
    pub visited: bool,
    /// The vertex at the same point on the other chain.
    pub neighbor: Option<VertexId>,
    /// The vertex at the other end of a run of shared boundary.
    pub partner: Option<VertexId>,
    /// Set on the vertex where a shared-boundary run starts.
    pub is_first_partner: bool,
}

impl ClipperVertex {
    fn new(edge: Segment, side: Side) -> Self {
        Self {
            point: *edge.start(),
            edge,
            next: VertexId::default(),
            previous: VertexId::default(),
            side,
            location: Location::Outside,
            same_direction: false,
            role: Role::None,
            visited: false,
            neighbor: None,
            partner: None,
            is_first_partner: false,
        }
    }

    /// True for vertices where both chains meet.
    pub(crate) fn is_intersection(&self) -> bool {
        self.neighbor.is_some()
    }
}

/// Per-call arena owning both circular vertex chains.
#[derive(Debug, Default)]
pub(crate) struct ChainStore {
    vertices: SlotMap<VertexId, ClipperVertex>,
    heads: [Option<VertexId>; 2],
}

impl ChainStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Builds the circular chain for one operand, one vertex per segment.
    pub(crate) fn add_chain(&mut self, side: Side, path: &Path) {
        let ids: Vec<VertexId> = path
            .segments()
            .iter()
            .map(|segment| self.vertices.insert(ClipperVertex::new(*segment, side)))
            .collect();
        let n = ids.len();
        for (i, &id) in ids.iter().enumerate() {
            let vertex = &mut self.vertices[id];
            vertex.next = ids[(i + 1) % n];
            vertex.previous = ids[(i + n - 1) % n];
        }
        self.heads[side.index()] = ids.first().copied();
    }

    pub(crate) fn len(&self) -> usize {
        self.vertices.len()
    }

    /// # Errors
    ///
    /// Returns `ClipError::VertexNotFound` for a stale id.
    pub(crate) fn vertex(&self, id: VertexId) -> Result<&ClipperVertex> {
        self.vertices
            .get(id)
            .ok_or_else(|| ClipError::VertexNotFound.into())
    }

    /// # Errors
    ///
    /// Returns `ClipError::VertexNotFound` for a stale id.
    pub(crate) fn vertex_mut(&mut self, id: VertexId) -> Result<&mut ClipperVertex> {
        self.vertices
            .get_mut(id)
            .ok_or_else(|| ClipError::VertexNotFound.into())
    }

    /// Vertex ids of one chain in forward order, starting at its head.
    ///
    /// # Errors
    ///
    /// Returns `ClipError::TraversalFailed` if the links do not close up.
    pub(crate) fn ring(&self, side: Side) -> Result<Vec<VertexId>> {
        let Some(head) = self.heads[side.index()] else {
            return Ok(Vec::new());
        };
        let mut ids = vec![head];
        let mut current = self.vertex(head)?.next;
        while current != head {
            if ids.len() > self.vertices.len() {
                return Err(ClipError::TraversalFailed(format!("{side:?} chain does not close")).into());
            }
            ids.push(current);
            current = self.vertex(current)?.next;
        }
        Ok(ids)
    }

    /// Splits the edge leaving `id` at `point`, inserting a new vertex after it.
    ///
    /// # Errors
    ///
    /// Returns an error if `point` is too close to either end of the edge.
    pub(crate) fn split(&mut self, id: VertexId, point: Point2, tolerance: &Tolerance) -> Result<VertexId> {
        let vertex = self.vertex(id)?;
        let [head, tail] = vertex.edge.subdivide(&point, tolerance)?;
        let (side, next) = (vertex.side, vertex.next);

        let mut inserted = ClipperVertex::new(tail, side);
        inserted.point = point;
        inserted.previous = id;
        inserted.next = next;
        let new_id = self.vertices.insert(inserted);

        let vertex = self.vertex_mut(id)?;
        vertex.edge = head;
        vertex.next = new_id;
        self.vertex_mut(next)?.previous = new_id;
        Ok(new_id)
    }

    /// Marks two vertices at the same point on opposite chains as neighbors.
    pub(crate) fn link_neighbors(&mut self, a: VertexId, b: VertexId) -> Result<()> {
        self.vertex_mut(a)?.neighbor = Some(b);
        self.vertex_mut(b)?.neighbor = Some(a);
        Ok(())
    }
}

/// A boundary intersection attributed to one edge of each operand.
struct Hit {
    edge: [usize; 2],
    along: [f64; 2],
    cluster: usize,
}

/// Index of the cluster within the pen width of `point`, creating one if needed.
fn cluster_of(clusters: &mut Vec<Point2>, point: Point2, tolerance: &Tolerance) -> usize {
    if let Some(k) = clusters
        .iter()
        .position(|c| tolerance.points_roughly_equal(c, &point))
    {
        return k;
    }
    clusters.push(point);
    clusters.len() - 1
}

/// Finds every intersection between the two operands and splices it into
/// both chains as a pair of neighbor vertices.
///
/// Must run on freshly built chains, whose vertices still correspond one to
/// one with the operands' segments. Returns the number of distinct
/// intersection points.
///
/// # Errors
///
/// Propagates unsupported intersections and degenerate subdivisions.
pub(crate) fn splice_intersections(
    store: &mut ChainStore,
    subject: &Path,
    clip: &Path,
    tolerance: &Tolerance,
) -> Result<usize> {
    let originals = [store.ring(Side::Subject)?, store.ring(Side::Clip)?];

    let mut clusters = Vec::new();
    let mut hits = Vec::new();
    for (i, s) in subject.segments().iter().enumerate() {
        for (j, c) in clip.segments().iter().enumerate() {
            for hit in intersect(*s, *c, tolerance)? {
                hits.push(Hit {
                    edge: [i, j],
                    along: [hit.along_a, hit.along_b],
                    cluster: cluster_of(&mut clusters, hit.position, tolerance),
                });
            }
        }
    }
    debug!(hits = hits.len(), points = clusters.len(), "found boundary intersections");

    let mut placed: [Vec<Option<VertexId>>; 2] = [vec![None; clusters.len()], vec![None; clusters.len()]];
    for side in Side::BOTH {
        let s = side.index();
        let segments = match side {
            Side::Subject => subject.segments(),
            Side::Clip => clip.segments(),
        };
        let n = segments.len();

        // Stops per edge; hits at an edge's end belong to the next edge's start.
        let mut stops: Vec<Vec<(f64, usize)>> = vec![Vec::new(); n];
        for hit in &hits {
            let (mut edge, mut along) = (hit.edge[s], hit.along[s]);
            if along >= segments[edge].length() - tolerance.thickness() {
                edge = (edge + 1) % n;
                along = 0.0;
            }
            stops[edge].push((along.max(0.0), hit.cluster));
        }

        for (edge, mut edge_stops) in stops.into_iter().enumerate() {
            edge_stops.sort_by(|a, b| a.0.total_cmp(&b.0));
            let mut current = originals[s][edge];
            let mut current_along = 0.0;
            for (along, cluster) in edge_stops {
                if placed[s][cluster].is_some() {
                    continue;
                }
                if along > current_along + tolerance.thickness() {
                    current = store.split(current, clusters[cluster], tolerance)?;
                    current_along = along;
                    trace!(?side, edge, along, "split edge");
                }
                placed[s][cluster] = Some(current);
            }
        }
    }

    for (subject_vertex, clip_vertex) in placed[0].iter().zip(&placed[1]) {
        if let (Some(a), Some(b)) = (subject_vertex, clip_vertex) {
            store.link_neighbors(*a, *b)?;
        }
    }
    Ok(clusters.len())
}
