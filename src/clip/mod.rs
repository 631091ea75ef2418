//! Boolean operations on closed paths.
//!
//! Both operands become circular vertex chains in a per-call arena. Every
//! boundary intersection is spliced into both chains as a pair of neighbor
//! vertices, edges are classified against the other operand, and entry/exit
//! roles mark where a kept stretch of boundary begins and ends. Reversing
//! the roles of one or both chains lets a single traversal produce all four
//! operations.

mod chain;
mod classify;
mod roles;
mod traverse;

pub use classify::locate;

use tracing::debug;

use crate::error::Result;
use crate::geometry::Path;
use crate::math::Tolerance;

use chain::{ChainStore, Side};

/// The boolean operation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Area covered by both operands.
    Intersection,
    /// Area covered by either operand.
    Union,
    /// Subject minus clip.
    Difference,
    /// Clip minus subject.
    Not,
}

impl Mode {
    /// Whether the roles of a chain are reversed, i.e. it keeps its edges
    /// outside the other operand.
    ///
    /// | Mode | subject | clip |
    /// |------|---------|------|
    /// | Intersection | no | no |
    /// | Union | yes | yes |
    /// | Difference | yes | no |
    /// | Not | no | yes |
    pub(crate) fn reverses(self, side: Side) -> bool {
        match (self, side) {
            (Mode::Intersection, _) | (Mode::Difference, Side::Clip) | (Mode::Not, Side::Subject) => {
                false
            }
            (Mode::Union, _) | (Mode::Difference, Side::Subject) | (Mode::Not, Side::Clip) => true,
        }
    }

    pub(crate) fn keeps_inside(self, side: Side) -> bool {
        !self.reverses(side)
    }

    /// Whether edges at `location` on this side's chain end up in the result.
    pub(crate) fn keeps(self, side: Side, location: Location) -> bool {
        (location == Location::Inside) == self.keeps_inside(side)
    }

    /// The subtracted operand is walked against its own winding so the
    /// result keeps a counter-clockwise outer boundary.
    pub(crate) fn walks_backward(self, side: Side) -> bool {
        !self.reverses(side) && self.reverses(side.other())
    }

    /// Whether this side's copy of a shared boundary is kept.
    ///
    /// Boundaries running the same way bound both operands on the same side,
    /// so they survive an intersection or a union once, from the subject.
    /// Opposite boundaries separate the operands and survive only in the
    /// difference, from the operand being kept.
    pub(crate) fn keeps_shared(self, side: Side, same_direction: bool) -> bool {
        matches!(
            (self, side, same_direction),
            (Mode::Intersection | Mode::Union, Side::Subject, true)
                | (Mode::Difference, Side::Subject, false)
                | (Mode::Not, Side::Clip, false)
        )
    }
}

/// Location of an edge relative to the other operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Inside,
    Outside,
    /// On the other operand's boundary, within the pen width.
    OnEdge,
}

/// What happens at an intersection vertex when walking a chain forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Not an intersection.
    None,
    /// Crosses from outside to inside.
    Entry,
    /// Crosses from inside to outside.
    Exit,
    /// Touches from outside and stays outside.
    EntryExit,
    /// Touches from inside and stays inside.
    ExitEntry,
}

impl Role {
    fn from_transition(arriving: Location, leaving: Location) -> Self {
        match (arriving, leaving) {
            (Location::Inside, Location::Inside) => Role::ExitEntry,
            (Location::Inside, _) => Role::Exit,
            (_, Location::Inside) => Role::Entry,
            _ => Role::EntryExit,
        }
    }

    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Role::None => Role::None,
            Role::Entry => Role::Exit,
            Role::Exit => Role::Entry,
            Role::EntryExit => Role::ExitEntry,
            Role::ExitEntry => Role::EntryExit,
        }
    }

    /// Starts a kept stretch in the given walking direction.
    fn opens(self, backward: bool) -> bool {
        self == if backward { Role::Exit } else { Role::Entry }
    }

    /// Ends a kept stretch in the given walking direction.
    fn closes(self, backward: bool) -> bool {
        self == if backward { Role::Entry } else { Role::Exit }
    }
}

/// Computes a boolean combination of two closed paths.
pub struct Clipper {
    mode: Mode,
    tolerance: Tolerance,
}

impl Clipper {
    /// Creates a clipper for `mode` with the default tolerance.
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            tolerance: Tolerance::default(),
        }
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Executes the operation.
    ///
    /// Both operands are first brought to counter-clockwise winding. The
    /// result is zero or more closed paths; outer boundaries wind
    /// counter-clockwise and holes clockwise.
    ///
    /// # Errors
    ///
    /// Fails as a whole if any boundary intersection is unsupported, an edge
    /// cannot be split, or the traversal does not close.
    pub fn execute(&self, subject: &Path, clip: &Path) -> Result<Vec<Path>> {
        let tolerance = &self.tolerance;
        let subject = counter_clockwise(subject);
        let clip = counter_clockwise(clip);
        debug!(
            mode = ?self.mode,
            subject_edges = subject.segments().len(),
            clip_edges = clip.segments().len(),
            "clipping paths"
        );

        let mut store = ChainStore::new();
        store.add_chain(Side::Subject, &subject);
        store.add_chain(Side::Clip, &clip);
        chain::splice_intersections(&mut store, &subject, &clip, tolerance)?;
        classify::classify_chain(&mut store, Side::Subject, &clip, tolerance)?;
        classify::classify_chain(&mut store, Side::Clip, &subject, tolerance)?;

        if all_on_edge(&store, Side::Subject)? {
            debug!("subject lies on the clip boundary");
            return Ok(match self.mode {
                Mode::Intersection | Mode::Union => vec![subject],
                Mode::Difference | Mode::Not => Vec::new(),
            });
        }

        for side in Side::BOTH {
            roles::resolve_shared_runs(&mut store, side, self.mode)?;
            roles::assign_roles(&mut store, side, self.mode)?;
        }
        let paths = traverse::traverse(&mut store, self.mode, tolerance)?;
        debug!(paths = paths.len(), "clipping finished");
        Ok(paths)
    }
}

/// Computes `mode` of `subject` and `clip`; see [`Clipper::execute`].
///
/// # Errors
///
/// See [`Clipper::execute`].
pub fn clip(mode: Mode, subject: &Path, clip: &Path, tolerance: &Tolerance) -> Result<Vec<Path>> {
    Clipper::new(mode)
        .with_tolerance(*tolerance)
        .execute(subject, clip)
}

fn counter_clockwise(path: &Path) -> Path {
    if path.is_clockwise() {
        path.reversed()
    } else {
        path.clone()
    }
}

fn all_on_edge(store: &ChainStore, side: Side) -> Result<bool> {
    for id in store.ring(side)? {
        if store.vertex(id)?.location != Location::OnEdge {
            return Ok(false);
        }
    }
    Ok(true)
}
