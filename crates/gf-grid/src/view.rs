//! Per-query traversability rules layered over the static grid.

use std::collections::HashSet;

use gf_core::Cell;

use crate::grid::{CellKind, Grid};

/// A read-only traversability snapshot assembled by the scheduler for one
/// planning query.
///
/// The static grid never changes; what a given robot may traverse does:
///
/// - `target` is the requester's own shelf anchor (pickup or return goal).
///   That one shelf cell is traversable for this query only.
/// - `lifted` holds the anchors of shelves currently away on robots' backs.
///   An empty anchor is open floor until its shelf comes home.
/// - `avoid` holds cells the scheduler wants routed around, used when a
///   blocked robot replans for a detour.  The planner treats them as
///   obstacles for this query.
///
/// The robot's own start cell is not checked against the view — the robot is
/// physically there, even when standing on a shelf anchor.
#[derive(Clone, Copy)]
pub struct TraversalView<'a> {
    grid: &'a Grid,
    target: Option<Cell>,
    lifted: Option<&'a HashSet<Cell>>,
    avoid: Option<&'a HashSet<Cell>>,
}

impl<'a> TraversalView<'a> {
    /// A view with no grants: only statically open cells are traversable.
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid, target: None, lifted: None, avoid: None }
    }

    /// Grant traversal of one shelf anchor (the requester's own target).
    pub fn with_target(mut self, target: Cell) -> Self {
        self.target = Some(target);
        self
    }

    /// Supply the set of shelf anchors whose shelves are currently lifted.
    pub fn with_lifted(mut self, lifted: &'a HashSet<Cell>) -> Self {
        self.lifted = Some(lifted);
        self
    }

    /// Supply cells to route around for this query.
    pub fn with_avoid(mut self, avoid: &'a HashSet<Cell>) -> Self {
        self.avoid = Some(avoid);
        self
    }

    #[inline]
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// May the requesting robot stand on `cell`?
    pub fn traversable(&self, cell: Cell) -> bool {
        if !self.grid.in_bounds(cell) {
            return false;
        }
        if self.avoid.is_some_and(|a| a.contains(&cell)) {
            return false;
        }
        match self.grid.kind(cell) {
            kind if kind.is_open() => true,
            CellKind::Shelf => {
                self.target == Some(cell) || self.lifted.is_some_and(|l| l.contains(&cell))
            }
            _ => false,
        }
    }
}
