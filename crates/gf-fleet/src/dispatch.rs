//! Assignment policy.
//!
//! The policy is a narrow seam: given one robot and the pending orders (as
//! `(order, shelf anchor)` pairs in queue order), pick an order or decline.
//! The scheduler owns everything else — candidate collection, path
//! validation, commit/rollback — so alternative strategies can be swapped in
//! without touching the tick loop.

use gf_core::{Cell, OrderId};

/// Pluggable order-selection strategy.
pub trait DispatchPolicy {
    /// Choose one of `candidates` for the robot at `robot_cell`, or `None`
    /// to leave the robot unassigned this tick.
    ///
    /// `candidates` is presented in queue (FIFO) order and is never empty.
    fn choose(&self, robot_cell: Cell, candidates: &[(OrderId, Cell)]) -> Option<OrderId>;
}

/// Greedy nearest-first: minimize Manhattan distance from the robot to the
/// shelf anchor, ties broken by lower order id.
///
/// A deliberate local heuristic — globally optimal assignment is out of
/// scope for the benchmark.
pub struct NearestFirst;

impl DispatchPolicy for NearestFirst {
    fn choose(&self, robot_cell: Cell, candidates: &[(OrderId, Cell)]) -> Option<OrderId> {
        candidates
            .iter()
            .min_by_key(|(id, anchor)| (robot_cell.manhattan(*anchor), *id))
            .map(|&(id, _)| id)
    }
}
