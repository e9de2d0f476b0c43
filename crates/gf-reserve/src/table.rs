//! The reservation table.
//!
//! # Conventions
//!
//! - A move `from → to` decided during tick `t` takes effect at `t + 1`:
//!   the destination cell is booked at `t + 1`, as is the directed edge
//!   `(from, to)`.
//! - Confirming a move also re-books `(from, t)` so the swap check works
//!   from the other side: a later robot attempting `to → from` during the
//!   same tick sees the mover holding both its origin at `t` and its
//!   destination at `t + 1`.
//! - A robot staying in place must book its current cell at `t + 1` to
//!   defend its position.
//!
//! # Storage
//!
//! Both maps are keyed by tick first (`BTreeMap<Tick, ..>`), so purging the
//! past is a single `split_off` instead of a full scan, and nothing about
//! the table depends on hash iteration order.

use std::collections::{BTreeMap, HashMap};

use gf_core::{Cell, RobotId, Tick};

/// Cell-per-tick and edge-per-tick bookings for the whole fleet.
#[derive(Default)]
pub struct ReservationTable {
    /// tick → cell → holder.  Vertex reservations.
    cells: BTreeMap<Tick, HashMap<Cell, RobotId>>,
    /// tick → (from, to) → holder.  Directed edge reservations; the tick is
    /// the tick at which the edge is crossed (i.e. the arrival tick).
    edges: BTreeMap<Tick, HashMap<(Cell, Cell), RobotId>>,
}

impl ReservationTable {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// `true` iff no *other* robot holds `(cell, tick)`.
    pub fn can_reserve(&self, cell: Cell, tick: Tick, robot: RobotId) -> bool {
        match self.cells.get(&tick).and_then(|m| m.get(&cell)) {
            None => true,
            Some(&holder) => holder == robot,
        }
    }

    /// Is the move `from → to`, decided during `tick_from`, conflict-free?
    ///
    /// Checks the destination vertex at `tick_from + 1` and the head-on swap
    /// pattern: another robot holding both `(to, tick_from)` and
    /// `(from, tick_from + 1)` is coming the other way down the same edge.
    pub fn can_move(&self, from: Cell, to: Cell, tick_from: Tick, robot: RobotId) -> bool {
        let arrival = tick_from + 1;
        if !self.can_reserve(to, arrival, robot) {
            return false;
        }
        // Swap check via the opposing directed edge.
        if let Some(&holder) = self.edges.get(&arrival).and_then(|m| m.get(&(to, from))) {
            if holder != robot {
                return false;
            }
        }
        // Swap check via vertex bookings: opponent currently on `to` that
        // has already booked our origin for the arrival tick.
        if let (Some(&on_to), Some(&on_from)) = (
            self.cells.get(&tick_from).and_then(|m| m.get(&to)),
            self.cells.get(&arrival).and_then(|m| m.get(&from)),
        ) {
            if on_to == on_from && on_to != robot {
                return false;
            }
        }
        true
    }

    // ── Mutations ─────────────────────────────────────────────────────────

    /// Book the move `from → to` decided during `tick_from`.
    ///
    /// Call only after [`can_move`](Self::can_move) returned `true`.  Books
    /// the destination vertex and directed edge at the arrival tick, and
    /// re-books the origin at `tick_from` for the opposing swap check.
    pub fn reserve_move(&mut self, from: Cell, to: Cell, tick_from: Tick, robot: RobotId) {
        let arrival = tick_from + 1;
        self.cells.entry(arrival).or_default().insert(to, robot);
        self.edges.entry(arrival).or_default().insert((from, to), robot);
        self.cells.entry(tick_from).or_default().insert(from, robot);
    }

    /// Book `cell` at `tick` unconditionally (initial robot placement).
    pub fn reserve_cell(&mut self, cell: Cell, tick: Tick, robot: RobotId) {
        self.cells.entry(tick).or_default().insert(cell, robot);
    }

    /// Book staying at `cell` through the next tick.
    ///
    /// Returns `false` (booking nothing) if another robot already holds the
    /// cell at `tick_from + 1`.
    pub fn reserve_wait(&mut self, cell: Cell, tick_from: Tick, robot: RobotId) -> bool {
        let next = tick_from + 1;
        if !self.can_reserve(cell, next, robot) {
            return false;
        }
        self.cells.entry(next).or_default().insert(cell, robot);
        true
    }

    /// Purge all entries referring to ticks before `current`.
    pub fn release_past(&mut self, current: Tick) {
        self.cells = self.cells.split_off(&current);
        self.edges = self.edges.split_off(&current);
    }

    // ── Introspection ─────────────────────────────────────────────────────

    /// Total vertex bookings across all retained ticks.
    pub fn cell_bookings(&self) -> usize {
        self.cells.values().map(HashMap::len).sum()
    }

    /// Number of distinct ticks with at least one booking.
    pub fn tick_span(&self) -> usize {
        self.cells.len()
    }
}
