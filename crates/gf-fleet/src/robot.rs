//! Per-robot state and the fleet container.

use gf_core::{Cell, OrderId, RobotId, RobotStats};
use gf_grid::Path;

use crate::{FleetError, FleetResult};

// ── Phase ────────────────────────────────────────────────────────────────────

/// A robot's current leg in the pickup / deliver / return cycle.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Phase {
    /// Parked, no order.  Waiting for dispatch.
    #[default]
    Idle,
    /// Heading to the assigned shelf anchor.
    ToShelf,
    /// Carrying the shelf to the station dock.
    ToStation,
    /// Bringing the shelf back to its anchor.
    ToReturn,
    /// Cycle complete; walking home to the spawn cell, dispatchable en route.
    DoneCycle,
}

impl Phase {
    /// `true` for every phase except `Idle`.
    #[inline]
    pub fn is_active(self) -> bool {
        self != Phase::Idle
    }
}

// ── Robot ────────────────────────────────────────────────────────────────────

/// One robot's complete mutable state.
///
/// Invariants maintained by the mutators below:
/// - `phase == Idle` ⇔ `order.is_none()`
/// - `carrying` ⇔ `phase == ToStation`
/// - when a path is present, `path.cells[path_idx] == cell`
pub struct Robot {
    pub id: RobotId,
    /// Current grid cell.
    pub cell: Cell,
    /// The spawn cell this robot started at and walks back to when done.
    pub home: Cell,
    pub phase: Phase,
    pub order: Option<OrderId>,
    /// Anchor of the assigned shelf while an order is held.
    pub shelf_anchor: Option<Cell>,
    /// Dock of the assigned station while an order is held.
    pub station_dock: Option<Cell>,
    /// Current route; `path_idx` points at the cell the robot occupies.
    pub path: Option<Path>,
    pub path_idx: usize,
    pub carrying: bool,
    /// One-tick pickup dwell pending: the robot holds position next tick.
    pub dwell: bool,
    /// Consecutive blocked move attempts.  Feeds the scheduler's detour and
    /// sidestep escalation; reset by any successful move or fresh assignment.
    pub blocked_streak: u32,
    pub stats: RobotStats,
}

impl Robot {
    pub fn new(id: RobotId, spawn: Cell) -> Self {
        Self {
            id,
            cell: spawn,
            home: spawn,
            phase: Phase::Idle,
            order: None,
            shelf_anchor: None,
            station_dock: None,
            path: None,
            path_idx: 0,
            carrying: false,
            dwell: false,
            blocked_streak: 0,
            stats: RobotStats::default(),
        }
    }

    // ── Path accessors ────────────────────────────────────────────────────

    /// The next cell on the current path, if any remain.
    pub fn next_cell(&self) -> Option<Cell> {
        self.path.as_ref()?.cells.get(self.path_idx + 1).copied()
    }

    /// Install a fresh route starting at the robot's current cell.
    pub fn set_path(&mut self, path: Path) {
        debug_assert_eq!(path.start(), self.cell, "path must start at the robot");
        self.path = Some(path);
        self.path_idx = 0;
    }

    pub fn clear_path(&mut self) {
        self.path = None;
        self.path_idx = 0;
    }

    /// Step onto the next path cell, updating distance and motion tallies.
    pub fn advance(&mut self) {
        let next = self.next_cell().expect("advance requires a next cell");
        self.cell = next;
        self.path_idx += 1;
        self.stats.distance += 1;
        self.stats.ticks_moving += 1;
    }

    /// The cell this robot is ultimately heading for in its current phase.
    pub fn goal(&self) -> Option<Cell> {
        match self.phase {
            Phase::Idle => None,
            Phase::ToShelf | Phase::ToReturn => self.shelf_anchor,
            Phase::ToStation => self.station_dock,
            Phase::DoneCycle => Some(self.home),
        }
    }

    /// `true` when the robot may be given a new order this tick.
    #[inline]
    pub fn is_dispatchable(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::DoneCycle)
    }

    // ── Phase transitions ─────────────────────────────────────────────────

    /// Idle / DoneCycle → ToShelf: the dispatcher committed an assignment.
    pub fn assign(&mut self, order: OrderId, anchor: Cell, dock: Cell, path: Path) {
        debug_assert!(self.is_dispatchable());
        self.order = Some(order);
        self.shelf_anchor = Some(anchor);
        self.station_dock = Some(dock);
        self.phase = Phase::ToShelf;
        self.carrying = false;
        self.dwell = false;
        self.blocked_streak = 0;
        self.set_path(path);
    }

    /// ToShelf → ToStation: standing on the anchor; lift the shelf.
    ///
    /// Sets the one-tick pickup dwell.  The route to the dock is planned on
    /// the next tick.
    pub fn lift_shelf(&mut self) {
        debug_assert_eq!(self.phase, Phase::ToShelf);
        debug_assert_eq!(Some(self.cell), self.shelf_anchor);
        self.phase = Phase::ToStation;
        self.carrying = true;
        self.dwell = true;
        self.clear_path();
    }

    /// ToStation → ToReturn: standing on the dock; shelf delivered.
    pub fn deliver(&mut self) {
        debug_assert_eq!(self.phase, Phase::ToStation);
        debug_assert_eq!(Some(self.cell), self.station_dock);
        self.phase = Phase::ToReturn;
        self.carrying = false;
        self.clear_path();
    }

    /// ToReturn → DoneCycle: shelf released at its anchor; order finished.
    pub fn release_shelf(&mut self) {
        debug_assert_eq!(self.phase, Phase::ToReturn);
        debug_assert_eq!(Some(self.cell), self.shelf_anchor);
        self.order = None;
        self.shelf_anchor = None;
        self.station_dock = None;
        self.phase = Phase::DoneCycle;
        self.clear_path();
    }

    /// DoneCycle → Idle: reached the spawn cell with no new work.
    pub fn park(&mut self) {
        debug_assert_eq!(self.phase, Phase::DoneCycle);
        debug_assert_eq!(self.cell, self.home);
        self.phase = Phase::Idle;
        self.clear_path();
    }
}

// ── Fleet ────────────────────────────────────────────────────────────────────

/// All robots of a run, indexed by `RobotId`.
pub struct Fleet {
    robots: Vec<Robot>,
}

impl Fleet {
    /// Place `count` robots at the first `count` spawn cells.
    pub fn at_spawns(count: usize, spawns: &[Cell]) -> FleetResult<Fleet> {
        if spawns.len() < count {
            return Err(FleetError::InsufficientSpawns { robots: count, spawns: spawns.len() });
        }
        let robots = spawns[..count]
            .iter()
            .enumerate()
            .map(|(i, &cell)| Robot::new(RobotId(i as u32), cell))
            .collect();
        Ok(Fleet { robots })
    }

    pub fn len(&self) -> usize {
        self.robots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.robots.is_empty()
    }

    #[inline]
    pub fn get(&self, id: RobotId) -> &Robot {
        &self.robots[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: RobotId) -> &mut Robot {
        &mut self.robots[id.index()]
    }

    /// Robots in ascending id order — the canonical processing order.
    pub fn iter(&self) -> impl Iterator<Item = &Robot> {
        self.robots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Robot> {
        self.robots.iter_mut()
    }

    /// All robot ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = RobotId> {
        (0..self.robots.len() as u32).map(RobotId)
    }

    /// Current cells of all robots, indexed by robot.
    pub fn positions(&self) -> Vec<Cell> {
        self.robots.iter().map(|r| r.cell).collect()
    }
}
