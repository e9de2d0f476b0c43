//! The `Sim` struct and its tick loop.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use gf_core::{Cell, OrderId, RobotId, ShelfId, SimConfig, Tick};
use gf_fleet::{DispatchPolicy, Fleet, Phase};
use gf_grid::{Layout, Path, PathPlanner, TraversalView};
use gf_metrics::{HeatGrid, MetricsCollector, MetricsReport};
use gf_order::OrderQueue;
use gf_reserve::ReservationTable;

use crate::SimObserver;

/// Blocked ticks before a robot stuck behind an active junior robot gives up
/// holding its lane and steps aside.  The junior side of a standoff tries a
/// detour after one blocked tick; the sidestep is the escape hatch for
/// geometries where no detour exists.
const SIDESTEP_AFTER: u32 = 3;

// ── Per-tick result ──────────────────────────────────────────────────────────

/// What happened during one tick, fed to the observer hooks.
struct TickSummary {
    /// Robots that advanced one cell.
    moved: usize,
    /// Orders completed this tick, with the robot that carried them.
    completed: Vec<(OrderId, RobotId)>,
}

// ── Sim ──────────────────────────────────────────────────────────────────────

/// The simulation runner.
///
/// `Sim<P, D>` owns all run state and drives the eight-step tick procedure
/// (see the crate docs).  The planner and dispatch policy are compile-time
/// seams: swap them without touching the loop.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: PathPlanner, D: DispatchPolicy> {
    /// Run configuration (seed, fleet size, horizon).
    pub config: SimConfig,

    /// Current tick, advanced exactly once per step.
    pub now: Tick,

    /// The static world.
    pub layout: Layout,

    /// All robots, indexed by id.
    pub fleet: Fleet,

    /// The order stream and its release/pending machinery.
    pub queue: OrderQueue,

    /// The path planning strategy.
    pub planner: P,

    /// The assignment strategy.
    pub dispatcher: D,

    /// Spatio-temporal bookings.  Owned here; collaborators get explicit
    /// references, never shared mutable access.
    pub(crate) reservations: ReservationTable,

    /// Accumulating counters and heatmaps.
    pub(crate) metrics: MetricsCollector,

    /// Cell → robot currently standing on it.  Updated immediately as robots
    /// move so later (higher-id) robots observe earlier moves within a tick.
    pub(crate) occupancy: HashMap<Cell, RobotId>,

    /// Anchors of shelves currently away on a robot's back.  While an anchor
    /// is in this set it is open floor for everyone.
    pub(crate) lifted: HashSet<Cell>,

    /// Shelves tied up by a live assignment.  Orders for these shelves are
    /// not dispatchable until the shelf is back on its anchor.
    pub(crate) busy_shelves: HashSet<ShelfId>,
}

impl<P: PathPlanner, D: DispatchPolicy> Sim<P, D> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to the configured horizon.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        while self.now < self.config.end_tick() {
            let now = self.now;
            observer.on_tick_start(now);
            let summary = self.process_tick(now);
            for &(order, robot) in &summary.completed {
                observer.on_order_completed(order, robot, now);
            }
            observer.on_tick_end(now, &self.fleet, summary.moved);
            self.now = now + 1;
        }
        observer.on_sim_end(self.now);
    }

    /// Fold the collected counters into the final report.
    pub fn report(&self) -> MetricsReport {
        let stats: Vec<_> = self.fleet.iter().map(|r| r.stats).collect();
        self.metrics.finish(
            &self.config,
            &stats,
            self.queue.total(),
            self.queue.submitted_by(self.config.end_tick()),
        )
    }

    /// Per-cell visit counts (heatmap source).
    pub fn visits(&self) -> &HeatGrid {
        self.metrics.visits()
    }

    /// Per-cell wait counts (heatmap source).
    pub fn waits(&self) -> &HeatGrid {
        self.metrics.waits()
    }

    /// Accumulated deadlock ticks so far.
    pub fn deadlock_ticks(&self) -> u64 {
        self.metrics.deadlock_ticks()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, now: Tick) -> TickSummary {
        // ── ① Intake ──────────────────────────────────────────────────────
        let released = self.queue.release_due(now);
        if released > 0 {
            debug!(tick = now.0, released, "orders released");
        }

        // ── ② Dispatch ────────────────────────────────────────────────────
        self.dispatch(now);

        // ── ③ Plan ────────────────────────────────────────────────────────
        self.plan_routes();

        // ── ④ Move ────────────────────────────────────────────────────────
        let (moved, stalled) = self.move_robots(now);

        // ── ⑤ Phase transitions ───────────────────────────────────────────
        let completed = self.apply_transitions(now);

        // ── ⑥ Deadlock detection ──────────────────────────────────────────
        //
        // A tick counts as deadlocked when nobody advanced but at least one
        // robot was stopped wanting to move.  Pickup dwells are service
        // time, not deadlock, and are excluded via `stalled`.
        if moved == 0 && stalled {
            self.metrics.record_deadlock_tick();
            debug!(tick = now.0, "deadlock tick");
        }

        // ── ⑦ Purge ───────────────────────────────────────────────────────
        self.reservations.release_past(now);

        // ⑧ Advance happens in `run` after the observer hooks.
        TickSummary { moved, completed }
    }

    /// Step ②: pair dispatchable robots with pending orders, ascending id.
    ///
    /// An assignment commits only when the planner finds a route to the
    /// shelf; otherwise the order goes back to the head of the queue and the
    /// robot sits out the tick.
    fn dispatch(&mut self, now: Tick) {
        let ids: Vec<RobotId> = self.fleet.ids().collect();
        for id in ids {
            if self.queue.pending_count() == 0 {
                break;
            }
            if !self.fleet.get(id).is_dispatchable() {
                continue;
            }

            // Candidates in queue order, excluding shelves already tied up.
            let candidates: Vec<(OrderId, Cell)> = self
                .queue
                .pending()
                .filter(|o| !self.busy_shelves.contains(&o.shelf))
                .filter_map(|o| self.layout.shelf_anchor(o.shelf).map(|a| (o.id, a)))
                .collect();
            if candidates.is_empty() {
                break;
            }

            let robot_cell = self.fleet.get(id).cell;
            let Some(chosen) = self.dispatcher.choose(robot_cell, &candidates) else {
                continue;
            };
            let Some(&(_, anchor)) = candidates.iter().find(|(oid, _)| *oid == chosen) else {
                continue; // policy returned an id it was never offered
            };
            let Some(order) = self.queue.get(chosen).copied() else {
                continue;
            };
            let Some(dock) = self.layout.station_dock(order.station) else {
                continue; // unreachable: references validated at build
            };

            let view = TraversalView::new(&self.layout.grid)
                .with_target(anchor)
                .with_lifted(&self.lifted);
            match self.planner.plan(&view, robot_cell, anchor) {
                Some(path) => {
                    self.queue.take(chosen);
                    self.busy_shelves.insert(order.shelf);
                    self.fleet.get_mut(id).assign(chosen, anchor, dock, path);
                    debug!(tick = now.0, robot = id.0, order = chosen.0, "order assigned");
                }
                None => {
                    // Unreachable shelf: keep the order at the head, leave
                    // the robot unassigned this tick.
                    self.queue.take(chosen);
                    self.queue.push_front(chosen);
                    self.metrics.record_unreachable(chosen);
                    debug!(tick = now.0, robot = id.0, order = chosen.0, "no route to shelf");
                }
            }
        }
    }

    /// Step ③: give every active robot a usable route.
    ///
    /// Replans when the route is missing, when the next step is statically
    /// blocked (a shelf came home), or — after a blocked tick — around the
    /// cells other robots are standing on.  A failed detour keeps the old
    /// route; the robot waits instead.  As a last resort a robot stuck for
    /// [`SIDESTEP_AFTER`] ticks behind an active junior robot steps aside to
    /// clear the lane.
    fn plan_routes(&mut self) {
        let ids: Vec<RobotId> = self.fleet.ids().collect();
        for id in ids {
            let robot = self.fleet.get(id);
            if !robot.phase.is_active() || robot.dwell {
                continue;
            }
            let Some(goal) = robot.goal() else { continue };
            if robot.cell == goal {
                continue; // transition fires in step ⑤
            }

            let cell = robot.cell;
            let blocked_streak = robot.blocked_streak;
            let next = robot.next_cell();

            let base = TraversalView::new(&self.layout.grid)
                .with_target(goal)
                .with_lifted(&self.lifted);

            match next {
                // No route yet (fresh leg, or a previous replan failed).
                None => {
                    if let Some(path) = self.planner.plan(&base, cell, goal) {
                        self.fleet.get_mut(id).set_path(path);
                    }
                }
                // Next step ran into a restored shelf: the route is stale.
                Some(step) if !base.traversable(step) => {
                    match self.planner.plan(&base, cell, goal) {
                        Some(path) => self.fleet.get_mut(id).set_path(path),
                        None => self.fleet.get_mut(id).clear_path(),
                    }
                }
                // Blocked last tick and the blocker is still there: try a
                // detour around everything currently occupied.  Only the
                // junior robot of a standoff yields — the blocker must hold
                // priority (lower id) or be parked — otherwise both sides
                // would detour into a mirrored standoff and livelock.
                Some(step)
                    if blocked_streak >= 1
                        && self.occupancy.get(&step).is_some_and(|&o| {
                            o != id && (o < id || !self.fleet.get(o).phase.is_active())
                        }) =>
                {
                    let avoid: HashSet<Cell> = self
                        .occupancy
                        .iter()
                        .filter(|&(_, &o)| o != id)
                        .map(|(&c, _)| c)
                        .collect();
                    let detour = base.with_avoid(&avoid);
                    if let Some(path) = self.planner.plan(&detour, cell, goal) {
                        debug!(robot = id.0, "detouring around blocked cell");
                        self.fleet.get_mut(id).set_path(path);
                    }
                    // No detour exists: keep the old route and keep waiting.
                }
                // Stuck behind an active junior robot that could not clear
                // itself (its detour keeps failing).  Step into any free
                // adjacent cell to open the lane; the route is replanned
                // from the new cell next tick.
                Some(step)
                    if blocked_streak >= SIDESTEP_AFTER
                        && self.occupancy.get(&step).is_some_and(|&o| {
                            o > id && self.fleet.get(o).phase.is_active()
                        }) =>
                {
                    let side = self
                        .layout
                        .grid
                        .neighbors4(cell)
                        .find(|n| {
                            *n != step
                                && base.traversable(*n)
                                && !self.occupancy.contains_key(n)
                        });
                    if let Some(side) = side {
                        debug!(robot = id.0, to = %side, "sidestepping to clear the lane");
                        self.fleet.get_mut(id).set_path(Path { cells: vec![cell, side] });
                    }
                }
                Some(_) => {}
            }
        }
    }

    /// Step ④: attempt one move per robot, ascending id.
    ///
    /// Returns `(moved, stalled)`: how many robots advanced, and whether any
    /// robot was stopped while wanting to move.
    fn move_robots(&mut self, now: Tick) -> (usize, bool) {
        let mut moved = 0;
        let mut stalled = false;

        let ids: Vec<RobotId> = self.fleet.ids().collect();
        for id in ids {
            let robot = self.fleet.get_mut(id);

            if !robot.phase.is_active() {
                // Parked robots still defend their cell.
                let _ = self.reservations.reserve_wait(robot.cell, now, id);
                continue;
            }

            robot.stats.ticks_active += 1;

            if robot.dwell {
                // One tick of pickup with no movement; the occupied cell
                // stays booked.
                robot.dwell = false;
                let _ = self.reservations.reserve_wait(robot.cell, now, id);
                continue;
            }

            let Some(next) = robot.next_cell() else {
                // No route: hold position.  Counts toward deadlock only if
                // the robot actually has somewhere to be.
                if robot.goal() != Some(robot.cell) {
                    stalled = true;
                }
                let _ = self.reservations.reserve_wait(robot.cell, now, id);
                continue;
            };

            let occupied = self.occupancy.get(&next).is_some_and(|&o| o != id);
            if !occupied && self.reservations.can_move(robot.cell, next, now, id) {
                self.reservations.reserve_move(robot.cell, next, now, id);
                self.occupancy.remove(&robot.cell);
                robot.advance();
                self.occupancy.insert(robot.cell, id);
                robot.blocked_streak = 0;
                self.metrics.record_visit(robot.cell);
                moved += 1;
            } else {
                robot.stats.ticks_waiting += 1;
                robot.blocked_streak += 1;
                stalled = true;
                self.metrics.record_wait(robot.cell);
                let _ = self.reservations.reserve_wait(robot.cell, now, id);
                debug!(tick = now.0, robot = id.0, at = %robot.cell, "blocked, waiting");
            }
        }

        (moved, stalled)
    }

    /// Step ⑤: fire state machine edges for robots that reached their goal.
    fn apply_transitions(&mut self, now: Tick) -> Vec<(OrderId, RobotId)> {
        let mut completed = Vec::new();

        let ids: Vec<RobotId> = self.fleet.ids().collect();
        for id in ids {
            let robot = self.fleet.get_mut(id);
            match robot.phase {
                Phase::ToShelf if Some(robot.cell) == robot.shelf_anchor => {
                    robot.lift_shelf();
                    self.lifted.insert(robot.cell);
                    debug!(tick = now.0, robot = id.0, "shelf lifted");
                }
                Phase::ToStation if Some(robot.cell) == robot.station_dock => {
                    robot.deliver();
                    debug!(tick = now.0, robot = id.0, "shelf delivered");
                }
                Phase::ToReturn if Some(robot.cell) == robot.shelf_anchor => {
                    let Some(order) = robot.order else { continue };
                    let anchor = robot.cell;
                    robot.release_shelf();
                    self.lifted.remove(&anchor);
                    if let Some(o) = self.queue.get(order) {
                        self.busy_shelves.remove(&o.shelf);
                        self.metrics.record_completion(order, o.created, now);
                    }
                    completed.push((order, id));
                    debug!(tick = now.0, robot = id.0, order = order.0, "order completed");
                }
                Phase::DoneCycle if robot.cell == robot.home && robot.order.is_none() => {
                    robot.park();
                }
                _ => {}
            }
        }

        completed
    }
}
