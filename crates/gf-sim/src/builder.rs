//! Fluent builder for constructing a [`Sim`].

use std::collections::{HashMap, HashSet};

use gf_core::{SimConfig, Tick};
use gf_fleet::{DispatchPolicy, Fleet};
use gf_grid::{Layout, PathPlanner};
use gf_metrics::MetricsCollector;
use gf_order::{Order, OrderQueue};
use gf_reserve::ReservationTable;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<P, D>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — seed, fleet size, horizon
/// - [`Layout`] — the validated static world
/// - `P: PathPlanner` — e.g. [`gf_grid::AStarPlanner`]
/// - `D: DispatchPolicy` — e.g. [`gf_fleet::NearestFirst`]
///
/// # Validation
///
/// `build` fails when the layout has fewer spawn points than robots, or when
/// an order references a shelf or station the layout does not declare.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, layout, AStarPlanner, NearestFirst)
///     .orders(orders)
///     .build()?;
/// sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder<P: PathPlanner, D: DispatchPolicy> {
    config: SimConfig,
    layout: Layout,
    orders: Vec<Order>,
    planner: P,
    dispatcher: D,
}

impl<P: PathPlanner, D: DispatchPolicy> SimBuilder<P, D> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, layout: Layout, planner: P, dispatcher: D) -> Self {
        Self { config, layout, orders: Vec::new(), planner, dispatcher }
    }

    /// Supply the order stream (defaults to empty).
    pub fn orders(mut self, orders: Vec<Order>) -> Self {
        self.orders = orders;
        self
    }

    /// Validate inputs, place the fleet, and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<P, D>> {
        // ── Cross-validate order references against the layout ────────────
        for order in &self.orders {
            if self.layout.shelf_anchor(order.shelf).is_none() {
                return Err(SimError::UnknownShelf { order: order.id, shelf: order.shelf });
            }
            if self.layout.station_dock(order.station).is_none() {
                return Err(SimError::UnknownStation { order: order.id, station: order.station });
            }
        }

        // ── Place the fleet at spawn points ───────────────────────────────
        let fleet = Fleet::at_spawns(self.config.robots, self.layout.spawns())?;

        // ── Seed bookings, occupancy, and visit counts at tick 0 ──────────
        let mut reservations = ReservationTable::new();
        let mut occupancy = HashMap::new();
        let mut metrics =
            MetricsCollector::new(self.layout.grid.width(), self.layout.grid.height());
        for robot in fleet.iter() {
            reservations.reserve_cell(robot.cell, Tick::ZERO, robot.id);
            occupancy.insert(robot.cell, robot.id);
            metrics.record_visit(robot.cell);
        }

        Ok(Sim {
            config: self.config,
            now: Tick::ZERO,
            layout: self.layout,
            fleet,
            queue: OrderQueue::new(self.orders),
            planner: self.planner,
            dispatcher: self.dispatcher,
            reservations,
            metrics,
            occupancy,
            lifted: HashSet::new(),
            busy_shelves: HashSet::new(),
        })
    }
}
