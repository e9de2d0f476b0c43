//! The metrics collector and the final report.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use gf_core::{Cell, OrderId, RobotStats, SimConfig, Tick};

use crate::heatmap::HeatGrid;
use crate::writer::{HEATMAP_RATIO_FILE, HEATMAP_VISITS_FILE, HEATMAP_WAITS_FILE};

// ── MetricsCollector ─────────────────────────────────────────────────────────

/// Accumulates counters over the run.  Owned by the scheduler; sampled at
/// every tick; folded into a [`MetricsReport`] at the end.
pub struct MetricsCollector {
    visits: HeatGrid,
    waits: HeatGrid,
    deadlock_ticks: u64,
    unreachable_attempts: u64,
    /// order → completion_tick - creation_tick, insertion keyed by id so
    /// aggregation order is deterministic.
    lead_times: BTreeMap<OrderId, u64>,
    /// Orders that failed at least one plan attempt.
    flagged_unreachable: BTreeSet<OrderId>,
}

impl MetricsCollector {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            visits: HeatGrid::new(width, height),
            waits: HeatGrid::new(width, height),
            deadlock_ticks: 0,
            unreachable_attempts: 0,
            lead_times: BTreeMap::new(),
            flagged_unreachable: BTreeSet::new(),
        }
    }

    // ── Recording ─────────────────────────────────────────────────────────

    /// A robot entered `cell` (or was placed there at start).
    pub fn record_visit(&mut self, cell: Cell) {
        self.visits.bump(cell);
    }

    /// A robot was blocked at `cell` wanting to move.
    pub fn record_wait(&mut self, cell: Cell) {
        self.waits.bump(cell);
    }

    /// A tick in which no robot advanced while at least one was blocked.
    pub fn record_deadlock_tick(&mut self) {
        self.deadlock_ticks += 1;
    }

    /// A plan attempt for `order` found no route.
    pub fn record_unreachable(&mut self, order: OrderId) {
        self.unreachable_attempts += 1;
        self.flagged_unreachable.insert(order);
    }

    /// `order` finished its full cycle (shelf back at its anchor).
    pub fn record_completion(&mut self, order: OrderId, created: Tick, completed: Tick) {
        self.lead_times.insert(order, completed.since(created));
    }

    // ── Mid-run queries (used by tests and the scheduler) ─────────────────

    pub fn orders_completed(&self) -> usize {
        self.lead_times.len()
    }

    pub fn deadlock_ticks(&self) -> u64 {
        self.deadlock_ticks
    }

    pub fn visits(&self) -> &HeatGrid {
        &self.visits
    }

    pub fn waits(&self) -> &HeatGrid {
        &self.waits
    }

    // ── Finalization ──────────────────────────────────────────────────────

    /// Fold everything into the final report.
    ///
    /// `orders_submitted` is the count of orders with creation tick within
    /// the horizon — the denominator of the conservation property
    /// (completed + pending + unreachable = submitted).
    pub fn finish(
        &self,
        config: &SimConfig,
        robot_stats: &[RobotStats],
        orders_total: usize,
        orders_submitted: usize,
    ) -> MetricsReport {
        let completed = self.lead_times.len();
        let unreachable = self
            .flagged_unreachable
            .iter()
            .filter(|id| !self.lead_times.contains_key(id))
            .count();
        let pending = orders_submitted.saturating_sub(completed + unreachable);

        let horizon = config.horizon_ticks.max(1) as f64;
        let mean_lead_time = if completed > 0 {
            Some(self.lead_times.values().sum::<u64>() as f64 / completed as f64)
        } else {
            None
        };

        let robot_count = robot_stats.len().max(1) as f64;
        let mean_wait_ticks =
            robot_stats.iter().map(|s| s.ticks_waiting).sum::<u64>() as f64 / robot_count;
        let mean_utilization = robot_stats
            .iter()
            .map(|s| s.ticks_moving as f64 / horizon)
            .sum::<f64>()
            / robot_count;
        let mean_active_ticks =
            robot_stats.iter().map(|s| s.ticks_active).sum::<u64>() as f64 / robot_count;

        MetricsReport {
            seed: config.seed,
            robots: config.robots,
            horizon_ticks: config.horizon_ticks,
            orders_total,
            orders_completed: completed,
            orders_pending: pending,
            orders_unreachable: unreachable,
            unreachable_attempts: self.unreachable_attempts,
            throughput: completed as f64 / horizon,
            mean_lead_time,
            mean_wait_ticks,
            mean_utilization,
            mean_active_ticks,
            deadlock_ticks: self.deadlock_ticks,
            total_distance: robot_stats.iter().map(|s| s.distance).sum(),
            heatmap_visits: HEATMAP_VISITS_FILE.to_owned(),
            heatmap_waits: HEATMAP_WAITS_FILE.to_owned(),
            heatmap_ratio: HEATMAP_RATIO_FILE.to_owned(),
        }
    }
}

// ── MetricsReport ────────────────────────────────────────────────────────────

/// The final benchmark record serialized to `metrics.json`.
///
/// Field order is the serialization order; keep it stable — the determinism
/// contract promises byte-identical output for identical inputs.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MetricsReport {
    pub seed: u64,
    pub robots: usize,
    pub horizon_ticks: u64,

    pub orders_total: usize,
    pub orders_completed: usize,
    pub orders_pending: usize,
    pub orders_unreachable: usize,
    pub unreachable_attempts: u64,

    /// Completed orders per simulated tick.
    pub throughput: f64,
    /// Mean of completion − creation over completed orders; `null` when
    /// nothing completed.
    pub mean_lead_time: Option<f64>,
    /// Mean blocked ticks per robot.
    pub mean_wait_ticks: f64,
    /// Mean over robots of ticks_moving / horizon.
    pub mean_utilization: f64,
    /// Mean non-idle ticks per robot.
    pub mean_active_ticks: f64,

    pub deadlock_ticks: u64,
    /// Total cells moved across the fleet.
    pub total_distance: u64,

    /// Relative paths of the heatmap artifacts next to `metrics.json`.
    pub heatmap_visits: String,
    pub heatmap_waits: String,
    pub heatmap_ratio: String,
}
