//! The scenario entry point: load artifacts, run, write results.

use std::path::Path;

use tracing::info;

use gf_core::SimConfig;
use gf_fleet::NearestFirst;
use gf_grid::{load_layout_dir, AStarPlanner};
use gf_metrics::{write_artifacts, MetricsReport};
use gf_order::load_orders_dir;

use crate::{NoopObserver, SimBuilder, SimResult};

/// Run the benchmark for one scenario directory.
///
/// Reads `layout.csv`, `shelves.json`, `stations.json`, `spawn.json`, and
/// `orders.json` from `scenario_dir`, simulates `horizon_ticks` ticks with
/// `robots` robots, writes `metrics.json` plus the three heatmap CSVs back
/// into the same directory, and returns the report.
///
/// Identical `(scenario contents, seed, robots, horizon_ticks)` inputs
/// produce byte-identical artifacts.
pub fn run_scenario(
    scenario_dir: &Path,
    seed: u64,
    robots: usize,
    horizon_ticks: u64,
) -> SimResult<MetricsReport> {
    let layout = load_layout_dir(scenario_dir)?;
    let orders = load_orders_dir(scenario_dir)?;
    info!(
        scenario = %scenario_dir.display(),
        robots,
        horizon_ticks,
        orders = orders.len(),
        "scenario loaded"
    );

    let config = SimConfig { seed, robots, horizon_ticks };
    let mut sim = SimBuilder::new(config, layout, AStarPlanner, NearestFirst)
        .orders(orders)
        .build()?;

    sim.run(&mut NoopObserver);

    let report = sim.report();
    write_artifacts(scenario_dir, &report, sim.visits(), sim.waits())?;
    info!(
        completed = report.orders_completed,
        pending = report.orders_pending,
        deadlock_ticks = report.deadlock_ticks,
        "benchmark finished"
    );

    Ok(report)
}
