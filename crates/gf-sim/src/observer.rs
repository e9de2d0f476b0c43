//! Simulation observer trait for progress reporting and invariant checks.

use gf_core::{OrderId, RobotId, Tick};
use gf_fleet::Fleet;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  `on_tick_end` receives a read-only view
/// of the fleet so tools (progress printers, invariant checkers, renderers)
/// can sample robot positions without the sim knowing about them.
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the tick completed.  `moved` is the number of robots
    /// that advanced a cell this tick.
    fn on_tick_end(&mut self, _tick: Tick, _fleet: &Fleet, _moved: usize) {}

    /// Called when `robot` finished the full cycle for `order` (shelf back
    /// at its anchor) during `tick`.
    fn on_order_completed(&mut self, _order: OrderId, _robot: RobotId, _tick: Tick) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
