//! Per-robot tally counters.
//!
//! The counters live here, below both the fleet and the metrics collector:
//! the fleet accumulates them tick by tick, the collector folds them into
//! the final report, and neither crate needs to know about the other.

/// Per-robot tallies accumulated over the whole run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RobotStats {
    /// Cells moved.
    pub distance: u64,
    /// Ticks spent blocked wanting to move.
    pub ticks_waiting: u64,
    /// Ticks in which the robot advanced one cell.
    pub ticks_moving: u64,
    /// Ticks spent in any non-idle phase.
    pub ticks_active: u64,
}
