//! `gf-sim` — the tick loop that turns a scenario into a metrics report.
//!
//! # The eight-step tick
//!
//! ```text
//! for tick in 0..horizon:
//!   ① Intake      — release orders with creation_tick <= now
//!   ② Dispatch    — pair dispatchable robots with pending orders
//!   ③ Plan        — route active robots whose plan is missing or stale
//!   ④ Move        — in ascending id order: occupancy + reservation checks,
//!                   then advance or wait-in-place
//!   ⑤ Transition  — robot state machine edges, order completions
//!   ⑥ Deadlock    — count ticks where everyone who wanted to move couldn't
//!   ⑦ Purge       — drop reservations older than the current tick
//!   ⑧ Advance     — now += 1
//! ```
//!
//! Robots with lower ids win every contested resource; together with the
//! deterministic planner and dispatcher this makes the whole run a pure
//! function of `(scenario, seed, robots, horizon)`.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use gf_sim::run_scenario;
//!
//! let report = run_scenario(Path::new("scenarios/seed42"), 42, 20, 10_000)?;
//! println!("completed {} orders", report.orders_completed);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod run;
pub mod sim;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use run::run_scenario;
pub use sim::Sim;
