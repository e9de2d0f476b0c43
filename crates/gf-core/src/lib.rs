//! `gf-core` — foundational types for the gridfleet warehouse simulator.
//!
//! This crate is a dependency of every other `gf-*` crate.  It intentionally
//! has no `gf-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                         |
//! |-----------|--------------------------------------------------|
//! | [`ids`]   | `RobotId`, `OrderId`, `ShelfId`, `StationId`     |
//! | [`cell`]  | `Cell`, Manhattan distance, row-major ordering   |
//! | [`time`]  | `Tick`, `SimConfig`                              |
//! | [`rng`]   | `SimRng` (deterministic scenario randomness)     |
//! | [`stats`] | `RobotStats` per-robot tallies                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod cell;
pub mod ids;
pub mod rng;
pub mod stats;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::Cell;
pub use ids::{OrderId, RobotId, ShelfId, StationId};
pub use rng::SimRng;
pub use stats::RobotStats;
pub use time::{SimConfig, Tick};
