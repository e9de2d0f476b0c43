//! `gf-grid` — the static warehouse world and path planning over it.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`grid`]    | `CellKind`, immutable `Grid`, 4-neighbor iteration             |
//! | [`view`]    | `TraversalView` — per-query traversability rules               |
//! | [`planner`] | `PathPlanner` trait + `AStarPlanner`                           |
//! | [`layout`]  | `Shelf`, `Station`, validated `Layout`                         |
//! | [`loader`]  | Scenario artifact loaders (`layout.csv` + entity JSON files)   |
//! | [`error`]   | `GridError`, `GridResult<T>`                                   |
//!
//! # Traversability model
//!
//! The grid itself is immutable: cell kinds never change during a run.  What
//! changes is *who may stand where*:
//!
//! - Free, station, and spawn cells are traversable for everyone.
//! - A shelf cell is traversable only for the robot whose pickup or return
//!   target it currently is.
//! - A shelf anchor whose shelf is away on a robot's back is traversable for
//!   everyone until the shelf comes home.
//!
//! Those per-query rules are captured in [`TraversalView`], which the
//! scheduler assembles fresh for every planning call.  The planner itself
//! never sees reservations; temporal conflicts are the scheduler's problem.

pub mod error;
pub mod grid;
pub mod layout;
pub mod loader;
pub mod planner;
pub mod view;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{GridError, GridResult};
pub use grid::{CellKind, Grid};
pub use layout::{Layout, Shelf, Station};
pub use loader::load_layout_dir;
pub use planner::{AStarPlanner, Path, PathPlanner};
pub use view::TraversalView;
