//! `gf-fleet` — robots and how work is handed to them.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`robot`]    | `Phase`, `Robot`, `Fleet` (tallies in `gf_core::stats`) |
//! | [`dispatch`] | `DispatchPolicy` trait + `NearestFirst`                 |
//! | [`error`]    | `FleetError`, `FleetResult<T>`                          |
//!
//! # The pickup cycle
//!
//! ```text
//! Idle ──dispatch──▶ ToShelf ──at anchor──▶ ToStation ──at dock──▶ ToReturn
//!   ▲                 (one-tick pickup dwell,  (carrying)            │
//!   │                  carrying set)                           at anchor,
//!   │                                                         shelf released
//!   └──at home── DoneCycle ◀──────────────────────────────────────┘
//!                    │
//!                    └──dispatch (from anywhere, incl. mid-walk home)──▶ ToShelf
//! ```
//!
//! A robot in `DoneCycle` has released its shelf and is walking back to its
//! spawn cell; it is dispatchable the whole way, so a busy warehouse rarely
//! sees robots actually reach home.  `Idle` robots park in place.

pub mod dispatch;
pub mod error;
pub mod robot;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use dispatch::{DispatchPolicy, NearestFirst};
pub use error::{FleetError, FleetResult};
pub use robot::{Fleet, Phase, Robot};
