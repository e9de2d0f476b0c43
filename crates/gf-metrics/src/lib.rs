//! `gf-metrics` — what the benchmark measures and how it is persisted.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`heatmap`] | `HeatGrid` — per-cell visit/wait counters                 |
//! | [`metrics`] | `MetricsCollector` (accumulates) + `MetricsReport` (final)|
//! | [`writer`]  | `metrics.json` + heatmap CSV writers                      |
//! | [`error`]   | `MetricsError`, `MetricsResult<T>`                        |
//!
//! # Determinism
//!
//! The report is a plain struct serialized with fixed field order, and the
//! heatmaps are written row-major; identical runs therefore produce
//! byte-identical artifacts, which the test suite relies on.

pub mod error;
pub mod heatmap;
pub mod metrics;
pub mod writer;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{MetricsError, MetricsResult};
pub use heatmap::HeatGrid;
pub use metrics::{MetricsCollector, MetricsReport};
pub use writer::{write_artifacts, HEATMAP_RATIO_FILE, HEATMAP_VISITS_FILE, HEATMAP_WAITS_FILE, METRICS_FILE};
