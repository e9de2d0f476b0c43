//! The order tuple.

use gf_core::{OrderId, ShelfId, StationId, Tick};

/// A request to bring one shelf to one station.
///
/// Immutable once created; progress (assignment, completion) is tracked by
/// the scheduler and metrics, never on the order itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    /// Tick at which the order enters the system.
    pub created: Tick,
    /// Shelf to fetch.
    pub shelf: ShelfId,
    /// Station to deliver it to.
    pub station: StationId,
}
