use gf_core::{OrderId, ShelfId, StationId};
use gf_fleet::FleetError;
use gf_grid::GridError;
use gf_metrics::MetricsError;
use gf_order::OrderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("layout error: {0}")]
    Grid(#[from] GridError),

    #[error("order stream error: {0}")]
    Order(#[from] OrderError),

    #[error("fleet error: {0}")]
    Fleet(#[from] FleetError),

    #[error("artifact error: {0}")]
    Metrics(#[from] MetricsError),

    #[error("order {order} references unknown shelf {shelf}")]
    UnknownShelf { order: OrderId, shelf: ShelfId },

    #[error("order {order} references unknown station {station}")]
    UnknownStation { order: OrderId, station: StationId },
}

pub type SimResult<T> = Result<T, SimError>;
