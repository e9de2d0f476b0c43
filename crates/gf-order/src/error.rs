//! Error types for gf-order.

use gf_core::{OrderId, Tick};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("duplicate order id {0}")]
    DuplicateId(OrderId),

    #[error("order {id} at tick {tick} breaks ascending creation-tick order (previous {prev})")]
    NotSorted { id: OrderId, tick: Tick, prev: Tick },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type OrderResult<T> = Result<T, OrderError>;
