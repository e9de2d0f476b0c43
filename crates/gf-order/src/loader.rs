//! `orders.json` loader.
//!
//! The artifact is an array of order records sorted by creation tick:
//!
//! ```json
//! [
//!   {"id": 0, "tick": 0, "shelf_id": 12, "station_id": 1},
//!   {"id": 1, "tick": 4, "shelf_id": 3,  "station_id": 0}
//! ]
//! ```
//!
//! Duplicate ids and tick-order violations are load errors; shelf and
//! station references are validated later against the layout, where both
//! sides are known.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use gf_core::{OrderId, ShelfId, StationId, Tick};

use crate::{Order, OrderError, OrderResult};

#[derive(Deserialize)]
struct OrderRecord {
    id: u32,
    tick: u64,
    shelf_id: u32,
    station_id: u32,
}

/// Load `orders.json` from a scenario directory.
pub fn load_orders_dir(dir: &Path) -> OrderResult<Vec<Order>> {
    let file = File::open(dir.join("orders.json"))?;
    load_orders_reader(file)
}

/// Like [`load_orders_dir`] but accepts any `Read` source (tests pass a
/// `Cursor`).
pub fn load_orders_reader<R: Read>(reader: R) -> OrderResult<Vec<Order>> {
    let records: Vec<OrderRecord> =
        serde_json::from_reader(reader).map_err(|e| OrderError::Parse(e.to_string()))?;

    let mut seen = HashSet::with_capacity(records.len());
    let mut last_tick = Tick::ZERO;
    let mut orders = Vec::with_capacity(records.len());

    for r in records {
        let order = Order {
            id: OrderId(r.id),
            created: Tick(r.tick),
            shelf: ShelfId(r.shelf_id),
            station: StationId(r.station_id),
        };
        if !seen.insert(order.id) {
            return Err(OrderError::DuplicateId(order.id));
        }
        if order.created < last_tick {
            return Err(OrderError::NotSorted { id: order.id, tick: order.created, prev: last_tick });
        }
        last_tick = order.created;
        orders.push(order);
    }

    Ok(orders)
}
