//! Layout entities and the validated `Layout` bundle.

use std::collections::{BTreeMap, HashSet};

use gf_core::{Cell, ShelfId, StationId};

use crate::grid::{CellKind, Grid};
use crate::{GridError, GridResult};

// ── Entities ─────────────────────────────────────────────────────────────────

/// A storage shelf: an id and the anchor cell it occupies when home.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Shelf {
    pub id: ShelfId,
    pub anchor: Cell,
}

/// A consolidation station: an id and its dock cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Station {
    pub id: StationId,
    pub dock: Cell,
}

// ── Layout ───────────────────────────────────────────────────────────────────

/// The full static world: grid plus cross-validated entities.
///
/// Construction enforces the scenario invariants (distinct ids, distinct
/// anchor cells, in-bounds coordinates, cell kinds matching the entity), so
/// downstream code can index without re-checking.
#[derive(Debug)]
pub struct Layout {
    pub grid: Grid,
    shelves: Vec<Shelf>,
    stations: Vec<Station>,
    spawns: Vec<Cell>,
    shelf_anchors: BTreeMap<ShelfId, Cell>,
    station_docks: BTreeMap<StationId, Cell>,
}

impl Layout {
    pub fn new(
        grid: Grid,
        shelves: Vec<Shelf>,
        stations: Vec<Station>,
        spawns: Vec<Cell>,
    ) -> GridResult<Layout> {
        let mut shelf_anchors = BTreeMap::new();
        let mut seen_anchors = HashSet::new();
        for shelf in &shelves {
            check_entity_cell(&grid, "shelf", shelf.id.0, shelf.anchor, CellKind::Shelf)?;
            if shelf_anchors.insert(shelf.id, shelf.anchor).is_some() {
                return Err(GridError::DuplicateId { what: "shelf", id: shelf.id.0 });
            }
            if !seen_anchors.insert(shelf.anchor) {
                return Err(GridError::DuplicateCell { what: "shelf", cell: shelf.anchor });
            }
        }

        let mut station_docks = BTreeMap::new();
        for station in &stations {
            check_entity_cell(&grid, "station", station.id.0, station.dock, CellKind::Station)?;
            if station_docks.insert(station.id, station.dock).is_some() {
                return Err(GridError::DuplicateId { what: "station", id: station.id.0 });
            }
        }

        let mut seen_spawns = HashSet::new();
        for &spawn in &spawns {
            check_entity_cell(&grid, "spawn", seen_spawns.len() as u32, spawn, CellKind::Spawn)?;
            if !seen_spawns.insert(spawn) {
                return Err(GridError::DuplicateCell { what: "spawn", cell: spawn });
            }
        }

        Ok(Layout { grid, shelves, stations, spawns, shelf_anchors, station_docks })
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    /// Anchor cell of a shelf, or `None` for an unknown id.
    #[inline]
    pub fn shelf_anchor(&self, id: ShelfId) -> Option<Cell> {
        self.shelf_anchors.get(&id).copied()
    }

    /// Dock cell of a station, or `None` for an unknown id.
    #[inline]
    pub fn station_dock(&self, id: StationId) -> Option<Cell> {
        self.station_docks.get(&id).copied()
    }

    pub fn shelves(&self) -> &[Shelf] {
        &self.shelves
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Spawn cells in artifact order.  Robots are placed at the first
    /// `robot_count` of these.
    pub fn spawns(&self) -> &[Cell] {
        &self.spawns
    }
}

fn check_entity_cell(
    grid: &Grid,
    what: &'static str,
    id: u32,
    cell: Cell,
    expected: CellKind,
) -> GridResult<()> {
    if !grid.in_bounds(cell) {
        return Err(GridError::OutOfBounds {
            what,
            id,
            cell,
            width: grid.width(),
            height: grid.height(),
        });
    }
    let found = grid.kind(cell);
    if found != expected {
        return Err(GridError::KindMismatch { what, id, cell, expected, found });
    }
    Ok(())
}
