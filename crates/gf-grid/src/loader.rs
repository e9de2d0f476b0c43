//! Scenario layout loaders.
//!
//! # Artifact formats
//!
//! A scenario directory holds the static world as four files:
//!
//! | File            | Format                                             |
//! |-----------------|----------------------------------------------------|
//! | `layout.csv`    | dense integer grid, one CSV row per grid row, no header |
//! | `shelves.json`  | array of `{"id": .., "row": .., "col": ..}`        |
//! | `stations.json` | array of `{"id": .., "row": .., "col": ..}`        |
//! | `spawn.json`    | array of `{"row": .., "col": ..}`                  |
//!
//! Cell codes: 0=free, 1=shelf, 2=station, 3=spawn, 4=obstacle.  The grid
//! shape is inferred from the CSV and validated rectangular.
//!
//! All functions have `*_reader` variants accepting any `Read` source so
//! tests can pass a `Cursor` without touching the filesystem.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use gf_core::{Cell, ShelfId, StationId};

use crate::grid::Grid;
use crate::layout::{Layout, Shelf, Station};
use crate::{GridError, GridResult};

// ── JSON records ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ShelfRecord {
    id: u32,
    row: u32,
    col: u32,
}

#[derive(Deserialize)]
struct StationRecord {
    id: u32,
    row: u32,
    col: u32,
}

#[derive(Deserialize)]
struct SpawnRecord {
    row: u32,
    col: u32,
}

// ── Public API ───────────────────────────────────────────────────────────────

/// Load and cross-validate the full static world from a scenario directory.
pub fn load_layout_dir(dir: &Path) -> GridResult<Layout> {
    let grid = load_grid_reader(open(dir, "layout.csv")?)
        .map_err(|e| e.in_file("layout.csv"))?;
    let shelves = load_shelves_reader(open(dir, "shelves.json")?)
        .map_err(|e| e.in_file("shelves.json"))?;
    let stations = load_stations_reader(open(dir, "stations.json")?)
        .map_err(|e| e.in_file("stations.json"))?;
    let spawns = load_spawns_reader(open(dir, "spawn.json")?)
        .map_err(|e| e.in_file("spawn.json"))?;

    Layout::new(grid, shelves, stations, spawns)
}

/// Parse the dense cell-code grid from CSV.
pub fn load_grid_reader<R: Read>(reader: R) -> GridResult<Grid> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows: Vec<Vec<u8>> = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let row = record
            .iter()
            .map(|field| {
                field.trim().parse::<u8>().map_err(|_| {
                    GridError::Parse(format!("invalid cell code {field:?} in layout row {}", rows.len()))
                })
            })
            .collect::<GridResult<Vec<u8>>>()?;
        rows.push(row);
    }

    Grid::from_rows(&rows)
}

/// Parse `shelves.json`.
pub fn load_shelves_reader<R: Read>(reader: R) -> GridResult<Vec<Shelf>> {
    let records: Vec<ShelfRecord> = parse_json(reader)?;
    Ok(records
        .into_iter()
        .map(|r| Shelf { id: ShelfId(r.id), anchor: Cell::new(r.row, r.col) })
        .collect())
}

/// Parse `stations.json`.
pub fn load_stations_reader<R: Read>(reader: R) -> GridResult<Vec<Station>> {
    let records: Vec<StationRecord> = parse_json(reader)?;
    Ok(records
        .into_iter()
        .map(|r| Station { id: StationId(r.id), dock: Cell::new(r.row, r.col) })
        .collect())
}

/// Parse `spawn.json`.
pub fn load_spawns_reader<R: Read>(reader: R) -> GridResult<Vec<Cell>> {
    let records: Vec<SpawnRecord> = parse_json(reader)?;
    Ok(records.into_iter().map(|r| Cell::new(r.row, r.col)).collect())
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn open(dir: &Path, name: &str) -> GridResult<File> {
    File::open(dir.join(name)).map_err(|e| GridError::from(e).in_file(name))
}

fn parse_json<R: Read, T: serde::de::DeserializeOwned>(reader: R) -> GridResult<T> {
    serde_json::from_reader(reader).map_err(|e| GridError::Parse(e.to_string()))
}
