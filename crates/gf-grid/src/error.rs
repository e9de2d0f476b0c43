//! Error types for gf-grid.

use gf_core::Cell;
use thiserror::Error;

use crate::grid::CellKind;

/// Errors raised while building or loading the static world.
///
/// All of these are fatal at init time: a malformed scenario never reaches
/// the scheduler.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("layout row {row} has {got} columns, expected {expected}")]
    NotRectangular { row: usize, got: usize, expected: usize },

    #[error("layout has no cells")]
    EmptyGrid,

    #[error("unknown cell code {code} at row {row}, col {col}")]
    UnknownCode { row: usize, col: usize, code: u8 },

    #[error("{what} {id} cell {cell} is outside the {width}x{height} grid")]
    OutOfBounds { what: &'static str, id: u32, cell: Cell, width: u32, height: u32 },

    #[error("{what} {id} cell {cell} has kind {found:?}, expected {expected:?}")]
    KindMismatch { what: &'static str, id: u32, cell: Cell, expected: CellKind, found: CellKind },

    #[error("duplicate {what} id {id}")]
    DuplicateId { what: &'static str, id: u32 },

    #[error("duplicate {what} cell {cell}")]
    DuplicateCell { what: &'static str, cell: Cell },

    #[error("in {file}: {source}")]
    InFile {
        file: String,
        #[source]
        source: Box<GridError>,
    },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GridError {
    /// Attach the artifact file name to an error bubbling out of a loader.
    pub fn in_file(self, file: impl Into<String>) -> GridError {
        GridError::InFile { file: file.into(), source: Box::new(self) }
    }
}

/// Shorthand result type for gf-grid.
pub type GridResult<T> = Result<T, GridError>;
