//! The immutable warehouse grid.
//!
//! # Data layout
//!
//! Cell kinds are stored row-major in a single `Vec<CellKind>`; the index of
//! cell `(r, c)` is `r * width + c`.  The grid is constructed once from the
//! layout artifact and never mutated during a run, so it can be shared
//! freely by reference.

use gf_core::Cell;

use crate::{GridError, GridResult};

// ── CellKind ─────────────────────────────────────────────────────────────────

/// Static classification of a grid cell.
///
/// The discriminants match the integer codes of the `layout.csv` artifact.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum CellKind {
    /// Open floor.
    Free = 0,
    /// Storage shelf anchor.  Not traversable except for its target robot,
    /// or for anyone while the shelf is away on a robot's back.
    Shelf = 1,
    /// Consolidation station dock.  Traversable; unbounded capacity.
    Station = 2,
    /// Robot spawn point.  Traversable.
    Spawn = 3,
    /// Permanent obstruction (wall, pillar).
    Obstacle = 4,
}

impl CellKind {
    /// Decode a layout artifact cell code.
    pub fn from_code(code: u8) -> Option<CellKind> {
        match code {
            0 => Some(CellKind::Free),
            1 => Some(CellKind::Shelf),
            2 => Some(CellKind::Station),
            3 => Some(CellKind::Spawn),
            4 => Some(CellKind::Obstacle),
            _ => None,
        }
    }

    /// The integer code used in the layout artifact.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// `true` if any robot may stand here regardless of assignment state.
    #[inline]
    pub fn is_open(self) -> bool {
        matches!(self, CellKind::Free | CellKind::Station | CellKind::Spawn)
    }
}

// ── Grid ─────────────────────────────────────────────────────────────────────

/// Immutable rectangular grid of cell kinds.
#[derive(Debug)]
pub struct Grid {
    width: u32,
    height: u32,
    kinds: Vec<CellKind>,
}

impl Grid {
    /// Build a grid from raw artifact rows (outer = rows, inner = columns).
    ///
    /// Validates that the rows form a non-empty rectangle and that every
    /// code is a known [`CellKind`].
    pub fn from_rows(rows: &[Vec<u8>]) -> GridResult<Grid> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(GridError::EmptyGrid);
        }

        let mut kinds = Vec::with_capacity(width * height);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::NotRectangular { row: r, got: row.len(), expected: width });
            }
            for (c, &code) in row.iter().enumerate() {
                let kind = CellKind::from_code(code)
                    .ok_or(GridError::UnknownCode { row: r, col: c, code })?;
                kinds.push(kind);
            }
        }

        Ok(Grid { width: width as u32, height: height as u32, kinds })
    }

    /// Build directly from kinds (test fixtures and generators).
    ///
    /// `kinds.len()` must equal `width * height`.
    pub fn from_kinds(width: u32, height: u32, kinds: Vec<CellKind>) -> GridResult<Grid> {
        if width == 0 || height == 0 || kinds.len() != (width as usize) * (height as usize) {
            return Err(GridError::EmptyGrid);
        }
        Ok(Grid { width, height, kinds })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells (`width * height`).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.kinds.len()
    }

    // ── Cell queries ──────────────────────────────────────────────────────

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    /// Row-major index of `cell`.  The cell must be in bounds.
    #[inline]
    pub fn index(&self, cell: Cell) -> usize {
        debug_assert!(self.in_bounds(cell));
        (cell.row * self.width + cell.col) as usize
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn cell_at(&self, index: usize) -> Cell {
        Cell::new(index as u32 / self.width, index as u32 % self.width)
    }

    /// Kind of an in-bounds cell.
    #[inline]
    pub fn kind(&self, cell: Cell) -> CellKind {
        self.kinds[self.index(cell)]
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// The in-bounds 4-connected neighbors of `cell`, in deterministic
    /// north, south, west, east order.
    pub fn neighbors4(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        let Cell { row, col } = cell;
        let candidates = [
            (row.checked_sub(1), Some(col)),
            (row.checked_add(1), Some(col)),
            (Some(row), col.checked_sub(1)),
            (Some(row), col.checked_add(1)),
        ];
        candidates
            .into_iter()
            .filter_map(|(r, c)| Some(Cell::new(r?, c?)))
            .filter(|&n| self.in_bounds(n))
    }
}
