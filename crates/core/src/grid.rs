//! Grid module - the playfield and the pure algorithms that operate on it
//!
//! The grid is a fixed `width x height` array of color-coded cells stored flat in
//! row-major order. Row 0 is the top. Cell `0` is empty, anything else is an
//! opaque color id.
//!
//! # Shape coordinates
//!
//! Collision and merge share one mapping from a shape cell to the grid:
//! a shape cell `shape[local_col][local_row]` lands at
//!
//! ```text
//! board_col = offset_col + local_row
//! board_row = offset_row + local_col
//! ```
//!
//! so the first shape axis follows the vertical offset and the second follows the
//! horizontal offset. [`Shape::minos`] is the single place that yields cells in
//! this convention; both [`intersects`] and [`merge`] go through it.

use crate::error::CoreError;
use crate::pieces::Shape;
use crate::types::{Cell, EMPTY, MAX_GRID_DIMENSION};

/// The playfield - `width` columns by `height` rows using flat storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid. Fails fast on zero or oversized dimensions.
    pub fn new(width: usize, height: usize) -> Result<Self, CoreError> {
        if width == 0 || height == 0 || width > MAX_GRID_DIMENSION || height > MAX_GRID_DIMENSION
        {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        })
    }

    /// Build a grid from explicit rows (top row first)
    pub fn from_rows(rows: &[Vec<Cell>]) -> Result<Self, CoreError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut grid = Self::new(width, height)?;
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(CoreError::RaggedRows {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
            grid.cells[row * width..(row + 1) * width].copy_from_slice(cells);
        }
        Ok(grid)
    }

    /// Calculate flat index from (col, row), None when out of bounds
    #[inline(always)]
    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(row * self.width + col)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at (col, row). Returns None if out of bounds
    pub fn get(&self, col: i32, row: i32) -> Option<Cell> {
        self.index(col, row).map(|idx| self.cells[idx])
    }

    /// Set cell at (col, row). Returns false if out of bounds
    pub fn set(&mut self, col: i32, row: i32, cell: Cell) -> bool {
        match self.index(col, row) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if (col, row) is inside the grid and filled
    pub fn is_occupied(&self, col: i32, row: i32) -> bool {
        matches!(self.get(col, row), Some(cell) if cell != EMPTY)
    }

    /// Cells of one row. Panics if `row >= height`
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.width)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        row < self.height && self.row(row).iter().all(|&cell| cell != EMPTY)
    }

    /// Whether any cell within the topmost `rows` rows is filled
    pub fn has_blocks_in_top_rows(&self, rows: usize) -> bool {
        let end = rows.min(self.height) * self.width;
        self.cells[..end].iter().any(|&cell| cell != EMPTY)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == EMPTY)
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != EMPTY).count()
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert to 2D rows (top row first)
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(<[Cell]>::to_vec).collect()
    }
}

/// Outcome of a full-row scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearResult {
    /// Number of rows removed
    pub lines_removed: usize,
    /// Grid after compaction (emptied rows at the top)
    pub grid: Grid,
    /// Removed row indices in the original grid, top to bottom
    pub cleared_rows: Vec<usize>,
}

/// Test whether `shape` placed at (`col`, `row`) collides
///
/// A filled shape cell collides when it lands left of column 0, at or right of
/// `width`, at or below `height`, or on a filled grid cell. Cells above row 0 are
/// allowed so pieces can spawn partially hidden.
pub fn intersects(grid: &Grid, shape: &Shape, col: i32, row: i32) -> bool {
    let width = grid.width() as i32;
    let height = grid.height() as i32;

    shape.minos().any(|(local_col, local_row, _)| {
        let board_col = col + local_row;
        let board_row = row + local_col;

        if board_col < 0 || board_col >= width || board_row >= height {
            return true;
        }
        board_row >= 0 && grid.is_occupied(board_col, board_row)
    })
}

/// Return a copy of `grid` with `shape` written in at (`col`, `row`)
///
/// Shape cells that land outside the grid on any side are skipped, so this never
/// writes out of bounds no matter where the piece has drifted.
pub fn merge(grid: &Grid, shape: &Shape, col: i32, row: i32) -> Grid {
    let mut merged = grid.clone();
    for (local_col, local_row, cell) in shape.minos() {
        // `set` rejects out-of-bounds targets
        merged.set(col + local_row, row + local_col, cell);
    }
    merged
}

/// Remove every full row and bottom-pack the rest
///
/// Uses a two-pointer scan from the bottom up. Surviving rows keep their relative
/// order; the reported indices refer to the grid as it was before compaction.
pub fn detect_full_rows(grid: &Grid) -> ClearResult {
    let mut compacted = grid.clone();
    let mut cleared_rows = Vec::new();
    let width = grid.width();
    let mut write_row = grid.height();

    for read_row in (0..grid.height()).rev() {
        if grid.is_row_full(read_row) {
            cleared_rows.push(read_row);
        } else {
            write_row -= 1;
            if write_row != read_row {
                let src = read_row * width;
                compacted
                    .cells
                    .copy_within(src..src + width, write_row * width);
            }
        }
    }

    compacted.cells[..write_row * width].fill(EMPTY);

    // Collected bottom to top
    cleared_rows.reverse();
    ClearResult {
        lines_removed: cleared_rows.len(),
        grid: compacted,
        cleared_rows,
    }
}
