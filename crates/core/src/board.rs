//! Board module - owns the grid, the active piece, and the running score
//!
//! The board composes the grid algorithms, piece supply, and rotation cursor into
//! move/rotate/merge/clear/spawn operations. It is the single owner of the active
//! piece; everything else reads it through [`Board::snapshot`].
//!
//! Every move is test-then-apply: a rejected move leaves all state unchanged.
//! Offsets are the shape's top-left anchor as (col, row), row 0 at the top.

use crate::error::CoreError;
use crate::grid::{detect_full_rows, intersects, merge, ClearResult, Grid};
use crate::pieces::{spawn_shape, Piece, Shape, SHAPE_SIZE};
use crate::rng::PieceSupply;
use crate::rotation::RotationCursor;
use crate::scoring::Score;
use crate::snapshot::{ActiveSnapshot, ViewSnapshot};
use crate::types::{PieceKind, SPAWN_ROW};

/// The falling piece: its rotation state and grid offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    cursor: RotationCursor,
    col: i32,
    row: i32,
}

impl ActivePiece {
    pub fn kind(&self) -> PieceKind {
        self.cursor.kind()
    }

    pub fn rotation(&self) -> usize {
        self.cursor.index()
    }

    pub fn shape(&self) -> &Shape {
        self.cursor.current_shape()
    }

    pub fn col(&self) -> i32 {
        self.col
    }

    pub fn row(&self) -> i32 {
        self.row
    }
}

/// Spawn column that centres a shape box on a grid of `width` columns
///
/// Equals `SPAWN_COLUMN` on the default 10-wide grid and never lets a full-width
/// shape box cross the right wall when the grid is at least `SHAPE_SIZE` wide.
pub fn spawn_column_for(width: usize) -> i32 {
    let width = width.min(i32::MAX as usize) as i32;
    (width / 2 - 1).min(width - SHAPE_SIZE as i32).max(0)
}

#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    supply: PieceSupply,
    active: Option<ActivePiece>,
    score: Score,
    spawn_anchor: (i32, i32),
}

impl Board {
    /// Create an empty board. No piece is active until [`Board::spawn`].
    ///
    /// The spawn anchor is centred for `width` (see [`spawn_column_for`]).
    pub fn new(width: usize, height: usize, supply: PieceSupply) -> Result<Self, CoreError> {
        Ok(Self {
            grid: Grid::new(width, height)?,
            supply,
            active: None,
            score: Score::new(),
            spawn_anchor: (spawn_column_for(width), SPAWN_ROW),
        })
    }

    /// Override the spawn anchor (shape top-left corner, as col/row)
    pub fn with_spawn_anchor(mut self, col: i32, row: i32) -> Self {
        self.spawn_anchor = (col, row);
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Swap in a prepared grid. Returns false (and keeps the old grid) if the
    /// dimensions differ.
    pub fn replace_grid(&mut self, grid: Grid) -> bool {
        if grid.width() != self.grid.width() || grid.height() != self.grid.height() {
            return false;
        }
        self.grid = grid;
        true
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn score_mut(&mut self) -> &mut Score {
        &mut self.score
    }

    pub fn spawn_anchor(&self) -> (i32, i32) {
        self.spawn_anchor
    }

    /// Kind the next spawn will use
    pub fn peek_next(&self) -> PieceKind {
        self.supply.peek_next()
    }

    /// Move the active piece by (dcol, drow) if the target is free
    fn try_offset(&mut self, dcol: i32, drow: i32) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        let col = active.col + dcol;
        let row = active.row + drow;
        if intersects(&self.grid, active.cursor.current_shape(), col, row) {
            return false;
        }

        active.col = col;
        active.row = row;
        true
    }

    pub fn move_down(&mut self) -> bool {
        self.try_offset(0, 1)
    }

    pub fn move_left(&mut self) -> bool {
        self.try_offset(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_offset(1, 0)
    }

    /// Advance to the next rotation state at the same offset, if it fits
    pub fn rotate(&mut self) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        let preview = active.cursor.preview_next();
        if intersects(&self.grid, &preview.shape, active.col, active.row) {
            return false;
        }

        active.cursor.commit(preview.index);
        true
    }

    /// Draw the next piece and place it at the spawn anchor
    ///
    /// Returns true when the spawn position already collides (no playable space
    /// left). The piece stays active either way so it can still be displayed.
    pub fn spawn(&mut self) -> bool {
        let kind = self.supply.next();
        self.spawn_piece(Piece::new(kind))
    }

    /// Place a specific piece at the spawn anchor, bypassing the supply
    pub fn spawn_piece(&mut self, piece: Piece) -> bool {
        let (col, row) = self.spawn_anchor;
        let cursor = match self.active.take() {
            Some(mut previous) => {
                previous.cursor.set_piece(piece);
                previous.cursor
            }
            None => RotationCursor::new(piece),
        };
        let blocked = intersects(&self.grid, cursor.current_shape(), col, row);
        self.active = Some(ActivePiece { cursor, col, row });
        blocked
    }

    /// Commit the active piece into the grid at its current offset
    ///
    /// Cells outside the grid are dropped. Returns false if no piece was active.
    pub fn merge_active_piece(&mut self) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };
        self.grid = merge(&self.grid, active.cursor.current_shape(), active.col, active.row);
        true
    }

    /// Remove full rows and install the compacted grid
    pub fn clear_full_rows(&mut self) -> ClearResult {
        let result = detect_full_rows(&self.grid);
        self.grid = result.grid.clone();
        result
    }

    /// Whether the stack has reached into the topmost `rows` rows
    pub fn is_topped_out(&self, rows: usize) -> bool {
        self.grid.has_blocks_in_top_rows(rows)
    }

    /// Empty the grid, zero the score, and spawn a fresh piece
    ///
    /// Safe to call at any point, including mid-drop. Returns the spawn-blocked flag.
    pub fn reset_for_new_game(&mut self) -> bool {
        self.grid.clear();
        self.score.reset();
        self.active = None;
        self.spawn()
    }

    /// Row the active piece would come to rest on if dropped straight down
    pub fn landing_row(&self) -> Option<i32> {
        let active = self.active.as_ref()?;
        let shape = active.cursor.current_shape();
        let limit = (self.grid.height() + SHAPE_SIZE) as i32;

        let mut row = active.row;
        while row - active.row < limit && !intersects(&self.grid, shape, active.col, row + 1) {
            row += 1;
        }
        Some(row)
    }

    /// Read-only view for renderers: active piece, landing row, and next preview
    pub fn snapshot(&self) -> ViewSnapshot {
        let next_kind = self.supply.peek_next();
        ViewSnapshot {
            active: self.active.as_ref().map(|active| ActiveSnapshot {
                kind: active.kind(),
                rotation: active.rotation(),
                shape: *active.shape(),
                col: active.col,
                row: active.row,
                landing_row: self.landing_row().unwrap_or(active.row),
            }),
            next_kind,
            next_shape: spawn_shape(next_kind),
        }
    }
}
