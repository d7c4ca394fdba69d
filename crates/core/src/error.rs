//! Construction errors
//!
//! Gameplay never fails: rejected moves are plain `false` results. These errors
//! only surface when building grids, pieces, supplies, or level catalogs from
//! malformed inputs.

use crate::types::{PieceKind, MAX_GRID_DIMENSION};

#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
pub enum CoreError {
    #[error("grid dimensions {width}x{height} out of range (1..={MAX_GRID_DIMENSION})")]
    InvalidDimensions { width: usize, height: usize },
    #[error("grid row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("piece {0:?} has no rotation states")]
    EmptyRotations(PieceKind),
    #[error("piece {kind:?} has {count} rotation states, at most {max} are supported")]
    TooManyRotations {
        kind: PieceKind,
        count: usize,
        max: usize,
    },
    #[error("piece sequence must not be empty")]
    EmptySequence,
    #[error("level catalog must not be empty")]
    EmptyLevelCatalog,
    #[error("level at position {index} has id {found}, expected {expected}")]
    LevelIdMismatch { index: usize, found: u8, expected: u8 },
}
