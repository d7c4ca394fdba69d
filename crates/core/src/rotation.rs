//! Rotation cursor - tracks the active piece's rotation index
//!
//! Rotation is test-then-apply: [`RotationCursor::preview_next`] computes the next
//! state without touching the cursor, the caller checks it for collisions, and only
//! then calls [`RotationCursor::commit`].

use crate::pieces::{Piece, Shape};
use crate::types::PieceKind;

/// Candidate rotation state returned by a preview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPreview {
    pub shape: Shape,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationCursor {
    piece: Piece,
    index: usize,
}

impl RotationCursor {
    pub fn new(piece: Piece) -> Self {
        Self { piece, index: 0 }
    }

    /// Replace the piece and reset to its default orientation
    pub fn set_piece(&mut self, piece: Piece) {
        self.piece = piece;
        self.index = 0;
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn kind(&self) -> PieceKind {
        self.piece.kind()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current_shape(&self) -> &Shape {
        &self.piece.shapes()[self.index]
    }

    /// Next state in the cycle, without mutating the cursor
    pub fn preview_next(&self) -> RotationPreview {
        let index = (self.index + 1) % self.piece.rotation_count();
        RotationPreview {
            shape: self.piece.shapes()[index],
            index,
        }
    }

    /// Apply a rotation index (wrapped into the cycle)
    pub fn commit(&mut self, index: usize) {
        self.index = index % self.piece.rotation_count();
    }
}
