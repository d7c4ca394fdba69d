use crate::pieces::Shape;
use crate::types::PieceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: usize,
    pub shape: Shape,
    pub col: i32,
    pub row: i32,
    /// Row the piece would rest on after a straight drop (ghost position)
    pub landing_row: i32,
}

/// Everything a renderer needs to draw the active piece and the next preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewSnapshot {
    pub active: Option<ActiveSnapshot>,
    pub next_kind: PieceKind,
    /// Default orientation of the upcoming piece
    pub next_shape: Shape,
}

impl ViewSnapshot {
    pub fn has_active(&self) -> bool {
        self.active.is_some()
    }

    /// Active piece offset as (col, row)
    pub fn offset(&self) -> Option<(i32, i32)> {
        self.active.map(|a| (a.col, a.row))
    }
}
