//! Pieces module - shape grids and the fixed piece catalog
//!
//! Every piece kind owns a cyclic list of precomputed rotation states. Rotating
//! simply advances to the next entry, so there are no wall kicks and the list
//! length differs per kind (the O piece has a single state).
//!
//! Shape literals below read like the playfield: the first index is the visual
//! row. See [`crate::grid`] for how shape cells map onto grid coordinates.

use arrayvec::ArrayVec;

use crate::error::CoreError;
use crate::types::{Cell, PieceKind, EMPTY};

/// Side length of every shape grid
pub const SHAPE_SIZE: usize = 4;

/// Maximum number of rotation states a piece may carry
pub const MAX_ROTATIONS: usize = 4;

/// One rotation state: a small square grid of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    cells: [[Cell; SHAPE_SIZE]; SHAPE_SIZE],
}

impl Shape {
    pub const fn new(cells: [[Cell; SHAPE_SIZE]; SHAPE_SIZE]) -> Self {
        Self { cells }
    }

    /// Cell at `shape[local_col][local_row]`, None if outside the shape grid
    pub fn get(&self, local_col: usize, local_row: usize) -> Option<Cell> {
        self.cells
            .get(local_col)
            .and_then(|line| line.get(local_row))
            .copied()
    }

    /// Filled cells as `(local_col, local_row, cell)`
    ///
    /// `local_col` is the first axis and is added to the row offset;
    /// `local_row` is the second axis and is added to the column offset.
    pub fn minos(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(local_col, line)| {
            line.iter()
                .enumerate()
                .filter(|(_, cell)| **cell != EMPTY)
                .map(move |(local_row, &cell)| (local_col as i32, local_row as i32, cell))
        })
    }

    /// Raw shape grid
    pub fn cells(&self) -> &[[Cell; SHAPE_SIZE]; SHAPE_SIZE] {
        &self.cells
    }

    /// Whether any cell lies on the second-axis index 0 (the leftmost board column)
    pub fn touches_left_edge(&self) -> bool {
        self.cells.iter().any(|line| line[0] != EMPTY)
    }
}

const I_SHAPES: [Shape; 2] = [
    Shape::new([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
    Shape::new([[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]]),
];

const J_SHAPES: [Shape; 4] = [
    Shape::new([[2, 0, 0, 0], [2, 2, 2, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    Shape::new([[0, 2, 2, 0], [0, 2, 0, 0], [0, 2, 0, 0], [0, 0, 0, 0]]),
    Shape::new([[0, 0, 0, 0], [2, 2, 2, 0], [0, 0, 2, 0], [0, 0, 0, 0]]),
    Shape::new([[0, 2, 0, 0], [0, 2, 0, 0], [2, 2, 0, 0], [0, 0, 0, 0]]),
];

const L_SHAPES: [Shape; 4] = [
    Shape::new([[0, 0, 3, 0], [3, 3, 3, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    Shape::new([[0, 3, 0, 0], [0, 3, 0, 0], [0, 3, 3, 0], [0, 0, 0, 0]]),
    Shape::new([[0, 0, 0, 0], [3, 3, 3, 0], [3, 0, 0, 0], [0, 0, 0, 0]]),
    Shape::new([[3, 3, 0, 0], [0, 3, 0, 0], [0, 3, 0, 0], [0, 0, 0, 0]]),
];

const O_SHAPES: [Shape; 1] = [Shape::new([
    [0, 0, 0, 0],
    [0, 4, 4, 0],
    [0, 4, 4, 0],
    [0, 0, 0, 0],
])];

const S_SHAPES: [Shape; 2] = [
    Shape::new([[0, 5, 5, 0], [5, 5, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    Shape::new([[5, 0, 0, 0], [5, 5, 0, 0], [0, 5, 0, 0], [0, 0, 0, 0]]),
];

const T_SHAPES: [Shape; 4] = [
    Shape::new([[0, 6, 0, 0], [6, 6, 6, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    Shape::new([[0, 6, 0, 0], [0, 6, 6, 0], [0, 6, 0, 0], [0, 0, 0, 0]]),
    Shape::new([[0, 0, 0, 0], [6, 6, 6, 0], [0, 6, 0, 0], [0, 0, 0, 0]]),
    Shape::new([[0, 6, 0, 0], [6, 6, 0, 0], [0, 6, 0, 0], [0, 0, 0, 0]]),
];

const Z_SHAPES: [Shape; 2] = [
    Shape::new([[7, 7, 0, 0], [0, 7, 7, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    Shape::new([[0, 7, 0, 0], [7, 7, 0, 0], [7, 0, 0, 0], [0, 0, 0, 0]]),
];

/// Precomputed rotation cycle for a piece kind
pub fn rotations(kind: PieceKind) -> &'static [Shape] {
    match kind {
        PieceKind::I => &I_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::L => &L_SHAPES,
        PieceKind::O => &O_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::T => &T_SHAPES,
        PieceKind::Z => &Z_SHAPES,
    }
}

/// Default (spawn) orientation of a piece kind
pub fn spawn_shape(kind: PieceKind) -> Shape {
    rotations(kind)[0]
}

/// A piece kind together with its ordered, non-empty rotation cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    shapes: ArrayVec<Shape, MAX_ROTATIONS>,
}

impl Piece {
    /// Catalog piece for `kind`
    pub fn new(kind: PieceKind) -> Self {
        let shapes = rotations(kind).iter().copied().collect();
        Self { kind, shapes }
    }

    /// Piece with a custom rotation cycle. Fails fast on an empty or oversized list.
    pub fn with_shapes(kind: PieceKind, shapes: &[Shape]) -> Result<Self, CoreError> {
        if shapes.is_empty() {
            return Err(CoreError::EmptyRotations(kind));
        }
        if shapes.len() > MAX_ROTATIONS {
            return Err(CoreError::TooManyRotations {
                kind,
                count: shapes.len(),
                max: MAX_ROTATIONS,
            });
        }
        Ok(Self {
            kind,
            shapes: shapes.iter().copied().collect(),
        })
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Number of rotation states in the cycle (always at least 1)
    pub fn rotation_count(&self) -> usize {
        self.shapes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shape_has_four_minos() {
        for kind in PieceKind::ALL {
            for shape in rotations(kind) {
                assert_eq!(shape.minos().count(), 4, "{:?}", kind);
            }
        }
    }

    #[test]
    fn test_shape_cells_use_piece_color() {
        for kind in PieceKind::ALL {
            for shape in rotations(kind) {
                assert!(shape.minos().all(|(_, _, cell)| cell == kind.color()));
            }
        }
    }

    #[test]
    fn test_rotation_counts() {
        assert_eq!(rotations(PieceKind::I).len(), 2);
        assert_eq!(rotations(PieceKind::O).len(), 1);
        assert_eq!(rotations(PieceKind::S).len(), 2);
        assert_eq!(rotations(PieceKind::Z).len(), 2);
        assert_eq!(rotations(PieceKind::J).len(), 4);
        assert_eq!(rotations(PieceKind::L).len(), 4);
        assert_eq!(rotations(PieceKind::T).len(), 4);
    }

    #[test]
    fn test_minos_axis_order() {
        // Horizontal I bar: every filled cell sits on first-axis index 1.
        let shape = spawn_shape(PieceKind::I);
        let minos: Vec<_> = shape.minos().collect();
        assert_eq!(minos, vec![(1, 0, 1), (1, 1, 1), (1, 2, 1), (1, 3, 1)]);
    }

    #[test]
    fn test_with_shapes_rejects_empty_list() {
        assert_eq!(
            Piece::with_shapes(PieceKind::T, &[]),
            Err(CoreError::EmptyRotations(PieceKind::T))
        );
    }

    #[test]
    fn test_with_shapes_rejects_oversized_list() {
        let shapes = [spawn_shape(PieceKind::T); 5];
        assert!(matches!(
            Piece::with_shapes(PieceKind::T, &shapes),
            Err(CoreError::TooManyRotations { count: 5, .. })
        ));
    }

    #[test]
    fn test_get_out_of_range() {
        let shape = spawn_shape(PieceKind::O);
        assert_eq!(shape.get(1, 1), Some(4));
        assert_eq!(shape.get(4, 0), None);
    }
}
