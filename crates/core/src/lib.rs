//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the block-stacking rules: grid algorithms, the piece
//! catalog and supply, rotation state, the board, scoring, and level progression.
//! It has **no dependencies** on rendering, input devices, timers, or storage:
//!
//! - **Deterministic**: A seeded supply replays the same game exactly
//! - **Testable**: Every rule is a plain function or method with unit tests
//! - **Portable**: Runs headless, in a terminal, or behind any GUI
//!
//! # Module Structure
//!
//! - [`grid`]: Playfield storage plus collision, merge, and full-row clearing
//! - [`pieces`]: The seven shapes and their precomputed rotation cycles
//! - [`rng`]: Piece supply with a one-ahead preview
//! - [`rotation`]: Rotation cursor with non-mutating preview
//! - [`board`]: Owns the grid, active piece, and score; composes the above
//! - [`scoring`]: Score counter and bonus rules
//! - [`levels`]: Level catalog, unlock state, and win/fail evaluation
//! - [`snapshot`]: Read-only view data for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Board, PieceSupply};
//!
//! let mut board = Board::new(10, 20, PieceSupply::new(12345)).unwrap();
//! assert!(!board.spawn()); // an empty grid never blocks the spawn
//!
//! board.move_left();
//! board.rotate();
//! while board.move_down() {}
//! board.merge_active_piece();
//!
//! let cleared = board.clear_full_rows();
//! assert_eq!(cleared.lines_removed, 0);
//! assert_eq!(board.grid().filled_count(), 4);
//! ```

pub mod board;
pub mod error;
pub mod grid;
pub mod levels;
pub mod pieces;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{spawn_column_for, ActivePiece, Board};
pub use error::CoreError;
pub use grid::{detect_full_rows, intersects, merge, ClearResult, Grid};
pub use levels::{default_levels, LevelConfig, LevelProgress, LevelRules};
pub use pieces::{rotations, spawn_shape, Piece, Shape};
pub use rng::{PieceSupply, SimpleRng};
pub use rotation::{RotationCursor, RotationPreview};
pub use scoring::{calculate_drop_score, calculate_line_score, Score};
pub use snapshot::{ActiveSnapshot, ViewSnapshot};
