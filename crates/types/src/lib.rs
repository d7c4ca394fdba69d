//! Shared types module - plain data structures and gameplay constants
//!
//! Everything here is pure data with no external dependencies, so it can be used
//! by the core rules, the session orchestrator, and any embedding frontend.
//!
//! # Grid Dimensions
//!
//! The default playfield is 10 columns by 20 rows. Row 0 is the top of the grid,
//! so pieces fall towards larger row indices. Pieces spawn with their shape's
//! top-left anchor at column 4, row 0.
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_MULTIPLIER` | 50 | Line clear bonus is `BASE_MULTIPLIER * lines²` |
//! | `SOFT_DROP_SCORE` | 1 | Bonus for a user-initiated down step |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//! assert_eq!(kind.color(), 6);
//!
//! let command = Command::from_str("hardDrop").unwrap();
//! assert_eq!(command, Command::HardDrop);
//!
//! assert_eq!(DEFAULT_GRID_WIDTH, 10);
//! assert_eq!(DEFAULT_GRID_HEIGHT, 20);
//! ```

/// Default grid width in cells (10 columns)
pub const DEFAULT_GRID_WIDTH: usize = 10;

/// Default grid height in cells (20 rows)
pub const DEFAULT_GRID_HEIGHT: usize = 20;

/// Largest accepted grid dimension on either axis
pub const MAX_GRID_DIMENSION: usize = 256;

/// Spawn anchor column (shape top-left corner)
pub const SPAWN_COLUMN: i32 = 4;

/// Spawn anchor row (shape top-left corner)
pub const SPAWN_ROW: i32 = 0;

/// Number of rows at the top of the grid that signal a top-out when occupied
pub const TOP_OUT_ROWS: usize = 3;

/// Line clear bonus multiplier, applied to the square of the cleared row count
pub const BASE_MULTIPLIER: u32 = 50;

/// Score awarded for a successful user-initiated down step
pub const SOFT_DROP_SCORE: u32 = 1;

/// Drop interval used outside level mode (milliseconds per row)
pub const DEFAULT_DROP_INTERVAL_MS: u32 = 400;

/// Highest level in the default level catalog
pub const MAX_LEVEL: u8 = 10;

/// Blocks that must be placed per level in the default catalog
pub const DEFAULT_BLOCK_QUOTA: u32 = 50;

/// Target score per level (index 0 = level 1)
pub const LEVEL_TARGET_SCORES: [u32; MAX_LEVEL as usize] =
    [500, 800, 1000, 1500, 3000, 4000, 5000, 6000, 7000, 8000];

/// Drop interval per level in milliseconds (index 0 = level 1)
pub const LEVEL_DROP_INTERVALS_MS: [u32; MAX_LEVEL as usize] =
    [400, 380, 360, 340, 320, 300, 280, 260, 240, 200];

/// A cell on the grid
///
/// - `0`: empty
/// - `1..=7`: occupied, value is the color id of the piece that filled it
pub type Cell = u8;

/// The empty cell value
pub const EMPTY: Cell = 0;

/// The seven piece kinds
///
/// Each kind maps to a fixed color id used for the cells it fills:
/// I=1, J=2, L=3, O=4, S=5, T=6, Z=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All piece kinds, in color id order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Map an index in `0..7` to a piece kind (wraps for larger values)
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Color id written into grid cells by this piece
    pub fn color(&self) -> Cell {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

/// Discrete commands accepted by a game session
///
/// Left, right and rotate never merge a piece. Only a failed downward step
/// locks the piece, clears rows, and evaluates level rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move piece one cell left
    Left,
    /// Move piece one cell right
    Right,
    /// Advance to the next rotation state
    Rotate,
    /// Advance one step down (locks the piece when it cannot move)
    Down,
    /// Repeat down steps until the piece locks
    HardDrop,
}

impl Command {
    /// Parse command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("left"), Some(Command::Left));
    /// assert_eq!(Command::from_str("HardDrop"), Some(Command::HardDrop));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Command::Left),
            "right" => Some(Command::Right),
            "rotate" => Some(Command::Rotate),
            "down" => Some(Command::Down),
            "harddrop" => Some(Command::HardDrop),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Left => "left",
            Command::Right => "right",
            Command::Rotate => "rotate",
            Command::Down => "down",
            Command::HardDrop => "hardDrop",
        }
    }
}

/// Origin of a command
///
/// Only `User` down steps earn the soft-drop bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandSource {
    /// Explicit player input
    User,
    /// Automatic gravity tick
    Timer,
}
