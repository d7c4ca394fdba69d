//! Session configuration
//!
//! Plain data handed to [`crate::GameSession`] at construction. Nothing in the
//! engine reads global state; embedders build a config (or load one from the
//! environment) and pass it in.

use crate::types::{
    DEFAULT_DROP_INTERVAL_MS, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, SPAWN_ROW, TOP_OUT_ROWS,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub width: usize,
    pub height: usize,
    /// Spawn anchor column (shape top-left corner); None centres it for `width`
    pub spawn_col: Option<i32>,
    /// Spawn anchor row (shape top-left corner)
    pub spawn_row: i32,
    /// Occupied cells in this many top rows end a level-mode game
    pub top_out_rows: usize,
    /// Gravity interval outside level mode
    pub default_drop_interval_ms: u32,
    /// Piece supply seed; None draws one from process entropy
    pub seed: Option<u32>,
    /// Start in level mode on this level (must be unlocked)
    pub start_level: Option<u8>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            spawn_col: None,
            spawn_row: SPAWN_ROW,
            top_out_rows: TOP_OUT_ROWS,
            default_drop_interval_ms: DEFAULT_DROP_INTERVAL_MS,
            seed: None,
            start_level: None,
        }
    }
}

impl SessionConfig {
    /// Load overrides from environment variables
    ///
    /// - `BLOCKFALL_WIDTH`, `BLOCKFALL_HEIGHT`: grid size
    /// - `BLOCKFALL_SEED`: piece supply seed
    /// - `BLOCKFALL_LEVEL`: start in level mode on this level
    /// - `BLOCKFALL_DROP_MS`: drop interval outside level mode
    ///
    /// Missing or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`SessionConfig::from_env`], reading through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
            value.and_then(|s| s.trim().parse().ok())
        }

        let defaults = Self::default();
        Self {
            width: parsed(lookup("BLOCKFALL_WIDTH")).unwrap_or(defaults.width),
            height: parsed(lookup("BLOCKFALL_HEIGHT")).unwrap_or(defaults.height),
            default_drop_interval_ms: parsed(lookup("BLOCKFALL_DROP_MS"))
                .unwrap_or(defaults.default_drop_interval_ms),
            seed: parsed(lookup("BLOCKFALL_SEED")),
            start_level: parsed(lookup("BLOCKFALL_LEVEL")),
            ..defaults
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.start_level = Some(level);
        self
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}
