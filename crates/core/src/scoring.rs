//! Scoring module - running score counter and bonus rules
//!
//! - A successful user-initiated down step earns `SOFT_DROP_SCORE`.
//! - Clearing `n` rows in one step earns `BASE_MULTIPLIER * n²`, so multi-row
//!   clears always beat the same rows cleared one at a time.

use crate::types::{CommandSource, BASE_MULTIPLIER, SOFT_DROP_SCORE};

/// Non-negative score that only grows during a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    value: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, points: u32) {
        self.value = self.value.saturating_add(points);
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }

    pub fn value(&self) -> u32 {
        self.value
    }
}

/// Calculate line clear bonus
/// lines: number of rows removed in a single step
pub fn calculate_line_score(lines: usize) -> u32 {
    let lines = lines.min(u32::MAX as usize) as u32;
    BASE_MULTIPLIER.saturating_mul(lines.saturating_mul(lines))
}

/// Calculate the bonus for a successful down step
/// Only player-initiated steps score; gravity ticks are free.
pub fn calculate_drop_score(source: CommandSource) -> u32 {
    match source {
        CommandSource::User => SOFT_DROP_SCORE,
        CommandSource::Timer => 0,
    }
}
