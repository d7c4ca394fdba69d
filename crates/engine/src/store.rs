//! Persistence contract for high scores and unlock progress
//!
//! The session only calls these four methods and never waits on or retries a
//! failure. Loads return a best-effort default when storage is unavailable;
//! saves are fire-and-forget.

/// Durable storage for the two values that outlive a game
pub trait ProgressStore {
    /// Stored high score, 0 when nothing usable is stored
    fn load_high_score(&self) -> u32;
    fn save_high_score(&mut self, score: u32);
    /// Highest level unlocked, 1 when nothing usable is stored
    fn load_unlock_progress(&self) -> u8;
    fn save_unlock_progress(&mut self, level: u8);
}

impl<T: ProgressStore + ?Sized> ProgressStore for Box<T> {
    fn load_high_score(&self) -> u32 {
        (**self).load_high_score()
    }

    fn save_high_score(&mut self, score: u32) {
        (**self).save_high_score(score)
    }

    fn load_unlock_progress(&self) -> u8 {
        (**self).load_unlock_progress()
    }

    fn save_unlock_progress(&mut self, level: u8) {
        (**self).save_unlock_progress(level)
    }
}

/// In-process store, used for tests and sessions that persist nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryStore {
    pub high_score: u32,
    pub highest_unlocked: u8,
    /// Number of save calls received
    pub saves: u32,
}

impl MemoryStore {
    pub fn new(high_score: u32, highest_unlocked: u8) -> Self {
        Self {
            high_score,
            highest_unlocked,
            saves: 0,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

impl ProgressStore for MemoryStore {
    fn load_high_score(&self) -> u32 {
        self.high_score
    }

    fn save_high_score(&mut self, score: u32) {
        self.high_score = score;
        self.saves += 1;
    }

    fn load_unlock_progress(&self) -> u8 {
        self.highest_unlocked
    }

    fn save_unlock_progress(&mut self, level: u8) {
        self.highest_unlocked = level;
        self.saves += 1;
    }
}
