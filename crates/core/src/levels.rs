//! Levels module - per-level requirements and unlock state
//!
//! Level mode runs levels `1..=max`. Each level has a fixed target score, block
//! quota, and drop interval. A level is won once the quota is placed with the
//! score at or above target, and failed once the quota is placed short of it.
//!
//! Lock state derives from a single "highest level unlocked" counter that the
//! embedding application persists; see `unlock_next`.

use crate::error::CoreError;
use crate::types::{
    DEFAULT_BLOCK_QUOTA, LEVEL_DROP_INTERVALS_MS, LEVEL_TARGET_SCORES, MAX_LEVEL,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelConfig {
    pub id: u8,
    pub target_score: u32,
    pub drop_interval_ms: u32,
    pub block_quota: u32,
    locked: bool,
}

impl LevelConfig {
    /// New level record, locked until the progress counter says otherwise
    pub fn new(id: u8, target_score: u32, drop_interval_ms: u32, block_quota: u32) -> Self {
        Self {
            id,
            target_score,
            drop_interval_ms,
            block_quota,
            locked: true,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

/// Default catalog: levels 1..=10 with rising targets and shrinking intervals
pub fn default_levels() -> Vec<LevelConfig> {
    (0..MAX_LEVEL as usize)
        .map(|i| {
            LevelConfig::new(
                i as u8 + 1,
                LEVEL_TARGET_SCORES[i],
                LEVEL_DROP_INTERVALS_MS[i],
                DEFAULT_BLOCK_QUOTA,
            )
        })
        .collect()
}

/// Counters for the level being played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub level: u8,
    pub blocks_placed: u32,
    pub block_quota: u32,
    pub score_target: u32,
}

impl LevelProgress {
    fn for_level(config: &LevelConfig) -> Self {
        Self {
            level: config.id,
            blocks_placed: 0,
            block_quota: config.block_quota,
            score_target: config.target_score,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LevelRules {
    levels: Vec<LevelConfig>,
    progress: LevelProgress,
    highest_unlocked: u8,
}

impl LevelRules {
    /// Default catalog with the given persisted unlock counter, starting on level 1
    pub fn new(highest_unlocked: u8) -> Self {
        let levels = default_levels();
        let progress = LevelProgress::for_level(&levels[0]);
        let mut rules = Self {
            levels,
            progress,
            highest_unlocked,
        };
        rules.refresh_locks();
        rules
    }

    /// Custom catalog. Ids must run 1, 2, 3, ... in order.
    pub fn with_levels(levels: Vec<LevelConfig>, highest_unlocked: u8) -> Result<Self, CoreError> {
        if levels.is_empty() {
            return Err(CoreError::EmptyLevelCatalog);
        }
        for (index, level) in levels.iter().enumerate() {
            let expected = u8::try_from(index + 1).unwrap_or(u8::MAX);
            if level.id != expected || index >= u8::MAX as usize {
                return Err(CoreError::LevelIdMismatch {
                    index,
                    found: level.id,
                    expected,
                });
            }
        }

        let progress = LevelProgress::for_level(&levels[0]);
        let mut rules = Self {
            levels,
            progress,
            highest_unlocked,
        };
        rules.refresh_locks();
        Ok(rules)
    }

    /// Recompute every locked flag from the unlock counter (level 1 is always open)
    fn refresh_locks(&mut self) {
        self.highest_unlocked = self.highest_unlocked.clamp(1, self.max_level());
        let highest = self.highest_unlocked;
        for level in &mut self.levels {
            level.locked = level.id > highest;
        }
    }

    fn config(&self, id: u8) -> Option<&LevelConfig> {
        if id == 0 {
            return None;
        }
        self.levels.get(id as usize - 1)
    }

    pub fn max_level(&self) -> u8 {
        self.levels.len() as u8
    }

    /// Make `id` the current level and reset its counters
    ///
    /// No-op (returns false) for out-of-range or locked ids.
    pub fn select_level(&mut self, id: u8) -> bool {
        let Some(config) = self.config(id) else {
            return false;
        };
        if config.locked {
            return false;
        }
        self.progress = LevelProgress::for_level(config);
        true
    }

    /// Restart the current level's counters
    pub fn reset(&mut self) {
        if let Some(config) = self.config(self.progress.level) {
            self.progress = LevelProgress::for_level(config);
        }
    }

    /// Count one locked piece towards the quota
    pub fn on_piece_locked(&mut self) {
        self.progress.blocks_placed = self.progress.blocks_placed.saturating_add(1);
    }

    /// Quota exhausted with the score still short of target
    pub fn is_failed(&self, current_score: u32) -> bool {
        self.progress.blocks_placed >= self.progress.block_quota
            && current_score < self.progress.score_target
    }

    /// Quota reached and score at or above target
    pub fn is_complete(&self, current_score: u32, blocks_placed: u32) -> bool {
        blocks_placed >= self.progress.block_quota && current_score >= self.progress.score_target
    }

    /// Unlock the level after the current one
    ///
    /// Returns the new unlock counter when it changed, so the caller can persist it.
    /// Already-unlocked levels and the last level are no-ops.
    pub fn unlock_next(&mut self) -> Option<u8> {
        let next = self.progress.level.checked_add(1)?;
        if next > self.max_level() || next <= self.highest_unlocked {
            return None;
        }
        self.highest_unlocked = next;
        self.refresh_locks();
        Some(next)
    }

    /// Move on to the next level if it exists and is unlocked
    pub fn advance_level(&mut self) -> bool {
        match self.progress.level.checked_add(1) {
            Some(next) => self.select_level(next),
            None => false,
        }
    }

    /// Blocks left before the quota is reached (never negative)
    pub fn remaining_blocks(&self) -> u32 {
        self.progress
            .block_quota
            .saturating_sub(self.progress.blocks_placed)
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.current_config().drop_interval_ms
    }

    pub fn is_max_level(&self) -> bool {
        self.progress.level >= self.max_level()
    }

    /// Out-of-range ids report locked
    pub fn is_locked(&self, id: u8) -> bool {
        self.config(id).map_or(true, LevelConfig::is_locked)
    }

    pub fn current_level(&self) -> u8 {
        self.progress.level
    }

    pub fn current_config(&self) -> &LevelConfig {
        &self.levels[self.progress.level as usize - 1]
    }

    pub fn progress(&self) -> &LevelProgress {
        &self.progress
    }

    pub fn blocks_placed(&self) -> u32 {
        self.progress.blocks_placed
    }

    pub fn score_required(&self) -> u32 {
        self.progress.score_target
    }

    pub fn highest_unlocked(&self) -> u8 {
        self.highest_unlocked
    }

    pub fn levels(&self) -> &[LevelConfig] {
        &self.levels
    }
}

impl Default for LevelRules {
    fn default() -> Self {
        Self::new(1)
    }
}
