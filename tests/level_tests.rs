//! Level rules tests - gating, unlocks, and the default catalog

use blockfall::core::{LevelConfig, LevelRules};
use blockfall::types::MAX_LEVEL;

fn place(rules: &mut LevelRules, blocks: u32) {
    for _ in 0..blocks {
        rules.on_piece_locked();
    }
}

#[test]
fn test_new_rules_start_on_level_one() {
    let rules = LevelRules::default();
    assert_eq!(rules.current_level(), 1);
    assert_eq!(rules.blocks_placed(), 0);
    assert_eq!(rules.remaining_blocks(), 50);
    assert_eq!(rules.score_required(), 500);
    assert_eq!(rules.max_level(), MAX_LEVEL);
    assert!(!rules.is_max_level());
}

#[test]
fn test_failed_only_after_quota() {
    let mut rules = LevelRules::default();
    place(&mut rules, 49);
    assert!(!rules.is_failed(0));

    place(&mut rules, 1);
    assert!(rules.is_failed(499));
    assert!(!rules.is_failed(500));
}

#[test]
fn test_complete_needs_quota_and_score() {
    let rules = LevelRules::default();
    assert!(!rules.is_complete(10_000, 49));
    assert!(!rules.is_complete(499, 50));
    assert!(rules.is_complete(500, 50));
    assert!(rules.is_complete(500, 80));
}

#[test]
fn test_unlock_next_is_idempotent() {
    let mut rules = LevelRules::new(1);
    assert_eq!(rules.unlock_next(), Some(2));
    assert_eq!(rules.unlock_next(), None);
    assert_eq!(rules.highest_unlocked(), 2);
}

#[test]
fn test_unlock_next_at_max_level_is_noop() {
    let mut rules = LevelRules::new(MAX_LEVEL);
    assert!(rules.select_level(MAX_LEVEL));
    assert!(rules.is_max_level());

    assert_eq!(rules.unlock_next(), None);
    assert_eq!(rules.highest_unlocked(), MAX_LEVEL);
    assert_eq!(rules.levels().len(), MAX_LEVEL as usize);
    assert!(rules.is_locked(MAX_LEVEL + 1));
    assert!(!rules.advance_level());
}

#[test]
fn test_unlock_flips_lock_flag() {
    let mut rules = LevelRules::new(1);
    assert!(rules.levels()[1].is_locked());
    rules.unlock_next();
    assert!(!rules.levels()[1].is_locked());
    assert!(rules.levels()[2].is_locked());
}

#[test]
fn test_reset_clears_counters_only() {
    let mut rules = LevelRules::new(4);
    rules.select_level(4);
    place(&mut rules, 12);

    rules.reset();
    assert_eq!(rules.current_level(), 4);
    assert_eq!(rules.blocks_placed(), 0);
    assert_eq!(rules.progress().score_target, 1500);
}

#[test]
fn test_intervals_shrink_with_level() {
    let rules = LevelRules::new(MAX_LEVEL);
    let intervals: Vec<u32> = rules.levels().iter().map(|l| l.drop_interval_ms).collect();
    assert!(intervals.windows(2).all(|w| w[0] > w[1]));
}

#[test]
fn test_custom_catalog() {
    let levels = vec![LevelConfig::new(1, 10, 100, 3), LevelConfig::new(2, 20, 90, 3)];
    let mut rules = LevelRules::with_levels(levels, 1).unwrap();
    assert_eq!(rules.max_level(), 2);
    assert_eq!(rules.drop_interval_ms(), 100);

    place(&mut rules, 3);
    assert!(rules.is_complete(10, rules.blocks_placed()));
    assert_eq!(rules.unlock_next(), Some(2));
    assert!(rules.advance_level());
    assert!(rules.is_max_level());
}
