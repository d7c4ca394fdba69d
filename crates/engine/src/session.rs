//! Game session - turns commands into board mutations and state transitions
//!
//! A session owns one [`Board`], the level rules, and a [`ProgressStore`].
//! Every mutating call returns a [`StepResult`] carrying the view snapshot, so
//! callers never need to reach into the board between steps.
//!
//! Only a failed downward move locks a piece. Left, right, and rotate map
//! straight onto the board and never score or evaluate the level.

use blockfall_core::{
    calculate_drop_score, calculate_line_score, Board, CoreError, LevelConfig, LevelRules,
    PieceSupply, ViewSnapshot,
};

use crate::config::SessionConfig;
use crate::store::ProgressStore;
use crate::types::{Command, CommandSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Playing,
    LevelWon,
    LevelFailed,
    /// Terminal until `new_game` or `start_level`
    GameOver,
}

/// Signals raised to the embedding caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    LevelWon { level: u8, is_max_level: bool },
    LevelFailed { level: u8, score: u32, required: u32 },
    GameOver { score: u32, new_high_score: bool },
}

/// Outcome of one command or gravity step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    /// The requested move (or rotation) was applied
    pub moved: bool,
    /// The active piece was merged into the grid during this step
    pub locked: bool,
    pub lines_cleared: usize,
    /// Removed rows, top-to-bottom, in pre-clear coordinates
    pub cleared_rows: Vec<usize>,
    pub score_bonus: u32,
    pub event: Option<SessionEvent>,
    pub view: ViewSnapshot,
}

impl StepResult {
    fn idle(view: ViewSnapshot) -> Self {
        Self {
            moved: false,
            locked: false,
            lines_cleared: 0,
            cleared_rows: Vec::new(),
            score_bonus: 0,
            event: None,
            view,
        }
    }
}

#[derive(Debug)]
pub struct GameSession<P: ProgressStore> {
    config: SessionConfig,
    board: Board,
    levels: LevelRules,
    level_mode: bool,
    store: P,
    high_score: u32,
    state: SessionState,
    paused: bool,
}

impl<P: ProgressStore> GameSession<P> {
    /// Build a session and spawn its first piece
    ///
    /// The supply is seeded from `config.seed` when set. A `start_level` that is
    /// locked or out of range falls back to endless play.
    pub fn new(config: SessionConfig, store: P) -> Result<Self, CoreError> {
        let supply = match config.seed {
            Some(seed) => PieceSupply::new(seed),
            None => PieceSupply::from_entropy(),
        };
        Self::with_supply(config, supply, store)
    }

    /// Same as [`GameSession::new`] with an explicit piece supply
    pub fn with_supply(
        config: SessionConfig,
        supply: PieceSupply,
        store: P,
    ) -> Result<Self, CoreError> {
        let board = Board::new(config.width, config.height, supply)?;
        let spawn_col = config.spawn_col.unwrap_or(board.spawn_anchor().0);
        let board = board.with_spawn_anchor(spawn_col, config.spawn_row);
        let levels = LevelRules::new(store.load_unlock_progress());
        let high_score = store.load_high_score();

        let mut session = Self {
            config,
            board,
            levels,
            level_mode: false,
            store,
            high_score,
            state: SessionState::Playing,
            paused: false,
        };

        if let Some(level) = session.config.start_level {
            session.level_mode = session.levels.select_level(level);
        }
        if session.board.spawn() {
            session.state = SessionState::GameOver;
        }
        Ok(session)
    }

    /// Replace the default level catalog
    ///
    /// Unlock progress is re-read from the store and `config.start_level` is
    /// applied again against the new catalog.
    pub fn with_level_catalog(mut self, levels: Vec<LevelConfig>) -> Result<Self, CoreError> {
        self.levels = LevelRules::with_levels(levels, self.store.load_unlock_progress())?;
        self.level_mode = match self.config.start_level {
            Some(level) => self.levels.select_level(level),
            None => false,
        };
        Ok(self)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn levels(&self) -> &LevelRules {
        &self.levels
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_level_mode(&self) -> bool {
        self.level_mode
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn score(&self) -> u32 {
        self.board.score().value()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn view(&self) -> ViewSnapshot {
        self.board.snapshot()
    }

    /// Gravity interval: the current level's in level mode, else the configured default
    pub fn drop_interval_ms(&self) -> u32 {
        if self.level_mode {
            self.levels.drop_interval_ms()
        } else {
            self.config.default_drop_interval_ms
        }
    }

    /// A no-op result carrying the current view
    pub fn refresh(&self) -> StepResult {
        StepResult::idle(self.view())
    }

    fn accepts_input(&self) -> bool {
        self.state == SessionState::Playing && !self.paused
    }

    /// Apply one input command
    pub fn apply(&mut self, command: Command, source: CommandSource) -> StepResult {
        if !self.accepts_input() {
            return self.refresh();
        }

        let moved = match command {
            Command::Left => self.board.move_left(),
            Command::Right => self.board.move_right(),
            Command::Rotate => self.board.rotate(),
            Command::Down => return self.advance(source),
            Command::HardDrop => return self.hard_drop(source),
        };

        StepResult {
            moved,
            ..self.refresh()
        }
    }

    /// Advance one step: move down, or lock the piece and resolve the consequences
    pub fn advance(&mut self, source: CommandSource) -> StepResult {
        if !self.accepts_input() {
            return self.refresh();
        }

        if self.board.move_down() {
            let bonus = calculate_drop_score(source);
            self.board.score_mut().add(bonus);
            return StepResult {
                moved: true,
                score_bonus: bonus,
                ..self.refresh()
            };
        }

        self.lock_piece()
    }

    fn lock_piece(&mut self) -> StepResult {
        let mut result = StepResult::idle(self.view());
        result.locked = self.board.merge_active_piece();

        if self.level_mode {
            self.levels.on_piece_locked();
            if self.board.is_topped_out(self.config.top_out_rows) {
                result.event = Some(self.finish_game());
                result.view = self.view();
                return result;
            }
        }

        let cleared = self.board.clear_full_rows();
        if cleared.lines_removed > 0 {
            let bonus = calculate_line_score(cleared.lines_removed);
            self.board.score_mut().add(bonus);
            result.score_bonus = bonus;
        }
        result.lines_cleared = cleared.lines_removed;
        result.cleared_rows = cleared.cleared_rows;

        if self.level_mode && self.board.is_topped_out(self.config.top_out_rows) {
            result.event = Some(self.finish_game());
            result.view = self.view();
            return result;
        }

        if self.board.spawn() {
            result.event = Some(self.finish_game());
            result.view = self.view();
            return result;
        }

        if self.level_mode {
            result.event = self.evaluate_level();
        }
        result.view = self.view();
        result
    }

    fn evaluate_level(&mut self) -> Option<SessionEvent> {
        let score = self.score();
        let level = self.levels.current_level();

        if self.levels.is_failed(score) {
            self.state = SessionState::LevelFailed;
            return Some(SessionEvent::LevelFailed {
                level,
                score,
                required: self.levels.score_required(),
            });
        }

        if self.levels.is_complete(score, self.levels.blocks_placed()) {
            if let Some(unlocked) = self.levels.unlock_next() {
                self.store.save_unlock_progress(unlocked);
            }
            self.state = SessionState::LevelWon;
            return Some(SessionEvent::LevelWon {
                level,
                is_max_level: self.levels.is_max_level(),
            });
        }

        None
    }

    fn finish_game(&mut self) -> SessionEvent {
        self.state = SessionState::GameOver;
        let score = self.score();
        let new_high_score = score > self.high_score;
        if new_high_score {
            self.high_score = score;
            self.store.save_high_score(score);
        }
        SessionEvent::GameOver {
            score,
            new_high_score,
        }
    }

    /// Repeat down-steps from `source` until the piece locks
    ///
    /// The returned bonus is the total over all steps; the lock outcome
    /// (lines, event) comes from the final step.
    fn hard_drop(&mut self, source: CommandSource) -> StepResult {
        let limit = self.board.grid().height() + blockfall_core::pieces::SHAPE_SIZE + 1;

        let mut result = self.advance(source);
        let mut total = result.score_bonus;
        let mut steps = 1;
        while result.moved && steps < limit {
            result = self.advance(source);
            total += result.score_bonus;
            steps += 1;
        }

        result.score_bonus = total;
        result
    }

    /// Wipe the board and start over in the current mode
    ///
    /// Safe at any point, mid-drop included. Level mode restarts the current level.
    pub fn new_game(&mut self) -> ViewSnapshot {
        if self.level_mode {
            self.levels.reset();
        }
        self.paused = false;
        self.state = if self.board.reset_for_new_game() {
            SessionState::GameOver
        } else {
            SessionState::Playing
        };
        self.view()
    }

    /// Switch to level mode on `level` and start a fresh game
    ///
    /// Returns false (changing nothing) for locked or out-of-range levels.
    pub fn start_level(&mut self, level: u8) -> bool {
        if !self.levels.select_level(level) {
            return false;
        }
        self.level_mode = true;
        self.new_game();
        true
    }

    /// Leave level mode and start a fresh endless game
    pub fn start_endless(&mut self) -> ViewSnapshot {
        self.level_mode = false;
        self.new_game()
    }

    /// After a win, move on to the following level
    pub fn next_level(&mut self) -> bool {
        if self.state != SessionState::LevelWon || !self.levels.advance_level() {
            return false;
        }
        self.new_game();
        true
    }

    /// Suspend gameplay; state is kept as-is
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::PieceKind;

    fn session(kinds: &[PieceKind]) -> GameSession<MemoryStore> {
        let supply = PieceSupply::from_sequence(kinds).unwrap();
        GameSession::with_supply(SessionConfig::default(), supply, MemoryStore::default()).unwrap()
    }

    #[test]
    fn test_new_session_is_playing() {
        let session = session(&[PieceKind::T]);
        assert_eq!(session.state(), SessionState::Playing);
        assert!(session.view().has_active());
        assert!(!session.is_level_mode());
        assert_eq!(session.drop_interval_ms(), 400);
    }

    #[test]
    fn test_soft_drop_bonus_only_for_user() {
        let mut session = session(&[PieceKind::O]);

        let step = session.advance(CommandSource::Timer);
        assert!(step.moved);
        assert_eq!(step.score_bonus, 0);

        let step = session.apply(Command::Down, CommandSource::User);
        assert!(step.moved);
        assert_eq!(step.score_bonus, 1);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_lateral_moves_never_score() {
        let mut session = session(&[PieceKind::T]);
        assert!(session.apply(Command::Left, CommandSource::User).moved);
        assert!(session.apply(Command::Right, CommandSource::User).moved);
        assert!(session.apply(Command::Rotate, CommandSource::User).moved);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_hard_drop_locks_and_spawns() {
        let mut session = session(&[PieceKind::O, PieceKind::I]);
        let step = session.apply(Command::HardDrop, CommandSource::User);
        assert!(!step.moved);
        // O spawns at row 0 and lands at row 17
        assert_eq!(step.score_bonus, 17);
        assert_eq!(session.board().grid().filled_count(), 4);
        assert!(step.locked);
        assert_eq!(step.view.active.unwrap().kind, PieceKind::I);
    }

    #[test]
    fn test_timer_hard_drop_earns_no_drop_bonus() {
        let mut session = session(&[PieceKind::O, PieceKind::I]);
        let step = session.apply(Command::HardDrop, CommandSource::Timer);
        assert!(step.locked);
        assert_eq!(step.score_bonus, 0);
        assert_eq!(session.score(), 0);
        assert_eq!(session.board().grid().filled_count(), 4);
    }

    #[test]
    fn test_pause_blocks_commands_and_keeps_state() {
        let mut session = session(&[PieceKind::T]);
        session.apply(Command::Left, CommandSource::User);
        let before = session.view();

        session.pause();
        assert!(!session.apply(Command::Left, CommandSource::User).moved);
        assert!(!session.advance(CommandSource::Timer).moved);
        assert_eq!(session.view(), before);

        session.resume();
        assert!(session.apply(Command::Left, CommandSource::User).moved);
    }

    #[test]
    fn test_locked_start_level_falls_back_to_endless() {
        let supply = PieceSupply::from_sequence(&[PieceKind::T]).unwrap();
        let config = SessionConfig::default().with_level(5);
        let session = GameSession::with_supply(config, supply, MemoryStore::default()).unwrap();
        assert!(!session.is_level_mode());
    }

    #[test]
    fn test_start_level_uses_level_interval() {
        let mut session = session(&[PieceKind::T]);
        assert!(!session.start_level(2));
        assert!(session.start_level(1));
        assert!(session.is_level_mode());
        assert_eq!(session.drop_interval_ms(), 400);
        assert_eq!(session.levels().current_level(), 1);
    }

    #[test]
    fn test_next_level_requires_win() {
        let mut session = session(&[PieceKind::T]);
        session.start_level(1);
        assert!(!session.next_level());
    }

    #[test]
    fn test_invalid_dimensions_fail_fast() {
        let config = SessionConfig::default().with_size(0, 20);
        assert!(GameSession::new(config, MemoryStore::default()).is_err());
    }
}
