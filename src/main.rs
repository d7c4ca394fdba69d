//! Headless runner (default binary).
//!
//! Plays one game with a fixed placement script through the async drive loop,
//! logging level/game events and printing a final summary. Configuration comes
//! from the `BLOCKFALL_*` environment variables; see `SessionConfig::from_env`.
//! `BLOCKFALL_PIECES` caps the number of pieces played (default 200).

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use blockfall::engine::{drive, GameSession, Input, SessionConfig, SessionEvent, StepResult};
use blockfall::store::JsonFileStore;
use blockfall::types::Command;

const DEFAULT_PIECE_LIMIT: u32 = 200;

/// Rotate, shift, then hard drop; varies with the piece number so the stack spreads out
fn placement(piece: u32, width: usize) -> Vec<Command> {
    let width = width.max(1) as i32;
    let shift = (piece as i32 * 3) % width - width / 2;
    let mut commands = vec![Command::Rotate; (piece % 4) as usize];
    let lateral = if shift < 0 { Command::Left } else { Command::Right };
    commands.extend(std::iter::repeat(lateral).take(shift.unsigned_abs() as usize));
    commands.push(Command::HardDrop);
    commands
}

fn report(event: SessionEvent) {
    match event {
        SessionEvent::LevelWon {
            level,
            is_max_level,
        } => eprintln!(
            "[Blockfall] Level {} won{}",
            level,
            if is_max_level { " (final level)" } else { "" }
        ),
        SessionEvent::LevelFailed {
            level,
            score,
            required,
        } => eprintln!(
            "[Blockfall] Level {} failed: {} of {} points",
            level, score, required
        ),
        SessionEvent::GameOver {
            score,
            new_high_score,
        } => eprintln!(
            "[Blockfall] Game over at {} points{}",
            score,
            if new_high_score { ", new high score" } else { "" }
        ),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = SessionConfig::from_env();
    let store = JsonFileStore::from_env();
    let piece_limit = std::env::var("BLOCKFALL_PIECES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_PIECE_LIMIT);

    eprintln!(
        "[Blockfall] {}x{} grid, progress file {}",
        config.width,
        config.height,
        store.path().display()
    );

    let width = config.width;
    let session = GameSession::new(config, store).context("invalid session configuration")?;
    if session.is_level_mode() {
        eprintln!(
            "[Blockfall] Level {} ({} ms drop interval)",
            session.levels().current_level(),
            session.drop_interval_ms()
        );
    }

    let (input_tx, input_rx) = mpsc::channel::<Input>(64);
    let (step_tx, mut step_rx) = mpsc::unbounded_channel::<StepResult>();
    let runner = tokio::spawn(drive(session, input_rx, step_tx));

    let mut lines = 0usize;
    let mut placed = 0;
    'game: while placed < piece_limit {
        for command in placement(placed, width) {
            input_tx.send(Input::Command(command)).await?;
        }

        // Gravity ticks interleave with the scripted commands; a piece is done once it locks
        loop {
            let Some(step) = step_rx.recv().await else {
                break 'game;
            };
            lines += step.lines_cleared;
            if let Some(event) = step.event {
                report(event);
                break 'game;
            }
            if step.locked {
                placed += 1;
                break;
            }
        }
    }

    input_tx.send(Input::Quit).await?;
    let session = runner.await.context("drive loop stopped abnormally")?;

    println!(
        "score {}  high score {}  lines {}  state {:?}",
        session.score(),
        session.high_score(),
        lines,
        session.state()
    );
    Ok(())
}
