//! Async drive loop
//!
//! Serializes the two step triggers (the gravity timer and caller input) onto a
//! single owned [`GameSession`]. Each applied input or tick sends one
//! [`StepResult`] on the output channel. The timer is paused together with the
//! session and restarts from a full interval after resume or a new game.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::session::{GameSession, SessionState, StepResult};
use crate::store::ProgressStore;
use crate::types::{Command, CommandSource};

/// Message delivered to the drive loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Pause,
    Resume,
    NewGame,
    StartLevel(u8),
    StartEndless,
    NextLevel,
    Quit,
}

fn gravity(interval_ms: u32) -> Interval {
    let period = Duration::from_millis(u64::from(interval_ms.max(1)));
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// Run `session` until `Quit` arrives or every input sender is dropped
///
/// Returns the session so the caller can read final scores.
pub async fn drive<P: ProgressStore>(
    mut session: GameSession<P>,
    mut inputs: mpsc::Receiver<Input>,
    outputs: mpsc::UnboundedSender<StepResult>,
) -> GameSession<P> {
    let mut interval_ms = session.drop_interval_ms();
    let mut ticker = gravity(interval_ms);

    loop {
        let ticking = !session.is_paused() && session.state() == SessionState::Playing;

        tokio::select! {
            _ = ticker.tick(), if ticking => {
                let _ = outputs.send(session.advance(CommandSource::Timer));
            }
            input = inputs.recv() => {
                let step = match input {
                    None | Some(Input::Quit) => break,
                    Some(Input::Command(command)) => session.apply(command, CommandSource::User),
                    Some(Input::Pause) => {
                        session.pause();
                        session.refresh()
                    }
                    Some(Input::Resume) => {
                        session.resume();
                        ticker.reset();
                        session.refresh()
                    }
                    Some(Input::NewGame) => {
                        session.new_game();
                        ticker.reset();
                        session.refresh()
                    }
                    Some(Input::StartLevel(level)) => {
                        if session.start_level(level) {
                            ticker.reset();
                        } else {
                            eprintln!("[Driver] Level {} is locked or unknown", level);
                        }
                        session.refresh()
                    }
                    Some(Input::StartEndless) => {
                        session.start_endless();
                        ticker.reset();
                        session.refresh()
                    }
                    Some(Input::NextLevel) => {
                        if session.next_level() {
                            ticker.reset();
                        }
                        session.refresh()
                    }
                };
                let _ = outputs.send(step);
            }
        }

        if session.drop_interval_ms() != interval_ms {
            interval_ms = session.drop_interval_ms();
            ticker = gravity(interval_ms);
        }
    }

    session
}

#[cfg(test)]
mod tests {
    use blockfall_core::PieceSupply;

    use super::*;
    use crate::config::SessionConfig;
    use crate::store::MemoryStore;
    use crate::types::PieceKind;

    fn session() -> GameSession<MemoryStore> {
        let supply = PieceSupply::from_sequence(&[PieceKind::T, PieceKind::O]).unwrap();
        let config = SessionConfig {
            default_drop_interval_ms: 60_000,
            ..SessionConfig::default()
        };
        GameSession::with_supply(config, supply, MemoryStore::default()).unwrap()
    }

    #[test]
    fn test_quit_returns_session() {
        tokio_test::block_on(async {
            let (tx, rx) = mpsc::channel(8);
            let (out_tx, mut out_rx) = mpsc::unbounded_channel();

            tx.send(Input::Command(Command::Left)).await.unwrap();
            tx.send(Input::Quit).await.unwrap();

            let session = drive(session(), rx, out_tx).await;
            let step = out_rx.recv().await.unwrap();
            assert!(step.moved);
            assert_eq!(session.view().offset(), Some((3, 0)));
        });
    }

    #[test]
    fn test_dropped_sender_stops_loop() {
        tokio_test::block_on(async {
            let (tx, rx) = mpsc::channel(8);
            let (out_tx, _out_rx) = mpsc::unbounded_channel();
            drop(tx);

            let session = drive(session(), rx, out_tx).await;
            assert_eq!(session.state(), SessionState::Playing);
        });
    }
}
