//! Drive loop tests - input and gravity serialized onto one session

use std::time::Duration;

use tokio::sync::mpsc;

use blockfall::core::PieceSupply;
use blockfall::engine::{drive, GameSession, Input, MemoryStore, SessionConfig, SessionState};
use blockfall::types::{Command, PieceKind};

fn session(drop_ms: u32) -> GameSession<MemoryStore> {
    let supply = PieceSupply::from_sequence(&[PieceKind::O]).unwrap();
    let config = SessionConfig {
        default_drop_interval_ms: drop_ms,
        ..SessionConfig::default()
    };
    GameSession::with_supply(config, supply, MemoryStore::default()).unwrap()
}

#[test]
fn test_each_input_yields_one_step() {
    tokio_test::block_on(async {
        let (tx, rx) = mpsc::channel(16);
        let (out_tx, mut out_rx) = mpsc::unbounded_channel();
        let runner = tokio::spawn(drive(session(60_000), rx, out_tx));

        tx.send(Input::Command(Command::Left)).await.unwrap();
        tx.send(Input::Command(Command::HardDrop)).await.unwrap();
        tx.send(Input::Quit).await.unwrap();

        let left = out_rx.recv().await.unwrap();
        assert!(left.moved);
        let drop = out_rx.recv().await.unwrap();
        assert_eq!(drop.score_bonus, 17);

        let session = runner.await.unwrap();
        assert_eq!(session.score(), 17);
        assert_eq!(session.board().grid().filled_count(), 4);
    });
}

#[test]
fn test_gravity_ticks_move_the_piece() {
    tokio_test::block_on(async {
        let (tx, rx) = mpsc::channel(16);
        let (out_tx, mut out_rx) = mpsc::unbounded_channel();
        let runner = tokio::spawn(drive(session(5), rx, out_tx));

        let tick = tokio::time::timeout(Duration::from_secs(5), out_rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(tick.moved);
        // Gravity never earns the soft-drop bonus
        assert_eq!(tick.score_bonus, 0);

        tx.send(Input::Quit).await.unwrap();
        let session = runner.await.unwrap();
        assert_eq!(session.score(), 0);
    });
}

#[test]
fn test_pause_stops_gravity_and_keeps_state() {
    tokio_test::block_on(async {
        let (tx, rx) = mpsc::channel(16);
        let (out_tx, mut out_rx) = mpsc::unbounded_channel();
        // Pause is queued before the loop starts, ahead of the first 5ms tick
        tx.send(Input::Pause).await.unwrap();
        let runner = tokio::spawn(drive(session(5), rx, out_tx));

        let ack = out_rx.recv().await.unwrap();
        assert!(!ack.moved);
        assert_eq!(ack.view.offset(), Some((4, 0)));

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(out_rx.try_recv().is_err());

        tx.send(Input::Command(Command::Left)).await.unwrap();
        let ignored = out_rx.recv().await.unwrap();
        assert!(!ignored.moved);

        tx.send(Input::Quit).await.unwrap();
        let session = runner.await.unwrap();
        assert!(session.is_paused());
        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.view().offset(), Some((4, 0)));
    });
}

#[test]
fn test_new_game_input_resets_board() {
    tokio_test::block_on(async {
        let (tx, rx) = mpsc::channel(16);
        let (out_tx, mut out_rx) = mpsc::unbounded_channel();
        let runner = tokio::spawn(drive(session(60_000), rx, out_tx));

        tx.send(Input::Command(Command::HardDrop)).await.unwrap();
        tx.send(Input::NewGame).await.unwrap();
        tx.send(Input::Quit).await.unwrap();

        out_rx.recv().await.unwrap();
        let reset = out_rx.recv().await.unwrap();
        assert_eq!(reset.view.offset(), Some((4, 0)));

        let session = runner.await.unwrap();
        assert!(session.board().grid().is_empty());
        assert_eq!(session.score(), 0);
    });
}

#[test]
fn test_locked_level_request_is_ignored() {
    tokio_test::block_on(async {
        let (tx, rx) = mpsc::channel(16);
        let (out_tx, _out_rx) = mpsc::unbounded_channel();
        let runner = tokio::spawn(drive(session(60_000), rx, out_tx));

        tx.send(Input::StartLevel(7)).await.unwrap();
        tx.send(Input::StartLevel(1)).await.unwrap();
        tx.send(Input::Quit).await.unwrap();

        let session = runner.await.unwrap();
        assert!(session.is_level_mode());
        assert_eq!(session.levels().current_level(), 1);
        assert_eq!(session.drop_interval_ms(), 400);
    });
}
