//! Session layer: orchestration, configuration, persistence contract, and timing
//!
//! [`GameSession`] drives a `blockfall_core::Board` through the
//! Playing / LevelWon / LevelFailed / GameOver state machine. [`driver::drive`]
//! wraps it in a tokio loop that merges the gravity timer with caller input.

pub mod config;
pub mod driver;
pub mod session;
pub mod store;

pub use blockfall_types as types;

pub use config::SessionConfig;
pub use driver::{drive, Input};
pub use session::{GameSession, SessionEvent, SessionState, StepResult};
pub use store::{MemoryStore, ProgressStore};
