//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under one name so embedders can depend on
//! `blockfall` alone: `blockfall::{core, engine, store, types}`.

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_store as store;
pub use blockfall_types as types;
