//! The game engine.
//!
//! - `GameEngine`: stage state machine, turn actions, queries
//! - `GameState`: everything the engine knows, and the snapshot format
//! - `EngineError`: what a caller can get wrong

pub mod error;
pub mod state;
pub mod game;

pub use error::EngineError;
pub use state::GameState;
pub use game::GameEngine;
