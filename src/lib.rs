//! # fishbowl
//!
//! Game-state engine for Fishbowl, a party word-guessing game played by two
//! or more teams over a fixed number of rounds.
//!
//! ## Flow
//!
//! 1. **Setup**: the host picks team count, card count, turn length.
//! 2. **AddCards**: players submit clues until the roster is full.
//! 3. **Ready / Play**: teams alternate timed turns guessing clues. Every
//!    round uses the same cards in a fresh random order.
//! 4. **Done**: after the last round, standings are final.
//!
//! ## Architecture
//!
//! - **Caller-driven**: the engine is synchronous. A UI or test harness calls
//!   one operation at a time and drives `tick` from its own one-second timer.
//!
//! - **Persistent**: after each mutation the engine hands a serialized
//!   snapshot to a [`SnapshotStore`], so a reload resumes mid-game.
//!
//! ## Modules
//!
//! - `core`: stages, teams, cards, rules/config, RNG
//! - `round`: per-round turn state and card-order walking
//! - `engine`: the `GameEngine` state machine and its errors
//! - `persist`: snapshot codecs and stores

pub mod core;
pub mod round;
pub mod engine;
pub mod persist;

// Re-export commonly used types
pub use crate::core::{
    Card, EngineConfig, GameRng, Rules, Stage, Team, TeamId,
    DEFAULT_TOTAL_ROUNDS, MAX_TEAMS,
};

pub use crate::round::{RoundInfo, TurnAction};

pub use crate::engine::{EngineError, GameEngine, GameState};

pub use crate::persist::{
    FileStore, MemoryStore, NullStore, SnapshotCodec, SnapshotStore, StoreError,
};
