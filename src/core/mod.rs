//! Core game types: stages, teams, cards, rules, RNG.
//!
//! These are the building blocks the engine composes. None of them know
//! about persistence or turn sequencing.

pub mod stage;
pub mod team;
pub mod card;
pub mod rng;
pub mod config;

pub use stage::Stage;
pub use team::{Team, TeamId};
pub use card::Card;
pub use rng::GameRng;
pub use config::{EngineConfig, Rules, DEFAULT_TOTAL_ROUNDS, MAX_TEAMS};
