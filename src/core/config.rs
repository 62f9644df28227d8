//! Game rules and engine configuration.
//!
//! - `Rules`: what the host picks on the setup screen (team count, card
//!   count, turn length, whether teams rotate between rounds).
//! - `EngineConfig`: how the engine itself runs (round count, save
//!   throttling, RNG seed, snapshot format).

use serde::{Deserialize, Serialize};

use crate::persist::SnapshotCodec;

/// Rounds per play-through.
pub const DEFAULT_TOTAL_ROUNDS: u32 = 3;

/// Most teams a game can have.
pub const MAX_TEAMS: usize = 20;

/// Rules chosen on the setup screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    /// Number of teams (2..=20).
    pub team_count: usize,

    /// Cards to collect before play starts (at least 1).
    pub total_cards: usize,

    /// Seconds per turn (at least 1).
    pub time_per_turn: u32,

    /// Hand the bowl to the next team whenever a round ends.
    /// When false, the team that cleared the round keeps playing.
    pub switch_teams_after_round: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            team_count: 2,
            total_cards: 30,
            time_per_turn: 60,
            switch_teams_after_round: false,
        }
    }
}

impl Rules {
    /// Create rules with the given team count, card count and turn length.
    #[must_use]
    pub fn new(team_count: usize, total_cards: usize, time_per_turn: u32) -> Self {
        Self {
            team_count,
            total_cards,
            time_per_turn,
            switch_teams_after_round: false,
        }
    }

    /// Rotate teams when a round ends.
    #[must_use]
    pub fn with_switch_teams_after_round(mut self, switch: bool) -> Self {
        self.switch_teams_after_round = switch;
        self
    }

    /// Check the rules, returning a description of the first problem.
    pub fn validate(&self) -> Result<(), String> {
        if !(2..=MAX_TEAMS).contains(&self.team_count) {
            return Err(format!(
                "team count must be between 2 and {}, got {}",
                MAX_TEAMS, self.team_count
            ));
        }
        if self.total_cards == 0 {
            return Err("total cards must be at least 1".to_string());
        }
        if self.time_per_turn == 0 {
            return Err("time per turn must be at least 1 second".to_string());
        }
        Ok(())
    }
}

/// Engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Rounds played before the game is done.
    pub total_rounds: u32,

    /// While a turn runs, save only when the clock shows a multiple of
    /// this many seconds.
    pub save_interval_secs: u32,

    /// Seed for card ordering. `None` draws one from the OS.
    pub seed: Option<u64>,

    /// Snapshot encoding handed to the store.
    pub codec: SnapshotCodec,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            total_rounds: DEFAULT_TOTAL_ROUNDS,
            save_interval_secs: 5,
            seed: None,
            codec: SnapshotCodec::Json,
        }
    }
}

impl EngineConfig {
    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Create a new config with a custom round count.
    pub fn with_total_rounds(mut self, rounds: u32) -> Self {
        assert!(rounds > 0, "Must play at least 1 round");
        self.total_rounds = rounds;
        self
    }

    /// Create a new config with a custom tick save interval.
    pub fn with_save_interval(mut self, secs: u32) -> Self {
        assert!(secs > 0, "Save interval must be at least 1 second");
        self.save_interval_secs = secs;
        self
    }

    /// Create a new config with a custom snapshot codec.
    pub fn with_codec(mut self, codec: SnapshotCodec) -> Self {
        self.codec = codec;
        self
    }
}
