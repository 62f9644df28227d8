//! Complete game state.
//!
//! `GameState` is both the engine's live state and the snapshot handed to
//! the store. Decoding is strict: unknown fields are rejected and every
//! field must be present (including the optional ones, which must be
//! written as `null`). A decoded snapshot is then checked with
//! [`GameState::validate`] before the engine trusts it.

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::{Card, Stage, Team, DEFAULT_TOTAL_ROUNDS, MAX_TEAMS};
use crate::round::RoundInfo;

/// Deserialize an `Option` without serde's "missing means None" shortcut.
fn required<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

/// The whole game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameState {
    pub stage: Stage,

    /// Teams, fixed once rules are set.
    #[serde(deserialize_with = "required")]
    pub teams: Option<Vec<Team>>,

    /// Cards to collect before play.
    #[serde(deserialize_with = "required")]
    pub total_cards: Option<usize>,

    /// Submitted cards. Play order refers to positions in this list.
    pub cards: Vec<Card>,

    /// Seconds per turn.
    #[serde(deserialize_with = "required")]
    pub time_per_turn: Option<u32>,

    pub switch_teams_after_round: bool,

    /// Present from `finalize_cards` until cards are changed or the game reset.
    #[serde(deserialize_with = "required")]
    pub round_info: Option<RoundInfo>,

    pub total_rounds: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_ROUNDS)
    }
}

impl GameState {
    /// Fresh game at `Setup`.
    #[must_use]
    pub fn new(total_rounds: u32) -> Self {
        Self {
            stage: Stage::Setup,
            teams: None,
            total_cards: None,
            cards: Vec::new(),
            time_per_turn: None,
            switch_teams_after_round: false,
            round_info: None,
            total_rounds,
        }
    }

    /// Teams, or an empty slice before rules are set.
    #[must_use]
    pub fn teams(&self) -> &[Team] {
        self.teams.as_deref().unwrap_or(&[])
    }

    /// Check that the state is one the engine could have produced.
    pub fn validate(&self) -> Result<(), String> {
        if self.total_rounds == 0 {
            return Err("total rounds must be at least 1".to_string());
        }

        let rules_set = self.teams.is_some()
            && self.total_cards.is_some()
            && self.time_per_turn.is_some();
        if self.stage.has_rules() != rules_set {
            return Err(format!("rules do not match stage {}", self.stage));
        }
        if self.stage.has_round() != self.round_info.is_some() {
            return Err(format!("round info does not match stage {}", self.stage));
        }

        let (Some(teams), Some(total_cards), Some(time_per_turn)) =
            (&self.teams, self.total_cards, self.time_per_turn)
        else {
            return Ok(());
        };

        if !(2..=MAX_TEAMS).contains(&teams.len()) {
            return Err(format!(
                "team count must be between 2 and {}, got {}",
                MAX_TEAMS,
                teams.len()
            ));
        }
        if total_cards == 0 || time_per_turn == 0 {
            return Err("card count and turn length must be positive".to_string());
        }
        if self.cards.len() > total_cards {
            return Err(format!(
                "{} cards exceed the total of {}",
                self.cards.len(),
                total_cards
            ));
        }

        if let Some(round) = &self.round_info {
            if self.cards.len() != total_cards {
                return Err(format!(
                    "{} of {} cards during play",
                    self.cards.len(),
                    total_cards
                ));
            }
            round.validate(total_cards, teams.len())?;
            if round.time > time_per_turn {
                return Err(format!(
                    "{} seconds left exceeds a {} second turn",
                    round.time, time_per_turn
                ));
            }
            if round.round_number > self.total_rounds {
                return Err(format!("round {} past the last round", round.round_number));
            }
            if (self.stage == Stage::Done) != (round.round_number == self.total_rounds) {
                return Err(format!(
                    "round {} does not match stage {}",
                    round.round_number, self.stage
                ));
            }
        }

        Ok(())
    }
}
