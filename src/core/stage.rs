//! Game stages.

use serde::{Deserialize, Serialize};

/// The stage the game is in. Exactly one is active at a time and it decides
/// which engine operations are legal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Choosing team count, card count and turn length.
    #[default]
    Setup,
    /// Collecting clue cards.
    AddCards,
    /// Between turns, waiting for the next team to start.
    Ready,
    /// A team's turn is running.
    Play,
    /// All rounds played.
    Done,
}

impl Stage {
    /// Whether a round is in progress (round info must exist).
    #[must_use]
    pub const fn has_round(self) -> bool {
        matches!(self, Stage::Ready | Stage::Play | Stage::Done)
    }

    /// Whether rules have been chosen (teams and totals must exist).
    #[must_use]
    pub const fn has_rules(self) -> bool {
        !matches!(self, Stage::Setup)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Setup => "Setup",
            Stage::AddCards => "AddCards",
            Stage::Ready => "Ready",
            Stage::Play => "Play",
            Stage::Done => "Done",
        };
        f.write_str(name)
    }
}
