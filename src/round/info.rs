//! Round and turn state.
//!
//! ## Card order
//!
//! `cards` is a permutation of card indices. `card_index` is a position in
//! that permutation, and `completed_cards` holds permutation *values* (card
//! indices), so a reshuffle keeps solved cards solved.
//!
//! Walking to the next card wraps around and skips solved cards:
//!
//! ```
//! use fishbowl::round::RoundInfo;
//! use fishbowl::core::TeamId;
//!
//! let mut round = RoundInfo::new(vec![2, 0, 1], 30, TeamId::new(0));
//! round.complete_current(); // card 2 solved
//! round.advance().unwrap();
//! assert_eq!(round.current_card(), 0);
//! round.advance().unwrap();
//! assert_eq!(round.current_card(), 1);
//! round.advance().unwrap(); // wraps past the solved card 2
//! assert_eq!(round.current_card(), 0);
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::TeamId;
use crate::engine::EngineError;

/// The last scoring-relevant action of a turn, kept for one level of undo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnAction {
    /// The team guessed the card at `card_index`.
    GotIt { card_index: usize },
    /// The team skipped the card at `card_index`.
    Pass { card_index: usize },
}

impl TurnAction {
    /// Position in the play order the action was taken at.
    #[must_use]
    pub fn card_index(self) -> usize {
        match self {
            TurnAction::GotIt { card_index } | TurnAction::Pass { card_index } => card_index,
        }
    }
}

/// State of the round in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoundInfo {
    /// 0-based round counter.
    pub round_number: u32,

    /// Seconds left in the current turn.
    pub time: u32,

    /// Team whose turn it is.
    pub current_team: TeamId,

    /// Play order: a permutation of card indices.
    pub cards: Vec<usize>,

    /// Position in `cards` of the card on display.
    pub card_index: usize,

    /// Card indices solved this round.
    pub completed_cards: FxHashSet<usize>,

    /// Unsolved cards in this round.
    pub cards_left: usize,

    /// Pending undo record.
    pub last_action: Option<TurnAction>,
}

impl RoundInfo {
    /// First round of a game: round 0, first position, nothing solved.
    #[must_use]
    pub fn new(order: Vec<usize>, time: u32, team: TeamId) -> Self {
        let cards_left = order.len();
        Self {
            round_number: 0,
            time,
            current_team: team,
            cards: order,
            card_index: 0,
            completed_cards: FxHashSet::default(),
            cards_left,
            last_action: None,
        }
    }

    /// Card index on display.
    #[must_use]
    pub fn current_card(&self) -> usize {
        self.cards[self.card_index]
    }

    /// Whether a card index has been solved this round.
    #[must_use]
    pub fn is_completed(&self, card: usize) -> bool {
        self.completed_cards.contains(&card)
    }

    /// Mark the card on display solved. Returns its card index.
    pub fn complete_current(&mut self) -> usize {
        let card = self.current_card();
        if self.completed_cards.insert(card) {
            self.cards_left -= 1;
        }
        card
    }

    /// Unmark a card solved at a given play position.
    pub fn reopen(&mut self, card_index: usize) {
        let card = self.cards[card_index];
        if self.completed_cards.remove(&card) {
            self.cards_left += 1;
        }
    }

    /// Put every card back in play under a fresh order. The round counter,
    /// position, team and clock are left to the caller.
    pub fn restock(&mut self, order: Vec<usize>) {
        self.cards_left = order.len();
        self.cards = order;
        self.completed_cards.clear();
        self.last_action = None;
    }

    /// Hand the turn to `team` with a full clock and a fresh order.
    pub fn begin_turn(&mut self, team: TeamId, time: u32, order: Vec<usize>) {
        self.time = time;
        self.current_team = team;
        self.cards = order;
        self.last_action = None;
    }

    /// Move to the next unsolved card, wrapping around.
    ///
    /// Always moves at least one position; when the only unsolved card is
    /// the one on display, it lands back on it. Fails with `NoCardsLeft`
    /// and leaves the position unchanged when every card is solved.
    pub fn advance(&mut self) -> Result<(), EngineError> {
        let len = self.cards.len();
        let start = self.card_index;

        for _ in 0..len {
            self.card_index = (self.card_index + 1) % len;
            if !self.is_completed(self.cards[self.card_index]) {
                return Ok(());
            }
        }

        self.card_index = start;
        Err(EngineError::NoCardsLeft)
    }

    /// Check internal consistency against the game's card and team counts.
    pub fn validate(&self, total_cards: usize, team_count: usize) -> Result<(), String> {
        let mut sorted = self.cards.clone();
        sorted.sort_unstable();
        if sorted != (0..total_cards).collect::<Vec<_>>() {
            return Err(format!(
                "play order is not a permutation of {} cards",
                total_cards
            ));
        }
        if self.card_index >= total_cards {
            return Err(format!("card index {} out of range", self.card_index));
        }
        if self.current_team.index() >= team_count {
            return Err(format!("{} does not exist", self.current_team));
        }
        if self.completed_cards.iter().any(|&card| card >= total_cards) {
            return Err("completed card out of range".to_string());
        }
        if self.cards_left + self.completed_cards.len() != total_cards {
            return Err(format!(
                "{} cards left but {} of {} completed",
                self.cards_left,
                self.completed_cards.len(),
                total_cards
            ));
        }
        if self.cards_left > 0 && self.is_completed(self.current_card()) {
            return Err("card on display is already completed".to_string());
        }
        if let Some(action) = self.last_action {
            if action.card_index() >= total_cards {
                return Err("undo record out of range".to_string());
            }
        }
        Ok(())
    }
}
