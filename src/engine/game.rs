//! The Fishbowl state machine.
//!
//! `GameEngine` owns the game and a snapshot store. Callers drive it one
//! operation at a time; each operation checks the stage it is allowed in,
//! mutates the state, and saves a snapshot.
//!
//! ## Example
//!
//! ```
//! use fishbowl::{Card, EngineConfig, GameEngine, MemoryStore, Rules, Stage};
//!
//! let mut engine = GameEngine::with_config(MemoryStore::new(), EngineConfig::default().with_seed(1));
//! engine.set_rules(Rules::new(2, 2, 30)).unwrap();
//! engine.add_card(Card::new("Cat")).unwrap();
//! engine.add_card(Card::new("Dog")).unwrap();
//! engine.finalize_cards().unwrap();
//! engine.start_playing().unwrap();
//!
//! engine.got_it().unwrap();
//! engine.got_it().unwrap();
//!
//! // Round cleared: back to Ready for round 2.
//! assert_eq!(engine.stage(), Stage::Ready);
//! assert_eq!(engine.round().unwrap().round_number, 1);
//! assert_eq!(engine.teams()[0].points, 2);
//! ```

use tracing::{debug, info, trace, warn};

use crate::core::{Card, EngineConfig, GameRng, Rules, Stage, Team, TeamId};
use crate::persist::SnapshotStore;
use crate::round::{RoundInfo, TurnAction};

use super::error::EngineError;
use super::state::GameState;

const LOG_TARGET: &str = "fishbowl::engine";

/// Stateful Fishbowl engine.
///
/// Generic over the snapshot store. Construction loads the last snapshot
/// from the store; every mutation writes one back.
pub struct GameEngine<S: SnapshotStore> {
    state: GameState,
    config: EngineConfig,
    rng: GameRng,
    store: S,
}

impl<S: SnapshotStore> GameEngine<S> {
    /// Create an engine with default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    /// Create an engine, resuming from the store's snapshot if it has a
    /// usable one.
    ///
    /// A game saved mid-turn resumes at `Ready`: the clock is not trusted
    /// across a reload.
    pub fn with_config(mut store: S, config: EngineConfig) -> Self {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let restored = Self::restore(&mut store, &config);

        let mut engine = Self {
            state: GameState::new(config.total_rounds),
            config,
            rng,
            store,
        };

        match restored {
            Some(mut state) => {
                if state.stage == Stage::Play {
                    state.stage = Stage::Ready;
                }
                info!(target: LOG_TARGET, stage = %state.stage, "resumed saved game");
                engine.state = state;
            }
            None => engine.reset_game(),
        }

        engine
    }

    fn restore(store: &mut S, config: &EngineConfig) -> Option<GameState> {
        let bytes = match store.load() {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(err) => {
                warn!(target: LOG_TARGET, %err, "failed to read snapshot, starting fresh");
                return None;
            }
        };

        match config.codec.decode(&bytes) {
            Ok(state) => Some(state),
            Err(err) => {
                warn!(target: LOG_TARGET, %err, "discarding unusable snapshot");
                None
            }
        }
    }

    /// Write a snapshot. Failures are logged and otherwise ignored.
    fn persist(&mut self) {
        let result = self
            .config
            .codec
            .encode(&self.state)
            .and_then(|bytes| self.store.save(&bytes));

        match result {
            Ok(()) => trace!(target: LOG_TARGET, stage = %self.state.stage, "snapshot saved"),
            Err(err) => warn!(target: LOG_TARGET, %err, "failed to save snapshot"),
        }
    }

    fn require_stage(&self, operation: &'static str, allowed: &[Stage]) -> Result<(), EngineError> {
        if allowed.contains(&self.state.stage) {
            Ok(())
        } else {
            Err(EngineError::WrongStage {
                operation,
                stage: self.state.stage,
            })
        }
    }

    fn round_mut(&mut self) -> Result<&mut RoundInfo, EngineError> {
        self.state.round_info.as_mut().ok_or(EngineError::NoActiveRound)
    }

    fn team_mut(&mut self, team: TeamId) -> Result<&mut Team, EngineError> {
        self.state
            .teams
            .as_mut()
            .and_then(|teams| teams.get_mut(team.index()))
            .ok_or(EngineError::RulesNotSet)
    }

    // === Stage transitions ===

    /// Throw everything away and go back to `Setup`.
    pub fn reset_game(&mut self) {
        self.state = GameState::new(self.config.total_rounds);
        info!(target: LOG_TARGET, "game reset");
        self.persist();
    }

    /// Apply the host's rules and start collecting cards.
    pub fn set_rules(&mut self, rules: Rules) -> Result<(), EngineError> {
        self.require_stage("set_rules", &[Stage::Setup])?;
        rules.validate().map_err(EngineError::InvalidRules)?;

        self.state.teams = Some(Team::roster(rules.team_count));
        self.state.total_cards = Some(rules.total_cards);
        self.state.time_per_turn = Some(rules.time_per_turn);
        self.state.switch_teams_after_round = rules.switch_teams_after_round;
        self.state.stage = Stage::AddCards;

        info!(
            target: LOG_TARGET,
            teams = rules.team_count,
            total_cards = rules.total_cards,
            time_per_turn = rules.time_per_turn,
            switch_teams = rules.switch_teams_after_round,
            "rules set"
        );
        self.persist();
        Ok(())
    }

    /// Lock in the roster and set up the first round.
    pub fn finalize_cards(&mut self) -> Result<(), EngineError> {
        self.require_stage("finalize_cards", &[Stage::AddCards])?;
        let total = self.state.total_cards.ok_or(EngineError::RulesNotSet)?;
        let time = self.state.time_per_turn.ok_or(EngineError::RulesNotSet)?;
        if self.state.cards.len() != total {
            return Err(EngineError::RosterIncomplete {
                have: self.state.cards.len(),
                total,
            });
        }

        let order = self.rng.shuffled_order(total);
        self.state.round_info = Some(RoundInfo::new(order, time, TeamId::new(0)));
        self.state.stage = Stage::Ready;

        info!(target: LOG_TARGET, cards = total, "cards finalized");
        self.persist();
        Ok(())
    }

    /// Start the current team's turn.
    pub fn start_playing(&mut self) -> Result<(), EngineError> {
        self.require_stage("start_playing", &[Stage::Ready])?;
        self.state.stage = Stage::Play;
        debug!(target: LOG_TARGET, "turn started");
        self.persist();
        Ok(())
    }

    /// End the current turn and hand the bowl to the next team.
    pub fn change_to_next_team(&mut self) -> Result<(), EngineError> {
        self.require_stage("change_to_next_team", &[Stage::Ready, Stage::Play])?;
        self.next_team()?;
        self.persist();
        Ok(())
    }

    /// Clear the cards and scores for a new play-through with the same
    /// teams and rules.
    pub fn change_cards(&mut self) -> Result<(), EngineError> {
        self.require_stage("change_cards", &[Stage::Done])?;
        self.state.cards.clear();
        if let Some(teams) = self.state.teams.as_mut() {
            for team in teams {
                team.points = 0;
            }
        }
        self.state.round_info = None;
        self.state.stage = Stage::AddCards;

        info!(target: LOG_TARGET, "changing cards");
        self.persist();
        Ok(())
    }

    // === Turn actions ===

    /// One second passed. At zero the turn is over.
    pub fn tick(&mut self) -> Result<(), EngineError> {
        self.require_stage("tick", &[Stage::Play])?;
        let interval = self.config.save_interval_secs.max(1);
        let round = self.round_mut()?;
        round.time = round.time.saturating_sub(1);
        let time = round.time;

        if time == 0 {
            info!(target: LOG_TARGET, "time is up");
            self.next_team()?;
            self.persist();
        } else if time % interval == 0 {
            self.persist();
        }
        Ok(())
    }

    /// The current team guessed the card on display.
    pub fn got_it(&mut self) -> Result<(), EngineError> {
        self.require_stage("got_it", &[Stage::Play])?;
        let round = self.round_mut()?;
        if round.cards_left == 0 {
            return Err(EngineError::NoCardsLeft);
        }

        let card_index = round.card_index;
        let team = round.current_team;
        let card = round.complete_current();
        round.last_action = Some(TurnAction::GotIt { card_index });
        let cards_left = round.cards_left;

        self.team_mut(team)?.points += 1;
        debug!(target: LOG_TARGET, %team, card, cards_left, "got it");

        if cards_left == 0 {
            self.finish_round()?;
        } else {
            self.set_next_card_index()?;
        }
        self.persist();
        Ok(())
    }

    /// Skip the card on display without scoring.
    pub fn pass(&mut self) -> Result<(), EngineError> {
        self.require_stage("pass", &[Stage::Play])?;
        let round = self.round_mut()?;
        let card_index = round.card_index;
        round.advance()?;
        round.last_action = Some(TurnAction::Pass { card_index });

        debug!(target: LOG_TARGET, card_index, "pass");
        self.persist();
        Ok(())
    }

    /// Take back the last `got_it` or `pass` of this turn.
    pub fn undo(&mut self) -> Result<(), EngineError> {
        self.require_stage("undo", &[Stage::Play])?;
        let round = self.round_mut()?;
        let action = round.last_action.take().ok_or(EngineError::NothingToUndo)?;
        let team = round.current_team;
        round.card_index = action.card_index();

        if let TurnAction::GotIt { card_index } = action {
            round.reopen(card_index);
            let acting = self.team_mut(team)?;
            acting.points = acting.points.saturating_sub(1);
        }

        debug!(target: LOG_TARGET, ?action, "undo");
        self.persist();
        Ok(())
    }

    // === Round bookkeeping ===

    fn set_next_card_index(&mut self) -> Result<(), EngineError> {
        self.round_mut()?.advance()
    }

    fn next_team(&mut self) -> Result<(), EngineError> {
        let team_count = self.state.teams().len();
        if team_count == 0 {
            return Err(EngineError::RulesNotSet);
        }
        let time = self.state.time_per_turn.ok_or(EngineError::RulesNotSet)?;
        let round = self
            .state
            .round_info
            .as_mut()
            .ok_or(EngineError::NoActiveRound)?;

        let next = round.current_team.next(team_count);
        let order = self.rng.shuffled_order(round.cards.len());
        round.begin_turn(next, time, order);
        round.advance()?;
        self.state.stage = Stage::Ready;

        info!(target: LOG_TARGET, team = %next, "next team up");
        Ok(())
    }

    fn finish_round(&mut self) -> Result<(), EngineError> {
        let total_rounds = self.state.total_rounds;
        let switch = self.state.switch_teams_after_round;
        let round = self
            .state
            .round_info
            .as_mut()
            .ok_or(EngineError::NoActiveRound)?;

        round.round_number += 1;
        round.last_action = None;
        let finished = round.round_number;

        if finished >= total_rounds {
            self.state.stage = Stage::Done;
            info!(target: LOG_TARGET, rounds = finished, "game over");
            return Ok(());
        }

        let order = self.rng.shuffled_order(round.cards.len());
        round.restock(order);
        self.state.stage = Stage::Ready;
        info!(target: LOG_TARGET, round = finished, "round finished");

        if switch {
            self.next_team()
        } else {
            self.set_next_card_index()
        }
    }

    // === Card roster ===

    /// Add a card to the roster.
    pub fn add_card(&mut self, card: Card) -> Result<(), EngineError> {
        self.require_stage("add_card", &[Stage::AddCards])?;
        let total = self.state.total_cards.ok_or(EngineError::RulesNotSet)?;
        if card.is_blank() {
            return Err(EngineError::BlankCard);
        }
        if self.state.cards.len() >= total {
            return Err(EngineError::RosterFull { total });
        }

        debug!(target: LOG_TARGET, card = %card, "card added");
        self.state.cards.push(card);
        self.persist();
        Ok(())
    }

    /// Remove the most recently added card, if any.
    pub fn remove_last_card(&mut self) -> Result<Option<Card>, EngineError> {
        self.require_stage("remove_last_card", &[Stage::AddCards])?;
        let removed = self.state.cards.pop();
        if removed.is_some() {
            self.persist();
        }
        Ok(removed)
    }

    /// Remove the first card whose name matches, ignoring case.
    ///
    /// Returns `false` and changes nothing when no card matches.
    pub fn remove_card_by_name(&mut self, name: &str) -> Result<bool, EngineError> {
        self.require_stage("remove_card_by_name", &[Stage::AddCards])?;
        let Some(position) = self.state.cards.iter().position(|card| card.matches(name)) else {
            return Ok(false);
        };

        let removed = self.state.cards.remove(position);
        debug!(target: LOG_TARGET, card = %removed, "card removed");
        self.persist();
        Ok(true)
    }

    // === Queries ===

    /// Current stage.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.state.stage
    }

    /// Full game state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Teams in setup order (empty before rules are set).
    #[must_use]
    pub fn teams(&self) -> &[Team] {
        self.state.teams()
    }

    /// Submitted cards.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.state.cards
    }

    /// Round in progress, if any.
    #[must_use]
    pub fn round(&self) -> Option<&RoundInfo> {
        self.state.round_info.as_ref()
    }

    /// Card on display.
    pub fn current_card(&self) -> Result<&Card, EngineError> {
        let round = self.round().ok_or(EngineError::NoActiveRound)?;
        self.state
            .cards
            .get(round.current_card())
            .ok_or(EngineError::NoActiveRound)
    }

    /// Team whose turn it is.
    pub fn current_team(&self) -> Result<&Team, EngineError> {
        let round = self.round().ok_or(EngineError::NoActiveRound)?;
        self.teams()
            .get(round.current_team.index())
            .ok_or(EngineError::RulesNotSet)
    }

    /// Name of the team whose turn it is.
    pub fn current_team_name(&self) -> Result<&str, EngineError> {
        self.current_team().map(|team| team.name.as_str())
    }

    /// Teams by points, highest first. Ties keep setup order.
    #[must_use]
    pub fn standings(&self) -> Vec<&Team> {
        let mut sorted: Vec<&Team> = self.teams().iter().collect();
        sorted.sort_by(|a, b| b.points.cmp(&a.points));
        sorted
    }

    /// Leading team once the game is over.
    #[must_use]
    pub fn winner(&self) -> Option<&Team> {
        if self.state.stage != Stage::Done {
            return None;
        }
        self.standings().into_iter().next()
    }

    /// Cards still to be added before play can start.
    #[must_use]
    pub fn cards_needed(&self) -> usize {
        self.state
            .total_cards
            .map_or(0, |total| total.saturating_sub(self.state.cards.len()))
    }

    /// Whether `add_card` would accept another card.
    #[must_use]
    pub fn can_add_card(&self) -> bool {
        self.state.stage == Stage::AddCards && self.cards_needed() > 0
    }

    /// Whether `finalize_cards` would succeed.
    #[must_use]
    pub fn can_finalize(&self) -> bool {
        self.state.stage == Stage::AddCards
            && self.state.total_cards == Some(self.state.cards.len())
    }

    // === Store access ===

    /// The snapshot store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the snapshot store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Give the store back, dropping the engine.
    pub fn into_store(self) -> S {
        self.store
    }
}
