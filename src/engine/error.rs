//! Engine errors.
//!
//! Every variant is a caller mistake (an operation invoked at the wrong
//! moment or with bad input). The engine reports it and leaves its state
//! as it was.

use crate::core::Stage;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("{operation} is not allowed during {stage}")]
    WrongStage {
        operation: &'static str,
        stage: Stage,
    },
    #[error("rules have not been set")]
    RulesNotSet,
    #[error("no round in progress")]
    NoActiveRound,
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("every card in the round is solved")]
    NoCardsLeft,
    #[error("all {total} cards have been added")]
    RosterFull { total: usize },
    #[error("{have} of {total} cards added")]
    RosterIncomplete { have: usize, total: usize },
    #[error("card text is blank")]
    BlankCard,
    #[error("invalid rules: {0}")]
    InvalidRules(String),
}
