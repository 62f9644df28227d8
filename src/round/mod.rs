//! Per-round turn state.
//!
//! A round plays every card once. `RoundInfo` tracks the play order, which
//! cards are solved, whose turn it is, the clock, and the single pending
//! undo record.

pub mod info;

pub use info::{RoundInfo, TurnAction};
