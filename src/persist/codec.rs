//! Snapshot encodings.

use serde::{Deserialize, Serialize};

use crate::engine::GameState;

use super::store::StoreError;

/// How a `GameState` is turned into bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnapshotCodec {
    /// Human-readable JSON.
    #[default]
    Json,
    /// Compact bincode.
    Binary,
}

impl SnapshotCodec {
    /// Encode a state.
    pub fn encode(self, state: &GameState) -> Result<Vec<u8>, StoreError> {
        match self {
            SnapshotCodec::Json => Ok(serde_json::to_vec(state)?),
            SnapshotCodec::Binary => Ok(bincode::serialize(state)?),
        }
    }

    /// Decode and validate a state.
    ///
    /// Fails on malformed bytes, unknown or missing fields, and on states
    /// that break the game's invariants.
    pub fn decode(self, bytes: &[u8]) -> Result<GameState, StoreError> {
        let state: GameState = match self {
            SnapshotCodec::Json => serde_json::from_slice(bytes)?,
            SnapshotCodec::Binary => bincode::deserialize(bytes)?,
        };
        state.validate().map_err(StoreError::Invalid)?;
        Ok(state)
    }
}
