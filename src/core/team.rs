//! Team identification and scores.
//!
//! ## TeamId
//!
//! Type-safe team index. Teams are 0-based internally and displayed 1-based
//! ("Team 1", "Team 2", ...).
//!
//! ## Team
//!
//! A team's display name and running score.

use serde::{Deserialize, Serialize};

/// Team identifier supporting up to 255 teams.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u8);

impl TeamId {
    /// Create a new team ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw team index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The team that plays after this one, wrapping around.
    ///
    /// ```
    /// use fishbowl::core::TeamId;
    ///
    /// assert_eq!(TeamId::new(0).next(3), TeamId::new(1));
    /// assert_eq!(TeamId::new(2).next(3), TeamId::new(0));
    /// ```
    ///
    /// Wraps to team 0 past the last representable ID.
    #[must_use]
    pub fn next(self, team_count: usize) -> Self {
        u8::try_from((self.index() + 1) % team_count).map_or(Self(0), Self)
    }

    /// Iterate over all team IDs for a game with `team_count` teams.
    /// Yields at most 256 IDs.
    pub fn all(team_count: usize) -> impl Iterator<Item = TeamId> {
        (0..=u8::MAX).take(team_count).map(TeamId)
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Team {}", self.index() + 1)
    }
}

/// A team and its score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Team {
    pub name: String,
    pub points: u32,
}

impl Team {
    /// Create a team with zero points.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: 0,
        }
    }

    /// Build `team_count` teams named after their IDs.
    #[must_use]
    pub fn roster(team_count: usize) -> Vec<Team> {
        TeamId::all(team_count)
            .map(|id| Team::new(id.to_string()))
            .collect()
    }
}
