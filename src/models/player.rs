//! Player and PlayerStats data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in matches, groups and lookups).
pub type PlayerId = Uuid;

/// A registered player. Matches and groups reference players by id only.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    /// Create a new player with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// One row of a group's standings, derived from the group's finished matches.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub player_id: PlayerId,
    pub wins: u32,
    pub losses: u32,
    pub points_for: u64,
    pub points_against: u64,
    /// `points_for - points_against`, refreshed after aggregation.
    pub points_diff: i64,
}

impl PlayerStats {
    /// Zeroed stats for a player.
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            wins: 0,
            losses: 0,
            points_for: 0,
            points_against: 0,
            points_diff: 0,
        }
    }

    /// Add one match's score from this player's side.
    pub fn add_points(&mut self, scored: u32, conceded: u32) {
        self.points_for = self.points_for.saturating_add(u64::from(scored));
        self.points_against = self.points_against.saturating_add(u64::from(conceded));
    }

    /// Record a win for this player.
    pub fn add_win(&mut self) {
        self.wins += 1;
    }

    /// Record a loss for this player.
    pub fn add_loss(&mut self) {
        self.losses += 1;
    }

    pub fn refresh_diff(&mut self) {
        let points_for = i64::try_from(self.points_for).unwrap_or(i64::MAX);
        let points_against = i64::try_from(self.points_against).unwrap_or(i64::MAX);
        self.points_diff = points_for - points_against;
    }
}
