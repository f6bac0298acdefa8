//! Group: a set of players playing one round-robin schedule.

use crate::models::game::{GameMatch, MatchId, Round};
use crate::models::player::{PlayerId, PlayerStats};
use serde::{Deserialize, Serialize};

/// Unique identifier for a group.
pub type GroupId = uuid::Uuid;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    /// Unique player ids; order is the seeding used by the schedule.
    pub player_ids: Vec<PlayerId>,
    /// Rounds generated once at creation. Only scores change afterwards.
    pub matches: Vec<Round>,
    /// Last computed standings, empty until the first refresh.
    pub standings: Vec<PlayerStats>,
}

/// Input for building a group by hand: a name and the chosen players.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupDraft {
    pub name: String,
    pub player_ids: Vec<PlayerId>,
}

impl Group {
    /// Every match of every round, in schedule order.
    pub fn all_matches(&self) -> impl Iterator<Item = &GameMatch> {
        self.matches.iter().flatten()
    }

    /// Finished matches only, in schedule order.
    pub fn finished_matches(&self) -> impl Iterator<Item = &GameMatch> {
        self.all_matches().filter(|m| m.is_finished())
    }

    pub fn find_match(&self, match_id: MatchId) -> Option<&GameMatch> {
        self.all_matches().find(|m| m.id == match_id)
    }

    pub fn find_match_mut(&mut self, match_id: MatchId) -> Option<&mut GameMatch> {
        self.matches.iter_mut().flatten().find(|m| m.id == match_id)
    }
}
