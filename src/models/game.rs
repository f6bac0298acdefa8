//! Doubles match, Team and MatchStatus.

use crate::models::group::GroupId;
use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// One round of the rotation: matches played at the same time.
pub type Round = Vec<GameMatch>;

/// Side of a match. Team A is `player_1 + player_2`, team B is `player_3 + player_4`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    A,
    B,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Finished,
}

/// A single 2v2 match inside a group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub group_id: GroupId,
    pub player_1: PlayerId,
    pub player_2: PlayerId,
    pub player_3: PlayerId,
    pub player_4: PlayerId,
    pub score_a: u32,
    pub score_b: u32,
    pub status: MatchStatus,
}

impl GameMatch {
    /// New pending match with a fresh id and a 0-0 score.
    pub fn new(group_id: GroupId, team_a: [PlayerId; 2], team_b: [PlayerId; 2]) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            player_1: team_a[0],
            player_2: team_a[1],
            player_3: team_b[0],
            player_4: team_b[1],
            score_a: 0,
            score_b: 0,
            status: MatchStatus::Pending,
        }
    }

    pub fn team_a(&self) -> [PlayerId; 2] {
        [self.player_1, self.player_2]
    }

    pub fn team_b(&self) -> [PlayerId; 2] {
        [self.player_3, self.player_4]
    }

    pub fn team(&self, team: Team) -> [PlayerId; 2] {
        match team {
            Team::A => self.team_a(),
            Team::B => self.team_b(),
        }
    }

    /// All four player slots in order.
    pub fn players(&self) -> [PlayerId; 4] {
        [self.player_1, self.player_2, self.player_3, self.player_4]
    }

    /// Which side the player is on, if they play in this match.
    pub fn side_of(&self, player_id: PlayerId) -> Option<Team> {
        if self.team_a().contains(&player_id) {
            Some(Team::A)
        } else if self.team_b().contains(&player_id) {
            Some(Team::B)
        } else {
            None
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    /// Winning side of a finished match. `None` while pending or on a draw.
    pub fn winner(&self) -> Option<Team> {
        if !self.is_finished() {
            return None;
        }
        match self.score_a.cmp(&self.score_b) {
            std::cmp::Ordering::Greater => Some(Team::A),
            std::cmp::Ordering::Less => Some(Team::B),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Overwrite the score and mark the match finished.
    pub fn finish(&mut self, score_a: u32, score_b: u32) {
        self.score_a = score_a;
        self.score_b = score_b;
        self.status = MatchStatus::Finished;
    }
}
