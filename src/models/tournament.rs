//! Tournament, its rules, and the error type shared by all operations.

use crate::models::game::MatchId;
use crate::models::group::{Group, GroupId};
use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Group needs an even number of players, at least 4.
    InvalidGroupSize { count: usize },
    /// The same player appears twice in one group.
    DuplicatePlayer(PlayerId),
    /// Asked to split players into zero groups.
    InvalidGroupCount,
    TournamentNotFound(Uuid),
    GroupNotFound(GroupId),
    MatchNotFound(MatchId),
    PlayerNotFound(PlayerId),
    /// Score was negative or out of range.
    MalformedScore(i64),
    /// Name was empty after trimming.
    InvalidName,
    /// Persistence backend failed to read, write or parse.
    Storage(String),
}

impl TournamentError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TournamentError::TournamentNotFound(_)
                | TournamentError::GroupNotFound(_)
                | TournamentError::MatchNotFound(_)
                | TournamentError::PlayerNotFound(_)
        )
    }
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidGroupSize { count } => write!(
                f,
                "Group must have an even number of players, minimum 4 (got {})",
                count
            ),
            TournamentError::DuplicatePlayer(_) => write!(f, "A player appears twice in the group"),
            TournamentError::InvalidGroupCount => write!(f, "Number of groups must be at least 1"),
            TournamentError::TournamentNotFound(_) => write!(f, "Tournament not found"),
            TournamentError::GroupNotFound(_) => write!(f, "Group not found"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::PlayerNotFound(_) => write!(f, "Player not found"),
            TournamentError::MalformedScore(value) => {
                write!(f, "Score must be a non-negative number (got {})", value)
            }
            TournamentError::InvalidName => write!(f, "Name must not be empty"),
            TournamentError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Trim a tournament, group or player name; blank names are rejected.
pub fn clean_name(name: &str) -> Result<String, TournamentError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TournamentError::InvalidName);
    }
    Ok(trimmed.to_string())
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sport {
    #[default]
    BeachTennis,
    Padel,
    Tennis,
    Generic,
}

/// When a tie-break game is played inside a set.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreakMode {
    #[default]
    Always,
    DecidingSetOnly,
    Never,
}

/// One ranking key for standings, applied only when the previous keys tie.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TieBreakCriterion {
    /// More wins first.
    Wins,
    /// More points scored first.
    GamesFor,
    /// Better points difference first.
    GameDifference,
    /// Winner of the direct meeting first.
    HeadToHead,
}

impl TieBreakCriterion {
    pub const DEFAULT_ORDER: [TieBreakCriterion; 4] = [
        TieBreakCriterion::Wins,
        TieBreakCriterion::GamesFor,
        TieBreakCriterion::GameDifference,
        TieBreakCriterion::HeadToHead,
    ];

    /// Parse a list of tokens, skipping unknown ones. Falls back to the default
    /// order when nothing usable is left.
    pub fn parse_list<S: AsRef<str>>(tokens: &[S]) -> Vec<TieBreakCriterion> {
        let parsed: Vec<_> = tokens
            .iter()
            .filter_map(|t| match t.as_ref().parse() {
                Ok(c) => Some(c),
                Err(()) => {
                    log::warn!("Ignoring unknown tie-break criterion {:?}", t.as_ref());
                    None
                }
            })
            .collect();
        if parsed.is_empty() {
            Self::DEFAULT_ORDER.to_vec()
        } else {
            parsed
        }
    }
}

impl FromStr for TieBreakCriterion {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "wins" => Ok(TieBreakCriterion::Wins),
            "gamesFor" | "games_for" => Ok(TieBreakCriterion::GamesFor),
            "gameDifference" | "game_difference" => Ok(TieBreakCriterion::GameDifference),
            "headToHead" | "head_to_head" => Ok(TieBreakCriterion::HeadToHead),
            _ => Err(()),
        }
    }
}

/// Scoring rules attached to a tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentRules {
    pub sets_to_win: u32,
    pub games_per_set: u32,
    pub tie_break: TieBreakMode,
    pub tie_break_criteria: Vec<TieBreakCriterion>,
}

impl Default for TournamentRules {
    fn default() -> Self {
        Self {
            sets_to_win: 2,
            games_per_set: 6,
            tie_break: TieBreakMode::Always,
            tie_break_criteria: TieBreakCriterion::DEFAULT_ORDER.to_vec(),
        }
    }
}

/// A tournament: finalized groups plus the rules used to rank them.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub sport: Sport,
    pub groups: Vec<Group>,
    pub created_at: DateTime<Utc>,
    pub rules: TournamentRules,
}

impl Tournament {
    /// Create a tournament with already-built groups.
    pub fn new(
        name: impl Into<String>,
        sport: Sport,
        groups: Vec<Group>,
        rules: TournamentRules,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            sport,
            groups,
            created_at: Utc::now(),
            rules,
        }
    }

    /// Criteria to rank with; the defaults when the list is empty.
    pub fn tie_break_criteria(&self) -> &[TieBreakCriterion] {
        if self.rules.tie_break_criteria.is_empty() {
            &TieBreakCriterion::DEFAULT_ORDER
        } else {
            &self.rules.tie_break_criteria
        }
    }

    pub fn group(&self, group_id: GroupId) -> Result<&Group, TournamentError> {
        self.groups
            .iter()
            .find(|g| g.id == group_id)
            .ok_or(TournamentError::GroupNotFound(group_id))
    }

    pub fn group_mut(&mut self, group_id: GroupId) -> Result<&mut Group, TournamentError> {
        self.groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or(TournamentError::GroupNotFound(group_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_list_skips_unknown_tokens() {
        let parsed = TieBreakCriterion::parse_list(&["headToHead", "luck", "wins"]);
        assert_eq!(
            parsed,
            vec![TieBreakCriterion::HeadToHead, TieBreakCriterion::Wins]
        );
    }

    #[test]
    fn parse_list_falls_back_to_defaults() {
        let parsed = TieBreakCriterion::parse_list(&["nope"]);
        assert_eq!(parsed, TieBreakCriterion::DEFAULT_ORDER.to_vec());
        let empty: [&str; 0] = [];
        assert_eq!(
            TieBreakCriterion::parse_list(&empty),
            TieBreakCriterion::DEFAULT_ORDER.to_vec()
        );
    }

    #[test]
    fn criteria_serialize_as_camel_case_tokens() {
        let json = serde_json::to_string(&TieBreakCriterion::GameDifference).unwrap();
        assert_eq!(json, "\"gameDifference\"");
    }

    #[test]
    fn default_rules() {
        let rules = TournamentRules::default();
        assert_eq!(rules.sets_to_win, 2);
        assert_eq!(rules.games_per_set, 6);
        assert_eq!(rules.tie_break, TieBreakMode::Always);
        assert_eq!(rules.tie_break_criteria.len(), 4);
    }

    #[test]
    fn missing_group_is_not_found() {
        let t = Tournament::new("Open", Sport::Padel, Vec::new(), TournamentRules::default());
        let err = t.group(Uuid::new_v4()).unwrap_err();
        assert!(err.is_not_found());
    }
}
