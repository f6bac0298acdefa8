//! Data structures for the tournament: players, matches, groups, tournaments.

mod game;
mod group;
mod player;
mod tournament;

pub use game::{GameMatch, MatchId, MatchStatus, Round, Team};
pub use group::{Group, GroupDraft, GroupId};
pub use player::{Player, PlayerId, PlayerStats};
pub use tournament::{
    clean_name, Sport, TieBreakCriterion, TieBreakMode, Tournament, TournamentError, TournamentId,
    TournamentRules,
};
