//! Super 8 tournament organizer: library with models, scheduling and standings logic.

pub mod export;
pub mod logic;
pub mod models;
pub mod store;

pub use export::standings_csv;
pub use logic::{
    build_group, build_groups, checked_score, compute_standings, generate_schedule, head_to_head,
    partition_into_groups, partition_into_groups_with_rng, record_result, refresh_standings,
    validate_group_size, MIN_GROUP_SIZE,
};
pub use models::{
    GameMatch, Group, GroupDraft, GroupId, MatchId, MatchStatus, Player, PlayerId, PlayerStats,
    Round, Sport, Team, TieBreakCriterion, TieBreakMode, Tournament, TournamentError, TournamentId,
    TournamentRules,
};
pub use store::{FileStore, KeyValueStore, MemoryStore, TournamentStore};
