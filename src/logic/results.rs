//! Recording match scores.

use crate::models::{Group, MatchId, TournamentError};

/// Convert raw score input into a score. Negative or oversized values are rejected.
pub fn checked_score(value: i64) -> Result<u32, TournamentError> {
    u32::try_from(value).map_err(|_| TournamentError::MalformedScore(value))
}

/// Set the score of a match in `group` and mark it finished.
///
/// Recording again overwrites the previous score. Equal scores are a draw.
/// Standings are not refreshed here.
pub fn record_result(
    group: &mut Group,
    match_id: MatchId,
    score_a: u32,
    score_b: u32,
) -> Result<(), TournamentError> {
    let m = group
        .find_match_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    m.finish(score_a, score_b);
    log::debug!("Match {} finished {}-{}", match_id, score_a, score_b);
    Ok(())
}
