//! Super 8 schedule: circle-method round robin adapted for doubles.

use crate::models::{GameMatch, GroupId, PlayerId, Round, TournamentError};

/// Smallest group that can field one doubles match.
pub const MIN_GROUP_SIZE: usize = 4;

/// Check the group size rule: even and at least [`MIN_GROUP_SIZE`].
pub fn validate_group_size(count: usize) -> Result<(), TournamentError> {
    if count < MIN_GROUP_SIZE || count % 2 != 0 {
        return Err(TournamentError::InvalidGroupSize { count });
    }
    Ok(())
}

/// Generate `n - 1` rounds of doubles matches for `player_ids`.
///
/// 1. Work on a copy of the seeding order.
/// 2. For each step `i = 0, 2, 4, ...` while `i + 1 < n/2`, team A is positions
///    `i, i+1` and team B is the mirrored `n-1-i, n-2-i`.
/// 3. Keep position 0 fixed and rotate the rest right by one.
///
/// With `n % 4 == 0` every player plays once per round. With `n % 4 == 2`
/// the two middle players sit out that round.
pub fn generate_schedule(
    player_ids: &[PlayerId],
    group_id: GroupId,
) -> Result<Vec<Round>, TournamentError> {
    let n = player_ids.len();
    validate_group_size(n)?;

    let half = n / 2;
    let mut order = player_ids.to_vec();
    let mut rounds = Vec::with_capacity(n - 1);

    for _ in 0..n - 1 {
        let round: Round = (0..half)
            .step_by(2)
            .take_while(|&i| i + 1 < half)
            .map(|i| {
                GameMatch::new(
                    group_id,
                    [order[i], order[i + 1]],
                    [order[n - 1 - i], order[n - 2 - i]],
                )
            })
            .collect();
        rounds.push(round);

        // Last element moves right after the fixed one.
        order[1..].rotate_right(1);
    }

    log::debug!(
        "Generated {} rounds for {} players in group {}",
        rounds.len(),
        n,
        group_id
    );
    Ok(rounds)
}
