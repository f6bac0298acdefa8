//! Group construction: single groups and random partitions.

use crate::logic::schedule::generate_schedule;
use crate::models::{clean_name, Group, GroupDraft, PlayerId, TournamentError};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use uuid::Uuid;

/// Build one group and its full schedule. Fails without building anything if
/// the name is blank or the players are not a valid group.
pub fn build_group(name: impl Into<String>, player_ids: &[PlayerId]) -> Result<Group, TournamentError> {
    let name = clean_name(&name.into())?;
    let mut seen = HashSet::with_capacity(player_ids.len());
    if let Some(&dup) = player_ids.iter().find(|id| !seen.insert(**id)) {
        return Err(TournamentError::DuplicatePlayer(dup));
    }

    let id = Uuid::new_v4();
    let matches = generate_schedule(player_ids, id)?;
    Ok(Group {
        id,
        name,
        player_ids: player_ids.to_vec(),
        matches,
        standings: Vec::new(),
    })
}

/// Build every draft; returns the first error and no groups if any draft is invalid.
pub fn build_groups(drafts: &[GroupDraft]) -> Result<Vec<Group>, TournamentError> {
    drafts
        .iter()
        .map(|d| build_group(d.name.as_str(), &d.player_ids))
        .collect()
}

/// Shuffle the players and split them into `num_groups` chunks of
/// `ceil(count / num_groups)`, named "Group 1", "Group 2", ...
///
/// Leftovers are not redistributed: every chunk must itself be a valid group.
pub fn partition_into_groups(
    player_ids: &[PlayerId],
    num_groups: usize,
) -> Result<Vec<Group>, TournamentError> {
    partition_into_groups_with_rng(player_ids, num_groups, &mut rand::thread_rng())
}

/// [`partition_into_groups`] with a caller-supplied RNG.
pub fn partition_into_groups_with_rng<R: Rng + ?Sized>(
    player_ids: &[PlayerId],
    num_groups: usize,
    rng: &mut R,
) -> Result<Vec<Group>, TournamentError> {
    if num_groups == 0 {
        return Err(TournamentError::InvalidGroupCount);
    }

    let mut shuffled = player_ids.to_vec();
    shuffled.shuffle(rng);

    let group_size = player_ids.len().div_ceil(num_groups);
    (0..num_groups)
        .map(|i| {
            let start = (i * group_size).min(shuffled.len());
            let end = ((i + 1) * group_size).min(shuffled.len());
            build_group(format!("Group {}", i + 1), &shuffled[start..end])
        })
        .collect()
}
