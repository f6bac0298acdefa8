//! Standings: per-player aggregation of finished matches and tie-break ranking.

use crate::models::{Group, PlayerId, PlayerStats, Team, TieBreakCriterion};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Compute ranked standings for `group`.
///
/// 1. One zeroed row per player, in seeding order.
/// 2. Each finished match adds its score to all four players; the side with the
///    higher score gets a win each, the other a loss each. Draws only add points.
/// 3. `points_diff` is refreshed once aggregation is done.
/// 4. Rows are ranked by `criteria` in order, ties keep their seeding order.
pub fn compute_standings(group: &Group, criteria: &[TieBreakCriterion]) -> Vec<PlayerStats> {
    let mut stats: Vec<PlayerStats> = group.player_ids.iter().copied().map(PlayerStats::new).collect();
    let index: HashMap<PlayerId, usize> = group
        .player_ids
        .iter()
        .enumerate()
        .map(|(i, id)| (*id, i))
        .collect();

    for m in group.finished_matches() {
        let winner = m.winner();
        for (team, scored, conceded) in [
            (Team::A, m.score_a, m.score_b),
            (Team::B, m.score_b, m.score_a),
        ] {
            for pid in m.team(team) {
                let Some(&i) = index.get(&pid) else {
                    continue;
                };
                let s = &mut stats[i];
                s.add_points(scored, conceded);
                match winner {
                    Some(w) if w == team => s.add_win(),
                    Some(_) => s.add_loss(),
                    None => {}
                }
            }
        }
    }

    for s in &mut stats {
        s.refresh_diff();
    }

    stable_sort_by(&mut stats, |a, b| compare_by_criteria(group, criteria, a, b));
    stats
}

/// Recompute and store the group's standings.
pub fn refresh_standings(group: &mut Group, criteria: &[TieBreakCriterion]) {
    group.standings = compute_standings(group, criteria);
}

fn compare_by_criteria(
    group: &Group,
    criteria: &[TieBreakCriterion],
    a: &PlayerStats,
    b: &PlayerStats,
) -> Ordering {
    criteria
        .iter()
        .map(|c| match c {
            TieBreakCriterion::Wins => b.wins.cmp(&a.wins),
            TieBreakCriterion::GamesFor => b.points_for.cmp(&a.points_for),
            TieBreakCriterion::GameDifference => b.points_diff.cmp(&a.points_diff),
            TieBreakCriterion::HeadToHead => head_to_head(group, a.player_id, b.player_id),
        })
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// `Less` if `a` won the first decided finished match where `a` and `b` were
/// on opposite sides, `Greater` if `b` did, `Equal` if they never met or only drew.
pub fn head_to_head(group: &Group, a: PlayerId, b: PlayerId) -> Ordering {
    for m in group.finished_matches() {
        let (Some(side_a), Some(side_b)) = (m.side_of(a), m.side_of(b)) else {
            continue;
        };
        if side_a == side_b {
            continue;
        }
        match m.winner() {
            Some(w) if w == side_a => return Ordering::Less,
            Some(_) => return Ordering::Greater,
            None => {}
        }
    }
    Ordering::Equal
}

/// Stable insertion sort. Head-to-head can make the comparator cyclic
/// (A beat B, B beat C, C beat A), which `slice::sort_by` is allowed to panic on.
fn stable_sort_by<T, F>(items: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && cmp(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}
