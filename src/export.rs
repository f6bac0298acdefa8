//! CSV export of group standings.

use crate::models::{Group, Player, PlayerId, TournamentError};
use serde::Serialize;

#[derive(Serialize)]
struct StandingsRow<'a> {
    rank: usize,
    player_id: PlayerId,
    name: &'a str,
    wins: u32,
    losses: u32,
    points_for: u64,
    points_against: u64,
    points_diff: i64,
}

/// Render the group's current standings as CSV, one row per player in rank order.
/// Players missing from `players` get an empty name.
pub fn standings_csv(group: &Group, players: &[Player]) -> Result<String, TournamentError> {
    let to_err = |e: csv::Error| TournamentError::Storage(format!("Failed to write CSV: {}", e));
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for (i, s) in group.standings.iter().enumerate() {
        let name = players
            .iter()
            .find(|p| p.id == s.player_id)
            .map(|p| p.name.as_str())
            .unwrap_or("");
        wtr.serialize(StandingsRow {
            rank: i + 1,
            player_id: s.player_id,
            name,
            wins: s.wins,
            losses: s.losses,
            points_for: s.points_for,
            points_against: s.points_against,
            points_diff: s.points_diff,
        })
        .map_err(to_err)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| TournamentError::Storage(format!("Failed to flush CSV: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| TournamentError::Storage(e.to_string()))
}
