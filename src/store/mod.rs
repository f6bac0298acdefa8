//! Tournament store: the player registry and all tournaments, passed explicitly
//! by the host and saved through a [`KeyValueStore`].

mod persistence;

pub use persistence::{FileStore, KeyValueStore, MemoryStore};

use crate::logic::{build_groups, record_result, refresh_standings};
use crate::models::{
    clean_name, Group, GroupDraft, GroupId, MatchId, Player, PlayerId, PlayerStats, Sport, Tournament,
    TournamentError, TournamentId, TournamentRules,
};
use serde::{Deserialize, Serialize};

/// Storage key for the tournament list.
pub const TOURNAMENTS_KEY: &str = "tournaments-storage";
/// Storage key for the player registry.
pub const PLAYERS_KEY: &str = "players-storage";

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentStore {
    players: Vec<Player>,
    tournaments: Vec<Tournament>,
}

impl TournamentStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- players ----

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, TournamentError> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or(TournamentError::PlayerNotFound(id))
    }

    /// Register a player. Names are trimmed and must not be empty.
    pub fn add_player(&mut self, name: &str) -> Result<PlayerId, TournamentError> {
        let player = Player::new(clean_name(name)?);
        let id = player.id;
        log::debug!("Added player {} ({})", player.name, id);
        self.players.push(player);
        Ok(id)
    }

    pub fn edit_player(&mut self, id: PlayerId, name: &str) -> Result<(), TournamentError> {
        let name = clean_name(name)?;
        let p = self
            .players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(TournamentError::PlayerNotFound(id))?;
        p.name = name;
        Ok(())
    }

    /// Remove a player from the registry. Existing matches keep the id.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<(), TournamentError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or(TournamentError::PlayerNotFound(id))?;
        self.players.remove(idx);
        Ok(())
    }

    pub fn clear_players(&mut self) {
        self.players.clear();
    }

    // ---- tournaments ----

    pub fn tournaments(&self) -> &[Tournament] {
        &self.tournaments
    }

    pub fn tournament(&self, id: TournamentId) -> Result<&Tournament, TournamentError> {
        self.tournaments
            .iter()
            .find(|t| t.id == id)
            .ok_or(TournamentError::TournamentNotFound(id))
    }

    fn tournament_mut(&mut self, id: TournamentId) -> Result<&mut Tournament, TournamentError> {
        self.tournaments
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TournamentError::TournamentNotFound(id))
    }

    /// Add a tournament with groups that were already built.
    pub fn create_tournament(
        &mut self,
        name: &str,
        sport: Sport,
        groups: Vec<Group>,
        rules: TournamentRules,
    ) -> Result<TournamentId, TournamentError> {
        let tournament = Tournament::new(clean_name(name)?, sport, groups, rules);
        let id = tournament.id;
        log::info!(
            "Created tournament {} ({}) with {} group(s)",
            tournament.name,
            id,
            tournament.groups.len()
        );
        self.tournaments.push(tournament);
        Ok(id)
    }

    /// Build every draft and add the tournament. Nothing is stored if any draft is invalid.
    pub fn create_tournament_from_drafts(
        &mut self,
        name: &str,
        sport: Sport,
        drafts: &[GroupDraft],
        rules: TournamentRules,
    ) -> Result<TournamentId, TournamentError> {
        let name = clean_name(name)?;
        let groups = build_groups(drafts)?;
        self.create_tournament(&name, sport, groups, rules)
    }

    /// Record a score for one match. Standings are left as they were.
    pub fn record_result(
        &mut self,
        tournament_id: TournamentId,
        group_id: GroupId,
        match_id: MatchId,
        score_a: u32,
        score_b: u32,
    ) -> Result<(), TournamentError> {
        let group = self.tournament_mut(tournament_id)?.group_mut(group_id)?;
        record_result(group, match_id, score_a, score_b)
    }

    /// Recompute a group's standings with the tournament's tie-break criteria.
    pub fn refresh_standings(
        &mut self,
        tournament_id: TournamentId,
        group_id: GroupId,
    ) -> Result<&[PlayerStats], TournamentError> {
        let tournament = self.tournament_mut(tournament_id)?;
        let criteria = tournament.tie_break_criteria().to_vec();
        let group = tournament.group_mut(group_id)?;
        refresh_standings(group, &criteria);
        Ok(&group.standings)
    }

    pub fn rename_group(
        &mut self,
        tournament_id: TournamentId,
        group_id: GroupId,
        name: &str,
    ) -> Result<(), TournamentError> {
        let name = clean_name(name)?;
        self.tournament_mut(tournament_id)?.group_mut(group_id)?.name = name;
        Ok(())
    }

    pub fn delete_tournament(&mut self, id: TournamentId) -> Result<(), TournamentError> {
        let before = self.tournaments.len();
        self.tournaments.retain(|t| t.id != id);
        if self.tournaments.len() == before {
            return Err(TournamentError::TournamentNotFound(id));
        }
        log::info!("Deleted tournament {}", id);
        Ok(())
    }

    pub fn clear_tournaments(&mut self) {
        self.tournaments.clear();
    }

    // ---- persistence ----

    /// Serialized `(key, json)` pairs for every storage key.
    pub fn snapshot(&self) -> Result<Vec<(&'static str, String)>, TournamentError> {
        let to_json = |e: serde_json::Error| TournamentError::Storage(format!("Failed to serialize: {}", e));
        Ok(vec![
            (TOURNAMENTS_KEY, serde_json::to_string(&self.tournaments).map_err(to_json)?),
            (PLAYERS_KEY, serde_json::to_string(&self.players).map_err(to_json)?),
        ])
    }

    /// Write the whole store into `kv`.
    pub fn persist<K: KeyValueStore + ?Sized>(&self, kv: &mut K) -> Result<(), TournamentError> {
        for (key, json) in self.snapshot()? {
            kv.set(key, json)?;
        }
        Ok(())
    }

    /// Load a store from `kv`. Missing keys load as empty collections.
    pub fn restore<K: KeyValueStore + ?Sized>(kv: &K) -> Result<Self, TournamentError> {
        Ok(Self {
            tournaments: load_key(kv, TOURNAMENTS_KEY)?,
            players: load_key(kv, PLAYERS_KEY)?,
        })
    }
}

fn load_key<K, T>(kv: &K, key: &str) -> Result<Vec<T>, TournamentError>
where
    K: KeyValueStore + ?Sized,
    T: serde::de::DeserializeOwned,
{
    match kv.get(key)? {
        Some(json) => serde_json::from_str(&json)
            .map_err(|e| TournamentError::Storage(format!("Failed to parse {}: {}", key, e))),
        None => Ok(Vec::new()),
    }
}
