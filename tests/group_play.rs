//! Integration tests for the tournament store: creation, results, standings, persistence.

use super8_tournament::{
    partition_into_groups, FileStore, GroupDraft, KeyValueStore, MatchStatus, MemoryStore,
    PlayerId, Sport, TieBreakCriterion, TournamentError, TournamentRules, TournamentStore,
};
use uuid::Uuid;

fn store_with_players(n: usize) -> (TournamentStore, Vec<PlayerId>) {
    let mut store = TournamentStore::new();
    let ids = (0..n)
        .map(|i| store.add_player(&format!("P{i}")).unwrap())
        .collect();
    (store, ids)
}

fn draft(name: &str, ids: &[PlayerId]) -> GroupDraft {
    GroupDraft {
        name: name.to_string(),
        player_ids: ids.to_vec(),
    }
}

#[test]
fn create_from_drafts_builds_every_group() {
    let (mut store, p) = store_with_players(12);
    let id = store
        .create_tournament_from_drafts(
            "  Summer Open ",
            Sport::BeachTennis,
            &[draft("Group 1", &p[..8]), draft("Group 2", &p[8..])],
            TournamentRules::default(),
        )
        .unwrap();
    let t = store.tournament(id).unwrap();
    assert_eq!(t.name, "Summer Open");
    assert_eq!(t.groups.len(), 2);
    assert_eq!(t.groups[0].matches.len(), 7);
    assert_eq!(t.groups[1].matches.len(), 3);
    assert_eq!(t.rules.tie_break_criteria, TieBreakCriterion::DEFAULT_ORDER.to_vec());
}

#[test]
fn invalid_draft_stores_nothing() {
    let (mut store, p) = store_with_players(10);
    let err = store
        .create_tournament_from_drafts(
            "Broken",
            Sport::Padel,
            &[draft("Group 1", &p[..4]), draft("Group 2", &p[4..7])],
            TournamentRules::default(),
        )
        .unwrap_err();
    assert_eq!(err, TournamentError::InvalidGroupSize { count: 3 });
    assert!(store.tournaments().is_empty());

    let err = store
        .create_tournament_from_drafts("   ", Sport::Padel, &[draft("G", &p[..4])], TournamentRules::default())
        .unwrap_err();
    assert_eq!(err, TournamentError::InvalidName);
    assert!(store.tournaments().is_empty());

    // Group names follow the same rule as renames.
    let err = store
        .create_tournament_from_drafts(
            "Cup",
            Sport::Padel,
            &[draft("Group 1", &p[..4]), draft(" ", &p[4..8])],
            TournamentRules::default(),
        )
        .unwrap_err();
    assert_eq!(err, TournamentError::InvalidName);
    assert!(store.tournaments().is_empty());
}

#[test]
fn record_then_refresh_updates_only_target_group() {
    let (mut store, p) = store_with_players(8);
    let id = store
        .create_tournament_from_drafts(
            "Cup",
            Sport::Tennis,
            &[draft("A", &p[..4]), draft("B", &p[4..])],
            TournamentRules::default(),
        )
        .unwrap();
    let (group_a, match_id) = {
        let t = store.tournament(id).unwrap();
        (t.groups[0].id, t.groups[0].matches[0][0].id)
    };

    store.record_result(id, group_a, match_id, 6, 2).unwrap();
    // Recording does not touch standings.
    assert!(store.tournament(id).unwrap().groups[0].standings.is_empty());

    let standings = store.refresh_standings(id, group_a).unwrap().to_vec();
    assert_eq!(standings[0].player_id, p[0]);
    assert_eq!(standings[0].wins, 1);

    let t = store.tournament(id).unwrap();
    assert_eq!(t.groups[0].standings, standings);
    assert!(t.groups[1].standings.is_empty());
    assert!(t.groups[1].all_matches().all(|m| m.status == MatchStatus::Pending));
}

#[test]
fn missing_ids_are_not_found() {
    let (mut store, p) = store_with_players(4);
    let id = store
        .create_tournament_from_drafts("Cup", Sport::Generic, &[draft("A", &p)], TournamentRules::default())
        .unwrap();
    let group_id = store.tournament(id).unwrap().groups[0].id;
    let bogus = Uuid::new_v4();

    assert_eq!(
        store.record_result(bogus, group_id, bogus, 1, 0),
        Err(TournamentError::TournamentNotFound(bogus))
    );
    assert_eq!(
        store.record_result(id, bogus, bogus, 1, 0),
        Err(TournamentError::GroupNotFound(bogus))
    );
    assert_eq!(
        store.record_result(id, group_id, bogus, 1, 0),
        Err(TournamentError::MatchNotFound(bogus))
    );
    assert!(store.refresh_standings(id, bogus).unwrap_err().is_not_found());
    assert_eq!(
        store.delete_tournament(bogus),
        Err(TournamentError::TournamentNotFound(bogus))
    );
}

#[test]
fn refresh_uses_tournament_criteria() {
    let (mut store, p) = store_with_players(4);
    let rules = TournamentRules {
        tie_break_criteria: TieBreakCriterion::parse_list(&["gamesFor", "bogus"]),
        ..TournamentRules::default()
    };
    let id = store
        .create_tournament_from_drafts("Cup", Sport::Padel, &[draft("A", &p)], rules)
        .unwrap();
    let (group_id, r0, r1) = {
        let g = &store.tournament(id).unwrap().groups[0];
        (g.id, g.matches[0][0].id, g.matches[1][0].id)
    };
    // Round 1: p0+p1 vs p3+p2, round 2: p0+p3 vs p2+p1.
    store.record_result(id, group_id, r0, 6, 5).unwrap();
    store.record_result(id, group_id, r1, 0, 7).unwrap();
    let order: Vec<_> = store
        .refresh_standings(id, group_id)
        .unwrap()
        .iter()
        .map(|s| s.player_id)
        .collect();
    assert_eq!(order, vec![p[1], p[2], p[0], p[3]]);
}

#[test]
fn rename_and_delete() {
    let (mut store, p) = store_with_players(4);
    let groups = partition_into_groups(&p, 1).unwrap();
    let id = store
        .create_tournament("Cup", Sport::Padel, groups, TournamentRules::default())
        .unwrap();
    let group_id = store.tournament(id).unwrap().groups[0].id;
    assert_eq!(store.tournament(id).unwrap().groups[0].name, "Group 1");

    store.rename_group(id, group_id, " Finals ").unwrap();
    assert_eq!(store.tournament(id).unwrap().groups[0].name, "Finals");
    assert_eq!(store.rename_group(id, group_id, ""), Err(TournamentError::InvalidName));

    store.delete_tournament(id).unwrap();
    assert!(store.tournaments().is_empty());
}

#[test]
fn player_registry() {
    let (mut store, p) = store_with_players(2);
    assert_eq!(store.add_player("  "), Err(TournamentError::InvalidName));
    store.edit_player(p[0], "Renamed").unwrap();
    assert_eq!(store.player(p[0]).unwrap().name, "Renamed");
    store.remove_player(p[1]).unwrap();
    assert_eq!(store.players().len(), 1);
    assert_eq!(store.remove_player(p[1]), Err(TournamentError::PlayerNotFound(p[1])));

    store.add_player("Another").unwrap();
    assert_eq!(store.players().len(), 2);
    store.clear_players();
    assert!(store.players().is_empty());
    assert_eq!(store.player(p[0]), Err(TournamentError::PlayerNotFound(p[0])));
}

#[test]
fn persist_and_restore_round_trip() {
    let (mut store, p) = store_with_players(8);
    let id = store
        .create_tournament_from_drafts("Cup", Sport::BeachTennis, &[draft("A", &p)], TournamentRules::default())
        .unwrap();
    let (group_id, match_id) = {
        let g = &store.tournament(id).unwrap().groups[0];
        (g.id, g.matches[3][1].id)
    };
    store.record_result(id, group_id, match_id, 7, 5).unwrap();
    store.refresh_standings(id, group_id).unwrap();

    let mut kv = MemoryStore::new();
    store.persist(&mut kv).unwrap();
    assert!(kv.get("tournaments-storage").unwrap().is_some());
    assert!(kv.get("players-storage").unwrap().is_some());

    let restored = TournamentStore::restore(&kv).unwrap();
    assert_eq!(restored, store);
}

#[test]
fn restore_from_empty_backend_is_empty() {
    let restored = TournamentStore::restore(&MemoryStore::new()).unwrap();
    assert!(restored.players().is_empty());
    assert!(restored.tournaments().is_empty());
}

#[test]
fn restore_rejects_corrupt_data() {
    let mut kv = MemoryStore::new();
    kv.set("tournaments-storage", "not json".to_string()).unwrap();
    assert!(matches!(
        TournamentStore::restore(&kv),
        Err(TournamentError::Storage(_))
    ));
}

#[test]
fn file_store_round_trip() {
    let dir = std::env::temp_dir().join(format!("super8-test-{}", Uuid::new_v4()));
    let mut backend = FileStore::new(&dir);
    assert_eq!(backend.get("players-storage").unwrap(), None);

    let (store, _) = store_with_players(3);
    store.persist(&mut backend).unwrap();
    let restored = TournamentStore::restore(&backend).unwrap();
    assert_eq!(restored, store);

    std::fs::remove_dir_all(&dir).unwrap();
}
