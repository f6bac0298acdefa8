//! Single binary web server exposing the tournament store as a REST API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default and keeps its data in ./data.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), DATA_DIR (e.g. /var/lib/super8).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use std::sync::RwLock;
use super8_tournament::{
    build_groups, checked_score, partition_into_groups, standings_csv, FileStore, GroupDraft,
    GroupId, KeyValueStore, MatchId, PlayerId, Sport, TieBreakCriterion, TournamentError,
    TournamentId, TournamentRules, TournamentStore,
};
use tokio::sync::mpsc;

/// All players and tournaments, behind one lock. A write guard is the critical
/// section for "load group, mutate, store group".
type AppState = Data<RwLock<TournamentStore>>;

/// Snapshots waiting to be written to disk, in mutation order.
type SaveQueue = Data<mpsc::UnboundedSender<Vec<(&'static str, String)>>>;

struct Config {
    host: String,
    port: u16,
    data_dir: String,
}

impl Config {
    fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()),
        }
    }
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default)]
    sport: Sport,
    /// Manually assembled groups. Takes precedence over `player_ids`.
    #[serde(default)]
    groups: Vec<GroupDraft>,
    /// Players for a single group, or for a random split when `num_groups` is set.
    #[serde(default)]
    player_ids: Vec<PlayerId>,
    num_groups: Option<usize>,
    tie_break_criteria: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct RecordResultBody {
    score_a: i64,
    score_b: i64,
}

#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct PlayerPath {
    player_id: PlayerId,
}

#[derive(Deserialize)]
struct GroupPath {
    id: TournamentId,
    group_id: GroupId,
}

#[derive(Deserialize)]
struct MatchPath {
    id: TournamentId,
    group_id: GroupId,
    match_id: MatchId,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    if e.is_not_found() {
        HttpResponse::NotFound().json(body)
    } else {
        HttpResponse::BadRequest().json(body)
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

/// Queue the current store contents for writing. Called with the write guard held
/// so snapshots reach the queue in the order the mutations happened.
fn queue_save(queue: &SaveQueue, store: &TournamentStore) {
    match store.snapshot() {
        Ok(entries) => {
            if queue.send(entries).is_err() {
                log::error!("Save queue closed; changes are not persisted");
            }
        }
        Err(e) => log::error!("{}", e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "super8-tournament",
    })
}

#[get("/api/players")]
async fn api_list_players(state: AppState) -> HttpResponse {
    match state.read() {
        Ok(g) => HttpResponse::Ok().json(g.players()),
        Err(_) => lock_error(),
    }
}

#[post("/api/players")]
async fn api_add_player(state: AppState, queue: SaveQueue, body: Json<NameBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.add_player(&body.name) {
        Ok(id) => {
            queue_save(&queue, &g);
            match g.player(id) {
                Ok(p) => HttpResponse::Ok().json(p),
                Err(e) => error_response(&e),
            }
        }
        Err(e) => error_response(&e),
    }
}

#[put("/api/players/{player_id}")]
async fn api_edit_player(
    state: AppState,
    queue: SaveQueue,
    path: Path<PlayerPath>,
    body: Json<NameBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.edit_player(path.player_id, &body.name) {
        Ok(()) => {
            queue_save(&queue, &g);
            HttpResponse::Ok().json(g.players())
        }
        Err(e) => error_response(&e),
    }
}

#[delete("/api/players/{player_id}")]
async fn api_remove_player(state: AppState, queue: SaveQueue, path: Path<PlayerPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.remove_player(path.player_id) {
        Ok(()) => {
            queue_save(&queue, &g);
            HttpResponse::Ok().json(g.players())
        }
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    match state.read() {
        Ok(g) => HttpResponse::Ok().json(g.tournaments()),
        Err(_) => lock_error(),
    }
}

/// Create a tournament. Groups are built before the lock is taken; an invalid
/// group rejects the whole request and stores nothing.
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    queue: SaveQueue,
    body: Json<CreateTournamentBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let groups = if !body.groups.is_empty() {
        build_groups(&body.groups)
    } else if let Some(n) = body.num_groups {
        partition_into_groups(&body.player_ids, n)
    } else {
        build_groups(&[GroupDraft {
            name: "Group 1".to_string(),
            player_ids: body.player_ids,
        }])
    };
    let groups = match groups {
        Ok(groups) => groups,
        Err(e) => return error_response(&e),
    };
    let rules = TournamentRules {
        tie_break_criteria: body
            .tie_break_criteria
            .map(|tokens| TieBreakCriterion::parse_list(&tokens))
            .unwrap_or_else(|| TieBreakCriterion::DEFAULT_ORDER.to_vec()),
        ..TournamentRules::default()
    };

    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.create_tournament(&body.name, body.sport, groups, rules) {
        Ok(id) => {
            queue_save(&queue, &g);
            match g.tournament(id) {
                Ok(t) => HttpResponse::Ok().json(t),
                Err(e) => error_response(&e),
            }
        }
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.tournament(path.id) {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(
    state: AppState,
    queue: SaveQueue,
    path: Path<TournamentPath>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.delete_tournament(path.id) {
        Ok(()) => {
            queue_save(&queue, &g);
            HttpResponse::NoContent().finish()
        }
        Err(e) => error_response(&e),
    }
}

#[put("/api/tournaments/{id}/groups/{group_id}/name")]
async fn api_rename_group(
    state: AppState,
    queue: SaveQueue,
    path: Path<GroupPath>,
    body: Json<NameBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.rename_group(path.id, path.group_id, &body.name) {
        Ok(()) => {
            queue_save(&queue, &g);
            match g.tournament(path.id) {
                Ok(t) => HttpResponse::Ok().json(t),
                Err(e) => error_response(&e),
            }
        }
        Err(e) => error_response(&e),
    }
}

/// Record a score. Standings are refreshed separately.
#[put("/api/tournaments/{id}/groups/{group_id}/matches/{match_id}/result")]
async fn api_record_result(
    state: AppState,
    queue: SaveQueue,
    path: Path<MatchPath>,
    body: Json<RecordResultBody>,
) -> HttpResponse {
    let scores = checked_score(body.score_a).and_then(|a| Ok((a, checked_score(body.score_b)?)));
    let (score_a, score_b) = match scores {
        Ok(s) => s,
        Err(e) => return error_response(&e),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.record_result(path.id, path.group_id, path.match_id, score_a, score_b) {
        Ok(()) => {
            queue_save(&queue, &g);
            match g.tournament(path.id).and_then(|t| t.group(path.group_id)) {
                Ok(group) => HttpResponse::Ok().json(group),
                Err(e) => error_response(&e),
            }
        }
        Err(e) => error_response(&e),
    }
}

#[post("/api/tournaments/{id}/groups/{group_id}/standings/refresh")]
async fn api_refresh_standings(state: AppState, queue: SaveQueue, path: Path<GroupPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let standings = match g.refresh_standings(path.id, path.group_id) {
        Ok(s) => s.to_vec(),
        Err(e) => return error_response(&e),
    };
    queue_save(&queue, &g);
    HttpResponse::Ok().json(standings)
}

#[get("/api/tournaments/{id}/groups/{group_id}/standings.csv")]
async fn api_standings_csv(state: AppState, path: Path<GroupPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let csv = g
        .tournament(path.id)
        .and_then(|t| t.group(path.group_id))
        .and_then(|group| standings_csv(group, g.players()));
    match csv {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(body),
        Err(e) => error_response(&e),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let backend = FileStore::new(&config.data_dir);
    let store = TournamentStore::restore(&backend).map_err(|e| std::io::Error::other(e.to_string()))?;
    log::info!(
        "Loaded {} player(s) and {} tournament(s) from {}",
        store.players().len(),
        store.tournaments().len(),
        backend.dir().display()
    );

    let state = Data::new(RwLock::new(store));

    // Background task: write queued snapshots one at a time, off the request path.
    let (tx, mut rx) = mpsc::unbounded_channel::<Vec<(&'static str, String)>>();
    actix_web::rt::spawn(async move {
        while let Some(entries) = rx.recv().await {
            let mut backend = backend.clone();
            let written = tokio::task::spawn_blocking(move || {
                entries
                    .into_iter()
                    .try_for_each(|(key, json)| backend.set(key, json))
            })
            .await;
            match written {
                Ok(Ok(())) => {}
                Ok(Err(e)) => log::error!("{}", e),
                Err(e) => log::error!("Save task failed: {}", e),
            }
        }
    });
    let queue = Data::new(tx);

    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(queue.clone())
            .service(api_health)
            .service(api_list_players)
            .service(api_add_player)
            .service(api_edit_player)
            .service(api_remove_player)
            .service(api_list_tournaments)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_delete_tournament)
            .service(api_rename_group)
            .service(api_record_result)
            .service(api_refresh_standings)
            .service(api_standings_csv)
    })
    .bind(bind)?
    .run()
    .await
}
