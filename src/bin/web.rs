//! Single binary web server: tournament API via REST, optional static frontend.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, STATIC_DIR, ARCHIVE_AFTER_SECS, INACTIVITY_TIMEOUT_SECS,
//! SWEEP_INTERVAL_SECS.

use actix_files::Files;
use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use pong_tournament_web::{
    matches_to_csv, participant_stats, record_match_result, start_tournament, MatchId, Player,
    PlayerId, SeedOrder, Tournament, TournamentError, TournamentId, TournamentStatus,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament data + last activity time (for archiving and cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory stand-in for the tournament and match tables.
#[derive(Default)]
struct Store {
    last_id: TournamentId,
    tournaments: HashMap<TournamentId, TournamentEntry>,
}

/// Every handler does its read-modify-write under the write lock, so a match winner is
/// only ever committed once.
type AppState = Data<RwLock<Store>>;

/// Runtime settings, read from the environment.
#[derive(Clone, Debug)]
struct ServerConfig {
    host: String,
    port: u16,
    static_dir: Option<String>,
    /// Completed tournaments idle this long are archived.
    archive_after: Duration,
    /// Tournaments idle this long are removed.
    inactivity_timeout: Duration,
    sweep_interval: Duration,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| default_host()),
            port: env_parse("PORT").unwrap_or_else(default_port),
            static_dir: std::env::var("STATIC_DIR").ok().filter(|d| !d.is_empty()),
            archive_after: Duration::from_secs(env_parse("ARCHIVE_AFTER_SECS").unwrap_or(3600)),
            inactivity_timeout: Duration::from_secs(
                env_parse("INACTIVITY_TIMEOUT_SECS").unwrap_or(12 * 3600),
            ),
            sweep_interval: Duration::from_secs(env_parse("SWEEP_INTERVAL_SECS").unwrap_or(30 * 60)),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_size() -> u32 {
    4
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default = "default_size")]
    size: u32,
}

/// An entrant as sent by clients: a user id when logged in, always an alias.
#[derive(Deserialize)]
struct PlayerBody {
    #[serde(default)]
    id: Option<PlayerId>,
    name: String,
}

impl PlayerBody {
    fn to_player(&self) -> Player {
        Player {
            id: self.id,
            name: self.name.trim().to_string(),
        }
    }
}

#[derive(Deserialize, Default)]
struct StartBody {
    #[serde(default)]
    shuffle: bool,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and match id (e.g. /api/tournaments/{id}/matches/{match_id})
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::MatchAlreadyDecided(_) => HttpResponse::Conflict().json(body),
        TournamentError::MatchNotFound(_) | TournamentError::PlayerNotFound => {
            HttpResponse::NotFound().json(body)
        }
        TournamentError::Export(_) => HttpResponse::InternalServerError().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

/// Lock the store, look up a tournament (404 if missing), refresh its activity time and run `f`.
fn with_tournament<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.tournaments.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&mut entry.tournament)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "pong-tournament-web",
    })
}

/// Create a new tournament in Waiting state (returns it with its id).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let id = g.last_id + 1;
    let tournament = match Tournament::new(id, body.name.trim(), body.size) {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };
    g.last_id = id;
    log::info!("Created tournament {} ({} players)", id, tournament.size);
    let response = HttpResponse::Ok().json(&tournament);
    g.tournaments.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    response
}

/// Get a tournament by id with all of its matches.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(t))
}

/// Register an entrant (tournament must be Waiting and not full).
#[post("/api/tournaments/{id}/participants")]
async fn api_add_participant(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<PlayerBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| match t.register(body.to_player()) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    })
}

/// Withdraw an entrant (tournament must be Waiting).
#[delete("/api/tournaments/{id}/participants")]
async fn api_remove_participant(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<PlayerBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| match t.unregister(&body.to_player()) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    })
}

/// Generate round 1 (Waiting -> InProgress). Requires a full bracket.
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(
    state: AppState,
    path: Path<TournamentPath>,
    body: Option<Json<StartBody>>,
) -> HttpResponse {
    let seed = if body.map(|b| b.into_inner()).unwrap_or_default().shuffle {
        SeedOrder::Shuffled
    } else {
        SeedOrder::Registration
    };
    with_tournament(&state, path.id, |t| match start_tournament(t, seed) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    })
}

/// Record the winner of one match; generates the next round or completes the tournament.
#[put("/api/tournaments/{id}/matches/{match_id}/winner")]
async fn api_set_match_winner(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<PlayerBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        match record_match_result(t, path.match_id, &body.to_player()) {
            Ok(outcome) => HttpResponse::Ok().json(serde_json::json!({
                "result": outcome,
                "tournament": t,
            })),
            Err(e) => {
                log::warn!("Tournament {} match {}: {}", t.id, path.match_id, e);
                error_response(&e)
            }
        }
    })
}

/// Top three (once completed) and every entrant's record.
#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let matches = t.match_list();
        let finished = matches!(
            t.status,
            TournamentStatus::Completed | TournamentStatus::Archived
        );
        HttpResponse::Ok().json(serde_json::json!({
            "finished": finished,
            "top3": t.standings,
            "stats": participant_stats(&t.participants, &matches),
        }))
    })
}

/// Every match as CSV.
#[get("/api/tournaments/{id}/matches.csv")]
async fn api_export_matches(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match matches_to_csv(&t.match_list()) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(csv),
        Err(e) => error_response(&e),
    })
}

/// Archive completed tournaments that went idle, drop anything idle past the timeout.
fn sweep(state: &AppState, config: &ServerConfig) {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return,
    };
    let mut archived = 0;
    for entry in g.tournaments.values_mut() {
        if entry.tournament.status == TournamentStatus::Completed
            && entry.last_activity.elapsed() >= config.archive_after
            && entry.tournament.archive().is_ok()
        {
            archived += 1;
        }
    }
    let before = g.tournaments.len();
    g.tournaments
        .retain(|_, entry| entry.last_activity.elapsed() < config.inactivity_timeout);
    let removed = before - g.tournaments.len();
    if archived > 0 || removed > 0 {
        log::info!(
            "Sweep: archived {} tournament(s), removed {} inactive tournament(s)",
            archived,
            removed
        );
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let state = Data::new(RwLock::new(Store::default()));

    let state_cleanup = state.clone();
    let sweep_config = config.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(sweep_config.sweep_interval);
        loop {
            interval.tick().await;
            sweep(&state_cleanup, &sweep_config);
        }
    });

    let static_dir = config.static_dir.clone();
    if let Some(dir) = &static_dir {
        log::info!("Serving static files from {}", dir);
    }
    HttpServer::new(move || {
        let static_dir = static_dir.clone();
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_participant)
            .service(api_remove_participant)
            .service(api_start_tournament)
            .service(api_set_match_winner)
            .service(api_standings)
            .service(api_export_matches)
            .configure(move |cfg| {
                if let Some(dir) = static_dir {
                    cfg.service(Files::new("/", dir).index_file("index.html"));
                }
            })
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
