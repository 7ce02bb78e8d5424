//! Single binary web server: the scorekeeper command surface as a JSON API, one match per browser
//! session.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT, DATA_DIR, SESSION_KEY,
//! SESSION_TIMEOUT_HOURS, CLEANUP_INTERVAL_MINUTES.

use actix_session::{
    config::{PersistentSession, TtlExtensionPolicy},
    storage::CookieSessionStore,
    Session, SessionMiddleware,
};
use actix_web::{
    cookie::{self, Key},
    get, post,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use darts_scorer::{
    remove_stale_snapshots, write_history_csv, DartSelection, FileStore, GameType, MatchError,
    NewPlayer, Scorekeeper, ServerConfig, SnapshotOp, SnapshotStore, SnapshotWriter,
};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use std::time::Instant;
use uuid::Uuid;

/// Cookie-backed browser session id.
type SessionId = Uuid;

/// Session cookie field holding the session id.
const SESSION_ID_KEY: &str = "sid";

/// Per-session entry: the match + its snapshot writer + last activity time (for auto-cleanup).
struct SessionEntry {
    scorekeeper: Scorekeeper,
    writer: Arc<SnapshotWriter<FileStore>>,
    last_activity: Instant,
}

impl SessionEntry {
    /// Resume from the session's snapshot if one exists, otherwise start in Setup.
    fn load(id: SessionId, config: &ServerConfig) -> Self {
        let store = FileStore::for_session(&config.data_dir, id);
        let scorekeeper = match store.load() {
            Ok(Some(state)) => {
                log::info!("Resumed session {} from {}", id, store.path().display());
                Scorekeeper::from_state(state)
            }
            Ok(None) => Scorekeeper::new(),
            Err(e) => {
                log::warn!("Ignoring unreadable snapshot for session {}: {}", id, e);
                Scorekeeper::new()
            }
        };
        Self {
            scorekeeper,
            writer: Arc::new(SnapshotWriter::new(store)),
            last_activity: Instant::now(),
        }
    }

    fn save(&self) {
        self.writer
            .submit(SnapshotOp::Save(self.scorekeeper.state().clone()));
    }

    fn clear(&self) {
        self.writer.submit(SnapshotOp::Clear);
    }

    fn ok_view(&self) -> HttpResponse {
        HttpResponse::Ok().json(self.scorekeeper.view())
    }
}

/// In-memory state: one match per session id. Entries are removed after inactivity.
type AppState = Data<RwLock<HashMap<SessionId, SessionEntry>>>;

type Config = Data<ServerConfig>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(serde::Serialize)]
struct CheckoutResponse {
    score: u32,
    suggestion: Option<&'static str>,
}

#[derive(Deserialize)]
struct StartMatchBody {
    players: Vec<NewPlayer>,
    #[serde(default)]
    game_type: GameType,
}

#[derive(Deserialize)]
struct TurnBody {
    darts: [DartSelection; 3],
}

fn bad_request(e: MatchError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

/// Session id from the cookie, minting a new one on first visit.
fn session_id(session: &Session) -> Result<SessionId, HttpResponse> {
    match session.get::<SessionId>(SESSION_ID_KEY) {
        Ok(Some(id)) => Ok(id),
        Ok(None) | Err(_) => {
            let id = Uuid::new_v4();
            session
                .insert(SESSION_ID_KEY, id)
                .map_err(|_| HttpResponse::InternalServerError().body("session error"))?;
            Ok(id)
        }
    }
}

/// Entry for `id`, loading it from disk the first time the session is seen. Touches last_activity.
fn entry_for<'a>(
    sessions: &'a mut HashMap<SessionId, SessionEntry>,
    id: SessionId,
    config: &ServerConfig,
) -> &'a mut SessionEntry {
    let entry = sessions
        .entry(id)
        .or_insert_with(|| SessionEntry::load(id, config));
    entry.last_activity = Instant::now();
    entry
}

/// Run `f` against the caller's session entry under the write lock.
fn with_session<F>(state: &AppState, config: &Config, session: &Session, f: F) -> HttpResponse
where
    F: FnOnce(&mut SessionEntry) -> HttpResponse,
{
    let id = match session_id(session) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    f(entry_for(&mut g, id, config))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "darts-scorer",
    })
}

/// Current match view for this session (Setup if nothing has been started).
#[get("/api/match")]
async fn api_get_match(state: AppState, config: Config, session: Session) -> HttpResponse {
    with_session(&state, &config, &session, |entry| entry.ok_view())
}

/// Start a match (Setup only): 2-10 players, game type 301 or 501.
#[post("/api/match/start")]
async fn api_start_match(
    state: AppState,
    config: Config,
    session: Session,
    body: Json<StartMatchBody>,
) -> HttpResponse {
    with_session(&state, &config, &session, |entry| {
        if let Err(e) = entry.scorekeeper.start_match(&body.players, body.game_type) {
            return bad_request(e);
        }
        entry.save();
        entry.ok_view()
    })
}

/// Submit the active player's three darts (Playing only).
#[post("/api/match/turn")]
async fn api_submit_turn(
    state: AppState,
    config: Config,
    session: Session,
    body: Json<TurnBody>,
) -> HttpResponse {
    with_session(&state, &config, &session, |entry| {
        match entry.scorekeeper.submit_turn(&body.darts) {
            Ok(_) => {
                entry.save();
                entry.ok_view()
            }
            Err(e) => bad_request(e),
        }
    })
}

/// Preview the active player's turn in progress without scoring it.
#[post("/api/match/preview")]
async fn api_preview_turn(
    state: AppState,
    config: Config,
    session: Session,
    body: Json<TurnBody>,
) -> HttpResponse {
    with_session(&state, &config, &session, |entry| {
        match entry.scorekeeper.preview_turn(&body.darts) {
            Some(preview) => HttpResponse::Ok().json(preview),
            None => bad_request(MatchError::InvalidState),
        }
    })
}

/// Undo the most recent turn (no-op when there is nothing to undo).
#[post("/api/match/undo")]
async fn api_undo(state: AppState, config: Config, session: Session) -> HttpResponse {
    with_session(&state, &config, &session, |entry| {
        if entry.scorekeeper.can_undo() {
            entry.scorekeeper.undo();
            entry.save();
        }
        entry.ok_view()
    })
}

/// Reset scores / rematch: same players back at their starting scores.
#[post("/api/match/rematch")]
async fn api_rematch(state: AppState, config: Config, session: Session) -> HttpResponse {
    with_session(&state, &config, &session, |entry| {
        if let Err(e) = entry.scorekeeper.rematch() {
            return bad_request(e);
        }
        entry.save();
        entry.ok_view()
    })
}

/// New game: discard the match and its snapshot, back to Setup.
#[post("/api/match/new")]
async fn api_new_game(state: AppState, config: Config, session: Session) -> HttpResponse {
    with_session(&state, &config, &session, |entry| {
        entry.scorekeeper.new_game();
        entry.clear();
        entry.ok_view()
    })
}

/// Turn history as CSV.
#[get("/api/match/history.csv")]
async fn api_history_csv(state: AppState, config: Config, session: Session) -> HttpResponse {
    with_session(&state, &config, &session, |entry| {
        let mut buf = Vec::new();
        match write_history_csv(entry.scorekeeper.state(), &mut buf) {
            Ok(()) => HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .body(buf),
            Err(e) => {
                log::warn!("History export failed: {}", e);
                HttpResponse::InternalServerError().body("export error")
            }
        }
    })
}

/// Suggested finish for any score (no session needed).
#[get("/api/checkout/{score}")]
async fn api_checkout(path: Path<u32>) -> HttpResponse {
    let score = path.into_inner();
    HttpResponse::Ok().json(CheckoutResponse {
        score,
        suggestion: darts_scorer::suggest_checkout(score),
    })
}

fn session_key(config: &ServerConfig) -> Key {
    match &config.session_key {
        Some(bytes) => Key::from(bytes),
        None => {
            log::warn!("SESSION_KEY not set (or shorter than 64 bytes); sessions will not survive a restart");
            Key::generate()
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    log::info!("Snapshots in {}", config.data_dir.display());

    let key = session_key(&config);
    let state = Data::new(RwLock::new(HashMap::<SessionId, SessionEntry>::new()));
    let config = Data::new(config);

    // Background task: drop sessions idle longer than the timeout, then delete snapshots that no
    // live session has written within the timeout (their cookies have expired by then)
    let state_cleanup = state.clone();
    let timeout = config.session_timeout;
    let interval_len = config.cleanup_interval;
    let data_dir = config.data_dir.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(interval_len);
        loop {
            interval.tick().await;
            let live: HashSet<String> = {
                let mut g = match state_cleanup.write() {
                    Ok(guard) => guard,
                    Err(_) => continue,
                };
                let before = g.len();
                g.retain(|_, entry| entry.last_activity.elapsed() < timeout);
                let removed = before - g.len();
                if removed > 0 {
                    log::info!("Cleaned up {} inactive session(s)", removed);
                }
                g.keys().map(|id| id.to_string()).collect()
            };
            let dir = data_dir.clone();
            let swept = tokio::task::spawn_blocking(move || {
                remove_stale_snapshots(&dir, timeout, |session| live.contains(session))
            })
            .await;
            match swept {
                Ok(Ok(0)) => {}
                Ok(Ok(n)) => log::info!("Removed {} stale snapshot(s)", n),
                Ok(Err(e)) => log::warn!("Snapshot sweep failed: {}", e),
                Err(e) => log::warn!("Snapshot sweep task failed: {}", e),
            }
        }
    });

    let cookie_ttl = cookie::time::Duration::try_from(config.session_timeout)
        .unwrap_or(cookie::time::Duration::WEEK);

    HttpServer::new(move || {
        App::new()
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
                    .cookie_secure(false)
                    .session_lifecycle(
                        PersistentSession::default()
                            .session_ttl(cookie_ttl)
                            .session_ttl_extension_policy(TtlExtensionPolicy::OnEveryRequest),
                    )
                    .build(),
            )
            .app_data(state.clone())
            .app_data(config.clone())
            .service(api_health)
            .service(api_get_match)
            .service(api_start_match)
            .service(api_submit_turn)
            .service(api_preview_turn)
            .service(api_undo)
            .service(api_rematch)
            .service(api_new_game)
            .service(api_history_csv)
            .service(api_checkout)
    })
    .bind(bind)?
    .run()
    .await
}
