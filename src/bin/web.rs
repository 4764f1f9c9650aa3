//! Game server: one game shell per session, ticked server-side, driven over a JSON API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. See `penguin_cup::config` for the environment variables.
//!
//! A client renders `GET /api/sessions/{id}` every frame and posts key presses
//! to `/api/sessions/{id}/input`; presses are applied on the next server tick.

use actix_web::{
    delete, get, post,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use penguin_cup::{Cue, GameConfig, Key, Roster, Shell, ShellSettings, ShellView};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

/// Per-session entry: the shell + timestamps (for display and auto-cleanup).
struct SessionEntry {
    shell: Shell,
    created_at: DateTime<Utc>,
    last_activity: Instant,
}

/// In-memory state: many sessions by id. Entries are removed after `SESSION_IDLE_HOURS` inactivity.
type Sessions = Data<RwLock<HashMap<Uuid, SessionEntry>>>;

/// Everything a new session is built from.
struct GameSetup {
    roster: Arc<Roster>,
    settings: ShellSettings,
    rng_seed: Option<u64>,
    sessions_created: AtomicU64,
}

impl GameSetup {
    fn new_shell(&self) -> Shell {
        let n = self.sessions_created.fetch_add(1, Ordering::Relaxed);
        let seed = self.rng_seed.map(|base| base.wrapping_add(n));
        Shell::new(self.roster.clone(), self.settings, seed)
    }
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct SessionResponse {
    id: Uuid,
    created_at: DateTime<Utc>,
    view: ShellView,
    /// Cues emitted since the previous poll.
    cues: Vec<Cue>,
}

#[derive(Deserialize)]
struct InputBody {
    key: Key,
}

/// Path segment: session id (e.g. /api/sessions/{id})
#[derive(Deserialize)]
struct SessionPath {
    id: Uuid,
}

fn session_response(id: Uuid, entry: &mut SessionEntry) -> SessionResponse {
    SessionResponse {
        id,
        created_at: entry.created_at,
        view: entry.shell.view(),
        cues: entry.shell.drain_cues(),
    }
}

fn no_session() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "penguin-cup",
    })
}

/// The roster, for clients that want names and colors up front.
#[get("/api/teams")]
async fn api_teams(setup: Data<GameSetup>) -> HttpResponse {
    HttpResponse::Ok().json(setup.roster.all())
}

/// Create a session on the main menu (client stores the id for subsequent requests).
#[post("/api/sessions")]
async fn api_create_session(sessions: Sessions, setup: Data<GameSetup>) -> HttpResponse {
    let id = Uuid::new_v4();
    let mut entry = SessionEntry {
        shell: setup.new_shell(),
        created_at: Utc::now(),
        last_activity: Instant::now(),
    };
    let body = session_response(id, &mut entry);
    let mut g = match sessions.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(id, entry);
    log::info!("Session {} created ({} active)", id, g.len());
    HttpResponse::Ok().json(body)
}

/// Current view of a session (404 if not found). Touching it refreshes last_activity.
#[get("/api/sessions/{id}")]
async fn api_get_session(sessions: Sessions, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match sessions.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(session_response(path.id, entry))
        }
        None => no_session(),
    }
}

/// Queue a key press; it takes effect on the next tick.
#[post("/api/sessions/{id}/input")]
async fn api_session_input(sessions: Sessions, path: Path<SessionPath>, body: Json<InputBody>) -> HttpResponse {
    let mut g = match sessions.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_session(),
    };
    entry.last_activity = Instant::now();
    if entry.shell.is_closed() {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": "Game is closed" }));
    }
    entry.shell.press(body.key);
    HttpResponse::Accepted().json(serde_json::json!({ "queued": body.key }))
}

/// End a session.
#[delete("/api/sessions/{id}")]
async fn api_delete_session(sessions: Sessions, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match sessions.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.remove(&path.id) {
        Some(_) => HttpResponse::NoContent().finish(),
        None => no_session(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = GameConfig::from_env().map_err(|e| {
        log::error!("{}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;
    let roster = config.load_roster().map_err(|e| {
        log::error!("{}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
    })?;
    log::info!(
        "Roster has {} teams, cups start with {} teams",
        roster.len(),
        config.field_size
    );

    let setup = Data::new(GameSetup {
        roster: Arc::new(roster),
        settings: ShellSettings {
            field_size: config.field_size,
            quick_match_team_id: config.quick_match_team_id,
        },
        rng_seed: config.rng_seed,
        sessions_created: AtomicU64::new(0),
    });
    let sessions: Sessions = Data::new(RwLock::new(HashMap::new()));

    // Frame loop: every session advances one tick per frame.
    let sessions_tick = sessions.clone();
    let frame = config.frame_interval();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(frame);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            let mut g = match sessions_tick.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            for entry in g.values_mut() {
                entry.shell.tick();
            }
        }
    });

    // Every 30 minutes, remove sessions inactive for longer than the idle threshold
    let sessions_cleanup = sessions.clone();
    let idle = config.session_idle;
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match sessions_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < idle);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive session(s)", removed);
            }
        }
    });

    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(sessions.clone())
            .app_data(setup.clone())
            .service(api_health)
            .service(api_teams)
            .service(api_create_session)
            .service(api_get_session)
            .service(api_session_input)
            .service(api_delete_session)
    })
    .bind(bind)?
    .run()
    .await
}
