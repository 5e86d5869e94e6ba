//! Single binary web server: the tournament engine behind a JSON API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.

use actix_web::{
    get, post,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use wc94_tournament_web::{
    begin_squad_selection, confirm_squad, confirm_team, continue_from_bracket,
    continue_from_news, continue_from_pulse, continue_from_results, continue_from_standings,
    continue_from_top_scorers, finish_playback, game_over_report, go_to_user_match,
    processed_records, process_round, regenerate_bracket, sort_group, start_tournament,
    top_scorers, tournament_pulse, ReferenceData, Session, SessionError, SessionId, View,
};

/// Per-session entry: session state + last activity time (for auto-cleanup).
struct SessionEntry {
    session: Session,
    last_activity: Instant,
}

/// Shared state: immutable reference data plus many sessions by id.
/// Entries are removed after 12h inactivity.
struct AppContext {
    reference: ReferenceData,
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,
}

type AppState = Data<AppContext>;

/// Inactivity threshold: sessions not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateSessionBody {
    team_key: String,
}

#[derive(Deserialize)]
struct SquadBody {
    starters: Vec<u8>,
    subs: Vec<u8>,
    formation: String,
}

/// Path segment: session id (e.g. /api/sessions/{id})
#[derive(Deserialize)]
struct SessionPath {
    id: SessionId,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "wc94-tournament-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Selectable teams for the start screen.
#[get("/api/teams")]
async fn api_teams(state: AppState) -> HttpResponse {
    let teams: Vec<serde_json::Value> = state
        .reference
        .teams()
        .map(|t| serde_json::json!({ "key": t.key, "name": t.name }))
        .collect();
    HttpResponse::Ok().json(teams)
}

/// Run a session operation under the state lock, refreshing last_activity.
/// Invalid-view errors reset the session to the start (the controller's
/// policy for unreachable states); other errors are user-facing 400s.
fn with_session(
    state: &AppState,
    id: SessionId,
    op: impl FnOnce(&mut Session, &ReferenceData) -> Result<(), SessionError>,
) -> HttpResponse {
    let mut g = match state.sessions.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    match op(&mut entry.session, &state.reference) {
        Ok(()) => HttpResponse::Ok().json(&entry.session),
        Err(SessionError::InvalidView) => {
            log::warn!("Session {} hit an invalid transition; resetting", id);
            entry.session.reset(&state.reference);
            HttpResponse::Conflict().json(serde_json::json!({
                "error": SessionError::InvalidView.to_string(),
                "reset": true,
            }))
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Read-only query against a session.
fn query_session(
    state: &AppState,
    id: SessionId,
    op: impl FnOnce(&Session, &ReferenceData) -> HttpResponse,
) -> HttpResponse {
    let mut g = match state.sessions.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    op(&entry.session, &state.reference)
}

/// Create a new session for a chosen team (client stores the id).
#[post("/api/sessions")]
async fn api_create_session(state: AppState, body: Json<CreateSessionBody>) -> HttpResponse {
    let session = match Session::new(&state.reference, &body.team_key) {
        Ok(s) => s,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
    };
    let id = session.id;
    log::info!("New session {} for team {}", id, session.user_team_key);
    let mut g = match state.sessions.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        SessionEntry {
            session,
            last_activity: Instant::now(),
        },
    );
    HttpResponse::Ok().json(&g.get(&id).unwrap().session)
}

/// Get a session by id (404 if not found).
#[get("/api/sessions/{id}")]
async fn api_get_session(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    query_session(&state, path.id, |session, _| {
        HttpResponse::Ok().json(session)
    })
}

/// Advance the session one step along its current view's linear sequence.
/// From the fixtures screen this simulates the whole round.
#[post("/api/sessions/{id}/advance")]
async fn api_advance(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, |session, reference| match session.view {
        View::ConfirmSquad => confirm_team(session),
        View::Kickoff => start_tournament(session),
        View::Fixtures | View::Aftermath => process_round(session, reference).map(|_| ()),
        View::PreGame => begin_squad_selection(session),
        View::InProgress => finish_playback(session),
        View::RoundResults => continue_from_results(session, reference),
        View::Standings => continue_from_standings(session),
        View::TopScorers => continue_from_top_scorers(session),
        View::News => continue_from_news(session),
        View::Pulse => continue_from_pulse(session, reference),
        View::Bracket => continue_from_bracket(session, reference),
        View::SquadSelect | View::GameOver => Err(SessionError::InvalidView),
    })
}

/// Head into the user's match for this round instead of simulating it.
#[post("/api/sessions/{id}/play")]
async fn api_play(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, |session, reference| {
        go_to_user_match(session, reference)
    })
}

/// Submit the user's squad selection (view must be squad selection).
#[post("/api/sessions/{id}/squad")]
async fn api_submit_squad(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<SquadBody>,
) -> HttpResponse {
    let body = body.into_inner();
    with_session(&state, path.id, move |session, reference| {
        confirm_squad(session, reference, body.starters, body.subs, body.formation)
    })
}

/// Current round's fixtures, with the user's fixture flagged.
#[get("/api/sessions/{id}/fixtures")]
async fn api_fixtures(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    query_session(&state, path.id, |session, reference| {
        let matches = reference.matches_for_round(session.current_round);
        let user_match = reference
            .user_match_for_round(session.current_round, &session.user_team_key)
            .map(|m| m.id.clone());
        let round_name = reference
            .rounds()
            .get(session.current_round)
            .map(|r| r.name.clone());
        HttpResponse::Ok().json(serde_json::json!({
            "round": round_name,
            "matches": matches,
            "user_match_id": user_match,
        }))
    })
}

/// Group standings, each group sorted by the qualification ordering.
#[get("/api/sessions/{id}/standings")]
async fn api_standings(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    query_session(&state, path.id, |session, reference| {
        let processed = processed_records(session, reference);
        let sorted: Vec<serde_json::Value> = reference
            .groups()
            .iter()
            .filter_map(|(group, _)| {
                session.standings.group(group).map(|rows| {
                    serde_json::json!({
                        "group": group,
                        "rows": sort_group(rows, &processed),
                    })
                })
            })
            .collect();
        HttpResponse::Ok().json(sorted)
    })
}

/// Top scorers across processed matches.
#[get("/api/sessions/{id}/scorers")]
async fn api_scorers(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    query_session(&state, path.id, |session, reference| {
        let processed = processed_records(session, reference);
        HttpResponse::Ok().json(top_scorers(&processed, reference))
    })
}

/// Tournament pulse summary.
#[get("/api/sessions/{id}/pulse")]
async fn api_pulse(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    query_session(&state, path.id, |session, reference| {
        let processed = processed_records(session, reference);
        HttpResponse::Ok().json(tournament_pulse(&processed))
    })
}

/// The knockout bracket as derivable from current state.
#[get("/api/sessions/{id}/bracket")]
async fn api_bracket(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    query_session(&state, path.id, |session, reference| {
        HttpResponse::Ok().json(regenerate_bracket(session, reference))
    })
}

/// End-of-tournament narrative for the game over screen.
#[get("/api/sessions/{id}/report")]
async fn api_report(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    query_session(&state, path.id, |session, reference| {
        HttpResponse::Ok().json(game_over_report(session, reference))
    })
}

/// Reset the session: same team, fresh tournament.
#[post("/api/sessions/{id}/reset")]
async fn api_reset(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, |session, reference| {
        session.reset(reference);
        Ok(())
    })
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let reference = match ReferenceData::load_embedded() {
        Ok(r) => r,
        Err(e) => {
            log::error!("Failed to load reference data: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()));
        }
    };
    log::info!(
        "Loaded {} teams and {} matches",
        reference.teams().count(),
        reference.matches().len()
    );

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(AppContext {
        reference,
        sessions: RwLock::new(HashMap::new()),
    });

    // Background task: every 30 minutes, remove sessions inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.sessions.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive session(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", actix_web::web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_teams)
            .service(api_create_session)
            .service(api_get_session)
            .service(api_advance)
            .service(api_play)
            .service(api_submit_squad)
            .service(api_fixtures)
            .service(api_standings)
            .service(api_scorers)
            .service(api_pulse)
            .service(api_bracket)
            .service(api_report)
            .service(api_reset)
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
