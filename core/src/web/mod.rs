//! HTTP front end.
//!
//! | Path | Description |
//! |------|-------------|
//! | `/login` | username-only login form (GET) and submit (POST) |
//! | `/logout` | ends the session (POST) |
//! | `/dashboard` | tabbed dashboard, `?tab=overview\|artists\|me&artist_id=N` |
//! | `/api/*` | the same reports as JSON |
//! | `/assets` | static files (stylesheet) |
//!
//! Every page except the login form requires a session; pages redirect to
//! `/login`, API routes answer 401.

pub mod render;
pub mod session;

use crate::{
    dashboard::Dashboard,
    error::LoginError,
    reports::{Account, ArtistReport, ArtistSummary, ListenerReport, OverviewReport},
    types::AccountId,
};
use axum::{
    extract::{Form, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use render::Tab;
use serde::Deserialize;
use session::SessionStore;
use std::sync::Arc;
use tower_http::services::ServeDir;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
            sessions: Arc::new(SessionStore::new()),
        }
    }
}

pub fn router(state: AppState, assets_dir: &str) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(|| async { "ok" }))
        .route("/login", get(login_form).post(login_submit))
        .route("/logout", post(logout))
        .route("/dashboard", get(dashboard))
        .route("/api/overview", get(api_overview))
        .route("/api/artists", get(api_artists))
        .route("/api/artists/{id}", get(api_artist))
        .route("/api/me", get(api_me))
        .nest_service("/assets", ServeDir::new(assets_dir))
        .with_state(state)
}

/// Bind and serve until the process is interrupted.
pub async fn serve(state: AppState, bind_addr: &str, assets_dir: &str) -> std::io::Result<()> {
    let app = router(state, assets_dir);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    log::info!("Dashboard listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            log::info!("Shutting down");
        })
        .await
}

/// Run a blocking dashboard call off the async executor.
async fn blocking<T, F>(state: &AppState, f: F) -> Result<T, StatusCode>
where
    T: Send + 'static,
    F: FnOnce(&Dashboard) -> T + Send + 'static,
{
    let dashboard = Arc::clone(&state.dashboard);
    tokio::task::spawn_blocking(move || f(&dashboard))
        .await
        .map_err(|e| {
            log::error!("Dashboard task failed: {e}");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

// ── Pages ───────────────────────────────────────────────────────────────────

async fn index(State(state): State<AppState>, headers: HeaderMap) -> Redirect {
    match state.sessions.from_headers(&headers) {
        Some(_) => Redirect::to("/dashboard"),
        None => Redirect::to("/login"),
    }
}

async fn login_form(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if state.sessions.from_headers(&headers).is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    Html(render::login_page(None, "")).into_response()
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
}

async fn login_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    let username = form.username.clone();
    let outcome = match blocking(&state, move |d| d.login(&username)).await {
        Ok(outcome) => outcome,
        Err(status) => return status.into_response(),
    };
    match outcome {
        Ok(account) => {
            // Logging in again replaces the session the browser already holds.
            if let Some(previous) = session::session_token(&headers) {
                state.sessions.remove(&previous);
            }
            let token = state.sessions.create(account);
            (
                [(header::SET_COOKIE, session::set_cookie(&token))],
                Redirect::to("/dashboard"),
            )
                .into_response()
        }
        Err(e) => {
            let status = match e {
                LoginError::EmptyUsername => StatusCode::BAD_REQUEST,
                LoginError::UnknownUser => StatusCode::UNAUTHORIZED,
                LoginError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            };
            let page = render::login_page(Some(&e.to_string()), form.username.trim());
            (status, Html(page)).into_response()
        }
    }
}

async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session::session_token(&headers) {
        if let Some(account) = state.sessions.remove(&token) {
            log::info!("Logout: {}", account.username);
        }
    }
    (
        [(header::SET_COOKIE, session::clear_cookie())],
        Redirect::to("/login"),
    )
        .into_response()
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    #[serde(default)]
    pub tab: Tab,
    pub artist_id: Option<AccountId>,
}

async fn dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<DashboardParams>,
) -> Response {
    let Some(account) = state.sessions.from_headers(&headers) else {
        return Redirect::to("/login").into_response();
    };

    let tab = params.tab;
    let artist_id = params.artist_id;
    let viewer = account.clone();
    let content = blocking(&state, move |d| match tab {
        Tab::Overview => render::overview_tab(&d.overview()),
        Tab::Artists => {
            let artists = d.artists();
            // Default to the first artist in the picker.
            let report = artist_id
                .or_else(|| artists.first().map(|a| a.id))
                .and_then(|id| d.artist_report(id));
            render::artists_tab(&artists, report.as_ref())
        }
        Tab::Me => render::listener_tab(&d.listener_report(&viewer)),
    })
    .await;

    match content {
        Ok(content) => Html(render::dashboard_page(&account, tab, &content)).into_response(),
        Err(status) => status.into_response(),
    }
}

// ── JSON API ────────────────────────────────────────────────────────────────

fn require_session(state: &AppState, headers: &HeaderMap) -> Result<Account, StatusCode> {
    state
        .sessions
        .from_headers(headers)
        .ok_or(StatusCode::UNAUTHORIZED)
}

async fn api_overview(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<OverviewReport>, StatusCode> {
    require_session(&state, &headers)?;
    blocking(&state, |d| d.overview()).await.map(Json)
}

async fn api_artists(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ArtistSummary>>, StatusCode> {
    require_session(&state, &headers)?;
    blocking(&state, |d| d.artists()).await.map(Json)
}

async fn api_artist(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<AccountId>,
) -> Result<Json<ArtistReport>, StatusCode> {
    require_session(&state, &headers)?;
    blocking(&state, move |d| d.artist_report(id))
        .await?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn api_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListenerReport>, StatusCode> {
    let account = require_session(&state, &headers)?;
    blocking(&state, move |d| d.listener_report(&account))
        .await
        .map(Json)
}
