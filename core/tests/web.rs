mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::NaiveDate;
use common::{fixture_dashboard, fixture_store, MARINA_MOON};
use std::time::Duration;
use streamdash_core::{
    dashboard::Dashboard,
    reports::{ArtistReport, ArtistSummary, ListenerReport, OverviewReport},
    store::DashStore,
    web::{router, AppState},
};
use tower::ServiceExt;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn app() -> (AppState, Router) {
    let state = AppState::new(fixture_dashboard());
    let app = router(state.clone(), "../assets");
    (state, app)
}

async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut req = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(req.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: &Router, uri: &str, body: &str, cookie: Option<&str>) -> Response {
    let mut req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(req.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

async fn body_text(resp: Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(resp: &Response) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// Log in as `username` and return the `Cookie` header value to send back.
async fn login(app: &Router, username: &str) -> String {
    let resp = post_form(app, "/login", &format!("username={username}"), None).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/dashboard");
    let set_cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    set_cookie.split(';').next().unwrap().to_string()
}

// ── Login flow ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_is_public() {
    let (_, app) = app();
    let resp = get(&app, "/health", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "ok");
}

#[tokio::test]
async fn pages_redirect_to_login_without_session() {
    let (_, app) = app();

    let resp = get(&app, "/dashboard", None).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");

    let resp = get(&app, "/", None).await;
    assert_eq!(location(&resp), "/login");

    let resp = get(&app, "/login", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("username"));
}

#[tokio::test]
async fn login_with_known_username_starts_session() {
    let (state, app) = app();

    let cookie = login(&app, "ana").await;
    assert!(cookie.starts_with("streamdash_session="));
    assert_eq!(state.sessions.len(), 1);

    let resp = get(&app, "/dashboard", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page = body_text(resp).await;
    assert!(page.contains("Logged in as: ana"));
    assert!(page.contains("Golden Hour"));

    let resp = get(&app, "/", Some(&cookie)).await;
    assert_eq!(location(&resp), "/dashboard");
}

#[tokio::test]
async fn login_with_empty_username_is_bad_request() {
    let (state, app) = app();
    let resp = post_form(&app, "/login", "username=++", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(resp).await.contains("Please enter your username."));
    assert!(state.sessions.is_empty());
}

#[tokio::test]
async fn login_with_unknown_username_is_unauthorized() {
    let (state, app) = app();
    let resp = post_form(&app, "/login", "username=nobody", None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let page = body_text(resp).await;
    assert!(page.contains("User not found. Check the username."));
    // The form keeps what was typed.
    assert!(page.contains("nobody"));
    assert!(state.sessions.is_empty());
}

#[tokio::test]
async fn login_against_broken_database_is_unavailable() {
    let dash = Dashboard::new(DashStore::in_memory().unwrap(), Duration::from_secs(60));
    let app = router(AppState::new(dash), "../assets");
    let resp = post_form(&app, "/login", "username=ana", None).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn logging_in_again_replaces_the_session() {
    let (state, app) = app();
    let first = login(&app, "ana").await;

    let resp = post_form(&app, "/login", "username=bruno", Some(&first)).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(state.sessions.len(), 1);

    let resp = get(&app, "/dashboard", Some(&first)).await;
    assert_eq!(location(&resp), "/login");
}

#[tokio::test]
async fn markup_in_names_is_escaped() {
    let store = fixture_store();
    let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    store
        .insert_account(60, "<script>eve", "<script>alert(1)</script>", day)
        .unwrap();
    let app = router(
        AppState::new(Dashboard::new(store, Duration::from_secs(60))),
        "../assets",
    );

    let cookie = login(&app, "%3Cscript%3Eeve").await;
    let resp = get(&app, "/dashboard?tab=me", Some(&cookie)).await;
    let page = body_text(resp).await;
    assert!(page.contains("Logged in as: &lt;script&gt;eve"));
    assert!(page.contains("Analysis of &lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!page.contains("<script>"));

    let resp = post_form(&app, "/login", "username=%3Cscript%3Emallory", None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let page = body_text(resp).await;
    assert!(page.contains("&lt;script&gt;mallory"));
    assert!(!page.contains("<script>"));
}

#[tokio::test]
async fn logout_ends_session() {
    let (state, app) = app();
    let cookie = login(&app, "bruno").await;

    let resp = post_form(&app, "/logout", "", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
    assert!(state.sessions.is_empty());

    let resp = get(&app, "/dashboard", Some(&cookie)).await;
    assert_eq!(location(&resp), "/login");
}

// ── Dashboard tabs ───────────────────────────────────────────────────────────

#[tokio::test]
async fn artists_tab_shows_selected_artist() {
    let (_, app) = app();
    let cookie = login(&app, "ana").await;

    let uri = format!("/dashboard?tab=artists&artist_id={MARINA_MOON}");
    let resp = get(&app, &uri, Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page = body_text(resp).await;
    assert!(page.contains("Marina Moon"));
    assert!(page.contains("Golden Orbit"));
}

#[tokio::test]
async fn me_tab_shows_listening_time() {
    let (_, app) = app();
    let cookie = login(&app, "ana").await;

    let resp = get(&app, "/dashboard?tab=me", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("0h 58m"));
}

// ── JSON API ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn api_requires_session() {
    let (_, app) = app();
    for uri in ["/api/overview", "/api/artists", "/api/artists/11", "/api/me"] {
        let resp = get(&app, uri, None).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn api_serves_reports_as_json() {
    let (_, app) = app();
    let cookie = login(&app, "ana").await;

    let resp = get(&app, "/api/overview", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let overview: OverviewReport = serde_json::from_str(&body_text(resp).await).unwrap();
    assert_eq!(overview.top_songs[0].song, "Golden Hour");

    let resp = get(&app, "/api/artists", Some(&cookie)).await;
    let artists: Vec<ArtistSummary> = serde_json::from_str(&body_text(resp).await).unwrap();
    assert_eq!(artists.len(), 3);

    let resp = get(&app, &format!("/api/artists/{MARINA_MOON}"), Some(&cookie)).await;
    let report: ArtistReport = serde_json::from_str(&body_text(resp).await).unwrap();
    assert_eq!(report.artist.name, "Marina Moon");

    let resp = get(&app, "/api/me", Some(&cookie)).await;
    let me: ListenerReport = serde_json::from_str(&body_text(resp).await).unwrap();
    assert_eq!(me.account.username, "ana");
    assert_eq!(me.listening_seconds, 3530);
}

#[tokio::test]
async fn api_unknown_artist_is_not_found() {
    let (_, app) = app();
    let cookie = login(&app, "ana").await;
    let resp = get(&app, "/api/artists/999", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stylesheet_is_served() {
    let (_, app) = app();
    let resp = get(&app, "/assets/styles/app.css", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
