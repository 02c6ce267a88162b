//! End-to-end flows through App with a file-backed session

mod common;

use std::sync::Arc;

use airaware::config::BackendConfig;
use airaware::{
    AdvisoryTier, App, FileSessionStore, FormError, HttpBackend, Lang, RatingSelection,
    RefreshError, View,
};
use common::{spawn_backend, CRASH_EMAIL, TEAPOT_EMAIL};
use tempfile::TempDir;

const CITIES: [&str; 5] = ["New Delhi", "Mumbai", "Kolkata", "Chennai", "Bengaluru"];

fn app(url: &str, dir: &TempDir) -> App {
    let backend = HttpBackend::new(&BackendConfig {
        url: url.to_string(),
        request_timeout_secs: 5,
    })
    .unwrap();
    let store = FileSessionStore::new(dir.path().join("session.json"));
    App::new(Arc::new(backend), Arc::new(store))
}

#[tokio::test]
async fn test_signup_lands_on_first_city() {
    let (url, _state) = spawn_backend(&CITIES).await;
    let dir = TempDir::new().unwrap();
    let app = app(&url, &dir);

    assert!(matches!(app.bootstrap().await.unwrap(), View::Auth));

    let view = app.signup("asha@example.com", "pw").await.unwrap();
    let View::Dashboard(boot) = view else {
        panic!("expected dashboard view");
    };
    assert_eq!(boot.directory.cities(), &CITIES.map(String::from)[..]);
    assert!(boot.directory.is_from_backend());
    assert!(matches!(boot.initial, Some(Ok(_))));

    let dashboard = app.dashboard().view().await;
    assert_eq!(dashboard.headline, Some(80.0));
    assert_eq!(dashboard.gauge.as_ref().unwrap().remaining, 420.0);
    let advisory = dashboard.advisory.unwrap();
    assert_eq!(advisory.tier, AdvisoryTier::Moderate);
    assert_eq!(
        advisory.message,
        "Air is Moderate — Sensitive people should be careful."
    );
}

#[tokio::test]
async fn test_session_survives_restart_until_logout() {
    let (url, _state) = spawn_backend(&CITIES).await;
    let dir = TempDir::new().unwrap();

    app(&url, &dir).signup("asha@example.com", "pw").await.unwrap();

    let restarted = app(&url, &dir);
    assert_eq!(restarted.session().token().unwrap().as_deref(), Some("1"));
    assert!(restarted.session().logged_in_at().unwrap().is_some());
    assert!(restarted.bootstrap().await.unwrap().is_dashboard());

    assert_eq!(restarted.logout().unwrap(), "Logged out.");
    assert!(matches!(app(&url, &dir).bootstrap().await.unwrap(), View::Auth));
}

#[tokio::test]
async fn test_short_city_listing_uses_defaults() {
    let (url, _state) = spawn_backend(&["Pune", "Nagpur"]).await;
    let dir = TempDir::new().unwrap();
    let app = app(&url, &dir);

    let View::Dashboard(boot) = app.signup("asha@example.com", "pw").await.unwrap() else {
        panic!("expected dashboard view");
    };
    assert!(!boot.directory.is_from_backend());
    assert_eq!(boot.directory.first(), Some("New Delhi"));
}

#[tokio::test]
async fn test_wrong_password_is_shown_verbatim() {
    let (url, _state) = spawn_backend(&CITIES).await;
    let dir = TempDir::new().unwrap();
    let app = app(&url, &dir);

    app.signup("asha@example.com", "pw").await.unwrap();
    app.logout().unwrap();

    let err = app.login("asha@example.com", "nope").await.unwrap_err();
    assert!(matches!(&err, FormError::Rejected(m) if m == "Wrong password."));
    assert!(!app.session().is_logged_in().unwrap());
}

#[tokio::test]
async fn test_auth_notice_depends_on_response_body() {
    let (url, _state) = spawn_backend(&CITIES).await;
    let dir = TempDir::new().unwrap();
    let app = app(&url, &dir);

    // HTML error page: the body cannot be read at all
    let err = app.signup(CRASH_EMAIL, "pw").await.unwrap_err();
    assert_eq!(err.to_string(), "Server error.");
    let err = app.login(CRASH_EMAIL, "pw").await.unwrap_err();
    assert_eq!(err.to_string(), "Server error.");

    // JSON body without an error message
    let err = app.signup(TEAPOT_EMAIL, "pw").await.unwrap_err();
    assert_eq!(err.to_string(), "Signup failed");
    let err = app.login(TEAPOT_EMAIL, "pw").await.unwrap_err();
    assert_eq!(err.to_string(), "Login failed");

    assert!(!app.session().is_logged_in().unwrap());
}

#[tokio::test]
async fn test_failed_search_keeps_previous_dashboard() {
    let (url, _state) = spawn_backend(&CITIES).await;
    let dir = TempDir::new().unwrap();
    let app = app(&url, &dir);
    app.signup("asha@example.com", "pw").await.unwrap();
    let before = app.dashboard().view().await;

    let err = app.search_city("Atlantis").await.unwrap_err();
    assert!(matches!(&err, RefreshError::Backend(m) if m == "No data for city Atlantis"));

    let err = app.search_city("Broken").await.unwrap_err();
    assert_eq!(err.to_string(), "Prediction error.");

    assert_eq!(app.dashboard().view().await, before);
}

#[tokio::test]
async fn test_search_switches_city_and_advisory() {
    let (url, _state) = spawn_backend(&CITIES).await;
    let dir = TempDir::new().unwrap();
    let app = app(&url, &dir);
    app.signup("asha@example.com", "pw").await.unwrap();

    app.search_city("  Mumbai ").await.unwrap();

    let view = app.dashboard().view().await;
    assert_eq!(view.pollutants.unwrap().city, "Mumbai");
    assert_eq!(view.gauge.unwrap().color, "#ef4444");
    assert_eq!(view.advisory.unwrap().tier, AdvisoryTier::VeryUnhealthy);

    let link = app.report_link().await.unwrap();
    assert_eq!(link.city, "Mumbai");
    assert!(link.url.ends_with("aqi=162"));
}

#[tokio::test]
async fn test_forms_tag_requests_with_session() {
    let (url, state) = spawn_backend(&CITIES).await;
    let dir = TempDir::new().unwrap();
    let app = app(&url, &dir);
    app.signup("asha@example.com", "pw").await.unwrap();

    assert_eq!(app.send_feedback(" Love it ").await.unwrap(), "Feedback stored");

    let mut selection = RatingSelection::new();
    selection.select(5).unwrap();
    assert_eq!(
        app.submit_rating(&mut selection).await.unwrap(),
        "Rating 5★ stored"
    );
    assert_eq!(selection.stars(), None);

    let reply = app.chat("mask?", Lang::Te).await.unwrap();
    assert_eq!(reply.as_deref(), Some("[te] mask?"));

    let feedback = state.feedback.lock().unwrap();
    assert_eq!(feedback[0]["feedback"], "Love it");
    assert_eq!(feedback[0]["user_id"], "1");
    assert_eq!(state.ratings.lock().unwrap()[0]["rating"], 5);
}

#[tokio::test]
async fn test_report_download_for_current_bundle() {
    let (url, _state) = spawn_backend(&CITIES).await;
    let dir = TempDir::new().unwrap();
    let app = app(&url, &dir);

    assert!(matches!(
        app.download_report().await.unwrap_err(),
        FormError::NoReport
    ));

    app.signup("asha@example.com", "pw").await.unwrap();
    let (query, bytes) = app.download_report().await.unwrap();

    assert_eq!(query.city, "New Delhi");
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains("City : New Delhi"));
}
