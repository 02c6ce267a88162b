//! Fake AirAware backend served over a real socket

#![allow(dead_code)]

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Requests the fake server has seen
#[derive(Default)]
pub struct FakeState {
    pub users: Mutex<HashMap<String, (String, i64)>>,
    pub cities: Vec<String>,
    pub feedback: Mutex<Vec<Value>>,
    pub ratings: Mutex<Vec<Value>>,
    pub chats: Mutex<Vec<Value>>,
}

/// Start the fake backend on an ephemeral port
pub async fn spawn_backend(cities: &[&str]) -> (String, Arc<FakeState>) {
    let state = Arc::new(FakeState {
        cities: cities.iter().map(|c| c.to_string()).collect(),
        ..Default::default()
    });

    let router = Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/cities", get(list_cities))
        .route("/dashboard_data", get(dashboard_data))
        .route("/chat", post(chat))
        .route("/feedback", post(feedback))
        .route("/rate", post(rate))
        .route("/download_report", get(download_report))
        .with_state(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{}", addr), state)
}

/// A URL nothing is listening on
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Headline AQI the fake server reports per city
pub fn aqi_for(city: &str) -> i64 {
    match city {
        "New Delhi" => 80,
        "Mumbai" => 162,
        _ => 45,
    }
}

fn credentials(body: &Value) -> (String, String) {
    let field = |name: &str| {
        body.get(name)
            .and_then(Value::as_str)
            .unwrap_or("")
            .trim()
            .to_string()
    };
    (field("email").to_lowercase(), field("password"))
}

/// Email that makes the server crash with an HTML error page
pub const CRASH_EMAIL: &str = "crash@example.com";
/// Email answered with a JSON body carrying neither `error` nor `message`
pub const TEAPOT_EMAIL: &str = "teapot@example.com";

fn canned_failure(email: &str) -> Option<Response> {
    match email {
        CRASH_EMAIL => Some(
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/html")],
                "<html><body>Internal Server Error</body></html>",
            )
                .into_response(),
        ),
        TEAPOT_EMAIL => Some(
            (
                StatusCode::IM_A_TEAPOT,
                Json(json!({"detail": "short and stout"})),
            )
                .into_response(),
        ),
        _ => None,
    }
}

async fn signup(State(state): State<Arc<FakeState>>, Json(body): Json<Value>) -> Response {
    let (email, password) = credentials(&body);
    if let Some(response) = canned_failure(&email) {
        return response;
    }
    if email.is_empty() || password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Email and password required"})),
        )
            .into_response();
    }

    let mut users = state.users.lock().unwrap();
    if users.contains_key(&email) {
        return (
            StatusCode::CONFLICT,
            Json(json!({"error": "User already exists. Please login."})),
        )
            .into_response();
    }
    let id = users.len() as i64 + 1;
    users.insert(email, (password, id));

    (
        StatusCode::OK,
        Json(json!({"message": "Signup successful", "user_id": id})),
    )
        .into_response()
}

async fn login(State(state): State<Arc<FakeState>>, Json(body): Json<Value>) -> Response {
    let (email, password) = credentials(&body);
    if let Some(response) = canned_failure(&email) {
        return response;
    }
    let users = state.users.lock().unwrap();
    let reply = match users.get(&email) {
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Email is not registered. Please sign up."})),
        ),
        Some((stored, _)) if *stored != password => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Wrong password."})),
        ),
        Some((_, id)) => (
            StatusCode::OK,
            Json(json!({"message": "Login successful", "user_id": id})),
        ),
    };
    reply.into_response()
}

async fn list_cities(State(state): State<Arc<FakeState>>) -> Json<Value> {
    Json(json!({ "cities": state.cities }))
}

async fn dashboard_data(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    let city = params.get("city").cloned().unwrap_or_else(|| "Delhi".to_string());

    match city.as_str() {
        "Atlantis" => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "No data for city Atlantis"})),
        ),
        "Broken" => (StatusCode::OK, Json(json!({"city": "Broken", "now": 80}))),
        _ => {
            let now = aqi_for(&city);
            let mut bundle = json!({
                "city": city,
                "pm25": 40.0,
                "co": 0.8,
                "no2": 22.5,
                "now": now,
                "min_aqi": 60,
                "max_aqi": 140,
                "hourly": vec![now; 24],
                "years": ["2021", "2022", "2023", "2024", "2025"],
                "trend": [150, 140, 135, 120, 110],
                "y1": (now as f64 * 1.06) as i64,
                "y5": (now as f64 * 1.18) as i64
            });
            // Some deployments always send the key
            if city == "Quiet" {
                bundle["error"] = json!("");
            }
            (StatusCode::OK, Json(bundle))
        }
    }
}

async fn chat(State(state): State<Arc<FakeState>>, Json(body): Json<Value>) -> Json<Value> {
    state.chats.lock().unwrap().push(body.clone());
    let message = body.get("message").and_then(Value::as_str).unwrap_or("");
    let lang = body.get("lang").and_then(Value::as_str).unwrap_or("en");
    Json(json!({ "reply": format!("[{}] {}", lang, message) }))
}

async fn feedback(
    State(state): State<Arc<FakeState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let text = body.get("feedback").and_then(Value::as_str).unwrap_or("").trim();
    if text.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Feedback cannot be empty."})),
        );
    }
    state.feedback.lock().unwrap().push(body.clone());
    (StatusCode::OK, Json(json!({"message": "Feedback stored"})))
}

async fn rate(
    State(state): State<Arc<FakeState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let rating = body.get("rating").and_then(Value::as_i64).unwrap_or(0);
    if !(1..=5).contains(&rating) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Rating must be 1 to 5."})),
        );
    }
    state.ratings.lock().unwrap().push(body.clone());
    (
        StatusCode::OK,
        Json(json!({ "message": format!("Rating {}★ stored", rating) })),
    )
}

async fn download_report(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let city = params.get("city").cloned().unwrap_or_else(|| "Unknown".to_string());
    let aqi = params.get("aqi").cloned().unwrap_or_else(|| "--".to_string());
    let body = format!("%PDF-1.4\nAirAware - AQI Report\nCity : {}\nAQI : {}\n", city, aqi);
    ([(header::CONTENT_TYPE, "application/pdf")], body.into_bytes())
}
