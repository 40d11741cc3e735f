// Fake attendance backend for integration tests.
//
// Purpose
// - Serve `/api/attendance` and `/api/personal-info` from memory on a random local port, so
//   the HTTP adapters run against real sockets and real status codes.
//
// Responsibilities
// - Hand out numeric ids the way the production backend does.
// - Answer the next request with a forced status and body when a test asks for it.
// - Record every request line for assertions.

#![allow(dead_code)]

use attendance::shared::infrastructure::http_api::client::HttpApi;
use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower_http::trace::TraceLayer;

#[derive(Default)]
pub struct FakeBackend {
    records: Mutex<Vec<Value>>,
    next_id: Mutex<u64>,
    profile: Mutex<Option<Value>>,
    forced: Mutex<Option<(StatusCode, String)>>,
    requests: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn seed_records(&self, records: Vec<Value>) {
        let highest = records.iter().filter_map(|record| record["id"].as_u64()).max().unwrap_or(0);
        *self.next_id.lock().unwrap() = highest;
        *self.records.lock().unwrap() = records;
    }

    pub fn seed_profile(&self, profile: Value) {
        *self.profile.lock().unwrap() = Some(profile);
    }

    /// The next request, whatever its route, gets this response.
    pub fn force_next(&self, status: u16, body: &str) {
        let status = StatusCode::from_u16(status).unwrap();
        *self.forced.lock().unwrap() = Some((status, body.to_string()));
    }

    pub fn records(&self) -> Vec<Value> {
        self.records.lock().unwrap().clone()
    }

    pub fn profile(&self) -> Option<Value> {
        self.profile.lock().unwrap().clone()
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

pub struct TestServer {
    pub backend: Arc<FakeBackend>,
    pub base_url: String,
}

impl TestServer {
    pub async fn start() -> Self {
        let backend = Arc::new(FakeBackend::default());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        let app = router(backend.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            backend,
            base_url: format!("http://{addr}"),
        }
    }

    pub fn http(&self) -> HttpApi {
        HttpApi::new(&self.base_url, Duration::from_secs(5)).unwrap()
    }
}

/// A base URL nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn record_json(id: u64, date: &str, check_in: &str, check_out: Option<&str>) -> Value {
    json!({
        "id": id,
        "checkInDate": date,
        "checkInTime": check_in,
        "checkOutTime": check_out,
    })
}

fn router(backend: Arc<FakeBackend>) -> Router {
    Router::new()
        .route("/api/attendance", get(list_records))
        .route("/api/attendance/save", axum::routing::post(create_record))
        .route(
            "/api/attendance/{id}",
            get(get_record).put(update_record).delete(delete_record),
        )
        .route(
            "/api/personal-info",
            get(get_profile).post(save_profile).put(update_profile).delete(delete_profile),
        )
        .layer(middleware::from_fn_with_state(backend.clone(), record_and_force))
        .layer(TraceLayer::new_for_http())
        .with_state(backend)
}

async fn record_and_force(State(backend): State<Arc<FakeBackend>>, request: Request, next: Next) -> Response {
    backend
        .requests
        .lock()
        .unwrap()
        .push(format!("{} {}", request.method(), request.uri().path()));

    let forced = backend.forced.lock().unwrap().take();
    match forced {
        Some((status, body)) => Response::builder()
            .status(status)
            .body(Body::from(body))
            .unwrap(),
        None => next.run(request).await,
    }
}

fn id_of(record: &Value) -> String {
    match &record["id"] {
        Value::String(id) => id.clone(),
        other => other.to_string(),
    }
}

async fn list_records(State(backend): State<Arc<FakeBackend>>) -> Json<Vec<Value>> {
    Json(backend.records())
}

async fn create_record(State(backend): State<Arc<FakeBackend>>, Json(mut draft): Json<Value>) -> Response {
    let id = {
        let mut next_id = backend.next_id.lock().unwrap();
        *next_id += 1;
        *next_id
    };
    draft["id"] = json!(id);
    backend.records.lock().unwrap().push(draft.clone());
    (StatusCode::CREATED, Json(draft)).into_response()
}

async fn get_record(State(backend): State<Arc<FakeBackend>>, Path(id): Path<String>) -> Response {
    let records = backend.records.lock().unwrap();
    match records.iter().find(|record| id_of(record) == id) {
        Some(record) => Json(record.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn update_record(
    State(backend): State<Arc<FakeBackend>>,
    Path(id): Path<String>,
    Json(mut draft): Json<Value>,
) -> Response {
    let mut records = backend.records.lock().unwrap();
    let Some(record) = records.iter_mut().find(|record| id_of(record) == id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    draft["id"] = record["id"].clone();
    *record = draft.clone();
    Json(draft).into_response()
}

async fn delete_record(State(backend): State<Arc<FakeBackend>>, Path(id): Path<String>) -> StatusCode {
    let mut records = backend.records.lock().unwrap();
    let before = records.len();
    records.retain(|record| id_of(record) != id);
    if records.len() < before {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn get_profile(State(backend): State<Arc<FakeBackend>>) -> Response {
    match backend.profile() {
        Some(profile) => Json(profile).into_response(),
        None => (StatusCode::NOT_FOUND, "no profile").into_response(),
    }
}

async fn save_profile(State(backend): State<Arc<FakeBackend>>, Json(profile): Json<Value>) -> Response {
    backend.seed_profile(profile.clone());
    (StatusCode::CREATED, Json(profile)).into_response()
}

async fn update_profile(State(backend): State<Arc<FakeBackend>>, Json(profile): Json<Value>) -> Response {
    if backend.profile().is_none() {
        return (StatusCode::NOT_FOUND, "no profile").into_response();
    }
    backend.seed_profile(profile.clone());
    Json(profile).into_response()
}

async fn delete_profile(State(backend): State<Arc<FakeBackend>>) -> StatusCode {
    match backend.profile.lock().unwrap().take() {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}
