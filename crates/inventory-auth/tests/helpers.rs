//! Shared helpers: an in-process fake of the user service and API gateway.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use serde_json::{Value, json};

use inventory_auth::storage::MemorySessionStorage;
use inventory_auth::{AuthClient, SessionStore};
use inventory_core::config::SessionConfig;
use inventory_core::traits::SessionStorage;

pub const GOOD_TOKEN: &str = "good-token";
pub const STALE_TOKEN: &str = "stale-token";

/// A running fake backend.
pub struct FakeBackend {
    pub base_url: String,
    pub calls: Arc<AtomicUsize>,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/signup", post(signup))
            .route("/api/secure/user/current", get(current_user))
            .layer(axum::middleware::from_fn(
                move |req: axum::extract::Request, next: axum::middleware::Next| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    next.run(req)
                },
            ));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            calls,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// A session store talking to this backend over the given storage.
    pub fn store_with(&self, storage: Arc<dyn SessionStorage>) -> SessionStore {
        let client = AuthClient::new(reqwest::Client::new(), &self.base_url, &self.base_url);
        SessionStore::new(storage, client, &SessionConfig::default())
    }

    pub fn store(&self) -> SessionStore {
        self.store_with(Arc::new(MemorySessionStorage::new()))
    }
}

fn user(full_name: &str, role: &str) -> Value {
    json!({
        "id": 7,
        "username": "morgan",
        "fullName": full_name,
        "role": role,
        "email": "morgan@example.com"
    })
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    match (username, password) {
        ("morgan", "secret") => (
            StatusCode::OK,
            Json(json!({ "success": true, "token": GOOD_TOKEN, "user": user("Morgan Lee", "MANAGER") })),
        ),
        ("stale", "secret") => (
            StatusCode::OK,
            Json(json!({ "success": true, "token": STALE_TOKEN, "user": user("Stale User", "SUPPLIER") })),
        ),
        ("halfway", _) => (
            StatusCode::OK,
            Json(json!({ "success": true, "token": "orphan-token" })),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "error": "Invalid username or password" })),
        ),
    }
}

async fn signup(Json(body): Json<Value>) -> impl IntoResponse {
    if body["username"] == "taken" {
        (StatusCode::CONFLICT, "Username already exists")
    } else {
        (StatusCode::CREATED, "User registered successfully")
    }
}

async fn current_user(headers: HeaderMap) -> impl IntoResponse {
    let expected = format!("Bearer {GOOD_TOKEN}");
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => {
            (StatusCode::OK, Json(user("Morgan Lee-Refreshed", "MANAGER"))).into_response()
        }
        _ => StatusCode::UNAUTHORIZED.into_response(),
    }
}
