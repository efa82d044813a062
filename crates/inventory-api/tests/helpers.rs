//! Shared test helpers: a fake orders upstream and a router under test.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::State;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tower::ServiceExt;

use inventory_api::{AppState, build_app};
use inventory_core::config::AppConfig;

/// What the fake upstream answers with.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(serde_json::Value),
    Status(StatusCode, &'static str),
    Text(&'static str),
}

#[derive(Clone)]
struct Upstream {
    reply: Reply,
    calls: Arc<AtomicUsize>,
    last_headers: Arc<Mutex<Option<HeaderMap>>>,
}

async fn orders(State(upstream): State<Upstream>, headers: HeaderMap) -> Response {
    upstream.calls.fetch_add(1, Ordering::SeqCst);
    *upstream.last_headers.lock().unwrap() = Some(headers);
    match upstream.reply {
        Reply::Json(value) => axum::Json(value).into_response(),
        Reply::Status(status, body) => (status, body).into_response(),
        Reply::Text(body) => body.into_response(),
    }
}

/// An upstream that answers one request with `status_line` and a body cut
/// short of its declared length, then hangs up.
pub async fn truncated_upstream(status_line: &'static str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let reply = format!("HTTP/1.1 {status_line}\r\nContent-Length: 100\r\n\r\npartial");
        let _ = socket.write_all(reply.as_bytes()).await;
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}")
}

/// A running fake orders service.
pub struct FakeUpstream {
    pub base_url: String,
    calls: Arc<AtomicUsize>,
    last_headers: Arc<Mutex<Option<HeaderMap>>>,
}

impl FakeUpstream {
    pub async fn start(reply: Reply) -> Self {
        let upstream = Upstream {
            reply,
            calls: Arc::new(AtomicUsize::new(0)),
            last_headers: Arc::new(Mutex::new(None)),
        };
        let calls = Arc::clone(&upstream.calls);
        let last_headers = Arc::clone(&upstream.last_headers);

        let app = Router::new()
            .route("/api/orders/all", get(orders))
            .with_state(upstream);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            calls,
            last_headers,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_headers(&self) -> HeaderMap {
        self.last_headers.lock().unwrap().clone().unwrap_or_default()
    }
}

/// Captured response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// The portal router with its frontend bundle in a temporary directory.
pub struct TestApp {
    pub router: Router,
    _static_dir: tempfile::TempDir,
}

pub const INDEX_HTML: &str = "<html><body>portal</body></html>";

impl TestApp {
    /// A portal whose orders proxy points at `orders_base`.
    pub fn new(orders_base: &str) -> Self {
        let static_dir = tempfile::tempdir().unwrap();
        std::fs::write(static_dir.path().join("index.html"), INDEX_HTML).unwrap();

        let mut config = AppConfig::default();
        config.proxy.orders_base_url = Some(format!("{orders_base}/api/orders"));
        config.server.static_dir = static_dir.path().to_string_lossy().into_owned();

        let state = AppState::new(config).unwrap();
        Self {
            router: build_app(state),
            _static_dir: static_dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse {
            status,
            headers,
            body: body.to_vec(),
        }
    }

    pub async fn get(&self, uri: &str, headers: &[(&str, &str)]) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }
}

/// An unsigned JWT carrying `payload`.
pub fn token(payload: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.sig")
}

/// Cookie header value carrying a token for `role` that expires far in the future.
pub fn session_cookie(role: &str) -> String {
    let token = token(serde_json::json!({ "role": role, "exp": 4_102_444_800i64 }));
    format!("inventory_auth_token={token}")
}
