// tests/common/mod.rs
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::routing::post;
use axum::{Form, Json};
use chrono::{DateTime, Duration, TimeZone, Utc};
use reqwest::Client;

use crate::cache::token_cache::TokenCache;
use crate::client::AuthenticatedClient;
use crate::config::settings::BackendConfig;
use crate::helpers::time::Clock;

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "Password123";
pub const TRACE_HEADER: &str = "x-trace-id";

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(start) }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

/// What the mock backend saw on a business endpoint.
#[derive(Debug, Clone)]
pub struct Received {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub trace_id: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    pub logins: Arc<AtomicUsize>,
    pub calls: Arc<AtomicUsize>,
    pub received: Arc<Mutex<Vec<Received>>>,
}

impl MockBackend {
    pub fn logins(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }
}

/// Management API double.
///
/// `POST /token` issues `tok-1`, `tok-2`, ... for the right credentials and
/// 401 otherwise. Every other request answers with `statuses[n]` for the
/// n-th business call (200 once the list runs out) and echoes its path.
pub async fn spawn_backend(statuses: Vec<StatusCode>) -> (JoinHandle<()>, SocketAddr, MockBackend) {
    let backend = MockBackend::default();

    let logins = backend.logins.clone();
    let login = post(move |Form(form): Form<HashMap<String, String>>| {
        let logins = logins.clone();
        async move {
            let valid = form.get("username").map(String::as_str) == Some(USERNAME)
                && form.get("password").map(String::as_str) == Some(PASSWORD);
            if !valid {
                return (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Incorrect username or password"})));
            }
            let n = logins.fetch_add(1, Ordering::SeqCst) + 1;
            (StatusCode::OK, Json(json!({"access_token": format!("tok-{n}"), "token_type": "bearer", "expires_in": 900})))
        }
    });

    let calls = backend.calls.clone();
    let received = backend.received.clone();
    let statuses = Arc::new(statuses);
    let business = move |method: Method, uri: Uri, headers: HeaderMap, body: String| {
        let calls = calls.clone();
        let received = received.clone();
        let statuses = statuses.clone();
        async move {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned);
            received.lock().unwrap().push(Received {
                method,
                path: uri.path().to_owned(),
                authorization: header("authorization"),
                trace_id: header(TRACE_HEADER),
                body,
            });
            let status = statuses.get(n).copied().unwrap_or(StatusCode::OK);
            (status, format!("{} {}", status.as_u16(), uri.path()))
        }
    };

    let router = Router::new().route("/token", login).fallback(business);
    let (handle, addr) = spawn_axum(router).await;
    (handle, addr, backend)
}

pub fn base_url(addr: SocketAddr) -> String {
    format!("http://{}", addr)
}

pub fn backend_config(addr: SocketAddr) -> Arc<BackendConfig> {
    Arc::new(BackendConfig::new(&base_url(addr), USERNAME, PASSWORD))
}

pub fn start_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()))
}

/// Client without idle keep-alive, so a stopped server is seen as unreachable.
pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .pool_max_idle_per_host(0)
        .build()
        .expect("reqwest client")
}

pub fn build_gateway(config: Arc<BackendConfig>, clock: Arc<ManualClock>) -> AuthenticatedClient {
    let client = build_reqwest_client();
    let tokens = TokenCache::with_clock(config.clone(), client.clone(), clock);
    AuthenticatedClient::with_parts(config, client, tokens)
}
