use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{StatusCode, Uri},
};
use tokio::{net::TcpListener, task::JoinHandle};

use markerboard::BoardConfig;

pub use axum::http::Method;

/// One request as the backend saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone, Default)]
struct ServerState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    replies: Arc<Mutex<HashMap<String, (StatusCode, String)>>>,
}

/// Local stand-in for the portfolio backend.
///
/// Every path answers `200` with an empty body unless [`TestServer::reply`]
/// says otherwise. The server stops when dropped.
pub struct TestServer {
    base_url: String,
    state: ServerState,
    handle: JoinHandle<()>,
}

async fn record(
    State(state): State<ServerState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> (StatusCode, String) {
    let path = uri.path().to_string();
    state
        .requests
        .lock()
        .expect("request log poisoned")
        .push(RecordedRequest {
            method,
            path: path.clone(),
            query: uri.query().map(str::to_string),
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    state
        .replies
        .lock()
        .expect("reply table poisoned")
        .get(&path)
        .cloned()
        .unwrap_or((StatusCode::OK, String::new()))
}

impl TestServer {
    pub async fn start() -> anyhow::Result<Self> {
        let state = ServerState::default();
        let app = Router::new().fallback(record).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let address = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://{address}"),
            state,
            handle,
        })
    }

    pub fn config(&self) -> BoardConfig {
        BoardConfig::default().with_base_url(self.base_url.clone())
    }

    /// Answers every later request to `path` with `status` and `body`.
    pub fn reply(&self, path: &str, status: u16, body: &str) {
        let status = StatusCode::from_u16(status).expect("valid status code");
        self.state
            .replies
            .lock()
            .expect("reply table poisoned")
            .insert(path.to_string(), (status, body.to_string()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .expect("request log poisoned")
            .clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
