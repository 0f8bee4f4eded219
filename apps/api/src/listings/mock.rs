//! In-process stand-in for a RapidAPI job provider, used by adapter tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Router,
};
use tokio::net::TcpListener;

/// One request as seen by the provider.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub params: HashMap<String, String>,
    pub api_key: Option<String>,
    pub host: Option<String>,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

pub struct MockProvider {
    pub url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockProvider {
    /// Serves `body` with `status` at `/jobs` on a random local port.
    pub async fn start(status: u16, body: &str) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status: StatusCode::from_u16(status).expect("valid status"),
            body: body.to_string(),
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/jobs", get(handle_jobs))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock provider");
        let addr = listener.local_addr().expect("Failed to get local address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock provider failed");
        });

        Self {
            url: format!("http://{addr}/jobs"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().expect("mock lock poisoned").clone()
    }
}

async fn handle_jobs(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, String) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state
        .requests
        .lock()
        .expect("mock lock poisoned")
        .push(CapturedRequest {
            params,
            api_key: header("x-rapidapi-key"),
            host: header("x-rapidapi-host"),
        });
    (state.status, state.body.clone())
}
