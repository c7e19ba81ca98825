//! Shared test infrastructure.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tempfile::TempDir;

pub fn zkvms_payload() -> Value {
    json!({
        "zkvms": [
            {"id": "sp1", "name": "SP1", "tags": ["risc-v", "rust"], "stars": 1200},
            {"id": "risc0", "name": "RISC Zero", "tags": ["risc-v"], "stars": 1700},
            {"id": "jolt", "name": "Jolt", "tags": ["lookup"], "stars": 800}
        ],
        "lastUpdated": "2024-06-01T00:00:00Z"
    })
}

pub fn spaces_payload() -> Value {
    json!({ "spaces": [ {"id": "isa", "name": "Instruction set"} ] })
}

/// A local HTTP server serving the fixture payloads.
pub struct TestServer {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl TestServer {
    /// Start a server on an ephemeral port.
    pub async fn start() -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        let zkvms = zkvms_payload();
        let spaces = spaces_payload();
        let router = Router::new()
            .route(
                "/data/zkvms.json",
                get(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    let body = zkvms.clone();
                    async move { Json(body) }
                }),
            )
            .route(
                "/data/spaces.json",
                get(move || {
                    let body = spaces.clone();
                    async move { Json(body) }
                }),
            )
            .route("/data/broken.json", get(|| async { "{not json" }))
            .route(
                "/data/error.json",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/data"),
            hits,
        }
    }

    /// Number of requests for `zkvms.json` so far.
    pub fn zkvms_hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// A temporary data directory holding the fixture payloads.
pub fn data_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("zkvms.json"),
        serde_json::to_vec_pretty(&zkvms_payload()).unwrap(),
    )
    .unwrap();
    std::fs::write(
        dir.path().join("spaces.json"),
        serde_json::to_vec(&spaces_payload()).unwrap(),
    )
    .unwrap();
    dir
}
