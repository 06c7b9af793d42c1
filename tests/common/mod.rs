use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use tokio::task::JoinHandle;

use wardmap::model::FeedConfig;

/// In-process stand-in for the ticket backend: serves a scripted payload at
/// GET /tickets and can be flipped into a failure status mid-test.
pub struct StubBackend {
    pub base_url: String,
    payload: Arc<Mutex<Value>>,
    fail_status: Arc<Mutex<Option<u16>>>,
    task: JoinHandle<()>,
}

#[derive(Clone)]
struct StubState {
    payload: Arc<Mutex<Value>>,
    fail_status: Arc<Mutex<Option<u16>>>,
}

pub async fn spawn_backend(payload: Value) -> Result<StubBackend> {
    let payload = Arc::new(Mutex::new(payload));
    let fail_status = Arc::new(Mutex::new(None));

    let app = Router::new().route("/tickets", get(tickets)).with_state(StubState {
        payload: payload.clone(),
        fail_status: fail_status.clone(),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("bind stub backend")?;
    let addr = listener.local_addr().context("stub backend addr")?;

    let task = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(StubBackend {
        base_url: format!("http://{}", addr),
        payload,
        fail_status,
        task,
    })
}

async fn tickets(State(state): State<StubState>) -> Result<Json<Value>, StatusCode> {
    if let Some(code) = *state.fail_status.lock().unwrap() {
        return Err(StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR));
    }
    Ok(Json(state.payload.lock().unwrap().clone()))
}

impl StubBackend {
    pub fn config(&self) -> FeedConfig {
        FeedConfig::new(self.base_url.clone())
    }

    #[allow(dead_code)]
    pub fn set_payload(&self, payload: Value) {
        *self.payload.lock().unwrap() = payload;
    }

    #[allow(dead_code)]
    pub fn set_fail_status(&self, status: Option<u16>) {
        *self.fail_status.lock().unwrap() = status;
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}
