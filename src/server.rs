//! HTTP front end: the robot posts sentences (or `*<code>` answers) and gets
//! the framed action list back.

use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};

use crate::kernel::{frame, Session, SessionStatus};

/// One session per server; the mutex serializes concurrent requests.
pub type SharedSession = Arc<Mutex<Session>>;

pub fn router(session: SharedSession) -> Router {
    Router::new()
        .route("/", post(handle_payload))
        .route("/status", get(status))
        .with_state(session)
}

async fn handle_payload(
    State(session): State<SharedSession>,
    body: String,
) -> Result<String, (StatusCode, String)> {
    // Annotation and knowledge-base calls block
    let outcome = tokio::task::spawn_blocking(move || {
        let mut session = session.lock().unwrap_or_else(PoisonError::into_inner);
        session.handle(&body)
    })
    .await
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    match outcome {
        Ok(tokens) => Ok(frame(&tokens)),
        Err(e) => {
            warn!("Request failed: {}", e);
            Err((StatusCode::SERVICE_UNAVAILABLE, e.to_string()))
        }
    }
}

async fn status(State(session): State<SharedSession>) -> Result<Json<SessionStatus>, (StatusCode, String)> {
    let snapshot = tokio::task::spawn_blocking(move || {
        session.lock().unwrap_or_else(PoisonError::into_inner).status()
    })
    .await
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(snapshot))
}

/// Run the HTTP server until it fails.
pub async fn serve(session: Session, addr: &str) -> Result<()> {
    let app = router(Arc::new(Mutex::new(session)));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
