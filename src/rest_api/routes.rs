//! # Item Routes
//!
//! `PATCH /v2/item/{item_id}` and `DELETE /v2/item/{item_id}`, plus the
//! `/ping` liveness route.
//!
//! Each request runs its orchestration on a blocking worker with its
//! own database connection, so the transaction handle never crosses
//! tasks and no in-process lock is held across storage I/O.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::idcodec::IdCodec;
use crate::observability::{Logger, Severity};
use crate::requests::UpdateItemForm;
use crate::service;
use crate::store;

use super::response::{Envelope, CODE_INTERNAL, CODE_VALIDATION};

/// State shared by all handlers.
pub struct AppState {
    pub db_path: PathBuf,
    pub codec: IdCodec,
}

impl AppState {
    pub fn new(db_path: impl Into<PathBuf>, codec_secret: &str) -> Self {
        Self {
            db_path: db_path.into(),
            codec: IdCodec::new(codec_secret),
        }
    }
}

/// Item mutation routes.
pub fn item_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/v2/item/{item_id}",
            patch(update_item_handler).delete(delete_item_handler),
        )
        .route("/ping", get(ping_handler))
        .with_state(state)
}

async fn ping_handler() -> Json<Value> {
    Json(json!({ "message": "pong" }))
}

async fn update_item_handler(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            let envelope = Envelope::new(CODE_VALIDATION, rejection.body_text());
            return (StatusCode::BAD_REQUEST, Json(envelope)).into_response();
        }
    };

    let form = match UpdateItemForm::from_body(&body) {
        Ok(form) => form,
        Err(err) => return err.into_response(),
    };

    let result = tokio::task::spawn_blocking(move || {
        let mut conn = store::open(&state.db_path)?;
        service::update_item(&mut conn, &state.codec, &item_id, &form, &body)
    })
    .await;

    match result {
        Ok(Ok(())) => {
            let envelope = Envelope::ok("Record has been updated");
            (StatusCode::CREATED, Json(envelope)).into_response()
        }
        Ok(Err(err)) => err.into_response(),
        Err(join_err) => worker_failure(&join_err),
    }
}

async fn delete_item_handler(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<String>,
) -> Response {
    let result = tokio::task::spawn_blocking(move || {
        let mut conn = store::open(&state.db_path)?;
        service::delete_item(&mut conn, &state.codec, &item_id)
    })
    .await;

    match result {
        Ok(Ok(())) => {
            let envelope = Envelope::ok("Record has been deleted");
            (StatusCode::OK, Json(envelope)).into_response()
        }
        Ok(Err(err)) => err.into_response(),
        Err(join_err) => worker_failure(&join_err),
    }
}

/// The blocking worker panicked or was cancelled. The dropped
/// transaction has already rolled back; report internal.
fn worker_failure(join_err: &tokio::task::JoinError) -> Response {
    let raw = join_err.to_string();
    Logger::log_stderr(Severity::Error, "worker_failed", &[("error", raw.as_str())]);
    let envelope = Envelope::new(CODE_INTERNAL, super::errors::INTERNAL_MESSAGE);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(envelope)).into_response()
}
