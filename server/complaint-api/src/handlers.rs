//! HTTP handlers for the complaint endpoint.

use axum::{
  extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use std::sync::Arc;
use tracing::debug;

use complaint_core::{Desk, IntakeError, Submission};

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{ComplaintQuery, Envelope};

pub async fn health() -> &'static str {
  "ok"
}

/// `POST /complaint`
pub async fn submit(
  State(state): State<Arc<AppState>>,
  payload: Result<Json<Submission>, JsonRejection>,
) -> Result<Response, ApiError> {
  let Json(raw) = payload.map_err(|e| {
    debug!("submit: unreadable body: {}", e);
    IntakeError::MalformedBody
  })?;

  let receipt = on_desk(state, move |desk| desk.submit(&raw)).await?;
  Ok(Json(Envelope::ok_with_message(receipt, "complaint submitted successfully")).into_response())
}

/// `GET /complaint?action=track&ticket=T` and `GET /complaint?action=stats`
pub async fn query(
  State(state): State<Arc<AppState>>,
  params: Result<Query<ComplaintQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
  let Query(params) = params.map_err(|e| {
    debug!("query: unreadable query string: {}", e);
    IntakeError::InvalidRequest
  })?;

  match params.action.as_deref() {
    Some("track") => {
      let ticket = params.ticket.unwrap_or_default();
      let complaint = on_desk(state, move |desk| desk.track(&ticket)).await?;
      Ok(Json(Envelope::ok(complaint)).into_response())
    }
    Some("stats") => {
      let counts = on_desk(state, |desk| desk.stats()).await?;
      Ok(Json(Envelope::ok(counts)).into_response())
    }
    _ => Err(IntakeError::InvalidRequest.into()),
  }
}

/// `OPTIONS /complaint` without CORS preflight headers.
pub async fn preflight() -> StatusCode {
  StatusCode::OK
}

/// Any other verb on `/complaint`.
pub async fn unsupported_method() -> ApiError {
  ApiError::UnsupportedMethod
}

/// Run a desk call on the blocking pool; every desk call touches the store.
async fn on_desk<T, F>(state: Arc<AppState>, f: F) -> Result<T, ApiError>
where
  F: FnOnce(&Desk) -> Result<T, IntakeError> + Send + 'static,
  T: Send + 'static,
{
  let result = tokio::task::spawn_blocking(move || f(&state.desk)).await?;
  Ok(result?)
}
