use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use complaint_core::IntakeError;
use thiserror::Error;
use tracing::error;

use crate::types::Envelope;

#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Intake(#[from] IntakeError),

  #[error("invalid request method")]
  UnsupportedMethod,

  #[error("worker: {0}")]
  Join(#[from] tokio::task::JoinError),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      Self::Intake(e) => match e {
        IntakeError::MalformedBody
        | IntakeError::Validation { .. }
        | IntakeError::TicketRequired
        | IntakeError::InvalidRequest => StatusCode::BAD_REQUEST,
        IntakeError::DataNotFound | IntakeError::TicketNotFound => StatusCode::NOT_FOUND,
        IntakeError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
      },
      Self::UnsupportedMethod => StatusCode::METHOD_NOT_ALLOWED,
      Self::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let message = if status.is_server_error() {
      error!(error = %self, "request failed");
      "internal server error".to_string()
    } else {
      self.to_string()
    };

    (status, Json(Envelope::failure(message))).into_response()
  }
}

/// Startup configuration that could not be parsed.
#[derive(Debug, Error)]
#[error("invalid {key}={value:?}: {reason}")]
pub struct ConfigError {
  pub key: String,
  pub value: String,
  pub reason: String,
}
