//! Structured error types for complaint intake.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by a `ComplaintStore` backend.
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("io: {0}")]
  Io(#[from] std::io::Error),

  /// The store file exists but does not hold a JSON array of complaints.
  #[error("corrupt store file {}: {source}", path.display())]
  Corrupt {
    path: PathBuf,
    source: serde_json::Error,
  },

  #[error("encode: {0}")]
  Encode(#[from] serde_json::Error),

  #[error("persist {}: {source}", path.display())]
  Persist {
    path: PathBuf,
    source: std::io::Error,
  },

  #[error("duplicate ticket number {0}")]
  DuplicateTicket(String),

  #[error("store lock poisoned")]
  Poisoned,
}

/// Every way an intake operation can fail. `Display` is the message shown to
/// the submitter, except for `Store`, whose detail is meant for logs.
#[derive(Debug, Error)]
pub enum IntakeError {
  #[error("invalid request data")]
  MalformedBody,

  #[error("{reason}")]
  Validation { field: String, reason: String },

  #[error("ticket number required")]
  TicketRequired,

  #[error("data not found")]
  DataNotFound,

  #[error("ticket not found")]
  TicketNotFound,

  #[error("invalid request method")]
  InvalidRequest,

  #[error("storage: {0}")]
  Store(#[from] StoreError),
}

impl IntakeError {
  pub fn validation(field: &str, reason: &str) -> Self {
    Self::Validation {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }
}
