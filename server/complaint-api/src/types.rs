//! Request/response types for the complaint endpoint.

use serde::{Deserialize, Serialize};

/// Query string of `GET /complaint`.
#[derive(Debug, Default, Deserialize)]
pub struct ComplaintQuery {
  #[serde(default)]
  pub action: Option<String>,
  #[serde(default)]
  pub ticket: Option<String>,
}

/// Every response body: `{success, message?, data?}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
  pub success: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data: Option<T>,
}

impl<T> Envelope<T> {
  pub fn ok(data: T) -> Self {
    Self {
      success: true,
      message: None,
      data: Some(data),
    }
  }

  pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
    Self {
      success: true,
      message: Some(message.into()),
      data: Some(data),
    }
  }
}

impl Envelope<()> {
  pub fn failure(message: impl Into<String>) -> Self {
    Self {
      success: false,
      message: Some(message.into()),
      data: None,
    }
  }
}
