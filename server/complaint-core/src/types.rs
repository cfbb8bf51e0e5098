//! Core types for complaint intake (JSON contracts + stored records).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Inbound types (JSON contract — what the browser form sends)
// ---------------------------------------------------------------------------

/// One complaint submission. Only a non-empty JSON object is accepted; missing
/// keys become empty strings and are rejected by validation; unknown keys are
/// ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Submission {
  pub name: String,
  pub email: String,
  pub phone: String,
  pub category: String,
  pub title: String,
  pub description: String,
}

#[derive(Deserialize)]
struct SubmissionFields {
  #[serde(default)]
  name: String,
  #[serde(default)]
  email: String,
  #[serde(default)]
  phone: String,
  #[serde(default)]
  category: String,
  #[serde(default)]
  title: String,
  #[serde(default)]
  description: String,
}

impl TryFrom<Map<String, Value>> for Submission {
  type Error = serde_json::Error;

  fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
    if map.is_empty() {
      return Err(serde::de::Error::custom("empty submission"));
    }
    let f: SubmissionFields = serde_json::from_value(Value::Object(map))?;
    Ok(Self {
      name: f.name,
      email: f.email,
      phone: f.phone,
      category: f.category,
      title: f.title,
      description: f.description,
    })
  }
}

/// Sanitized and validated submission, ready to be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
  pub name: String,
  pub email: String,
  pub phone: String,
  pub category: String,
  pub title: String,
  pub description: String,
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Complaint status. Values written out-of-band that are not one of the four
/// known states are kept verbatim in `Unknown` so a rewrite never loses them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
  Pending,
  Processing,
  Resolved,
  Rejected,
  Unknown(String),
}

impl Status {
  pub fn as_str(&self) -> &str {
    match self {
      Self::Pending => "pending",
      Self::Processing => "processing",
      Self::Resolved => "resolved",
      Self::Rejected => "rejected",
      Self::Unknown(raw) => raw,
    }
  }
}

impl From<String> for Status {
  fn from(s: String) -> Self {
    match s.as_str() {
      "pending" => Self::Pending,
      "processing" => Self::Processing,
      "resolved" => Self::Resolved,
      "rejected" => Self::Rejected,
      _ => Self::Unknown(s),
    }
  }
}

impl From<Status> for String {
  fn from(status: Status) -> Self {
    match status {
      Status::Unknown(raw) => raw,
      known => known.as_str().to_string(),
    }
  }
}

// ---------------------------------------------------------------------------
// Stored record
// ---------------------------------------------------------------------------

/// One persisted complaint, as it appears in the store file and in track responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
  pub id: String,
  pub ticket_number: String,
  pub name: String,
  pub email: String,
  pub phone: String,
  pub category: String,
  pub title: String,
  pub description: String,
  /// `None` for records stored without a status key.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status: Option<Status>,
  pub created_at: Timestamp,
  pub updated_at: Timestamp,
  /// Keys this service does not know about, preserved across rewrites.
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl Complaint {
  /// Build a fresh pending record from a validated draft.
  pub fn from_draft(draft: Draft, id: String, ticket_number: String, now: NaiveDateTime) -> Self {
    Self {
      id,
      ticket_number,
      name: draft.name,
      email: draft.email,
      phone: draft.phone,
      category: draft.category,
      title: draft.title,
      description: draft.description,
      status: Some(Status::Pending),
      created_at: Timestamp::Local(now),
      updated_at: Timestamp::Local(now),
      extra: Map::new(),
    }
  }
}

/// A stored timestamp. Records this service writes use `YYYY-MM-DD HH:MM:SS`
/// (local time, no zone); anything else written out-of-band is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
  Local(#[serde(with = "timestamp")] NaiveDateTime),
  Foreign(Value),
}

pub mod timestamp {
  use chrono::NaiveDateTime;
  use serde::{Deserialize, Deserializer, Serializer};

  pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

  pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&ts.format(FORMAT))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(d)?;
    NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
  }
}

// ---------------------------------------------------------------------------
// Output types (JSON contract — what we answer with)
// ---------------------------------------------------------------------------

/// Returned after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
  pub ticket_number: String,
  pub status: Status,
}

/// Aggregate counts. `total` includes records whose status is missing or unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
  pub total: u64,
  pub pending: u64,
  pub processing: u64,
  pub resolved: u64,
  pub rejected: u64,
}
