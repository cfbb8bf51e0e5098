//! Flat-file backend: one pretty-printed JSON array of complaints.
//!
//! Appends are serialized behind a mutex and land through a temp file that is
//! renamed over the target, so readers see either the old or the new array.
//! Several processes sharing one file are not coordinated.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::StoreError;
use crate::stats;
use crate::store::{ensure_unique, first_match, ComplaintStore, Lookup};
use crate::types::{Complaint, StatusCounts};

#[derive(Debug)]
pub struct FileStore {
  path: PathBuf,
  write_lock: Mutex<()>,
}

impl FileStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self {
      path: path.into(),
      write_lock: Mutex::new(()),
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// `None` when the file does not exist yet. A blank file is an empty array.
  pub fn load(&self) -> Result<Option<Vec<Complaint>>, StoreError> {
    let raw = match fs::read_to_string(&self.path) {
      Ok(raw) => raw,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(e.into()),
    };
    if raw.trim().is_empty() {
      return Ok(Some(Vec::new()));
    }
    serde_json::from_str(&raw)
      .map(Some)
      .map_err(|source| StoreError::Corrupt {
        path: self.path.clone(),
        source,
      })
  }

  fn write_all(&self, records: &[Complaint]) -> Result<(), StoreError> {
    let dir = match self.path.parent() {
      Some(p) if !p.as_os_str().is_empty() => p,
      _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut tmp, records)?;
    tmp.write_all(b"\n")?;
    tmp.as_file().sync_all()?;
    tmp.persist(&self.path).map_err(|e| StoreError::Persist {
      path: self.path.clone(),
      source: e.error,
    })?;

    debug!(path = %self.path.display(), records = records.len(), "store rewritten");
    Ok(())
  }
}

impl ComplaintStore for FileStore {
  fn append(&self, complaint: Complaint) -> Result<(), StoreError> {
    let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
    let mut records = self.load()?.unwrap_or_default();
    ensure_unique(&records, &complaint.ticket_number)?;
    records.push(complaint);
    self.write_all(&records)
  }

  fn find_by_ticket(&self, ticket_number: &str) -> Result<Lookup, StoreError> {
    Ok(match self.load()? {
      Some(records) => first_match(&records, ticket_number),
      None => Lookup::Uninitialized,
    })
  }

  fn status_counts(&self) -> Result<StatusCounts, StoreError> {
    Ok(
      self
        .load()?
        .map(|records| stats::count_by_status(&records))
        .unwrap_or_default(),
    )
  }
}
