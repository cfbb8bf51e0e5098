//! Storage interface for complaints, plus the in-memory backend.

use std::sync::Mutex;

use crate::error::StoreError;
use crate::stats;
use crate::types::{Complaint, StatusCounts};

/// Result of looking a ticket up.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
  /// Nothing has ever been written to the store.
  Uninitialized,
  /// The store exists but holds no record with that ticket number.
  Missing,
  /// First record carrying the ticket number.
  Found(Complaint),
}

/// Persistence capability the intake desk depends on.
///
/// `append` must be atomic with respect to concurrent callers on the same
/// store and must reject a ticket number that is already present.
pub trait ComplaintStore: Send + Sync {
  fn append(&self, complaint: Complaint) -> Result<(), StoreError>;

  fn find_by_ticket(&self, ticket_number: &str) -> Result<Lookup, StoreError>;

  /// Counts over the whole collection; all zero when uninitialized.
  fn status_counts(&self) -> Result<StatusCounts, StoreError>;
}

/// Linear scan for the first record with an exactly matching ticket number.
pub(crate) fn first_match(records: &[Complaint], ticket_number: &str) -> Lookup {
  records
    .iter()
    .find(|c| c.ticket_number == ticket_number)
    .cloned()
    .map_or(Lookup::Missing, Lookup::Found)
}

pub(crate) fn ensure_unique(records: &[Complaint], ticket_number: &str) -> Result<(), StoreError> {
  if records.iter().any(|c| c.ticket_number == ticket_number) {
    return Err(StoreError::DuplicateTicket(ticket_number.to_string()));
  }
  Ok(())
}

/// Process-local store. Starts uninitialized, like a store file that has not
/// been written yet.
#[derive(Debug, Default)]
pub struct MemoryStore {
  records: Mutex<Option<Vec<Complaint>>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// A store that already holds `records` (bypasses uniqueness checks).
  pub fn with_records(records: Vec<Complaint>) -> Self {
    Self {
      records: Mutex::new(Some(records)),
    }
  }

  /// Snapshot of every record, in insertion order.
  pub fn records(&self) -> Result<Vec<Complaint>, StoreError> {
    let guard = self.records.lock().map_err(|_| StoreError::Poisoned)?;
    Ok(guard.clone().unwrap_or_default())
  }
}

impl ComplaintStore for MemoryStore {
  fn append(&self, complaint: Complaint) -> Result<(), StoreError> {
    let mut guard = self.records.lock().map_err(|_| StoreError::Poisoned)?;
    let records = guard.get_or_insert_with(Vec::new);
    ensure_unique(records, &complaint.ticket_number)?;
    records.push(complaint);
    Ok(())
  }

  fn find_by_ticket(&self, ticket_number: &str) -> Result<Lookup, StoreError> {
    let guard = self.records.lock().map_err(|_| StoreError::Poisoned)?;
    Ok(match guard.as_deref() {
      Some(records) => first_match(records, ticket_number),
      None => Lookup::Uninitialized,
    })
  }

  fn status_counts(&self) -> Result<StatusCounts, StoreError> {
    let guard = self.records.lock().map_err(|_| StoreError::Poisoned)?;
    Ok(guard.as_deref().map(stats::count_by_status).unwrap_or_default())
  }
}
