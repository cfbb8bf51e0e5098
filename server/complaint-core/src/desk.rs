//! Intake desk: validates submissions, assigns tickets, answers queries.

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{IntakeError, StoreError};
use crate::normalize;
use crate::store::{ComplaintStore, Lookup};
use crate::ticket::{self, RandomSuffix, TicketSource};
use crate::types::*;

/// The complaint intake desk. Holds no per-request state; every call goes
/// straight to the store.
pub struct Desk {
  config: Config,
  store: Arc<dyn ComplaintStore>,
  tickets: Box<dyn TicketSource>,
  clock: fn() -> NaiveDateTime,
}

fn local_now() -> NaiveDateTime {
  Local::now().naive_local()
}

impl Desk {
  pub fn new(config: Config, store: Arc<dyn ComplaintStore>) -> Self {
    Self {
      config,
      store,
      tickets: Box::new(RandomSuffix),
      clock: local_now,
    }
  }

  pub fn with_defaults(store: Arc<dyn ComplaintStore>) -> Self {
    Self::new(Config::default(), store)
  }

  pub fn with_ticket_source(mut self, source: impl TicketSource + 'static) -> Self {
    self.tickets = Box::new(source);
    self
  }

  pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
    self.clock = clock;
    self
  }

  /// Validate and persist one submission.
  ///
  /// A ticket number the store already holds is regenerated, up to
  /// `config.ticket_attempts` tries.
  pub fn submit(&self, raw: &Submission) -> Result<Receipt, IntakeError> {
    let draft = normalize::normalize(raw, &self.config).map_err(|e| {
      debug!(error = %e, "submission rejected");
      e
    })?;

    let now = (self.clock)();
    let id = Uuid::new_v4().simple().to_string();
    let attempts = self.config.ticket_attempts.max(1);

    let mut last_collision = String::new();
    for attempt in 1..=attempts {
      let ticket_number = ticket::format(now.date(), self.tickets.next_suffix());
      let complaint = Complaint::from_draft(draft.clone(), id.clone(), ticket_number.clone(), now);

      match self.store.append(complaint) {
        Ok(()) => {
          info!(ticket = %ticket_number, category = %draft.category, "complaint accepted");
          return Ok(Receipt {
            ticket_number,
            status: Status::Pending,
          });
        }
        Err(StoreError::DuplicateTicket(taken)) => {
          warn!(ticket = %taken, attempt, "ticket number collision, regenerating");
          last_collision = taken;
        }
        Err(e) => return Err(e.into()),
      }
    }

    Err(StoreError::DuplicateTicket(last_collision).into())
  }

  /// Look up one complaint by ticket number. The input is sanitized like any
  /// submitted field before matching.
  pub fn track(&self, raw_ticket: &str) -> Result<Complaint, IntakeError> {
    let ticket_number = normalize::sanitize(raw_ticket);
    if ticket_number.is_empty() {
      return Err(IntakeError::TicketRequired);
    }

    match self.store.find_by_ticket(&ticket_number)? {
      Lookup::Found(complaint) => Ok(complaint),
      Lookup::Missing => Err(IntakeError::TicketNotFound),
      Lookup::Uninitialized => Err(IntakeError::DataNotFound),
    }
  }

  pub fn stats(&self) -> Result<StatusCounts, IntakeError> {
    Ok(self.store.status_counts()?)
  }
}
