//! Ticket numbers: `TKT-YYYYMMDD-NNNN`.

use chrono::NaiveDate;
use rand::Rng;

/// Largest random suffix; suffixes are zero-padded to four digits.
pub const MAX_SUFFIX: u16 = 9999;

/// Source of the random four-digit part of a ticket number.
pub trait TicketSource: Send + Sync {
  /// A value in `0..=MAX_SUFFIX`.
  fn next_suffix(&self) -> u16;
}

/// Non-cryptographic thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSuffix;

impl TicketSource for RandomSuffix {
  fn next_suffix(&self) -> u16 {
    rand::thread_rng().gen_range(0..=MAX_SUFFIX)
  }
}

/// Format a ticket number for the given date and suffix.
pub fn format(date: NaiveDate, suffix: u16) -> String {
  format!("TKT-{}-{:04}", date.format("%Y%m%d"), suffix.min(MAX_SUFFIX))
}

/// True when `s` has the exact `TKT-` + 8 digits + `-` + 4 digits shape.
pub fn is_well_formed(s: &str) -> bool {
  let Some(rest) = s.strip_prefix("TKT-") else {
    return false;
  };
  let bytes = rest.as_bytes();
  bytes.len() == 13
    && bytes[8] == b'-'
    && bytes[..8].iter().all(u8::is_ascii_digit)
    && bytes[9..].iter().all(u8::is_ascii_digit)
}
