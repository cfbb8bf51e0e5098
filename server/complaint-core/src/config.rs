//! Intake configuration with sane defaults.

/// Validation thresholds and ticket assignment limits.
#[derive(Debug, Clone)]
pub struct Config {
  /// Minimum description length, in characters, after sanitization.
  pub min_description_chars: usize,
  /// Fewest digits a phone number may carry once non-digits are stripped.
  pub phone_min_digits: usize,
  /// Most digits a phone number may carry once non-digits are stripped.
  pub phone_max_digits: usize,
  /// How many ticket numbers to try before giving up on a collision streak.
  pub ticket_attempts: u32,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      min_description_chars: 20,
      phone_min_digits: 10,
      phone_max_digits: 15,
      ticket_attempts: 5,
    }
  }
}
