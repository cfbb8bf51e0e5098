//! Sanitize and validate inbound submissions into a canonical Draft.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::Config;
use crate::error::IntakeError;
use crate::types::{Draft, Submission};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
  )
  .expect("email pattern compiles")
});

/// Sanitize every field, then validate in order:
/// all present, email shape, phone digit count, description length.
/// The first failure wins.
pub fn normalize(raw: &Submission, config: &Config) -> Result<Draft, IntakeError> {
  let draft = Draft {
    name: sanitize(&raw.name),
    email: sanitize(&raw.email),
    phone: sanitize(&raw.phone),
    category: sanitize(&raw.category),
    title: sanitize(&raw.title),
    description: sanitize(&raw.description),
  };

  let fields = [
    ("name", &draft.name),
    ("email", &draft.email),
    ("phone", &draft.phone),
    ("category", &draft.category),
    ("title", &draft.title),
    ("description", &draft.description),
  ];
  if let Some((field, _)) = fields.iter().find(|(_, value)| value.is_empty()) {
    return Err(IntakeError::validation(field, "all fields are required"));
  }

  if !is_valid_email(&draft.email) {
    return Err(IntakeError::validation("email", "invalid email format"));
  }

  if !is_valid_phone(&draft.phone, config) {
    return Err(IntakeError::validation("phone", "invalid phone number format"));
  }

  if draft.description.chars().count() < config.min_description_chars {
    return Err(IntakeError::validation(
      "description",
      &format!(
        "description must be at least {} characters",
        config.min_description_chars
      ),
    ));
  }

  Ok(draft)
}

/// Trim, strip backslash escapes, then HTML-escape.
pub fn sanitize(input: &str) -> String {
  escape_html(&strip_backslashes(trim(input)))
}

/// Strips space, tab, newline, carriage return, NUL and vertical tab only;
/// other Unicode whitespace is content.
fn trim(s: &str) -> &str {
  s.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B'))
}

/// `\x` becomes `x`, `\\` becomes `\`, `\0` becomes NUL, a trailing lone `\` is dropped.
fn strip_backslashes(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut chars = s.chars();
  while let Some(ch) = chars.next() {
    if ch != '\\' {
      out.push(ch);
      continue;
    }
    match chars.next() {
      Some('0') => out.push('\0'),
      Some(next) => out.push(next),
      None => {}
    }
  }
  out
}

fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for ch in s.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#039;"),
      _ => out.push(ch),
    }
  }
  out
}

fn is_valid_email(email: &str) -> bool {
  EMAIL.is_match(email)
}

fn is_valid_phone(phone: &str, config: &Config) -> bool {
  let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
  (config.phone_min_digits..=config.phone_max_digits).contains(&digits)
}
