use std::{env, fmt::Display, net::IpAddr, path::PathBuf, str::FromStr};

use tracing::info;

use crate::error::ConfigError;

pub struct Config {
  pub host: IpAddr,
  pub port: u16,
  pub data_file: PathBuf,
  pub static_dir: Option<PathBuf>,
  pub ticket_attempts: u32,
}

impl Config {
  pub fn load() -> Result<Self, ConfigError> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Build from any key lookup; `load` reads the process environment.
  pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
    Ok(Self {
      host: try_load(&var, "HOST", "127.0.0.1")?,
      port: try_load(&var, "PORT", "5005")?,
      data_file: try_load(&var, "DATA_FILE", "data/complaints.json")?,
      static_dir: var("STATIC_DIR")
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from),
      ticket_attempts: try_load(&var, "TICKET_ATTEMPTS", "5")?,
    })
  }

  pub fn core(&self) -> complaint_core::Config {
    complaint_core::Config {
      ticket_attempts: self.ticket_attempts,
      ..complaint_core::Config::default()
    }
  }
}

fn try_load<T: FromStr>(
  var: &impl Fn(&str) -> Option<String>,
  key: &str,
  default: &str,
) -> Result<T, ConfigError>
where
  T::Err: Display,
{
  let value = var(key).unwrap_or_else(|| {
    info!("{key} not set, using default: {default}");
    default.to_string()
  });

  value.parse().map_err(|e: T::Err| ConfigError {
    key: key.to_string(),
    value: value.clone(),
    reason: e.to_string(),
  })
}
