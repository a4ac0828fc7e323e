use std::env;
use std::str::FromStr;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::Level;

use crate::error::ConfigError;

pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_TASKS: u64 = 20;
pub const DEFAULT_MAX_DELAY_MS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
  Text,
  Json,
}

impl FromStr for OutputFormat {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "text" => Ok(OutputFormat::Text),
      "json" => Ok(OutputFormat::Json),
      _ => Err(()),
    }
  }
}

#[derive(Debug, Clone)]
pub struct Config {
  pub workers: usize,
  pub tasks: u64,
  pub max_delay: Duration,
  pub log_level: Level,
  pub output: OutputFormat,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      workers: DEFAULT_WORKERS,
      tasks: DEFAULT_TASKS,
      max_delay: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
      log_level: Level::INFO,
      output: OutputFormat::Text,
    }
  }
}

impl Config {
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|var| env::var(var).ok())
  }

  /// Builds a config from any variable source; unset variables keep their
  /// defaults.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let defaults = Self::default();
    let workers = parse_var(&lookup, "WORKPOOL_WORKERS", defaults.workers)?;
    if workers == 0 {
      return Err(ConfigError::ZeroWorkers);
    }

    let tasks = parse_var(&lookup, "WORKPOOL_TASKS", defaults.tasks)?;
    task_capacity(tasks)?;

    Ok(Self {
      workers,
      tasks,
      max_delay: Duration::from_millis(parse_var(&lookup, "WORKPOOL_MAX_DELAY_MS", DEFAULT_MAX_DELAY_MS)?),
      log_level: parse_var(&lookup, "WORKPOOL_LOG", defaults.log_level)?,
      output: parse_var(&lookup, "WORKPOOL_OUTPUT", defaults.output)?,
    })
  }
}

/// Queue capacity needed to hold `tasks` items, if a queue can be that large.
pub fn task_capacity(tasks: u64) -> Result<usize, ConfigError> {
  usize::try_from(tasks)
    .ok()
    .filter(|&capacity| capacity <= Semaphore::MAX_PERMITS)
    .ok_or(ConfigError::TooManyTasks {
      tasks,
      max: Semaphore::MAX_PERMITS,
    })
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
  F: Fn(&str) -> Option<String>,
  T: FromStr,
{
  match lookup(var) {
    None => Ok(default),
    Some(value) => value
      .trim()
      .parse()
      .map_err(|_| ConfigError::Invalid { var, value }),
  }
}
