//! This module configures `tracing_subscriber` to either write to a log file or standard output.
//!
//! Stdout logging is the default for the CLI.
use anyhow::anyhow;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

use crate::from_env::optional_var;
use crate::from_env::FromEnvError;

const TRACING_MODE_VAR: &str = "SITEPACK_TRACING_MODE";

/// Where log lines are written, selected with `SITEPACK_TRACING_MODE=stdout,file`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TracerMode {
  /// Output the Tracer logs to Stdout
  Stdout,
  /// Output the Tracer logs to rolling files in the temp directory
  File,
}

impl TracerMode {
  pub fn from_env() -> Result<Vec<Self>, FromEnvError> {
    Self::parse(optional_var(TRACING_MODE_VAR).as_deref())
  }

  fn parse(value: Option<&str>) -> Result<Vec<Self>, FromEnvError> {
    let Some(value) = value else {
      return Ok(vec![]);
    };

    let mut tracer_modes = vec![];
    for mode in value.split(',').map(|s| s.trim()) {
      let mode = match mode {
        "stdout" => Self::Stdout,
        "file" => Self::File,
        value => {
          return Err(FromEnvError::InvalidKey(
            String::from(TRACING_MODE_VAR),
            anyhow!("Invalid value: {}", value),
          ))
        }
      };

      if !tracer_modes.contains(&mode) {
        tracer_modes.push(mode);
      }
    }

    Ok(tracer_modes)
  }
}

fn env_filter() -> EnvFilter {
  EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Keeps the non-blocking writers alive, dropping it flushes them
pub struct Tracer {
  _worker_guards: Vec<WorkerGuard>,
}

impl Tracer {
  pub fn new(options: &[TracerMode]) -> anyhow::Result<Self> {
    let mut worker_guards = vec![];

    let file_layer = if options.contains(&TracerMode::File) {
      let directory = std::env::temp_dir().join("sitepack_trace");
      let file_appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::HOURLY)
        .max_log_files(4)
        .filename_prefix("sitepack-tracing")
        .build(&directory)
        .map_err(|err| anyhow!(err))?;
      let (non_blocking, worker_guard) = tracing_appender::non_blocking(file_appender);
      worker_guards.push(worker_guard);

      Some(
        tracing_subscriber::fmt::layer()
          .with_writer(non_blocking)
          .with_span_events(FmtSpan::CLOSE)
          .with_filter(env_filter()),
      )
    } else {
      None
    };

    let stdout_layer = if options.contains(&TracerMode::Stdout) {
      let (non_blocking, worker_guard) = tracing_appender::non_blocking(std::io::stdout());
      worker_guards.push(worker_guard);

      Some(
        tracing_subscriber::fmt::layer()
          .with_writer(non_blocking)
          .with_filter(env_filter()),
      )
    } else {
      None
    };

    let subscriber = Registry::default().with(file_layer).with(stdout_layer);

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(Self {
      _worker_guards: worker_guards,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unset_mode_disables_tracing() {
    assert_eq!(TracerMode::parse(None).unwrap(), vec![]);
  }

  #[test]
  fn parses_and_deduplicates_modes() {
    assert_eq!(
      TracerMode::parse(Some("stdout, file,stdout")).unwrap(),
      vec![TracerMode::Stdout, TracerMode::File]
    );
  }

  #[test]
  fn rejects_unknown_modes() {
    let error = TracerMode::parse(Some("chrome")).unwrap_err();
    assert_eq!(
      error.to_string(),
      "Invalid value for SITEPACK_TRACING_MODE: Invalid value: chrome"
    );
  }
}
