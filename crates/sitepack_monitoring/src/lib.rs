//! Log output of the sitepack binary.
//!
//! Monitoring is set up once per process, later calls are ignored.
use std::sync::Mutex;

pub use from_env::FromEnvError;
pub use tracer::TracerMode;

use tracer::Tracer;

mod from_env;
mod tracer;

static ACTIVE_TRACER: Mutex<Option<Tracer>> = Mutex::new(None);

#[derive(Debug, Default)]
pub struct MonitoringOptions {
  pub tracing_options: Vec<TracerMode>,
}

impl MonitoringOptions {
  pub fn from_env() -> Result<Self, FromEnvError> {
    Ok(Self {
      tracing_options: TracerMode::from_env()?,
    })
  }
}

pub fn initialize_monitoring(options: MonitoringOptions) -> anyhow::Result<()> {
  let mut active = ACTIVE_TRACER
    .lock()
    .map_err(|_| anyhow::anyhow!("Monitoring state is poisoned"))?;

  if active.is_some() {
    tracing::warn!("Monitoring is already initialized, ignoring");
    return Ok(());
  }

  *active = Some(Tracer::new(&options.tracing_options)?);
  Ok(())
}

/// Flushes pending log lines
pub fn close_monitoring() {
  if let Ok(mut active) = ACTIVE_TRACER.lock() {
    active.take();
  }
}
