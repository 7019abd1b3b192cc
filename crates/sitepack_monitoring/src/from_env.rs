use thiserror::Error;

#[derive(Debug, Error)]
pub enum FromEnvError {
  #[error("Invalid value for {0}: {1}")]
  InvalidKey(String, #[source] anyhow::Error),
}

/// Reads an environment variable, treating empty values as unset
pub fn optional_var(name: &str) -> Option<String> {
  std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
