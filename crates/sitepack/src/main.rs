use std::path::PathBuf;

use clap::Parser;
use sitepack::Sitepack;
use sitepack::SitepackError;
use sitepack::SitepackOptions;
use sitepack_core::types::BuildMode;
use sitepack_monitoring::MonitoringOptions;
use sitepack_monitoring::TracerMode;
use tracing::error;
use tracing::info;

/// Builds the query-json website
#[derive(Parser)]
#[command(name = "sitepack")]
struct Args {
  /// Config file, relative to the project root
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Project root, defaults to the current directory
  #[arg(short, long, default_value = ".")]
  root: PathBuf,

  /// Output directory, overrides build.outDir
  #[arg(short, long)]
  dist_dir: Option<PathBuf>,

  /// "development" or "production", overrides the config file and NODE_ENV
  #[arg(short, long)]
  mode: Option<String>,
}

fn main() {
  initialize_tracing();

  let args = Args::parse();
  let code = match run(args) {
    Ok(()) => 0,
    Err(e) => {
      error!("Failed to build:\n{}", SitepackError::from(&e));
      1
    }
  };

  sitepack_monitoring::close_monitoring();
  std::process::exit(code);
}

fn run(args: Args) -> anyhow::Result<()> {
  let mode = args.mode.as_deref().map(str::parse::<BuildMode>).transpose()?;

  let sitepack = Sitepack::new(
    None,
    &args.root,
    SitepackOptions {
      config: args.config,
      dist_dir: args.dist_dir,
      mode,
    },
  )?;

  let result = sitepack.build()?;

  info!(
    mode = %result.mode,
    chunks = result.chunks.len(),
    externals = ?result.externals,
    "Wrote {} files to {}",
    result.files.len(),
    result.dist_dir.display()
  );

  Ok(())
}

fn initialize_tracing() {
  if std::env::var("RUST_LOG").is_err() {
    std::env::set_var("RUST_LOG", "info");
  }

  let mut options = MonitoringOptions::from_env().unwrap_or_else(|e| {
    eprintln!("{e}");
    MonitoringOptions::default()
  });
  if options.tracing_options.is_empty() {
    options.tracing_options.push(TracerMode::Stdout);
  }

  if let Err(e) = sitepack_monitoring::initialize_monitoring(options) {
    eprintln!("Failed to initialize tracing: {e}");
  }
}
