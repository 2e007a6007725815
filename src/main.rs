//! xcassetgen CLI entrypoint

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use xcassetgen::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve()?;

    // RUST_LOG wins; otherwise --verbose selects debug output
    let default_level = if config.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    cli::run(&config)
}
