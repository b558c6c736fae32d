//! Actor database converter.
//!
//! Run with: `convert ActorNames.xml [actors.toml]`

mod command;

use anyhow::Result;
use clap::Parser;
use command::Convert;

fn main() -> Result<()> {
    // Load .env file if it exists (for ACTOR_DB_OUTPUT and other env vars)
    let _ = dotenvy::dotenv();

    let cli = Convert::parse();
    init_tracing(cli.verbose);

    cli.execute()
}

/// Logs go to stderr so standard output only carries converted text.
fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
