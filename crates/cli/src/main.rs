//! cloudphoto - photo albums on S3-compatible object storage
//!
//! Uploads photos into albums and publishes a static gallery website
//! from the same bucket.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cloudphoto::commands::{self, Cli};

// One command per run; storage calls are awaited one after another.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };

    // Initialize tracing subscriber for logging; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
