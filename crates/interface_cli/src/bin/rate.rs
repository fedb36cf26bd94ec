//! Drone Rating - Command-Line Binary
//!
//! Rates a pricing document and prints the rated document to stdout. Logs
//! go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Rate the bundled Drones R Us document
//! cargo run --bin drone-rating
//!
//! # Rate a file with both fleet extensions
//! RATING_APPLY_DRONE_EXTENSION=true RATING_APPLY_CAMERA_EXTENSION=true \
//!     cargo run --bin drone-rating -- fleet.json
//! ```
//!
//! # Environment Variables
//!
//! * `RATING_INPUT` - Pricing document path (a positional argument wins)
//! * `RATING_APPLY_DRONE_EXTENSION` - Apply the inactive drone rule (default: false)
//! * `RATING_APPLY_CAMERA_EXTENSION` - Apply the inactive camera rule (default: false)
//! * `RATING_PRETTY` - Pretty-print the output (default: true)
//! * `RATING_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use std::path::PathBuf;

use anyhow::Context;
use interface_cli::{config::CliConfig, run};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = CliConfig::from_env()
        .context("invalid RATING_* configuration")?
        .with_input(std::env::args_os().nth(1).map(PathBuf::from));

    init_tracing(&config.log_level);

    tracing::info!(
        input = ?config.input,
        drone_extension = config.apply_drone_extension,
        camera_extension = config.apply_camera_extension,
        "Starting drone rating"
    );

    let output = run(&config)?;
    println!("{output}");

    Ok(())
}

/// Initializes the tracing subscriber, writing to stderr.
///
/// # Arguments
///
/// * `log_level` - Fallback filter when `RUST_LOG` is not set
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
