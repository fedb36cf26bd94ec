//! Reads a pricing document, rates it and renders the result

use std::fs;
use std::path::Path;

use domain_rating::{PricingDocument, RatingEngine, RateTable};
use tracing::{info, instrument};

use crate::config::CliConfig;
use crate::error::CliError;

/// The Drones R Us demo document
pub const DEMO_DOCUMENT: &str = include_str!("../../../demos/drones_r_us.json");

/// Loads the configured input, or the demo document when none is set
pub fn load_input(config: &CliConfig) -> Result<String, CliError> {
    match &config.input {
        Some(path) => read_document(path),
        None => {
            info!("no input given, rating the demo document");
            Ok(DEMO_DOCUMENT.to_string())
        }
    }
}

fn read_document(path: &Path) -> Result<String, CliError> {
    info!(path = %path.display(), "reading pricing document");
    fs::read_to_string(path).map_err(|e| CliError::read(path, e))
}

/// Rates a JSON pricing document and returns the rated document as JSON
#[instrument(skip(input, config), fields(bytes = input.len()))]
pub fn rate_json(input: &str, config: &CliConfig) -> Result<String, CliError> {
    let document = PricingDocument::from_json(input)?;
    let engine = RatingEngine::new(RateTable::standard()).with_options(config.rating_options());
    let rated = engine.rate(&document)?;

    let output = if config.pretty {
        serde_json::to_string_pretty(&rated)?
    } else {
        serde_json::to_string(&rated)?
    };
    Ok(output)
}

/// Runs the whole pipeline for a configuration
pub fn run(config: &CliConfig) -> Result<String, CliError> {
    let input = load_input(config)?;
    rate_json(&input, config)
}
