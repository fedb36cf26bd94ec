//! CLI configuration

use std::path::PathBuf;

use domain_rating::RatingOptions;
use serde::Deserialize;

/// Runner configuration, read from `RATING_*` environment variables
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Pricing document to rate; the bundled demo document when unset
    pub input: Option<PathBuf>,
    /// Apply the inactive drone rule
    pub apply_drone_extension: bool,
    /// Apply the inactive camera rule
    pub apply_camera_extension: bool,
    /// Pretty-print the output document
    pub pretty: bool,
    /// Log level
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            input: None,
            apply_drone_extension: false,
            apply_camera_extension: false,
            pretty: true,
            log_level: "info".to_string(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_source(config::Environment::with_prefix("RATING").try_parsing(true))
    }

    /// Loads configuration from any `config` source
    pub fn from_source<S>(source: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()
    }

    /// Overrides the input path, typically from a positional argument
    pub fn with_input(mut self, input: Option<PathBuf>) -> Self {
        if input.is_some() {
            self.input = input;
        }
        self
    }

    /// Extension flags for the rating engine
    pub fn rating_options(&self) -> RatingOptions {
        RatingOptions {
            apply_drone_extension: self.apply_drone_extension,
            apply_camera_extension: self.apply_camera_extension,
        }
    }
}
