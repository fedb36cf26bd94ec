//! Command-Line Runner
//!
//! Reads a pricing document, rates it with the standard rate table and
//! writes the rated document as JSON.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_cli::{config::CliConfig, run};
//!
//! let config = CliConfig::from_env()?;
//! println!("{}", run(&config)?);
//! ```

pub mod config;
pub mod error;
pub mod runner;

pub use config::CliConfig;
pub use error::CliError;
pub use runner::{load_input, rate_json, run, DEMO_DOCUMENT};
