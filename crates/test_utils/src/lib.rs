//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! drone rating test suite.
//!
//! # Modules
//!
//! - `fixtures`: The Drones R Us scenario and its expected figures
//! - `builders`: Builder patterns for drones, cameras and documents
//! - `assertions`: Custom assertion helpers for rated documents
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
