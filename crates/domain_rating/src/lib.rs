//! Drone Fleet Rating Domain
//!
//! This crate implements the rating engine for a fleet of unmanned aerial
//! vehicles and their detachable cameras. Given a pricing document it
//! produces hull and third-party liability premiums per drone, hull
//! premiums per camera, optional fleet extensions for inactive assets, and
//! net and gross totals.
//!
//! # Pipeline
//!
//! ```text
//! RateTable ─┬─> hull ──┬─> cameras ─┐
//!            └─> tpl ───┘            ├─> fleet extensions ─> totals
//!                                    │
//! PricingDocument ───────────────────┘
//! ```
//!
//! All monetary figures are exact decimals rounded half-up to two places
//! whenever they are stored; later stages work on the rounded figures.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_rating::{PricingDocument, RatingEngine, RatingOptions, RateTable};
//!
//! let document = PricingDocument::from_json(&input)?;
//! let engine = RatingEngine::new(RateTable::standard())
//!     .with_options(RatingOptions::with_extensions());
//! let rated = engine.rate(&document)?;
//! ```

pub mod camera;
pub mod document;
pub mod engine;
pub mod error;
pub mod fleet;
pub mod hull;
pub mod rate_table;
pub mod totals;
pub mod tpl;

pub use camera::{camera_hull_rate, rate_cameras, CameraRating};
pub use document::{Camera, Drone, PremiumSummary, PricingDocument};
pub use engine::{RatingEngine, RatingOptions};
pub use error::{RatingError, RatingResult};
pub use fleet::{
    apply_camera_extension, apply_drone_extension, camera_activity, drone_activity, Activity,
    CameraPremium, DronePremium,
};
pub use hull::{rate_hull, HullRating};
pub use rate_table::{LayerKey, RateTable, RateTableBuilder, WeightBand};
pub use totals::{compute_totals, PremiumTotals, Totals};
pub use tpl::{rate_tpl, TplRating};
