//! Core Kernel - Foundational types for the drone rating system
//!
//! This crate provides the building blocks shared by the rating engine
//! and its runners:
//! - Money with two-place, half-up decimal rounding
//! - Exact rating factors (`Rate`)

pub mod money;

pub use money::{round_money, Money, MoneyError, Rate, MONEY_DECIMAL_PLACES};
