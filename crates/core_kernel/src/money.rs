//! Money types with precise decimal arithmetic
//!
//! This module provides a type-safe representation of monetary values
//! using rust_decimal for precise calculations without floating-point errors.
//! Every `Money` value is held at exactly two decimal places, rounded half-up
//! (ties away from zero), which is the rounding applied wherever a premium
//! is stored.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;
use thiserror::Error;

/// Number of fractional digits carried by every monetary amount
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Brokerage must be at least 0 and below 1, got {0}")]
    InvalidBrokerage(Decimal),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Overflow during calculation")]
    Overflow,
}

/// Rounds a decimal to two places, half-up
///
/// This is the canonical rounding for every premium figure. The result
/// always carries a scale of exactly two.
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DECIMAL_PLACES);
    rounded
}

/// A monetary amount rounded to two decimal places
///
/// Arithmetic that produces a new `Money` rounds again, so sums and
/// products operate on the stored (already rounded) figures. The `checked_*`
/// methods report `Overflow` instead of panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Decimal", into = "Decimal")]
pub struct Money {
    amount: Decimal,
}

impl Money {
    /// Creates a new Money value, rounding half-up to two places
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount: round_money(amount),
        }
    }

    /// Creates Money from a whole number of currency units
    pub fn from_units(units: i64) -> Self {
        Self::new(Decimal::from(units))
    }

    /// Parses a decimal string such as `"100.455"`
    pub fn parse(value: &str) -> Result<Self, MoneyError> {
        Decimal::from_str(value.trim())
            .map(Self::new)
            .map_err(|e| MoneyError::InvalidAmount(format!("{value:?}: {e}")))
    }

    /// Creates Money from a float via its shortest decimal representation
    ///
    /// `100.455_f64` is read as the decimal `100.455` and therefore rounds
    /// to `100.46`, not to the binary approximation below the midpoint.
    pub fn from_f64(value: f64) -> Result<Self, MoneyError> {
        if !value.is_finite() {
            return Err(MoneyError::InvalidAmount(value.to_string()));
        }
        Self::parse(&value.to_string())
    }

    /// Creates a zero amount
    pub fn zero() -> Self {
        Self::new(dec!(0))
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Checked addition
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.amount
            .checked_add(other.amount)
            .map(Self::new)
            .ok_or(MoneyError::Overflow)
    }

    /// Sums amounts, failing on overflow
    pub fn checked_sum<'a, I>(amounts: I) -> Result<Money, MoneyError>
    where
        I: IntoIterator<Item = &'a Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(m))
    }

    /// Multiplies by an exact factor, rounding the product
    pub fn multiply(&self, factor: Decimal) -> Result<Self, MoneyError> {
        self.amount
            .checked_mul(factor)
            .map(Self::new)
            .ok_or(MoneyError::Overflow)
    }

    /// Divides by a scalar
    pub fn divide(&self, divisor: Decimal) -> Result<Self, MoneyError> {
        if divisor.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        self.amount
            .checked_div(divisor)
            .map(Self::new)
            .ok_or(MoneyError::Overflow)
    }

    /// Converts a net amount to gross: `net / (1 - brokerage)`
    ///
    /// # Errors
    ///
    /// Returns `InvalidBrokerage` unless `0 <= brokerage < 1`.
    pub fn gross_up(&self, brokerage: Decimal) -> Result<Self, MoneyError> {
        if brokerage < Decimal::ZERO || brokerage >= Decimal::ONE {
            return Err(MoneyError::InvalidBrokerage(brokerage));
        }
        self.divide(Decimal::ONE - brokerage)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self::new(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.amount
    }
}

impl From<i64> for Money {
    fn from(units: i64) -> Self {
        Self::from_units(units)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.amount)
    }
}

/// Panics on overflow, like `Decimal` addition; see [`Money::checked_add`]
impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.amount + other.amount)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// An exact rating factor (base rate, multiplier, ILF)
///
/// Rates are never rounded; only the premium they produce is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate {
    /// The rate as a decimal (e.g., 0.06 for 6%)
    value: Decimal,
}

impl Rate {
    /// Creates a rate from a decimal value (e.g., 0.06 for 6%)
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// A zero rate
    pub fn zero() -> Self {
        Self::new(Decimal::ZERO)
    }

    /// Returns the rate as a decimal
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Returns true if the rate is zero
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Exact product of two rates
    pub fn checked_mul(&self, other: Rate) -> Result<Rate, MoneyError> {
        self.value
            .checked_mul(other.value)
            .map(Rate::new)
            .ok_or(MoneyError::Overflow)
    }

    /// Applies this rate to an exact amount, yielding a rounded premium
    pub fn apply(&self, amount: Decimal) -> Result<Money, MoneyError> {
        amount
            .checked_mul(self.value)
            .map(Money::new)
            .ok_or(MoneyError::Overflow)
    }

    /// Applies this rate to an already rounded premium
    pub fn apply_to_money(&self, money: Money) -> Result<Money, MoneyError> {
        money.multiply(self.value)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value.normalize())
    }
}
