//! Rate table
//!
//! Fixed lookup data for the drone rating model: the hull base rate, the
//! weight-band multipliers, the TPL base rate, the increased limit factors
//! keyed by exact (limit, excess) pairs, and the flat premiums charged for
//! inactive assets.
//!
//! Custom tables go through [`RateTableBuilder::build`], which checks the
//! table is complete for every [`WeightBand`]. Lookups never fall back to a
//! default: a miss is a [`RatingError::InvalidInput`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use core_kernel::{Money, Rate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{RatingError, RatingResult};

/// Weight bands a drone can be declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeightBand {
    /// 0 - 5kg
    #[serde(rename = "0 - 5kg")]
    UpTo5Kg,
    /// 5 - 10kg
    #[serde(rename = "5 - 10kg")]
    From5To10Kg,
    /// 10 - 20kg
    #[serde(rename = "10 - 20kg")]
    From10To20Kg,
}

impl WeightBand {
    /// Every band, lightest first
    pub const ALL: [WeightBand; 3] = [
        WeightBand::UpTo5Kg,
        WeightBand::From5To10Kg,
        WeightBand::From10To20Kg,
    ];

    /// Returns the label used on pricing documents
    pub fn label(&self) -> &'static str {
        match self {
            WeightBand::UpTo5Kg => "0 - 5kg",
            WeightBand::From5To10Kg => "5 - 10kg",
            WeightBand::From10To20Kg => "10 - 20kg",
        }
    }
}

impl fmt::Display for WeightBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for WeightBand {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeightBand::ALL
            .into_iter()
            .find(|band| band.label() == s)
            .ok_or_else(|| RatingError::invalid_input("weight", s, "unknown weight band"))
    }
}

/// Key into the increased limit factor table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LayerKey {
    /// Liability limit
    pub limit: Decimal,
    /// Excess (deductible) below the layer
    pub excess: Decimal,
}

impl LayerKey {
    pub fn new(limit: Decimal, excess: Decimal) -> Self {
        Self { limit, excess }
    }
}

impl fmt::Display for LayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} xs {}", self.limit.normalize(), self.excess.normalize())
    }
}

/// Immutable rate table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable {
    hull_base_rate: Rate,
    weight_adjustments: BTreeMap<WeightBand, Rate>,
    tpl_base_rate: Rate,
    increased_limit_factors: BTreeMap<LayerKey, Rate>,
    inactive_drone_premium: Money,
    inactive_camera_premium: Money,
}

impl RateTable {
    /// The standard UAV rate table
    pub fn standard() -> Self {
        Self {
            hull_base_rate: Rate::new(dec!(0.06)),
            weight_adjustments: BTreeMap::from([
                (WeightBand::UpTo5Kg, Rate::new(dec!(1.00))),
                (WeightBand::From5To10Kg, Rate::new(dec!(1.20))),
                (WeightBand::From10To20Kg, Rate::new(dec!(1.60))),
            ]),
            tpl_base_rate: Rate::new(dec!(0.02)),
            increased_limit_factors: BTreeMap::from([
                (LayerKey::new(dec!(1000000), dec!(0)), Rate::new(dec!(1.00))),
                (LayerKey::new(dec!(4000000), dec!(1000000)), Rate::new(dec!(0.53))),
                (LayerKey::new(dec!(5000000), dec!(5000000)), Rate::new(dec!(0.31))),
            ]),
            inactive_drone_premium: Money::from_units(150),
            inactive_camera_premium: Money::from_units(50),
        }
    }

    /// Starts building a custom table
    pub fn builder() -> RateTableBuilder {
        RateTableBuilder::default()
    }

    pub fn hull_base_rate(&self) -> Rate {
        self.hull_base_rate
    }

    pub fn tpl_base_rate(&self) -> Rate {
        self.tpl_base_rate
    }

    /// Flat hull premium for a drone outside the active set
    pub fn inactive_drone_premium(&self) -> Money {
        self.inactive_drone_premium
    }

    /// Flat hull premium for a camera outside the active set
    pub fn inactive_camera_premium(&self) -> Money {
        self.inactive_camera_premium
    }

    /// Looks up the multiplier for a weight band
    pub fn weight_adjustment(&self, band: WeightBand) -> RatingResult<Rate> {
        self.weight_adjustments.get(&band).copied().ok_or_else(|| {
            RatingError::invalid_input("weight", band, "no multiplier for weight band")
        })
    }

    /// Looks up the increased limit factor for an exact (limit, excess) pair
    pub fn increased_limit_factor(&self, key: LayerKey) -> RatingResult<Rate> {
        self.increased_limit_factors.get(&key).copied().ok_or_else(|| {
            RatingError::invalid_input(
                "tpl_limit/tpl_excess",
                key,
                "no increased limit factor for this layer",
            )
        })
    }

    /// The layers this table can price
    pub fn layers(&self) -> impl Iterator<Item = &LayerKey> {
        self.increased_limit_factors.keys()
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Builder for rate tables with load-time validation
#[derive(Debug, Clone, Default)]
pub struct RateTableBuilder {
    hull_base_rate: Option<Decimal>,
    weight_adjustments: BTreeMap<WeightBand, Decimal>,
    tpl_base_rate: Option<Decimal>,
    increased_limit_factors: BTreeMap<LayerKey, Decimal>,
    inactive_drone_premium: Option<Decimal>,
    inactive_camera_premium: Option<Decimal>,
}

impl RateTableBuilder {
    pub fn hull_base_rate(mut self, rate: Decimal) -> Self {
        self.hull_base_rate = Some(rate);
        self
    }

    pub fn weight_adjustment(mut self, band: WeightBand, multiplier: Decimal) -> Self {
        self.weight_adjustments.insert(band, multiplier);
        self
    }

    pub fn tpl_base_rate(mut self, rate: Decimal) -> Self {
        self.tpl_base_rate = Some(rate);
        self
    }

    pub fn increased_limit_factor(
        mut self,
        limit: Decimal,
        excess: Decimal,
        factor: Decimal,
    ) -> Self {
        self.increased_limit_factors.insert(LayerKey::new(limit, excess), factor);
        self
    }

    pub fn inactive_drone_premium(mut self, premium: Decimal) -> Self {
        self.inactive_drone_premium = Some(premium);
        self
    }

    pub fn inactive_camera_premium(mut self, premium: Decimal) -> Self {
        self.inactive_camera_premium = Some(premium);
        self
    }

    /// Validates and builds the table
    ///
    /// # Errors
    ///
    /// Returns `Configuration` when a required entry is missing, a weight
    /// band has no multiplier, the ILF table is empty, a rate is not
    /// strictly positive, or a flat premium is negative.
    pub fn build(self) -> RatingResult<RateTable> {
        let hull_base_rate = positive_rate("hull base rate", self.hull_base_rate)?;
        let tpl_base_rate = positive_rate("TPL base rate", self.tpl_base_rate)?;

        let mut weight_adjustments = BTreeMap::new();
        for band in WeightBand::ALL {
            let multiplier = self.weight_adjustments.get(&band).copied();
            let multiplier = positive_rate(&format!("weight adjustment for {band}"), multiplier)?;
            weight_adjustments.insert(band, multiplier);
        }

        if self.increased_limit_factors.is_empty() {
            return Err(RatingError::configuration("increased limit factor table is empty"));
        }
        let mut increased_limit_factors = BTreeMap::new();
        for (key, factor) in self.increased_limit_factors {
            if key.limit < Decimal::ZERO || key.excess < Decimal::ZERO {
                return Err(RatingError::configuration(format!(
                    "layer {key} has a negative limit or excess"
                )));
            }
            let factor = positive_rate(&format!("increased limit factor for {key}"), Some(factor))?;
            increased_limit_factors.insert(key, factor);
        }

        Ok(RateTable {
            hull_base_rate,
            weight_adjustments,
            tpl_base_rate,
            increased_limit_factors,
            inactive_drone_premium: flat_premium(
                "inactive drone premium",
                self.inactive_drone_premium,
            )?,
            inactive_camera_premium: flat_premium(
                "inactive camera premium",
                self.inactive_camera_premium,
            )?,
        })
    }
}

fn positive_rate(name: &str, value: Option<Decimal>) -> RatingResult<Rate> {
    match value {
        None => Err(RatingError::configuration(format!("missing {name}"))),
        Some(v) if v <= Decimal::ZERO => Err(RatingError::configuration(format!(
            "{name} must be positive, got {v}"
        ))),
        Some(v) => Ok(Rate::new(v)),
    }
}

fn flat_premium(name: &str, value: Option<Decimal>) -> RatingResult<Money> {
    match value {
        None => Err(RatingError::configuration(format!("missing {name}"))),
        Some(v) if v < Decimal::ZERO => Err(RatingError::configuration(format!(
            "{name} must not be negative, got {v}"
        ))),
        Some(v) => Ok(Money::new(v)),
    }
}
