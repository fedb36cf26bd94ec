//! Pricing document
//!
//! The document is the unit of work for the engine: metadata about the
//! insured and broker, the brokerage fraction, the fleet activity cap, the
//! drones and detachable cameras, and the net and gross premium summaries.
//!
//! Computed fields are `Option`s and serialize as `null` until the engine
//! fills them in. Field names are part of the output contract.

use std::collections::HashSet;

use core_kernel::{Money, Rate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{RatingError, RatingResult};
use crate::rate_table::{LayerKey, WeightBand};

/// A drone in the fleet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drone {
    /// Serial number, unique within a document
    pub serial_number: String,
    /// Insured value
    pub value: Decimal,
    /// Declared weight band label, e.g. "0 - 5kg"
    pub weight: String,
    /// Whether the drone carries a detachable camera
    pub has_detachable_camera: bool,
    /// Third-party liability limit
    pub tpl_limit: Decimal,
    /// Third-party liability excess
    pub tpl_excess: Decimal,

    #[serde(default)]
    pub hull_base_rate: Option<Rate>,
    #[serde(default)]
    pub hull_weight_adjustment: Option<Rate>,
    #[serde(default)]
    pub hull_final_rate: Option<Rate>,
    /// Net hull premium
    #[serde(default)]
    pub hull_premium: Option<Money>,

    #[serde(default)]
    pub tpl_base_rate: Option<Rate>,
    #[serde(default)]
    pub tpl_base_layer_premium: Option<Money>,
    #[serde(default)]
    pub tpl_ilf: Option<Rate>,
    /// Net TPL premium for the layer
    #[serde(default)]
    pub tpl_layer_premium: Option<Money>,
}

impl Drone {
    /// Creates an unrated drone
    pub fn new(
        serial_number: impl Into<String>,
        value: Decimal,
        weight: WeightBand,
        has_detachable_camera: bool,
        tpl_limit: Decimal,
        tpl_excess: Decimal,
    ) -> Self {
        Self {
            serial_number: serial_number.into(),
            value,
            weight: weight.label().to_string(),
            has_detachable_camera,
            tpl_limit,
            tpl_excess,
            hull_base_rate: None,
            hull_weight_adjustment: None,
            hull_final_rate: None,
            hull_premium: None,
            tpl_base_rate: None,
            tpl_base_layer_premium: None,
            tpl_ilf: None,
            tpl_layer_premium: None,
        }
    }

    /// Parses the declared weight band
    pub fn weight_band(&self) -> RatingResult<WeightBand> {
        self.weight.parse().map_err(|_| {
            RatingError::invalid_input(
                format!("drones[{}].weight", self.serial_number),
                &self.weight,
                "unknown weight band",
            )
        })
    }

    /// The (limit, excess) pair used for the ILF lookup
    pub fn layer_key(&self) -> LayerKey {
        LayerKey::new(self.tpl_limit, self.tpl_excess)
    }

    /// Clears every computed field
    pub fn reset(&mut self) {
        self.hull_base_rate = None;
        self.hull_weight_adjustment = None;
        self.hull_final_rate = None;
        self.hull_premium = None;
        self.tpl_base_rate = None;
        self.tpl_base_layer_premium = None;
        self.tpl_ilf = None;
        self.tpl_layer_premium = None;
    }

    fn validate(&self) -> RatingResult<()> {
        let amounts = [
            ("value", self.value),
            ("tpl_limit", self.tpl_limit),
            ("tpl_excess", self.tpl_excess),
        ];
        for (name, amount) in amounts {
            if amount < Decimal::ZERO {
                return Err(RatingError::invalid_input(
                    format!("drones[{}].{name}", self.serial_number),
                    amount,
                    "must not be negative",
                ));
            }
        }
        Ok(())
    }
}

/// A detachable camera
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    pub serial_number: String,
    /// Insured value
    pub value: Decimal,
    #[serde(default)]
    pub hull_rate: Option<Rate>,
    /// Net hull premium
    #[serde(default)]
    pub hull_premium: Option<Money>,
}

impl Camera {
    /// Creates an unrated camera
    pub fn new(serial_number: impl Into<String>, value: Decimal) -> Self {
        Self {
            serial_number: serial_number.into(),
            value,
            hull_rate: None,
            hull_premium: None,
        }
    }

    pub fn reset(&mut self) {
        self.hull_rate = None;
        self.hull_premium = None;
    }
}

/// Premium totals by category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumSummary {
    pub drones_hull: Option<Money>,
    pub drones_tpl: Option<Money>,
    pub cameras_hull: Option<Money>,
    pub total: Option<Money>,
}

impl PremiumSummary {
    /// Returns true once totals have been computed
    pub fn is_computed(&self) -> bool {
        self.total.is_some()
    }
}

/// The top-level document the engine prices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingDocument {
    #[serde(default)]
    pub insured: String,
    #[serde(default)]
    pub underwriter: String,
    #[serde(default)]
    pub broker: String,
    /// Brokerage as a fraction, `0 <= brokerage < 1`
    pub brokerage: Decimal,
    /// How many drones may fly at once; zero or negative means none
    pub max_drones_in_air: i64,
    #[serde(default)]
    pub drones: Vec<Drone>,
    #[serde(default)]
    pub detachable_cameras: Vec<Camera>,
    #[serde(default)]
    pub gross_prem: PremiumSummary,
    #[serde(default)]
    pub net_prem: PremiumSummary,
}

impl PricingDocument {
    /// Creates an empty document
    pub fn new(brokerage: Decimal, max_drones_in_air: i64) -> Self {
        Self {
            insured: String::new(),
            underwriter: String::new(),
            broker: String::new(),
            brokerage,
            max_drones_in_air,
            drones: Vec::new(),
            detachable_cameras: Vec::new(),
            gross_prem: PremiumSummary::default(),
            net_prem: PremiumSummary::default(),
        }
    }

    /// Parses a document from JSON
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the JSON is malformed or a required
    /// field is missing.
    pub fn from_json(json: &str) -> RatingResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| RatingError::invalid_input("document", "<json>", e.to_string()))
    }

    /// Serializes the document to pretty-printed JSON
    pub fn to_json_pretty(&self) -> RatingResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RatingError::invalid_input("document", "<json>", e.to_string()))
    }

    /// Clears every computed field, including the summaries
    pub fn reset(&mut self) {
        self.drones.iter_mut().for_each(Drone::reset);
        self.detachable_cameras.iter_mut().for_each(Camera::reset);
        self.gross_prem = PremiumSummary::default();
        self.net_prem = PremiumSummary::default();
    }

    /// Checks document-level inputs before rating
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a brokerage outside `[0, 1)`, duplicate
    /// serial numbers, or negative values, limits or excesses.
    pub fn validate(&self) -> RatingResult<()> {
        if self.brokerage < Decimal::ZERO || self.brokerage >= Decimal::ONE {
            return Err(RatingError::invalid_input(
                "brokerage",
                self.brokerage,
                "must be at least 0 and below 1",
            ));
        }

        let mut seen = HashSet::new();
        for drone in &self.drones {
            if !seen.insert(drone.serial_number.as_str()) {
                return Err(RatingError::invalid_input(
                    "drones.serial_number",
                    &drone.serial_number,
                    "duplicate serial number",
                ));
            }
            drone.validate()?;
        }

        let mut seen = HashSet::new();
        for camera in &self.detachable_cameras {
            if !seen.insert(camera.serial_number.as_str()) {
                return Err(RatingError::invalid_input(
                    "detachable_cameras.serial_number",
                    &camera.serial_number,
                    "duplicate serial number",
                ));
            }
            if camera.value < Decimal::ZERO {
                return Err(RatingError::invalid_input(
                    format!("detachable_cameras[{}].value", camera.serial_number),
                    camera.value,
                    "must not be negative",
                ));
            }
        }

        Ok(())
    }
}
