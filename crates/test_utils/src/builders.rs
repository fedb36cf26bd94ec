//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use domain_rating::{Camera, Drone, PricingDocument, WeightBand};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Builder for constructing test drones
pub struct TestDroneBuilder {
    serial_number: String,
    value: Decimal,
    weight: String,
    has_detachable_camera: bool,
    tpl_limit: Decimal,
    tpl_excess: Decimal,
}

impl TestDroneBuilder {
    /// Creates a 10,000 value, 0 - 5kg drone with a camera and the 1m xs 0 layer
    pub fn new(serial_number: impl Into<String>) -> Self {
        Self {
            serial_number: serial_number.into(),
            value: dec!(10000),
            weight: WeightBand::UpTo5Kg.label().to_string(),
            has_detachable_camera: true,
            tpl_limit: dec!(1000000),
            tpl_excess: dec!(0),
        }
    }

    /// Sets the insured value
    pub fn with_value(mut self, value: Decimal) -> Self {
        self.value = value;
        self
    }

    /// Sets the weight band
    pub fn with_weight(mut self, band: WeightBand) -> Self {
        self.weight = band.label().to_string();
        self
    }

    /// Sets a raw weight label, which may be unknown to the rate table
    pub fn with_weight_label(mut self, label: impl Into<String>) -> Self {
        self.weight = label.into();
        self
    }

    /// Sets whether the drone carries a detachable camera
    pub fn with_camera(mut self, has_camera: bool) -> Self {
        self.has_detachable_camera = has_camera;
        self
    }

    /// Sets the TPL layer
    pub fn with_layer(mut self, limit: Decimal, excess: Decimal) -> Self {
        self.tpl_limit = limit;
        self.tpl_excess = excess;
        self
    }

    /// Builds the drone
    pub fn build(self) -> Drone {
        let mut drone = Drone::new(
            self.serial_number,
            self.value,
            WeightBand::UpTo5Kg,
            self.has_detachable_camera,
            self.tpl_limit,
            self.tpl_excess,
        );
        drone.weight = self.weight;
        drone
    }
}

/// Builder for constructing test pricing documents
pub struct TestDocumentBuilder {
    brokerage: Decimal,
    max_drones_in_air: i64,
    drones: Vec<Drone>,
    cameras: Vec<Camera>,
}

impl Default for TestDocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDocumentBuilder {
    /// Creates an empty document with 30% brokerage and two drones in the air
    pub fn new() -> Self {
        Self {
            brokerage: dec!(0.3),
            max_drones_in_air: 2,
            drones: Vec::new(),
            cameras: Vec::new(),
        }
    }

    /// Sets the brokerage fraction
    pub fn with_brokerage(mut self, brokerage: Decimal) -> Self {
        self.brokerage = brokerage;
        self
    }

    /// Sets the number of drones allowed in the air
    pub fn with_max_drones_in_air(mut self, max: i64) -> Self {
        self.max_drones_in_air = max;
        self
    }

    /// Adds a drone
    pub fn with_drone(mut self, drone: Drone) -> Self {
        self.drones.push(drone);
        self
    }

    /// Adds several drones
    pub fn with_drones(mut self, drones: impl IntoIterator<Item = Drone>) -> Self {
        self.drones.extend(drones);
        self
    }

    /// Adds a camera
    pub fn with_camera(mut self, serial_number: impl Into<String>, value: Decimal) -> Self {
        self.cameras.push(Camera::new(serial_number, value));
        self
    }

    /// Adds several cameras
    pub fn with_cameras(mut self, cameras: impl IntoIterator<Item = Camera>) -> Self {
        self.cameras.extend(cameras);
        self
    }

    /// Builds the document
    pub fn build(self) -> PricingDocument {
        let mut document = PricingDocument::new(self.brokerage, self.max_drones_in_air);
        document.insured = "Test Insured".to_string();
        document.drones = self.drones;
        document.detachable_cameras = self.cameras;
        document
    }
}
