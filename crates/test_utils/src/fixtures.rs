//! Pre-built Test Fixtures
//!
//! The Drones R Us document used throughout the suite, read from the same
//! demo file the command-line runner ships with, and the premiums it is
//! expected to produce.

use domain_rating::{Camera, Drone, PricingDocument, WeightBand};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Raw JSON of the demo document
pub const DRONES_R_US_JSON: &str = include_str!("../../../demos/drones_r_us.json");

/// Fixture for the Drones R Us scenario
pub struct DronesRUs;

impl DronesRUs {
    /// The unrated demo document (brokerage 0.3, two drones in the air)
    pub fn document() -> PricingDocument {
        PricingDocument::from_json(DRONES_R_US_JSON).expect("demo document is valid JSON")
    }

    /// The demo drones in document order
    pub fn drones() -> Vec<Drone> {
        vec![
            Drone::new(
                "AAA-111",
                dec!(10000),
                WeightBand::UpTo5Kg,
                true,
                dec!(1000000),
                dec!(0),
            ),
            Drone::new(
                "BBB-222",
                dec!(12000),
                WeightBand::From10To20Kg,
                false,
                dec!(4000000),
                dec!(1000000),
            ),
            Drone::new(
                "AAA-123",
                dec!(15000),
                WeightBand::From5To10Kg,
                true,
                dec!(5000000),
                dec!(5000000),
            ),
        ]
    }

    /// The demo cameras in document order
    pub fn cameras() -> Vec<Camera> {
        vec![
            Camera::new("ZZZ-999", dec!(5000)),
            Camera::new("YYY-888", dec!(2500)),
            Camera::new("XXX-777", dec!(1500)),
            Camera::new("WWW-666", dec!(2000)),
        ]
    }
}

/// Expected figures for the demo document with no extensions
pub struct ExpectedPremiums;

impl ExpectedPremiums {
    /// (serial, weight adjustment, final rate, hull premium)
    pub fn hull() -> [(&'static str, Decimal, Decimal, Decimal); 3] {
        [
            ("AAA-111", dec!(1.00), dec!(0.0600), dec!(600.00)),
            ("BBB-222", dec!(1.60), dec!(0.0960), dec!(1152.00)),
            ("AAA-123", dec!(1.20), dec!(0.0720), dec!(1080.00)),
        ]
    }

    /// (serial, camera hull premium)
    pub fn cameras() -> [(&'static str, Decimal); 4] {
        [
            ("ZZZ-999", dec!(360.00)),
            ("YYY-888", dec!(180.00)),
            ("XXX-777", dec!(108.00)),
            ("WWW-666", dec!(144.00)),
        ]
    }

    /// Net (drones hull, drones tpl, cameras hull, total)
    pub fn net() -> [Decimal; 4] {
        [dec!(2832.00), dec!(420.20), dec!(792.00), dec!(4044.20)]
    }

    /// Gross (drones hull, drones tpl, cameras hull, total)
    pub fn gross() -> [Decimal; 4] {
        [dec!(4045.71), dec!(600.29), dec!(1131.43), dec!(5777.43)]
    }
}
