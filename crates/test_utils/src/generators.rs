//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random drones, cameras and
//! documents that the standard rate table can price.

use domain_rating::{Camera, Drone, PricingDocument, WeightBand};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Strategy for generating weight bands
pub fn weight_band_strategy() -> impl Strategy<Value = WeightBand> {
    prop_oneof![
        Just(WeightBand::UpTo5Kg),
        Just(WeightBand::From5To10Kg),
        Just(WeightBand::From10To20Kg),
    ]
}

/// Strategy for generating (limit, excess) pairs in the standard table
pub fn layer_strategy() -> impl Strategy<Value = (Decimal, Decimal)> {
    prop_oneof![
        Just((dec!(1000000), dec!(0))),
        Just((dec!(4000000), dec!(1000000))),
        Just((dec!(5000000), dec!(5000000))),
    ]
}

/// Strategy for generating insured values with up to two decimals
pub fn insured_value_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..5_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for generating brokerage fractions in [0, 0.99]
pub fn brokerage_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for generating a drone with the given serial number
pub fn drone_strategy(serial_number: String) -> impl Strategy<Value = Drone> {
    (
        insured_value_strategy(),
        weight_band_strategy(),
        any::<bool>(),
        layer_strategy(),
    )
        .prop_map(move |(value, band, camera, (limit, excess))| {
            Drone::new(serial_number.clone(), value, band, camera, limit, excess)
        })
}

/// Strategy for generating a fleet of up to `max` drones with unique serials
pub fn fleet_strategy(max: usize) -> impl Strategy<Value = Vec<Drone>> {
    (0..=max).prop_flat_map(|n| {
        (0..n)
            .map(|i| drone_strategy(format!("D-{i:03}")))
            .collect::<Vec<_>>()
    })
}

/// Strategy for generating up to `max` cameras with unique serials
pub fn cameras_strategy(max: usize) -> impl Strategy<Value = Vec<Camera>> {
    prop::collection::vec(insured_value_strategy(), 0..=max).prop_map(|values| {
        values
            .into_iter()
            .enumerate()
            .map(|(i, value)| Camera::new(format!("C-{i:03}"), value))
            .collect()
    })
}

/// Strategy for generating complete unrated documents
pub fn document_strategy() -> impl Strategy<Value = PricingDocument> {
    (fleet_strategy(6), cameras_strategy(6), brokerage_strategy(), -1i64..8i64).prop_map(
        |(drones, cameras, brokerage, max_in_air)| {
            let mut document = PricingDocument::new(brokerage, max_in_air);
            document.drones = drones;
            document.detachable_cameras = cameras;
            document
        },
    )
}
