//! Rating Engine Tests
//!
//! End-to-end tests that run whole documents through `RatingEngine`:
//! - The Drones R Us scenario with and without fleet extensions
//! - Edge cases: empty fleets, empty camera lists, activity caps
//! - Error propagation for bad documents
//! - Properties that hold for any priceable document
//!
//! # Test Organization
//!
//! - `end_to_end` - expected totals from the rating model
//! - `extensions` - inactive drone and camera rules on full documents
//! - `edge_cases` - zero drones, zero cameras, cap boundaries
//! - `errors` - failures abort the run
//! - `properties` - proptest invariants

use core_kernel::Money;
use domain_rating::{
    Camera, PricingDocument, RatingEngine, RatingError, RatingOptions, RateTable, WeightBand,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use test_utils::{
    assert_gross_consistent, assert_money_eq, assert_net_totals_consistent, assert_summary,
    DronesRUs, ExpectedPremiums, TestDocumentBuilder, TestDroneBuilder,
};

fn engine(options: RatingOptions) -> RatingEngine {
    RatingEngine::new(RateTable::standard()).with_options(options)
}

fn drone_extension_only() -> RatingOptions {
    RatingOptions {
        apply_drone_extension: true,
        apply_camera_extension: false,
    }
}

fn camera_extension_only() -> RatingOptions {
    RatingOptions {
        apply_drone_extension: false,
        apply_camera_extension: true,
    }
}

fn camera_premiums(document: &PricingDocument) -> Vec<Money> {
    document
        .detachable_cameras
        .iter()
        .map(|c| c.hull_premium.expect("camera rated"))
        .collect()
}

// ============================================================================
// END TO END
// ============================================================================

mod end_to_end {
    use super::*;

    /// The expected final totals from the rating model
    #[test]
    fn test_final_totals() {
        let rated = RatingEngine::default().rate(&DronesRUs::document()).unwrap();

        assert_summary(&rated.net_prem, ExpectedPremiums::net(), "net");
        assert_summary(&rated.gross_prem, ExpectedPremiums::gross(), "gross");
    }

    #[test]
    fn test_line_items_are_populated() {
        let rated = RatingEngine::default().rate(&DronesRUs::document()).unwrap();

        for (drone, (serial, _, final_rate, premium)) in
            rated.drones.iter().zip(ExpectedPremiums::hull())
        {
            assert_eq!(drone.serial_number, serial);
            assert_eq!(drone.hull_final_rate.unwrap().as_decimal(), final_rate);
            assert_money_eq(drone.hull_premium, premium, serial);
        }
        for (camera, (serial, premium)) in
            rated.detachable_cameras.iter().zip(ExpectedPremiums::cameras())
        {
            assert_money_eq(camera.hull_premium, premium, serial);
        }
    }

    #[test]
    fn test_totals_are_derived_from_lines() {
        let rated = RatingEngine::default().rate(&DronesRUs::document()).unwrap();
        assert_net_totals_consistent(&rated);
        assert_gross_consistent(&rated);
    }

    /// Output field names are stable
    #[test]
    fn test_output_shape() {
        let rated = RatingEngine::default().rate(&DronesRUs::document()).unwrap();
        let json = serde_json::to_value(&rated).unwrap();

        assert!(json["drones"].is_array());
        assert!(json["detachable_cameras"].is_array());
        for summary in ["net_prem", "gross_prem"] {
            for key in ["drones_hull", "drones_tpl", "cameras_hull", "total"] {
                assert!(!json[summary][key].is_null(), "{summary}.{key}");
            }
        }
        assert_eq!(json["net_prem"]["total"], "4044.20");
        assert_eq!(json["drones"][1]["tpl_layer_premium"], "127.20");
    }

    /// A rated document read back from JSON re-rates to the same figures
    #[test]
    fn test_json_round_trip_rerates_identically() {
        let engine = RatingEngine::default();
        let rated = engine.rate(&DronesRUs::document()).unwrap();
        let json = rated.to_json_pretty().unwrap();

        let reread = PricingDocument::from_json(&json).unwrap();
        assert_eq!(engine.rate(&reread).unwrap(), rated);
    }
}

// ============================================================================
// EXTENSIONS
// ============================================================================

mod extensions {
    use super::*;

    /// With one drone in the air only the most expensive keeps full premium
    #[test]
    fn test_drones_extension() {
        let mut document = DronesRUs::document();
        document.max_drones_in_air = 1;

        let rated = engine(drone_extension_only()).rate(&document).unwrap();

        let mut hull: Vec<_> = rated
            .drones
            .iter()
            .map(|d| d.hull_premium.unwrap().amount())
            .collect();
        hull.sort();
        assert_eq!(hull, vec![dec!(150.00), dec!(150.00), dec!(1152.00)]);
        assert_money_eq(rated.net_prem.drones_hull, dec!(1452.00), "net drones hull");

        // inactive drones carry no TPL
        assert_money_eq(rated.net_prem.drones_tpl, dec!(127.20), "net drones tpl");
        assert_net_totals_consistent(&rated);
    }

    /// Four cameras, three drones, two in the air: two cameras go flat
    #[test]
    fn test_cameras_extension() {
        let rated = engine(camera_extension_only()).rate(&DronesRUs::document()).unwrap();

        let mut premiums: Vec<_> = camera_premiums(&rated).iter().map(Money::amount).collect();
        premiums.sort();
        assert_eq!(premiums, vec![dec!(50.00), dec!(50.00), dec!(180.00), dec!(360.00)]);
        assert_money_eq(rated.net_prem.cameras_hull, dec!(640.00), "net cameras hull");
    }

    #[test]
    fn test_both_extensions() {
        let rated = engine(RatingOptions::with_extensions()).rate(&DronesRUs::document()).unwrap();

        // Two in the air: BBB-222 (1279.20) and AAA-123 (1173.00) stay active
        assert_money_eq(rated.drones[0].hull_premium, dec!(150.00), "AAA-111 hull");
        assert_money_eq(rated.drones[0].tpl_layer_premium, dec!(0.00), "AAA-111 tpl");
        assert_money_eq(rated.drones[2].hull_premium, dec!(1080.00), "AAA-123 hull");

        assert_summary(
            &rated.net_prem,
            [dec!(2382.00), dec!(220.20), dec!(640.00), dec!(3242.20)],
            "net",
        );
        assert_gross_consistent(&rated);
    }

    /// Extensions leave rates and base layer premiums as rated
    #[test]
    fn test_extensions_only_touch_premiums() {
        let mut document = DronesRUs::document();
        document.max_drones_in_air = 0;
        let rated = engine(RatingOptions::with_extensions()).rate(&document).unwrap();

        for drone in &rated.drones {
            assert_money_eq(drone.hull_premium, dec!(150.00), &drone.serial_number);
            assert!(drone.tpl_layer_premium.unwrap().is_zero());
            assert!(drone.tpl_base_layer_premium.unwrap().amount() > dec!(0));
        }
        for camera in &rated.detachable_cameras {
            assert_eq!(camera.hull_rate.unwrap().as_decimal(), dec!(0.072));
        }
    }
}

// ============================================================================
// EDGE CASES
// ============================================================================

mod edge_cases {
    use super::*;

    /// No drones: camera rate is zero and every camera goes flat
    #[test]
    fn test_zero_drones() {
        let mut document = DronesRUs::document();
        document.drones.clear();

        let rated = engine(camera_extension_only()).rate(&document).unwrap();

        let premiums = camera_premiums(&rated);
        assert!(!premiums.is_empty());
        assert!(premiums.iter().all(|p| p.amount() == dec!(50.00)));
        assert_money_eq(rated.net_prem.drones_hull, dec!(0), "net drones hull");
        assert_money_eq(rated.net_prem.drones_tpl, dec!(0), "net drones tpl");
    }

    /// No drones and no extension: cameras are rated at zero
    #[test]
    fn test_zero_drones_without_extension() {
        let mut document = DronesRUs::document();
        document.drones.clear();

        let rated = RatingEngine::default().rate(&document).unwrap();
        assert!(camera_premiums(&rated).iter().all(|p| p.is_zero()));
        assert!(rated
            .detachable_cameras
            .iter()
            .all(|c| c.hull_rate.unwrap().is_zero()));
    }

    #[test]
    fn test_zero_cameras() {
        let mut document = DronesRUs::document();
        document.detachable_cameras.clear();

        let rated = engine(RatingOptions::with_extensions()).rate(&document).unwrap();
        assert_money_eq(rated.net_prem.cameras_hull, dec!(0), "net cameras hull");
    }

    #[test]
    fn test_empty_document() {
        let document = TestDocumentBuilder::new().build();
        let rated = engine(RatingOptions::with_extensions()).rate(&document).unwrap();
        assert_summary(&rated.net_prem, [dec!(0); 4], "net");
        assert_summary(&rated.gross_prem, [dec!(0); 4], "gross");
    }

    /// Cap equal to the fleet size leaves drone premiums unchanged
    #[test]
    fn test_max_drones_in_air_limit() {
        let mut document = DronesRUs::document();
        document.max_drones_in_air = document.drones.len() as i64;

        let rated = engine(drone_extension_only()).rate(&document).unwrap();
        for (drone, (serial, _, _, premium)) in rated.drones.iter().zip(ExpectedPremiums::hull()) {
            assert_money_eq(drone.hull_premium, premium, serial);
        }
    }

    /// Cap of zero makes every drone inactive
    #[test]
    fn test_minimum_drones_in_air_limit() {
        let mut document = DronesRUs::document();
        document.max_drones_in_air = 0;

        let rated = engine(drone_extension_only()).rate(&document).unwrap();
        for drone in &rated.drones {
            assert_money_eq(drone.hull_premium, dec!(150.00), &drone.serial_number);
        }
    }

    /// Three drones all in the air, four cameras: one camera goes flat
    #[test]
    fn test_one_more_camera_than_drones() {
        let mut document = DronesRUs::document();
        document.max_drones_in_air = 3;

        let rated = engine(camera_extension_only()).rate(&document).unwrap();
        let flat = camera_premiums(&rated)
            .iter()
            .filter(|p| p.amount() == dec!(50.00))
            .count();
        assert_eq!(flat, 1);
        // the cheapest camera, XXX-777, is the one
        assert_money_eq(rated.detachable_cameras[2].hull_premium, dec!(50.00), "XXX-777");
    }

    #[test]
    fn test_equal_cameras_and_drones() {
        let mut document = DronesRUs::document();
        document.max_drones_in_air = 3;
        document.detachable_cameras.truncate(document.drones.len());

        let rated = engine(camera_extension_only()).rate(&document).unwrap();
        assert!(camera_premiums(&rated)
            .iter()
            .all(|p| p.amount() != dec!(50.00)));
    }

    /// Ties at the threshold admit more than the cap
    #[test]
    fn test_threshold_ties_admit_extra_drones() {
        let document = TestDocumentBuilder::new()
            .with_max_drones_in_air(1)
            .with_drones(["T-1", "T-2", "T-3"].map(|s| TestDroneBuilder::new(s).build()))
            .build();

        let rated = engine(drone_extension_only()).rate(&document).unwrap();
        for drone in &rated.drones {
            assert_money_eq(drone.hull_premium, dec!(600.00), &drone.serial_number);
        }
    }

    #[test]
    fn test_zero_brokerage_gross_equals_net() {
        let mut document = DronesRUs::document();
        document.brokerage = dec!(0);

        let rated = RatingEngine::default().rate(&document).unwrap();
        assert_eq!(rated.net_prem, rated.gross_prem);
    }
}

// ============================================================================
// ERRORS
// ============================================================================

mod errors {
    use super::*;

    #[test]
    fn test_brokerage_of_one_is_fatal() {
        let document = TestDocumentBuilder::new()
            .with_brokerage(dec!(1))
            .with_drone(TestDroneBuilder::new("AAA-111").build())
            .build();

        let err = RatingEngine::default().rate(&document).unwrap_err();
        assert!(matches!(err, RatingError::InvalidInput { ref field, .. } if field == "brokerage"));
    }

    #[test]
    fn test_unknown_weight_aborts_run() {
        let mut document = DronesRUs::document();
        document.drones[0].weight = "30 - 50kg".to_string();

        let err = RatingEngine::default().rate(&document).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("30 - 50kg"));
    }

    #[test]
    fn test_duplicate_serial_numbers() {
        let document = TestDocumentBuilder::new()
            .with_drone(TestDroneBuilder::new("DUP").build())
            .with_drone(TestDroneBuilder::new("DUP").build())
            .build();

        assert!(RatingEngine::default().rate(&document).is_err());
    }

    #[test]
    fn test_negative_value() {
        let document = TestDocumentBuilder::new()
            .with_drone(TestDroneBuilder::new("NEG").with_value(dec!(-1)).build())
            .build();

        let err = RatingEngine::default().rate(&document).unwrap_err();
        assert!(err.to_string().contains("NEG"));
    }

    fn near_max_value() -> Decimal {
        "70000000000000000000000000000".parse().unwrap()
    }

    /// A gross premium beyond the decimal range fails on brokerage
    #[test]
    fn test_gross_overflow_is_an_error() {
        let document = TestDocumentBuilder::new()
            .with_brokerage(dec!(0.99))
            .with_drone(
                TestDroneBuilder::new("HUGE")
                    .with_value(near_max_value())
                    .with_weight(WeightBand::From10To20Kg)
                    .build(),
            )
            .build();

        let err = RatingEngine::default().rate(&document).unwrap_err();
        assert!(matches!(err, RatingError::InvalidInput { ref field, .. } if field == "brokerage"));
    }

    /// The same fleet rates without error when brokerage leaves room
    #[test]
    fn test_near_max_value_rates_at_zero_brokerage() {
        let document = TestDocumentBuilder::new()
            .with_brokerage(dec!(0))
            .with_drone(TestDroneBuilder::new("HUGE").with_value(near_max_value()).build())
            .build();

        let rated = RatingEngine::default().rate(&document).unwrap();
        assert_eq!(rated.net_prem, rated.gross_prem);
    }

    /// Net totals beyond the decimal range name the category
    #[test]
    fn test_net_overflow_is_an_error() {
        let document = TestDocumentBuilder::new()
            .with_brokerage(dec!(0))
            .with_drone(TestDroneBuilder::new("D-1").build())
            .with_cameras((0..20).map(|i| Camera::new(format!("CAM-{i}"), Decimal::MAX)))
            .build();

        let err = RatingEngine::default().rate(&document).unwrap_err();
        assert!(err.to_string().contains("net_prem.cameras_hull"));
    }
}

// ============================================================================
// PROPERTIES
// ============================================================================

mod properties {
    use super::*;
    use proptest::prelude::*;
    use test_utils::{document_strategy, fleet_strategy};

    proptest! {
        #[test]
        fn totals_always_match_lines(document in document_strategy()) {
            let rated = engine(RatingOptions::with_extensions()).rate(&document).unwrap();
            assert_net_totals_consistent(&rated);
            assert_gross_consistent(&rated);
        }

        #[test]
        fn camera_rate_is_max_eligible_final_rate(document in document_strategy()) {
            let rated = RatingEngine::default().rate(&document).unwrap();
            let expected = rated
                .drones
                .iter()
                .filter(|d| d.has_detachable_camera)
                .filter_map(|d| d.hull_final_rate)
                .max()
                .map(|r| r.as_decimal())
                .unwrap_or_default();
            for camera in &rated.detachable_cameras {
                prop_assert_eq!(camera.hull_rate.unwrap().as_decimal(), expected);
            }
        }

        #[test]
        fn generous_cap_leaves_drones_unchanged(drones in fleet_strategy(6)) {
            let document = TestDocumentBuilder::new()
                .with_max_drones_in_air(drones.len() as i64)
                .with_drones(drones)
                .build();
            let plain = RatingEngine::default().rate(&document).unwrap();
            let extended = engine(drone_extension_only()).rate(&document).unwrap();
            prop_assert_eq!(plain, extended);
        }

        #[test]
        fn camera_rule_fires_only_when_cameras_outnumber_cap(document in document_strategy()) {
            let plain = RatingEngine::default().rate(&document).unwrap();
            let extended = engine(camera_extension_only()).rate(&document).unwrap();
            let cap = document.max_drones_in_air.max(0).min(document.drones.len() as i64);
            if document.detachable_cameras.len() as i64 <= cap {
                prop_assert_eq!(camera_premiums(&plain), camera_premiums(&extended));
            } else {
                let flat = camera_premiums(&extended)
                    .iter()
                    .zip(camera_premiums(&plain))
                    .filter(|(e, p)| **e != *p)
                    .count();
                prop_assert!(flat <= document.detachable_cameras.len() - cap as usize);
            }
        }
    }
}
