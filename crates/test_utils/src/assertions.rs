//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for rated documents that give
//! more meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_rating::{PremiumSummary, PricingDocument};
use rust_decimal::Decimal;

/// Asserts that an optional computed amount is set and equal to `expected`
///
/// # Panics
///
/// Panics if the amount is unset or differs from `expected`
pub fn assert_money_eq(actual: Option<Money>, expected: Decimal, what: &str) {
    let actual = actual.unwrap_or_else(|| panic!("{what} was not computed"));
    assert_eq!(
        actual.amount(),
        expected,
        "{what}: actual={actual}, expected={expected}"
    );
}

/// Asserts a summary's four figures: drones hull, drones tpl, cameras hull, total
pub fn assert_summary(summary: &PremiumSummary, expected: [Decimal; 4], label: &str) {
    assert_money_eq(summary.drones_hull, expected[0], &format!("{label}.drones_hull"));
    assert_money_eq(summary.drones_tpl, expected[1], &format!("{label}.drones_tpl"));
    assert_money_eq(summary.cameras_hull, expected[2], &format!("{label}.cameras_hull"));
    assert_money_eq(summary.total, expected[3], &format!("{label}.total"));
}

/// Asserts that net totals equal the sums of the line premiums
pub fn assert_net_totals_consistent(document: &PricingDocument) {
    let hull: Money = document.drones.iter().filter_map(|d| d.hull_premium).sum();
    let tpl: Money = document.drones.iter().filter_map(|d| d.tpl_layer_premium).sum();
    let cameras: Money = document
        .detachable_cameras
        .iter()
        .filter_map(|c| c.hull_premium)
        .sum();

    assert_eq!(document.net_prem.drones_hull, Some(hull), "net drones_hull");
    assert_eq!(document.net_prem.drones_tpl, Some(tpl), "net drones_tpl");
    assert_eq!(document.net_prem.cameras_hull, Some(cameras), "net cameras_hull");
    assert_eq!(document.net_prem.total, Some(hull + tpl + cameras), "net total");
}

/// Asserts that every gross figure is its net figure grossed up
pub fn assert_gross_consistent(document: &PricingDocument) {
    let pairs = [
        (document.net_prem.drones_hull, document.gross_prem.drones_hull),
        (document.net_prem.drones_tpl, document.gross_prem.drones_tpl),
        (document.net_prem.cameras_hull, document.gross_prem.cameras_hull),
        (document.net_prem.total, document.gross_prem.total),
    ];
    for (net, gross) in pairs {
        let net = net.expect("net computed");
        let expected = net.gross_up(document.brokerage).expect("valid brokerage");
        assert_eq!(gross, Some(expected), "gross of {net}");
    }
}
