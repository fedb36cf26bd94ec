//! Third-party liability rating
//!
//! The base layer premium is `value × tpl_base_rate`, rounded. That rounded
//! figure is then multiplied by the increased limit factor for the drone's
//! exact (limit, excess) pair and rounded again.

use core_kernel::{Money, Rate};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::document::Drone;
use crate::error::{RatingError, RatingResult};
use crate::rate_table::RateTable;

/// TPL pricing for one drone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TplRating {
    pub base_rate: Rate,
    pub base_layer_premium: Money,
    pub ilf: Rate,
    /// Net TPL premium for the layer
    pub layer_premium: Money,
}

/// Prices the TPL layer for a single drone
///
/// # Errors
///
/// Returns `InvalidInput` if the (limit, excess) pair is not in the table,
/// or if the premium is too large for a decimal.
#[instrument(skip(drone, table), fields(serial = %drone.serial_number))]
pub fn rate_tpl(drone: &Drone, table: &RateTable) -> RatingResult<TplRating> {
    let base_rate = table.tpl_base_rate();
    let overflow = |_| {
        RatingError::invalid_input(
            format!("drones[{}].value", drone.serial_number),
            drone.value,
            "tpl premium overflows",
        )
    };
    let base_layer_premium = base_rate.apply(drone.value).map_err(overflow)?;
    let ilf = table
        .increased_limit_factor(drone.layer_key())
        .map_err(|_| {
            RatingError::invalid_input(
                format!("drones[{}].tpl_limit/tpl_excess", drone.serial_number),
                drone.layer_key(),
                "no increased limit factor for this layer",
            )
        })?;
    let layer_premium = ilf.apply_to_money(base_layer_premium).map_err(overflow)?;

    debug!(%base_layer_premium, %ilf, %layer_premium, "tpl rated");

    Ok(TplRating {
        base_rate,
        base_layer_premium,
        ilf,
        layer_premium,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate_table::WeightBand;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn drone(value: Decimal, limit: Decimal, excess: Decimal) -> Drone {
        Drone::new("BBB-222", value, WeightBand::From10To20Kg, false, limit, excess)
    }

    #[test]
    fn test_tpl_per_layer() {
        let table = RateTable::standard();
        let cases = [
            (dec!(10000), dec!(1000000), dec!(0), dec!(200.00), dec!(1.00), dec!(200.00)),
            (dec!(12000), dec!(4000000), dec!(1000000), dec!(240.00), dec!(0.53), dec!(127.20)),
            (dec!(15000), dec!(5000000), dec!(5000000), dec!(300.00), dec!(0.31), dec!(93.00)),
        ];

        for (value, limit, excess, base_layer, ilf, layer) in cases {
            let rating = rate_tpl(&drone(value, limit, excess), &table).unwrap();
            assert_eq!(rating.base_rate.as_decimal(), dec!(0.02));
            assert_eq!(rating.base_layer_premium.amount(), base_layer);
            assert_eq!(rating.ilf.as_decimal(), ilf);
            assert_eq!(rating.layer_premium.amount(), layer);
        }
    }

    #[test]
    fn test_base_layer_is_rounded_before_ilf() {
        // 1000.25 × 0.02 = 20.005 -> 20.01; 20.01 × 0.53 = 10.6053 -> 10.61
        // Deferred rounding would give 20.005 × 0.53 = 10.60265 -> 10.60
        let d = drone(dec!(1000.25), dec!(4000000), dec!(1000000));
        let rating = rate_tpl(&d, &RateTable::standard()).unwrap();
        assert_eq!(rating.base_layer_premium.amount(), dec!(20.01));
        assert_eq!(rating.layer_premium.amount(), dec!(10.61));
    }

    #[test]
    fn test_unknown_layer_fails() {
        let d = drone(dec!(10000), dec!(2000000), dec!(0));
        let err = rate_tpl(&d, &RateTable::standard()).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("BBB-222"));
    }

    #[test]
    fn test_no_interval_matching() {
        // Inside the 4m xs 1m layer, but not an exact key
        let d = drone(dec!(10000), dec!(3000000), dec!(1000000));
        assert!(rate_tpl(&d, &RateTable::standard()).is_err());
    }
}
