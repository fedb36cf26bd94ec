//! Hull rating
//!
//! `final_rate = hull_base_rate × weight_adjustment[band]` and
//! `premium = value × final_rate`, rounded half-up to two places. The base
//! rate and multiplier are kept at full precision so the final rate can be
//! reconciled exactly.

use core_kernel::{Money, Rate};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::document::Drone;
use crate::error::{RatingError, RatingResult};
use crate::rate_table::RateTable;

/// Hull pricing for one drone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HullRating {
    pub base_rate: Rate,
    pub weight_adjustment: Rate,
    pub final_rate: Rate,
    /// Net hull premium
    pub premium: Money,
}

/// Prices the hull cover for a single drone
///
/// # Errors
///
/// Returns `InvalidInput` if the drone's weight band is unknown, or if the
/// premium is too large for a decimal.
#[instrument(skip(drone, table), fields(serial = %drone.serial_number))]
pub fn rate_hull(drone: &Drone, table: &RateTable) -> RatingResult<HullRating> {
    let band = drone.weight_band()?;
    let base_rate = table.hull_base_rate();
    let weight_adjustment = table.weight_adjustment(band)?;
    let overflow = |_| {
        RatingError::invalid_input(
            format!("drones[{}].value", drone.serial_number),
            drone.value,
            "hull premium overflows",
        )
    };
    let final_rate = base_rate.checked_mul(weight_adjustment).map_err(overflow)?;
    let premium = final_rate.apply(drone.value).map_err(overflow)?;

    debug!(%band, %final_rate, %premium, "hull rated");

    Ok(HullRating {
        base_rate,
        weight_adjustment,
        final_rate,
        premium,
    })
}
