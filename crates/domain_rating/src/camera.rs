//! Camera rating
//!
//! Every detachable camera is rated at the highest hull final rate among
//! drones that carry a detachable camera. With no such drone, cameras are
//! rated at zero.
//!
//! The rate comes from [`HullRating`]s, so hull rating has to run before
//! cameras can be priced.

use core_kernel::{Money, Rate};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::document::{Camera, Drone};
use crate::error::{RatingError, RatingResult};
use crate::hull::HullRating;

/// Hull pricing for one camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraRating {
    pub hull_rate: Rate,
    /// Net hull premium
    pub hull_premium: Money,
}

/// Highest hull final rate among camera-carrying drones
///
/// Returns `None` when no drone has a detachable camera.
pub fn camera_hull_rate<'a, I>(rated_drones: I) -> Option<Rate>
where
    I: IntoIterator<Item = (&'a Drone, &'a HullRating)>,
{
    rated_drones
        .into_iter()
        .filter(|(drone, _)| drone.has_detachable_camera)
        .map(|(_, hull)| hull.final_rate)
        .max()
}

/// Prices every camera at the eligible drone rate
///
/// # Errors
///
/// Returns `InvalidInput` if a camera premium is too large for a decimal.
#[instrument(skip_all, fields(cameras = cameras.len()))]
pub fn rate_cameras<'a, I>(cameras: &[Camera], rated_drones: I) -> RatingResult<Vec<CameraRating>>
where
    I: IntoIterator<Item = (&'a Drone, &'a HullRating)>,
{
    let hull_rate = match camera_hull_rate(rated_drones) {
        Some(rate) => rate,
        None => {
            debug!("no drone carries a detachable camera, cameras rated at zero");
            return Ok(cameras
                .iter()
                .map(|_| CameraRating {
                    hull_rate: Rate::zero(),
                    hull_premium: Money::zero(),
                })
                .collect());
        }
    };

    debug!(%hull_rate, "camera hull rate");

    cameras
        .iter()
        .map(|camera| -> RatingResult<CameraRating> {
            let hull_premium = hull_rate.apply(camera.value).map_err(|_| {
                RatingError::invalid_input(
                    format!("detachable_cameras[{}].value", camera.serial_number),
                    camera.value,
                    "camera premium overflows",
                )
            })?;
            Ok(CameraRating {
                hull_rate,
                hull_premium,
            })
        })
        .collect()
}
