//! Fleet extensions for inactive assets
//!
//! An operator may only fly `max_drones_in_air` drones at once. Assets
//! outside the active set are charged a flat nominal premium instead of
//! their risk premium.
//!
//! # Drone rule
//!
//! Drones are ranked by `hull + tpl` premium. The n-th largest combined
//! premium is the threshold, and a drone is inactive only if its combined
//! premium is strictly below it. Drones tied at the threshold all stay
//! active, so more than n drones can be active. With `n <= 0` every drone
//! is inactive; with `n >= drone count` nothing changes.
//!
//! # Camera rule
//!
//! The active cap is `min(max_drones_in_air, drone count)`. If there are no
//! more cameras than that, nothing changes. Otherwise the most valuable
//! cameras up to the cap keep their premium and the rest are inactive.
//! Ties in value keep document order.

use core_kernel::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Whether an asset keeps its rated premium
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activity {
    Active,
    Inactive,
}

impl Activity {
    pub fn is_active(&self) -> bool {
        matches!(self, Activity::Active)
    }
}

/// The two net premiums the drone rule ranks on and adjusts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DronePremium {
    pub hull: Money,
    pub tpl: Money,
}

impl DronePremium {
    pub fn new(hull: Money, tpl: Money) -> Self {
        Self { hull, tpl }
    }

    /// Ranking key: hull plus TPL
    ///
    /// Saturates at `Decimal::MAX`, so a drone too large to sum ranks first.
    pub fn combined(&self) -> Money {
        Money::new(self.hull.amount().saturating_add(self.tpl.amount()))
    }
}

/// A camera's value (ranking key) and its net hull premium
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraPremium {
    pub value: Decimal,
    pub premium: Money,
}

impl CameraPremium {
    pub fn new(value: Decimal, premium: Money) -> Self {
        Self { value, premium }
    }
}

/// Classifies each drone, in input order
pub fn drone_activity(premiums: &[DronePremium], max_active: i64) -> Vec<Activity> {
    if max_active <= 0 {
        return vec![Activity::Inactive; premiums.len()];
    }
    let n = usize::try_from(max_active).unwrap_or(usize::MAX);
    if n >= premiums.len() {
        return vec![Activity::Active; premiums.len()];
    }

    let mut ranked: Vec<Money> = premiums.iter().map(DronePremium::combined).collect();
    ranked.sort_unstable_by(|a, b| b.cmp(a));
    let threshold = ranked[n - 1];

    premiums
        .iter()
        .map(|p| {
            if p.combined() < threshold {
                Activity::Inactive
            } else {
                Activity::Active
            }
        })
        .collect()
}

/// Applies the drone rule
///
/// Inactive drones get `flat_hull` as hull premium and zero TPL; active
/// drones are returned unchanged.
#[instrument(skip(premiums), fields(drones = premiums.len()))]
pub fn apply_drone_extension(
    premiums: &[DronePremium],
    max_active: i64,
    flat_hull: Money,
) -> Vec<DronePremium> {
    let activity = drone_activity(premiums, max_active);
    let inactive = activity.iter().filter(|a| !a.is_active()).count();
    if inactive > 0 {
        warn!(inactive, "drones priced as inactive");
    }

    premiums
        .iter()
        .zip(activity)
        .map(|(premium, activity)| match activity {
            Activity::Active => *premium,
            Activity::Inactive => DronePremium::new(flat_hull, Money::zero()),
        })
        .collect()
}

/// Classifies each camera, in input order
pub fn camera_activity(
    cameras: &[CameraPremium],
    max_active: i64,
    drone_count: usize,
) -> Vec<Activity> {
    let cap = usize::try_from(max_active.max(0))
        .unwrap_or(usize::MAX)
        .min(drone_count);
    if cameras.len() <= cap {
        return vec![Activity::Active; cameras.len()];
    }

    let mut order: Vec<usize> = (0..cameras.len()).collect();
    order.sort_by(|&a, &b| cameras[b].value.cmp(&cameras[a].value));

    let mut activity = vec![Activity::Inactive; cameras.len()];
    for &index in order.iter().take(cap) {
        activity[index] = Activity::Active;
    }
    activity
}

/// Applies the camera rule
///
/// Inactive cameras get `flat_premium`; active cameras are unchanged.
#[instrument(skip(cameras), fields(cameras = cameras.len()))]
pub fn apply_camera_extension(
    cameras: &[CameraPremium],
    max_active: i64,
    drone_count: usize,
    flat_premium: Money,
) -> Vec<CameraPremium> {
    let activity = camera_activity(cameras, max_active, drone_count);
    let inactive = activity.iter().filter(|a| !a.is_active()).count();
    if inactive > 0 {
        warn!(inactive, "cameras priced as inactive");
    }

    cameras
        .iter()
        .zip(activity)
        .map(|(camera, activity)| match activity {
            Activity::Active => *camera,
            Activity::Inactive => CameraPremium::new(camera.value, flat_premium),
        })
        .collect()
}
