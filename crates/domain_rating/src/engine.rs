//! Rating engine
//!
//! The engine composes the rating stages over a pricing document:
//!
//! ```text
//! validate -> hull -> tpl -> cameras -> [drone extension] -> [camera extension] -> totals
//! ```
//!
//! Every stage is a pure function of its inputs. The engine never mutates
//! the document it is given; it returns a rated copy, so re-rating the same
//! input always yields the same output.

use core_kernel::Money;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::camera::{rate_cameras, CameraRating};
use crate::document::PricingDocument;
use crate::error::RatingResult;
use crate::fleet::{apply_camera_extension, apply_drone_extension, CameraPremium, DronePremium};
use crate::hull::{rate_hull, HullRating};
use crate::rate_table::RateTable;
use crate::totals::compute_totals;
use crate::tpl::{rate_tpl, TplRating};

/// Which fleet extensions to apply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingOptions {
    /// Price drones outside the active set at the flat inactive premium
    pub apply_drone_extension: bool,
    /// Price cameras outside the active set at the flat inactive premium
    pub apply_camera_extension: bool,
}

impl RatingOptions {
    /// Both extensions enabled
    pub fn with_extensions() -> Self {
        Self {
            apply_drone_extension: true,
            apply_camera_extension: true,
        }
    }
}

/// Prices pricing documents against a rate table
#[derive(Debug, Clone)]
pub struct RatingEngine {
    table: RateTable,
    options: RatingOptions,
}

impl RatingEngine {
    /// Creates an engine with no fleet extensions
    pub fn new(table: RateTable) -> Self {
        Self {
            table,
            options: RatingOptions::default(),
        }
    }

    /// Sets the fleet extension options
    pub fn with_options(mut self, options: RatingOptions) -> Self {
        self.options = options;
        self
    }

    pub fn table(&self) -> &RateTable {
        &self.table
    }

    pub fn options(&self) -> RatingOptions {
        self.options
    }

    /// Rates a document and returns a copy with every computed field set
    ///
    /// Computed fields already present on the input are ignored.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a bad brokerage, duplicate serial number,
    /// negative amount, unknown weight band or unknown TPL layer. Nothing is
    /// returned on failure; there is no partial result.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let engine = RatingEngine::new(RateTable::standard());
    /// let rated = engine.rate(&document)?;
    /// println!("{}", rated.gross_prem.total.unwrap());
    /// ```
    #[instrument(
        skip(self, document),
        fields(
            insured = %document.insured,
            drones = document.drones.len(),
            cameras = document.detachable_cameras.len(),
        )
    )]
    pub fn rate(&self, document: &PricingDocument) -> RatingResult<PricingDocument> {
        document.validate()?;

        let hull: Vec<HullRating> = document
            .drones
            .iter()
            .map(|drone| rate_hull(drone, &self.table))
            .collect::<RatingResult<_>>()?;
        let tpl: Vec<TplRating> = document
            .drones
            .iter()
            .map(|drone| rate_tpl(drone, &self.table))
            .collect::<RatingResult<_>>()?;
        let cameras: Vec<CameraRating> =
            rate_cameras(&document.detachable_cameras, document.drones.iter().zip(&hull))?;

        let mut drone_premiums: Vec<DronePremium> = hull
            .iter()
            .zip(&tpl)
            .map(|(h, t)| DronePremium::new(h.premium, t.layer_premium))
            .collect();
        if self.options.apply_drone_extension {
            drone_premiums = apply_drone_extension(
                &drone_premiums,
                document.max_drones_in_air,
                self.table.inactive_drone_premium(),
            );
        }

        let mut camera_premiums: Vec<CameraPremium> = document
            .detachable_cameras
            .iter()
            .zip(&cameras)
            .map(|(camera, rating)| CameraPremium::new(camera.value, rating.hull_premium))
            .collect();
        if self.options.apply_camera_extension {
            camera_premiums = apply_camera_extension(
                &camera_premiums,
                document.max_drones_in_air,
                document.drones.len(),
                self.table.inactive_camera_premium(),
            );
        }

        let camera_lines: Vec<Money> = camera_premiums.iter().map(|c| c.premium).collect();
        let totals = compute_totals(&drone_premiums, &camera_lines, document.brokerage)?;

        let mut rated = document.clone();
        rated.reset();
        for (((drone, h), t), premium) in rated
            .drones
            .iter_mut()
            .zip(&hull)
            .zip(&tpl)
            .zip(&drone_premiums)
        {
            drone.hull_base_rate = Some(h.base_rate);
            drone.hull_weight_adjustment = Some(h.weight_adjustment);
            drone.hull_final_rate = Some(h.final_rate);
            drone.hull_premium = Some(premium.hull);
            drone.tpl_base_rate = Some(t.base_rate);
            drone.tpl_base_layer_premium = Some(t.base_layer_premium);
            drone.tpl_ilf = Some(t.ilf);
            drone.tpl_layer_premium = Some(premium.tpl);
        }
        for ((camera, rating), premium) in rated
            .detachable_cameras
            .iter_mut()
            .zip(&cameras)
            .zip(&camera_premiums)
        {
            camera.hull_rate = Some(rating.hull_rate);
            camera.hull_premium = Some(premium.premium);
        }
        rated.net_prem = totals.net.into();
        rated.gross_prem = totals.gross.into();

        info!(
            net_total = %totals.net.total,
            gross_total = %totals.gross.total,
            "document rated"
        );

        Ok(rated)
    }
}

impl Default for RatingEngine {
    fn default() -> Self {
        Self::new(RateTable::standard())
    }
}
