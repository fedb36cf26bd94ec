//! Premium totals
//!
//! Net totals are sums of the stored (already rounded) line premiums. Each
//! of the four gross figures is derived from its own net figure as
//! `net / (1 - brokerage)` and rounded; gross categories are never summed.

use core_kernel::{Money, MoneyError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::document::PremiumSummary;
use crate::error::{RatingError, RatingResult};
use crate::fleet::DronePremium;

/// One set of category totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumTotals {
    pub drones_hull: Money,
    pub drones_tpl: Money,
    pub cameras_hull: Money,
    pub total: Money,
}

impl PremiumTotals {
    /// Sums line premiums into category totals
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` on `net_prem.<category>` if a sum overflows.
    pub fn from_lines(drones: &[DronePremium], cameras: &[Money]) -> RatingResult<Self> {
        let sum = |category: &str, lines: &[Money]| {
            Money::checked_sum(lines).map_err(|_| {
                RatingError::invalid_input(
                    format!("net_prem.{category}"),
                    lines.len(),
                    "sum of line premiums overflows",
                )
            })
        };
        let hull: Vec<Money> = drones.iter().map(|d| d.hull).collect();
        let tpl: Vec<Money> = drones.iter().map(|d| d.tpl).collect();

        let drones_hull = sum("drones_hull", &hull[..])?;
        let drones_tpl = sum("drones_tpl", &tpl[..])?;
        let cameras_hull = sum("cameras_hull", cameras)?;
        let total = sum("total", &[drones_hull, drones_tpl, cameras_hull][..])?;
        Ok(Self {
            drones_hull,
            drones_tpl,
            cameras_hull,
            total,
        })
    }

    /// Converts every figure from net to gross independently
    pub fn gross_up(&self, brokerage: Decimal) -> RatingResult<Self> {
        let gross = |net: Money| {
            net.gross_up(brokerage).map_err(|e| match e {
                MoneyError::InvalidBrokerage(b) => {
                    RatingError::invalid_input("brokerage", b, "must be at least 0 and below 1")
                }
                MoneyError::Overflow => RatingError::invalid_input(
                    "brokerage",
                    brokerage,
                    format!("grossing up {net} overflows"),
                ),
                other => RatingError::Money(other),
            })
        };
        Ok(Self {
            drones_hull: gross(self.drones_hull)?,
            drones_tpl: gross(self.drones_tpl)?,
            cameras_hull: gross(self.cameras_hull)?,
            total: gross(self.total)?,
        })
    }
}

impl From<PremiumTotals> for PremiumSummary {
    fn from(totals: PremiumTotals) -> Self {
        PremiumSummary {
            drones_hull: Some(totals.drones_hull),
            drones_tpl: Some(totals.drones_tpl),
            cameras_hull: Some(totals.cameras_hull),
            total: Some(totals.total),
        }
    }
}

/// Net and gross totals for a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub net: PremiumTotals,
    pub gross: PremiumTotals,
}

/// Computes net and gross totals from the final line premiums
///
/// # Errors
///
/// Returns `InvalidInput` if `brokerage` is not in `[0, 1)`, or if a net or
/// gross figure is too large for a decimal.
#[instrument(skip(drones, cameras), fields(drones = drones.len(), cameras = cameras.len()))]
pub fn compute_totals(
    drones: &[DronePremium],
    cameras: &[Money],
    brokerage: Decimal,
) -> RatingResult<Totals> {
    let net = PremiumTotals::from_lines(drones, cameras)?;
    let gross = net.gross_up(brokerage)?;

    info!(net_total = %net.total, gross_total = %gross.total, "totals computed");

    Ok(Totals { net, gross })
}
