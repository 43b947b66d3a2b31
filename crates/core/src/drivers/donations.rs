use serde::Serialize;

use crate::{error::CalcResult, model::InputModel, params::*};

/// Litres collected per whole-blood donation.
pub const AVERAGE_DONATION_VOLUME_LITRES: f64 = 0.5;

/// Additional donations per year. Counts and litres, never money.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonationResult {
    pub from_retention: f64,
    pub from_acquisition: f64,
    pub from_increase: f64,
    pub total_additional_donations: f64,
    pub from_retention_litres: f64,
    pub from_acquisition_litres: f64,
    pub from_increase_litres: f64,
    pub total_additional_litres: f64,
}

pub fn calculate_donations(model: &InputModel) -> CalcResult<DonationResult> {
    let current = model.require(CURRENT_ANNUAL_DONATIONS)?;
    let retention = model.require(DONOR_RETENTION_IMPROVEMENT)?;
    let acquisition = model.require(NEW_DONOR_ACQUISITION_INCREASE)?;
    let increase = model.require(DONATION_INCREASE_PERCENT)?;

    let from_retention = current * retention / 100.0;
    let from_acquisition = current * acquisition / 100.0;
    let from_increase = current * increase / 100.0;
    let total = from_retention + from_acquisition + from_increase;

    Ok(DonationResult {
        from_retention,
        from_acquisition,
        from_increase,
        total_additional_donations: total,
        from_retention_litres: from_retention * AVERAGE_DONATION_VOLUME_LITRES,
        from_acquisition_litres: from_acquisition * AVERAGE_DONATION_VOLUME_LITRES,
        from_increase_litres: from_increase * AVERAGE_DONATION_VOLUME_LITRES,
        total_additional_litres: total * AVERAGE_DONATION_VOLUME_LITRES,
    })
}
