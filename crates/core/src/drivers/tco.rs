use serde::Serialize;

use crate::{error::CalcResult, model::InputModel, params::*};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TcoResult {
    pub primary_legacy_cost: f64,
    pub secondary_legacy_cost: f64,
    pub total_legacy_cost: f64,
    pub replacement_annual_cost: f64,
    pub annual_savings: f64,
}

/// Run-rate comparison of up to two legacy platforms against the replacement.
/// The secondary platform lines are optional.
pub fn calculate_tco(model: &InputModel) -> CalcResult<TcoResult> {
    let primary_legacy_cost = model.require(LEGACY_LICENSE_COST)?
        + model.require(LEGACY_HOSTING_COST)?
        + model.require(LEGACY_MAINTENANCE_COST)?
        + model.require(LEGACY_DEV_COST)?;
    let secondary_legacy_cost = model.optional(SECONDARY_LICENSE_COST)?
        + model.optional(SECONDARY_HOSTING_COST)?
        + model.optional(SECONDARY_MAINTENANCE_COST)?
        + model.optional(SECONDARY_DEV_COST)?;
    let total_legacy_cost = primary_legacy_cost + secondary_legacy_cost;

    let replacement_annual_cost =
        model.require(REPLACEMENT_LICENSE_COST)? + model.require(REPLACEMENT_MAINTENANCE_COST)?;

    Ok(TcoResult {
        primary_legacy_cost,
        secondary_legacy_cost,
        total_legacy_cost,
        replacement_annual_cost,
        annual_savings: total_legacy_cost - replacement_annual_cost,
    })
}
