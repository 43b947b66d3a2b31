use serde::Serialize;

use crate::{
    error::{CalcError, CalcResult},
    model::InputModel,
    params::*,
};

/// Fully-loaded annual salary assumed per marketing team member.
pub const MARKETING_SALARY_ASSUMPTION: f64 = 80_000.0;

/// Share of a marketer's time freed by self-service publishing.
pub const MARKETING_PRODUCTIVITY_SHARE: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EfficiencyResult {
    pub current_dev_cost: f64,
    pub dev_cost_savings: f64,
    pub cms_consolidation_savings: f64,
    pub marketing_productivity_gain: f64,
    pub total_savings: f64,
}

pub fn calculate_efficiency(model: &InputModel) -> CalcResult<EfficiencyResult> {
    let dev_hours = model.require(MONTHLY_DEV_HOURS_ON_CONTENT)?;
    let hourly_rate = model.require(DEVELOPER_HOURLY_RATE)?;
    let efficiency_gain = model.require(DEV_EFFICIENCY_GAIN)?;
    let cms_count = model.require(NUMBER_OF_CMS)?;
    let cms_maintenance = model.require(CMS_MAINTENANCE_COST_PER_YEAR)?;
    let team_size = model.require(MARKETING_TEAM_SIZE)?;

    if cms_count == 0.0 {
        return Err(CalcError::invalid(
            NUMBER_OF_CMS,
            "must be non-zero to compute consolidation savings",
        ));
    }

    let current_dev_cost = dev_hours * hourly_rate * 12.0;
    let dev_cost_savings = dev_hours * (efficiency_gain / 100.0) * hourly_rate * 12.0;
    let cms_consolidation_savings = cms_maintenance * ((cms_count - 1.0) / cms_count);
    let marketing_productivity_gain =
        team_size * MARKETING_SALARY_ASSUMPTION * MARKETING_PRODUCTIVITY_SHARE;

    Ok(EfficiencyResult {
        current_dev_cost,
        dev_cost_savings,
        cms_consolidation_savings,
        marketing_productivity_gain,
        total_savings: dev_cost_savings + cms_consolidation_savings + marketing_productivity_gain,
    })
}
