use serde::Serialize;

use crate::{error::CalcResult, model::InputModel, params::*};

/// Share of security incident cost avoided on the new platform.
pub const SECURITY_AVOIDANCE_SHARE: f64 = 0.75;
/// Share of compliance audit effort saved.
pub const COMPLIANCE_EFFICIENCY_SHARE: f64 = 0.4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskResult {
    pub current_downtime_cost: f64,
    pub downtime_savings: f64,
    pub security_savings: f64,
    pub compliance_efficiency: f64,
    pub total_risk_reduction: f64,
}

pub fn calculate_risk(model: &InputModel) -> CalcResult<RiskResult> {
    let downtime_hours = model.require(DOWNTIME_HOURS_PER_YEAR)?;
    let hourly_loss = model.require(HOURLY_REVENUE_LOSS)?;
    let downtime_reduction = model.require(DOWNTIME_REDUCTION)?;
    let incidents = model.require(SECURITY_INCIDENTS_PER_YEAR)?;
    let incident_cost = model.require(INCIDENT_COST)?;
    let audit_cost = model.require(COMPLIANCE_AUDIT_COST)?;

    let current_downtime_cost = downtime_hours * hourly_loss;
    let downtime_savings = current_downtime_cost * (downtime_reduction / 100.0);
    let security_savings = incidents * incident_cost * SECURITY_AVOIDANCE_SHARE;
    let compliance_efficiency = audit_cost * COMPLIANCE_EFFICIENCY_SHARE;

    Ok(RiskResult {
        current_downtime_cost,
        downtime_savings,
        security_savings,
        compliance_efficiency,
        total_risk_reduction: downtime_savings + security_savings + compliance_efficiency,
    })
}
