//! Value-driver calculators.
//!
//! Each driver is a pure function of an [`InputModel`] that produces a small
//! record of sub-components and a total. Results are never cached: callers
//! recompute the full set from the current model on every evaluation.

mod cx;
mod donations;
mod efficiency;
mod revenue;
mod risk;
mod tco;

use serde::Serialize;

use crate::{
    error::CalcResult,
    model::InputModel,
    types::{CxFormula, DriverId},
};

pub use cx::{calculate_cx, CxResult};
pub use donations::{calculate_donations, DonationResult, AVERAGE_DONATION_VOLUME_LITRES};
pub use efficiency::{
    calculate_efficiency, EfficiencyResult, MARKETING_PRODUCTIVITY_SHARE,
    MARKETING_SALARY_ASSUMPTION,
};
pub use revenue::{calculate_revenue, RevenueResult};
pub use risk::{calculate_risk, RiskResult, COMPLIANCE_EFFICIENCY_SHARE, SECURITY_AVOIDANCE_SHARE};
pub use tco::{calculate_tco, TcoResult};

/// How a figure should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Money,
    Donations,
    Litres,
    Percent,
}

/// A labelled line of a driver breakdown. `counted` lines sum to the total;
/// the rest are context shown next to them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    pub label: &'static str,
    pub value: f64,
    pub unit: Unit,
    pub counted: bool,
}

impl Component {
    fn counted(label: &'static str, value: f64, unit: Unit) -> Self {
        Self {
            label,
            value,
            unit,
            counted: true,
        }
    }

    fn context(label: &'static str, value: f64, unit: Unit) -> Self {
        Self {
            label,
            value,
            unit,
            counted: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "driver", rename_all = "lowercase")]
pub enum DriverResult {
    Revenue(RevenueResult),
    Efficiency(EfficiencyResult),
    Risk(RiskResult),
    Cx(CxResult),
    Donations(DonationResult),
    Tco(TcoResult),
}

impl DriverResult {
    pub fn id(&self) -> DriverId {
        match self {
            DriverResult::Revenue(_) => DriverId::Revenue,
            DriverResult::Efficiency(_) => DriverId::Efficiency,
            DriverResult::Risk(_) => DriverId::Risk,
            DriverResult::Cx(_) => DriverId::Cx,
            DriverResult::Donations(_) => DriverId::Donations,
            DriverResult::Tco(_) => DriverId::Tco,
        }
    }

    /// The designated total. Money for every driver except donations, whose
    /// total is a count of additional donations.
    pub fn total(&self) -> f64 {
        match self {
            DriverResult::Revenue(r) => r.total_lift,
            DriverResult::Efficiency(r) => r.total_savings,
            DriverResult::Risk(r) => r.total_risk_reduction,
            DriverResult::Cx(r) => r.total_cx_value,
            DriverResult::Donations(r) => r.total_additional_donations,
            DriverResult::Tco(r) => r.annual_savings,
        }
    }

    pub fn components(&self) -> Vec<Component> {
        use Unit::*;
        match self {
            DriverResult::Revenue(r) => vec![
                Component::context("Current Revenue", r.current_revenue, Money),
                Component::context("Projected Revenue", r.new_revenue, Money),
                Component::counted("Conversion Lift", r.conversion_lift, Money),
                Component::counted("Time-to-Market Value", r.time_to_market_value, Money),
            ],
            DriverResult::Efficiency(r) => vec![
                Component::context("Current Dev Cost", r.current_dev_cost, Money),
                Component::counted("Dev Cost Savings", r.dev_cost_savings, Money),
                Component::counted("CMS Consolidation", r.cms_consolidation_savings, Money),
                Component::counted(
                    "Marketing Productivity",
                    r.marketing_productivity_gain,
                    Money,
                ),
            ],
            DriverResult::Risk(r) => vec![
                Component::context("Current Downtime Cost", r.current_downtime_cost, Money),
                Component::counted("Downtime Reduction", r.downtime_savings, Money),
                Component::counted("Security Savings", r.security_savings, Money),
                Component::counted("Compliance Efficiency", r.compliance_efficiency, Money),
            ],
            DriverResult::Cx(r) => vec![
                Component::context("Base Revenue", r.base_revenue, Money),
                Component::counted("Bounce Reduction", r.bounce_impact, Money),
                Component::counted("Engagement Lift", r.engagement_lift, Money),
                Component::counted("Repeat Customer Lift", r.repeat_customer_lift, Money),
            ],
            DriverResult::Donations(r) => vec![
                Component::counted("From Retention", r.from_retention, Donations),
                Component::counted("From Acquisition", r.from_acquisition, Donations),
                Component::counted("From Overall Increase", r.from_increase, Donations),
                Component::context("Additional Litres", r.total_additional_litres, Litres),
            ],
            DriverResult::Tco(r) => vec![
                Component::context("Legacy Annual Cost", r.total_legacy_cost, Money),
                Component::context("Replacement Annual Cost", r.replacement_annual_cost, Money),
                Component::counted("Annual Savings", r.annual_savings, Money),
            ],
        }
    }
}

/// Run a single driver against the model.
pub fn calculate(id: DriverId, model: &InputModel, cx_formula: CxFormula) -> CalcResult<DriverResult> {
    Ok(match id {
        DriverId::Revenue => DriverResult::Revenue(calculate_revenue(model)?),
        DriverId::Efficiency => DriverResult::Efficiency(calculate_efficiency(model)?),
        DriverId::Risk => DriverResult::Risk(calculate_risk(model)?),
        DriverId::Cx => DriverResult::Cx(calculate_cx(model, cx_formula)?),
        DriverId::Donations => DriverResult::Donations(calculate_donations(model)?),
        DriverId::Tco => DriverResult::Tco(calculate_tco(model)?),
    })
}
