use serde::Serialize;

use crate::{error::CalcResult, model::InputModel, params::*, types::CxFormula};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CxResult {
    pub formula: CxFormula,
    pub base_revenue: f64,
    pub bounce_impact: f64,
    pub engagement_lift: f64,
    pub repeat_customer_lift: f64,
    pub total_cx_value: f64,
}

/// Constants and inputs that differ between the two CX parameterizations.
struct CxTerms {
    /// Percentage of the current bounce rate that is recovered.
    bounce_reduction: f64,
    engagement_dampening: f64,
    repeat_factor: f64,
    repeat_dampening: f64,
}

impl CxTerms {
    fn resolve(model: &InputModel, formula: CxFormula) -> CalcResult<Self> {
        Ok(match formula {
            CxFormula::FixedRatio => Self {
                bounce_reduction: 30.0,
                engagement_dampening: 1.0,
                repeat_factor: model.require(REPEAT_CUSTOMER_RATE)?,
                repeat_dampening: 0.4,
            },
            CxFormula::Dampened => Self {
                bounce_reduction: model.require(BOUNCE_RATE_REDUCTION)?,
                engagement_dampening: 0.5,
                repeat_factor: model.require(REPEAT_CUSTOMER_RATE_INCREASE)?,
                repeat_dampening: 0.5,
            },
        })
    }
}

pub fn calculate_cx(model: &InputModel, formula: CxFormula) -> CalcResult<CxResult> {
    let monthly_visitors = model.require(MONTHLY_VISITORS)?;
    let conversion_rate = model.require(CURRENT_CONVERSION_RATE)?;
    let revenue_per_conversion = model.require(AVG_REVENUE_PER_CONVERSION)?;
    let bounce_rate = model.require(CURRENT_BOUNCE_RATE)?;
    let cx_improvement = model.require(CX_IMPROVEMENT)?;
    let terms = CxTerms::resolve(model, formula)?;

    let base_revenue =
        monthly_visitors * 12.0 * (conversion_rate / 100.0) * revenue_per_conversion;
    let bounce_impact = base_revenue * (bounce_rate * terms.bounce_reduction / 100.0) / 100.0;
    let engagement_lift = base_revenue * (cx_improvement / 100.0) * terms.engagement_dampening;
    let repeat_customer_lift = base_revenue * (terms.repeat_factor / 100.0) * terms.repeat_dampening;

    Ok(CxResult {
        formula,
        base_revenue,
        bounce_impact,
        engagement_lift,
        repeat_customer_lift,
        total_cx_value: bounce_impact + engagement_lift + repeat_customer_lift,
    })
}
