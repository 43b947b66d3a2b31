use serde::Serialize;

use crate::{error::CalcResult, model::InputModel, params::*};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueResult {
    pub current_revenue: f64,
    pub new_conversion_rate: f64,
    pub new_revenue: f64,
    pub conversion_lift: f64,
    pub time_to_market_value: f64,
    pub total_lift: f64,
}

/// Revenue from a higher conversion rate plus the value of launching
/// campaigns sooner. Negative uplifts are allowed and produce a negative lift.
pub fn calculate_revenue(model: &InputModel) -> CalcResult<RevenueResult> {
    let monthly_visitors = model.require(MONTHLY_VISITORS)?;
    let conversion_rate = model.require(CURRENT_CONVERSION_RATE)?;
    let revenue_per_conversion = model.require(AVG_REVENUE_PER_CONVERSION)?;
    let launch_days = model.require(CAMPAIGN_LAUNCH_TIME)?;
    let campaigns_per_year = model.require(CAMPAIGNS_PER_YEAR)?;
    let conversion_increase = model.require(CONVERSION_RATE_INCREASE)?;
    let ttm_reduction = model.require(TIME_TO_MARKET_REDUCTION)?;

    let annual_visitors = monthly_visitors * 12.0;
    let current_revenue = annual_visitors * (conversion_rate / 100.0) * revenue_per_conversion;
    let new_conversion_rate = conversion_rate * (1.0 + conversion_increase / 100.0);
    let new_revenue = annual_visitors * (new_conversion_rate / 100.0) * revenue_per_conversion;
    let conversion_lift = new_revenue - current_revenue;

    let days_saved = launch_days * ttm_reduction / 100.0;
    let time_to_market_value = (current_revenue / 365.0) * days_saved * campaigns_per_year;

    Ok(RevenueResult {
        current_revenue,
        new_conversion_rate,
        new_revenue,
        conversion_lift,
        time_to_market_value,
        total_lift: conversion_lift + time_to_market_value,
    })
}
