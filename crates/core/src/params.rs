//! Registry of known input parameters.
//!
//! Every parameter has a stable camelCase key (used in persisted state and
//! preset files), a human-readable label (used for CSV), and a nominal slider
//! domain. The domain is advisory: calculators accept any finite value.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamGroup {
    Traffic,
    Operational,
    Risk,
    Improvement,
    Donations,
    Investment,
    Tco,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ParamSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub group: ParamGroup,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParamSpec {
    pub fn in_domain(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const MONTHLY_VISITORS: &str = "monthlyVisitors";
pub const CURRENT_CONVERSION_RATE: &str = "currentConversionRate";
pub const AVG_REVENUE_PER_CONVERSION: &str = "avgRevenuePerConversion";
pub const CURRENT_BOUNCE_RATE: &str = "currentBounceRate";
pub const AVG_SESSION_DURATION: &str = "avgSessionDuration";
pub const CUSTOMER_SATISFACTION_SCORE: &str = "customerSatisfactionScore";
pub const REPEAT_CUSTOMER_RATE: &str = "repeatCustomerRate";
pub const CAMPAIGN_LAUNCH_TIME: &str = "campaignLaunchTime";
pub const CAMPAIGNS_PER_YEAR: &str = "campaignsPerYear";

pub const DEVELOPER_HOURLY_RATE: &str = "developerHourlyRate";
pub const MONTHLY_DEV_HOURS_ON_CONTENT: &str = "monthlyDevHoursOnContent";
pub const NUMBER_OF_CMS: &str = "numberOfCMS";
pub const CMS_MAINTENANCE_COST_PER_YEAR: &str = "cmsMaintenanceCostPerYear";
pub const MARKETING_TEAM_SIZE: &str = "marketingTeamSize";

pub const DOWNTIME_HOURS_PER_YEAR: &str = "downtimeHoursPerYear";
pub const HOURLY_REVENUE_LOSS: &str = "hourlyRevenueLoss";
pub const COMPLIANCE_AUDIT_COST: &str = "complianceAuditCost";
pub const SECURITY_INCIDENTS_PER_YEAR: &str = "securityIncidentsPerYear";
pub const INCIDENT_COST: &str = "incidentCost";

pub const CONVERSION_RATE_INCREASE: &str = "conversionRateIncrease";
pub const TIME_TO_MARKET_REDUCTION: &str = "timeToMarketReduction";
pub const DEV_EFFICIENCY_GAIN: &str = "devEfficiencyGain";
pub const DOWNTIME_REDUCTION: &str = "downtimeReduction";
pub const CX_IMPROVEMENT: &str = "cxImprovement";
pub const BOUNCE_RATE_REDUCTION: &str = "bounceRateReduction";
pub const REPEAT_CUSTOMER_RATE_INCREASE: &str = "repeatCustomerRateIncrease";

pub const CURRENT_ANNUAL_DONATIONS: &str = "currentAnnualDonations";
pub const DONOR_RETENTION_IMPROVEMENT: &str = "donorRetentionImprovement";
pub const NEW_DONOR_ACQUISITION_INCREASE: &str = "newDonorAcquisitionIncrease";
pub const DONATION_INCREASE_PERCENT: &str = "donationIncreasePercent";

pub const IMPLEMENTATION_COST: &str = "implementationCost";
pub const IMPLEMENTATION_TIME: &str = "implementationTime";
pub const ANNUAL_LICENSE_COST: &str = "annualLicenseCost";
pub const ANNUAL_MAINTENANCE_COST: &str = "annualMaintenanceCost";

pub const LEGACY_LICENSE_COST: &str = "legacyLicenseCost";
pub const LEGACY_HOSTING_COST: &str = "legacyHostingCost";
pub const LEGACY_MAINTENANCE_COST: &str = "legacyMaintenanceCost";
pub const LEGACY_DEV_COST: &str = "legacyDevCost";
pub const SECONDARY_LICENSE_COST: &str = "secondaryLicenseCost";
pub const SECONDARY_HOSTING_COST: &str = "secondaryHostingCost";
pub const SECONDARY_MAINTENANCE_COST: &str = "secondaryMaintenanceCost";
pub const SECONDARY_DEV_COST: &str = "secondaryDevCost";
pub const REPLACEMENT_LICENSE_COST: &str = "replacementLicenseCost";
pub const REPLACEMENT_MAINTENANCE_COST: &str = "replacementMaintenanceCost";

const fn spec(
    key: &'static str,
    label: &'static str,
    group: ParamGroup,
    min: f64,
    max: f64,
    step: f64,
) -> ParamSpec {
    ParamSpec {
        key,
        label,
        group,
        min,
        max,
        step,
    }
}

use ParamGroup::*;

pub static REGISTRY: &[ParamSpec] = &[
    spec(MONTHLY_VISITORS, "Monthly Website Visitors", Traffic, 1_000.0, 5_000_000.0, 1_000.0),
    spec(CURRENT_CONVERSION_RATE, "Current Conversion Rate (%)", Traffic, 0.01, 10.0, 0.01),
    spec(AVG_REVENUE_PER_CONVERSION, "Avg Revenue per Conversion", Traffic, 1.0, 20_000.0, 1.0),
    spec(CURRENT_BOUNCE_RATE, "Current Bounce Rate (%)", Traffic, 20.0, 80.0, 1.0),
    spec(AVG_SESSION_DURATION, "Avg Session Duration (min)", Traffic, 1.0, 15.0, 0.5),
    spec(CUSTOMER_SATISFACTION_SCORE, "Customer Satisfaction Score (%)", Traffic, 40.0, 95.0, 1.0),
    spec(REPEAT_CUSTOMER_RATE, "Repeat Customer Rate (%)", Traffic, 10.0, 70.0, 1.0),
    spec(CAMPAIGN_LAUNCH_TIME, "Campaign Launch Time (Days)", Traffic, 7.0, 90.0, 1.0),
    spec(CAMPAIGNS_PER_YEAR, "Campaigns per Year", Traffic, 0.0, 52.0, 1.0),
    spec(DEVELOPER_HOURLY_RATE, "Developer Hourly Rate", Operational, 75.0, 250.0, 5.0),
    spec(MONTHLY_DEV_HOURS_ON_CONTENT, "Monthly Dev Hours on Content", Operational, 40.0, 400.0, 10.0),
    spec(NUMBER_OF_CMS, "Number of CMS Systems", Operational, 1.0, 10.0, 1.0),
    spec(CMS_MAINTENANCE_COST_PER_YEAR, "Annual CMS Maintenance Cost", Operational, 50_000.0, 500_000.0, 10_000.0),
    spec(MARKETING_TEAM_SIZE, "Marketing Team Size", Operational, 3.0, 50.0, 1.0),
    spec(DOWNTIME_HOURS_PER_YEAR, "Downtime Hours per Year", Risk, 1.0, 100.0, 1.0),
    spec(HOURLY_REVENUE_LOSS, "Hourly Revenue Loss", Risk, 10_000.0, 200_000.0, 5_000.0),
    spec(COMPLIANCE_AUDIT_COST, "Annual Compliance Audit Cost", Risk, 25_000.0, 200_000.0, 5_000.0),
    spec(SECURITY_INCIDENTS_PER_YEAR, "Security Incidents per Year", Risk, 0.0, 10.0, 1.0),
    spec(INCIDENT_COST, "Cost per Security Incident", Risk, 25_000.0, 500_000.0, 25_000.0),
    spec(CONVERSION_RATE_INCREASE, "Expected Conversion Increase (%)", Improvement, 10.0, 100.0, 5.0),
    spec(TIME_TO_MARKET_REDUCTION, "Time-to-Market Reduction (%)", Improvement, 30.0, 90.0, 5.0),
    spec(DEV_EFFICIENCY_GAIN, "Developer Efficiency Gain (%)", Improvement, 30.0, 80.0, 5.0),
    spec(DOWNTIME_REDUCTION, "Downtime Reduction (%)", Improvement, 50.0, 99.0, 1.0),
    spec(CX_IMPROVEMENT, "Expected CX Improvement (%)", Improvement, 5.0, 50.0, 5.0),
    spec(BOUNCE_RATE_REDUCTION, "Bounce Rate Reduction (%)", Improvement, 5.0, 50.0, 5.0),
    spec(REPEAT_CUSTOMER_RATE_INCREASE, "Repeat Customer Rate Increase (%)", Improvement, 5.0, 50.0, 5.0),
    spec(CURRENT_ANNUAL_DONATIONS, "Current Annual Donations", Donations, 100_000.0, 3_000_000.0, 10_000.0),
    spec(DONOR_RETENTION_IMPROVEMENT, "Donor Retention Improvement (%)", Donations, 1.0, 30.0, 1.0),
    spec(NEW_DONOR_ACQUISITION_INCREASE, "New Donor Acquisition Increase (%)", Donations, 1.0, 30.0, 1.0),
    spec(DONATION_INCREASE_PERCENT, "Overall Donation Increase (%)", Donations, 1.0, 30.0, 1.0),
    spec(IMPLEMENTATION_COST, "Implementation Cost", Investment, 50_000.0, 2_000_000.0, 10_000.0),
    spec(IMPLEMENTATION_TIME, "Implementation Time (Months)", Investment, 0.0, 24.0, 1.0),
    spec(ANNUAL_LICENSE_COST, "Annual License Cost", Investment, 0.0, 1_000_000.0, 5_000.0),
    spec(ANNUAL_MAINTENANCE_COST, "Annual Maintenance Cost", Investment, 0.0, 500_000.0, 5_000.0),
    spec(LEGACY_LICENSE_COST, "Legacy Platform License Cost", Tco, 0.0, 1_000_000.0, 5_000.0),
    spec(LEGACY_HOSTING_COST, "Legacy Platform Hosting Cost", Tco, 0.0, 1_000_000.0, 5_000.0),
    spec(LEGACY_MAINTENANCE_COST, "Legacy Platform Maintenance Cost", Tco, 0.0, 1_000_000.0, 5_000.0),
    spec(LEGACY_DEV_COST, "Legacy Platform Development Cost", Tco, 0.0, 2_000_000.0, 10_000.0),
    spec(SECONDARY_LICENSE_COST, "Secondary Platform License Cost", Tco, 0.0, 1_000_000.0, 5_000.0),
    spec(SECONDARY_HOSTING_COST, "Secondary Platform Hosting Cost", Tco, 0.0, 1_000_000.0, 5_000.0),
    spec(SECONDARY_MAINTENANCE_COST, "Secondary Platform Maintenance Cost", Tco, 0.0, 1_000_000.0, 5_000.0),
    spec(SECONDARY_DEV_COST, "Secondary Platform Development Cost", Tco, 0.0, 2_000_000.0, 10_000.0),
    spec(REPLACEMENT_LICENSE_COST, "Replacement Platform License Cost", Tco, 0.0, 1_000_000.0, 5_000.0),
    spec(REPLACEMENT_MAINTENANCE_COST, "Replacement Platform Maintenance Cost", Tco, 0.0, 1_000_000.0, 5_000.0),
];

static BY_KEY: Lazy<HashMap<&'static str, &'static ParamSpec>> =
    Lazy::new(|| REGISTRY.iter().map(|p| (p.key, p)).collect());

static BY_LOWER_LABEL: Lazy<HashMap<String, &'static ParamSpec>> = Lazy::new(|| {
    REGISTRY
        .iter()
        .flat_map(|p| [(p.label.to_lowercase(), p), (p.key.to_lowercase(), p)])
        .collect()
});

pub fn lookup(key: &str) -> Option<&'static ParamSpec> {
    BY_KEY.get(key).copied()
}

/// Human-readable label, or the raw key for parameters the registry does not know.
pub fn label_for(key: &str) -> &str {
    lookup(key).map(|p| p.label).unwrap_or(key)
}

/// Resolve a CSV label (or raw key) to its parameter, ignoring case and
/// surrounding whitespace.
pub fn resolve_label(label: &str) -> Option<&'static ParamSpec> {
    BY_LOWER_LABEL.get(&label.trim().to_lowercase()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keys_and_labels_are_unique() {
        let keys: HashSet<_> = REGISTRY.iter().map(|p| p.key).collect();
        let labels: HashSet<_> = REGISTRY.iter().map(|p| p.label.to_lowercase()).collect();
        assert_eq!(keys.len(), REGISTRY.len());
        assert_eq!(labels.len(), REGISTRY.len());
    }

    #[test]
    fn domains_are_well_formed() {
        for p in REGISTRY {
            assert!(p.min <= p.max, "{} has min > max", p.key);
            assert!(p.step > 0.0, "{} has non-positive step", p.key);
        }
    }

    #[test]
    fn resolve_label_is_case_insensitive_and_accepts_keys() {
        assert_eq!(
            resolve_label("  monthly website VISITORS ").map(|p| p.key),
            Some(MONTHLY_VISITORS)
        );
        assert_eq!(resolve_label("numberofcms").map(|p| p.key), Some(NUMBER_OF_CMS));
        assert!(resolve_label("Favourite Colour").is_none());
    }

    #[test]
    fn label_for_unknown_key_falls_back_to_key() {
        assert_eq!(label_for("somethingNew"), "somethingNew");
        assert_eq!(label_for(INCIDENT_COST), "Cost per Security Incident");
    }
}
