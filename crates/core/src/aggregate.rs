//! Combines enabled driver totals into ROI, payback and net benefit.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    drivers::{self, DriverResult},
    error::{finite, CalcError, CalcResult},
    model::InputModel,
    params::{ANNUAL_LICENSE_COST, ANNUAL_MAINTENANCE_COST, IMPLEMENTATION_COST, IMPLEMENTATION_TIME},
    types::{CostModel, CxFormula, DriverId, Horizon},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOptions {
    /// Share of revenue and CX benefit credited to this initiative, in [0, 1].
    pub attribution_factor: f64,
    pub horizon: Horizon,
    pub cx_formula: CxFormula,
    pub cost_model: CostModel,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            attribution_factor: 1.0,
            horizon: Horizon::default(),
            cx_formula: CxFormula::default(),
            cost_model: CostModel::default(),
        }
    }
}

impl EvaluationOptions {
    fn validate(&self) -> CalcResult<()> {
        let a = self.attribution_factor;
        if !a.is_finite() || !(0.0..=1.0).contains(&a) {
            return Err(CalcError::invalid(
                "attributionFactor",
                format!("{a} is outside [0, 1]"),
            ));
        }
        Ok(())
    }
}

/// Additional donations reported beside, never inside, the monetary figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DonationVolume {
    pub additional_donations: f64,
    pub additional_litres: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub horizon_years: u32,
    pub attribution_factor: f64,
    pub annual_benefit: f64,
    pub horizon_benefit: f64,
    pub total_cost: f64,
    pub net_benefit: f64,
    /// `None` when total cost is zero.
    pub roi_percent: Option<f64>,
    /// `None` when annual benefit is zero or negative.
    pub payback_months: Option<f64>,
    pub donation_volume: Option<DonationVolume>,
}

impl AggregateResult {
    pub fn roi(&self) -> CalcResult<f64> {
        self.roi_percent.ok_or(CalcError::DivisionByZero {
            quantity: "roi_percent",
        })
    }

    pub fn payback(&self) -> CalcResult<f64> {
        match self.payback_months {
            Some(m) => Ok(m),
            None if self.annual_benefit < 0.0 => Err(CalcError::NoPayback {
                annual_benefit: self.annual_benefit,
            }),
            None => Err(CalcError::DivisionByZero {
                quantity: "payback_months",
            }),
        }
    }
}

/// Full result of one evaluation: each enabled driver plus the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub options: EvaluationOptions,
    pub drivers: Vec<DriverResult>,
    pub aggregate: AggregateResult,
}

impl Evaluation {
    pub fn driver(&self, id: DriverId) -> Option<&DriverResult> {
        self.drivers.iter().find(|d| d.id() == id)
    }

    /// What a driver adds to the annual benefit after attribution.
    pub fn contribution(&self, id: DriverId) -> f64 {
        self.driver(id)
            .map(|d| contribution(d, self.options.attribution_factor))
            .unwrap_or(0.0)
    }
}

fn contribution(result: &DriverResult, attribution_factor: f64) -> f64 {
    let id = result.id();
    if !id.is_monetary() {
        0.0
    } else if id.is_attributable() {
        result.total() * attribution_factor
    } else {
        result.total()
    }
}

/// Evaluate the enabled drivers against the model and aggregate them.
///
/// Driver order follows `enabled`; duplicates are evaluated once. Inputs
/// that would force a division by zero inside a driver fail the whole
/// evaluation with [`CalcError::InvalidInput`]. Undefined aggregate ratios
/// are left as `None` and surface as typed errors from
/// [`AggregateResult::roi`] and [`AggregateResult::payback`].
pub fn evaluate(
    model: &InputModel,
    enabled: &[DriverId],
    opts: &EvaluationOptions,
) -> CalcResult<Evaluation> {
    opts.validate()?;

    let mut results: Vec<DriverResult> = Vec::with_capacity(enabled.len());
    for &id in enabled {
        if results.iter().any(|r| r.id() == id) {
            continue;
        }
        let result = drivers::calculate(id, model, opts.cx_formula)?;
        for c in result.components() {
            finite(format!("{id} {}", c.label), c.value)?;
        }
        finite(format!("{id} total"), result.total())?;
        results.push(result);
    }

    let years = f64::from(opts.horizon.years());

    let annual_benefit = results
        .iter()
        .map(|r| contribution(r, opts.attribution_factor))
        .fold(0.0, |acc, c| acc + c);
    let horizon_benefit = annual_benefit * years;

    let implementation_cost = model.require(IMPLEMENTATION_COST)?;
    let implementation_months = model.require(IMPLEMENTATION_TIME)?;
    let recurring = match opts.cost_model {
        CostModel::License => model.require(ANNUAL_LICENSE_COST)?,
        CostModel::LicenseAndMaintenance => {
            model.require(ANNUAL_LICENSE_COST)? + model.require(ANNUAL_MAINTENANCE_COST)?
        }
    };
    let total_cost = implementation_cost + recurring * years;
    let net_benefit = horizon_benefit - total_cost;

    finite("annual_benefit", annual_benefit)?;
    finite("horizon_benefit", horizon_benefit)?;
    finite("total_cost", total_cost)?;
    finite("net_benefit", net_benefit)?;

    let roi_percent = (total_cost != 0.0)
        .then(|| finite("roi_percent", net_benefit / total_cost * 100.0))
        .transpose()?;
    let payback_months = (annual_benefit > 0.0)
        .then(|| {
            finite(
                "payback_months",
                implementation_months + implementation_cost / (annual_benefit / 12.0),
            )
        })
        .transpose()?;

    let donation_volume = results.iter().find_map(|r| match r {
        DriverResult::Donations(d) => Some(DonationVolume {
            additional_donations: d.total_additional_donations,
            additional_litres: d.total_additional_litres,
        }),
        _ => None,
    });

    debug!(
        "evaluated {} drivers: annual_benefit={annual_benefit:.2} total_cost={total_cost:.2}",
        results.len()
    );

    Ok(Evaluation {
        options: *opts,
        drivers: results,
        aggregate: AggregateResult {
            horizon_years: opts.horizon.years(),
            attribution_factor: opts.attribution_factor,
            annual_benefit,
            horizon_benefit,
            total_cost,
            net_benefit,
            roi_percent,
            payback_months,
            donation_volume,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::*;

    fn risk_only_model(implementation_cost: f64, license: f64) -> InputModel {
        [
            (DOWNTIME_HOURS_PER_YEAR, 10.0),
            (HOURLY_REVENUE_LOSS, 10_000.0),
            (DOWNTIME_REDUCTION, 50.0),
            (SECURITY_INCIDENTS_PER_YEAR, 0.0),
            (INCIDENT_COST, 0.0),
            (COMPLIANCE_AUDIT_COST, 0.0),
            (IMPLEMENTATION_COST, implementation_cost),
            (IMPLEMENTATION_TIME, 0.0),
            (ANNUAL_LICENSE_COST, license),
            (ANNUAL_MAINTENANCE_COST, 1_000.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn aggregates_single_driver() {
        // benefit 50k/yr, cost 60k + 10k * 3 = 90k
        let model = risk_only_model(60_000.0, 10_000.0);
        let eval = evaluate(&model, &[DriverId::Risk], &EvaluationOptions::default()).unwrap();
        let agg = &eval.aggregate;

        assert_eq!(agg.annual_benefit, 50_000.0);
        assert_eq!(agg.horizon_benefit, 150_000.0);
        assert_eq!(agg.total_cost, 90_000.0);
        assert_eq!(agg.net_benefit, 60_000.0);
        assert!((agg.roi().unwrap() - 66.666_666).abs() < 1e-3);
        assert!((agg.payback().unwrap() - 14.4).abs() < 1e-9);
        assert!(agg.donation_volume.is_none());
    }

    #[test]
    fn maintenance_counts_only_for_tco_cost_model() {
        let model = risk_only_model(60_000.0, 10_000.0);
        let opts = EvaluationOptions {
            cost_model: CostModel::LicenseAndMaintenance,
            horizon: Horizon::FiveYears,
            ..EvaluationOptions::default()
        };
        let eval = evaluate(&model, &[DriverId::Risk], &opts).unwrap();
        assert_eq!(eval.aggregate.total_cost, 60_000.0 + 11_000.0 * 5.0);
    }

    #[test]
    fn zero_total_cost_makes_roi_undefined() {
        let model = risk_only_model(0.0, 0.0);
        let eval = evaluate(&model, &[DriverId::Risk], &EvaluationOptions::default()).unwrap();
        assert_eq!(eval.aggregate.roi_percent, None);
        assert!(matches!(
            eval.aggregate.roi(),
            Err(CalcError::DivisionByZero { .. })
        ));
        assert_eq!(eval.aggregate.payback().unwrap(), 0.0);
    }

    #[test]
    fn zero_benefit_makes_payback_undefined() {
        let model = risk_only_model(60_000.0, 10_000.0);
        let eval = evaluate(&model, &[], &EvaluationOptions::default()).unwrap();
        assert_eq!(eval.aggregate.annual_benefit, 0.0);
        assert!(matches!(
            eval.aggregate.payback(),
            Err(CalcError::DivisionByZero { .. })
        ));
        assert!(eval.aggregate.roi().unwrap() < 0.0);
    }

    #[test]
    fn negative_benefit_never_pays_back() {
        let mut model = risk_only_model(60_000.0, 10_000.0);
        model.set(DOWNTIME_REDUCTION, -50.0);
        let eval = evaluate(&model, &[DriverId::Risk], &EvaluationOptions::default()).unwrap();
        assert!(matches!(
            eval.aggregate.payback(),
            Err(CalcError::NoPayback { .. })
        ));
    }

    #[test]
    fn attribution_factor_must_be_a_share() {
        let model = risk_only_model(60_000.0, 10_000.0);
        for bad in [1.5, -0.1, f64::NAN] {
            let opts = EvaluationOptions {
                attribution_factor: bad,
                ..EvaluationOptions::default()
            };
            assert!(matches!(
                evaluate(&model, &[DriverId::Risk], &opts),
                Err(CalcError::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn attribution_does_not_discount_risk() {
        let model = risk_only_model(60_000.0, 10_000.0);
        let opts = EvaluationOptions {
            attribution_factor: 0.5,
            ..EvaluationOptions::default()
        };
        let eval = evaluate(&model, &[DriverId::Risk], &opts).unwrap();
        assert_eq!(eval.aggregate.annual_benefit, 50_000.0);
    }

    #[test]
    fn duplicate_driver_ids_count_once() {
        let model = risk_only_model(60_000.0, 10_000.0);
        let eval = evaluate(
            &model,
            &[DriverId::Risk, DriverId::Risk],
            &EvaluationOptions::default(),
        )
        .unwrap();
        assert_eq!(eval.drivers.len(), 1);
        assert_eq!(eval.aggregate.annual_benefit, 50_000.0);
    }

    #[test]
    fn huge_inputs_overflow_instead_of_returning_infinity() {
        let mut model = risk_only_model(60_000.0, 10_000.0);
        model.set(HOURLY_REVENUE_LOSS, 1e307);
        model.set(DOWNTIME_HOURS_PER_YEAR, 100.0);

        let err = evaluate(&model, &[DriverId::Risk], &EvaluationOptions::default()).unwrap_err();

        assert!(
            matches!(&err, CalcError::Overflow { quantity } if quantity.starts_with("risk")),
            "{err}"
        );
    }

    #[test]
    fn horizon_overflow_is_caught_after_drivers() {
        // each driver total is finite; only the three-year projection overflows
        let mut model = risk_only_model(60_000.0, 10_000.0);
        model.set(HOURLY_REVENUE_LOSS, 1e308);
        model.set(DOWNTIME_HOURS_PER_YEAR, 1.0);
        model.set(DOWNTIME_REDUCTION, 100.0);

        let err = evaluate(&model, &[DriverId::Risk], &EvaluationOptions::default()).unwrap_err();

        assert_eq!(
            err,
            CalcError::Overflow {
                quantity: "horizon_benefit".to_string()
            }
        );
    }
}
