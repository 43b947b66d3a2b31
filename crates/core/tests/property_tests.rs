use proptest::prelude::*;

use valuecalc_core::{
    catalog, csv_io, drivers, evaluate, params::REGISTRY, DriverId, EvaluationOptions, Horizon,
    InputModel,
};

fn preset_index() -> impl Strategy<Value = usize> {
    0..catalog::presets().len()
}

/// Scale every default of a preset by `factor`, keeping the model valid.
fn scaled_defaults(index: usize, factor: f64) -> (InputModel, &'static catalog::ModelPreset) {
    let preset = &catalog::presets()[index];
    let model = preset
        .defaults
        .iter()
        .map(|(k, v)| (k.to_string(), v * factor))
        .collect();
    (model, preset)
}

proptest! {
    #[test]
    fn driver_total_equals_sum_of_counted_components(
        index in preset_index(),
        factor in 0.1f64..10.0,
    ) {
        let (model, preset) = scaled_defaults(index, factor);
        for &id in &preset.drivers {
            let result = drivers::calculate(id, &model, preset.cx_formula).unwrap();
            let sum: f64 = result
                .components()
                .iter()
                .filter(|c| c.counted)
                .map(|c| c.value)
                .sum();
            let total = result.total();
            prop_assert!(
                (sum - total).abs() <= 1e-9 * total.abs().max(1.0),
                "{id}: components {sum} vs total {total}"
            );
        }
    }

    #[test]
    fn disabling_a_driver_removes_exactly_its_contribution(
        index in preset_index(),
        attribution in 0.0f64..=1.0,
    ) {
        let preset = &catalog::presets()[index];
        let opts = EvaluationOptions {
            attribution_factor: attribution,
            ..preset.evaluation_options(1.0, Horizon::ThreeYears)
        };
        let all = evaluate(&preset.defaults, &preset.drivers, &opts).unwrap();

        for &id in &preset.drivers {
            let rest: Vec<DriverId> = preset.drivers.iter().copied().filter(|d| *d != id).collect();
            let without = evaluate(&preset.defaults, &rest, &opts).unwrap();
            let diff = all.aggregate.annual_benefit - without.aggregate.annual_benefit;
            let expected = all.contribution(id);
            prop_assert!(
                (diff - expected).abs() <= 1e-6 * expected.abs().max(1.0),
                "{id}: removed {diff}, contributed {expected}"
            );
        }
    }

    #[test]
    fn payback_recovers_implementation_cost(
        index in preset_index(),
        months in 0.0f64..24.0,
    ) {
        let preset = &catalog::presets()[index];
        let mut model = preset.defaults.clone();
        model.set("implementationTime", months);
        let eval = evaluate(&model, &preset.drivers, &preset.evaluation_options(1.0, Horizon::ThreeYears)).unwrap();

        let agg = &eval.aggregate;
        let payback = agg.payback().unwrap();
        let cost = model.get("implementationCost").unwrap();
        let recovered = (payback - months) * agg.annual_benefit / 12.0;
        prop_assert!((recovered - cost).abs() <= 1e-6 * cost.max(1.0));
    }

    #[test]
    fn horizon_benefit_is_annual_times_years(
        index in preset_index(),
        five in any::<bool>(),
    ) {
        let preset = &catalog::presets()[index];
        let horizon = if five { Horizon::FiveYears } else { Horizon::ThreeYears };
        let eval = evaluate(&preset.defaults, &preset.drivers, &preset.evaluation_options(1.0, horizon)).unwrap();
        let agg = &eval.aggregate;
        let expected = agg.annual_benefit * f64::from(horizon.years());
        prop_assert!((agg.horizon_benefit - expected).abs() <= 1e-9 * expected.abs().max(1.0));
        prop_assert_eq!(agg.net_benefit, agg.horizon_benefit - agg.total_cost);
    }

    #[test]
    fn csv_export_then_import_restores_values(
        values in prop::collection::vec(-1e9f64..1e9, REGISTRY.len()),
    ) {
        let model: InputModel = REGISTRY
            .iter()
            .zip(values)
            .map(|(spec, v)| (spec.key, v))
            .collect();

        let csv = csv_io::to_csv_string(&model).unwrap();
        let (imported, summary) = csv_io::read_csv(csv.as_bytes()).unwrap();

        prop_assert_eq!(summary.skipped, 0);
        prop_assert_eq!(summary.updated, REGISTRY.len());
        prop_assert_eq!(imported, model);
    }

    #[test]
    fn csv_import_never_panics(data in prop::collection::vec(any::<u8>(), 0..2048)) {
        let mut model = InputModel::new();
        let _ = csv_io::import_into(&mut model, data.as_slice());
    }
}
