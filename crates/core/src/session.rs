//! Working state for one preset: the current inputs, the enabled drivers and
//! the store they persist to.

use anyhow::Context;
use log::{info, warn};

use crate::{
    aggregate::{evaluate, Evaluation},
    catalog::{self, ModelPreset},
    error::{CalcError, CalcResult},
    model::InputModel,
    params,
    store::KeyValueStore,
    types::{DriverId, Horizon},
};

pub fn inputs_key(preset_id: &str) -> String {
    format!("inputs-{preset_id}")
}

pub fn drivers_key(preset_id: &str) -> String {
    format!("drivers-{preset_id}")
}

pub struct Session<S: KeyValueStore> {
    store: S,
    preset: &'static ModelPreset,
    model: InputModel,
    drivers: Vec<DriverId>,
}

impl<S: KeyValueStore> Session<S> {
    pub fn open(store: S, preset_id: &str) -> anyhow::Result<Self> {
        let preset = catalog::require(preset_id)?;
        let (model, drivers) = load_state(&store, preset)?;
        Ok(Self {
            store,
            preset,
            model,
            drivers,
        })
    }

    /// Reset to the new preset's defaults, then overlay anything persisted
    /// for it. On error the current preset and its edits are kept.
    pub fn switch_preset(&mut self, preset_id: &str) -> anyhow::Result<()> {
        let preset = catalog::require(preset_id)?;
        let (model, drivers) = load_state(&self.store, preset)?;
        self.preset = preset;
        self.model = model;
        self.drivers = drivers;
        info!("switched to preset {}", preset.id);
        Ok(())
    }

    pub fn preset(&self) -> &'static ModelPreset {
        self.preset
    }

    pub fn model(&self) -> &InputModel {
        &self.model
    }

    pub fn drivers(&self) -> &[DriverId] {
        &self.drivers
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Set one known parameter. The value may be outside its slider range
    /// but must be finite.
    pub fn set_param(&mut self, key: &str, value: f64) -> CalcResult<()> {
        let spec = params::lookup(key)
            .ok_or_else(|| CalcError::invalid(key, "unknown parameter"))?;
        if !value.is_finite() {
            return Err(CalcError::invalid(key, format!("value {value} is not finite")));
        }
        self.model.set(spec.key, value);
        Ok(())
    }

    /// Overlay a set of values, e.g. from a CSV import or confirmed lookup.
    pub fn apply(&mut self, values: &InputModel) {
        self.model = self.model.merged_with(values);
    }

    pub fn enable(&mut self, id: DriverId) {
        if !self.drivers.contains(&id) {
            self.drivers.push(id);
        }
    }

    pub fn disable(&mut self, id: DriverId) {
        self.drivers.retain(|d| *d != id);
    }

    pub fn save(&mut self) -> anyhow::Result<()> {
        let id = self.preset.id.as_str();
        let inputs = serde_json::to_string(&self.model).context("serialize inputs")?;
        let drivers = serde_json::to_string(&self.drivers).context("serialize drivers")?;
        self.store.set(&inputs_key(id), &inputs)?;
        self.store.set(&drivers_key(id), &drivers)?;
        info!("saved state for {id}");
        Ok(())
    }

    /// Drop persisted state for the current preset and return to defaults.
    pub fn reset(&mut self) -> anyhow::Result<()> {
        let id = self.preset.id.as_str();
        self.store.remove(&inputs_key(id))?;
        self.store.remove(&drivers_key(id))?;
        self.model = self.preset.defaults.clone();
        self.drivers = self.preset.drivers.clone();
        info!("reset {id} to defaults");
        Ok(())
    }

    pub fn evaluate(&self, attribution_factor: f64, horizon: Horizon) -> CalcResult<Evaluation> {
        let opts = self.preset.evaluation_options(attribution_factor, horizon);
        evaluate(&self.model, &self.drivers, &opts)
    }
}

/// Defaults for `preset` with any persisted inputs and drivers merged over
/// them. Unreadable saved documents are ignored; store failures are not.
fn load_state<S: KeyValueStore>(
    store: &S,
    preset: &ModelPreset,
) -> anyhow::Result<(InputModel, Vec<DriverId>)> {
    let id = preset.id.as_str();
    let mut model = preset.defaults.clone();
    let mut drivers = preset.drivers.clone();

    if let Some(raw) = store.get(&inputs_key(id))? {
        match serde_json::from_str::<InputModel>(&raw) {
            Ok(saved) => {
                model = preset.defaults.merged_with(&saved);
                info!("restored {} saved inputs for {id}", saved.len());
            }
            Err(e) => warn!("ignoring unreadable saved inputs for {id}: {e}"),
        }
    }

    if let Some(raw) = store.get(&drivers_key(id))? {
        match serde_json::from_str::<Vec<DriverId>>(&raw) {
            Ok(saved) => drivers = saved,
            Err(e) => warn!("ignoring unreadable saved drivers for {id}: {e}"),
        }
    }

    Ok((model, drivers))
}
