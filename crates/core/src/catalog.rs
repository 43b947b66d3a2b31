//! Static registry of model presets.
//!
//! Presets ship embedded in the binary and are parsed once on first use.

use std::collections::HashSet;

use anyhow::{bail, Context};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::{
    aggregate::EvaluationOptions,
    model::InputModel,
    params::{IMPLEMENTATION_COST, IMPLEMENTATION_TIME},
    types::{CostModel, CxFormula, DriverId, Horizon},
};

const EMBEDDED_PRESETS: &str = include_str!("presets.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelPreset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub drivers: Vec<DriverId>,
    #[serde(default)]
    pub cx_formula: CxFormula,
    #[serde(default)]
    pub cost_model: CostModel,
    pub defaults: InputModel,
}

impl ModelPreset {
    pub fn evaluation_options(&self, attribution_factor: f64, horizon: Horizon) -> EvaluationOptions {
        EvaluationOptions {
            attribution_factor,
            horizon,
            cx_formula: self.cx_formula,
            cost_model: self.cost_model,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    preset: Vec<ModelPreset>,
}

pub fn parse_catalog(contents: &str) -> anyhow::Result<Vec<ModelPreset>> {
    let file: CatalogFile = toml::from_str(contents).context("parse preset catalog")?;

    let mut seen = HashSet::new();
    for p in &file.preset {
        if !seen.insert(p.id.as_str()) {
            bail!("duplicate preset id {:?}", p.id);
        }
        if p.drivers.is_empty() {
            bail!("preset {:?} enables no drivers", p.id);
        }
        for key in [IMPLEMENTATION_COST, IMPLEMENTATION_TIME] {
            if !p.defaults.contains(key) {
                bail!("preset {:?} is missing default for {key}", p.id);
            }
        }
    }

    Ok(file.preset)
}

static CATALOG: Lazy<Vec<ModelPreset>> =
    Lazy::new(|| parse_catalog(EMBEDDED_PRESETS).expect("embedded preset catalog is valid"));

pub fn presets() -> &'static [ModelPreset] {
    &CATALOG
}

pub fn find(id: &str) -> Option<&'static ModelPreset> {
    CATALOG.iter().find(|p| p.id.eq_ignore_ascii_case(id))
}

pub fn require(id: &str) -> anyhow::Result<&'static ModelPreset> {
    match find(id) {
        Some(p) => Ok(p),
        None => {
            let known: Vec<&str> = CATALOG.iter().map(|p| p.id.as_str()).collect();
            bail!("unknown preset {id:?} (known: {})", known.join(", "))
        }
    }
}
