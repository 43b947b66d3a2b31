use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    error::{CalcError, CalcResult},
    params,
};

/// Flat, ordered record of named numeric inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputModel {
    values: IndexMap<String, f64>,
}

/// A parameter whose value sits outside its nominal slider range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainWarning {
    pub key: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl InputModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Fetch a parameter a calculation depends on. Missing or non-finite
    /// values are rejected so they never leak into results as NaN.
    pub fn require(&self, key: &str) -> CalcResult<f64> {
        let value = self
            .get(key)
            .ok_or_else(|| CalcError::invalid(key, "missing required parameter"))?;
        if !value.is_finite() {
            return Err(CalcError::invalid(key, format!("value {value} is not finite")));
        }
        Ok(value)
    }

    /// Like [`InputModel::require`] but a missing key reads as zero.
    pub fn optional(&self, key: &str) -> CalcResult<f64> {
        match self.get(key) {
            None => Ok(0.0),
            Some(_) => self.require(key),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(key.into(), value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Overlay `other` on top of `self`: keys present in `other` win, keys
    /// only in `self` are kept, new keys are appended.
    pub fn merged_with(&self, other: &InputModel) -> InputModel {
        let mut merged = self.clone();
        for (k, v) in other.iter() {
            merged.set(k, v);
        }
        merged
    }

    pub fn domain_warnings(&self) -> Vec<DomainWarning> {
        self.iter()
            .filter_map(|(key, value)| {
                let spec = params::lookup(key)?;
                (!spec.in_domain(value)).then(|| DomainWarning {
                    key: key.to_string(),
                    value,
                    min: spec.min,
                    max: spec.max,
                })
            })
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for InputModel {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
