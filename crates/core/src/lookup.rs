//! Company data enrichment.
//!
//! The enrichment service itself is external; this module defines the
//! request/response contract, the lifecycle of one lookup, and how confirmed
//! suggestions merge into an [`InputModel`].

use std::path::{Path, PathBuf};

use anyhow::Context;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{model::InputModel, params::*};

static RE_DOMAIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S*\.\S*$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CompanyQuery {
    CompanyName(String),
    Domain(String),
}

impl CompanyQuery {
    /// A query with a dot and no whitespace is a domain; anything else is a
    /// company name.
    pub fn classify(raw: &str) -> Self {
        let trimmed = raw.trim();
        if RE_DOMAIN.is_match(trimmed) {
            CompanyQuery::Domain(trimmed.to_lowercase())
        } else {
            CompanyQuery::CompanyName(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CompanyQuery::CompanyName(s) | CompanyQuery::Domain(s) => s,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyData {
    pub name: String,
    #[serde(default)]
    pub industry: String,
    pub monthly_visitors: Option<f64>,
    pub avg_revenue_per_conversion: Option<f64>,
    pub current_conversion_rate: Option<f64>,
    pub current_bounce_rate: Option<f64>,
    pub marketing_team_size: Option<f64>,
    #[serde(rename = "numberOfCMS")]
    pub number_of_cms: Option<f64>,
}

impl CompanyData {
    /// The numeric fields the service actually returned, keyed by parameter.
    pub fn suggestions(&self) -> InputModel {
        [
            (MONTHLY_VISITORS, self.monthly_visitors),
            (AVG_REVENUE_PER_CONVERSION, self.avg_revenue_per_conversion),
            (CURRENT_CONVERSION_RATE, self.current_conversion_rate),
            (CURRENT_BOUNCE_RATE, self.current_bounce_rate),
            (MARKETING_TEAM_SIZE, self.marketing_team_size),
            (NUMBER_OF_CMS, self.number_of_cms),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.filter(|v| v.is_finite()).map(|v| (k, v)))
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<CompanyData>,
    #[serde(default)]
    pub error: Option<String>,
}

pub trait CompanyLookup {
    fn lookup(&self, query: &CompanyQuery) -> anyhow::Result<LookupResponse>;
}

/// Serves canned responses from `<dir>/<query>.json`, standing in for the
/// remote enrichment API.
#[derive(Debug, Clone)]
pub struct JsonFileLookup {
    dir: PathBuf,
}

impl JsonFileLookup {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, query: &CompanyQuery) -> PathBuf {
        let slug: String = query
            .as_str()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' { c } else { '-' })
            .collect();
        self.dir.join(format!("{slug}.json"))
    }
}

impl CompanyLookup for JsonFileLookup {
    fn lookup(&self, query: &CompanyQuery) -> anyhow::Result<LookupResponse> {
        let path = self.path_for(query);
        read_response(&path)
    }
}

pub fn read_response(path: &Path) -> anyhow::Result<LookupResponse> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
}

/// Identifies one in-flight lookup. Only the most recent ticket may
/// complete the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum LookupState {
    Idle,
    Pending(CompanyQuery),
    Ready(CompanyData),
    NoData { reason: String },
}

#[derive(Debug, Clone)]
pub struct LookupSession {
    generation: u64,
    state: LookupState,
}

impl Default for LookupSession {
    fn default() -> Self {
        Self {
            generation: 0,
            state: LookupState::Idle,
        }
    }
}

impl LookupSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    /// Start a lookup, invalidating any earlier ticket.
    pub fn begin(&mut self, query: CompanyQuery) -> LookupTicket {
        self.generation += 1;
        self.state = LookupState::Pending(query);
        LookupTicket(self.generation)
    }

    /// Record the outcome for `ticket`. Returns `false` and changes nothing
    /// when the ticket is stale.
    pub fn complete(
        &mut self,
        ticket: LookupTicket,
        outcome: anyhow::Result<LookupResponse>,
    ) -> bool {
        if ticket.0 != self.generation {
            info!("discarding stale lookup result {}", ticket.0);
            return false;
        }

        self.state = match outcome {
            Ok(LookupResponse {
                success: true,
                data: Some(data),
                ..
            }) => LookupState::Ready(data),
            Ok(resp) => {
                let reason = resp
                    .error
                    .unwrap_or_else(|| "no company data available".to_string());
                warn!("company lookup returned no data: {reason}");
                LookupState::NoData { reason }
            }
            Err(e) => {
                warn!("company lookup failed: {e:#}");
                LookupState::NoData {
                    reason: format!("{e:#}"),
                }
            }
        };
        true
    }

    /// Run a lookup to completion against `service`.
    pub fn run(&mut self, service: &dyn CompanyLookup, raw_query: &str) -> &LookupState {
        let query = CompanyQuery::classify(raw_query);
        let ticket = self.begin(query.clone());
        let outcome = service.lookup(&query);
        self.complete(ticket, outcome);
        &self.state
    }

    /// Merge the ready suggestions into `model` once the user confirms.
    /// Fields the service did not return leave the model untouched.
    pub fn apply_confirmed(&self, model: &mut InputModel, confirmed: bool) -> usize {
        match (&self.state, confirmed) {
            (LookupState::Ready(data), true) => {
                let suggestions = data.suggestions();
                *model = model.merged_with(&suggestions);
                suggestions.len()
            }
            _ => 0,
        }
    }
}
