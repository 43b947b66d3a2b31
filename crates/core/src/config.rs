use std::path::{Path, PathBuf};

use anyhow::Context;
use log::warn;
use serde::Deserialize;

use crate::types::{Currency, Horizon};

pub const CONFIG_FILE_NAME: &str = "valuecalc.toml";

/// Defaults for the CLI. Every field is optional; command-line flags win.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub preset: Option<String>,
    pub horizon: Option<Horizon>,
    pub attribution_factor: Option<f64>,
    pub currency: Option<Currency>,
    pub state_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents =
            std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let config: Config =
            toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
        Ok(config)
    }

    /// `Ok(None)` when `dir` has no config file; an error when it has one
    /// that cannot be read or parsed.
    pub fn find_in(dir: &Path) -> anyhow::Result<Option<Self>> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(None);
        }
        Config::load(&path).map(Some)
    }

    /// Config from the working directory. A broken file is logged and
    /// treated as absent.
    pub fn discover() -> Option<Self> {
        match Config::find_in(Path::new(".")) {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring {CONFIG_FILE_NAME}: {e:#}");
                None
            }
        }
    }
}
