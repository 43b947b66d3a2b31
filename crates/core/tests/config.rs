use std::io::Write;
use std::path::Path;

use valuecalc_core::config::{Config, CONFIG_FILE_NAME};
use valuecalc_core::{Currency, Horizon};

#[test]
fn parse_valid_toml() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(
        f,
        r#"
preset = "ecommerce"
horizon = 5
attribution_factor = 0.6
currency = "aud"
state_dir = ".valuecalc"
log_level = "debug"
"#
    )
    .unwrap();

    let cfg = Config::load(f.path()).unwrap();
    assert_eq!(cfg.preset.as_deref(), Some("ecommerce"));
    assert_eq!(cfg.horizon, Some(Horizon::FiveYears));
    assert_eq!(cfg.attribution_factor, Some(0.6));
    assert_eq!(cfg.currency, Some(Currency::Aud));
    assert_eq!(cfg.state_dir.as_deref(), Some(Path::new(".valuecalc")));
    assert_eq!(cfg.log_level.as_deref(), Some("debug"));
}

#[test]
fn parse_empty_toml_gives_defaults() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(f, "").unwrap();

    let cfg = Config::load(f.path()).unwrap();
    assert_eq!(cfg.preset, None);
    assert_eq!(cfg.horizon, None);
    assert_eq!(cfg.attribution_factor, None);
    assert_eq!(cfg.currency, None);
    assert!(cfg.state_dir.is_none());
}

#[test]
fn unsupported_horizon_is_rejected() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(f, "horizon = 4\n").unwrap();

    assert!(Config::load(f.path()).is_err());
}

#[test]
fn parse_invalid_toml_returns_error() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(f, "this is not valid [ toml {{{{").unwrap();

    let result = Config::load(f.path());
    assert!(result.is_err());
}

#[test]
fn find_in_distinguishes_missing_from_broken() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Config::find_in(dir.path()).unwrap().is_none());

    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "preset = \"platform\"\n").unwrap();
    let cfg = Config::find_in(dir.path()).unwrap().unwrap();
    assert_eq!(cfg.preset.as_deref(), Some("platform"));

    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "horizon = \"forever\"\n").unwrap();
    let err = Config::find_in(dir.path()).unwrap_err();
    assert!(format!("{err:#}").contains(CONFIG_FILE_NAME));
}
