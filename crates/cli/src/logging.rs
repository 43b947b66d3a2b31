//! Diagnostic logging to stderr.
//!
//! The level comes from `VALUECALC_LOG_LEVEL`, then the config file, then
//! defaults to `warn` so that stdout stays machine-readable.

use std::io::IsTerminal;

use anyhow::bail;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

pub const LOG_LEVEL_ENV: &str = "VALUECALC_LOG_LEVEL";

const DEFAULT_LOG_LEVEL: &str = "warn";

pub fn parse_level(raw: &str) -> anyhow::Result<LevelFilter> {
    Ok(match raw.trim().to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        unknown => bail!("unknown log level: {unknown}"),
    })
}

pub fn resolve_level(from_config: Option<&str>) -> anyhow::Result<LevelFilter> {
    let raw = std::env::var(LOG_LEVEL_ENV)
        .ok()
        .or_else(|| from_config.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
    parse_level(&raw)
}

pub fn init(from_config: Option<&str>) -> anyhow::Result<()> {
    let level = resolve_level(from_config)?;

    let colours = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);
    let use_colour = std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();

    fern::Dispatch::new()
        .format(move |out, message, record| {
            if use_colour {
                out.finish(format_args!(
                    "[{} {}] {}",
                    colours.color(record.level()),
                    record.target(),
                    message
                ))
            } else {
                out.finish(format_args!(
                    "[{} {}] {}",
                    record.level(),
                    record.target(),
                    message
                ))
            }
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}
