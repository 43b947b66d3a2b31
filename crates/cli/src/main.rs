mod logging;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};

use valuecalc_core::catalog;
use valuecalc_core::config::Config;
use valuecalc_core::csv_io;
use valuecalc_core::format;
use valuecalc_core::lookup::{JsonFileLookup, LookupSession, LookupState};
use valuecalc_core::report::Report;
use valuecalc_core::session::Session;
use valuecalc_core::store::{FileStore, KeyValueStore, MemoryStore};
use valuecalc_core::{Currency, DriverId, Horizon};

const DEFAULT_PRESET: &str = "marketing";

#[derive(Parser, Debug)]
#[command(
    name = "valuecalc",
    version,
    about = "Content platform ROI and business value calculator"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args, Debug, Clone)]
struct SessionArgs {
    /// Model preset id (see `valuecalc presets`)
    #[arg(long)]
    preset: Option<String>,

    /// Directory holding saved inputs and driver selections
    #[arg(long)]
    state_dir: Option<PathBuf>,

    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the available model presets
    Presets,

    /// Evaluate a preset and write reports
    Evaluate {
        #[command(flatten)]
        session: SessionArgs,

        /// Override one input, e.g. --set monthlyVisitors=120000
        #[arg(long = "set", value_parser = parse_assignment)]
        set: Vec<(String, f64)>,

        /// Apply values from a two-column CSV before evaluating
        #[arg(long)]
        import: Option<PathBuf>,

        #[arg(long)]
        enable: Vec<DriverId>,

        #[arg(long)]
        disable: Vec<DriverId>,

        /// Projection horizon in years (3 or 5)
        #[arg(long)]
        horizon: Option<u32>,

        /// Share of revenue and CX benefit credited to the platform (0 to 1)
        #[arg(long)]
        attribution: Option<f64>,

        #[arg(long)]
        currency: Option<Currency>,

        /// Persist the resulting inputs and drivers to the state dir
        #[arg(long)]
        save: bool,

        #[arg(long, default_value = "valuecalc-out")]
        out: PathBuf,

        #[arg(long, default_value = "json")]
        output_format: OutputFormat,
    },

    /// Write the current inputs as CSV
    ExportCsv {
        #[command(flatten)]
        session: SessionArgs,

        /// Destination file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Merge a CSV into the saved inputs of a preset
    ImportCsv {
        #[command(flatten)]
        session: SessionArgs,

        #[arg(long)]
        input: PathBuf,
    },

    /// Look up company data and optionally apply it
    Lookup {
        #[command(flatten)]
        session: SessionArgs,

        /// Company name or domain
        #[arg(long)]
        query: String,

        /// Directory of canned `<query>.json` responses
        #[arg(long)]
        responses_dir: PathBuf,

        /// Apply the suggestions and save them
        #[arg(long)]
        apply: bool,
    },

    /// Discard saved state for a preset
    Reset {
        #[command(flatten)]
        session: SessionArgs,
    },
}

#[derive(Debug, Clone, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Markdown,
    Html,
    All,
}

struct Style {
    bold: &'static str,
    dim: &'static str,
    red: &'static str,
    green: &'static str,
    yellow: &'static str,
    blue: &'static str,
    reset: &'static str,
}

const COLOR: Style = Style {
    bold: "\x1b[1m",
    dim: "\x1b[2m",
    red: "\x1b[31m",
    green: "\x1b[32m",
    yellow: "\x1b[33m",
    blue: "\x1b[34m",
    reset: "\x1b[0m",
};

const PLAIN: Style = Style {
    bold: "",
    dim: "",
    red: "",
    green: "",
    yellow: "",
    blue: "",
    reset: "",
};

fn style() -> &'static Style {
    if std::env::var_os("NO_COLOR").is_some() {
        &PLAIN
    } else {
        &COLOR
    }
}

/// Options shared by every command once config defaults are folded in.
struct Resolved {
    preset: String,
    state_dir: Option<PathBuf>,
    config: Config,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let res = run(cli.cmd);

    match res {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            let s = style();
            eprintln!(
                "{}{red}error:{reset} {:#}",
                s.bold,
                e,
                red = s.red,
                reset = s.reset
            );
            std::process::ExitCode::from(1)
        }
    }
}

fn run(cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Presets => {
            init_logging(&load_config(None));
            run_presets();
            Ok(())
        }
        Commands::Evaluate {
            session,
            set,
            import,
            enable,
            disable,
            horizon,
            attribution,
            currency,
            save,
            out,
            output_format,
        } => {
            let r = resolve(session);
            let horizon = match horizon {
                Some(years) => Horizon::try_from(years)?,
                None => r.config.horizon.unwrap_or_default(),
            };
            let attribution = attribution.or(r.config.attribution_factor).unwrap_or(1.0);
            let currency = currency.or(r.config.currency).unwrap_or_default();
            let edits = Edits {
                set,
                import,
                enable,
                disable,
            };
            run_evaluate(
                &r,
                edits,
                horizon,
                attribution,
                currency,
                save,
                &out,
                &output_format,
            )
        }
        Commands::ExportCsv { session, out } => {
            let r = resolve(session);
            run_export_csv(&r, out.as_deref())
        }
        Commands::ImportCsv { session, input } => {
            let r = resolve(session);
            run_import_csv(&r, &input)
        }
        Commands::Lookup {
            session,
            query,
            responses_dir,
            apply,
        } => {
            let r = resolve(session);
            run_lookup(&r, &query, &responses_dir, apply)
        }
        Commands::Reset { session } => {
            let r = resolve(session);
            run_reset(&r)
        }
    }
}

fn parse_assignment(raw: &str) -> Result<(String, f64), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid value for {}: {e}", key.trim()))?;
    Ok((key.trim().to_string(), value))
}

fn print_banner() {
    let s = style();
    eprintln!(
        "\n  {bold}value{reset}{blue}|{reset}{dim}calc{reset}  {dim}content platform business case{reset}\n",
        bold = s.bold,
        blue = s.blue,
        dim = s.dim,
        reset = s.reset,
    );
}

fn roi_color(roi: Option<f64>) -> &'static str {
    let s = style();
    match roi {
        Some(r) if r >= 100.0 => s.green,
        Some(r) if r >= 0.0 => s.yellow,
        _ => s.red,
    }
}

fn load_config(path: Option<&Path>) -> Config {
    let loaded = match path {
        Some(p) => Config::load(p).map(Some),
        None => Config::find_in(Path::new(".")),
    };
    loaded.unwrap_or_else(|e| {
        eprintln!(
            "{}{}warning:{} failed to load config: {:#}",
            style().bold,
            style().yellow,
            style().reset,
            e
        );
        None
    })
    .unwrap_or_default()
}

fn init_logging(config: &Config) {
    if let Err(e) = logging::init(config.log_level.as_deref()) {
        eprintln!(
            "{}{}warning:{} logging disabled: {:#}",
            style().bold,
            style().yellow,
            style().reset,
            e
        );
    }
}

fn resolve(args: SessionArgs) -> Resolved {
    let config = load_config(args.config.as_deref());
    init_logging(&config);
    Resolved {
        preset: args
            .preset
            .or_else(|| config.preset.clone())
            .unwrap_or_else(|| DEFAULT_PRESET.to_string()),
        state_dir: args.state_dir.or_else(|| config.state_dir.clone()),
        config,
    }
}

fn open_session(r: &Resolved) -> anyhow::Result<Session<Box<dyn KeyValueStore>>> {
    let store: Box<dyn KeyValueStore> = match &r.state_dir {
        Some(dir) => Box::new(FileStore::open(dir)?),
        None => Box::new(MemoryStore::new()),
    };
    Session::open(store, &r.preset)
}

fn require_state_dir(r: &Resolved, action: &str) -> anyhow::Result<()> {
    if r.state_dir.is_none() {
        bail!("{action} needs --state-dir (or state_dir in valuecalc.toml)");
    }
    Ok(())
}

fn run_presets() {
    let s = style();
    for p in catalog::presets() {
        let drivers: Vec<String> = p.drivers.iter().map(|d| d.to_string()).collect();
        // Machine-parseable line on stdout
        println!("{} drivers={}", p.id, drivers.join(","));
        eprintln!(
            "  {bold}{}{reset}  {dim}{}{reset}",
            p.name,
            p.description,
            bold = s.bold,
            dim = s.dim,
            reset = s.reset
        );
    }
}

struct Edits {
    set: Vec<(String, f64)>,
    import: Option<PathBuf>,
    enable: Vec<DriverId>,
    disable: Vec<DriverId>,
}

#[allow(clippy::too_many_arguments)]
fn run_evaluate(
    r: &Resolved,
    edits: Edits,
    horizon: Horizon,
    attribution: f64,
    currency: Currency,
    save: bool,
    out: &Path,
    output_format: &OutputFormat,
) -> anyhow::Result<()> {
    if save {
        require_state_dir(r, "--save")?;
    }

    print_banner();

    let mut session = open_session(r)?;

    if let Some(path) = &edits.import {
        let file =
            std::fs::File::open(path).with_context(|| format!("open {}", path.display()))?;
        let (values, summary) = csv_io::read_csv(file)?;
        session.apply(&values);
        eprintln!(
            "  {}imported {} values, skipped {}{}",
            style().dim,
            summary.updated,
            summary.skipped,
            style().reset
        );
    }
    for (key, value) in &edits.set {
        session.set_param(key, *value)?;
    }
    for id in &edits.enable {
        session.enable(*id);
    }
    for id in &edits.disable {
        session.disable(*id);
    }

    let evaluation = session.evaluate(attribution, horizon)?;
    let report = Report::new(session.preset(), session.model(), &evaluation, currency);

    if save {
        session.save()?;
    }

    std::fs::create_dir_all(out).with_context(|| format!("create out dir {}", out.display()))?;

    let write_json = matches!(output_format, OutputFormat::Json | OutputFormat::All);
    let write_md = matches!(output_format, OutputFormat::Markdown | OutputFormat::All);
    let write_html = matches!(output_format, OutputFormat::Html | OutputFormat::All);

    let mut written = Vec::new();
    if write_json {
        let path = out.join("report.json");
        let json = serde_json::to_vec_pretty(&report).context("serialize report json")?;
        std::fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;
        written.push(path);
    }
    if write_md {
        let path = out.join("report.md");
        std::fs::write(&path, report.to_markdown())
            .with_context(|| format!("write {}", path.display()))?;
        written.push(path);
    }
    if write_html {
        let path = out.join("report.html");
        std::fs::write(&path, report.to_html())
            .with_context(|| format!("write {}", path.display()))?;
        written.push(path);
    }

    let a = &report.aggregate;
    // Machine-parseable line on stdout
    println!(
        "annual_benefit={:.2} total_cost={:.2} net_benefit={:.2} roi_percent={} payback_months={}",
        a.annual_benefit,
        a.total_cost,
        a.net_benefit,
        machine(a.roi_percent),
        machine(a.payback_months)
    );

    // Human-readable output on stderr
    print_report(&report, &written);

    Ok(())
}

fn machine(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "n/a".to_string(),
    }
}

fn print_report(report: &Report, written: &[PathBuf]) {
    let s = style();
    let a = &report.aggregate;
    let money = |v: f64| format::currency(v, report.currency);

    eprintln!(
        "  {bold}{}{reset}  {dim}{} year horizon, attribution {:.2}{reset}\n",
        report.model.preset_name,
        a.horizon_years,
        a.attribution_factor,
        bold = s.bold,
        dim = s.dim,
        reset = s.reset
    );

    for d in &report.drivers {
        let shown = if d.detail.id().is_monetary() {
            money(d.contribution)
        } else {
            format!("{} donations", format::number(d.total))
        };
        eprintln!(
            "  {dim}{:<26}{reset}{bold}{}{reset}",
            d.name,
            shown,
            dim = s.dim,
            bold = s.bold,
            reset = s.reset
        );
    }
    eprintln!();

    let horizon_label = format!("{}_year_benefit", a.horizon_years);
    let rows = [
        ("annual_benefit", money(a.annual_benefit)),
        (horizon_label.as_str(), money(a.horizon_benefit)),
        ("total_cost", money(a.total_cost)),
        ("net_benefit", money(a.net_benefit)),
    ];
    for (label, value) in rows {
        eprintln!(
            "  {dim}{:<26}{reset}{bold}{}{reset}",
            label,
            value,
            dim = s.dim,
            bold = s.bold,
            reset = s.reset
        );
    }
    eprintln!(
        "  {dim}{:<26}{reset}{rc}{bold}{}{reset}",
        "roi",
        format::percent(a.roi_percent),
        dim = s.dim,
        rc = roi_color(a.roi_percent),
        bold = s.bold,
        reset = s.reset
    );
    eprintln!(
        "  {dim}{:<26}{reset}{bold}{}{reset}",
        "payback",
        format::months(a.payback_months),
        dim = s.dim,
        bold = s.bold,
        reset = s.reset
    );
    if let Some(v) = &a.donation_volume {
        eprintln!(
            "  {dim}{:<26}{reset}{bold}{} ({} L){reset}",
            "additional_donations",
            format::number(v.additional_donations),
            format::number(v.additional_litres),
            dim = s.dim,
            bold = s.bold,
            reset = s.reset
        );
    }

    if !report.warnings.is_empty() {
        eprintln!();
        for w in &report.warnings {
            eprintln!(
                "  {yellow}outside range{reset}  {} = {} {dim}(expected {} to {}){reset}",
                w.key,
                w.value,
                w.min,
                w.max,
                yellow = s.yellow,
                dim = s.dim,
                reset = s.reset
            );
        }
    }

    eprintln!();
    for path in written {
        eprintln!(
            "  {dim}\u{2192} {}{reset}",
            path.display(),
            dim = s.dim,
            reset = s.reset
        );
    }
    eprintln!();
}

fn run_export_csv(r: &Resolved, out: Option<&Path>) -> anyhow::Result<()> {
    let session = open_session(r)?;
    match out {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("create {}", path.display()))?;
            csv_io::write_csv(session.model(), file)?;
            eprintln!(
                "  {}\u{2192} {}{}",
                style().dim,
                path.display(),
                style().reset
            );
        }
        None => csv_io::write_csv(session.model(), std::io::stdout().lock())?,
    }
    Ok(())
}

fn run_import_csv(r: &Resolved, input: &Path) -> anyhow::Result<()> {
    require_state_dir(r, "import-csv")?;
    let mut session = open_session(r)?;

    let file = std::fs::File::open(input).with_context(|| format!("open {}", input.display()))?;
    let (values, summary) = csv_io::read_csv(file)?;
    session.apply(&values);
    session.save()?;

    println!("updated={} skipped={}", summary.updated, summary.skipped);
    Ok(())
}

fn run_lookup(r: &Resolved, query: &str, responses_dir: &Path, apply: bool) -> anyhow::Result<()> {
    if apply {
        require_state_dir(r, "lookup --apply")?;
    }
    let s = style();
    let mut session = open_session(r)?;
    let service = JsonFileLookup::new(responses_dir);
    let mut lookup = LookupSession::new();

    match lookup.run(&service, query) {
        LookupState::Ready(data) => {
            let suggestions = data.suggestions();
            eprintln!(
                "  {bold}{}{reset}  {dim}{}{reset}",
                data.name,
                data.industry,
                bold = s.bold,
                dim = s.dim,
                reset = s.reset
            );
            for (key, value) in suggestions.iter() {
                let current = session
                    .model()
                    .get(key)
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "-".to_string());
                eprintln!(
                    "  {dim}{:<32}{reset}{} {dim}\u{2192}{reset} {bold}{}{reset}",
                    key,
                    current,
                    value,
                    dim = s.dim,
                    bold = s.bold,
                    reset = s.reset
                );
            }
            if apply {
                session.apply(&suggestions);
                session.save()?;
            }
            println!(
                "status=ready fields={} applied={}",
                suggestions.len(),
                apply
            );
        }
        LookupState::NoData { reason } => {
            eprintln!(
                "  {yellow}no data{reset}  {}",
                reason,
                yellow = s.yellow,
                reset = s.reset
            );
            println!("status=no_data fields=0 applied=false");
        }
        LookupState::Idle | LookupState::Pending(_) => {
            bail!("lookup did not complete");
        }
    }
    Ok(())
}

fn run_reset(r: &Resolved) -> anyhow::Result<()> {
    require_state_dir(r, "reset")?;
    let mut session = open_session(r)?;
    session.reset()?;
    eprintln!(
        "  {}reset {} to defaults{}",
        style().dim,
        session.preset().id,
        style().reset
    );
    Ok(())
}
