use serde::Serialize;

use crate::{
    aggregate::{AggregateResult, Evaluation},
    catalog::ModelPreset,
    drivers::{Component, DriverResult, Unit},
    format,
    model::{DomainWarning, InputModel},
    params,
    types::Currency,
};

pub const REPORT_VERSION: &str = "1.0.0";

const FONT_STYLESHEET: &str =
    "https://fonts.googleapis.com/css2?family=Inter:wght@400;600;700&display=swap";
const LOGO_URL: &str = "https://images.ctfassets.net/jtqsy5pye0zd/6wNuQ2xMvbw134rccObi0q/bf61badc6d6d9780609e541713f0bba6/Contentful_Logo_2.5_Dark.svg";

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub report_version: String,
    pub model: ModelSummary,
    pub currency: Currency,
    pub aggregate: AggregateResult,
    pub drivers: Vec<DriverSection>,
    pub inputs: Vec<InputRow>,
    pub warnings: Vec<DomainWarning>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub preset_id: String,
    pub preset_name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DriverSection {
    pub id: String,
    pub name: String,
    pub total: f64,
    pub contribution: f64,
    pub components: Vec<Component>,
    pub detail: DriverResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputRow {
    pub key: String,
    pub label: String,
    pub value: f64,
}

impl Report {
    pub fn new(
        preset: &ModelPreset,
        model: &InputModel,
        evaluation: &Evaluation,
        currency: Currency,
    ) -> Self {
        let drivers = evaluation
            .drivers
            .iter()
            .map(|d| DriverSection {
                id: d.id().to_string(),
                name: d.id().display_name().to_string(),
                total: d.total(),
                contribution: evaluation.contribution(d.id()),
                components: d.components(),
                detail: d.clone(),
            })
            .collect();

        let inputs = model
            .iter()
            .map(|(key, value)| InputRow {
                key: key.to_string(),
                label: params::label_for(key).to_string(),
                value,
            })
            .collect();

        Self {
            report_version: REPORT_VERSION.to_string(),
            model: ModelSummary {
                preset_id: preset.id.clone(),
                preset_name: preset.name.clone(),
                description: preset.description.clone(),
            },
            currency,
            aggregate: evaluation.aggregate.clone(),
            drivers,
            inputs,
            warnings: model.domain_warnings(),
        }
    }

    fn render(&self, c: &Component) -> String {
        match c.unit {
            Unit::Money => format::currency(c.value, self.currency),
            Unit::Donations => format::number(c.value),
            Unit::Litres => format!("{} L", format::number(c.value)),
            Unit::Percent => format::percent(Some(c.value)),
        }
    }

    /// Total of a driver in its own unit.
    fn render_total(&self, d: &DriverSection) -> String {
        if d.detail.id().is_monetary() {
            format::currency(d.total, self.currency)
        } else {
            format!("{} donations", format::number(d.total))
        }
    }

    pub fn to_markdown(&self) -> String {
        let a = &self.aggregate;
        let money = |v: f64| format::currency(v, self.currency);

        let mut s = String::new();
        s.push_str("# ROI report\n\n");
        s.push_str(&format!("- report_version: `{}`\n", self.report_version));
        s.push_str(&format!(
            "- model: `{}` ({})\n",
            self.model.preset_id, self.model.preset_name
        ));
        s.push_str(&format!("- horizon: `{} years`\n", a.horizon_years));
        s.push_str(&format!("- attribution_factor: `{:.2}`\n", a.attribution_factor));
        s.push('\n');

        s.push_str("## Total business impact\n\n");
        s.push_str(&format!("- annual_benefit: `{}`\n", money(a.annual_benefit)));
        s.push_str(&format!(
            "- {}_year_benefit: `{}`\n",
            a.horizon_years,
            money(a.horizon_benefit)
        ));
        s.push_str(&format!("- total_cost: `{}`\n", money(a.total_cost)));
        s.push_str(&format!("- net_benefit: `{}`\n", money(a.net_benefit)));
        s.push_str(&format!("- roi: `{}`\n", format::percent(a.roi_percent)));
        s.push_str(&format!("- payback: `{}`\n", format::months(a.payback_months)));
        if let Some(v) = &a.donation_volume {
            s.push_str(&format!(
                "- additional_donations: `{}` (`{} L`)\n",
                format::number(v.additional_donations),
                format::number(v.additional_litres)
            ));
        }
        s.push('\n');

        s.push_str("## Value drivers\n\n");
        if self.drivers.is_empty() {
            s.push_str("- (none enabled)\n\n");
        }
        for d in &self.drivers {
            s.push_str(&format!("### {}\n", d.name));
            for c in &d.components {
                let marker = if c.counted { "" } else { " _(context)_" };
                s.push_str(&format!("- {}: `{}`{}\n", c.label, self.render(c), marker));
            }
            s.push_str(&format!("- total: `{}`\n", self.render_total(d)));
            s.push('\n');
        }

        if !self.warnings.is_empty() {
            s.push_str("## Inputs outside nominal range\n\n");
            for w in &self.warnings {
                s.push_str(&format!(
                    "- {}: `{}` (expected {} to {})\n",
                    params::label_for(&w.key),
                    w.value,
                    w.min,
                    w.max
                ));
            }
            s.push('\n');
        }

        s
    }

    /// Standalone HTML slide deck. Only the font stylesheet and logo are
    /// fetched remotely.
    pub fn to_html(&self) -> String {
        let a = &self.aggregate;
        let money = |v: f64| format::currency(v, self.currency);

        let mut slides = String::new();

        slides.push_str(&format!(
            "<section class=\"slide title\">\n<img class=\"logo\" src=\"{LOGO_URL}\" alt=\"logo\">\n<h1>{}</h1>\n<p>{}</p>\n</section>\n",
            escape(&self.model.preset_name),
            escape(&self.model.description)
        ));

        let mut metrics = vec![
            ("Annual Benefit", money(a.annual_benefit)),
            (
                "Horizon Benefit",
                format!("{} ({} yr)", money(a.horizon_benefit), a.horizon_years),
            ),
            ("Total Cost", money(a.total_cost)),
            ("Net Benefit", money(a.net_benefit)),
            ("ROI", format::percent(a.roi_percent)),
            ("Payback Period", format::months(a.payback_months)),
        ];
        if let Some(v) = &a.donation_volume {
            metrics.push((
                "Additional Donations",
                format!(
                    "{} ({} L)",
                    format::number(v.additional_donations),
                    format::number(v.additional_litres)
                ),
            ));
        }
        slides.push_str("<section class=\"slide\">\n<h2>Total Business Impact</h2>\n<div class=\"grid\">\n");
        for (label, value) in metrics {
            slides.push_str(&format!(
                "<div class=\"metric\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>\n",
                escape(label),
                escape(&value)
            ));
        }
        slides.push_str("</div>\n</section>\n");

        for d in &self.drivers {
            slides.push_str(&format!(
                "<section class=\"slide driver\">\n<h2>{}</h2>\n<table>\n",
                escape(&d.name)
            ));
            for c in &d.components {
                let class = if c.counted { "" } else { " class=\"context\"" };
                slides.push_str(&format!(
                    "<tr{class}><td>{}</td><td>{}</td></tr>\n",
                    escape(c.label),
                    escape(&self.render(c))
                ));
            }
            slides.push_str(&format!(
                "<tr class=\"total\"><td>Total</td><td>{}</td></tr>\n</table>\n</section>\n",
                escape(&self.render_total(d))
            ));
        }

        slides.push_str("<section class=\"slide\">\n<h2>Assumptions</h2>\n<table>\n");
        for row in &self.inputs {
            slides.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>\n",
                escape(&row.label),
                row.value
            ));
        }
        slides.push_str("</table>\n</section>\n");

        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<link rel=\"stylesheet\" href=\"{FONT_STYLESHEET}\">\n<style>\n{STYLE}</style>\n</head>\n<body>\n{slides}</body>\n</html>\n",
            title = escape(&format!("{} ROI", self.model.preset_name)),
        )
    }
}

const STYLE: &str = "body { margin: 0; font-family: Inter, sans-serif; background: #f1f5f9; color: #0f172a; }
.slide { box-sizing: border-box; min-height: 100vh; padding: 64px; page-break-after: always; background: #fff; margin-bottom: 8px; }
.title { background: linear-gradient(135deg, #2563eb, #0ea5e9); color: #fff; }
.logo { height: 34px; margin-bottom: 48px; }
.grid { display: grid; grid-template-columns: repeat(2, 1fr); gap: 24px; }
.metric { background: #eff6ff; border-radius: 12px; padding: 24px; }
.metric .label { font-size: 14px; opacity: 0.8; }
.metric .value { font-size: 32px; font-weight: 700; }
table { width: 100%; border-collapse: collapse; font-size: 18px; }
td { padding: 10px 0; border-bottom: 1px solid #e2e8f0; }
td:last-child { text-align: right; font-weight: 600; }
tr.context td { color: #64748b; font-weight: 400; }
tr.total td { font-weight: 700; border-top: 2px solid #0f172a; }
";

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
