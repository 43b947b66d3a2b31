//! Two-column CSV export and import of an [`InputModel`].

use std::io::{Read, Write};

use anyhow::Context;
use log::warn;
use serde::Serialize;

use crate::{model::InputModel, params};

pub const HEADER: [&str; 2] = ["Input Parameter", "Value"];

/// Outcome of an import: how many rows changed the model and how many were
/// skipped because the label was unknown or the value was not a number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub updated: usize,
    pub skipped: usize,
}

pub fn write_csv<W: Write>(model: &InputModel, w: W) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(w);
    writer.write_record(HEADER).context("write csv header")?;
    for (key, value) in model.iter() {
        let value = value.to_string();
        writer
            .write_record([params::label_for(key), value.as_str()])
            .with_context(|| format!("write csv row {key}"))?;
    }
    writer.flush().context("flush csv")?;
    Ok(())
}

pub fn to_csv_string(model: &InputModel) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    write_csv(model, &mut buf)?;
    String::from_utf8(buf).context("csv output is not utf-8")
}

/// Parse rows into a partial model of recognized parameters only. Bad rows
/// are skipped and counted, never fatal.
pub fn read_csv<R: Read>(r: R) -> anyhow::Result<(InputModel, ImportSummary)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(r);

    let mut values = InputModel::new();
    let mut summary = ImportSummary::default();

    for (line, record) in reader.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                warn!("skipping unreadable csv row {}: {e}", line + 2);
                summary.skipped += 1;
                continue;
            }
        };

        let label = record.get(0).unwrap_or_default();
        let raw = record.get(1).unwrap_or_default();

        let Some(spec) = params::resolve_label(label) else {
            warn!("skipping unknown parameter {label:?} on csv row {}", line + 2);
            summary.skipped += 1;
            continue;
        };

        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => {
                values.set(spec.key, v);
                summary.updated += 1;
            }
            _ => {
                warn!("skipping non-numeric value {raw:?} for {}", spec.key);
                summary.skipped += 1;
            }
        }
    }

    Ok((values, summary))
}

/// Import into an existing model, leaving it untouched for skipped rows.
pub fn import_into<R: Read>(model: &mut InputModel, r: R) -> anyhow::Result<ImportSummary> {
    let (values, summary) = read_csv(r)?;
    *model = model.merged_with(&values);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{MONTHLY_VISITORS, NUMBER_OF_CMS};

    #[test]
    fn export_uses_labels_and_plain_decimals() {
        let model: InputModel = [(MONTHLY_VISITORS, 100_000.0), ("currentConversionRate", 2.5)]
            .into_iter()
            .collect();
        let csv = to_csv_string(&model).unwrap();
        insta::assert_snapshot!(csv.trim_end(), @r###"
        Input Parameter,Value
        Monthly Website Visitors,100000
        Current Conversion Rate (%),2.5
        "###);
    }

    #[test]
    fn import_is_case_insensitive_and_unescapes_quotes() {
        let input = "Input Parameter,Value\n\"MONTHLY website visitors\",\"120000\"\nnumber of cms systems,2\n";
        let (values, summary) = read_csv(input.as_bytes()).unwrap();
        assert_eq!(values.get(MONTHLY_VISITORS), Some(120_000.0));
        assert_eq!(values.get(NUMBER_OF_CMS), Some(2.0));
        assert_eq!(summary, ImportSummary { updated: 2, skipped: 0 });
    }

    #[test]
    fn bad_rows_are_skipped_and_counted() {
        let input = "Input Parameter,Value\nFavourite Colour,12\nMonthly Website Visitors,lots\nlonely\nNumber of CMS Systems,4\n";
        let mut model: InputModel = [(MONTHLY_VISITORS, 1.0)].into_iter().collect();

        let summary = import_into(&mut model, input.as_bytes()).unwrap();

        assert_eq!(summary, ImportSummary { updated: 1, skipped: 3 });
        assert_eq!(model.get(MONTHLY_VISITORS), Some(1.0));
        assert_eq!(model.get(NUMBER_OF_CMS), Some(4.0));
    }

    #[test]
    fn labels_with_commas_survive_quoting() {
        let model: InputModel = [("weird, key", 3.0)].into_iter().collect();
        let csv = to_csv_string(&model).unwrap();
        assert!(csv.contains("\"weird, key\",3"));
    }
}
