use crate::types::Currency;

/// Thousands-separated integer rendering, e.g. `1234567` -> `1,234,567`.
pub fn commas(n: u64) -> String {
    let s = n.to_string();
    let bytes = s.as_bytes();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, &b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(b as char);
    }
    result
}

fn rounded_magnitude(value: f64) -> (bool, u64) {
    let rounded = value.round();
    let negative = rounded < 0.0;
    (negative, rounded.abs() as u64)
}

/// Whole-unit currency, e.g. `$1,234,567` or `-£1,200`.
pub fn currency(value: f64, currency: Currency) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let (negative, magnitude) = rounded_magnitude(value);
    format!(
        "{}{}{}",
        if negative { "-" } else { "" },
        currency.symbol(),
        commas(magnitude)
    )
}

/// Whole-number count with separators, e.g. donations.
pub fn number(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let (negative, magnitude) = rounded_magnitude(value);
    format!("{}{}", if negative { "-" } else { "" }, commas(magnitude))
}

pub fn percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.0}%"),
        _ => "N/A".to_string(),
    }
}

pub fn months(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.1} mo"),
        _ => "N/A".to_string(),
    }
}
