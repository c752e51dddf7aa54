use crate::models::PricePoint;

/// Shown in place of any missing value
pub const PLACEHOLDER: &str = "—";

/// French digit grouping separator (narrow no-break space)
const GROUP_SEPARATOR: char = '\u{202f}';

/// Format a number the way a fr-FR locale does: grouped thousands,
/// decimal comma, at most three fraction digits
pub fn format_fr(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(*c);
    }

    let sign = if value.is_sign_negative() { "-" } else { "" };

    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{},{}", sign, grouped, frac_part)
    }
}

/// fr-FR formatted value or the placeholder
pub fn format_optional(value: Option<f64>) -> String {
    value.map(format_fr).unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Two-decimal percentage, e.g. `0.52 %`
pub fn format_performance(performance: Option<f64>) -> String {
    match performance {
        Some(p) => format!("{:.2} %", p),
        None => PLACEHOLDER.to_string(),
    }
}

/// Table date cell: `YYYY-MM-DD HH:MM:SS` in UTC, the raw string when it does not parse
pub fn format_date(point: &PricePoint) -> String {
    match point.instant {
        Some(instant) => instant.format("%Y-%m-%d %H:%M:%S").to_string(),
        None if point.date.is_empty() => PLACEHOLDER.to_string(),
        None => point.date.clone(),
    }
}

/// Text of the current price card
pub fn format_current_price(selection: Option<&PricePoint>) -> String {
    match selection {
        Some(point) => format!("{} XOF", format_fr(point.mid)),
        None => PLACEHOLDER.to_string(),
    }
}
