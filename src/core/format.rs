//! Display formatting helpers shared by the views.

use crate::core::rates::parse_iso_date;

/// Formats an amount with its currency code to two decimals, e.g. `92.34 EUR`.
pub fn format_currency(amount: f64, code: &str) -> String {
    format!("{amount:.2} {code}")
}

/// Raw rates get four decimals, matching the precision the provider quotes.
pub fn format_rate(rate: f64) -> String {
    format!("{rate:.4}")
}

/// Signed percentage with an explicit `+` on gains, e.g. `+1.82%` / `-1.82%`.
pub fn format_percent_change(percent: f64) -> String {
    if percent > 0.0 {
        format!("+{percent:.2}%")
    } else {
        format!("{percent:.2}%")
    }
}

/// Whether a raw input string is usable as a conversion amount.
///
/// Zero is accepted here: it means "no conversion requested" while typing and
/// only becomes an error on explicit submit.
pub fn is_valid_amount(input: &str) -> bool {
    input
        .trim()
        .parse::<f64>()
        .map(|value| value.is_finite() && value >= 0.0)
        .unwrap_or(false)
}

/// Short `DD/MM` chart label for an ISO date.
///
/// Falls back to the raw string when the date does not parse; series built
/// through [`crate::core::rates::RateSeries::new`] never hit that path.
pub fn day_month_label(date: &str) -> String {
    parse_iso_date(date)
        .map(|d| d.format("%d/%m").to_string())
        .unwrap_or_else(|| date.to_string())
}
